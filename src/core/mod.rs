//! Core data models shared by the shell

mod cookie;
mod error;
mod identity;
mod window;

pub use cookie::*;
pub use error::*;
pub use identity::*;
pub use window::*;

/// Root domain of the hosted service; its cookies survive a login clear
pub const SERVICE_ROOT_DOMAIN: &str = "repl.it";

/// Authenticated landing page of the hosted service
pub const SERVICE_HOME_URL: &str = "https://repl.it/~";

/// Background painted before the service renders
pub const WINDOW_BACKGROUND: &str = "#393c42";
