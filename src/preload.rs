//! Scripts injected into windows before page scripts run

/// IPC message the login-assist script posts once the provider hands back
pub const AUTH_DONE_MESSAGE: &str = "authDone";

/// Preload script attached to a window at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preload {
    /// Clipboard shortcuts for the code editor
    EditorClipboardFix,
    /// Signals login completion from an OAuth popup
    LoginAssist,
}

impl Preload {
    pub fn name(&self) -> &'static str {
        match self {
            Preload::EditorClipboardFix => "editor-clipboard-fix",
            Preload::LoginAssist => "login-assist",
        }
    }

    pub fn script(&self) -> &'static str {
        match self {
            Preload::EditorClipboardFix => EDITOR_CLIPBOARD_FIX,
            Preload::LoginAssist => LOGIN_ASSIST,
        }
    }
}

// The embedded editor swallows Ctrl+V and Ctrl+A unless they are routed
// through execCommand.
const EDITOR_CLIPBOARD_FIX: &str = r#"
window.addEventListener('load', () => {
    if (document.getElementsByClassName('ace_editor').length === 0) {
        return;
    }
    window.addEventListener('keyup', (e) => {
        if (e.ctrlKey && e.keyCode === 86) {
            document.execCommand('paste');
        } else if (e.ctrlKey && e.keyCode === 65) {
            document.execCommand('selectAll');
        }
    });
});
"#;

// Providers redirect back to the service domain when the login is done.
const LOGIN_ASSIST: &str = r#"
window.addEventListener('load', () => {
    const host = window.location.hostname;
    if (host === 'repl.it' || host.endsWith('.repl.it')) {
        window.ipc.postMessage('authDone');
    }
});
"#;
