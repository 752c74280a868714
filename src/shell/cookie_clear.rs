//! Cookie clearing protocol

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::browser::CookieJar;
use crate::config::FlushPolicy;
use crate::core::{ClearScope, CookiePartition, ShellError};

/// Outcome of one clear pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearReport {
    pub scope: ClearScope,
    /// Cookies removed from the jar
    pub removed: usize,
    /// Cookies the scope left alone
    pub kept: usize,
    /// Selected cookies the store refused to remove
    pub failed: usize,
    /// Flushes the store rejected
    pub flush_failures: usize,
}

impl ClearReport {
    /// Every selected cookie is gone and persisted
    pub fn is_complete(&self) -> bool {
        self.failed == 0 && self.flush_failures == 0
    }
}

/// Removes cookies from the jar one at a time.
///
/// Only one pass runs at a time; a pass started while another is in flight
/// fails with [`ShellError::ClearInProgress`] instead of racing it.
pub struct CookieClearer {
    jar: Arc<dyn CookieJar>,
    flush: FlushPolicy,
    root_domain: String,
    in_flight: Mutex<()>,
}

impl CookieClearer {
    pub fn new(jar: Arc<dyn CookieJar>, flush: FlushPolicy, root_domain: impl Into<String>) -> Self {
        Self {
            jar,
            flush,
            root_domain: root_domain.into(),
            in_flight: Mutex::new(()),
        }
    }

    /// Remove every cookie `scope` selects, in enumeration order.
    ///
    /// A removal or flush the store rejects is logged and counted; the pass
    /// carries on with the remaining cookies.
    pub async fn clear(&self, scope: ClearScope) -> Result<ClearReport, ShellError> {
        let _guard = self.in_flight.try_lock().map_err(|_| ShellError::ClearInProgress)?;

        let cookies = self.jar.get_all().await?;
        let partition = CookiePartition::split(cookies, scope, &self.root_domain);

        let mut report = ClearReport {
            scope,
            removed: 0,
            kept: partition.keep.len(),
            failed: 0,
            flush_failures: 0,
        };

        for cookie in &partition.remove {
            let url = cookie.removal_url();
            if let Err(e) = self.jar.remove(&url, &cookie.name).await {
                tracing::warn!("Failed to remove cookie {} at {}: {}", cookie.name, url, e);
                report.failed += 1;
                continue;
            }
            report.removed += 1;

            if self.flush == FlushPolicy::PerRemoval {
                if let Err(e) = self.jar.flush().await {
                    tracing::warn!("Failed to flush cookie store after removing {}: {}", cookie.name, e);
                    report.flush_failures += 1;
                }
            }
        }

        if self.flush == FlushPolicy::OnCompletion && report.removed > 0 {
            if let Err(e) = self.jar.flush().await {
                tracing::warn!("Failed to flush cookie store: {}", e);
                report.flush_failures += 1;
            }
        }

        tracing::info!(
            ?scope,
            removed = report.removed,
            kept = report.kept,
            failed = report.failed,
            flush_failures = report.flush_failures,
            "Cookie clear finished"
        );

        Ok(report)
    }
}
