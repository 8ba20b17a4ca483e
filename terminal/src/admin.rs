use std::sync::Arc;

use common::ADMIN_SENTINEL;
use tokio::sync::{Notify, OnceCell};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::api::ContestApi;

/// Process-wide admin privilege, assigned at most once.
///
/// Readers never block: until the auth check lands every render treats the
/// user as non-admin. Once set the value can not change, so a session never
/// loses privilege mid-way.
#[derive(Clone, Default)]
pub struct AdminFlag {
    cell: Arc<OnceCell<bool>>,
    notify: Arc<Notify>,
}

impl AdminFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the flag had already been resolved.
    pub fn resolve(&self, is_admin: bool) -> bool {
        match self.cell.set(is_admin) {
            Ok(()) => {
                self.notify.notify_waiters();
                true
            }
            Err(_) => {
                warn!(
                    "Admin flag already resolved to {:?}, ignoring {}",
                    self.cell.get(),
                    is_admin
                );
                false
            }
        }
    }

    pub fn current(&self) -> bool {
        self.cell.get().copied().unwrap_or(false)
    }

    pub fn is_resolved(&self) -> bool {
        self.cell.initialized()
    }

    pub async fn resolved(&self) -> bool {
        loop {
            let notified = self.notify.notified();
            if let Some(value) = self.cell.get() {
                return *value;
            }
            notified.await;
        }
    }
}

pub fn is_admin_signal(body: &str) -> bool {
    body.trim() == ADMIN_SENTINEL
}

/// Runs the one-shot auth check in the background.
pub fn spawn_admin_check(api: Arc<dyn ContestApi>, flag: AdminFlag) -> JoinHandle<()> {
    tokio::spawn(async move {
        match api.auth().await {
            Ok(body) => {
                let is_admin = is_admin_signal(&body);
                info!("Auth check resolved, admin = {}", is_admin);
                flag.resolve(is_admin);
            }
            Err(err) => {
                warn!("Auth check failed, continuing as non-admin: {}", err);
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_non_admin() {
        let flag = AdminFlag::new();
        assert!(!flag.current());
        assert!(!flag.is_resolved());
    }

    #[test]
    fn test_single_assignment() {
        let flag = AdminFlag::new();
        assert!(flag.resolve(true));
        assert!(!flag.resolve(false));
        assert!(flag.current());
        assert!(flag.clone().current());
    }

    #[test]
    fn test_admin_signal() {
        assert!(is_admin_signal("1"));
        assert!(is_admin_signal("1\n"));
        assert!(!is_admin_signal("0"));
        assert!(!is_admin_signal("true"));
        assert!(!is_admin_signal(""));
    }
}
