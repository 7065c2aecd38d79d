use std::sync::OnceLock;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecuritySession {
    pub session_id: String,
}

/// Session-scoped security initializer.
///
/// Construct one per session and pass it by reference; `initialize` runs its
/// setup at most once and returns the same session afterwards.
#[derive(Debug, Default)]
pub struct SecurityManager {
    session: OnceLock<SecuritySession>,
}

impl SecurityManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn initialize(&self) -> &SecuritySession {
        let mut created = false;
        let session = self.session.get_or_init(|| {
            created = true;
            SecuritySession {
                session_id: Uuid::new_v4().to_string(),
            }
        });

        if created {
            info!("security manager initialized: {}", session.session_id);
        } else {
            debug!("security manager already initialized: {}", session.session_id);
        }
        session
    }

    pub fn is_initialized(&self) -> bool {
        self.session.get().is_some()
    }

    pub fn session(&self) -> Option<&SecuritySession> {
        self.session.get()
    }
}
