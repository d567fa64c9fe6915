//! Credential gate in front of the admin zone.

use std::rc::Rc;

use platform_host::AdminCredentialService;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AdminGateError {
    #[error("a passphrase is required")]
    EmptyPassphrase,
    #[error("the passphrase was not accepted")]
    Rejected,
    #[error("admin verification is unavailable: {0}")]
    Unavailable(String),
}

#[derive(Clone)]
pub struct AdminAccessGate {
    credentials: Rc<dyn AdminCredentialService>,
}

impl AdminAccessGate {
    pub fn new(credentials: Rc<dyn AdminCredentialService>) -> Self {
        Self { credentials }
    }

    /// Checks `passphrase` with the credential service. Verification errors deny access.
    pub async fn unlock(&self, passphrase: &str) -> Result<(), AdminGateError> {
        let passphrase = passphrase.trim();
        if passphrase.is_empty() {
            return Err(AdminGateError::EmptyPassphrase);
        }
        match self.credentials.verify(passphrase).await {
            Ok(true) => {
                info!("admin passphrase accepted");
                Ok(())
            }
            Ok(false) => {
                warn!("admin passphrase rejected");
                Err(AdminGateError::Rejected)
            }
            Err(err) => {
                warn!(error = %err, "admin verification failed");
                Err(AdminGateError::Unavailable(err))
            }
        }
    }
}
