//! HTTP admin credential adapter.

use platform_host::{AdminCredentialFuture, AdminCredentialService};
use serde::{Deserialize, Serialize};

use crate::bridge;

#[derive(Debug, Serialize)]
struct VerifyRequest<'a> {
    passphrase: &'a str,
}

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    #[serde(default)]
    authorized: bool,
}

#[derive(Debug, Clone)]
/// Admin credential adapter posting the passphrase to a verification endpoint.
pub struct WebAdminCredentialService {
    endpoint: String,
}

impl WebAdminCredentialService {
    /// Creates an adapter for `endpoint`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl AdminCredentialService for WebAdminCredentialService {
    fn verify<'a>(
        &'a self,
        passphrase: &'a str,
    ) -> AdminCredentialFuture<'a, Result<bool, String>> {
        Box::pin(async move {
            let response: VerifyResponse =
                bridge::http_post_json(&self.endpoint, &VerifyRequest { passphrase }, None)
                    .await?;
            Ok(response.authorized)
        })
    }
}
