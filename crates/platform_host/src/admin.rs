//! Admin credential contracts for the independent admin-zone gate.

use std::{future::Future, pin::Pin};

/// Object-safe boxed future used by [`AdminCredentialService`].
pub type AdminCredentialFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service verifying admin passphrases. Separate from the end-user identity provider.
pub trait AdminCredentialService {
    /// Returns `Ok(true)` when `passphrase` grants admin access.
    fn verify<'a>(&'a self, passphrase: &'a str) -> AdminCredentialFuture<'a, Result<bool, String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Credential service that rejects every passphrase.
pub struct DenyAllAdminCredentials;

impl AdminCredentialService for DenyAllAdminCredentials {
    fn verify<'a>(
        &'a self,
        _passphrase: &'a str,
    ) -> AdminCredentialFuture<'a, Result<bool, String>> {
        Box::pin(async { Ok(false) })
    }
}
