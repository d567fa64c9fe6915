//! Shared transport interop for browser bridge calls.
//!
//! Routes calls to target-specific implementations while preserving a uniform API for the
//! bridge module.

use serde::{de::DeserializeOwned, Serialize};

#[cfg(not(target_arch = "wasm32"))]
mod non_wasm;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(not(target_arch = "wasm32"))]
use non_wasm as imp;
#[cfg(target_arch = "wasm32")]
use wasm as imp;

pub async fn http_get_json<T: DeserializeOwned>(url: &str) -> Result<T, String> {
    imp::http_get_json(url).await
}

pub async fn http_post_json<B: Serialize, T: DeserializeOwned>(
    url: &str,
    body: &B,
    bearer_token: Option<&str>,
) -> Result<T, String> {
    imp::http_post_json(url, body, bearer_token).await
}

pub async fn current_position() -> Result<(f64, f64), String> {
    imp::current_position().await
}

pub fn scroll_to_top() {
    imp::scroll_to_top();
}
