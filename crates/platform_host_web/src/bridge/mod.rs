//! Browser capability bridge for `platform_host_web` service adapters.
//!
//! This module exposes a small, target-independent API (`fetch` JSON helpers, device position,
//! viewport scrolling) and routes each call to the wasm implementation or the non-wasm shim.

mod interop;

use serde::{de::DeserializeOwned, Serialize};

pub(crate) async fn http_get_json<T: DeserializeOwned>(url: &str) -> Result<T, String> {
    interop::http_get_json(url).await
}

pub(crate) async fn http_post_json<B: Serialize, T: DeserializeOwned>(
    url: &str,
    body: &B,
    bearer_token: Option<&str>,
) -> Result<T, String> {
    interop::http_post_json(url, body, bearer_token).await
}

pub(crate) async fn current_position() -> Result<(f64, f64), String> {
    interop::current_position().await
}

pub(crate) fn scroll_to_top() {
    interop::scroll_to_top();
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use serde_json::{json, Value};

    use super::*;

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn network_public_api_non_wasm_parity() {
        let expected = "Browser network APIs are only available when compiled for wasm32";

        assert_eq!(
            block_on(http_get_json::<Value>("https://example.test/geo"))
                .expect_err("get should fail"),
            expected
        );
        assert_eq!(
            block_on(http_post_json::<_, Value>(
                "https://example.test/search",
                &json!({"country": "France"}),
                None
            ))
            .expect_err("post should fail"),
            expected
        );
        assert_eq!(
            block_on(current_position()).expect_err("position should fail"),
            expected
        );
        scroll_to_top();
    }
}
