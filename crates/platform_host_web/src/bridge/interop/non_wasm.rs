use super::*;

fn unsupported() -> String {
    "Browser network APIs are only available when compiled for wasm32".to_string()
}

pub async fn http_get_json<T: DeserializeOwned>(_url: &str) -> Result<T, String> {
    Err(unsupported())
}

pub async fn http_post_json<B: Serialize, T: DeserializeOwned>(
    _url: &str,
    _body: &B,
    _bearer_token: Option<&str>,
) -> Result<T, String> {
    Err(unsupported())
}

pub async fn current_position() -> Result<(f64, f64), String> {
    Err(unsupported())
}

pub fn scroll_to_top() {}
