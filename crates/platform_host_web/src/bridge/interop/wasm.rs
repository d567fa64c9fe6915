use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, RequestInit, Response};

use super::*;

fn js_error_to_string(err: JsValue) -> String {
    if let Some(text) = err.as_string() {
        return text;
    }
    if let Ok(message) = Reflect::get(&err, &JsValue::from_str("message")) {
        if let Some(text) = message.as_string() {
            return text;
        }
    }
    format!("{err:?}")
}

fn window() -> Result<web_sys::Window, String> {
    web_sys::window().ok_or_else(|| "window unavailable".to_string())
}

async fn await_promise(promise: Promise) -> Result<JsValue, String> {
    JsFuture::from(promise).await.map_err(js_error_to_string)
}

async fn response_json<T: DeserializeOwned>(promise: Promise) -> Result<T, String> {
    let value = await_promise(promise).await?;
    let response: Response = value.dyn_into().map_err(js_error_to_string)?;
    if !response.ok() {
        return Err(format!(
            "HTTP {} {}",
            response.status(),
            response.status_text()
        ));
    }
    let json = await_promise(response.json().map_err(js_error_to_string)?).await?;
    serde_wasm_bindgen::from_value(json).map_err(|e| e.to_string())
}

pub async fn http_get_json<T: DeserializeOwned>(url: &str) -> Result<T, String> {
    let promise = window()?.fetch_with_str(url);
    response_json(promise).await
}

pub async fn http_post_json<B: Serialize, T: DeserializeOwned>(
    url: &str,
    body: &B,
    bearer_token: Option<&str>,
) -> Result<T, String> {
    let payload = serde_json::to_string(body).map_err(|e| e.to_string())?;
    let headers = Headers::new().map_err(js_error_to_string)?;
    headers
        .set("Content-Type", "application/json")
        .map_err(js_error_to_string)?;
    if let Some(token) = bearer_token {
        headers
            .set("Authorization", &format!("Bearer {token}"))
            .map_err(js_error_to_string)?;
    }

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_headers(&headers);
    init.set_body(&JsValue::from_str(&payload));

    let promise = window()?.fetch_with_str_and_init(url, &init);
    response_json(promise).await
}

pub async fn current_position() -> Result<(f64, f64), String> {
    let geolocation = window()?
        .navigator()
        .geolocation()
        .map_err(js_error_to_string)?;
    let promise = Promise::new(&mut |resolve: Function, reject: Function| {
        if let Err(err) = geolocation.get_current_position_with_error_callback(&resolve, Some(&reject))
        {
            let _ = reject.call1(&JsValue::NULL, &err);
        }
    });
    let position = await_promise(promise).await?;
    let coords =
        Reflect::get(&position, &JsValue::from_str("coords")).map_err(js_error_to_string)?;
    let read = |field: &str| {
        Reflect::get(&coords, &JsValue::from_str(field))
            .ok()
            .and_then(|value| value.as_f64())
            .ok_or_else(|| format!("position is missing `{field}`"))
    };
    Ok((read("latitude")?, read("longitude")?))
}

pub fn scroll_to_top() {
    if let Some(window) = web_sys::window() {
        window.scroll_to_with_x_and_y(0.0, 0.0);
    }
}
