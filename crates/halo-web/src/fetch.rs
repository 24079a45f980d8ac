use halo_core::HaloError;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

fn load_failure(url: &str, what: &str, err: JsValue) -> HaloError {
    HaloError::LoadFailure(format!("{url}: {what}: {:?}", err))
}

/// GET `url` and return the whole body.
pub async fn fetch_bytes(url: &str) -> Result<Vec<u8>, HaloError> {
    let window = web::window().ok_or_else(|| HaloError::LoadFailure("no window".into()))?;
    let resp = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| load_failure(url, "fetch", e))?
        .dyn_into::<web::Response>()
        .map_err(|e| load_failure(url, "not a response", e))?;
    if !resp.ok() {
        return Err(HaloError::LoadFailure(format!("{url}: HTTP {}", resp.status())));
    }
    let body = resp
        .array_buffer()
        .map_err(|e| load_failure(url, "body", e))?;
    let buf = JsFuture::from(body)
        .await
        .map_err(|e| load_failure(url, "body", e))?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}
