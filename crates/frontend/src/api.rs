use papapp_shared::models::LabelingRequest;

use crate::config;

/// Join the service base URL and a route path.
pub fn endpoint(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Re-serialize a JSON response body compactly for display in the notice.
pub fn stringify_body(body: &[u8]) -> Result<String, String> {
    let value: serde_json::Value = serde_json::from_slice(body).map_err(|e| e.to_string())?;
    serde_json::to_string(&value).map_err(|e| e.to_string())
}

/// Cold-start probe. Any HTTP response counts as awake; only transport errors fail.
pub async fn wake_up() -> Result<(), String> {
    reqwest::Client::new()
        .get(endpoint(config::api_base(), "wakeup"))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    Ok(())
}

/// Send a label and return the acknowledgment body as a JSON string.
pub async fn submit_label(request: &LabelingRequest) -> Result<String, String> {
    let resp = reqwest::Client::new()
        .post(endpoint(config::api_base(), "labeling"))
        .json(request)
        .send()
        .await
        .map_err(|e| e.to_string())?;

    let bytes = resp.bytes().await.map_err(|e| e.to_string())?;
    stringify_body(&bytes)
}
