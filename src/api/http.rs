use super::{CreatedShifts, ShiftApi, ShiftBatch};
use crate::config::Config;
use crate::errors::{AppError, AppResult, SubmitError};
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

/// Blocking client for the Galaxy Digital (Amplify) REST API.
pub struct AmplifyClient {
    client: Client,
    base_url: String,
}

impl AmplifyClient {
    pub fn new(base_url: &str, token: &str, timeout: Duration) -> AppResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
            AppError::Config(format!("AMPLIFY_TOKEN is not a valid header: {e}"))
        })?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        let token = cfg.require_amplify_token()?;
        Self::new(
            &cfg.api_base_url,
            token,
            Duration::from_secs(cfg.http_timeout),
        )
    }

    fn need_url(&self, need_id: &str) -> String {
        format!("{}/needs/{}", self.base_url, need_id)
    }
}

impl ShiftApi for AmplifyClient {
    fn create_shifts(&self, batch: &ShiftBatch) -> Result<CreatedShifts, SubmitError> {
        let url = format!("{}/shifts", self.need_url(&batch.need_id));
        debug!(%url, shifts = batch.len(), "posting shift batch");

        let response = self
            .client
            .post(&url)
            .json(&batch.body)
            .send()
            .map_err(transport_error)?;

        let body = read_success(response)?;
        let ids = created_ids(&body);
        let created = if ids.is_empty() { batch.len() } else { ids.len() };

        info!(need_id = %batch.need_id, created, "shift batch accepted");
        Ok(CreatedShifts { created, ids })
    }

    fn need_title(&self, need_id: &str) -> Result<String, SubmitError> {
        let response = self
            .client
            .get(self.need_url(need_id))
            .send()
            .map_err(transport_error)?;

        let body = read_success(response)?;
        Ok(body
            .pointer("/data/need_title")
            .and_then(Value::as_str)
            .unwrap_or("Unknown")
            .to_string())
    }
}

/// Connection, timeout and body errors are worth retrying; a request that
/// could not even be built is not.
fn transport_error(err: reqwest::Error) -> SubmitError {
    if err.is_builder() {
        SubmitError::Permanent {
            status: 0,
            message: err.to_string(),
        }
    } else {
        SubmitError::Transient(err.to_string())
    }
}

fn read_success(response: Response) -> Result<Value, SubmitError> {
    let status = response.status();
    let text = response.text().map_err(transport_error)?;

    if !status.is_success() {
        let message = serde_json::from_str::<Value>(&text)
            .ok()
            .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string());
        return Err(SubmitError::from_status(status.as_u16(), message));
    }

    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
}

/// Ids listed under `data`, whether it is one object or an array of them.
fn created_ids(body: &Value) -> Vec<String> {
    let id_of = |v: &Value| match v.get("id") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };

    match body.get("data") {
        Some(Value::Array(items)) => items.iter().filter_map(id_of).collect(),
        Some(obj @ Value::Object(_)) => id_of(obj).into_iter().collect(),
        _ => Vec::new(),
    }
}
