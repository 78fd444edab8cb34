//! Shared state and input coercion helpers for the API layer.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;
use serde::Serialize;
use serde_json::Value;

use crate::api::error::ApiError;

/// Shared context for all routes: the store connection handle, passed
/// explicitly into each handler instead of living in process-global state.
#[derive(Clone)]
pub struct ApiContext {
    db: Arc<Mutex<Connection>>,
}

impl ApiContext {
    pub fn new(conn: Connection) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
        }
    }

    /// Lock the store connection for the duration of one request.
    pub fn conn(&self) -> Result<MutexGuard<'_, Connection>, ApiError> {
        self.db
            .lock()
            .map_err(|_| ApiError::Internal("store lock poisoned".into()))
    }
}

/// `{"message": ..., "id": ...}` body for create endpoints (201).
#[derive(Serialize)]
pub struct Created {
    pub message: &'static str,
    pub id: i64,
}

/// `{"message": ...}` body for update/delete endpoints (200).
#[derive(Serialize)]
pub struct Message {
    pub message: &'static str,
}

/// Coerce a JSON value to an integer: numbers pass through (floats
/// truncate), numeric strings parse. Anything else fails validation.
pub fn coerce_int(value: &Value, field: &str) -> Result<i64, ApiError> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .ok_or_else(|| ApiError::Validation(format!("invalid integer for {field}"))),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| ApiError::Validation(format!("invalid integer for {field}: {s:?}"))),
        _ => Err(ApiError::Validation(format!("invalid integer for {field}"))),
    }
}

/// Require a JSON field to be present (creates and full-replace updates).
pub fn require<'a>(value: &'a Option<Value>, field: &str) -> Result<&'a Value, ApiError> {
    value
        .as_ref()
        .ok_or_else(|| ApiError::Validation(format!("missing field {field}")))
}

/// Require a string field to be present.
pub fn require_str(value: &Option<String>, field: &str) -> Result<String, ApiError> {
    value
        .clone()
        .ok_or_else(|| ApiError::Validation(format!("missing field {field}")))
}

/// Treat empty query-string values as absent filters.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
