pub mod suggest;

use std::sync::RwLock;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::autocomplete::{normalize_word, Autocomplete};

/// Application context passed to all handlers.
pub struct Ctx {
    /// The index. One lock covers the whole trie; never hold it across an await.
    pub ac: RwLock<Autocomplete>,
    pub consts: Consts,
}

/// Application constants.
#[derive(Clone, Default)]
pub struct Consts {
    pub normalize: bool,
    pub admin_username: String,
    pub admin_password: String,
}

impl Ctx {
    pub fn new(ac: Autocomplete, consts: Consts) -> Self {
        Self {
            ac: RwLock::new(ac),
            consts,
        }
    }

    /// Apply the configured normalization to a term or prefix.
    pub fn normalize(&self, s: &str) -> String {
        if self.consts.normalize {
            normalize_word(s)
        } else {
            s.to_string()
        }
    }
}

/// API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResp<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T: Serialize> IntoResponse for ApiResp<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub fn json<T: Serialize>(data: T) -> ApiResp<T> {
    ApiResp {
        data: Some(data),
        message: None,
    }
}

/// API error type.
#[derive(Debug)]
pub struct ApiErr {
    pub message: String,
    pub status: StatusCode,
}

impl ApiErr {
    pub fn new(message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            message: message.into(),
            status,
        }
    }
}

impl<E: std::fmt::Display> From<E> for ApiErr {
    fn from(err: E) -> Self {
        Self::new(err.to_string(), StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ApiErr {
    fn into_response(self) -> Response {
        let json = Json(ApiResp::<()> {
            data: None,
            message: Some(self.message),
        });
        (self.status, json).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiErr>;
