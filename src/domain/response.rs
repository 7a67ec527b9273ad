use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::code_table;

/// Message returned for every accepted request.
pub const SUCCESS_MESSAGE: &str = "验证码发送成功";
/// Message used when the provider reports an unknown code without any text.
pub const UNKNOWN_ERROR_MESSAGE: &str = "发生未知错误";

const OK_CODE: &str = "OK";

/// Provider response body, decoded once at the transport boundary.
///
/// Every field is optional on the wire; [`normalize`] decides what a missing `Code` means.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawResponse {
    pub code: Option<String>,
    pub message: Option<String>,
    pub request_id: Option<String>,
    pub biz_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
/// `code` of a [`NormalizedResult`]: numeric for known outcomes, the provider's own text otherwise.
pub enum ResultCode {
    Numeric(i64),
    Provider(String),
}

impl ResultCode {
    /// Wrap a provider code, turning purely numeric codes into [`ResultCode::Numeric`].
    pub fn from_provider(code: impl Into<String>) -> Self {
        let code = code.into();
        match code.trim().parse::<i64>() {
            Ok(value) => Self::Numeric(value),
            Err(_) => Self::Provider(code),
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Numeric(value) => Some(*value),
            Self::Provider(_) => None,
        }
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(value) => write!(f, "{value}"),
            Self::Provider(value) => f.write_str(value),
        }
    }
}

/// The `{code, message}` pair every client call resolves to.
///
/// Serializes as `{"code": 200, "message": "..."}` (or a string `code` for provider codes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedResult {
    pub code: ResultCode,
    pub message: String,
}

impl NormalizedResult {
    pub fn new(code: ResultCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// The fixed result for an accepted request.
    pub fn success() -> Self {
        Self::new(ResultCode::Numeric(200), SUCCESS_MESSAGE)
    }

    /// Result carrying a provider's code and message verbatim.
    pub fn from_provider(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ResultCode::from_provider(code), message)
    }

    pub fn is_success(&self) -> bool {
        self.code == ResultCode::Numeric(200)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResponseError {
    #[error("response has no `Code` field")]
    MissingCode,
}

/// Turn a provider response into a [`NormalizedResult`].
///
/// - `Code == "OK"` with a `Message` is a success.
/// - Codes from the code table map to their table entry, whatever the `Message` says.
/// - Other codes are returned as-is together with the provider's `Message`.
pub fn normalize(raw: &RawResponse) -> Result<NormalizedResult, ResponseError> {
    let code = raw.code.as_deref().ok_or(ResponseError::MissingCode)?;

    if code == OK_CODE && raw.message.is_some() {
        return Ok(NormalizedResult::success());
    }

    if let Some(known) = code_table::lookup(code) {
        return Ok(known);
    }

    tracing::debug!(code, "provider code is not in the code table");
    let message = raw.message.as_deref().unwrap_or(UNKNOWN_ERROR_MESSAGE);
    Ok(NormalizedResult::from_provider(code, message))
}
