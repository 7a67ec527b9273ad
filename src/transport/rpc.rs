use serde::Deserialize;

use super::code::TransportCode;
use crate::domain::RawResponse;

/// Code reported when the endpoint could not be reached or the exchange broke off.
pub const SDK_SERVER_UNREACHABLE: &str = "SDK.ServerUnreachable";
/// Code reported when a non-2xx body carries no provider error.
pub const SDK_UNKNOWN_SERVER_ERROR: &str = "SDK.UnknownServerError";
/// Code reported when the request could not be signed or addressed.
pub const SDK_INVALID_REQUEST: &str = "SDK.InvalidRequest";

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure reported by a signed-RPC transport.
///
/// `Client` covers failures on this side of the wire (unreachable endpoint, signing);
/// `Server` covers error responses from the provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RpcError {
    #[error("client error {code}: {message}")]
    Client { code: String, message: String },

    #[error("server error {code}: {message}")]
    Server {
        code: String,
        message: String,
        request_id: Option<String>,
    },
}

impl RpcError {
    pub fn code(&self) -> &str {
        match self {
            Self::Client { code, .. } | Self::Server { code, .. } => code,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Client { message, .. } | Self::Server { message, .. } => message,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RpcJsonResponse {
    #[serde(default)]
    code: Option<TransportCode>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    request_id: Option<String>,
    #[serde(default)]
    biz_id: Option<String>,
}

pub fn decode_rpc_response(json: &str) -> Result<RawResponse, TransportError> {
    let parsed: RpcJsonResponse = serde_json::from_str(json)?;
    Ok(RawResponse {
        code: parsed.code.map(TransportCode::into_string),
        message: parsed.message,
        request_id: parsed.request_id,
        biz_id: parsed.biz_id,
    })
}

/// Map an HTTP exchange to the success body or an [`RpcError::Server`].
pub fn classify_http_response(status: u16, body: String) -> Result<String, RpcError> {
    if (200..=299).contains(&status) {
        return Ok(body);
    }

    match decode_rpc_response(&body) {
        Ok(RawResponse {
            code: Some(code),
            message,
            request_id,
            ..
        }) => Err(RpcError::Server {
            code,
            message: message.unwrap_or_default(),
            request_id,
        }),
        _ => {
            let message = if body.trim().is_empty() {
                format!("HTTP {status}")
            } else {
                format!("HTTP {status}: {}", body.trim())
            };
            Err(RpcError::Server {
                code: SDK_UNKNOWN_SERVER_ERROR.to_owned(),
                message,
                request_id: None,
            })
        }
    }
}
