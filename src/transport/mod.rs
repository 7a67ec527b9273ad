//! Transport layer: wire-format details (query encoding, signing, response decoding).

mod code;
mod query_send_details;
mod rpc;
mod send_sms;
pub mod signing;

pub use query_send_details::encode_query_send_details_query;
pub use rpc::{
    RpcError, SDK_INVALID_REQUEST, SDK_SERVER_UNREACHABLE, classify_http_response,
    decode_rpc_response,
};
pub use send_sms::{encode_send_batch_sms_query, encode_send_sms_query};
