//! Typed Rust client for the Alibaba Cloud SMS (`Dysmsapi`) RPC API.
//!
//! The crate is split the usual way: a domain layer of strong types, a transport layer
//! for wire-format quirks and request signing, and a small client layer orchestrating
//! requests. Every client call resolves to a [`NormalizedResult`], a `{code, message}`
//! pair with localized text for the provider's documented codes.
//!
//! ```rust,no_run
//! use dysms::{DysmsClient, RawPhoneNumber, SendOptions, SendSms, SignName, TemplateCode, TemplateParams};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DysmsClient::new("<access key id>", "<access key secret>")?;
//!     let request = SendSms::new(
//!         SignName::new("阿里云短信测试")?,
//!         TemplateCode::new("SMS_0001")?,
//!         vec![RawPhoneNumber::new("13800138000")?],
//!         SendOptions {
//!             template_params: Some(TemplateParams::new().with("code", "1234")),
//!             ..Default::default()
//!         },
//!     )?;
//!     let result = client.send_sms(request).await?;
//!     println!("{}", serde_json::to_string(&result)?);
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    BoxFuture, Credentials, DysmsClient, DysmsClientBuilder, DysmsError, ReqwestRpcTransport,
    RpcRequest, RpcTransport,
};
pub use domain::{
    AccessKeyId, AccessKeySecret, BatchSignNames, BatchTemplateParams, BizId, CurrentPage,
    NormalizedResult, OutId, PageSize, PhoneNumber, QueryOptions, QuerySendDetails, RawPhoneNumber,
    RawResponse, ResponseError, ResultCode, SendBatchSms, SendDate, SendOptions, SendSms, SignName,
    TemplateCode, TemplateParams, ValidationError,
};
pub use transport::RpcError;
