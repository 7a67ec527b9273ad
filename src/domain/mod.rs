//! Domain layer: strong types with validation and invariants (no I/O).

pub mod code_table;
mod request;
mod response;
mod validation;
mod value;

pub use request::{
    BatchSignNames, BatchTemplateParams, QueryOptions, QuerySendDetails,
    SEND_BATCH_SMS_MAX_RECIPIENTS, SEND_SMS_MAX_RECIPIENTS, SendBatchSms, SendOptions, SendSms,
};
pub use response::{
    NormalizedResult, RawResponse, ResponseError, ResultCode, SUCCESS_MESSAGE,
    UNKNOWN_ERROR_MESSAGE, normalize,
};
pub use validation::ValidationError;
pub use value::{
    AccessKeyId, AccessKeySecret, BizId, CurrentPage, OutId, PageSize, PhoneNumber,
    RawPhoneNumber, SendDate, SignName, TemplateCode, TemplateParams,
};
