use crate::domain::validation::ValidationError;
use crate::domain::value::{
    BizId, CurrentPage, OutId, PageSize, RawPhoneNumber, SendDate, SignName, TemplateCode,
    TemplateParams,
};

pub const SEND_SMS_MAX_RECIPIENTS: usize = 1000;
pub const SEND_BATCH_SMS_MAX_RECIPIENTS: usize = 100;

#[derive(Debug, Clone, Default)]
pub struct SendOptions {
    pub template_params: Option<TemplateParams>,
    pub out_id: Option<OutId>,
}

/// `SendSms`: one sign and one template delivered to up to 1000 recipients.
#[derive(Debug, Clone)]
pub struct SendSms {
    recipients: Vec<RawPhoneNumber>,
    sign_name: SignName,
    template_code: TemplateCode,
    options: SendOptions,
}

impl SendSms {
    pub fn new(
        sign_name: SignName,
        template_code: TemplateCode,
        recipients: Vec<RawPhoneNumber>,
        options: SendOptions,
    ) -> Result<Self, ValidationError> {
        check_recipients(recipients.len(), SEND_SMS_MAX_RECIPIENTS)?;
        Ok(Self {
            recipients,
            sign_name,
            template_code,
            options,
        })
    }

    pub fn recipients(&self) -> &[RawPhoneNumber] {
        &self.recipients
    }

    pub fn sign_name(&self) -> &SignName {
        &self.sign_name
    }

    pub fn template_code(&self) -> &TemplateCode {
        &self.template_code
    }

    pub fn options(&self) -> &SendOptions {
        &self.options
    }
}

/// Sign names for a batch send.
#[derive(Debug, Clone)]
pub enum BatchSignNames {
    /// One sign for every recipient, encoded as a JSON string.
    Shared(SignName),
    /// One sign per recipient, in recipient order, encoded as a JSON array.
    PerRecipient(Vec<SignName>),
}

/// Template variables for a batch send.
#[derive(Debug, Clone)]
pub enum BatchTemplateParams {
    /// One variable set for every recipient, encoded as a JSON object.
    Shared(TemplateParams),
    /// One variable set per recipient, in recipient order, encoded as a JSON array.
    PerRecipient(Vec<TemplateParams>),
}

/// `SendBatchSms`: one template, up to 100 recipients, optionally with per-recipient
/// signs and variables.
#[derive(Debug, Clone)]
pub struct SendBatchSms {
    recipients: Vec<RawPhoneNumber>,
    sign_names: BatchSignNames,
    template_code: TemplateCode,
    template_params: Option<BatchTemplateParams>,
}

impl SendBatchSms {
    pub const PHONE_NUMBER_FIELD: &'static str = "PhoneNumberJson";
    pub const SIGN_NAME_FIELD: &'static str = "SignNameJson";
    pub const TEMPLATE_PARAM_FIELD: &'static str = "TemplateParamJson";

    pub fn new(
        sign_names: BatchSignNames,
        template_code: TemplateCode,
        recipients: Vec<RawPhoneNumber>,
        template_params: Option<BatchTemplateParams>,
    ) -> Result<Self, ValidationError> {
        check_recipients(recipients.len(), SEND_BATCH_SMS_MAX_RECIPIENTS)?;

        if let BatchSignNames::PerRecipient(signs) = &sign_names {
            check_per_recipient(Self::SIGN_NAME_FIELD, recipients.len(), signs.len())?;
        }
        if let Some(BatchTemplateParams::PerRecipient(params)) = &template_params {
            check_per_recipient(Self::TEMPLATE_PARAM_FIELD, recipients.len(), params.len())?;
        }

        Ok(Self {
            recipients,
            sign_names,
            template_code,
            template_params,
        })
    }

    pub fn recipients(&self) -> &[RawPhoneNumber] {
        &self.recipients
    }

    pub fn sign_names(&self) -> &BatchSignNames {
        &self.sign_names
    }

    pub fn template_code(&self) -> &TemplateCode {
        &self.template_code
    }

    pub fn template_params(&self) -> Option<&BatchTemplateParams> {
        self.template_params.as_ref()
    }
}

#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    pub page_size: PageSize,
    pub current_page: CurrentPage,
    pub biz_id: Option<BizId>,
}

/// `QuerySendDetails`: delivery records for one recipient on one day.
#[derive(Debug, Clone)]
pub struct QuerySendDetails {
    recipient: RawPhoneNumber,
    send_date: SendDate,
    options: QueryOptions,
}

impl QuerySendDetails {
    pub fn new(recipient: RawPhoneNumber, send_date: SendDate, options: QueryOptions) -> Self {
        Self {
            recipient,
            send_date,
            options,
        }
    }

    pub fn recipient(&self) -> &RawPhoneNumber {
        &self.recipient
    }

    pub fn send_date(&self) -> SendDate {
        self.send_date
    }

    pub fn options(&self) -> &QueryOptions {
        &self.options
    }
}

fn check_recipients(actual: usize, max: usize) -> Result<(), ValidationError> {
    if actual == 0 {
        return Err(ValidationError::Empty {
            field: RawPhoneNumber::FIELD,
        });
    }
    if actual > max {
        return Err(ValidationError::TooManyRecipients { max, actual });
    }
    Ok(())
}

fn check_per_recipient(
    field: &'static str,
    expected: usize,
    actual: usize,
) -> Result<(), ValidationError> {
    if expected != actual {
        return Err(ValidationError::RecipientCountMismatch {
            field,
            expected,
            actual,
        });
    }
    Ok(())
}
