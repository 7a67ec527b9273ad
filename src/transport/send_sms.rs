use serde_json::Value;

use crate::domain::{
    BatchSignNames, BatchTemplateParams, OutId, RawPhoneNumber, SendBatchSms, SendSms, SignName,
    TemplateCode, TemplateParams,
};

pub const REGION_FIELD: &str = "RegionId";
const TEMPLATE_PARAM_FIELD: &str = "TemplateParam";

pub fn encode_send_sms_query(region: &str, request: &SendSms) -> Vec<(String, String)> {
    let mut params = vec![(REGION_FIELD.to_owned(), region.to_owned())];

    let to = request
        .recipients()
        .iter()
        .map(RawPhoneNumber::raw)
        .collect::<Vec<_>>()
        .join(",");
    params.push((RawPhoneNumber::FIELD.to_owned(), to));
    params.push((
        SignName::FIELD.to_owned(),
        request.sign_name().as_str().to_owned(),
    ));
    params.push((
        TemplateCode::FIELD.to_owned(),
        request.template_code().as_str().to_owned(),
    ));

    let options = request.options();
    if let Some(template_params) = options.template_params.as_ref().filter(|it| !it.is_empty()) {
        params.push((
            TEMPLATE_PARAM_FIELD.to_owned(),
            template_params_json(template_params).to_string(),
        ));
    }
    if let Some(out_id) = options.out_id.as_ref() {
        params.push((OutId::FIELD.to_owned(), out_id.as_str().to_owned()));
    }

    params
}

pub fn encode_send_batch_sms_query(region: &str, request: &SendBatchSms) -> Vec<(String, String)> {
    let mut params = vec![(REGION_FIELD.to_owned(), region.to_owned())];

    let phones = request
        .recipients()
        .iter()
        .map(|phone| Value::String(phone.raw().to_owned()))
        .collect::<Vec<_>>();
    params.push((
        SendBatchSms::PHONE_NUMBER_FIELD.to_owned(),
        Value::Array(phones).to_string(),
    ));

    let signs = match request.sign_names() {
        BatchSignNames::Shared(sign) => sign_json(sign),
        BatchSignNames::PerRecipient(signs) => Value::Array(signs.iter().map(sign_json).collect()),
    };
    params.push((SendBatchSms::SIGN_NAME_FIELD.to_owned(), signs.to_string()));

    params.push((
        TemplateCode::FIELD.to_owned(),
        request.template_code().as_str().to_owned(),
    ));

    let template_params = match request.template_params() {
        Some(BatchTemplateParams::Shared(shared)) if !shared.is_empty() => {
            Some(template_params_json(shared))
        }
        Some(BatchTemplateParams::PerRecipient(each)) if !each.is_empty() => Some(Value::Array(
            each.iter().map(template_params_json).collect(),
        )),
        _ => None,
    };
    if let Some(template_params) = template_params {
        params.push((
            SendBatchSms::TEMPLATE_PARAM_FIELD.to_owned(),
            template_params.to_string(),
        ));
    }

    params
}

fn sign_json(sign: &SignName) -> Value {
    Value::String(sign.as_str().to_owned())
}

fn template_params_json(params: &TemplateParams) -> Value {
    Value::Object(
        params
            .as_map()
            .iter()
            .map(|(key, value)| (key.clone(), Value::String(value.clone())))
            .collect(),
    )
}
