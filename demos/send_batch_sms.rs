use std::io;

use dysms::{
    BatchSignNames, BatchTemplateParams, DysmsClient, RawPhoneNumber, SendBatchSms, SignName,
    TemplateCode, TemplateParams,
};
use tracing_subscriber::EnvFilter;

fn required_env(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let key_id = required_env("ALIBABA_CLOUD_ACCESS_KEY_ID")?;
    let key_secret = required_env("ALIBABA_CLOUD_ACCESS_KEY_SECRET")?;
    // Comma-separated list, e.g. `13800138000,13900139000`.
    let phones = required_env("DYSMS_PHONES")?;
    let sign_name = required_env("DYSMS_SIGN_NAME")?;
    let template_code = required_env("DYSMS_TEMPLATE_CODE")?;
    let code = std::env::var("DYSMS_CODE").unwrap_or_else(|_| "1234".to_owned());

    let recipients = phones
        .split(',')
        .map(RawPhoneNumber::new)
        .collect::<Result<Vec<_>, _>>()?;

    let client = DysmsClient::new(key_id, key_secret)?;
    let request = SendBatchSms::new(
        BatchSignNames::Shared(SignName::new(sign_name)?),
        TemplateCode::new(template_code)?,
        recipients,
        Some(BatchTemplateParams::Shared(
            TemplateParams::new().with("code", code),
        )),
    )?;

    let result = client.send_batch_sms(request).await?;
    println!("{}", serde_json::to_string(&result)?);

    Ok(())
}
