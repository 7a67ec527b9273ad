use std::io;

use dysms::{
    DysmsClient, RawPhoneNumber, SendOptions, SendSms, SignName, TemplateCode, TemplateParams,
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
    let phone = required_env("DYSMS_PHONE")?;
    let sign_name = required_env("DYSMS_SIGN_NAME")?;
    let template_code = required_env("DYSMS_TEMPLATE_CODE")?;
    let code = std::env::var("DYSMS_CODE").unwrap_or_else(|_| "1234".to_owned());

    let client = DysmsClient::new(key_id, key_secret)?;
    let request = SendSms::new(
        SignName::new(sign_name)?,
        TemplateCode::new(template_code)?,
        vec![RawPhoneNumber::new(phone)?],
        SendOptions {
            template_params: Some(TemplateParams::new().with("code", code)),
            ..Default::default()
        },
    )?;

    let result = client.send_sms(request).await?;
    println!("{}", serde_json::to_string(&result)?);

    Ok(())
}
