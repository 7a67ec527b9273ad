use std::io;

use dysms::{BizId, DysmsClient, QueryOptions, QuerySendDetails, RawPhoneNumber, SendDate};
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
    // YYYYMMDD, within the last 30 days.
    let send_date = required_env("DYSMS_SEND_DATE")?;

    let biz_id = std::env::var("DYSMS_BIZ_ID")
        .ok()
        .map(BizId::new)
        .transpose()?;

    let client = DysmsClient::new(key_id, key_secret)?;
    let request = QuerySendDetails::new(
        RawPhoneNumber::new(phone)?,
        SendDate::parse(send_date)?,
        QueryOptions {
            biz_id,
            ..Default::default()
        },
    );

    let result = client.query_send_details(request).await?;
    println!("{}", serde_json::to_string(&result)?);

    Ok(())
}
