use serde::Deserialize;
use serde::de::Error as DeError;

/// `Code` field returned by the provider as either JSON string or JSON number.
///
/// For numbers, the raw JSON token is kept so the code reads exactly as sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportCode(String);

impl TransportCode {
    pub fn into_string(self) -> String {
        self.0
    }
}

impl<'de> Deserialize<'de> for TransportCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        match value {
            serde_json::Value::String(code) => Ok(Self(code)),
            serde_json::Value::Number(code) => Ok(Self(code.to_string())),
            _ => Err(D::Error::custom(
                "expected `Code` to be a JSON string or number",
            )),
        }
    }
}
