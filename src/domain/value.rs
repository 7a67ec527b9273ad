use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use phonenumber::country;

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Alibaba Cloud AccessKey id.
///
/// Invariant: non-empty after trimming.
pub struct AccessKeyId(String);

impl AccessKeyId {
    /// Name used when reporting a missing value.
    pub const FIELD: &'static str = "AccessKeyId";

    /// Create a validated [`AccessKeyId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated key id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq)]
/// Alibaba Cloud AccessKey secret.
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
/// The value never shows up in `Debug` output.
pub struct AccessKeySecret(String);

impl AccessKeySecret {
    /// Name used when reporting a missing value.
    pub const FIELD: &'static str = "AccessKeySecret";

    /// Create a validated [`AccessKeySecret`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the secret as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessKeySecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessKeySecret(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS signature name (`SignName`), as approved in the console.
///
/// Invariant: non-empty after trimming.
pub struct SignName(String);

impl SignName {
    /// Query field name used by the provider (`SignName`).
    pub const FIELD: &'static str = "SignName";

    /// Create a validated [`SignName`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated sign name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS template code (`TemplateCode`, e.g. `SMS_0001`).
///
/// Invariant: non-empty after trimming.
pub struct TemplateCode(String);

impl TemplateCode {
    /// Query field name used by the provider (`TemplateCode`).
    pub const FIELD: &'static str = "TemplateCode";

    /// Create a validated [`TemplateCode`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated template code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Caller-side serial number attached to a send (`OutId`).
///
/// Invariant: non-empty after trimming.
pub struct OutId(String);

impl OutId {
    /// Query field name used by the provider (`OutId`).
    pub const FIELD: &'static str = "OutId";

    /// Create a validated [`OutId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated serial number.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Provider-side receipt id of a send (`BizId`).
///
/// Invariant: non-empty after trimming.
pub struct BizId(String);

impl BizId {
    /// Query field name used by the provider (`BizId`).
    pub const FIELD: &'static str = "BizId";

    /// Create a validated [`BizId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated receipt id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Template variables substituted by the provider (`TemplateParam`).
///
/// Keys are kept sorted so the encoded JSON is stable.
pub struct TemplateParams(BTreeMap<String, String>);

impl TemplateParams {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a variable, returning `self` for chaining.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Add or replace a variable.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the underlying map.
    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.0
    }
}

impl From<BTreeMap<String, String>> for TemplateParams {
    fn from(value: BTreeMap<String, String>) -> Self {
        Self(value)
    }
}

impl<K, V> FromIterator<(K, V)> for TemplateParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Unvalidated phone number as sent to the provider.
///
/// Invariant: non-empty after trimming. This type does not normalize; parse into
/// [`PhoneNumber`] and convert it into [`RawPhoneNumber`] to get the provider's format.
pub struct RawPhoneNumber(String);

impl RawPhoneNumber {
    /// Query field name used by the provider for single sends (`PhoneNumbers`).
    pub const FIELD: &'static str = "PhoneNumbers";

    /// Create a validated (non-empty) raw phone number.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Raw (trimmed) value as sent to the provider.
    pub fn raw(&self) -> &str {
        &self.0
    }
}

impl From<PhoneNumber> for RawPhoneNumber {
    /// Convert an already-parsed phone number into the provider's format.
    fn from(value: PhoneNumber) -> Self {
        Self(value.provider)
    }
}

#[derive(Debug, Clone)]
/// Parsed phone number.
///
/// Mainland China numbers are sent as national digits (`13800138000`), every other
/// region as country code followed by the national number without `+` (`85200000000`).
/// Equality, ordering, and hashing are based on the E.164 form.
pub struct PhoneNumber {
    raw: String,
    e164: String,
    provider: String,
    parsed: phonenumber::PhoneNumber,
}

impl PhoneNumber {
    /// Query field name used by the provider for single sends (`PhoneNumbers`).
    pub const FIELD: &'static str = "PhoneNumbers";

    const MAINLAND_CHINA_CODE: u16 = 86;

    /// Parse and normalize a phone number.
    ///
    /// `default_region` is used when the input does not contain an explicit country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        let country_code = parsed.code().value();
        let digits = e164.trim_start_matches('+');
        let provider = if country_code == Self::MAINLAND_CHINA_CODE {
            digits[country_code.to_string().len()..].to_owned()
        } else {
            digits.to_owned()
        };

        Ok(Self {
            raw,
            e164,
            provider,
            parsed,
        })
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized E.164 representation.
    pub fn e164(&self) -> &str {
        &self.e164
    }

    /// Representation expected by the provider.
    pub fn provider_format(&self) -> &str {
        &self.provider
    }

    /// The parsed phone number from the `phonenumber` crate.
    pub fn parsed(&self) -> &phonenumber::PhoneNumber {
        &self.parsed
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.e164.hash(state);
    }
}

impl std::cmp::PartialOrd for PhoneNumber {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::cmp::Ord for PhoneNumber {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.e164.cmp(&other.e164)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Day a message was sent (`SendDate`), encoded as `YYYYMMDD`.
///
/// The provider only keeps the last 30 days of records; older dates are accepted here
/// and rejected by the provider.
pub struct SendDate(NaiveDate);

impl SendDate {
    /// Query field name used by the provider (`SendDate`).
    pub const FIELD: &'static str = "SendDate";

    const FORMAT: &'static str = "%Y%m%d";

    /// Parse a `YYYYMMDD` date.
    pub fn parse(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let value = value.as_ref().trim();
        let invalid = || ValidationError::InvalidSendDate {
            input: value.to_owned(),
        };
        if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        NaiveDate::parse_from_str(value, Self::FORMAT)
            .map(Self)
            .map_err(|_| invalid())
    }

    /// Get the underlying calendar date.
    pub fn date(self) -> NaiveDate {
        self.0
    }

    /// `YYYYMMDD` wire form.
    pub fn to_wire(self) -> String {
        self.0.format(Self::FORMAT).to_string()
    }
}

impl From<NaiveDate> for SendDate {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Number of records per page for delivery queries (`PageSize`).
///
/// Invariant: `1..=50`. Defaults to 10.
pub struct PageSize(u8);

impl PageSize {
    /// Query field name used by the provider (`PageSize`).
    pub const FIELD: &'static str = "PageSize";

    /// Minimum allowed page size.
    pub const MIN: u8 = 1;
    /// Maximum allowed page size.
    pub const MAX: u8 = 50;

    /// Create a validated page size.
    pub fn new(value: u8) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValidationError::PageSizeOutOfRange {
                min: Self::MIN,
                max: Self::MAX,
                actual: value,
            });
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(10)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// One-based page index for delivery queries (`CurrentPage`). Defaults to 1.
pub struct CurrentPage(u32);

impl CurrentPage {
    /// Query field name used by the provider (`CurrentPage`).
    pub const FIELD: &'static str = "CurrentPage";

    /// Create a validated page index.
    pub fn new(value: u32) -> Result<Self, ValidationError> {
        if value == 0 {
            return Err(ValidationError::CurrentPageOutOfRange { actual: value });
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for CurrentPage {
    fn default() -> Self {
        Self(1)
    }
}
