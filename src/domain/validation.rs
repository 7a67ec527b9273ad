use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    TooManyRecipients { max: usize, actual: usize },
    InvalidPhoneNumber { input: String },
    InvalidSendDate { input: String },
    PageSizeOutOfRange { min: u8, max: u8, actual: u8 },
    CurrentPageOutOfRange { actual: u32 },
    RecipientCountMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::TooManyRecipients { max, actual } => {
                write!(f, "too many recipients: {actual} (max {max})")
            }
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::InvalidSendDate { input } => {
                write!(f, "invalid send date: {input} (expected YYYYMMDD)")
            }
            Self::PageSizeOutOfRange { min, max, actual } => {
                write!(f, "page size out of range: {actual} (expected {min}..={max})")
            }
            Self::CurrentPageOutOfRange { actual } => {
                write!(f, "current page out of range: {actual} (pages start at 1)")
            }
            Self::RecipientCountMismatch {
                field,
                expected,
                actual,
            } => write!(
                f,
                "{field} has {actual} entries but there are {expected} recipients"
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::ValidationError;

    #[test]
    fn display_messages_are_human_readable() {
        let err = ValidationError::Empty {
            field: "SignName",
        };
        assert_eq!(err.to_string(), "SignName must not be empty");

        let err = ValidationError::TooManyRecipients {
            max: 100,
            actual: 101,
        };
        assert_eq!(err.to_string(), "too many recipients: 101 (max 100)");

        let err = ValidationError::InvalidSendDate {
            input: "2021-01-01".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "invalid send date: 2021-01-01 (expected YYYYMMDD)"
        );

        let err = ValidationError::PageSizeOutOfRange {
            min: 1,
            max: 50,
            actual: 51,
        };
        assert_eq!(
            err.to_string(),
            "page size out of range: 51 (expected 1..=50)"
        );

        let err = ValidationError::RecipientCountMismatch {
            field: "SignNameJson",
            expected: 2,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "SignNameJson has 3 entries but there are 2 recipients"
        );
    }
}
