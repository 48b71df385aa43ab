use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractError {
    /// A required element is missing; the page does not match the review template.
    #[error("malformed document: missing {element}")]
    MalformedDocument { element: &'static str },

    /// The element exists but its text cannot be converted.
    #[error("cannot parse {field} from {value:?}: {reason}")]
    FieldParse {
        field: &'static str,
        value: String,
        reason: String,
    },
}

impl ExtractError {
    pub fn missing(element: &'static str) -> Self {
        ExtractError::MalformedDocument { element }
    }

    pub fn parse(field: &'static str, value: &str, reason: impl ToString) -> Self {
        ExtractError::FieldParse {
            field,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}
