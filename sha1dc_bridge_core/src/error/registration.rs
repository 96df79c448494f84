//! Result carrier registration error types
//!
//! Any of these aborts bridge load. There is no degraded mode.

use thiserror::Error;

/// Errors raised while resolving the result carrier layout
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// No carrier class descriptor was supplied
    #[error("Result carrier class not found: {class_name}")]
    MissingClass { class_name: String },

    /// A required field is absent from the descriptor
    #[error("Result carrier field '{name}' with signature '{signature}' not found")]
    MissingField { name: String, signature: String },

    /// A field was declared twice
    #[error("Result carrier field '{name}' declared more than once")]
    DuplicateField { name: String },

    /// A field does not fit inside the carrier
    #[error("Result carrier field '{name}' at offset {offset} exceeds carrier size {size}")]
    FieldOutOfBounds {
        name: String,
        offset: usize,
        size: usize,
    },

    /// Two digest slots share carrier bytes
    #[error("Result carrier fields '{first}' and '{second}' overlap")]
    OverlappingFields { first: String, second: String },

    /// Descriptor text was not valid UTF-8
    #[error("Result carrier descriptor contains invalid UTF-8 in {what}")]
    InvalidUtf8 { what: String },
}

impl RegistrationError {
    /// Create a missing class error
    pub fn missing_class(class_name: &str) -> Self {
        Self::MissingClass {
            class_name: class_name.to_string(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(name: &str, signature: &str) -> Self {
        Self::MissingField {
            name: name.to_string(),
            signature: signature.to_string(),
        }
    }

    /// Create a duplicate field error
    pub fn duplicate_field(name: &str) -> Self {
        Self::DuplicateField {
            name: name.to_string(),
        }
    }

    /// Create a field out of bounds error
    pub fn field_out_of_bounds(name: &str, offset: usize, size: usize) -> Self {
        Self::FieldOutOfBounds {
            name: name.to_string(),
            offset,
            size,
        }
    }

    /// Create an overlapping fields error
    pub fn overlapping_fields(first: &str, second: &str) -> Self {
        Self::OverlappingFields {
            first: first.to_string(),
            second: second.to_string(),
        }
    }

    /// Create an invalid UTF-8 error
    pub fn invalid_utf8(what: &str) -> Self {
        Self::InvalidUtf8 {
            what: what.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_error() {
        let error = RegistrationError::missing_field("part3", "I");
        assert!(error.to_string().contains("part3"));
        assert!(error.to_string().contains("'I'"));
    }

    #[test]
    fn test_field_out_of_bounds_error() {
        let error = RegistrationError::field_out_of_bounds("part2", 16, 20);
        let msg = error.to_string();
        assert!(msg.contains("offset 16"));
        assert!(msg.contains("size 20"));
    }

    #[test]
    fn test_overlapping_fields_error() {
        let msg = RegistrationError::overlapping_fields("part1", "part2").to_string();
        assert!(msg.contains("'part1' and 'part2' overlap"));
    }
}
