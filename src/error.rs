use thiserror::Error;

/// Error decoding an invalid textual or binary representation of UUID.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Error)]
pub enum FormatError {
    /// The binary representation is not exactly 16 bytes long.
    #[error("invalid binary representation: expected 16 bytes, found {actual}")]
    InvalidLength { actual: usize },

    /// The text does not follow the 8-4-4-4-12 hexadecimal form.
    #[error("invalid string representation")]
    InvalidText,
}

#[cfg(test)]
mod tests {
    use super::FormatError;

    /// Describes both error kinds
    #[test]
    fn describes_both_error_kinds() {
        assert_eq!(
            FormatError::InvalidLength { actual: 15 }.to_string(),
            "invalid binary representation: expected 16 bytes, found 15"
        );
        assert_eq!(
            FormatError::InvalidText.to_string(),
            "invalid string representation"
        );
    }
}
