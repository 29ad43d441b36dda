//! Precondition guards for public entry points

use crate::{Error, Result};

/// Fail with [`Error::InvalidArgument`] when `value` is absent
pub fn not_null<T>(value: Option<T>) -> Result<T> {
    value.ok_or(Error::InvalidArgument { message: None })
}

/// Fail with [`Error::InvalidArgument`] carrying `message` when `value` is absent
pub fn not_null_with<T>(value: Option<T>, message: impl Into<String>) -> Result<T> {
    value.ok_or_else(|| Error::InvalidArgument {
        message: Some(message.into()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_null_passes_value_through() {
        assert_eq!(not_null(Some(3)).unwrap(), 3);
        assert_eq!(not_null_with(Some("x"), "unused").unwrap(), "x");
    }

    #[test]
    fn test_not_null_fails_on_none() {
        let err = not_null::<u8>(None).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { message: None }));

        let err = not_null_with::<u8>(None, "source cannot be null").unwrap_err();
        match err {
            Error::InvalidArgument { message } => {
                assert_eq!(message.as_deref(), Some("source cannot be null"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
