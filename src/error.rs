//! Assertion failure types and diagnostic message composition.
//!
//! Every failing assertion in this crate surfaces as an [`AssertionError`]
//! carrying a fully-composed diagnostic string. The classification tells a
//! caller *which* check failed; the diagnostic embeds enough context (event
//! name, a rendering of all emitted events, the observed failure text) to
//! diagnose without re-running.

/// Error type for failed assertions.
///
/// Each variant carries its complete diagnostic message, already run through
/// [`compose`] so a caller-supplied message prefixes the generated default.
#[derive(Debug, thiserror::Error)]
pub enum AssertionError {
    /// No event with the expected name was emitted.
    #[error("{0}")]
    EventNotFound(String),

    /// Events with the expected name were emitted, but none matched the filter.
    #[error("{0}")]
    EventArgsMismatch(String),

    /// An event was emitted that should not have been.
    #[error("{0}")]
    UnexpectedEvent(String),

    /// An emitted event matched a filter that should have matched nothing.
    #[error("{0}")]
    UnexpectedEventArgsMatch(String),

    /// The operation was expected to fail but succeeded.
    #[error("{0}")]
    DidNotFail(String),

    /// The operation failed, but not with the expected failure kind.
    #[error("{0}")]
    WrongFailureKind(String),

    /// The operation failed, but the failure text lacked the expected reason.
    #[error("{0}")]
    WrongFailureReason(String),

    /// The operation was expected to succeed but failed.
    #[error("{0}")]
    UnexpectedFailure(String),
}

impl AssertionError {
    /// The diagnostic message carried by this error.
    pub fn message(&self) -> &str {
        match self {
            AssertionError::EventNotFound(m)
            | AssertionError::EventArgsMismatch(m)
            | AssertionError::UnexpectedEvent(m)
            | AssertionError::UnexpectedEventArgsMatch(m)
            | AssertionError::DidNotFail(m)
            | AssertionError::WrongFailureKind(m)
            | AssertionError::WrongFailureReason(m)
            | AssertionError::UnexpectedFailure(m) => m,
        }
    }
}

/// Build an assertion message from an optional caller-supplied message and a
/// generated default.
///
/// When `message` is present and non-empty the result is
/// `"{message} : {default}"`, so a caller's context always augments the
/// generated diagnostic rather than replacing it. Otherwise the default is
/// returned unchanged.
///
/// # Example
///
/// ```rust
/// use txassert::compose;
///
/// assert_eq!(compose(Some("Should pay"), "Did not fail"), "Should pay : Did not fail");
/// assert_eq!(compose(None, "Did not fail"), "Did not fail");
/// ```
pub fn compose(message: Option<&str>, default: &str) -> String {
    match message {
        Some(m) if !m.is_empty() => format!("{} : {}", m, default),
        _ => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_compose_with_message() {
        assert_eq!(compose(Some("context"), "default"), "context : default");
    }

    #[test]
    fn test_compose_without_message() {
        assert_eq!(compose(None, "default"), "default");
    }

    #[test]
    fn test_compose_empty_message() {
        assert_eq!(compose(Some(""), "default"), "default");
    }

    #[test]
    fn test_error_display_is_diagnostic() {
        let err = AssertionError::DidNotFail(compose(Some("Should revert"), "Did not fail"));
        assert_eq!(err.to_string(), "Should revert : Did not fail");
        assert_eq!(err.message(), "Should revert : Did not fail");
    }

    proptest! {
        /// The composed message always ends with the default.
        #[test]
        fn compose_ends_with_default(message in ".{0,40}", default in ".{1,40}") {
            let composed = compose(Some(&message), &default);
            prop_assert!(composed.ends_with(&default));
        }
    }
}
