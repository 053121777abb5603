//! Failure classification for asynchronous operations.
//!
//! The classifier awaits a caller-supplied operation exactly once and checks
//! how it settled. Failure text is unstructured prose from the execution
//! host: different hosts encode the same condition in materially different
//! shapes, and one of them embeds no extractable reason token at all. So
//! classification and reason checks are plain substring searches against the
//! failure message. That is a deliberate precision/robustness trade-off,
//! since a reason that happens to appear inside an unrelated longer message
//! will pass.

use std::fmt;
use std::future::Future;

use crate::error::{compose, AssertionError};

/// Categories of execution failure, matched by their canonical text.
///
/// This is a closed set. Matching is substring containment against the
/// tag's canonical text rather than exact comparison, to stay compatible
/// with free-form failure messages.
///
/// # Example
///
/// ```rust
/// use txassert::FailureKind;
///
/// assert_eq!(FailureKind::Revert.as_str(), "revert");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Execution was rolled back by the transactional logic itself.
    Revert,
    /// An invalid low-level operation was attempted.
    InvalidOpcode,
    /// Execution exhausted its resource allowance.
    OutOfGas,
    /// An invalid control transfer was attempted.
    InvalidJump,
}

impl FailureKind {
    /// Canonical text this kind is matched by within failure messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Revert => "revert",
            FailureKind::InvalidOpcode => "invalid opcode",
            FailureKind::OutOfGas => "out of gas",
            FailureKind::InvalidJump => "invalid JUMP",
        }
    }

    /// All known failure kinds.
    pub fn all() -> &'static [FailureKind] {
        &[
            FailureKind::Revert,
            FailureKind::InvalidOpcode,
            FailureKind::OutOfGas,
            FailureKind::InvalidJump,
        ]
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Assert that an asynchronous operation fails.
///
/// Awaits `op` once. When it succeeds the assertion fails with
/// [`AssertionError::DidNotFail`]. When it fails, the failure message is
/// checked against `kind` and `reason` independently. Either, both, or
/// neither may be supplied; each is a substring search.
///
/// # Example
///
/// ```rust,ignore
/// use txassert::{expect_failure, FailureKind};
///
/// expect_failure(casino.play(6), Some(FailureKind::Revert), Some("Only owner"), None).await?;
/// expect_failure(casino.play(6), None, None, None).await?; // any failure
/// ```
pub async fn expect_failure<F, T, E>(
    op: F,
    kind: Option<FailureKind>,
    reason: Option<&str>,
    message: Option<&str>,
) -> Result<(), AssertionError>
where
    F: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    let error = match op.await {
        Ok(_) => {
            return Err(AssertionError::DidNotFail(compose(message, "Did not fail")));
        }
        Err(error) => error,
    };
    let text = error.to_string();

    if let Some(kind) = kind {
        if !text.contains(kind.as_str()) {
            return Err(AssertionError::WrongFailureKind(compose(
                message,
                &format!("Expected to fail with {}, but failed with: {}", kind, text),
            )));
        }
    }

    if let Some(reason) = reason {
        if !text.contains(reason) {
            return Err(AssertionError::WrongFailureReason(compose(
                message,
                &format!(
                    "Expected to fail with reason '{}', but failed with: {}",
                    reason, text
                ),
            )));
        }
    }

    Ok(())
}

/// Assert that an asynchronous operation fails by reverting.
///
/// Shorthand for [`expect_failure`] with the kind fixed to
/// [`FailureKind::Revert`].
pub async fn expect_revert<F, T, E>(
    op: F,
    reason: Option<&str>,
    message: Option<&str>,
) -> Result<(), AssertionError>
where
    F: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    expect_failure(op, Some(FailureKind::Revert), reason, message).await
}

/// Assert that an asynchronous operation succeeds.
pub async fn expect_success<F, T, E>(op: F, message: Option<&str>) -> Result<(), AssertionError>
where
    F: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    match op.await {
        Ok(_) => Ok(()),
        Err(error) => Err(AssertionError::UnexpectedFailure(compose(
            message,
            &format!("Failed with {}", error),
        ))),
    }
}
