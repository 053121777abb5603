//! Fluent assertion builder for transaction outcomes.
//!
//! This module provides the core builder types for making assertions about
//! emitted events:
//! - `expect()` - Entry point for creating assertions from a [`TransactionOutcome`]
//! - `OutcomeExpectation` - Holds the outcome and creates specific assertions
//! - `EventAssertion` - Builder for assertions on a named event
//!
//! The function-style operations [`assert_emitted`] and [`assert_not_emitted`]
//! are thin wrappers over the same builder.

use super::matchers::MatchSpec;
use crate::error::{compose, AssertionError};
use crate::outcome::{EmittedEvent, EventArgs, TransactionOutcome};
use crate::render::render_outcome;

/// Create an expectation on a transaction outcome.
///
/// This is the entry point for the fluent assertion API.
///
/// # Example
///
/// ```rust,ignore
/// use txassert::expect;
///
/// expect(&outcome).event("Payout").to_be_emitted();
/// expect(&outcome).event("Refund").not_to_be_emitted();
/// ```
pub fn expect(outcome: &TransactionOutcome) -> OutcomeExpectation {
    OutcomeExpectation::new(outcome)
}

/// Holds an outcome and creates specific assertions.
///
/// Call `.event()` to create an [`EventAssertion`] for a named event.
#[derive(Debug, Clone)]
pub struct OutcomeExpectation {
    outcome: TransactionOutcome,
}

impl OutcomeExpectation {
    pub fn new(outcome: &TransactionOutcome) -> Self {
        Self {
            outcome: outcome.clone(),
        }
    }

    /// Create an assertion for events with the given name.
    pub fn event(&self, name: &str) -> EventAssertion {
        EventAssertion::new(self.outcome.clone(), name)
    }
}

/// Builder for assertions on a named event.
///
/// Methods like `to_be_emitted()` evaluate immediately and panic on failure.
/// Use `check_emitted()` / `check_not_emitted()` for non-panicking
/// evaluation returning a [`Result`].
#[derive(Debug)]
pub struct EventAssertion {
    outcome: TransactionOutcome,
    name: String,
    spec: Option<MatchSpec>,
    message: Option<String>,
}

impl EventAssertion {
    pub fn new(outcome: TransactionOutcome, name: &str) -> Self {
        Self {
            outcome,
            name: name.to_string(),
            spec: None,
            message: None,
        }
    }

    // =========================================================================
    // Builder methods (chainable)
    // =========================================================================

    /// Set the match spec narrowing candidate events by their arguments.
    pub fn matching(mut self, spec: impl Into<MatchSpec>) -> Self {
        self.spec = Some(spec.into());
        self
    }

    /// Narrow candidates with a predicate over their argument maps.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// expect(&outcome)
    ///     .event("Play")
    ///     .filtered_by(|args| args.get("betNumber") == args.get("winningNumber"))
    ///     .to_be_emitted();
    /// ```
    pub fn filtered_by<F>(self, f: F) -> Self
    where
        F: Fn(&EventArgs) -> bool + 'static,
    {
        self.matching(MatchSpec::predicate(f))
    }

    /// Narrow candidates to those whose arguments contain these fields.
    ///
    /// Unlisted fields are ignored; listed fields compare structurally.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use txassert::fields;
    ///
    /// expect(&outcome)
    ///     .event("Payout")
    ///     .with_fields(fields! {"payout" => 50})
    ///     .to_be_emitted();
    /// ```
    pub fn with_fields(self, fields: EventArgs) -> Self {
        self.matching(MatchSpec::Partial(fields))
    }

    /// Prefix assertion diagnostics with a caller-supplied message.
    pub fn message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }

    // =========================================================================
    // Assertion methods (panic on failure)
    // =========================================================================

    /// Assert that a matching event was emitted.
    ///
    /// # Panics
    ///
    /// Panics with the composed diagnostic if no event with this name was
    /// emitted, or none of them satisfies the match spec.
    pub fn to_be_emitted(&self) {
        if let Err(err) = self.check_emitted() {
            panic!("assertion failed: {}", err);
        }
    }

    /// Assert that no matching event was emitted.
    ///
    /// # Panics
    ///
    /// Panics with the composed diagnostic if the event was emitted (or, with
    /// a match spec, if any emitted event satisfies it).
    pub fn not_to_be_emitted(&self) {
        if let Err(err) = self.check_not_emitted() {
            panic!("assertion failed: {}", err);
        }
    }

    // =========================================================================
    // Non-panicking evaluation
    // =========================================================================

    /// Check that a matching event was emitted.
    ///
    /// Candidates are the outcome's events with this name, in emission order.
    /// No candidates at all is [`AssertionError::EventNotFound`]; candidates
    /// exist but none survives the match spec is
    /// [`AssertionError::EventArgsMismatch`]. Without a spec, any candidate
    /// passes.
    pub fn check_emitted(&self) -> Result<(), AssertionError> {
        let candidates = self.candidates();
        if candidates.is_empty() {
            return Err(AssertionError::EventNotFound(self.diagnostic(&format!(
                "Event of type {} was not emitted",
                self.name
            ))));
        }

        let spec = match &self.spec {
            None => return Ok(()),
            Some(spec) => spec,
        };

        if candidates.iter().any(|event| spec.matches(&event.args)) {
            Ok(())
        } else {
            Err(AssertionError::EventArgsMismatch(self.diagnostic(&format!(
                "Event filter for {} returned no results",
                self.name
            ))))
        }
    }

    /// Check that no matching event was emitted.
    ///
    /// Without a spec this fails iff any event with this name was emitted.
    /// With a spec it fails iff any candidate's arguments satisfy it, so an
    /// outcome that never emitted the event at all passes vacuously.
    pub fn check_not_emitted(&self) -> Result<(), AssertionError> {
        let candidates = self.candidates();

        let spec = match &self.spec {
            None => {
                if candidates.is_empty() {
                    return Ok(());
                }
                return Err(AssertionError::UnexpectedEvent(self.diagnostic(&format!(
                    "Event of type {} was emitted",
                    self.name
                ))));
            }
            Some(spec) => spec,
        };

        if candidates.iter().any(|event| spec.matches(&event.args)) {
            Err(AssertionError::UnexpectedEventArgsMatch(self.diagnostic(
                &format!("Event filter for {} returned results", self.name),
            )))
        } else {
            Ok(())
        }
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    fn candidates(&self) -> Vec<&EmittedEvent> {
        self.outcome
            .events
            .iter()
            .filter(|event| event.name == self.name)
            .collect()
    }

    /// Composed diagnostic: caller message, generated default, and a full
    /// rendering of everything that was actually emitted.
    fn diagnostic(&self, default: &str) -> String {
        compose(
            self.message.as_deref(),
            &format!("{}\n{}", default, render_outcome(&self.outcome)),
        )
    }
}

/// Assert that the outcome emitted an event named `event`, optionally
/// narrowed by `spec`.
///
/// Function-style equivalent of
/// `expect(outcome).event(event).matching(spec).check_emitted()`.
///
/// # Example
///
/// ```rust,ignore
/// use txassert::{assert_emitted, fields, MatchSpec};
///
/// assert_emitted(&outcome, "Payout", None, None)?;
/// assert_emitted(&outcome, "Payout", Some(fields! {"payout" => 50}.into()), Some("Should pay"))?;
/// ```
pub fn assert_emitted(
    outcome: &TransactionOutcome,
    event: &str,
    spec: Option<MatchSpec>,
    message: Option<&str>,
) -> Result<(), AssertionError> {
    assertion(outcome, event, spec, message).check_emitted()
}

/// Assert that the outcome did not emit a matching event named `event`.
///
/// With a `spec`, absence of the event entirely is a valid way to satisfy
/// the assertion.
pub fn assert_not_emitted(
    outcome: &TransactionOutcome,
    event: &str,
    spec: Option<MatchSpec>,
    message: Option<&str>,
) -> Result<(), AssertionError> {
    assertion(outcome, event, spec, message).check_not_emitted()
}

fn assertion(
    outcome: &TransactionOutcome,
    event: &str,
    spec: Option<MatchSpec>,
    message: Option<&str>,
) -> EventAssertion {
    let mut assertion = EventAssertion::new(outcome.clone(), event);
    assertion.spec = spec;
    assertion.message = message.map(String::from);
    assertion
}
