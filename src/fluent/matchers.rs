//! Argument matching for event assertions.
//!
//! A [`MatchSpec`] narrows a set of candidate events by their argument maps.
//! It is a tagged variant, predicate function or partial-object, resolved
//! in one place by [`MatchSpec::matches`] rather than by ad-hoc inspection
//! at call sites.

use std::fmt;

use crate::outcome::EventArgs;

/// Match expected fields against an event's actual arguments.
///
/// Every listed field must be present in `actual` and structurally equal to
/// the expected value; unlisted fields are ignored and extra fields in
/// `actual` never affect the result. Equality is per-value-type, with no
/// coercion across types: large integers compare through their own equality
/// and numeric strings compare as strings.
///
/// An empty `expected` map matches any argument set.
///
/// # Example
///
/// ```rust
/// use txassert::{args_match, fields};
///
/// let actual = fields! {"winner" => "0xB", "payout" => 50};
///
/// assert!(args_match(&fields! {"payout" => 50}, &actual));
/// assert!(!args_match(&fields! {"payout" => 51}, &actual));
/// assert!(!args_match(&fields! {"payout" => "50"}, &actual));
/// ```
pub fn args_match(expected: &EventArgs, actual: &EventArgs) -> bool {
    expected.iter().all(|(key, value)| actual.get(key) == Some(value))
}

/// Filter over an event's argument set.
///
/// Either a caller-supplied predicate over the full argument map, or a
/// partial object whose listed fields must structurally equal the
/// corresponding actual fields. Absence of a filter is expressed as
/// `Option<MatchSpec>` at call sites.
pub enum MatchSpec {
    /// Keep argument sets for which the predicate returns `true`.
    Predicate(Box<dyn Fn(&EventArgs) -> bool>),
    /// Keep argument sets whose fields structurally contain these entries.
    Partial(EventArgs),
}

impl MatchSpec {
    /// Build a predicate spec from a closure.
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&EventArgs) -> bool + 'static,
    {
        MatchSpec::Predicate(Box::new(f))
    }

    /// Whether the given argument set satisfies this spec.
    pub fn matches(&self, args: &EventArgs) -> bool {
        match self {
            MatchSpec::Predicate(f) => f(args),
            MatchSpec::Partial(expected) => args_match(expected, args),
        }
    }
}

impl From<EventArgs> for MatchSpec {
    fn from(expected: EventArgs) -> Self {
        MatchSpec::Partial(expected)
    }
}

impl fmt::Debug for MatchSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchSpec::Predicate(_) => f.write_str("MatchSpec::Predicate(..)"),
            MatchSpec::Partial(expected) => {
                f.debug_tuple("MatchSpec::Partial").field(expected).finish()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields;
    use proptest::prelude::*;

    #[test]
    fn test_partial_match_ignores_extra_fields() {
        let actual = fields! {"winner" => "0xB", "payout" => 50};
        assert!(args_match(&fields! {"winner" => "0xB"}, &actual));
    }

    #[test]
    fn test_partial_match_missing_field() {
        let actual = fields! {"payout" => 50};
        assert!(!args_match(&fields! {"winner" => "0xB"}, &actual));
    }

    #[test]
    fn test_empty_spec_matches_anything() {
        assert!(args_match(&EventArgs::new(), &fields! {"payout" => 50}));
        assert!(args_match(&EventArgs::new(), &EventArgs::new()));
    }

    #[test]
    fn test_no_type_coercion() {
        let actual = fields! {"payout" => 50};
        assert!(!args_match(&fields! {"payout" => "50"}, &actual));
    }

    #[test]
    fn test_predicate_dispatch() {
        let spec = MatchSpec::predicate(|args| args.get("betNumber") == args.get("winningNumber"));
        assert!(spec.matches(&fields! {"betNumber" => 5, "winningNumber" => 5}));
        assert!(!spec.matches(&fields! {"betNumber" => 3, "winningNumber" => 7}));
    }

    #[test]
    fn test_partial_dispatch_via_from() {
        let spec = MatchSpec::from(fields! {"payout" => 50});
        assert!(spec.matches(&fields! {"winner" => "0xB", "payout" => 50}));
        assert!(!spec.matches(&fields! {"winner" => "0xB", "payout" => 51}));
    }

    proptest! {
        /// Any subset of an argument map matches the full map.
        #[test]
        fn subset_always_matches(
            entries in prop::collection::hash_map("[a-z]{1,8}", -1000i64..1000i64, 0..6),
            keep in prop::collection::vec(any::<bool>(), 6)
        ) {
            let entries: Vec<(String, i64)> = entries.into_iter().collect();
            let actual: EventArgs = entries.iter().cloned().collect();
            let expected: EventArgs = entries
                .iter()
                .zip(&keep)
                .filter(|(_, k)| **k)
                .map(|((key, value), _)| (key.clone(), *value))
                .collect();
            prop_assert!(args_match(&expected, &actual));
        }
    }
}
