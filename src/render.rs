//! Human-readable rendering of events and outcomes.
//!
//! Used both for direct printing and for the diagnostic blocks embedded in
//! assertion failures, so a failing test always shows what was actually
//! emitted.

use crate::outcome::{EventArgs, TransactionOutcome};

const RULE: &str =
    "----------------------------------------------------------------------------------------";
const INDENT: &str = "    ";

/// Render a single event as `Name(field1: v1, field2: v2)`.
///
/// Fields appear in insertion order; an event without arguments renders as
/// `Name()`.
///
/// # Example
///
/// ```rust
/// use txassert::{fields, render_event};
///
/// let args = fields! {"winner" => "0xB", "payout" => 50};
/// assert_eq!(render_event("Payout", &args), "Payout(winner: 0xB, payout: 50)");
/// ```
pub fn render_event(name: &str, args: &EventArgs) -> String {
    let fields: Vec<String> = args.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
    format!("{}({})", name, fields.join(", "))
}

/// Render every event in an outcome as an indented block.
///
/// An outcome without events renders as a single line noting that nothing
/// was emitted; otherwise a banner names the transaction and each event is
/// listed in emission order between fixed-width rule lines.
pub fn render_outcome(outcome: &TransactionOutcome) -> String {
    if outcome.events.is_empty() {
        return format!("{}No events emitted in tx {}\n", INDENT, outcome.tx);
    }
    let mut out = format!("{}Events emitted in tx {}:\n", INDENT, outcome.tx);
    out.push_str(&format!("{}{}\n", INDENT, RULE));
    for event in &outcome.events {
        out.push_str(&format!(
            "{}{}\n",
            INDENT,
            render_event(&event.name, &event.args)
        ));
    }
    out.push_str(&format!("{}{}\n", INDENT, RULE));
    out
}

/// Print the rendered outcome to stdout.
pub fn print_outcome(outcome: &TransactionOutcome) {
    println!("{}", render_outcome(outcome));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields;
    use crate::outcome::{EmittedEvent, Receipt};

    fn outcome_with(events: Vec<EmittedEvent>) -> TransactionOutcome {
        TransactionOutcome::new("0xdeadbeef", Receipt::default(), events)
    }

    #[test]
    fn test_render_event_with_args() {
        let args = fields! {"player" => "0xB", "betNumber" => 3};
        assert_eq!(render_event("Play", &args), "Play(player: 0xB, betNumber: 3)");
    }

    #[test]
    fn test_render_event_without_args() {
        assert_eq!(render_event("Ping", &EventArgs::new()), "Ping()");
    }

    #[test]
    fn test_render_outcome_empty() {
        let rendered = render_outcome(&outcome_with(vec![]));
        assert_eq!(rendered, "    No events emitted in tx 0xdeadbeef\n");
    }

    #[test]
    fn test_render_outcome_lists_events_in_order() {
        let rendered = render_outcome(&outcome_with(vec![
            EmittedEvent::new("Play", fields! {"betNumber" => 5}),
            EmittedEvent::new("Payout", fields! {"payout" => 50}),
        ]));

        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "    Events emitted in tx 0xdeadbeef:");
        assert!(lines[1].trim_start().chars().all(|c| c == '-'));
        assert_eq!(lines[2], "    Play(betNumber: 5)");
        assert_eq!(lines[3], "    Payout(payout: 50)");
        assert!(lines[4].trim_start().chars().all(|c| c == '-'));
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_empty_outcome_never_names_events() {
        let rendered = render_outcome(&outcome_with(vec![]));
        assert!(!rendered.contains("Play"));
        assert!(!rendered.contains(':'));
    }
}
