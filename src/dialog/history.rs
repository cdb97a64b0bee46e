//! Ordered log of completed steps, with deep-copied data snapshots.
//!
//! A frame is pushed every time a handler finishes a step, after its own
//! mutation, so the snapshot holds the already-validated state of the step
//! being left. Snapshot depth therefore equals dialog length, which is
//! bounded by the handful of steps a dialog has.

use crate::dialog::session::SessionData;
use crate::dialog::step::Step;

/// Immutable record of one completed step.
#[derive(Debug, Clone)]
pub struct HistoryFrame {
    pub step: Step,
    pub snapshot: SessionData,
    pub raw_input: Option<String>,
}

/// Per-session stack of [`HistoryFrame`]s enabling rewind.
#[derive(Debug, Clone, Default)]
pub struct HistoryStack {
    frames: Vec<HistoryFrame>,
}

impl HistoryStack {
    pub fn push(&mut self, step: Step, snapshot: SessionData, raw_input: Option<String>) {
        self.frames.push(HistoryFrame {
            step,
            snapshot,
            raw_input,
        });
    }

    pub fn pop(&mut self) -> Option<HistoryFrame> {
        self.frames.pop()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Record;

    fn data() -> SessionData {
        let mut record = Record::new(1);
        record.set_kind(crate::domain::EntryKind::Expense);
        record.set_amount("12,50").unwrap();
        SessionData {
            record,
            last_input: Some("12,50".into()),
        }
    }

    #[test]
    fn push_then_pop_round_trips_the_snapshot() {
        let original = data();
        let mut stack = HistoryStack::default();
        stack.push(Step::SelectType, original.clone(), Some("12,50".into()));

        let frame = stack.pop().expect("frame");
        assert_eq!(frame.step, Step::SelectType);
        assert_eq!(frame.snapshot, original);
        assert_eq!(frame.raw_input.as_deref(), Some("12,50"));
        assert!(stack.is_empty());
    }

    #[test]
    fn pop_on_empty_stack_is_none() {
        let mut stack = HistoryStack::default();
        assert!(stack.pop().is_none());
    }

    #[test]
    fn frames_pop_newest_first() {
        let mut stack = HistoryStack::default();
        stack.push(Step::Start, data(), None);
        stack.push(Step::EnterExpense, data(), Some("gasto".into()));
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.pop().unwrap().step, Step::EnterExpense);
        assert_eq!(stack.pop().unwrap().step, Step::Start);
    }
}
