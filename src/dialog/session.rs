//! The per-user working set of one dialog.
//!
//! Everything a dialog mutates lives here; there is no process-wide
//! dispatcher state, so independent users' sessions never interfere.

use crate::dialog::history::HistoryStack;
use crate::dialog::step::Step;
use crate::domain::Record;

/// Session-scoped data captured by history snapshots (everything except the
/// history stack itself). Cloning it is the deep copy: it owns all its data.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionData {
    pub record: Record,
    /// Raw input restored by a pop, used to re-enter the restored step.
    pub last_input: Option<String>,
}

impl SessionData {
    pub fn new(owner: i64) -> Self {
        Self {
            record: Record::new(owner),
            last_input: None,
        }
    }
}

/// One user's conversation: current step, working data, and step history.
#[derive(Debug)]
pub struct Session {
    pub user_id: i64,
    pub user_name: String,
    pub step: Step,
    pub data: SessionData,
    history: HistoryStack,
}

impl Session {
    pub fn new(user_id: i64, user_name: impl Into<String>) -> Self {
        Self {
            user_id,
            user_name: user_name.into(),
            step: Step::Start,
            data: SessionData::new(user_id),
            history: HistoryStack::default(),
        }
    }

    /// Snapshots the live data and records the step being left.
    pub fn push_history(&mut self, step: Step, raw_input: Option<String>) {
        self.history.push(step, self.data.clone(), raw_input);
    }

    /// Restores the newest snapshot, keeping its raw input as the last
    /// input so the restored step can be re-entered deterministically.
    pub fn pop_history(&mut self) -> Option<(Step, Option<String>)> {
        let frame = self.history.pop()?;
        self.data = frame.snapshot;
        self.data.last_input = frame.raw_input.clone();
        Some((frame.step, frame.raw_input))
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Clears the working set: fresh record, no history. Used on dialog
    /// start and on every terminal transition.
    pub fn reset(&mut self) {
        self.data = SessionData::new(self.user_id);
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EntryKind;

    #[test]
    fn pop_restores_data_bit_for_bit() {
        let mut session = Session::new(1, "Ana");
        session.data.record.set_kind(EntryKind::Expense);
        session.data.record.set_amount("9.99").unwrap();
        let before = session.data.clone();

        session.push_history(Step::SelectType, Some("9.99".into()));
        session.data.record.set_category("Comida").unwrap();

        let (step, raw) = session.pop_history().expect("frame");
        assert_eq!(step, Step::SelectType);
        assert_eq!(raw.as_deref(), Some("9.99"));
        assert_eq!(session.data.record, before.record);
        assert_eq!(session.data.last_input.as_deref(), Some("9.99"));
    }

    #[test]
    fn reset_drops_record_and_history() {
        let mut session = Session::new(1, "Ana");
        session.data.record.set_kind(EntryKind::Income);
        session.push_history(Step::Start, None);
        session.reset();
        assert_eq!(session.history_len(), 0);
        assert_eq!(session.data.record.kind(), None);
    }
}
