//! In-memory collaborators shared by the dialog scenario tests.

use std::cell::RefCell;
use std::rc::Rc;

use gastobot::dialog::{DialogEngine, Inbound, Keyboard, Outbound, Payload};
use gastobot::domain::{EntryKind, Record};
use gastobot::errors::Result;
use gastobot::storage::{AuthStore, LedgerStore, ReferenceStore};

/// Rows appended by the engine, shared with the test body.
pub type SharedRows = Rc<RefCell<Vec<[String; 9]>>>;

pub struct MemoryLedger {
    pub rows: SharedRows,
    pub recent_trip: Option<String>,
}

impl LedgerStore for MemoryLedger {
    fn append_record(&mut self, record: &Record) -> Result<()> {
        self.rows.borrow_mut().push(record.to_row());
        Ok(())
    }

    fn most_recent_trip(&self) -> Result<Option<String>> {
        Ok(self.recent_trip.clone())
    }
}

pub struct FixedReference;

impl ReferenceStore for FixedReference {
    fn categories(&self, kind: EntryKind) -> Result<Vec<String>> {
        Ok(match kind {
            EntryKind::Expense => vec!["Comida".into(), "Viajes".into(), "Casa".into()],
            EntryKind::Income => vec!["Nómina".into(), "Otros".into()],
        })
    }

    fn counterparties(&self) -> Result<Vec<String>> {
        Ok(vec!["Ana".into(), "Jesús".into()])
    }
}

pub struct MemoryAuth {
    pub registered: Rc<RefCell<Vec<i64>>>,
    pub password: String,
}

impl AuthStore for MemoryAuth {
    fn is_registered(&self, user_id: i64) -> Result<bool> {
        Ok(self.registered.borrow().contains(&user_id))
    }

    fn register(&mut self, user_id: i64, credential: &str) -> Result<bool> {
        if credential != self.password || self.registered.borrow().contains(&user_id) {
            return Ok(false);
        }
        self.registered.borrow_mut().push(user_id);
        Ok(true)
    }
}

/// Captures everything the engine sends.
#[derive(Default)]
pub struct RecordingOutbound {
    pub sent: Vec<String>,
    pub keyboards: Vec<Option<Keyboard>>,
}

impl RecordingOutbound {
    pub fn last_text(&self) -> &str {
        self.sent.last().map(String::as_str).unwrap_or("")
    }
}

impl Outbound for RecordingOutbound {
    fn send_or_edit(
        &mut self,
        _user_id: i64,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<()> {
        self.sent.push(text.to_owned());
        self.keyboards.push(keyboard.cloned());
        Ok(())
    }
}

/// Engine wired to in-memory stores; `registered` holds user 7.
pub fn test_engine(recent_trip: Option<&str>) -> (DialogEngine, SharedRows, Rc<RefCell<Vec<i64>>>) {
    let rows: SharedRows = Rc::new(RefCell::new(Vec::new()));
    let registered = Rc::new(RefCell::new(vec![7]));
    let engine = DialogEngine::new(
        Box::new(MemoryLedger {
            rows: Rc::clone(&rows),
            recent_trip: recent_trip.map(str::to_owned),
        }),
        Box::new(FixedReference),
        Box::new(MemoryAuth {
            registered: Rc::clone(&registered),
            password: "sekret".into(),
        }),
    );
    (engine, rows, registered)
}

pub fn text(user_id: i64, body: &str) -> Inbound {
    Inbound::new(user_id, "Bruno", Payload::Text(body.to_owned()))
}

pub fn button(user_id: i64, data: &str) -> Inbound {
    Inbound::new(user_id, "Bruno", Payload::Button(data.to_owned()))
}

pub fn command(user_id: i64, command: gastobot::dialog::Command) -> Inbound {
    Inbound::new(user_id, "Bruno", Payload::Command(command))
}
