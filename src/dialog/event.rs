//! Inbound events and the single outbound seam.

use crate::errors::Result;

/// Top-level commands understood outside and inside a dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start a new entry dialog.
    Start,
    /// Register as a new user.
    Register,
    /// Abandon the current dialog.
    Cancel,
    /// Rewind to the previous step.
    Back,
}

impl Command {
    /// Maps a leading-slash command word to a [`Command`].
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "/start" | "/nuevo_gasto" => Some(Command::Start),
            "/nuevo_usuario" => Some(Command::Register),
            "/cancel" => Some(Command::Cancel),
            "/back" => Some(Command::Back),
            _ => None,
        }
    }

    /// Canonical command text, recorded as the raw input of history frames.
    pub fn literal(self) -> &'static str {
        match self {
            Command::Start => "/start",
            Command::Register => "/nuevo_usuario",
            Command::Cancel => "/cancel",
            Command::Back => "/back",
        }
    }
}

/// What the user sent: a command, free text, or a button press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Command(Command),
    Text(String),
    Button(String),
}

/// One inbound event from the messaging layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inbound {
    pub user_id: i64,
    pub user_name: String,
    pub payload: Payload,
}

impl Inbound {
    pub fn new(user_id: i64, user_name: impl Into<String>, payload: Payload) -> Self {
        Self {
            user_id,
            user_name: user_name.into(),
            payload,
        }
    }

    /// The raw input text this event carries, as recorded into history.
    pub fn raw_input(&self) -> String {
        match &self.payload {
            Payload::Command(command) => command.literal().to_owned(),
            Payload::Text(text) => text.clone(),
            Payload::Button(data) => data.clone(),
        }
    }
}

/// One pressable option: a human label plus the data sent back on press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub data: String,
}

impl Button {
    pub fn new(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data: data.into(),
        }
    }
}

/// Rows of buttons attached to a prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keyboard {
    pub rows: Vec<Vec<Button>>,
}

impl Keyboard {
    pub fn new(rows: Vec<Vec<Button>>) -> Self {
        Self { rows }
    }

    /// Builds a keyboard from plain labels (data = label), `per_row` to a row.
    pub fn from_labels<S: AsRef<str>>(labels: &[S], per_row: usize) -> Self {
        let buttons: Vec<Button> = labels
            .iter()
            .map(|label| Button::new(label.as_ref(), label.as_ref()))
            .collect();
        Self::chunked(buttons, per_row)
    }

    /// Splits a flat button list into rows of at most `per_row`.
    pub fn chunked(buttons: Vec<Button>, per_row: usize) -> Self {
        let per_row = per_row.max(1);
        Self {
            rows: buttons
                .chunks(per_row)
                .map(|chunk| chunk.to_vec())
                .collect(),
        }
    }

    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.rows.iter().flatten()
    }
}

/// Outbound messaging seam. Sends a new message for a first-turn event and
/// edits the existing one for a button press; the dialog core depends on
/// nothing it returns.
pub trait Outbound {
    fn send_or_edit(&mut self, user_id: i64, text: &str, keyboard: Option<&Keyboard>)
        -> Result<()>;
}
