//! The step dispatcher: routes each inbound event to the handler registered
//! for the session's current step and advances the session.
//!
//! Handlers are looked up through a static table keyed by the tagged
//! [`Step`] identifier; history frames carry the step, never a callable, so
//! a rewound frame re-enters through the same table.

use tracing::{info, warn};

use crate::dialog::event::{Command, Inbound, Outbound, Payload};
use crate::dialog::handlers;
use crate::dialog::prompts;
use crate::dialog::session::{Session, SessionData};
use crate::dialog::step::Step;
use crate::errors::{BotError, Result};
use crate::storage::{AuthStore, LedgerStore, ReferenceStore};

/// Handler signature shared by every step.
pub type StepHandler =
    fn(&mut DialogEngine, &mut Session, &TurnInput, &mut dyn Outbound) -> Result<Step>;

/// Input resolved for one handler invocation: the text to act on plus the
/// raw payload recorded into history frames.
#[derive(Debug, Clone)]
pub struct TurnInput {
    pub text: String,
    pub raw: Option<String>,
}

impl TurnInput {
    pub(crate) fn from_inbound(inbound: &Inbound, data: &SessionData) -> Self {
        let raw = inbound.raw_input();
        let text = match &inbound.payload {
            Payload::Text(text) => text.clone(),
            Payload::Button(data) => data.clone(),
            // Commands carry no step input; fall back to the restored one.
            Payload::Command(_) => data.last_input.clone().unwrap_or_default(),
        };
        Self {
            text,
            raw: Some(raw),
        }
    }

    /// Input for re-entering a restored step with its recorded raw input.
    pub(crate) fn reentry(raw: Option<String>) -> Self {
        Self {
            text: raw.clone().unwrap_or_default(),
            raw,
        }
    }
}

/// Static step-to-handler lookup. Total: every declared step dispatches
/// somewhere, placeholders included.
fn handler_for(step: Step) -> StepHandler {
    match step {
        Step::Start => handlers::start,
        Step::EnterExpense => handlers::enter_kind,
        Step::SelectType => handlers::enter_amount,
        Step::EnterDescription => handlers::enter_category,
        Step::EnterTrip => handlers::enter_trip,
        Step::EnterWho => handlers::enter_description,
        Step::Confirm => handlers::enter_counterparty,
        Step::Save => handlers::enter_save,
        Step::Modify => handlers::pick_modify_field,
        Step::ModifyDate => handlers::modify_date,
        Step::ModifyAmount
        | Step::ModifyKind
        | Step::ModifyCategory
        | Step::ModifyDescription
        | Step::ModifyWho
        | Step::ModifyTrip
        | Step::ModifyAnnualizable => handlers::modify_placeholder,
        Step::SaveModify => handlers::save_modify,
        Step::AwaitPassword => handlers::enter_password,
        Step::Terminal => handlers::idle,
    }
}

/// Owns the external collaborators and drives sessions through the state
/// machine, one inbound event at a time.
pub struct DialogEngine {
    pub(crate) ledger: Box<dyn LedgerStore>,
    pub(crate) refdata: Box<dyn ReferenceStore>,
    pub(crate) auth: Box<dyn AuthStore>,
}

impl DialogEngine {
    pub fn new(
        ledger: Box<dyn LedgerStore>,
        refdata: Box<dyn ReferenceStore>,
        auth: Box<dyn AuthStore>,
    ) -> Self {
        Self {
            ledger,
            refdata,
            auth,
        }
    }

    /// Routes one inbound event: top-level commands first, everything else
    /// to the current step's handler.
    pub fn handle(
        &mut self,
        session: &mut Session,
        inbound: &Inbound,
        out: &mut dyn Outbound,
    ) -> Result<Step> {
        match &inbound.payload {
            Payload::Command(Command::Start) => self.start_dialog(session, inbound, out),
            Payload::Command(Command::Register) => self.register_user(session, inbound, out),
            Payload::Command(Command::Cancel) => self.cancel(session, out),
            Payload::Command(Command::Back) => self.go_back(session, out),
            Payload::Text(_) | Payload::Button(_) => self.dispatch(session, inbound, out),
        }
    }

    /// Entry point: begin a new entry dialog.
    pub fn start_dialog(
        &mut self,
        session: &mut Session,
        inbound: &Inbound,
        out: &mut dyn Outbound,
    ) -> Result<Step> {
        let input = TurnInput::from_inbound(inbound, &session.data);
        let next = handlers::start(self, session, &input, out)?;
        session.step = next;
        Ok(next)
    }

    /// Entry point: begin the new-user registration dialog.
    pub fn register_user(
        &mut self,
        session: &mut Session,
        inbound: &Inbound,
        out: &mut dyn Outbound,
    ) -> Result<Step> {
        let input = TurnInput::from_inbound(inbound, &session.data);
        let next = handlers::register_entry(self, session, &input, out)?;
        session.step = next;
        Ok(next)
    }

    /// Entry point: abandon the dialog unconditionally.
    pub fn cancel(&mut self, session: &mut Session, out: &mut dyn Outbound) -> Result<Step> {
        info!(user = session.user_id, "conversation canceled");
        out.send_or_edit(
            session.user_id,
            &prompts::farewell(&session.user_name),
            None,
        )?;
        self.terminate(session)
    }

    /// Entry point: rewind one user-visible step.
    ///
    /// Discards the frame of the step just completed, then restores the
    /// frame before it and re-invokes that step's handler with its recorded
    /// raw input, which re-renders the prompt and re-pushes the frame.
    pub fn go_back(&mut self, session: &mut Session, out: &mut dyn Outbound) -> Result<Step> {
        match Self::rewind_target(session) {
            Ok((step, raw)) => {
                info!(user = session.user_id, ?step, "rewinding to prior step");
                out.send_or_edit(session.user_id, prompts::GOING_BACK, None)?;
                let input = TurnInput::reentry(raw);
                let next = handler_for(step)(self, session, &input, out)?;
                session.step = next;
                Ok(next)
            }
            Err(BotError::HistoryExhausted) => {
                warn!(user = session.user_id, "no prior state to rewind to");
                out.send_or_edit(session.user_id, prompts::NO_HISTORY, None)?;
                self.terminate(session)
            }
            Err(err) => Err(err),
        }
    }

    /// Fails with [`BotError::Unauthorized`] when the user is not on the
    /// allow-list.
    pub(crate) fn ensure_registered(&self, user_id: i64) -> Result<()> {
        if self.auth.is_registered(user_id)? {
            Ok(())
        } else {
            Err(BotError::Unauthorized(user_id))
        }
    }

    /// Clears the session and parks it on [`Step::Terminal`].
    pub(crate) fn terminate(&mut self, session: &mut Session) -> Result<Step> {
        session.reset();
        session.step = Step::Terminal;
        Ok(Step::Terminal)
    }

    fn dispatch(
        &mut self,
        session: &mut Session,
        inbound: &Inbound,
        out: &mut dyn Outbound,
    ) -> Result<Step> {
        if matches!(session.step, Step::Start | Step::Terminal) {
            // No dialog in progress; point at the entry commands.
            out.send_or_edit(session.user_id, prompts::IDLE_HINT, None)?;
            return Ok(session.step);
        }
        let input = TurnInput::from_inbound(inbound, &session.data);
        let next = handler_for(session.step)(self, session, &input, out)?;
        session.step = next;
        Ok(next)
    }

    fn rewind_target(session: &mut Session) -> Result<(Step, Option<String>)> {
        // Two frames are needed: the one being discarded and the one being
        // restored.
        if session.pop_history().is_none() {
            return Err(BotError::HistoryExhausted);
        }
        session.pop_history().ok_or(BotError::HistoryExhausted)
    }
}
