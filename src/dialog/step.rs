use serde::{Deserialize, Serialize};

/// Dialog states. Each names the point the user is at, i.e. the set of
/// inputs the dispatcher will accept next.
///
/// The `Modify*` field states other than [`Step::ModifyDate`] are
/// placeholders: picking their field lands on them, but the sub-flows
/// behind them are not built yet, so they only re-present the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Step {
    /// Before (or between) dialogs; only entry commands are meaningful.
    Start,
    /// Waiting for the expense/income choice.
    EnterExpense,
    /// Waiting for the amount text.
    SelectType,
    /// Waiting for the category choice.
    EnterDescription,
    /// Waiting for the trip confirmation or a trip name.
    EnterTrip,
    /// Waiting for the free-text description.
    EnterWho,
    /// Waiting for the counterparty choice (expenses only).
    Confirm,
    /// Waiting for the final yes/no before persisting.
    Save,
    /// Waiting for a field pick in the modification menu.
    Modify,
    /// Waiting for a replacement date.
    ModifyDate,
    ModifyAmount,
    ModifyKind,
    ModifyCategory,
    ModifyDescription,
    ModifyWho,
    ModifyTrip,
    ModifyAnnualizable,
    /// Waiting for "modify more?" after a successful field edit.
    SaveModify,
    /// Registration dialog: waiting for the shared password.
    AwaitPassword,
    /// Dialog over; the session has been cleared.
    Terminal,
}
