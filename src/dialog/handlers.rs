//! One handler per dialog step.
//!
//! Every handler follows the same contract: validate the turn's input,
//! mutate the record, emit the next prompt, push a history frame labeled
//! with the step being left, and return the next step. A failed validation
//! re-prompts the same step without touching the record or the history, so
//! retries and rewinds always land on coherent state.

use tracing::{info, warn};

use crate::dialog::engine::{DialogEngine, TurnInput};
use crate::dialog::event::Outbound;
use crate::dialog::prompts;
use crate::dialog::session::Session;
use crate::dialog::step::Step;
use crate::domain::{EntryKind, DEFAULT_INCOME_COUNTERPARTY, TRIP_CATEGORY};
use crate::errors::{BotError, Result};

/// Entry command: authorize the user and open a fresh dialog.
pub(crate) fn start(
    engine: &mut DialogEngine,
    session: &mut Session,
    input: &TurnInput,
    out: &mut dyn Outbound,
) -> Result<Step> {
    let user = session.user_id;
    info!(user, "entry command received");

    if let Err(err) = engine.ensure_registered(user) {
        warn!(user, %err, "rejecting entry command");
        out.send_or_edit(user, &prompts::rejection(&session.user_name), None)?;
        return engine.terminate(session);
    }

    // A fresh dialog starts from a clean record and an empty history, even
    // when an earlier one was abandoned mid-way.
    session.reset();
    out.send_or_edit(
        user,
        &prompts::greeting(&session.user_name),
        Some(&prompts::kind_keyboard()),
    )?;
    session.push_history(Step::Start, input.raw.clone());
    Ok(Step::EnterExpense)
}

/// EnterExpense: the user picked expense or income.
pub(crate) fn enter_kind(
    _engine: &mut DialogEngine,
    session: &mut Session,
    input: &TurnInput,
    out: &mut dyn Outbound,
) -> Result<Step> {
    let kind = match input.text.as_str() {
        prompts::KIND_EXPENSE => EntryKind::Expense,
        prompts::KIND_INCOME => EntryKind::Income,
        other => {
            warn!(user = session.user_id, other, "unexpected kind selection");
            out.send_or_edit(
                session.user_id,
                &prompts::greeting(&session.user_name),
                Some(&prompts::kind_keyboard()),
            )?;
            return Ok(Step::EnterExpense);
        }
    };
    session.data.record.set_kind(kind);
    info!(user = session.user_id, kind = %kind, "kind selected");

    out.send_or_edit(session.user_id, &prompts::ask_amount(kind), None)?;
    session.push_history(Step::EnterExpense, input.raw.clone());
    Ok(Step::SelectType)
}

/// SelectType: the user sent the amount text.
pub(crate) fn enter_amount(
    engine: &mut DialogEngine,
    session: &mut Session,
    input: &TurnInput,
    out: &mut dyn Outbound,
) -> Result<Step> {
    if let Err(err) = session.data.record.set_amount(&input.text) {
        warn!(user = session.user_id, %err, "amount rejected");
        out.send_or_edit(session.user_id, &prompts::bad_amount(&input.text), None)?;
        return Ok(Step::SelectType);
    }
    let kind = current_kind(session)?;
    info!(user = session.user_id, amount = session.data.record.amount(), "amount accepted");

    let categories = engine.refdata.categories(kind)?;
    out.send_or_edit(
        session.user_id,
        &prompts::ask_category(kind),
        Some(&prompts::choices_keyboard(&categories)),
    )?;
    session.push_history(Step::SelectType, input.raw.clone());
    Ok(Step::EnterDescription)
}

/// EnterDescription: the user picked a category. "Viajes" detours through
/// the trip sub-flow, seeded with the most recent trip on file.
pub(crate) fn enter_category(
    engine: &mut DialogEngine,
    session: &mut Session,
    input: &TurnInput,
    out: &mut dyn Outbound,
) -> Result<Step> {
    if let Err(err) = session.data.record.set_category(&input.text) {
        warn!(user = session.user_id, %err, "category rejected");
        let kind = current_kind(session)?;
        let categories = engine.refdata.categories(kind)?;
        out.send_or_edit(
            session.user_id,
            &prompts::ask_category(kind),
            Some(&prompts::choices_keyboard(&categories)),
        )?;
        return Ok(Step::EnterDescription);
    }
    let kind = current_kind(session)?;
    info!(user = session.user_id, category = %input.text, "category selected");

    if session.data.record.category() != Some(TRIP_CATEGORY) {
        out.send_or_edit(session.user_id, &prompts::ask_description(kind), None)?;
        session.push_history(Step::EnterDescription, input.raw.clone());
        return Ok(Step::EnterWho);
    }

    match engine.ledger.most_recent_trip()? {
        Some(trip) => {
            // Carry the trip over so a "yes" is a pure confirmation.
            session.data.record.set_trip(&trip)?;
            out.send_or_edit(
                session.user_id,
                &prompts::ask_trip_confirm(&trip),
                Some(&prompts::yes_no_keyboard()),
            )?;
        }
        None => {
            out.send_or_edit(session.user_id, prompts::ASK_TRIP_NAME, None)?;
        }
    }
    session.push_history(Step::EnterDescription, input.raw.clone());
    Ok(Step::EnterTrip)
}

/// EnterTrip: a yes/no on the carried-over trip, or a free-text trip name.
pub(crate) fn enter_trip(
    _engine: &mut DialogEngine,
    session: &mut Session,
    input: &TurnInput,
    out: &mut dyn Outbound,
) -> Result<Step> {
    let kind = current_kind(session)?;
    match input.text.as_str() {
        prompts::YES => {
            out.send_or_edit(session.user_id, &prompts::ask_description(kind), None)?;
            session.push_history(Step::EnterTrip, input.raw.clone());
            Ok(Step::EnterWho)
        }
        prompts::NO => {
            session.data.record.clear_trip();
            out.send_or_edit(session.user_id, prompts::ASK_TRIP_NAME_AGAIN, None)?;
            session.push_history(Step::EnterTrip, input.raw.clone());
            Ok(Step::EnterTrip)
        }
        name => {
            if let Err(err) = session.data.record.set_trip(name) {
                warn!(user = session.user_id, %err, "trip name rejected");
                out.send_or_edit(session.user_id, prompts::ASK_TRIP_NAME_AGAIN, None)?;
                return Ok(Step::EnterTrip);
            }
            out.send_or_edit(session.user_id, &prompts::ask_description(kind), None)?;
            session.push_history(Step::EnterTrip, input.raw.clone());
            Ok(Step::EnterWho)
        }
    }
}

/// EnterWho: the user sent the description. Expenses go on to pick a
/// counterparty; income takes the fixed one and jumps to confirmation.
pub(crate) fn enter_description(
    engine: &mut DialogEngine,
    session: &mut Session,
    input: &TurnInput,
    out: &mut dyn Outbound,
) -> Result<Step> {
    let kind = current_kind(session)?;
    if let Err(err) = session.data.record.set_description(&input.text) {
        warn!(user = session.user_id, %err, "description rejected");
        out.send_or_edit(session.user_id, &prompts::ask_description(kind), None)?;
        return Ok(Step::EnterWho);
    }
    info!(user = session.user_id, "description recorded");

    if kind == EntryKind::Expense {
        let counterparties = engine.refdata.counterparties()?;
        out.send_or_edit(
            session.user_id,
            prompts::ASK_WHO,
            Some(&prompts::choices_keyboard(&counterparties)),
        )?;
        session.push_history(Step::EnterWho, input.raw.clone());
        Ok(Step::Confirm)
    } else {
        session
            .data
            .record
            .set_counterparty(DEFAULT_INCOME_COUNTERPARTY)?;
        out.send_or_edit(
            session.user_id,
            &prompts::ask_confirm(&session.data.record),
            Some(&prompts::yes_no_keyboard()),
        )?;
        session.push_history(Step::EnterWho, input.raw.clone());
        Ok(Step::Save)
    }
}

/// Confirm: the user picked the counterparty (expenses only).
pub(crate) fn enter_counterparty(
    _engine: &mut DialogEngine,
    session: &mut Session,
    input: &TurnInput,
    out: &mut dyn Outbound,
) -> Result<Step> {
    if let Err(err) = session.data.record.set_counterparty(&input.text) {
        warn!(user = session.user_id, %err, "counterparty rejected");
        out.send_or_edit(session.user_id, prompts::ASK_WHO, None)?;
        return Ok(Step::Confirm);
    }
    out.send_or_edit(
        session.user_id,
        &prompts::ask_confirm(&session.data.record),
        Some(&prompts::yes_no_keyboard()),
    )?;
    session.push_history(Step::Confirm, input.raw.clone());
    Ok(Step::Save)
}

/// Save: final yes/no. Yes persists and ends; no opens the modify menu.
pub(crate) fn enter_save(
    engine: &mut DialogEngine,
    session: &mut Session,
    input: &TurnInput,
    out: &mut dyn Outbound,
) -> Result<Step> {
    match input.text.as_str() {
        prompts::YES => {
            engine.ledger.append_record(&session.data.record)?;
            info!(user = session.user_id, "record saved");
            out.send_or_edit(session.user_id, prompts::SAVED, None)?;
            engine.terminate(session)
        }
        prompts::NO => {
            out.send_or_edit(
                session.user_id,
                prompts::ASK_MODIFY,
                Some(prompts::modify_keyboard()),
            )?;
            session.push_history(Step::Save, input.raw.clone());
            Ok(Step::Modify)
        }
        _ => {
            out.send_or_edit(
                session.user_id,
                &prompts::ask_confirm(&session.data.record),
                Some(&prompts::yes_no_keyboard()),
            )?;
            Ok(Step::Save)
        }
    }
}

/// Maps a modify-menu pick to the sub-flow state behind it, plus the label
/// shown to the user. Every field has a state; only the date edit works.
fn modify_target(data: &str) -> Result<(Step, &'static str)> {
    let label = prompts::MODIFY_FIELDS
        .iter()
        .find(|(field, _)| *field == data)
        .map(|(_, label)| *label)
        .ok_or_else(|| BotError::Validation(format!("unknown field '{data}'")))?;
    let step = match data {
        prompts::FIELD_DATE => Step::ModifyDate,
        prompts::FIELD_KIND => Step::ModifyKind,
        prompts::FIELD_AMOUNT => Step::ModifyAmount,
        prompts::FIELD_CATEGORY => Step::ModifyCategory,
        prompts::FIELD_DESCRIPTION => Step::ModifyDescription,
        prompts::FIELD_WHO => Step::ModifyWho,
        prompts::FIELD_TRIP => Step::ModifyTrip,
        _ => Step::ModifyAnnualizable,
    };
    Ok((step, label))
}

/// Modify: the user picked which field to edit. Picks of unbuilt sub-flows
/// still land on their own state, which reports and re-shows the menu.
pub(crate) fn pick_modify_field(
    _engine: &mut DialogEngine,
    session: &mut Session,
    input: &TurnInput,
    out: &mut dyn Outbound,
) -> Result<Step> {
    match modify_target(input.text.trim()) {
        Ok((Step::ModifyDate, _)) => {
            out.send_or_edit(session.user_id, prompts::ASK_NEW_DATE, None)?;
            session.push_history(Step::Modify, input.raw.clone());
            Ok(Step::ModifyDate)
        }
        Ok((step, label)) => {
            warn!(user = session.user_id, field = %label, "modify sub-flow not implemented");
            out.send_or_edit(
                session.user_id,
                &prompts::not_supported(label),
                Some(prompts::modify_keyboard()),
            )?;
            Ok(step)
        }
        Err(err) => {
            warn!(user = session.user_id, %err, "unrecognized modify pick");
            out.send_or_edit(
                session.user_id,
                prompts::ASK_MODIFY,
                Some(prompts::modify_keyboard()),
            )?;
            Ok(Step::Modify)
        }
    }
}

/// ModifyDate: replacement date text, validated strictly.
pub(crate) fn modify_date(
    _engine: &mut DialogEngine,
    session: &mut Session,
    input: &TurnInput,
    out: &mut dyn Outbound,
) -> Result<Step> {
    if let Err(err) = session.data.record.set_date(&input.text) {
        warn!(user = session.user_id, %err, "date rejected");
        out.send_or_edit(session.user_id, &prompts::bad_date(&input.text), None)?;
        return Ok(Step::ModifyDate);
    }
    info!(user = session.user_id, "date modified");
    out.send_or_edit(
        session.user_id,
        prompts::ASK_MODIFY_MORE,
        Some(&prompts::yes_no_keyboard()),
    )?;
    session.push_history(Step::ModifyDate, input.raw.clone());
    Ok(Step::SaveModify)
}

/// Handler for the declared-but-unbuilt modify sub-flows. The menu was
/// re-shown on entry, so any input here is taken as a new field pick.
pub(crate) fn modify_placeholder(
    engine: &mut DialogEngine,
    session: &mut Session,
    input: &TurnInput,
    out: &mut dyn Outbound,
) -> Result<Step> {
    pick_modify_field(engine, session, input, out)
}

/// SaveModify: "modify more?" — yes reopens the menu, no persists the
/// edited record and ends the dialog.
pub(crate) fn save_modify(
    engine: &mut DialogEngine,
    session: &mut Session,
    input: &TurnInput,
    out: &mut dyn Outbound,
) -> Result<Step> {
    match input.text.as_str() {
        prompts::YES => {
            out.send_or_edit(
                session.user_id,
                prompts::ASK_MODIFY,
                Some(prompts::modify_keyboard()),
            )?;
            session.push_history(Step::SaveModify, input.raw.clone());
            Ok(Step::Modify)
        }
        prompts::NO => {
            engine.ledger.append_record(&session.data.record)?;
            info!(user = session.user_id, "record saved after modification");
            out.send_or_edit(session.user_id, prompts::SAVED, None)?;
            engine.terminate(session)
        }
        _ => {
            out.send_or_edit(
                session.user_id,
                prompts::ASK_MODIFY_MORE,
                Some(&prompts::yes_no_keyboard()),
            )?;
            Ok(Step::SaveModify)
        }
    }
}

/// Registration entry command.
pub(crate) fn register_entry(
    engine: &mut DialogEngine,
    session: &mut Session,
    _input: &TurnInput,
    out: &mut dyn Outbound,
) -> Result<Step> {
    if engine.ensure_registered(session.user_id).is_ok() {
        out.send_or_edit(session.user_id, prompts::ALREADY_REGISTERED, None)?;
        return engine.terminate(session);
    }
    out.send_or_edit(session.user_id, prompts::ASK_PASSWORD, None)?;
    Ok(Step::AwaitPassword)
}

/// AwaitPassword: check the shared password, loop until right or canceled.
pub(crate) fn enter_password(
    engine: &mut DialogEngine,
    session: &mut Session,
    input: &TurnInput,
    out: &mut dyn Outbound,
) -> Result<Step> {
    if engine.auth.register(session.user_id, &input.text)? {
        info!(user = session.user_id, "registration succeeded");
        out.send_or_edit(
            session.user_id,
            &prompts::registered(&session.user_name),
            None,
        )?;
        engine.terminate(session)
    } else {
        warn!(user = session.user_id, "registration attempt failed");
        out.send_or_edit(session.user_id, prompts::WRONG_PASSWORD, None)?;
        Ok(Step::AwaitPassword)
    }
}

/// No dialog in progress; the only useful reply is the entry-command hint.
pub(crate) fn idle(
    _engine: &mut DialogEngine,
    session: &mut Session,
    _input: &TurnInput,
    out: &mut dyn Outbound,
) -> Result<Step> {
    out.send_or_edit(session.user_id, prompts::IDLE_HINT, None)?;
    Ok(session.step)
}

fn current_kind(session: &Session) -> Result<EntryKind> {
    session
        .data
        .record
        .kind()
        .ok_or_else(|| BotError::Validation("kind has not been selected yet".into()))
}
