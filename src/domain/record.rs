//! The in-progress transaction being assembled by a dialog.

use std::fmt;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::dates;
use crate::errors::{BotError, Result};

/// Counterparty recorded for income entries, which never ask for one.
pub const DEFAULT_INCOME_COUNTERPARTY: &str = "Jesús";
/// Category that triggers the trip sub-flow.
pub const TRIP_CATEGORY: &str = "Viajes";

/// Whether the record describes money leaving or entering the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Expense,
    Income,
}

impl EntryKind {
    /// Label used in prompts and in the ledger's `kind` column.
    pub fn label(self) -> &'static str {
        match self {
            EntryKind::Expense => "gasto",
            EntryKind::Income => "ingreso",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One in-progress transaction, owned exclusively by a single session.
///
/// Setters validate and either commit or fail with
/// [`BotError::Validation`], leaving the previous value untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    owner: i64,
    date: NaiveDate,
    amount: Option<f64>,
    kind: Option<EntryKind>,
    category: Option<String>,
    description: Option<String>,
    counterparty: Option<String>,
    trip: Option<String>,
    annualizable: bool,
}

impl Record {
    /// Creates an empty record owned by `owner`, dated today.
    pub fn new(owner: i64) -> Self {
        Self {
            owner,
            date: Local::now().date_naive(),
            amount: None,
            kind: None,
            category: None,
            description: None,
            counterparty: None,
            trip: None,
            annualizable: false,
        }
    }

    pub fn owner(&self) -> i64 {
        self.owner
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn amount(&self) -> Option<f64> {
        self.amount
    }

    pub fn kind(&self) -> Option<EntryKind> {
        self.kind
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn counterparty(&self) -> Option<&str> {
        self.counterparty.as_deref()
    }

    pub fn trip(&self) -> Option<&str> {
        self.trip.as_deref()
    }

    pub fn annualizable(&self) -> bool {
        self.annualizable
    }

    /// Parses and stores a user-entered date (`DD/MM/YYYY` or `DD/MM/YY`).
    pub fn set_date(&mut self, raw: &str) -> Result<()> {
        let date = dates::parse_user_date(raw).ok_or_else(|| {
            BotError::Validation(format!(
                "date '{raw}' must match DD/MM/YYYY or DD/MM/YY"
            ))
        })?;
        self.date = date;
        Ok(())
    }

    /// Parses and stores a non-negative amount; `,` and `.` are both
    /// accepted as the decimal separator.
    pub fn set_amount(&mut self, raw: &str) -> Result<()> {
        let cleaned = raw.trim().replace(',', ".");
        if cleaned.is_empty() {
            return Err(BotError::Validation("amount must not be empty".into()));
        }
        let amount: f64 = cleaned
            .parse()
            .map_err(|_| BotError::Validation(format!("amount '{raw}' is not a number")))?;
        if !amount.is_finite() || amount < 0.0 {
            return Err(BotError::Validation(format!(
                "amount '{raw}' must be a non-negative number"
            )));
        }
        self.amount = Some(amount);
        Ok(())
    }

    pub fn set_kind(&mut self, kind: EntryKind) {
        self.kind = Some(kind);
    }

    /// Stores the category; the kind must already be selected so the
    /// category can be drawn from the right reference list.
    pub fn set_category(&mut self, raw: &str) -> Result<()> {
        if self.kind.is_none() {
            return Err(BotError::Validation(
                "kind must be selected before the category".into(),
            ));
        }
        self.category = Some(required(raw, "category")?);
        Ok(())
    }

    pub fn set_description(&mut self, raw: &str) -> Result<()> {
        self.description = Some(required(raw, "description")?);
        Ok(())
    }

    pub fn set_counterparty(&mut self, raw: &str) -> Result<()> {
        self.counterparty = Some(required(raw, "counterparty")?);
        Ok(())
    }

    pub fn set_trip(&mut self, raw: &str) -> Result<()> {
        self.trip = Some(required(raw, "trip")?);
        Ok(())
    }

    pub fn clear_trip(&mut self) {
        self.trip = None;
    }

    pub fn set_annualizable(&mut self, annualizable: bool) {
        self.annualizable = annualizable;
    }

    /// Deterministic confirmation-screen rendering, fixed label order.
    pub fn render(&self) -> String {
        let or_dash = |value: Option<&str>| value.unwrap_or("-").to_owned();
        format!(
            "Fecha: {}\nImporte: {}\nTipo: {}\nConcepto: {}\nDescripción: {}\nQuien: {}\nViaje: {}\nAnualizable: {}",
            dates::format_user_date(self.date),
            self.amount.map(|a| a.to_string()).unwrap_or_else(|| "-".into()),
            self.kind.map(|k| k.label().to_owned()).unwrap_or_else(|| "-".into()),
            or_dash(self.category.as_deref()),
            or_dash(self.description.as_deref()),
            or_dash(self.counterparty.as_deref()),
            or_dash(self.trip.as_deref()),
            if self.annualizable { "Sí" } else { "No" },
        )
    }

    /// Serializes the record as the 9 ledger columns, in column order.
    ///
    /// `annualizable` keeps the `True`/`False` encoding of the historical
    /// ledger files.
    pub fn to_row(&self) -> [String; 9] {
        [
            self.owner.to_string(),
            dates::format_user_date(self.date),
            self.amount.map(|a| a.to_string()).unwrap_or_default(),
            self.kind.map(|k| k.label().to_owned()).unwrap_or_default(),
            self.category.clone().unwrap_or_default(),
            self.description.clone().unwrap_or_default(),
            self.counterparty.clone().unwrap_or_default(),
            self.trip.clone().unwrap_or_default(),
            if self.annualizable { "True" } else { "False" }.to_owned(),
        ]
    }
}

fn required(raw: &str, field: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(BotError::Validation(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comma_and_dot_amounts_parse_to_the_same_value() {
        let mut a = Record::new(1);
        let mut b = Record::new(1);
        a.set_amount("12,50").unwrap();
        b.set_amount("12.50").unwrap();
        assert_eq!(a.amount(), Some(12.5));
        assert_eq!(a.amount(), b.amount());
    }

    #[test]
    fn invalid_amount_keeps_prior_value() {
        let mut record = Record::new(1);
        record.set_amount("20").unwrap();
        for bad in ["-5", "abc", "", "  "] {
            assert!(record.set_amount(bad).is_err(), "{bad:?} should fail");
            assert_eq!(record.amount(), Some(20.0));
        }
    }

    #[test]
    fn invalid_date_keeps_prior_value() {
        let mut record = Record::new(1);
        record.set_date("01/02/2024").unwrap();
        assert!(record.set_date("32/01/2024").is_err());
        assert_eq!(
            record.date(),
            chrono::NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
        );
    }

    #[test]
    fn category_requires_kind_first() {
        let mut record = Record::new(1);
        assert!(record.set_category("Comida").is_err());
        record.set_kind(EntryKind::Expense);
        record.set_category("Comida").unwrap();
        assert_eq!(record.category(), Some("Comida"));
    }

    #[test]
    fn empty_required_fields_are_rejected() {
        let mut record = Record::new(1);
        record.set_kind(EntryKind::Expense);
        assert!(record.set_category("  ").is_err());
        assert!(record.set_description("").is_err());
        assert!(record.set_counterparty("").is_err());
        assert!(record.set_trip("  ").is_err());
    }

    #[test]
    fn row_has_nine_columns_in_fixed_order() {
        let mut record = Record::new(7);
        record.set_date("12/05/2024").unwrap();
        record.set_kind(EntryKind::Expense);
        record.set_amount("12,50").unwrap();
        record.set_category("Comida").unwrap();
        record.set_description("Cena").unwrap();
        record.set_counterparty("Ana").unwrap();

        let row = record.to_row();
        assert_eq!(
            row,
            [
                "7".to_owned(),
                "12/05/2024".to_owned(),
                "12.5".to_owned(),
                "gasto".to_owned(),
                "Comida".to_owned(),
                "Cena".to_owned(),
                "Ana".to_owned(),
                String::new(),
                "False".to_owned(),
            ]
        );
    }

    #[test]
    fn render_uses_fixed_label_order() {
        let mut record = Record::new(7);
        record.set_kind(EntryKind::Income);
        record.set_amount("100").unwrap();
        let rendered = record.render();
        let labels: Vec<&str> = rendered
            .lines()
            .map(|line| line.split(':').next().unwrap())
            .collect();
        assert_eq!(
            labels,
            [
                "Fecha",
                "Importe",
                "Tipo",
                "Concepto",
                "Descripción",
                "Quien",
                "Viaje",
                "Anualizable"
            ]
        );
    }
}
