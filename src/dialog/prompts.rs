//! User-facing texts and keyboards. The bot speaks Spanish, as the ledgers
//! it feeds; prompts are deterministic so a rewound step re-renders the
//! exact same message.

use once_cell::sync::Lazy;

use crate::dialog::event::{Button, Keyboard};
use crate::domain::{EntryKind, Record};

/// Button data for the expense choice.
pub const KIND_EXPENSE: &str = "gasto";
/// Button data for the income choice.
pub const KIND_INCOME: &str = "ingreso";
/// Button data for affirmative answers.
pub const YES: &str = "yes";
/// Button data for negative answers.
pub const NO: &str = "no";

pub const FIELD_DATE: &str = "fecha";
pub const FIELD_AMOUNT: &str = "importe";
pub const FIELD_KIND: &str = "tipo";
pub const FIELD_CATEGORY: &str = "concepto";
pub const FIELD_DESCRIPTION: &str = "descripcion";
pub const FIELD_WHO: &str = "quien";
pub const FIELD_TRIP: &str = "viaje";
pub const FIELD_ANNUALIZABLE: &str = "anualizable";

/// Modification menu entries: (button data, label shown to the user).
pub const MODIFY_FIELDS: &[(&str, &str)] = &[
    (FIELD_DATE, "Fecha"),
    (FIELD_KIND, "Tipo"),
    (FIELD_AMOUNT, "Importe"),
    (FIELD_CATEGORY, "Concepto"),
    (FIELD_DESCRIPTION, "Descripción"),
    (FIELD_WHO, "Quien"),
    (FIELD_TRIP, "Viaje"),
    (FIELD_ANNUALIZABLE, "Anualizable"),
];

pub const GOING_BACK: &str = "Volviendo al estado anterior...";
pub const NO_HISTORY: &str = "No hay estado anterior.\n👋 Hasta luego.\n\n\
    Para empezar la conversación usa /start o /nuevo_gasto";
pub const IDLE_HINT: &str = "Para empezar la conversación usa /start o /nuevo_gasto";
pub const SAVED: &str = "🧠 Genial! Guardamos el registro.\n\
    Para añadir otro registro usa el comando /nuevo_gasto.";
pub const ASK_MODIFY: &str = "🥸 ¿Qué quieres modificar?";
pub const ASK_NEW_DATE: &str = "📆 Introduce la nueva fecha en formato DD/MM/YYYY o DD/MM/YY";
pub const ASK_MODIFY_MORE: &str = "¿Quieres modificar algo más?";
pub const ASK_TRIP_NAME: &str = "🛫 Ole ole viajecito!! Introduce el viaje";
pub const ASK_TRIP_NAME_AGAIN: &str = "🛫 Vale, pues introduce el viaje:";
pub const ASK_WHO: &str = "🧾 Al toque, ¿con quién ha sido el gasto?";
pub const ALREADY_REGISTERED: &str = "⚠️ Uy, ya estabas registrado. Usa /start para continuar.";
pub const ASK_PASSWORD: &str =
    "👮‍♀️ Por favor introduce la contraseña\n\nUtiliza /cancel para finalizar.";
pub const WRONG_PASSWORD: &str = "🙅 Ups! La contraseña no es correcta. Inténtalo de nuevo";

pub fn greeting(name: &str) -> String {
    format!("👋 Hola {name}! Te voy a gestionar los gastos, ¿Qué quieres añadir?")
}

pub fn rejection(name: &str) -> String {
    format!(
        "❌ Hola {name}! Parece que no estás entre los usuarios registrados. \
         Por favor usa /nuevo_usuario para darte de alta :)"
    )
}

pub fn ask_amount(kind: EntryKind) -> String {
    format!("💸 Tomo nota, un {kind}. ¿Qué importe ha sido?")
}

pub fn bad_amount(raw: &str) -> String {
    format!(
        "Vaya, el importe de {raw} es incorrecto, \
         asegúrate de que no es negativo y de que es un valor numérico!"
    )
}

pub fn ask_category(kind: EntryKind) -> String {
    format!("👀 Tomo nota! ¿Cuál es el concepto del {kind}?")
}

pub fn ask_description(kind: EntryKind) -> String {
    format!("🎯 Introduce una breve descripción del {kind}:")
}

pub fn ask_trip_confirm(trip: &str) -> String {
    format!("🛫 Ole ole viajecito!! ¿El viaje es {trip}?")
}

pub fn ask_confirm(record: &Record) -> String {
    format!("📜 ¿Está todo correcto?\n{}", record.render())
}

pub fn bad_date(raw: &str) -> String {
    format!("📆 La fecha '{raw}' no es válida. Usa el formato DD/MM/YYYY o DD/MM/YY")
}

pub fn not_supported(label: &str) -> String {
    format!("🥸 Modificar {label} aún no está disponible. Elige otro campo.")
}

pub fn farewell(name: &str) -> String {
    format!("👋 Hasta luego {name}!")
}

pub fn registered(name: &str) -> String {
    format!("✅ Bienvenid@ {name}! Ya puedes continuar :)")
}

pub fn kind_keyboard() -> Keyboard {
    Keyboard::new(vec![
        vec![Button::new("💸 Gasto", KIND_EXPENSE)],
        vec![Button::new("💰 Ingreso", KIND_INCOME)],
    ])
}

pub fn yes_no_keyboard() -> Keyboard {
    Keyboard::new(vec![vec![
        Button::new("✅ Sí", YES),
        Button::new("❌ No", NO),
    ]])
}

/// One button per reference entry, three to a row.
pub fn choices_keyboard(labels: &[String]) -> Keyboard {
    Keyboard::from_labels(labels, 3)
}

static MODIFY_MENU: Lazy<Keyboard> = Lazy::new(|| {
    let buttons = MODIFY_FIELDS
        .iter()
        .map(|(data, label)| Button::new(*label, *data))
        .collect();
    Keyboard::chunked(buttons, 2)
});

pub fn modify_keyboard() -> &'static Keyboard {
    &MODIFY_MENU
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modify_menu_covers_every_field_two_per_row() {
        let keyboard = modify_keyboard();
        assert_eq!(keyboard.buttons().count(), MODIFY_FIELDS.len());
        assert!(keyboard.rows.iter().all(|row| row.len() <= 2));
    }

    #[test]
    fn rejection_names_the_registration_command() {
        let text = rejection("Ana");
        assert!(text.contains("no estás entre los usuarios registrados"));
        assert!(text.contains("/nuevo_usuario"));
    }
}
