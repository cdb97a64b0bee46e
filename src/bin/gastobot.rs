//! Line-oriented local driver for the dialog engine.
//!
//! Reads one event per stdin line: `/`-prefixed words are commands, lines
//! matching a button of the last keyboard are button presses, everything
//! else is free text. Prompts and their options go to stdout.

use std::env;
use std::io::{self, BufRead};
use std::process;

use gastobot::config::Settings;
use gastobot::dialog::{Command, DialogEngine, Inbound, Keyboard, Outbound, Payload, Session};
use gastobot::errors::Result as BotResult;
use gastobot::storage::{CsvLedger, JsonReferenceData, JsonUserStore};

const USER_ID_ENV: &str = "GASTOBOT_USER_ID";
const USER_NAME_ENV: &str = "GASTOBOT_USER_NAME";

/// Prints prompts and remembers the last keyboard so replies can be mapped
/// back to button presses.
#[derive(Default)]
struct StdoutOutbound {
    last_keyboard: Option<Keyboard>,
}

impl StdoutOutbound {
    fn match_button(&self, line: &str) -> Option<String> {
        let keyboard = self.last_keyboard.as_ref()?;
        keyboard
            .buttons()
            .find(|button| {
                button.data.eq_ignore_ascii_case(line) || button.label.eq_ignore_ascii_case(line)
            })
            .map(|button| button.data.clone())
    }
}

impl Outbound for StdoutOutbound {
    fn send_or_edit(
        &mut self,
        _user_id: i64,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> BotResult<()> {
        println!("{text}");
        if let Some(keyboard) = keyboard {
            for row in &keyboard.rows {
                let labels: Vec<String> = row
                    .iter()
                    .map(|button| format!("[{}]", button.label))
                    .collect();
                println!("  {}", labels.join(" "));
            }
        }
        self.last_keyboard = keyboard.cloned();
        Ok(())
    }
}

fn main() {
    gastobot::init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env();
    let user_id: i64 = env::var(USER_ID_ENV)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(1);
    let user_name = env::var(USER_NAME_ENV).unwrap_or_else(|_| "amigo".to_owned());

    let mut engine = DialogEngine::new(
        Box::new(CsvLedger::new(settings.ledger_path())),
        Box::new(JsonReferenceData::new(settings.categories_path())),
        Box::new(JsonUserStore::new(
            settings.users_path(),
            settings.register_password.clone(),
        )),
    );
    let mut session = Session::new(user_id, user_name);
    let mut outbound = StdoutOutbound::default();

    for line in io::stdin().lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let payload = if line.starts_with('/') {
            match Command::parse(line) {
                Some(command) => Payload::Command(command),
                None => {
                    println!("Comando desconocido: {line}");
                    continue;
                }
            }
        } else if let Some(data) = outbound.match_button(line) {
            Payload::Button(data)
        } else {
            Payload::Text(line.to_owned())
        };

        let inbound = Inbound::new(user_id, session.user_name.clone(), payload);
        if let Err(err) = engine.handle(&mut session, &inbound, &mut outbound) {
            eprintln!("Error: {err}");
        }
    }

    Ok(())
}
