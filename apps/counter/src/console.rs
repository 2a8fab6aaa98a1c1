//! # Console
//!
//! Menu-driven front end over any async reader/writer (stdin/stdout in the
//! binary, byte buffers in tests).
//!
//! ```text
//! Cabiao Senior High School
//!
//!   1) Add Medicine
//!   2) Give Medicine
//!   3) Show Stock
//!   4) Check Expiry
//!   5) Check Logs
//!   6) Export Log File
//!   q) Quit
//! > 2
//! Name of Patient: Juan
//! Name of Medicine: Paracetamol
//! Quantity Taken: 20
//! ┌ Success
//! │ Juan took 20 of Paracetamol. Remaining stock: 80.
//! └
//! ```
//!
//! Each action runs to completion before the next line is read. End of input
//! quits, also in the middle of a form.

use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use crate::commands::{self, DispenseForm, RegisterForm};
use crate::config::DEFAULT_CLINIC_NAME;
use crate::error::ApiError;
use crate::notification::Notification;
use crate::state::{DbState, MirrorLog};
use dispensary_core::CivilClock;

const MENU: &str = "\n  1) Add Medicine\n  2) Give Medicine\n  3) Show Stock\n  4) Check Expiry\n  5) Check Logs\n  6) Export Log File\n  q) Quit\n> ";

/// One menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddMedicine,
    GiveMedicine,
    ShowStock,
    CheckExpiry,
    CheckLogs,
    ExportLogFile,
    Quit,
}

impl MenuChoice {
    /// Accepts the menu number or the lowercase action name.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "1" | "add" => Some(MenuChoice::AddMedicine),
            "2" | "give" => Some(MenuChoice::GiveMedicine),
            "3" | "stock" => Some(MenuChoice::ShowStock),
            "4" | "expiry" => Some(MenuChoice::CheckExpiry),
            "5" | "logs" => Some(MenuChoice::CheckLogs),
            "6" | "export" => Some(MenuChoice::ExportLogFile),
            "q" | "quit" | "exit" => Some(MenuChoice::Quit),
            _ => None,
        }
    }
}

/// The interactive counter.
pub struct Console<R, W> {
    input: R,
    output: W,
    db: DbState,
    mirror: MirrorLog,
    clock: CivilClock,
    clinic_name: String,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(input: R, output: W, db: DbState, mirror: MirrorLog, clock: CivilClock) -> Self {
        Console {
            input,
            output,
            db,
            mirror,
            clock,
            clinic_name: DEFAULT_CLINIC_NAME.to_string(),
        }
    }

    /// Sets the banner text.
    pub fn clinic_name(mut self, name: impl Into<String>) -> Self {
        self.clinic_name = name.into();
        self
    }

    /// Runs the menu loop until the operator quits or input ends.
    pub async fn run(&mut self) -> io::Result<()> {
        let banner = format!("{}\n", self.clinic_name);
        self.write(&banner).await?;

        loop {
            self.write(MENU).await?;

            let Some(line) = self.read_line().await? else {
                break;
            };

            let Some(choice) = MenuChoice::parse(&line) else {
                let msg = format!("Unknown option '{}'\n", line.trim());
                self.write(&msg).await?;
                continue;
            };

            if choice == MenuChoice::Quit {
                break;
            }

            debug!(?choice, "Menu action");
            let Some(notifications) = self.handle(choice).await? else {
                break;
            };

            for note in notifications {
                self.write(&note.render()).await?;
            }
        }

        info!("Counter closed");
        self.output.flush().await
    }

    /// Returns `None` when input ended before the form was complete.
    async fn handle(&mut self, choice: MenuChoice) -> io::Result<Option<Vec<Notification>>> {
        let notes = match choice {
            MenuChoice::AddMedicine => {
                let Some(form) = self.register_form().await? else {
                    return Ok(None);
                };
                single(commands::register_medicine(&self.db, form).await)
            }
            MenuChoice::GiveMedicine => {
                let Some(form) = self.dispense_form().await? else {
                    return Ok(None);
                };
                match commands::dispense_medicine(&self.db, &self.mirror, &self.clock, form).await {
                    Ok(receipt) => receipt.notifications(),
                    Err(e) => vec![e.notification()],
                }
            }
            MenuChoice::ShowStock => single(commands::show_stock(&self.db).await),
            MenuChoice::CheckExpiry => single(commands::check_expiry(&self.db, &self.clock).await),
            MenuChoice::CheckLogs => single(commands::view_logs(&self.db).await),
            MenuChoice::ExportLogFile => single(commands::export_logs(&self.mirror).await),
            MenuChoice::Quit => Vec::new(),
        };

        Ok(Some(notes))
    }

    async fn register_form(&mut self) -> io::Result<Option<RegisterForm>> {
        let Some(name) = self.prompt("Name of Medicine").await? else {
            return Ok(None);
        };
        let Some(stock) = self.prompt("Stock").await? else {
            return Ok(None);
        };
        let Some(expiry) = self.prompt("Expiry Date (YYYY-MM-DD)").await? else {
            return Ok(None);
        };

        Ok(Some(RegisterForm {
            name,
            stock,
            expiry,
        }))
    }

    async fn dispense_form(&mut self) -> io::Result<Option<DispenseForm>> {
        let Some(patient) = self.prompt("Name of Patient").await? else {
            return Ok(None);
        };
        let Some(medicine) = self.prompt("Name of Medicine").await? else {
            return Ok(None);
        };
        let Some(quantity) = self.prompt("Quantity Taken").await? else {
            return Ok(None);
        };

        Ok(Some(DispenseForm {
            patient,
            medicine,
            quantity,
        }))
    }

    async fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        let label = format!("{}: ", label);
        self.write(&label).await?;
        self.read_line().await
    }

    async fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = String::new();
        if self.input.read_line(&mut buf).await? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim_end_matches(['\r', '\n']).to_string()))
    }

    async fn write(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.flush().await
    }

    /// Consumes the console, returning the writer.
    pub fn into_output(self) -> W {
        self.output
    }
}

fn single(result: Result<Notification, ApiError>) -> Vec<Notification> {
    match result {
        Ok(note) => vec![note],
        Err(e) => vec![e.notification()],
    }
}
