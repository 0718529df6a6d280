//! Coloured one-line status messages for the terminal.

use std::fmt::Display;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

#[derive(Clone, Copy)]
enum Tone {
    Info,
    Success,
    Warning,
    Error,
    Reminder,
}

impl Tone {
    fn style(self) -> (&'static str, &'static str) {
        match self {
            Tone::Info => ("\x1b[34m", "ℹ️"),
            Tone::Success => ("\x1b[32m", "✅"),
            Tone::Warning => ("\x1b[33m", "⚠️"),
            Tone::Error => ("\x1b[31m", "❌"),
            Tone::Reminder => ("\x1b[35m", "🔔"),
        }
    }

    fn line(self, msg: impl Display) -> String {
        let (colour, icon) = self.style();
        format!("{colour}{BOLD}{icon}{RESET} {msg}")
    }
}

pub fn info(msg: impl Display) {
    println!("{}", Tone::Info.line(msg));
}

pub fn success(msg: impl Display) {
    println!("{}", Tone::Success.line(msg));
}

pub fn warning(msg: impl Display) {
    println!("{}", Tone::Warning.line(msg));
}

/// Goes to stderr.
pub fn error(msg: impl Display) {
    eprintln!("{}", Tone::Error.line(msg));
}

/// A delivered care reminder: title in bold, then the body.
pub fn reminder(title: impl Display, body: impl Display) {
    println!("{}", Tone::Reminder.line(format!("{BOLD}{title}{RESET}: {body}")));
}

pub fn header(msg: impl Display) {
    println!("\x1b[34m{BOLD}==== {msg} ===={RESET}\n");
}
