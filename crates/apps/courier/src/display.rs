//! Terminal output for the console views
//!
//! Views go to stdout; logs go to stderr through env_logger.

use sms::{Console, Feedback, Form, Notifier, RealtimeEvent};

const THREAD_WIDTH: usize = 60;

/// Alerts printed as a highlighted block
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn alert(&self, message: &str) {
        println!("┌─ alert");
        for line in message.lines() {
            println!("│ {}", line);
        }
        println!("└─");
    }
}

fn section(title: &str, lines: Vec<String>) {
    println!("== {} ==", title);
    for line in lines {
        println!("{}", line);
    }
}

pub fn conversations(console: &Console) {
    let lines = console.conversations().to_lines();
    if lines.is_empty() {
        section("Conversations", vec!["(none)".to_string()]);
    } else {
        section("Conversations", lines);
    }
}

pub fn thread(console: &Console) {
    let title = match console.thread().conversation() {
        Some(id) => format!("Conversation {}", id),
        None => "No conversation open".to_string(),
    };
    section(&title, console.thread().to_lines(THREAD_WIDTH));
}

pub fn composer(console: &Console) {
    let composer = console.composer();
    if !composer.is_open() {
        println!("Bulk composer closed");
        return;
    }

    let mut lines = composer.to_lines();
    if !composer.sheets().is_empty() {
        lines.push("Sheets:".to_string());
        for sheet in composer.sheets() {
            lines.push(format!("  {}  {}", sheet.id, sheet.name));
        }
    }
    lines.push(format!("Template: {}", composer.template()));
    section("Bulk SMS", lines);
}

pub fn settings_feedback(console: &Console, form: Form) {
    match console.settings().feedback(form) {
        Feedback::Idle => {}
        Feedback::Pending(text) | Feedback::Success(text) => println!("[{:?}] {}", form, text),
        Feedback::Failure(text) => println!("[{:?}] error: {}", form, text),
    }
}

pub fn help() {
    section("Commands", crate::input::help::lines());
}

/// Panes to reprint once a realtime event has been applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Redraw {
    pub conversations: bool,
    pub thread: bool,
}

impl Redraw {
    pub fn after(event: &RealtimeEvent) -> Self {
        match event {
            RealtimeEvent::NewMessage(_) => Self {
                conversations: true,
                thread: true,
            },
            RealtimeEvent::ConversationUpdate(_) => Self {
                conversations: true,
                thread: false,
            },
            _ => Self::default(),
        }
    }

    pub fn print(self, console: &Console) {
        if self.conversations {
            conversations(console);
        }
        if self.thread {
            thread(console);
        }
    }
}
