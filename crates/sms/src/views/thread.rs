//! Thread view - ordered messages of the selected conversation

use chrono::Local;

use crate::models::{ConversationId, Message, Sender};

/// Message pane for the active conversation
///
/// `render` replaces the pane; `append` adds pushed messages without
/// re-rendering. Both leave the pane scrolled to the newest message.
#[derive(Debug, Default)]
pub struct ThreadView {
    conversation: Option<ConversationId>,
    messages: Vec<Message>,
    /// Index of the message at the bottom of the viewport
    scroll_position: usize,
    /// Number of full renders, so appends can be told apart
    render_count: usize,
    error_message: Option<String>,
}

impl ThreadView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the pane with `messages` for `conversation`
    pub fn render(&mut self, conversation: ConversationId, messages: Vec<Message>) {
        self.conversation = Some(conversation);
        self.messages = messages;
        self.error_message = None;
        self.render_count += 1;
        self.scroll_to_bottom();
    }

    /// Add a pushed message at the end of the pane
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
        self.scroll_to_bottom();
    }

    /// Replace the pane with an error placeholder
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.messages.clear();
        self.scroll_position = 0;
        self.error_message = Some(message.into());
    }

    pub fn conversation(&self) -> Option<&ConversationId> {
        self.conversation.as_ref()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn render_count(&self) -> usize {
        self.render_count
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn is_scrolled_to_bottom(&self) -> bool {
        self.scroll_position == self.messages.len().saturating_sub(1)
    }

    fn scroll_to_bottom(&mut self) {
        self.scroll_position = self.messages.len().saturating_sub(1);
    }

    /// Text rendering: sent messages right-aligned, received left-aligned
    pub fn to_lines(&self, width: usize) -> Vec<String> {
        if let Some(error) = &self.error_message {
            return vec![format!("! {}", error)];
        }

        let mut lines = Vec::with_capacity(self.messages.len() * 2);
        for message in &self.messages {
            let stamp = message
                .timestamp
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M")
                .to_string();
            match message.sender {
                Sender::User => {
                    lines.push(format!("{:>width$}", message.body, width = width));
                    lines.push(format!("{:>width$}", stamp, width = width));
                }
                Sender::Contact => {
                    lines.push(message.body.clone());
                    lines.push(stamp);
                }
            }
        }
        lines
    }
}
