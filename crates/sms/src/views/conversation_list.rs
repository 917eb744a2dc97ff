//! Conversation list view - summaries, client-side filter and active row

use chrono::{DateTime, Local, Utc};

use crate::models::{ConversationId, ConversationSummary};

/// Preview shown for conversations without messages
const EMPTY_PREVIEW: &str = "No messages yet.";

/// One rendered row of the list
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationRow {
    pub summary: ConversationSummary,
    /// Marked as the selected conversation
    pub active: bool,
    /// False when hidden by the search filter
    pub visible: bool,
}

impl ConversationRow {
    /// Preview text as displayed
    pub fn preview(&self) -> &str {
        match self.summary.preview() {
            "" => EMPTY_PREVIEW,
            body => body,
        }
    }

    fn matches(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.summary.contact_name.to_lowercase().contains(needle)
            || self.preview().to_lowercase().contains(needle)
    }
}

/// List of conversation summaries
///
/// Every render replaces all rows; nothing is patched in place. Filtering
/// only toggles visibility and never touches the network.
#[derive(Debug, Default)]
pub struct ConversationListView {
    rows: Vec<ConversationRow>,
    /// Lowercased search term
    filter: String,
    error_message: Option<String>,
}

impl ConversationListView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the list with `summaries`, in server order
    pub fn render(
        &mut self,
        summaries: Vec<ConversationSummary>,
        current: Option<&ConversationId>,
    ) {
        self.error_message = None;
        self.rows = summaries
            .into_iter()
            .map(|summary| {
                let active = current == Some(&summary.id);
                let mut row = ConversationRow {
                    summary,
                    active,
                    visible: true,
                };
                row.visible = row.matches(&self.filter);
                row
            })
            .collect();
    }

    /// Replace the list with an error placeholder
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.rows.clear();
        self.error_message = Some(message.into());
    }

    /// Move the active marker to `id`
    pub fn set_active(&mut self, id: &ConversationId) {
        for row in &mut self.rows {
            row.active = &row.summary.id == id;
        }
    }

    /// Hide rows whose name and preview both miss `term` (case-insensitive)
    pub fn filter(&mut self, term: &str) {
        self.filter = term.to_lowercase();
        for row in &mut self.rows {
            row.visible = row.matches(&self.filter);
        }
    }

    pub fn rows(&self) -> &[ConversationRow] {
        &self.rows
    }

    pub fn visible_rows(&self) -> impl Iterator<Item = &ConversationRow> {
        self.rows.iter().filter(|row| row.visible)
    }

    /// Conversation at a position among the visible rows
    pub fn visible_at(&self, index: usize) -> Option<&ConversationId> {
        self.visible_rows().nth(index).map(|row| &row.summary.id)
    }

    pub fn active(&self) -> Option<&ConversationId> {
        self.rows.iter().find(|row| row.active).map(|row| &row.summary.id)
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Text rendering of the visible rows, numbered for selection
    pub fn to_lines(&self) -> Vec<String> {
        if let Some(error) = &self.error_message {
            return vec![format!("! {}", error)];
        }

        let mut lines = Vec::new();
        for (index, row) in self.visible_rows().enumerate() {
            let marker = if row.active { '>' } else { ' ' };
            let time = row
                .summary
                .last_message_time
                .map(format_time)
                .unwrap_or_default();
            let unread = if row.summary.has_unread() {
                format!(" ● {}", row.summary.unread_count)
            } else {
                String::new()
            };
            lines.push(format!(
                "{}{:>3}. {:<24} {:>6}{}",
                marker, index, row.summary.contact_name, time, unread
            ));
            lines.push(format!("       {}", row.preview()));
        }
        lines
    }
}

/// Today: time of day; this week: weekday; older: month and day
fn format_time(at: DateTime<Utc>) -> String {
    let local = at.with_timezone(&Local);
    let now = Utc::now().with_timezone(&Local);

    if local.date_naive() == now.date_naive() {
        local.format("%H:%M").to_string()
    } else if (now - local).num_days() < 7 {
        local.format("%a").to_string()
    } else {
        local.format("%b %d").to_string()
    }
}
