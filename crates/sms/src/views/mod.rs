//! Headless views
//!
//! Plain state holders for the list and thread panes. They render to text
//! lines so any front end (terminal, tests) can display them.

mod conversation_list;
mod thread;

pub use conversation_list::{ConversationListView, ConversationRow};
pub use thread::ThreadView;
