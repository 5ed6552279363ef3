//! A single-user mood journal for the terminal: short text entries tagged
//! with a mood, persisted as one JSON file, with filtering and full-text
//! search over titles and content.

pub mod app;
pub mod journal_entry;
pub mod journal_state;
pub mod logging;
pub mod storage;
pub mod ui;

pub use app::{App, Command, DraftError, NoticeKind, Presenter};
pub use journal_entry::{JournalEntry, Mood, MoodFilter, NewJournalEntry};
pub use journal_state::JournalState;
pub use storage::{Storage, STORAGE_FILE};
