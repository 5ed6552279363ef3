use crate::journal_entry::JournalEntry;
use log::{error, info};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Default location of the persisted journal, relative to the working
/// directory.
pub const STORAGE_FILE: &str = "journal_entries.json";

/// Persists the whole collection as one JSON array under a fixed path.
///
/// All faults are absorbed here: a load that cannot produce a well-formed
/// collection yields an empty one, and a failed save leaves the in-memory
/// state authoritative for the rest of the session. Neither surfaces an error
/// to the caller.
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Storage { path: path.into() }
    }

    pub fn default_location() -> Self {
        Storage::new(STORAGE_FILE)
    }

    /// Reads the stored collection. Absent file means a fresh journal; a blob
    /// that is not an array of entry-shaped records is rejected wholesale.
    pub fn load(&self) -> Vec<JournalEntry> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                error!(
                    "failed to read journal file {}: {err}",
                    self.path.display()
                );
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<JournalEntry>>(&raw) {
            Ok(entries) => {
                info!("loaded {} entries from {}", entries.len(), self.path.display());
                entries
            }
            Err(err) => {
                error!("stored data is not a journal entry array: {err}");
                Vec::new()
            }
        }
    }

    /// Replaces the stored blob with the full collection. Write failures are
    /// logged and swallowed; there is no retry.
    pub fn save(&self, entries: &[JournalEntry]) {
        let serialized = match serde_json::to_string(entries) {
            Ok(serialized) => serialized,
            Err(err) => {
                error!("failed to serialize journal entries: {err}");
                return;
            }
        };
        if let Err(err) = fs::write(&self.path, serialized) {
            error!(
                "failed to save journal entries to {}: {err}",
                self.path.display()
            );
        }
    }
}
