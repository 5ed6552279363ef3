use crate::journal_entry::{JournalEntry, MoodFilter, NewJournalEntry};
use crate::storage::Storage;

/// The authoritative in-memory journal: the entry list plus the current
/// filter and search criteria. Every mutation saves the whole collection
/// through the owned [`Storage`] before returning; criteria changes do not.
pub struct JournalState {
    entries: Vec<JournalEntry>,
    filter: MoodFilter,
    search: String,
    storage: Storage,
}

impl JournalState {
    pub fn load(storage: Storage) -> Self {
        JournalState {
            entries: storage.load(),
            filter: MoodFilter::All,
            search: String::new(),
            storage,
        }
    }

    /// Stamps a fresh id and timestamp, appends and saves. Always succeeds;
    /// the payload is already validated by the presentation boundary.
    pub fn add_entry(&mut self, payload: NewJournalEntry) -> &JournalEntry {
        self.entries.push(JournalEntry::new(payload));
        self.storage.save(&self.entries);
        self.entries.last().expect("entry was just pushed")
    }

    /// Replaces title/content/mood in place, keeping id and timestamp.
    /// Returns false and changes nothing when no entry has this id.
    pub fn update_entry(&mut self, id: &str, payload: NewJournalEntry) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        entry.title = payload.title;
        entry.content = payload.content;
        entry.mood = payload.mood;
        self.storage.save(&self.entries);
        true
    }

    /// Removes exactly one entry and saves. Returns false and changes nothing
    /// when no entry has this id.
    pub fn delete_entry(&mut self, id: &str) -> bool {
        let Some(at) = self.entries.iter().position(|e| e.id == id) else {
            return false;
        };
        self.entries.remove(at);
        self.storage.save(&self.entries);
        true
    }

    pub fn find_entry(&self, id: &str) -> Option<&JournalEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn filter(&self) -> MoodFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: MoodFilter) {
        self.filter = filter;
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, search: String) {
        self.search = search;
    }

    /// Pure query over the collection: mood must match the filter and the
    /// search text must occur (case-insensitively) in title or content.
    /// Preserves relative order.
    pub fn query(&self, filter: MoodFilter, search: &str) -> Vec<&JournalEntry> {
        let needle = search.to_lowercase();
        self.entries
            .iter()
            .filter(|e| filter.matches(e.mood))
            .filter(|e| {
                needle.is_empty()
                    || e.title.to_lowercase().contains(&needle)
                    || e.content.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Current query result in display order: newest first.
    pub fn visible_entries(&self) -> Vec<JournalEntry> {
        let mut visible: Vec<JournalEntry> = self
            .query(self.filter, &self.search)
            .into_iter()
            .cloned()
            .collect();
        visible.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        visible
    }
}
