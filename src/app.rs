use crate::journal_entry::{JournalEntry, MoodFilter, NewJournalEntry};
use crate::journal_state::JournalState;
use color_eyre::Result;
use log::info;
use std::fmt;

/// A user intent, produced by the presentation boundary one at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Submit,
    DiscardDraft,
    Delete(String),
    Edit(String),
    Filter(MoodFilter),
    Search(String),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

/// Structured rejection of a draft; reported to the user, never thrown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftError {
    EmptyTitle,
    EmptyContent,
    MissingMood,
}

impl fmt::Display for DraftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftError::EmptyTitle => write!(f, "Please give the entry a title"),
            DraftError::EmptyContent => write!(f, "Please write some content"),
            DraftError::MissingMood => write!(f, "Please pick a mood"),
        }
    }
}

/// Everything the orchestrator needs from a display surface. The terminal
/// implementation lives in [`crate::ui`]; tests substitute a scripted one.
pub trait Presenter {
    /// Shows the given entries (already filtered and sorted) together with
    /// the active criteria.
    fn render(&mut self, entries: &[JournalEntry], filter: MoodFilter, search: &str)
        -> Result<()>;

    /// Blocks for the next user intent; `None` means nothing happened yet
    /// (the caller re-renders so transient notices can expire).
    fn next_command(&mut self) -> Result<Option<Command>>;

    /// Reads and validates the current draft input.
    fn read_draft(&self) -> std::result::Result<NewJournalEntry, DraftError>;

    fn populate_draft(&mut self, entry: &JournalEntry);

    fn clear_draft(&mut self);

    fn notify(&mut self, message: &str, kind: NoticeKind);

    /// Blocking yes/no decision, injected so tests can take either branch.
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

/// Wires user commands to the entry store and triggers re-presentation.
/// Each command is a single atomic transition.
pub struct App<P: Presenter> {
    state: JournalState,
    presenter: P,
    /// Id of the entry currently being edited, if any. Submit replaces that
    /// entry's mutable fields in place instead of creating a new one.
    editing: Option<String>,
}

impl<P: Presenter> App<P> {
    pub fn new(state: JournalState, presenter: P) -> Self {
        App {
            state,
            presenter,
            editing: None,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        loop {
            self.render()?;
            match self.presenter.next_command()? {
                Some(Command::Quit) => break,
                Some(command) => self.handle(command)?,
                None => {}
            }
        }
        Ok(())
    }

    pub fn handle(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Submit => self.submit(),
            Command::DiscardDraft => {
                self.editing = None;
                self.presenter.clear_draft();
            }
            Command::Delete(id) => self.delete(&id)?,
            Command::Edit(id) => self.edit(&id),
            Command::Filter(filter) => self.state.set_filter(filter),
            Command::Search(text) => self.state.set_search(text),
            Command::Quit => {}
        }
        Ok(())
    }

    fn submit(&mut self) {
        let payload = match self.presenter.read_draft() {
            Ok(payload) => payload,
            Err(err) => {
                self.presenter.notify(&err.to_string(), NoticeKind::Error);
                return;
            }
        };

        match self.editing.take() {
            Some(id) => {
                if self.state.update_entry(&id, payload) {
                    info!("updated entry {id}");
                    self.presenter.notify("Entry updated", NoticeKind::Success);
                } else {
                    self.presenter.notify("Entry not found", NoticeKind::Error);
                }
            }
            None => {
                let id = self.state.add_entry(payload).id.clone();
                info!("added entry {id}");
                self.presenter.notify("Entry saved", NoticeKind::Success);
            }
        }
        self.presenter.clear_draft();
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        if !self.presenter.confirm("Delete this entry?")? {
            return Ok(());
        }
        if self.state.delete_entry(id) {
            info!("deleted entry {id}");
            self.presenter.notify("Entry deleted", NoticeKind::Success);
        } else {
            self.presenter.notify("Entry not found", NoticeKind::Error);
        }
        Ok(())
    }

    fn edit(&mut self, id: &str) {
        let Some(entry) = self.state.find_entry(id).cloned() else {
            self.presenter.notify("Entry not found", NoticeKind::Error);
            return;
        };
        self.presenter.populate_draft(&entry);
        self.editing = Some(id.to_string());
        self.presenter
            .notify("Edit the entry and save again", NoticeKind::Info);
    }

    fn render(&mut self) -> Result<()> {
        let visible = self.state.visible_entries();
        self.presenter
            .render(&visible, self.state.filter(), self.state.search())
    }

    pub fn state(&self) -> &JournalState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal_entry::Mood;
    use crate::storage::Storage;
    use tempfile::{tempdir, TempDir};

    /// Scripted stand-in for the terminal UI: the draft and the confirm
    /// answer are fixed up front, notifications and draft calls recorded.
    struct ScriptedPresenter {
        draft: std::result::Result<NewJournalEntry, DraftError>,
        confirm_answer: bool,
        confirms: Vec<String>,
        notices: Vec<(String, NoticeKind)>,
        populated: Option<JournalEntry>,
        draft_cleared: usize,
    }

    impl ScriptedPresenter {
        fn with_draft(draft: std::result::Result<NewJournalEntry, DraftError>) -> Self {
            ScriptedPresenter {
                draft,
                confirm_answer: true,
                confirms: Vec::new(),
                notices: Vec::new(),
                populated: None,
                draft_cleared: 0,
            }
        }

        fn last_notice(&self) -> &(String, NoticeKind) {
            self.notices.last().expect("a notification was emitted")
        }
    }

    impl Presenter for ScriptedPresenter {
        fn render(
            &mut self,
            _entries: &[JournalEntry],
            _filter: MoodFilter,
            _search: &str,
        ) -> Result<()> {
            Ok(())
        }

        fn next_command(&mut self) -> Result<Option<Command>> {
            Ok(None)
        }

        fn read_draft(&self) -> std::result::Result<NewJournalEntry, DraftError> {
            self.draft.clone()
        }

        fn populate_draft(&mut self, entry: &JournalEntry) {
            self.populated = Some(entry.clone());
        }

        fn clear_draft(&mut self) {
            self.draft_cleared += 1;
        }

        fn notify(&mut self, message: &str, kind: NoticeKind) {
            self.notices.push((message.to_string(), kind));
        }

        fn confirm(&mut self, prompt: &str) -> Result<bool> {
            self.confirms.push(prompt.to_string());
            Ok(self.confirm_answer)
        }
    }

    fn payload(title: &str, content: &str, mood: Mood) -> NewJournalEntry {
        NewJournalEntry {
            title: title.to_string(),
            content: content.to_string(),
            mood,
        }
    }

    fn scratch_app(
        presenter: ScriptedPresenter,
    ) -> (App<ScriptedPresenter>, TempDir) {
        let dir = tempdir().unwrap();
        let state = JournalState::load(Storage::new(dir.path().join("journal.json")));
        (App::new(state, presenter), dir)
    }

    #[test]
    fn submit_valid_draft_adds_entry_and_clears_draft() {
        let presenter =
            ScriptedPresenter::with_draft(Ok(payload("A", "B", Mood::Happy)));
        let (mut app, _dir) = scratch_app(presenter);

        app.handle(Command::Submit).unwrap();

        assert_eq!(app.state().entries().len(), 1);
        assert_eq!(app.presenter.draft_cleared, 1);
        assert_eq!(
            app.presenter.last_notice(),
            &("Entry saved".to_string(), NoticeKind::Success)
        );
    }

    #[test]
    fn submit_invalid_draft_reports_error_and_changes_nothing() {
        let presenter = ScriptedPresenter::with_draft(Err(DraftError::EmptyTitle));
        let (mut app, _dir) = scratch_app(presenter);

        app.handle(Command::Submit).unwrap();

        assert!(app.state().entries().is_empty());
        assert_eq!(app.presenter.draft_cleared, 0);
        assert_eq!(app.presenter.last_notice().1, NoticeKind::Error);
    }

    #[test]
    fn confirmed_delete_removes_the_entry() {
        let presenter =
            ScriptedPresenter::with_draft(Ok(payload("A", "B", Mood::Happy)));
        let (mut app, _dir) = scratch_app(presenter);
        app.handle(Command::Submit).unwrap();
        let id = app.state().entries()[0].id.clone();

        app.handle(Command::Delete(id)).unwrap();

        assert!(app.state().entries().is_empty());
        assert_eq!(app.presenter.confirms.len(), 1);
        assert_eq!(
            app.presenter.last_notice(),
            &("Entry deleted".to_string(), NoticeKind::Success)
        );
    }

    #[test]
    fn declined_delete_changes_nothing() {
        let mut presenter =
            ScriptedPresenter::with_draft(Ok(payload("A", "B", Mood::Happy)));
        presenter.confirm_answer = false;
        let (mut app, _dir) = scratch_app(presenter);
        app.handle(Command::Submit).unwrap();
        let id = app.state().entries()[0].id.clone();
        let notices_before = app.presenter.notices.len();

        app.handle(Command::Delete(id)).unwrap();

        assert_eq!(app.state().entries().len(), 1);
        assert_eq!(app.presenter.notices.len(), notices_before);
    }

    #[test]
    fn deleting_a_missing_id_reports_not_found() {
        let presenter =
            ScriptedPresenter::with_draft(Ok(payload("A", "B", Mood::Happy)));
        let (mut app, _dir) = scratch_app(presenter);
        app.handle(Command::Submit).unwrap();

        app.handle(Command::Delete("xyz".to_string())).unwrap();

        assert_eq!(app.state().entries().len(), 1);
        assert_eq!(
            app.presenter.last_notice(),
            &("Entry not found".to_string(), NoticeKind::Error)
        );
    }

    #[test]
    fn edit_populates_draft_and_submit_updates_in_place() {
        let presenter =
            ScriptedPresenter::with_draft(Ok(payload("Old", "old text", Mood::Sad)));
        let (mut app, _dir) = scratch_app(presenter);
        app.handle(Command::Submit).unwrap();
        let original = app.state().entries()[0].clone();

        app.handle(Command::Edit(original.id.clone())).unwrap();
        assert_eq!(
            app.presenter.populated.as_ref().map(|e| e.id.as_str()),
            Some(original.id.as_str())
        );
        assert_eq!(app.presenter.last_notice().1, NoticeKind::Info);

        app.presenter.draft = Ok(payload("New", "new text", Mood::Calm));
        app.handle(Command::Submit).unwrap();

        assert_eq!(app.state().entries().len(), 1);
        let updated = &app.state().entries()[0];
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.timestamp, original.timestamp);
        assert_eq!(updated.title, "New");
        assert_eq!(updated.mood, Mood::Calm);
        assert_eq!(
            app.presenter.last_notice(),
            &("Entry updated".to_string(), NoticeKind::Success)
        );
    }

    #[test]
    fn editing_a_missing_id_reports_not_found() {
        let presenter =
            ScriptedPresenter::with_draft(Ok(payload("A", "B", Mood::Happy)));
        let (mut app, _dir) = scratch_app(presenter);

        app.handle(Command::Edit("xyz".to_string())).unwrap();

        assert!(app.presenter.populated.is_none());
        assert_eq!(
            app.presenter.last_notice(),
            &("Entry not found".to_string(), NoticeKind::Error)
        );
    }

    #[test]
    fn discarding_an_edit_keeps_the_original_entry() {
        let presenter =
            ScriptedPresenter::with_draft(Ok(payload("Keep", "me", Mood::Happy)));
        let (mut app, _dir) = scratch_app(presenter);
        app.handle(Command::Submit).unwrap();
        let id = app.state().entries()[0].id.clone();

        app.handle(Command::Edit(id.clone())).unwrap();
        app.handle(Command::DiscardDraft).unwrap();

        assert!(app.state().find_entry(&id).is_some());
        assert!(app.editing.is_none());

        // A later submit creates a fresh entry rather than touching the old one.
        app.handle(Command::Submit).unwrap();
        assert_eq!(app.state().entries().len(), 2);
    }

    #[test]
    fn new_entry_after_a_failed_edit_submit_does_not_overwrite_the_old_one() {
        let presenter =
            ScriptedPresenter::with_draft(Ok(payload("Old", "original", Mood::Sad)));
        let (mut app, _dir) = scratch_app(presenter);
        app.handle(Command::Submit).unwrap();
        let id = app.state().entries()[0].id.clone();

        // Begin an edit, then fail its submit; the edit stays pending.
        app.handle(Command::Edit(id.clone())).unwrap();
        app.presenter.draft = Err(DraftError::EmptyTitle);
        app.handle(Command::Submit).unwrap();
        assert_eq!(app.presenter.last_notice().1, NoticeKind::Error);
        assert!(app.editing.is_some());

        // Starting a new entry discards the pending edit, so the fresh
        // submit must add a second entry, not replace the first in place.
        app.handle(Command::DiscardDraft).unwrap();
        app.presenter.draft = Ok(payload("Brand new", "fresh", Mood::Happy));
        app.handle(Command::Submit).unwrap();

        assert_eq!(app.state().entries().len(), 2);
        let original = app.state().find_entry(&id).expect("original entry intact");
        assert_eq!(original.title, "Old");
        assert_eq!(original.content, "original");
        assert_eq!(original.mood, Mood::Sad);
    }

    #[test]
    fn filter_and_search_commands_update_criteria() {
        let presenter =
            ScriptedPresenter::with_draft(Ok(payload("A", "B", Mood::Happy)));
        let (mut app, _dir) = scratch_app(presenter);

        app.handle(Command::Filter(MoodFilter::Mood(Mood::Stressed)))
            .unwrap();
        app.handle(Command::Search("beach".to_string())).unwrap();

        assert_eq!(app.state().filter(), MoodFilter::Mood(Mood::Stressed));
        assert_eq!(app.state().search(), "beach");
    }

    #[test]
    fn draft_errors_read_as_user_facing_messages() {
        assert_eq!(
            DraftError::EmptyTitle.to_string(),
            "Please give the entry a title"
        );
        assert_eq!(DraftError::MissingMood.to_string(), "Please pick a mood");
    }
}
