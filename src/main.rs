use color_eyre::Result;
use mood_journal::ui::UI;
use mood_journal::{logging, App, JournalState, Storage};

fn main() -> Result<()> {
    color_eyre::install()?;
    let _logger = logging::init()?;

    let state = JournalState::load(Storage::default_location());
    let ui = UI::new()?;

    App::new(state, ui).run()
}
