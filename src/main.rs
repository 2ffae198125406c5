//! cosmos-tui - browse a JSON, YAML or CSV dataset in a sortable table
//!
//! Usage: `cosmos-tui [DATA_FILE]`

use anyhow::Result;
use cosmos_tui::action::Action;
use cosmos_tui::app::App;
use cosmos_tui::component::Component;
use cosmos_tui::config::Config;
use cosmos_tui::logging;
use cosmos_tui::tui::Tui;
use crossterm::event::Event;
use std::path::PathBuf;
use std::time::Duration;

fn main() -> Result<()> {
    let (config, first_run) = match Config::load() {
        Some(config) => (config, false),
        None => (Config::default(), true),
    };
    if let Err(err) = logging::init(&config) {
        eprintln!("Warning: logging disabled: {:#}", err);
    }

    // Leave an editable config behind on first run
    if first_run {
        match config.save() {
            Ok(path) => tracing::info!(path = %path.display(), "wrote default config"),
            Err(err) => tracing::warn!(error = %format!("{err:#}"), "could not write default config"),
        }
    }

    let data_path = std::env::args().nth(1).map(PathBuf::from);
    let mut app = App::new(config, data_path)?;

    // Setup terminal
    let mut tui = Tui::new()?.with_tick_rate(Duration::from_millis(100));
    tui.enter()?;

    // Main event loop
    let result = run_app(&mut tui, &mut app);

    // Cleanup terminal
    tui.exit()?;

    if let Err(err) = result {
        tracing::error!(error = %format!("{err:#}"), "browser failed");
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        let mut draw_result = Ok(());
        tui.draw(|frame| {
            draw_result = app.draw(frame, frame.area());
        })?;
        draw_result?;

        let action = match tui.next_event()? {
            Some(Event::Key(key)) => app.handle_key_event(key)?,
            Some(Event::Mouse(mouse)) => app.handle_mouse_event(mouse)?,
            Some(Event::Resize(w, h)) => Some(Action::Resize(w, h)),
            Some(_) => None,
            // No event - send a tick for time-based updates
            None => Some(Action::Tick),
        };

        match action {
            Some(action) => app.dispatch(action)?,
            // Mouse clicks on buttons only queue work
            None if !app.queue.is_empty() => app.dispatch(Action::Tick)?,
            None => {}
        }
    }

    Ok(())
}
