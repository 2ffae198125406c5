//! Terminal User Interface management
//!
//! Raw mode, the alternate screen, mouse capture and event polling around
//! ratatui's Terminal.

use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io::{self, Stdout},
    panic,
    time::Duration,
};

pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Polling timeout for events
    pub tick_rate: Duration,
    active: bool,
}

impl Tui {
    pub fn new() -> Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;
        Ok(Self {
            terminal,
            tick_rate: Duration::from_millis(100),
            active: false,
        })
    }

    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    /// Take over the terminal
    ///
    /// Also installs a panic hook that gives the terminal back before the
    /// panic message is printed.
    pub fn enter(&mut self) -> Result<()> {
        let default_hook = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let _ = restore();
            tracing::error!(panic = %info, "panicked");
            default_hook(info);
        }));

        terminal::enable_raw_mode()?;
        crossterm::execute!(
            io::stdout(),
            EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;
        self.terminal.clear()?;
        self.active = true;
        tracing::debug!("terminal entered");
        Ok(())
    }

    /// Give the terminal back. Safe to call more than once.
    pub fn exit(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        restore()?;
        self.active = false;
        tracing::debug!("terminal restored");
        Ok(())
    }

    /// Poll for the next event
    ///
    /// Returns `None` when the tick rate elapses without input. Key release
    /// events are dropped.
    pub fn next_event(&self) -> Result<Option<Event>> {
        if !event::poll(self.tick_rate)? {
            return Ok(None);
        }
        let event = event::read()?;
        if let Event::Key(key) = &event {
            if key.kind != KeyEventKind::Press {
                return Ok(None);
            }
        }
        Ok(Some(event))
    }

    pub fn draw<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        self.terminal.draw(f)?;
        Ok(())
    }
}

fn restore() -> Result<()> {
    terminal::disable_raw_mode()?;
    crossterm::execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        cursor::Show
    )?;
    Ok(())
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}
