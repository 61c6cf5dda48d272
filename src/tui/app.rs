//! Main dashboard application.
//!
//! One cooperative loop drives the draw pass and the scheduler tick in
//! strict alternation. Collectors run synchronously inside the loop; the
//! external command timeout bounds how long a refresh can block it.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::collector::{Collector, CommandRunner, FileSystem, NetQuery};
use crate::config::{Config, Sentinels};
use crate::render::{publish_host, publish_modem, publish_network};
use crate::sched::RefreshScheduler;

use super::render::render;
use super::state::PanelState;

/// Nominal scheduler tick. The event poll doubles as the tick sleep, so
/// with the default fast period of 200 ticks the host panel refreshes
/// about once per second.
const TICK_INTERVAL: Duration = Duration::from_millis(5);

/// Main dashboard application.
pub struct App<F: FileSystem, N: NetQuery, R: CommandRunner + Clone> {
    collector: Collector<F, N, R>,
    scheduler: RefreshScheduler,
    state: PanelState,
    sentinels: Sentinels,
    should_quit: bool,
}

impl<F: FileSystem, N: NetQuery, R: CommandRunner + Clone> App<F, N, R> {
    /// Creates the app around an assembled collector.
    pub fn new(collector: Collector<F, N, R>, config: &Config) -> Self {
        Self {
            collector,
            scheduler: RefreshScheduler::new(config.fast_period, config.slow_period),
            state: PanelState::new(),
            sentinels: config.sentinels.clone(),
            should_quit: false,
        }
    }

    /// Runs the dashboard until `q`, Esc, or Ctrl-C.
    pub fn run(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Initial fetch of both cycles so the first frame is populated.
        self.refresh_fast();
        self.refresh_modem();

        let mut dirty = true;
        loop {
            if dirty {
                terminal.draw(|frame| render(frame, &self.state))?;
                dirty = false;
            }

            if event::poll(TICK_INTERVAL)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            self.should_quit = true;
                        }
                        _ => {}
                    },
                    Event::Resize(_, _) => dirty = true,
                    _ => {}
                }
            }

            let fired = self.scheduler.tick();
            if fired.fast {
                self.refresh_fast();
                dirty = true;
            }
            if fired.slow {
                self.refresh_modem();
                dirty = true;
            }

            if self.should_quit {
                break;
            }
        }

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        Ok(())
    }

    fn refresh_fast(&mut self) {
        let host = self.collector.collect_host();
        let network = self.collector.collect_network();
        publish_host(&mut self.state, &host, &self.sentinels);
        publish_network(&mut self.state, &network, &self.sentinels);
    }

    fn refresh_modem(&mut self) {
        let modem = self.collector.collect_modem();
        publish_modem(&mut self.state, &modem, &self.sentinels);
    }
}
