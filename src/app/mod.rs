use std::io::{stdout, Stdout};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::game::{Command, Session};
use crate::ui::draw_game;

type Term = Terminal<CrosstermBackend<Stdout>>;

pub fn run() -> Result<()> {
    let mut tui = TuiGuard::new()?;
    run_loop(tui.terminal_mut())
}

fn run_loop(terminal: &mut Term) -> Result<()> {
    let mut session = Session::new();
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| draw_game(frame, &session))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                    break;
                }
                if let Some(command) = map_key(key.code) {
                    session.on_command(command);
                }
            }
        }

        // One logical timer. Re-reading the interval every pass means a
        // level change reschedules at the next decision point, and game
        // over cancels ticking for good.
        if !session.is_over() && last_tick.elapsed() >= session.tick_interval() {
            session.on_tick();
            last_tick = Instant::now();
        }
    }
    Ok(())
}

// Arrows or WASD; space drops.
fn map_key(code: KeyCode) -> Option<Command> {
    match code {
        KeyCode::Left | KeyCode::Char('a') => Some(Command::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') => Some(Command::MoveRight),
        KeyCode::Down | KeyCode::Char('s') => Some(Command::RotateRight),
        KeyCode::Up | KeyCode::Char('w') => Some(Command::RotateLeft),
        KeyCode::Char(' ') => Some(Command::HardDrop),
        _ => None,
    }
}

struct TuiGuard {
    terminal: Term,
}

impl TuiGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.hide_cursor()?;
        Ok(Self { terminal })
    }

    fn terminal_mut(&mut self) -> &mut Term {
        &mut self.terminal
    }
}

impl Drop for TuiGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}
