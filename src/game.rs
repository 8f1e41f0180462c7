use std::{thread::sleep, time::{Duration, Instant}};

use crate::frame::{Frame, HUD_COLOR};
use crate::state::GameState;
use crate::term::TermManager;

use anyhow::{bail, Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::info;
use rand::{rngs::StdRng, Rng, SeedableRng};

const LEVEL_DURATION: Duration = Duration::from_secs(10);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    TogglePause,
    NewGame,
    Quit,
}

enum Outcome {
    NewGame,
    Quit,
}

pub struct CaveGame {
    width: i32,
    height: i32,
    term: TermManager,
    rng: StdRng,
}

impl CaveGame {
    pub fn new(seed: u64) -> Result<Self> {
        let term = TermManager::new().context("Error reading terminal size")?;
        let (w, h) = term.get_terminal_size();

        if w == 0 || h == 0 {
            bail!("Terminal reports an unusable size of {}x{}", w, h);
        }

        info!("Terminal is {}x{}, seed {}", w, h, seed);
        Ok(CaveGame { width: w as i32, height: h as i32, term, rng: StdRng::seed_from_u64(seed) })
    }

    pub fn initialize(&mut self) -> Result<()> {
        self.term.setup().context("Error setting up the terminal")
    }

    pub fn shutdown(&mut self) -> Result<()> {
        self.term.restore().context("Error restoring the terminal")
    }

    /// Runs games until the player quits.
    pub fn run(&mut self) -> Result<()> {
        if !self.show_intro()? {
            return Ok(());
        }

        loop {
            match self.play()? {
                Outcome::NewGame => continue,
                Outcome::Quit => {
                    info!("Quit");
                    return Ok(());
                }
            }
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn show_intro(&mut self) -> Result<bool> {
        let mut frame = Frame::blank(self.width as usize, self.height as usize);
        frame.show_message(&[
            "Arrow keys or WASD to fly",
            "P or Esc to pause",
            "Q or CTRL+C to quit",
            "",
            "Press any key to begin",
        ], HUD_COLOR);
        self.term.draw(&frame)?;

        let key = self.term.read_key_blocking()?;
        Ok(command_for(&key) != Some(Command::Quit))
    }

    /// One game. Each pass of the loop handles a key, or a level up, or
    /// failing both draws a frame and advances the cave.
    fn play(&mut self) -> Result<Outcome> {
        let mut state = GameState::new(self.width, self.height, StdRng::seed_from_u64(self.rng.gen()));
        let mut next_level_at = Instant::now() + LEVEL_DURATION;
        info!("New game");

        loop {
            if let Some(key) = self.term.poll_key()? {
                match command_for(&key) {
                    Some(Command::Quit) => return Ok(Outcome::Quit),
                    Some(Command::NewGame) if state.is_over() => return Ok(Outcome::NewGame),
                    Some(cmd) => apply(&mut state, cmd),
                    None => {}
                }
                continue;
            }

            if Instant::now() >= next_level_at {
                next_level_at += LEVEL_DURATION;
                state.increment_level();
                continue;
            }

            self.term.draw(&Frame::compose(&state))?;
            state.animate();
            sleep(state.animation_loop_delay());
        }
    }
}

pub fn command_for(ev: &KeyEvent) -> Option<Command> {
    if is_ctrl_c(ev) {
        return Some(Command::Quit);
    }

    match ev.code {
        KeyCode::Char('w') | KeyCode::Up => Some(Command::MoveUp),
        KeyCode::Char('a') | KeyCode::Left => Some(Command::MoveLeft),
        KeyCode::Char('s') | KeyCode::Down => Some(Command::MoveDown),
        KeyCode::Char('d') | KeyCode::Right => Some(Command::MoveRight),
        KeyCode::Char('p') | KeyCode::Esc => Some(Command::TogglePause),
        KeyCode::Char('r') => Some(Command::NewGame),
        KeyCode::Char('q') => Some(Command::Quit),
        _ => None,
    }
}

/// Commands that only touch the game state. Quitting and new games are the
/// loop's business.
pub fn apply<R>(state: &mut GameState<R>, cmd: Command) {
    match cmd {
        Command::MoveLeft => state.move_left(),
        Command::MoveRight => state.move_right(),
        Command::MoveUp => state.move_up(),
        Command::MoveDown => state.move_down(),
        Command::TogglePause => state.toggle_pause(),
        Command::NewGame | Command::Quit => {}
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cave::{CaveMap, Row};
    use crate::state::Status;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent { code, modifiers: KeyModifiers::NONE }
    }

    fn state() -> GameState {
        GameState::with_cave(CaveMap::from_rows(vec![Row::new(25, 75); 20], 100, StdRng::seed_from_u64(4)))
    }

    #[test]
    fn arrows_and_wasd_move() {
        assert_eq!(command_for(&key(KeyCode::Left)), Some(Command::MoveLeft));
        assert_eq!(command_for(&key(KeyCode::Char('a'))), Some(Command::MoveLeft));
        assert_eq!(command_for(&key(KeyCode::Right)), Some(Command::MoveRight));
        assert_eq!(command_for(&key(KeyCode::Char('d'))), Some(Command::MoveRight));
        assert_eq!(command_for(&key(KeyCode::Up)), Some(Command::MoveUp));
        assert_eq!(command_for(&key(KeyCode::Char('w'))), Some(Command::MoveUp));
        assert_eq!(command_for(&key(KeyCode::Down)), Some(Command::MoveDown));
        assert_eq!(command_for(&key(KeyCode::Char('s'))), Some(Command::MoveDown));
    }

    #[test]
    fn pause_quit_and_new_game_keys() {
        assert_eq!(command_for(&key(KeyCode::Char('p'))), Some(Command::TogglePause));
        assert_eq!(command_for(&key(KeyCode::Esc)), Some(Command::TogglePause));
        assert_eq!(command_for(&key(KeyCode::Char('q'))), Some(Command::Quit));
        assert_eq!(command_for(&key(KeyCode::Char('r'))), Some(Command::NewGame));
        assert_eq!(
            command_for(&KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL }),
            Some(Command::Quit)
        );
        assert_eq!(command_for(&key(KeyCode::Char('c'))), None);
        assert_eq!(command_for(&key(KeyCode::Enter)), None);
    }

    #[test]
    fn commands_reach_the_state() {
        let mut state = state();

        apply(&mut state, Command::MoveLeft);
        apply(&mut state, Command::MoveUp);
        assert_eq!(state.player(), (46, 8));

        apply(&mut state, Command::MoveRight);
        apply(&mut state, Command::MoveDown);
        assert_eq!(state.player(), (50, 10));

        apply(&mut state, Command::TogglePause);
        assert_eq!(state.status(), Status::Paused);

        apply(&mut state, Command::NewGame);
        apply(&mut state, Command::Quit);
        assert_eq!(state.status(), Status::Paused);
        assert_eq!(state.player(), (50, 10));
    }
}
