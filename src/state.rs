use std::time::Duration;

use log::{debug, info};
use rand::{rngs::StdRng, Rng};

use crate::cave::CaveMap;

pub const MAX_LEVEL: u32 = 10;
pub const PLAYER_START_Y: i32 = 10;

const VERTICAL_STEP: i32 = 2;
const HORIZONTAL_STEP: i32 = 4;
const BASE_DELAY_MS: u64 = 20;
const LEVEL_DELAY_MS: u64 = 10;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Active,
    Paused,
    GameOver,
}

/// One game, from the first row to the crash. `GameOver` is final: a new game
/// means a new `GameState`.
pub struct GameState<R = StdRng> {
    width: i32,
    height: i32,
    status: Status,
    level: u32,
    depth: u64,
    player_x: i32,
    player_y: i32,
    cave: CaveMap<R>,
}

impl<R: Rng> GameState<R> {
    pub fn new(width: i32, height: i32, rng: R) -> Self {
        Self::with_cave(CaveMap::generate(width, height, rng))
    }

    pub fn with_cave(cave: CaveMap<R>) -> Self {
        let width = cave.screen_width();
        let height = cave.len() as i32;
        let player_y = PLAYER_START_Y.min(height - 1).max(0);
        let player_x = match cave.row(player_y as usize) {
            Some(row) => row.left + (row.right - row.left) / 2,
            None => width / 2,
        };

        GameState {
            width,
            height,
            status: Status::Active,
            level: 1,
            depth: 0,
            player_x,
            player_y,
            cave,
        }
    }

    /// One tick: crash if the player is outside the open span of its row,
    /// otherwise move the cave along.
    pub fn animate(&mut self) {
        if self.status != Status::Active {
            return;
        }

        if self.is_collision() {
            self.status = Status::GameOver;
            info!("Crashed at depth {} on level {}", self.depth, self.level);
        } else {
            self.cave.scroll();
            self.depth += 1;
        }
    }
}

impl<R> GameState<R> {
    pub fn move_up(&mut self) {
        if self.status == Status::Active {
            self.player_y = (self.player_y - VERTICAL_STEP).max(0);
        }
    }

    pub fn move_down(&mut self) {
        if self.status == Status::Active {
            self.player_y = (self.player_y + VERTICAL_STEP).min(self.height - 1).max(0);
        }
    }

    pub fn move_left(&mut self) {
        if self.status == Status::Active {
            self.player_x = (self.player_x - HORIZONTAL_STEP).max(0);
        }
    }

    pub fn move_right(&mut self) {
        if self.status == Status::Active {
            self.player_x = (self.player_x + HORIZONTAL_STEP).min(self.width);
        }
    }

    pub fn toggle_pause(&mut self) {
        self.status = match self.status {
            Status::Active => Status::Paused,
            Status::Paused => Status::Active,
            Status::GameOver => return,
        };
        debug!("Pause toggled, now {:?}", self.status);
    }

    /// Driven by the level timer, whatever the game is doing.
    pub fn increment_level(&mut self) {
        if self.level < MAX_LEVEL {
            self.level += 1;
            debug!("Level up to {}", self.level);
        }
    }

    /// The whole difficulty ramp: 110ms on level 1 down to 20ms on the last level.
    pub fn animation_loop_delay(&self) -> Duration {
        Duration::from_millis(BASE_DELAY_MS + (MAX_LEVEL - self.level) as u64 * LEVEL_DELAY_MS)
    }

    pub fn is_collision(&self) -> bool {
        match self.cave.row(self.player_y as usize) {
            Some(row) => !row.contains(self.player_x),
            None => true,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status == Status::GameOver
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn depth(&self) -> u64 {
        self.depth
    }

    pub fn player(&self) -> (i32, i32) {
        (self.player_x, self.player_y)
    }

    pub fn screen_size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    pub fn cave(&self) -> &CaveMap<R> {
        &self.cave
    }
}
