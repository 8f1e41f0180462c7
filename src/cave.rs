use std::collections::VecDeque;

use rand::Rng;
use Shift::*;

pub const MIN_STEP: i32 = 1;
pub const MAX_STEP: i32 = 6;
pub const START_CAVE_WIDTH: i32 = 50;
pub const MIN_CAVE_WIDTH: i32 = 50;

/// The open span of one screen line. Everything outside `left..=right` is wall.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Row {
    pub left: i32,
    pub right: i32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Shift {
    Stay,
    Left,
    Right,
}

impl Row {
    #[cfg(test)]
    pub fn new(left: i32, right: i32) -> Self {
        Row { left, right }
    }

    pub fn centered(screen_width: i32, width: i32) -> Self {
        Row { left: screen_width / 2 - width / 2, right: screen_width / 2 + width / 2 }
    }

    /// Strict containment: touching either bound is a crash.
    pub fn contains(&self, x: i32) -> bool {
        x > self.left && x < self.right
    }

    pub fn is_wall(&self, x: i32) -> bool {
        x < self.left || x > self.right
    }

    /// Moves both bounds by `offset`, then clamps them to the screen.
    /// The clamps run in a fixed order and each one sees the result of the
    /// previous, so near the screen edges the order decides the final left bound.
    pub fn shifted(self, offset: i32, screen_width: i32) -> Row {
        let mut left = self.left + offset;
        let mut right = self.right + offset;

        if left < 0 {
            left = 0;
        }

        if right < MIN_CAVE_WIDTH {
            right = MIN_CAVE_WIDTH;
        }

        if right > screen_width {
            right = screen_width;
        }

        if left > screen_width - MIN_CAVE_WIDTH {
            left = screen_width - MIN_CAVE_WIDTH;
        }

        Row { left, right }
    }

    #[cfg(test)]
    pub fn width(&self) -> i32 {
        self.right - self.left
    }
}

impl Shift {
    pub fn offset(self, step: i32) -> i32 {
        match self {
            Stay => 0,
            Left => -step,
            Right => step,
        }
    }
}

/// Random walk of the cave: a direction, then a step, then the clamp.
/// The step is drawn even when staying put.
pub fn next_row<R: Rng + ?Sized>(prev: Row, screen_width: i32, rng: &mut R) -> Row {
    let shift = match rng.gen_range(0..3) {
        0 => Stay,
        1 => Left,
        _ => Right,
    };
    let step = rng.gen_range(MIN_STEP..=MAX_STEP);

    prev.shifted(shift.offset(step), screen_width)
}

/// The visible slice of the cave, top row first. Its length never changes.
pub struct CaveMap<R> {
    rows: VecDeque<Row>,
    screen_width: i32,
    rng: R,
}

impl<R: Rng> CaveMap<R> {
    pub fn generate(screen_width: i32, screen_height: i32, mut rng: R) -> Self {
        let height = screen_height.max(0) as usize;
        let mut rows = VecDeque::with_capacity(height);
        let mut prev = Row::centered(screen_width, START_CAVE_WIDTH);

        for y in 0..height {
            if y > 0 {
                prev = next_row(prev, screen_width, &mut rng);
            }
            rows.push_back(prev);
        }

        CaveMap { rows, screen_width, rng }
    }

    #[cfg(test)]
    pub fn from_rows(rows: Vec<Row>, screen_width: i32, rng: R) -> Self {
        CaveMap { rows: rows.into(), screen_width, rng }
    }

    pub fn scroll(&mut self) {
        self.rows.pop_front();

        if let Some(&last) = self.rows.back() {
            let row = next_row(last, self.screen_width, &mut self.rng);
            self.rows.push_back(row);
        }
    }
}

impl<R> CaveMap<R> {
    pub fn row(&self, y: usize) -> Option<Row> {
        self.rows.get(y).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn screen_width(&self) -> i32 {
        self.screen_width
    }
}
