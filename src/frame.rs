use crossterm::style::Color;

use crate::state::{GameState, Status};

pub const PLAYER_CHAR: char = 'Ÿ';
pub const PLAYER_COLOR: Color = Color::Red;
pub const WALL_COLOR: Color = Color::Blue;
pub const HUD_COLOR: Color = Color::Yellow;

const GAME_OVER_MSG: &str = "GAME OVER!";
const PAUSED_MSG: &str = "PAUSED";
const GAME_OVER_HINT: &str = "r: new game  q: quit";

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Cell {
    pub const BLANK: Cell = Cell { ch: ' ', fg: Color::Reset, bg: Color::Reset };
    pub const WALL: Cell = Cell { ch: ' ', fg: WALL_COLOR, bg: WALL_COLOR };
}

/// A full screen of cells, row-major. Writes outside the grid are dropped.
pub struct Frame {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Frame {
    pub fn blank(width: usize, height: usize) -> Self {
        Frame { width, height, cells: vec![Cell::BLANK; width * height] }
    }

    pub fn compose<R>(state: &GameState<R>) -> Self {
        let (width, height) = state.screen_size();
        let mut frame = Frame::blank(width.max(0) as usize, height.max(0) as usize);

        for (y, row) in state.cave().rows().enumerate().take(frame.height) {
            for x in 0..width {
                if row.is_wall(x) {
                    frame.set(x, y as i32, Cell::WALL);
                }
            }
        }

        let (px, py) = state.player();
        frame.set(px, py, Cell { ch: PLAYER_CHAR, fg: PLAYER_COLOR, bg: Color::Reset });

        frame.print(0, 0, &format!("Level: {}", state.level()), HUD_COLOR);
        frame.print(0, 1, &format!("Depth: {} meters", state.depth()), HUD_COLOR);

        match state.status() {
            Status::GameOver => frame.show_message(&[GAME_OVER_MSG, GAME_OVER_HINT], Color::Red),
            Status::Paused => frame.show_message(&[PAUSED_MSG], HUD_COLOR),
            Status::Active => {}
        }

        frame
    }

    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }

        self.cells[self.width * y as usize + x as usize] = cell;
    }

    pub fn print(&mut self, x: i32, y: i32, text: &str, fg: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.set(x + i as i32, y, Cell { ch, fg, bg: Color::Reset });
        }
    }

    /// Centered lines, the first one just above the middle of the screen.
    pub fn show_message(&mut self, lines: &[&str], fg: Color) {
        let center_x = self.width as i32 / 2;
        let top = self.height as i32 / 2 - 1;

        for (i, line) in lines.iter().enumerate() {
            let len = line.chars().count() as i32;
            self.print(center_x - len / 2, top + i as i32, line, fg);
        }
    }

    #[cfg(test)]
    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        if x >= self.width {
            return None;
        }

        self.cells.get(self.width * y + x).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1))
    }

    #[cfg(test)]
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cave::{CaveMap, Row};
    use rand::{rngs::StdRng, SeedableRng};

    fn state() -> GameState {
        let mut rows = vec![Row::new(25, 75); 20];
        rows[3] = Row::new(40, 60);
        GameState::with_cave(CaveMap::from_rows(rows, 100, StdRng::seed_from_u64(2)))
    }

    fn text_at(frame: &Frame, x: usize, y: usize, len: usize) -> String {
        (x..x + len).map(|x| frame.cell(x, y).unwrap().ch).collect()
    }

    #[test]
    fn walls_surround_the_open_span() {
        let frame = Frame::compose(&state());

        assert_eq!(frame.size(), (100, 20));
        assert_eq!(frame.cell(39, 3), Some(Cell::WALL));
        assert_eq!(frame.cell(40, 3), Some(Cell::BLANK));
        assert_eq!(frame.cell(60, 3), Some(Cell::BLANK));
        assert_eq!(frame.cell(61, 3), Some(Cell::WALL));
        assert_eq!(frame.cell(99, 3), Some(Cell::WALL));
        assert_eq!(frame.cell(24, 5), Some(Cell::WALL));
        assert_eq!(frame.cell(50, 5), Some(Cell::BLANK));
    }

    #[test]
    fn player_and_hud_are_drawn() {
        let frame = Frame::compose(&state());

        assert_eq!(frame.cell(50, 10).unwrap().ch, PLAYER_CHAR);
        assert_eq!(frame.cell(50, 10).unwrap().fg, PLAYER_COLOR);
        assert_eq!(text_at(&frame, 0, 0, 8), "Level: 1");
        assert_eq!(text_at(&frame, 0, 1, 15), "Depth: 0 meters");
    }

    #[test]
    fn no_message_while_active() {
        let frame = Frame::compose(&state());
        assert_eq!(text_at(&frame, 47, 9, 6), "      ");
    }

    #[test]
    fn paused_message_is_centered() {
        let mut state = state();
        state.toggle_pause();
        let frame = Frame::compose(&state);

        assert_eq!(text_at(&frame, 47, 9, 6), "PAUSED");
        assert_eq!(frame.cell(47, 9).unwrap().fg, HUD_COLOR);
    }

    #[test]
    fn game_over_message_and_hint() {
        let mut state = state();
        for _ in 0..7 {
            state.move_left();
        }
        state.animate();
        assert!(state.is_over());

        let frame = Frame::compose(&state);
        assert_eq!(text_at(&frame, 45, 9, 10), GAME_OVER_MSG);
        assert_eq!(text_at(&frame, 40, 10, 20), GAME_OVER_HINT);
    }

    #[test]
    fn off_screen_writes_are_dropped() {
        let mut frame = Frame::blank(4, 2);
        frame.set(-1, 0, Cell::WALL);
        frame.set(4, 0, Cell::WALL);
        frame.set(0, 2, Cell::WALL);
        frame.print(2, 1, "abc", HUD_COLOR);

        assert!(frame.rows().flatten().all(|c| *c != Cell::WALL));
        assert_eq!(frame.rows().count(), 2);
        assert_eq!(text_at(&frame, 0, 1, 4), "  ab");
    }
}
