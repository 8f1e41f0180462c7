use crate::frame::Frame;
use crate::{Coords, TermInt};
use std::{io::{Stdout, Write, stdout}, time::Duration};

use crossterm::{cursor, execute, queue, style, terminal, Result};
use crossterm::style::{Color, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, read, poll};

pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
}

impl TermManager {
    pub fn new() -> Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(TermManager { width, height, stdout: stdout() })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)?;
        self.clear()
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, style::ResetColor, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
    }

    pub fn read_key_blocking(&self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                return Ok(ev);
            }
        }
    }

    /// Never waits: `None` when no key press is pending.
    pub fn poll_key(&self) -> Result<Option<KeyEvent>> {
        while poll(Duration::from_millis(0))? {
            if let Event::Key(ev) = read()? {
                return Ok(Some(ev));
            }
        }

        Ok(None)
    }

    pub fn get_terminal_size(&self) -> Coords {
        (self.width, self.height)
    }

    pub fn draw(&mut self, frame: &Frame) -> Result<()> {
        let mut colors: Option<(Color, Color)> = None;

        for (y, row) in frame.rows().enumerate().take(self.height as usize) {
            queue!(self.stdout, cursor::MoveTo(0, y as TermInt))?;

            for cell in row.iter().take(self.width as usize) {
                // Only emit color changes, most of a frame is runs of the same cell
                if colors != Some((cell.fg, cell.bg)) {
                    queue!(self.stdout, SetForegroundColor(cell.fg), SetBackgroundColor(cell.bg))?;
                    colors = Some((cell.fg, cell.bg));
                }
                queue!(self.stdout, style::Print(cell.ch))?;
            }
        }

        queue!(self.stdout, style::ResetColor)?;
        self.flush()
    }

    pub fn clear(&mut self) -> Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All))
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stdout.flush()?;
        Ok(())
    }
}
