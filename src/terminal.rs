use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{poll, read, DisableMouseCapture, EnableMouseCapture, Event},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{
        disable_raw_mode, enable_raw_mode, size, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use std::fmt::Write as _;
use std::io::{self, stdout, Write};
use std::time::Duration;

/// Terminal abstraction for rendering
pub struct Terminal {
    width: u16,
    height: u16,
    buffer: Vec<Vec<Cell>>,
    alternate_screen: bool,
}

/// A single cell in the terminal buffer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Option<Color>,
}

impl Default for Cell {
    fn default() -> Self {
        Self { ch: ' ', fg: None }
    }
}

impl Terminal {
    /// Take over the real terminal (raw mode, alternate screen, mouse)
    pub fn new(alternate_screen: bool) -> io::Result<Self> {
        let (width, height) = size()?;

        if alternate_screen {
            enable_raw_mode()?;
            execute!(stdout(), EnterAlternateScreen, Hide, EnableMouseCapture)?;
        }

        Ok(Self::with_size(width, height, alternate_screen))
    }

    /// Off-screen buffer of a fixed size, for print mode and tests
    pub fn headless(width: u16, height: u16) -> Self {
        Self::with_size(width, height, false)
    }

    fn with_size(width: u16, height: u16, alternate_screen: bool) -> Self {
        Self {
            width,
            height,
            buffer: vec![vec![Cell::default(); width as usize]; height as usize],
            alternate_screen,
        }
    }

    /// Get terminal dimensions
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Reallocate the back buffer after the terminal changed size
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.buffer = vec![vec![Cell::default(); width as usize]; height as usize];
    }

    /// Clear the actual terminal
    pub fn clear_screen(&self) -> io::Result<()> {
        execute!(stdout(), Clear(ClearType::All))?;
        Ok(())
    }

    #[cfg(test)]
    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.buffer.get(y as usize)?.get(x as usize).copied()
    }

    /// Set a character at position with optional color
    pub fn set(&mut self, x: i32, y: i32, ch: char, fg: Option<Color>) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            self.buffer[y as usize][x as usize] = Cell { ch, fg };
        }
    }

    /// Set a string starting at position
    pub fn set_str(&mut self, x: i32, y: i32, s: &str, fg: Option<Color>) {
        for (i, ch) in s.chars().enumerate() {
            self.set(x + i as i32, y, ch, fg);
        }
    }

    /// Render the entire buffer to screen
    pub fn present(&self) -> io::Result<()> {
        let mut stdout = stdout().lock();
        let mut current: Option<Color> = None;

        for (y, row) in self.buffer.iter().enumerate() {
            queue!(stdout, MoveTo(0, y as u16))?;

            for cell in row {
                // Only emit a color change when it differs from the last cell
                if cell.fg != current {
                    match cell.fg {
                        Some(color) => queue!(stdout, SetForegroundColor(color))?,
                        None => queue!(stdout, ResetColor)?,
                    }
                    current = cell.fg;
                }
                queue!(stdout, Print(cell.ch))?;
            }
        }

        queue!(stdout, ResetColor)?;
        stdout.flush()?;
        Ok(())
    }

    /// Next pending input event without blocking
    pub fn poll_event(&self) -> io::Result<Option<Event>> {
        if poll(Duration::from_millis(0))? {
            return Ok(Some(read()?));
        }
        Ok(None)
    }

    /// Sleep for specified duration
    pub fn sleep(&self, seconds: f32) {
        std::thread::sleep(Duration::from_secs_f32(seconds));
    }

    /// Buffer contents as text with 24-bit ANSI colors
    pub fn to_ansi(&self) -> String {
        let mut out = String::new();
        for row in &self.buffer {
            for cell in row {
                match cell.fg {
                    Some(Color::Rgb { r, g, b }) if cell.ch != ' ' => {
                        let _ = write!(out, "\x1b[38;2;{};{};{}m{}\x1b[0m", r, g, b, cell.ch);
                    }
                    _ => out.push(cell.ch),
                }
            }
            out.push('\n');
        }
        out
    }

    /// Print buffer to stdout with ANSI colors (for print mode)
    pub fn print_to_stdout(&self) -> io::Result<()> {
        let mut stdout = stdout().lock();
        stdout.write_all(self.to_ansi().as_bytes())?;
        stdout.flush()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if self.alternate_screen {
            let _ = execute!(stdout(), DisableMouseCapture, Show, LeaveAlternateScreen);
            let _ = disable_raw_mode();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_ignores_out_of_bounds() {
        let mut term = Terminal::headless(3, 2);
        term.set(-1, 0, 'x', None);
        term.set(3, 0, 'x', None);
        term.set(0, 2, 'x', None);
        term.set(2, 1, 'x', None);
        assert_eq!(term.get(2, 1).map(|c| c.ch), Some('x'));
        assert_eq!(term.to_ansi(), "   \n  x\n");
    }

    #[test]
    fn set_str_clips_at_edge() {
        let mut term = Terminal::headless(4, 1);
        term.set_str(2, 0, "abc", None);
        assert_eq!(term.to_ansi(), "  ab\n");
    }

    #[test]
    fn ansi_colors_non_blank_cells() {
        let mut term = Terminal::headless(2, 1);
        term.set(0, 0, '#', Some(Color::Rgb { r: 1, g: 2, b: 3 }));
        term.set(1, 0, ' ', Some(Color::Rgb { r: 1, g: 2, b: 3 }));
        assert_eq!(term.to_ansi(), "\x1b[38;2;1;2;3m#\x1b[0m \n");
    }

    #[test]
    fn resize_drops_old_contents() {
        let mut term = Terminal::headless(2, 2);
        term.set(1, 1, 'x', None);
        term.resize(5, 1);
        assert_eq!(term.get(1, 0), Some(Cell::default()));
        assert_eq!(term.size(), (5, 1));
        assert_eq!(term.get(4, 0), Some(Cell::default()));
        assert_eq!(term.get(0, 1), None);
    }
}
