use crate::colors::FireColor;
use crate::error::{FireError, Result};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{
        poll, read, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        KeyModifiers, MouseButton, MouseEventKind,
    },
    execute, queue,
    style::{available_color_count, Attribute, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{
        disable_raw_mode, enable_raw_mode, size, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use std::io::{self, stdout, Stdout, Write};
use std::time::Duration;

/// Smallest terminal the layout fits in
pub const MIN_WIDTH: u16 = 80;
pub const MIN_HEIGHT: u16 = 25;

/// One input event, already decoded from the backend
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyCode, KeyModifiers),
    Click { x: u16, y: u16 },
    /// Mouse wheel: +1 up, -1 down
    Scroll(i8),
    Resize(u16, u16),
}

/// A single cell in a frame buffer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub color: FireColor,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            color: FireColor::Black,
        }
    }
}

/// Drawing target used by the engine and the overlay.
///
/// Writes go to a back buffer; `present` makes them visible.
pub trait Surface {
    fn size(&self) -> (u16, u16);

    /// Write one character cell. Out-of-range coordinates are ignored.
    fn set_cell(&mut self, x: i32, y: i32, ch: char, color: FireColor);

    /// Push the back buffer to the screen, touching only changed cells
    fn present(&mut self) -> io::Result<()>;

    /// Non-blocking read of the next input event
    fn poll_event(&mut self) -> io::Result<Option<InputEvent>>;

    /// Blank the back buffer
    fn clear(&mut self);

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()>;

    /// Write a string starting at position
    fn set_str(&mut self, x: i32, y: i32, s: &str, color: FireColor) {
        for (i, ch) in s.chars().enumerate() {
            self.set_cell(x + i as i32, y, ch, color);
        }
    }
}

/// Verify the terminal can host the simulator before touching its modes
pub fn check_environment() -> Result<(u16, u16)> {
    let (width, height) = size()?;
    if width < MIN_WIDTH || height < MIN_HEIGHT {
        return Err(FireError::TerminalTooSmall {
            width,
            height,
            min_width: MIN_WIDTH,
            min_height: MIN_HEIGHT,
        });
    }

    let colors = available_color_count();
    if colors < 8 {
        return Err(FireError::NoColorSupport { colors });
    }

    Ok((width, height))
}

/// Restore the terminal without a `Terminal` handle (panic path)
pub fn restore_best_effort() {
    let mut out = stdout();
    let _ = execute!(out, DisableMouseCapture, SetAttribute(Attribute::Reset), ResetColor, Show, LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

/// Back and front cell buffers plus the diff that turns one into the other
pub struct FrameBuffers {
    width: u16,
    height: u16,
    back: Vec<Cell>,
    front: Vec<Cell>,
    full_redraw: bool,
}

impl FrameBuffers {
    pub fn new(width: u16, height: u16) -> Self {
        let cells = width as usize * height as usize;
        Self {
            width,
            height,
            back: vec![Cell::default(); cells],
            front: vec![Cell::default(); cells],
            full_redraw: true,
        }
    }

    /// Resize both buffers; the next flush redraws everything
    pub fn resize(&mut self, width: u16, height: u16) {
        *self = Self::new(width, height);
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            self.back[y as usize * self.width as usize + x as usize] = cell;
        }
    }

    pub fn clear(&mut self) {
        self.back.fill(Cell::default());
    }

    /// Queue every changed cell to `out` and flush it.
    ///
    /// Returns the number of cells printed.
    pub fn flush<W: Write>(&mut self, out: &mut W) -> io::Result<usize> {
        if self.full_redraw {
            queue!(out, Clear(ClearType::All))?;
        }

        let width = self.width as usize;
        let mut current: Option<FireColor> = None;
        let mut cursor: Option<(usize, usize)> = None;
        let mut printed = 0;

        for (idx, cell) in self.back.iter().enumerate() {
            if !self.full_redraw && self.front[idx] == *cell {
                continue;
            }
            let (x, y) = (idx % width, idx / width);

            // Skip the cursor move when the previous write left us here
            if cursor != Some((x, y)) {
                queue!(out, MoveTo(x as u16, y as u16))?;
            }
            if current != Some(cell.color) {
                let (color, bold) = cell.color.term_color();
                queue!(out, SetAttribute(Attribute::Reset), SetForegroundColor(color))?;
                if bold {
                    queue!(out, SetAttribute(Attribute::Bold))?;
                }
                current = Some(cell.color);
            }
            queue!(out, Print(cell.ch))?;
            cursor = Some((x + 1, y));
            printed += 1;
        }

        queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
        out.flush()?;

        self.front.copy_from_slice(&self.back);
        self.full_redraw = false;
        Ok(printed)
    }
}

/// Double-buffered crossterm terminal
pub struct Terminal {
    buffers: FrameBuffers,
    mouse: bool,
    out: Stdout,
}

impl Terminal {
    /// Enter raw mode and the alternate screen
    pub fn new(mouse: bool) -> io::Result<Self> {
        let (width, height) = size()?;
        let mut out = stdout();

        enable_raw_mode()?;
        execute!(out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        if mouse {
            execute!(out, EnableMouseCapture)?;
        }

        Ok(Self {
            buffers: FrameBuffers::new(width, height),
            mouse,
            out,
        })
    }
}

impl Surface for Terminal {
    fn size(&self) -> (u16, u16) {
        self.buffers.size()
    }

    fn set_cell(&mut self, x: i32, y: i32, ch: char, color: FireColor) {
        self.buffers.set(x, y, Cell { ch, color });
    }

    fn present(&mut self) -> io::Result<()> {
        self.buffers.flush(&mut self.out).map(|_| ())
    }

    fn poll_event(&mut self) -> io::Result<Option<InputEvent>> {
        if !poll(Duration::from_millis(0))? {
            return Ok(None);
        }

        let event = match read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                Some(InputEvent::Key(key.code, key.modifiers))
            }
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => Some(InputEvent::Click {
                    x: mouse.column,
                    y: mouse.row,
                }),
                MouseEventKind::ScrollUp => Some(InputEvent::Scroll(1)),
                MouseEventKind::ScrollDown => Some(InputEvent::Scroll(-1)),
                _ => None,
            },
            Event::Resize(w, h) => {
                self.buffers.resize(w, h);
                Some(InputEvent::Resize(w, h))
            }
            _ => None,
        };
        Ok(event)
    }

    fn clear(&mut self) {
        self.buffers.clear();
    }

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        if visible {
            execute!(self.out, Show)
        } else {
            execute!(self.out, Hide)
        }
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if self.mouse {
            let _ = execute!(self.out, DisableMouseCapture);
        }
        let _ = execute!(self.out, SetAttribute(Attribute::Reset), ResetColor, Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// In-memory surface for exercising render paths in tests
#[cfg(test)]
pub mod memory {
    use super::*;
    use std::collections::VecDeque;

    pub struct MemorySurface {
        pub width: u16,
        pub height: u16,
        pub cells: Vec<Cell>,
        pub events: VecDeque<InputEvent>,
        pub presents: usize,
        pub cursor_visible: bool,
    }

    impl MemorySurface {
        pub fn new(width: u16, height: u16) -> Self {
            Self {
                width,
                height,
                cells: vec![Cell::default(); width as usize * height as usize],
                events: VecDeque::new(),
                presents: 0,
                cursor_visible: true,
            }
        }

        pub fn cell(&self, x: u16, y: u16) -> Cell {
            self.cells[y as usize * self.width as usize + x as usize]
        }

        pub fn row_text(&self, y: u16) -> String {
            (0..self.width).map(|x| self.cell(x, y).ch).collect()
        }

        pub fn contains(&self, text: &str) -> bool {
            (0..self.height).any(|y| self.row_text(y).contains(text))
        }
    }

    impl Surface for MemorySurface {
        fn size(&self) -> (u16, u16) {
            (self.width, self.height)
        }

        fn set_cell(&mut self, x: i32, y: i32, ch: char, color: FireColor) {
            if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
                self.cells[y as usize * self.width as usize + x as usize] = Cell { ch, color };
            }
        }

        fn present(&mut self) -> io::Result<()> {
            self.presents += 1;
            Ok(())
        }

        fn poll_event(&mut self) -> io::Result<Option<InputEvent>> {
            Ok(self.events.pop_front())
        }

        fn clear(&mut self) {
            self.cells.fill(Cell::default());
        }

        fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
            self.cursor_visible = visible;
            Ok(())
        }
    }
}
