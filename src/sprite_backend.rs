//! Terminal backend that overlays kitty graphics after each frame

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use crossterm::{cursor::MoveTo, queue, style::Print};
use ratatui::backend::{Backend, ClearType, CrosstermBackend, WindowSize};
use ratatui::buffer::Cell;
use ratatui::layout::{Position, Size};

/// Escape sequence deleting every image placed by a previous frame
const DELETE_ALL_IMAGES: &str = "\x1b_Ga=d,d=a\x1b\\";

/// Pending sprite placement for the next draw
#[derive(Default, Debug, Clone, PartialEq)]
pub struct SpriteRegistry {
    placement: Option<((u16, u16), String)>,
}

impl SpriteRegistry {
    pub fn set(&mut self, x: u16, y: u16, sequence: String) {
        self.placement = Some(((x, y), sequence));
    }

    pub fn clear(&mut self) {
        self.placement = None;
    }

    pub fn placement(&self) -> Option<&((u16, u16), String)> {
        self.placement.as_ref()
    }
}

/// Registry shared between the renderer and the backend
pub type SharedSprites = Arc<Mutex<SpriteRegistry>>;

pub fn shared_sprites() -> SharedSprites {
    Arc::new(Mutex::new(SpriteRegistry::default()))
}

#[derive(Debug, Clone)]
pub struct SpriteBackend<W: Write> {
    inner: CrosstermBackend<W>,
    registry: SharedSprites,
    had_sprite: bool,
}

impl<W: Write> SpriteBackend<W> {
    pub fn new(writer: W, registry: SharedSprites) -> Self {
        Self {
            inner: CrosstermBackend::new(writer),
            registry,
            had_sprite: false,
        }
    }
}

impl<W: Write> Backend for SpriteBackend<W> {
    fn draw<'a, I>(&mut self, content: I) -> io::Result<()>
    where
        I: Iterator<Item = (u16, u16, &'a Cell)>,
    {
        self.inner.draw(content)?;
        let placement = self
            .registry
            .lock()
            .map_err(|_| io::Error::other("sprite registry lock poisoned"))?
            .placement()
            .cloned();
        if self.had_sprite {
            queue!(self.inner, Print(DELETE_ALL_IMAGES))?;
        }
        let Some(((x, y), sequence)) = placement else {
            self.had_sprite = false;
            return Ok(());
        };
        queue!(self.inner, MoveTo(x, y), Print(sequence))?;
        self.had_sprite = true;
        Ok(())
    }

    fn append_lines(&mut self, n: u16) -> io::Result<()> {
        self.inner.append_lines(n)
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        self.inner.hide_cursor()
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        self.inner.show_cursor()
    }

    fn get_cursor_position(&mut self) -> io::Result<Position> {
        self.inner.get_cursor_position()
    }

    fn set_cursor_position<P: Into<Position>>(&mut self, position: P) -> io::Result<()> {
        self.inner.set_cursor_position(position)
    }

    fn clear(&mut self) -> io::Result<()> {
        self.inner.clear()
    }

    fn clear_region(&mut self, clear_type: ClearType) -> io::Result<()> {
        self.inner.clear_region(clear_type)
    }

    fn size(&self) -> io::Result<Size> {
        self.inner.size()
    }

    fn window_size(&mut self) -> io::Result<WindowSize> {
        self.inner.window_size()
    }

    fn flush(&mut self) -> io::Result<()> {
        Backend::flush(&mut self.inner)
    }
}

impl<W: Write> Write for SpriteBackend<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Write::flush(&mut self.inner)
    }
}
