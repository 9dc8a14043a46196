use std::{
    io::{self, stdout, Write},
    panic, thread,
    time::Duration,
};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Print, ResetColor, SetForegroundColor},
    terminal, SynchronizedUpdate,
};
use log::debug;
use mazecore::{Dims, Renderer};

use crate::canvas::Canvas;

/// Writes the canvas line by line, colouring move glyphs.
pub fn queue_canvas(out: &mut impl Write, canvas: &Canvas) -> io::Result<()> {
    for row in canvas.rows() {
        let mut color = None;
        for glyph in row {
            if glyph.color != color {
                match glyph.color {
                    Some(c) => queue!(out, SetForegroundColor(c))?,
                    None => queue!(out, ResetColor)?,
                }
                color = glyph.color;
            }
            queue!(out, Print(glyph.ch))?;
        }
        queue!(out, ResetColor, Print("\r\n"))?;
    }

    Ok(())
}

/// Prints the finished canvas to stdout, no terminal mode changes.
pub fn print(canvas: &Canvas) -> io::Result<()> {
    let mut out = stdout().lock();
    queue_canvas(&mut out, canvas)?;
    out.flush()
}

/// Raw mode on the alternate screen, restored on drop and on panic.
pub struct Terminal {
    _private: (),
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        register_panic_hook();

        terminal::enable_raw_mode()?;
        execute!(stdout(), cursor::Hide, terminal::EnterAlternateScreen)?;

        Ok(Terminal { _private: () })
    }

    /// Blocks until Esc, `q` or Ctrl-C is pressed.
    pub fn wait_for_close(&self) -> io::Result<()> {
        loop {
            if let Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) = event::read()?
            {
                match code {
                    KeyCode::Esc | KeyCode::Char('q') => return Ok(()),
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(())
                    }
                    _ => {}
                }
            }
        }
    }

    fn turn_off(&mut self) -> io::Result<()> {
        unregister_panic_hook();

        execute!(stdout(), cursor::Show, terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if let Err(err) = self.turn_off() {
            debug!("failed to restore terminal: {}", err);
        }
    }
}

fn register_panic_hook() {
    let prev = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show);
        let _ = terminal::disable_raw_mode();

        prev(info)
    }));
}

fn unregister_panic_hook() {
    if !thread::panicking() {
        let _ = panic::take_hook();
    }
}

/// Renderer redrawing the whole canvas on every frame.
///
/// [`Renderer`] can't fail, so the first write error is kept and every later frame is skipped.
pub struct Animation {
    canvas: Canvas,
    delay: Duration,
    error: Option<io::Error>,
}

impl Animation {
    pub fn new(canvas: Canvas, delay: Duration) -> Self {
        Animation {
            canvas,
            delay,
            error: None,
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Returns the canvas, or the error that stopped the animation.
    pub fn finish(self) -> io::Result<Canvas> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.canvas),
        }
    }

    pub fn show(&self) -> io::Result<()> {
        let mut tty = stdout();
        tty.sync_update(|tty| {
            queue!(tty, cursor::MoveTo(0, 0), ResetColor)?;
            queue_canvas(tty, &self.canvas)?;
            tty.flush()
        })?
    }
}

impl Renderer for Animation {
    fn draw_cell(&mut self, pos: Dims, walls: [bool; 4]) {
        self.canvas.draw_cell(pos, walls);
    }

    fn draw_move(&mut self, from: Dims, to: Dims, is_backtrack: bool) {
        self.canvas.draw_move(from, to, is_backtrack);
    }

    fn present(&mut self) {
        if self.error.is_some() {
            return;
        }

        match self.show() {
            Ok(()) => thread::sleep(self.delay),
            Err(err) => self.error = Some(err),
        }
    }
}
