use crate::dims::Dims;

/// Receiver of drawing notifications from the generator and the solver.
///
/// Everything in this crate works headless, pass `&mut ()` when nothing should be drawn.
pub trait Renderer {
    /// Draw the four edges of a cell, `true` meaning the wall is present.
    fn draw_cell(&mut self, pos: Dims, walls: [bool; 4]);

    /// Draw a line between the centres of two cells.
    fn draw_move(&mut self, from: Dims, to: Dims, is_backtrack: bool);

    /// Called after every notification, renderers that animate flush their frame here.
    fn present(&mut self) {}
}

impl Renderer for () {
    fn draw_cell(&mut self, _pos: Dims, _walls: [bool; 4]) {}

    fn draw_move(&mut self, _from: Dims, _to: Dims, _is_backtrack: bool) {}
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn draw_cell(&mut self, pos: Dims, walls: [bool; 4]) {
        (**self).draw_cell(pos, walls);
    }

    fn draw_move(&mut self, from: Dims, to: Dims, is_backtrack: bool) {
        (**self).draw_move(from, to, is_backtrack);
    }

    fn present(&mut self) {
        (**self).present();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderEvent {
    Cell { pos: Dims, walls: [bool; 4] },
    Move { from: Dims, to: Dims, is_backtrack: bool },
}

/// Renderer that only remembers what it was asked to draw.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    pub events: Vec<RenderEvent>,
    pub frames: usize,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cells(&self) -> impl Iterator<Item = (Dims, [bool; 4])> + '_ {
        self.events.iter().filter_map(|event| match *event {
            RenderEvent::Cell { pos, walls } => Some((pos, walls)),
            RenderEvent::Move { .. } => None,
        })
    }

    pub fn moves(&self) -> impl Iterator<Item = (Dims, Dims, bool)> + '_ {
        self.events.iter().filter_map(|event| match *event {
            RenderEvent::Move {
                from,
                to,
                is_backtrack,
            } => Some((from, to, is_backtrack)),
            RenderEvent::Cell { .. } => None,
        })
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.frames = 0;
    }
}

impl Renderer for Recorder {
    fn draw_cell(&mut self, pos: Dims, walls: [bool; 4]) {
        self.events.push(RenderEvent::Cell { pos, walls });
    }

    fn draw_move(&mut self, from: Dims, to: Dims, is_backtrack: bool) {
        self.events.push(RenderEvent::Move {
            from,
            to,
            is_backtrack,
        });
    }

    fn present(&mut self) {
        self.frames += 1;
    }
}
