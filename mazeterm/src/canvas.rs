use crossterm::style::Color;
use mazecore::{array::Array2D, CellWall, Dims, Layout, MazeParams, Point, Renderer};

const HORIZONTAL: char = '-';
const VERTICAL: char = '|';
const CORNER: char = '+';
const FORWARD: char = '*';
const BACKTRACK: char = 'x';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub color: Option<Color>,
}

impl Glyph {
    pub const EMPTY: Glyph = Glyph::new(' ', None);

    pub const fn new(ch: char, color: Option<Color>) -> Self {
        Glyph { ch, color }
    }
}

/// Character buffer the maze is drawn into, one glyph per terminal cell.
#[derive(Debug, Clone)]
pub struct Canvas {
    buf: Array2D<Glyph>,
    layout: Layout,
}

impl Canvas {
    /// Canvas large enough for a `rows` x `cols` grid placed by `layout`.
    pub fn new(layout: Layout, rows: usize, cols: usize) -> Self {
        let extent = layout.extent(rows, cols);
        let width = extent.x.max(0.0).ceil() as usize + 1;
        let height = extent.y.max(0.0).ceil() as usize + 1;

        Canvas {
            buf: Array2D::new(Glyph::EMPTY, height, width),
            layout,
        }
    }

    pub fn for_params(params: &MazeParams) -> Self {
        Canvas::new(params.layout(), params.rows, params.cols)
    }

    pub fn width(&self) -> usize {
        self.buf.cols()
    }

    pub fn height(&self) -> usize {
        self.buf.rows()
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Glyph> {
        self.buf.get(Dims(y, x)).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Glyph]> + '_ {
        (0..self.buf.rows()).filter_map(|y| self.buf.row(y))
    }

    /// Plain text, trailing spaces removed.
    pub fn to_lines(&self) -> Vec<String> {
        self.rows()
            .map(|row| {
                let line: String = row.iter().map(|g| g.ch).collect();
                line.trim_end().to_string()
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.buf.fill(Glyph::EMPTY);
    }

    fn plot(&mut self, point: Point, glyph: Glyph) {
        let pos = Dims(point.y.round() as i32, point.x.round() as i32);
        if let Some(slot) = self.buf.get_mut(pos) {
            *slot = glyph;
        }
    }

    /// DDA along the major axis, both ends included.
    fn line(&mut self, from: Point, to: Point, glyph: Glyph) {
        let delta = to - from;
        let steps = delta.x.abs().max(delta.y.abs()).round() as i32;
        if steps == 0 {
            self.plot(from, glyph);
            return;
        }

        let step = delta / steps as f64;
        for i in 0..=steps {
            self.plot(from + step * i as f64, glyph);
        }
    }

    fn edge(&mut self, from: Point, to: Point, present: bool) {
        if present {
            let ch = if from.y == to.y { HORIZONTAL } else { VERTICAL };
            self.line(from, to, Glyph::new(ch, None));
            self.plot(from, Glyph::new(CORNER, None));
            self.plot(to, Glyph::new(CORNER, None));
            return;
        }

        // keep the corners, they may belong to other walls
        let delta = to - from;
        let steps = delta.x.abs().max(delta.y.abs()).round() as i32;
        if steps < 2 {
            return;
        }
        let step = delta / steps as f64;
        for i in 1..steps {
            self.plot(from + step * i as f64, Glyph::EMPTY);
        }
    }
}

impl Renderer for Canvas {
    fn draw_cell(&mut self, pos: Dims, walls: [bool; 4]) {
        let rect = self.layout.cell_rect(pos);
        for wall in CellWall::ALL {
            let (from, to) = rect.edge(wall);
            self.edge(from, to, walls[wall.index()]);
        }
    }

    fn draw_move(&mut self, from: Dims, to: Dims, is_backtrack: bool) {
        let glyph = if is_backtrack {
            Glyph::new(BACKTRACK, Some(Color::Red))
        } else {
            Glyph::new(FORWARD, Some(Color::Green))
        };

        let (from, to) = (self.layout.cell_center(from), self.layout.cell_center(to));
        self.line(from, to, glyph);
    }
}
