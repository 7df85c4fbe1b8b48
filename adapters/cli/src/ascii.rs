//! Terminal frame sink that renders the board as a glyph grid.

use std::io::Write;

use anyhow::Result as AnyResult;
use snake_core::GridVector;
use snake_rendering::{palette, Color, RenderSink};
use snake_world::Score;

/// Buffers one frame's cells as glyphs and flushes the whole grid when the
/// score arrives, the final draw call of every frame.
pub(crate) struct AsciiSink<W: Write> {
    width: i32,
    height: i32,
    glyph: char,
    grid: Vec<char>,
    out: W,
}

impl<W: Write> AsciiSink<W> {
    pub(crate) fn new(width: i32, height: i32, out: W) -> Self {
        let cells = (width.max(0) as usize) * (height.max(0) as usize);
        Self {
            width,
            height,
            glyph: ' ',
            grid: vec![' '; cells],
            out,
        }
    }

    fn flush_frame(&mut self) -> AnyResult<()> {
        for row in self.grid.chunks(self.width.max(0) as usize) {
            let line: String = row.iter().collect();
            writeln!(self.out, "{line}")?;
        }
        self.grid.fill(' ');
        Ok(())
    }
}

/// Glyph drawn for cells of the given palette color; colors that never fill
/// cells map to a blank.
fn glyph_for(color: Color) -> char {
    if color == palette::WALL {
        '#'
    } else if color == palette::APPLE {
        '@'
    } else if color == palette::SNAKE_HEAD {
        'O'
    } else if color == palette::SNAKE_TAIL {
        'o'
    } else {
        ' '
    }
}

impl<W: Write> RenderSink for AsciiSink<W> {
    fn set_color(&mut self, color: Color) -> AnyResult<()> {
        self.glyph = glyph_for(color);
        Ok(())
    }

    fn draw_cell_at(&mut self, position: GridVector) -> AnyResult<()> {
        if position.x() < 0
            || position.y() < 0
            || position.x() >= self.width
            || position.y() >= self.height
        {
            return Ok(());
        }
        let index = (position.y() * self.width + position.x()) as usize;
        self.grid[index] = self.glyph;
        Ok(())
    }

    fn draw_score(&mut self, score: Score) -> AnyResult<()> {
        self.flush_frame()?;
        writeln!(self.out, "score: {score}")?;
        self.out.flush()?;
        Ok(())
    }

    fn draw_game_over(&mut self, headline: &str, taunt: &str) -> AnyResult<()> {
        writeln!(self.out, "{headline}")?;
        writeln!(self.out, "{taunt}")?;
        Ok(())
    }
}
