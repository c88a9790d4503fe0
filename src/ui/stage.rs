//! Cell-buffer canvas over the logical 800x600 stage.
//!
//! Scenes plot in logical coordinates; the stage scales them to whatever
//! terminal area it is given and flushes the result as one paragraph.

use kosh::core::constants::{SCREEN_HEIGHT, SCREEN_WIDTH};
use kosh::core::Vec2;
use kosh::effects::{EffectSystem, ParticleVisual, Rgb};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

#[derive(Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

pub struct Stage {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Stage {
    pub fn new(area: Rect) -> Self {
        Self {
            width: area.width,
            height: area.height,
            cells: vec![Cell::default(); usize::from(area.width) * usize::from(area.height)],
        }
    }

    fn cell_of(&self, pos: Vec2) -> Option<(u16, u16)> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let col = (pos.x / SCREEN_WIDTH * f64::from(self.width)).floor();
        let row = (pos.y / SCREEN_HEIGHT * f64::from(self.height)).floor();
        if col < 0.0 || row < 0.0 || col >= f64::from(self.width) || row >= f64::from(self.height)
        {
            return None;
        }
        Some((col as u16, row as u16))
    }

    fn cell_mut(&mut self, col: u16, row: u16) -> Option<&mut Cell> {
        if col >= self.width || row >= self.height {
            return None;
        }
        let index = usize::from(row) * usize::from(self.width) + usize::from(col);
        self.cells.get_mut(index)
    }

    pub fn put(&mut self, pos: Vec2, ch: char, fg: Color) {
        if let Some((col, row)) = self.cell_of(pos) {
            if let Some(cell) = self.cell_mut(col, row) {
                cell.ch = ch;
                cell.fg = fg;
            }
        }
    }

    /// Text centered horizontally on `pos`.
    pub fn text(&mut self, pos: Vec2, text: &str, fg: Color) {
        let Some((col, row)) = self.cell_of(pos) else {
            return;
        };
        let len = text.chars().count() as u16;
        let start = col.saturating_sub(len / 2);
        for (i, ch) in text.chars().enumerate() {
            if let Some(cell) = self.cell_mut(start + i as u16, row) {
                cell.ch = ch;
                cell.fg = fg;
            }
        }
    }

    /// Fill the logical rectangle `[top_left, top_left + size)` with a
    /// background color.
    pub fn fill(&mut self, top_left: Vec2, size: Vec2, bg: Color) {
        let Some((c0, r0)) = self.cell_of(top_left) else {
            return;
        };
        let far = top_left + size;
        let (c1, r1) = self
            .cell_of(Vec2::new(far.x.min(SCREEN_WIDTH - 0.01), far.y.min(SCREEN_HEIGHT - 0.01)))
            .unwrap_or((c0, r0));
        for row in r0..=r1 {
            for col in c0..=c1 {
                if let Some(cell) = self.cell_mut(col, row) {
                    cell.bg = bg;
                }
            }
        }
    }

    /// Multi-line sprite centered on `pos`, one logical cell per char.
    pub fn sprite(&mut self, pos: Vec2, rows: &[&str], fg: Color) {
        let Some((col, row)) = self.cell_of(pos) else {
            return;
        };
        let top = row.saturating_sub(rows.len() as u16 / 2);
        for (dy, line) in rows.iter().enumerate() {
            let left = col.saturating_sub(line.chars().count() as u16 / 2);
            for (dx, ch) in line.chars().enumerate() {
                if ch == ' ' {
                    continue;
                }
                if let Some(cell) = self.cell_mut(left + dx as u16, top + dy as u16) {
                    cell.ch = ch;
                    cell.fg = fg;
                }
            }
        }
    }

    /// Plot every live particle, faded by its remaining life.
    pub fn particles(&mut self, effects: &EffectSystem) {
        for particle in effects.particles() {
            let alpha = particle.alpha();
            match particle.visual {
                ParticleVisual::Dot(color) => {
                    let ch = if alpha > 0.5 { '*' } else { '·' };
                    self.put(particle.position, ch, faded(color, alpha));
                }
                ParticleVisual::Glyph(ch) => {
                    self.put(particle.position, ch, faded(Rgb::WHITE, alpha));
                }
            }
        }
    }

    pub fn render(self, frame: &mut Frame, area: Rect) {
        let width = usize::from(self.width.max(1));
        let lines: Vec<Line> = self
            .cells
            .chunks(width)
            .map(|row| {
                Line::from(
                    row.iter()
                        .map(|cell| {
                            Span::styled(cell.ch.to_string(), Style::default().fg(cell.fg).bg(cell.bg))
                        })
                        .collect::<Vec<_>>(),
                )
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), area);
    }
}

fn faded(color: Rgb, alpha: f64) -> Color {
    let scale = |c: u8| (f64::from(c) * (0.35 + 0.65 * alpha.clamp(0.0, 1.0))) as u8;
    Color::Rgb(scale(color.0), scale(color.1), scale(color.2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_scales_logical_coordinates() {
        let mut stage = Stage::new(Rect::new(0, 0, 80, 30));
        stage.put(Vec2::new(400.0, 300.0), 'K', Color::White);
        let index = 15 * 80 + 40;
        assert_eq!(stage.cells[index].ch, 'K');
    }

    #[test]
    fn test_off_stage_points_are_dropped() {
        let mut stage = Stage::new(Rect::new(0, 0, 10, 10));
        stage.put(Vec2::new(-5.0, 20.0), 'x', Color::White);
        stage.put(Vec2::new(900.0, 20.0), 'x', Color::White);
        assert!(stage.cells.iter().all(|c| c.ch == ' '));
    }
}
