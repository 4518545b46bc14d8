use life_grid::Board;

use crate::config::{Color, Config};

pub const PIXEL_BYTES: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

pub trait Canvas {
    fn fill_rect(&mut self, rect: Rect, color: Color);
}

/// RGBA8 pixel buffer, as handed out by `Pixels::frame_mut`.
pub struct Frame<'a> {
    width: u32,
    height: u32,
    buffer: &'a mut [u8],
}

impl<'a> Frame<'a> {
    pub fn new(width: u32, height: u32, buffer: &'a mut [u8]) -> Self {
        debug_assert_eq!(buffer.len(), PIXEL_BYTES * width as usize * height as usize);
        Self {
            width,
            height,
            buffer,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = self.byte_index(x, y);
        let mut result = [0; 4];
        result.copy_from_slice(&self.buffer[index..index + PIXEL_BYTES]);
        Some(result)
    }

    fn byte_index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * PIXEL_BYTES
    }
}

impl Canvas for Frame<'_> {
    /// Clips to the frame; a rect entirely outside it draws nothing.
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let x_end = rect.x.saturating_add(rect.width).min(self.width);
        let y_end = rect.y.saturating_add(rect.height).min(self.height);
        if rect.x >= x_end || rect.y >= y_end {
            return;
        }

        let rgba = color.rgba();
        for y in rect.y..y_end {
            let start = self.byte_index(rect.x, y);
            let end = self.byte_index(x_end, y);
            for pixel in self.buffer[start..end].chunks_exact_mut(PIXEL_BYTES) {
                pixel.copy_from_slice(&rgba);
            }
        }
    }
}

/// Background, then grid lines, then live cells.
pub fn draw_board<C: Canvas>(config: &Config, board: &Board, canvas: &mut C) {
    let size = config.window_size(board.width(), board.height());
    canvas.fill_rect(
        Rect::new(0, 0, size.width, size.height),
        config.background_color,
    );

    for row in 0..=board.height() {
        let line = Rect::new(
            0,
            config.cell_pitch() * row,
            size.width,
            config.grid_line_width,
        );
        canvas.fill_rect(line, config.grid_color);
    }

    for col in 0..=board.width() {
        let line = Rect::new(
            config.cell_pitch() * col,
            0,
            config.grid_line_width,
            size.height,
        );
        canvas.fill_rect(line, config.grid_color);
    }

    for loc in board.live_locs() {
        canvas.fill_rect(config.cell_rect(loc), config.cell_color);
    }
}
