use life_grid::Loc;
use pixels::wgpu;
use std::time::Duration;
use winit::dpi::PhysicalSize;

use crate::render::Rect;

/// Opaque color packed as 0xRRGGBB.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color(pub u32);

impl Color {
    pub const LIGHT_GRAY: Color = Color(0x00DC_DCDC);
    pub const WHITE: Color = Color(0x00FF_FFFF);
    pub const BLACK: Color = Color(0x0000_0000);

    pub fn rgba(self) -> [u8; 4] {
        let [_, r, g, b] = self.0.to_be_bytes();
        [r, g, b, 0xff]
    }
}

impl From<Color> for wgpu::Color {
    fn from(color: Color) -> Self {
        let [r, g, b, _] = color.rgba();
        wgpu::Color {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: 1.0,
        }
    }
}

/// Display settings, built once at startup and shared by reference.
#[derive(Clone, Debug)]
pub struct Config {
    pub title: String,
    pub cell_size: u32,
    pub grid_line_width: u32,
    pub background_color: Color,
    pub grid_color: Color,
    pub cell_color: Color,
    /// `None` draws the first frame and never evolves the world.
    pub time_step: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "game of life".to_owned(),
            cell_size: 10,
            grid_line_width: 2,
            background_color: Color::LIGHT_GRAY,
            grid_color: Color::WHITE,
            cell_color: Color::BLACK,
            time_step: Some(Duration::from_millis(100)),
        }
    }
}

impl Config {
    pub fn window_size(&self, board_width: u32, board_height: u32) -> PhysicalSize<u32> {
        PhysicalSize::new(self.span(board_width), self.span(board_height))
    }

    /// Distance between the starts of two adjacent cells.
    pub fn cell_pitch(&self) -> u32 {
        self.cell_size + self.grid_line_width
    }

    pub fn cell_rect(&self, loc: Loc) -> Rect {
        Rect::new(
            self.cell_pitch() * loc.col + self.grid_line_width,
            self.cell_pitch() * loc.row + self.grid_line_width,
            self.cell_size,
            self.cell_size,
        )
    }

    fn span(&self, cells: u32) -> u32 {
        cells * self.cell_size + (cells + 1) * self.grid_line_width
    }
}
