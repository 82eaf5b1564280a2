//! Color themes for the WASM Star Battle UI

use serde::{Deserialize, Serialize};

/// RGB color
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn as_css(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    pub fn as_css_alpha(&self, alpha: f64) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }
}

/// Color theme for the game.
///
/// The region palette is presentation data keyed by region id; the
/// engine itself never deals in colors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    /// Background color
    pub background: Color,
    /// Grid lines color
    pub grid_lines: Color,
    /// Cursor cell border
    pub cursor: Color,
    /// Queen glyph color
    pub queen: Color,
    /// Planning mark color
    pub mark: Color,
    /// Rejection message color
    pub error_text: Color,
    /// Solved banner color
    pub win_color: Color,
    /// Info panel text
    pub info_text: Color,
    /// Message text
    pub message_text: Color,
    /// Heading / title text
    pub title_text: Color,
    /// Cell fills keyed by region id modulo the palette
    pub regions: [Color; 8],
}

impl Theme {
    /// Fill color for a region id; the palette cycles past 8 regions
    pub fn region_fill(&self, region_id: u8) -> Color {
        self.regions[region_id as usize % self.regions.len()]
    }

    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            background: Color::new(24, 24, 32),
            grid_lines: Color::new(60, 60, 80),
            cursor: Color::new(140, 180, 255),
            queen: Color::new(255, 215, 90),
            mark: Color::new(170, 180, 210),
            error_text: Color::new(255, 100, 100),
            win_color: Color::new(100, 255, 150),
            info_text: Color::new(160, 160, 180),
            message_text: Color::new(255, 220, 100),
            title_text: Color::new(220, 220, 235),
            regions: [
                Color::new(52, 66, 98),
                Color::new(82, 54, 62),
                Color::new(48, 80, 58),
                Color::new(92, 76, 40),
                Color::new(68, 50, 92),
                Color::new(40, 80, 86),
                Color::new(96, 60, 34),
                Color::new(62, 62, 62),
            ],
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            background: Color::new(245, 245, 250),
            grid_lines: Color::new(170, 170, 190),
            cursor: Color::new(40, 90, 200),
            queen: Color::new(150, 105, 0),
            mark: Color::new(95, 105, 135),
            error_text: Color::new(220, 50, 50),
            win_color: Color::new(50, 180, 80),
            info_text: Color::new(60, 60, 80),
            message_text: Color::new(180, 120, 0),
            title_text: Color::new(30, 30, 45),
            regions: [
                Color::new(205, 220, 250),
                Color::new(250, 210, 215),
                Color::new(205, 240, 210),
                Color::new(248, 235, 190),
                Color::new(230, 210, 250),
                Color::new(200, 238, 242),
                Color::new(250, 220, 195),
                Color::new(225, 225, 225),
            ],
        }
    }

    /// High contrast theme
    pub fn high_contrast() -> Self {
        Self {
            background: Color::new(0, 0, 0),
            grid_lines: Color::new(255, 255, 255),
            cursor: Color::new(0, 255, 255),
            queen: Color::new(255, 255, 0),
            mark: Color::new(0, 255, 255),
            error_text: Color::new(255, 0, 0),
            win_color: Color::new(0, 255, 0),
            info_text: Color::new(200, 200, 200),
            message_text: Color::new(255, 255, 0),
            title_text: Color::new(255, 255, 255),
            regions: [
                Color::new(0, 0, 110),
                Color::new(110, 0, 0),
                Color::new(0, 90, 0),
                Color::new(100, 90, 0),
                Color::new(90, 0, 100),
                Color::new(0, 90, 100),
                Color::new(110, 55, 0),
                Color::new(60, 60, 60),
            ],
        }
    }
}
