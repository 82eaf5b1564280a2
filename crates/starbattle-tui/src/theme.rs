use crossterm::style::Color;

/// Color theme for the TUI.
///
/// Region ids map to display colors here, never in the engine; the
/// core only knows integer region ids.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color
    pub bg: Color,
    /// Default text color
    pub fg: Color,
    /// Grid border color
    pub border: Color,
    /// Queen glyph color
    pub queen: Color,
    /// Planning mark color
    pub mark: Color,
    /// Selected cell background
    pub selected_bg: Color,
    /// Rejection message color
    pub error: Color,
    /// Solved/success color
    pub success: Color,
    /// Timer/info text color
    pub info: Color,
    /// Key binding text color
    pub key: Color,
    /// Cell backgrounds keyed by region id modulo the palette
    pub regions: [Color; 8],
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Background for a region id; the palette cycles past 8 regions
    pub fn region_bg(&self, region_id: u8) -> Color {
        self.regions[region_id as usize % self.regions.len()]
    }

    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb { r: 20, g: 22, b: 30 },
            fg: Color::Rgb { r: 230, g: 230, b: 240 },
            border: Color::Rgb { r: 70, g: 75, b: 90 },
            queen: Color::Rgb { r: 255, g: 215, b: 90 },
            mark: Color::Rgb { r: 160, g: 170, b: 200 },
            selected_bg: Color::Rgb { r: 90, g: 110, b: 160 },
            error: Color::Rgb { r: 255, g: 90, b: 90 },
            success: Color::Rgb { r: 90, g: 255, b: 130 },
            info: Color::Rgb { r: 160, g: 165, b: 185 },
            key: Color::Rgb { r: 255, g: 210, b: 100 },
            regions: [
                Color::Rgb { r: 48, g: 60, b: 88 },
                Color::Rgb { r: 70, g: 48, b: 56 },
                Color::Rgb { r: 44, g: 72, b: 52 },
                Color::Rgb { r: 80, g: 66, b: 36 },
                Color::Rgb { r: 60, g: 44, b: 80 },
                Color::Rgb { r: 36, g: 70, b: 76 },
                Color::Rgb { r: 84, g: 52, b: 30 },
                Color::Rgb { r: 56, g: 56, b: 56 },
            ],
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            bg: Color::Rgb { r: 248, g: 248, b: 252 },
            fg: Color::Rgb { r: 30, g: 30, b: 40 },
            border: Color::Rgb { r: 180, g: 180, b: 195 },
            queen: Color::Rgb { r: 160, g: 110, b: 0 },
            mark: Color::Rgb { r: 90, g: 100, b: 130 },
            selected_bg: Color::Rgb { r: 170, g: 195, b: 255 },
            error: Color::Rgb { r: 220, g: 50, b: 50 },
            success: Color::Rgb { r: 40, g: 160, b: 60 },
            info: Color::Rgb { r: 90, g: 90, b: 110 },
            key: Color::Rgb { r: 200, g: 120, b: 20 },
            regions: [
                Color::Rgb { r: 205, g: 220, b: 250 },
                Color::Rgb { r: 250, g: 210, b: 215 },
                Color::Rgb { r: 205, g: 240, b: 210 },
                Color::Rgb { r: 248, g: 235, b: 190 },
                Color::Rgb { r: 230, g: 210, b: 250 },
                Color::Rgb { r: 200, g: 238, b: 242 },
                Color::Rgb { r: 250, g: 220, b: 195 },
                Color::Rgb { r: 225, g: 225, b: 225 },
            ],
        }
    }

    /// High contrast theme
    pub fn high_contrast() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::White,
            border: Color::Grey,
            queen: Color::Yellow,
            mark: Color::Cyan,
            selected_bg: Color::Blue,
            error: Color::Red,
            success: Color::Green,
            info: Color::Grey,
            key: Color::Yellow,
            regions: [
                Color::Rgb { r: 0, g: 0, b: 90 },
                Color::Rgb { r: 90, g: 0, b: 0 },
                Color::Rgb { r: 0, g: 70, b: 0 },
                Color::Rgb { r: 80, g: 70, b: 0 },
                Color::Rgb { r: 70, g: 0, b: 80 },
                Color::Rgb { r: 0, g: 70, b: 80 },
                Color::Rgb { r: 90, g: 45, b: 0 },
                Color::Rgb { r: 50, g: 50, b: 50 },
            ],
        }
    }
}
