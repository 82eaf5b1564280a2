//! WebAssembly Star Battle game with canvas UI
//!
//! This crate wraps the core engine in a browser controller: canvas
//! rendering, keyboard and mouse input, and localStorage save/load.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent};

mod game;
mod render;
mod theme;

// WASM tests require wasm-pack test to run
#[cfg(all(test, target_arch = "wasm32"))]
mod tests;

pub use game::GameState;
pub use theme::Theme;

const SAVE_KEY: &str = "starbattle_save";

// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// The main WASM game controller
#[wasm_bindgen]
pub struct StarBattleGame {
    state: GameState,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    theme: Theme,
    cell_size: f64,
    font_size: f64,
    width: u32,
    height: u32,
    dpr: f64, // Device pixel ratio for crisp rendering
}

#[wasm_bindgen]
impl StarBattleGame {
    /// Create a new game attached to a canvas element
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<StarBattleGame, JsValue> {
        let document = web_sys::window()
            .ok_or("No window")?
            .document()
            .ok_or("No document")?;

        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or("Canvas not found")?
            .dyn_into::<HtmlCanvasElement>()?;

        let ctx = canvas
            .get_context("2d")?
            .ok_or("Failed to get 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;

        // Get device pixel ratio for crisp rendering on high-DPI displays
        let dpr = web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0);

        let width = 900;
        let height = 640;

        // Set actual canvas resolution (scaled by dpr)
        canvas.set_width((width as f64 * dpr) as u32);
        canvas.set_height((height as f64 * dpr) as u32);

        // Set CSS display size (logical pixels)
        let html_element: &HtmlElement = canvas.as_ref();
        let style = html_element.style();
        let _ = style.set_property("width", &format!("{}px", width));
        let _ = style.set_property("height", &format!("{}px", height));

        // Scale context to account for dpr
        let _ = ctx.scale(dpr, dpr);

        let game = StarBattleGame {
            state: GameState::new(),
            canvas,
            ctx,
            theme: Theme::dark(),
            cell_size: 56.0,
            font_size: 24.0,
            width,
            height,
            dpr,
        };

        game.render();
        Ok(game)
    }

    /// Handle keyboard input
    #[wasm_bindgen]
    pub fn handle_key(&mut self, event: &KeyboardEvent) -> bool {
        let key = event.key();
        let shift = event.shift_key();
        let ctrl = event.ctrl_key();

        let action = self.state.handle_key(&key, shift, ctrl);

        self.render();
        action
    }

    /// Handle a mouse click on the canvas
    #[wasm_bindgen]
    pub fn handle_click(&mut self, event: &MouseEvent) {
        let x = event.offset_x() as f64;
        let y = event.offset_y() as f64;
        let right = event.button() == 2;

        if let Some((row, col)) = render::cell_at_pixel(&self.state, self.cell_size, x, y) {
            self.state.click_cell(row, col, right);
        }
        self.render();
    }

    /// Update game state (call from requestAnimationFrame)
    #[wasm_bindgen]
    pub fn tick(&mut self) {
        self.state.tick();
        self.render();
    }

    /// Activate an altar by index (0-based)
    #[wasm_bindgen]
    pub fn activate_altar(&mut self, index: usize) {
        self.state.activate(index);
        self.render();
    }

    /// Set the color theme
    #[wasm_bindgen]
    pub fn set_theme(&mut self, theme_name: &str) {
        self.theme = match theme_name {
            "light" => Theme::light(),
            "high_contrast" => Theme::high_contrast(),
            _ => Theme::dark(),
        };
        self.render();
    }

    /// Names of the bundled altars, as a JS array
    #[wasm_bindgen]
    pub fn altar_names(&self) -> JsValue {
        let names: Vec<&str> = self
            .state
            .levels()
            .iter()
            .map(|level| level.name.as_str())
            .collect();
        serde_wasm_bindgen::to_value(&names).unwrap_or(JsValue::NULL)
    }

    /// Save the game to localStorage
    #[wasm_bindgen]
    pub fn save_game(&self) -> bool {
        let Ok(json) = serde_json::to_string(&self.state.to_serializable()) else {
            return false;
        };
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .map(|storage| storage.set_item(SAVE_KEY, &json).is_ok())
            .unwrap_or(false)
    }

    /// Load the game from localStorage
    #[wasm_bindgen]
    pub fn load_game(&mut self) -> bool {
        let Some(json) = web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .and_then(|storage| storage.get_item(SAVE_KEY).ok().flatten())
        else {
            return false;
        };
        match serde_json::from_str(&json) {
            Ok(state) => {
                self.state = GameState::from_serializable(state);
                self.render();
                true
            }
            Err(_) => false,
        }
    }

    /// Check if the active puzzle is solved
    #[wasm_bindgen]
    pub fn is_solved(&self) -> bool {
        self.state.is_solved()
    }

    /// Get formatted elapsed time
    #[wasm_bindgen]
    pub fn elapsed_string(&self) -> String {
        self.state.elapsed_string()
    }

    /// Number of altars solved so far
    #[wasm_bindgen]
    pub fn solved_count(&self) -> usize {
        self.state.solved_altars().len()
    }

    /// Resize the game canvas
    #[wasm_bindgen]
    pub fn resize(&mut self, width: u32, height: u32) {
        let width = width.max(600);
        let height = height.max(480);

        self.width = width;
        self.height = height;

        // Update dpr in case it changed (e.g., moving to a different monitor)
        self.dpr = web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0);

        self.canvas.set_width((width as f64 * self.dpr) as u32);
        self.canvas.set_height((height as f64 * self.dpr) as u32);

        let html_element: &HtmlElement = self.canvas.as_ref();
        let style = html_element.style();
        let _ = style.set_property("width", &format!("{}px", width));
        let _ = style.set_property("height", &format!("{}px", height));

        let _ = self.ctx.reset_transform();
        let _ = self.ctx.scale(self.dpr, self.dpr);

        // Cell size fits the largest bundled grid in either dimension
        let cells = self.state.size().unwrap_or(8) as f64;
        let max_grid_height = (height as f64 - 120.0).max(240.0);
        let max_grid_width = (width as f64 * 0.6).max(240.0);
        self.cell_size = (max_grid_height / cells)
            .min(max_grid_width / cells)
            .clamp(32.0, 72.0);
        self.font_size = (self.cell_size * 0.45).clamp(14.0, 30.0);

        self.render();
    }

    /// Render the game to canvas
    fn render(&self) {
        render::render_game(
            &self.ctx,
            &self.state,
            &self.theme,
            self.width,
            self.height,
            self.cell_size,
            self.font_size,
        );
    }
}
