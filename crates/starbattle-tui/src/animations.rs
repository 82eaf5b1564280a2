//! Confetti celebration shown when an altar is solved.

use crossterm::style::Color;
use rand::Rng;

/// Confetti characters
const CONFETTI_CHARS: &[char] = &['*', '✦', '✧', '◆', '◇', '○', '●', '■', '□', '▲', '▽'];

/// A single confetti particle
#[derive(Clone)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub char: char,
    pub color: Color,
    pub lifetime: f32,
}

impl Particle {
    pub fn is_visible(&self, width: u16, height: u16) -> bool {
        self.x >= 0.0
            && self.x < width as f32
            && self.y >= 0.0
            && self.y < height as f32
            && self.lifetime > 0.0
    }
}

/// Generate a random bright color
fn random_bright_color() -> Color {
    let mut rng = rand::thread_rng();
    match rng.gen_range(0..7) {
        0 => Color::Red,
        1 => Color::Green,
        2 => Color::Yellow,
        3 => Color::Blue,
        4 => Color::Magenta,
        5 => Color::Cyan,
        _ => Color::White,
    }
}

/// Win-screen confetti burst
pub struct Confetti {
    particles: Vec<Particle>,
}

impl Confetti {
    pub fn new(width: u16, height: u16) -> Self {
        let mut rng = rand::thread_rng();
        let mut particles = Vec::with_capacity(80);
        for _ in 0..80 {
            particles.push(Particle {
                x: rng.gen_range(0.0..width as f32),
                y: rng.gen_range(-(height as f32) * 0.5..0.0),
                vx: rng.gen_range(-0.6..0.6),
                vy: rng.gen_range(0.2..0.8),
                char: CONFETTI_CHARS[rng.gen_range(0..CONFETTI_CHARS.len())],
                color: random_bright_color(),
                lifetime: rng.gen_range(60.0..180.0),
            });
        }
        Self { particles }
    }

    pub fn update(&mut self, height: u16) {
        let mut rng = rand::thread_rng();
        for p in &mut self.particles {
            p.x += p.vx;
            p.y += p.vy;
            p.vy += 0.01;
            p.lifetime -= 1.0;
            // Recycle particles that fell off or expired
            if p.y >= height as f32 || p.lifetime <= 0.0 {
                p.y = 0.0;
                p.x = rng.gen_range(0.0..200.0);
                p.vy = rng.gen_range(0.2..0.8);
                p.lifetime = rng.gen_range(60.0..180.0);
                p.color = random_bright_color();
            }
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
}
