//! Rising bubbles inside the flask.
//!
//! Bubbles spawn at the bottom of the liquid while a liquid phase is active,
//! rise at their own speed with a sinusoidal side-to-side wobble, fade
//! linearly and shrink slowly. A bubble is dropped once it fades below
//! `OPACITY_FLOOR` or rises to within `SURFACE_MARGIN` of the surface.
//!
//! Coordinates are flask space: 0–100 on both axes, y grows downward.

use std::f32::consts::TAU;

use rand::Rng;

use crate::phase::Phase;

/// Bubbles fainter than this are culled.
pub const OPACITY_FLOOR: f32 = 0.1;

/// Bubbles pop this far below the surface line.
pub const SURFACE_MARGIN: f32 = 5.0;

const SPAWN_X: std::ops::Range<f32> = 32.0..68.0;
const SPAWN_Y: std::ops::Range<f32> = 88.0..92.0;
const SPAWN_OPACITY: std::ops::Range<f32> = 0.5..1.0;

const OPACITY_DECAY: f32 = 0.006;
const SHRINK: f32 = 0.997;
const WOBBLE_STEP: f32 = 0.1;
/// How strongly height feeds into the wobble phase.
const WOBBLE_FREQUENCY: f32 = 0.15;
const WOBBLE_AMPLITUDE: f32 = 0.4;

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Bubble {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub speed: f32,
    pub opacity: f32,
    pub wobble: f32,
}

impl Bubble {
    /// One tick of motion. The wobble is driven by the height before the move.
    pub fn step(&mut self) {
        let y = self.y;
        self.y -= self.speed;
        self.x += (self.wobble + y * WOBBLE_FREQUENCY).sin() * WOBBLE_AMPLITUDE;
        self.wobble += WOBBLE_STEP;
        self.opacity -= OPACITY_DECAY;
        self.size *= SHRINK;
    }

    #[must_use]
    pub fn survives(&self, liquid_level: f32) -> bool {
        self.opacity >= OPACITY_FLOOR && self.y > liquid_level - SURFACE_MARGIN
    }
}

/// New bubbles per tick.
#[must_use]
pub fn spawn_rate(phase: Phase) -> usize {
    match phase {
        Phase::Bubbling => 1,
        Phase::Heating => 2,
        Phase::Boiling => 4,
        _ => 0,
    }
}

/// Population cap.
#[must_use]
pub fn population_cap(phase: Phase) -> usize {
    match phase {
        Phase::Bubbling => 20,
        Phase::Heating => 35,
        Phase::Boiling => 50,
        _ => 0,
    }
}

#[derive(Clone, Debug, Default)]
pub struct Bubbles {
    bubbles: Vec<Bubble>,
}

impl Bubbles {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Bubble] {
        &self.bubbles
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bubbles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }

    pub fn clear(&mut self) {
        self.bubbles.clear();
    }

    /// Spawn up to the phase's rate without passing its cap, move every
    /// bubble, then cull the popped and faded ones.
    pub fn tick<R: Rng>(&mut self, phase: Phase, liquid_level: f32, rng: &mut R) {
        let cap = population_cap(phase);
        for _ in 0..spawn_rate(phase) {
            if self.bubbles.len() >= cap {
                break;
            }
            self.bubbles.push(spawn(phase, rng));
        }

        for bubble in &mut self.bubbles {
            bubble.step();
        }
        self.bubbles.retain(|b| b.survives(liquid_level));
    }

    /// Flattened `[x, y, size, opacity]` per bubble for the page.
    #[must_use]
    pub fn render_buffer(&self) -> Vec<f32> {
        self.bubbles
            .iter()
            .flat_map(|b| [b.x, b.y, b.size, b.opacity])
            .collect()
    }
}

fn spawn<R: Rng>(phase: Phase, rng: &mut R) -> Bubble {
    // Boiling bubbles are bigger and faster.
    let (size, speed) = if phase == Phase::Boiling {
        (rng.gen_range(3.0..11.0), rng.gen_range(1.5..3.5))
    } else {
        (rng.gen_range(2.0..7.0), rng.gen_range(0.6..1.8))
    };
    Bubble {
        x: rng.gen_range(SPAWN_X),
        y: rng.gen_range(SPAWN_Y),
        size,
        speed,
        opacity: rng.gen_range(SPAWN_OPACITY),
        wobble: rng.gen_range(0.0..TAU),
    }
}
