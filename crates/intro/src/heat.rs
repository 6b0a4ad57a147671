//! Liquid level and visual intensity scalars.
//!
//! All three move monotonically and saturate: the liquid only drops, glow
//! and shake only grow. They live as long as the sequencer and are never
//! reset.

use rand::Rng;

use crate::phase::HeatTick;

/// Surface height at mount, in flask space (y grows downward).
pub const INITIAL_LIQUID_LEVEL: f32 = 68.0;

/// Lowest surface reached while heating.
pub const HEATING_LEVEL_FLOOR: f32 = 60.0;
/// Lowest surface reached while boiling.
pub const BOILING_LEVEL_FLOOR: f32 = 52.0;

const HEATING_GLOW_STEP: f32 = 0.04;
const HEATING_GLOW_CAP: f32 = 0.6;
const HEATING_LEVEL_STEP: f32 = 0.2;

const BOILING_GLOW_STEP: f32 = 0.06;
const BOILING_SHAKE_STEP: f32 = 0.1;
const BOILING_LEVEL_STEP: f32 = 0.4;

const GLOW_CAP: f32 = 1.0;
const SHAKE_CAP: f32 = 1.0;

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Heat {
    pub liquid_level: f32,
    pub glow: f32,
    pub shake: f32,
}

impl Default for Heat {
    fn default() -> Self {
        Self {
            liquid_level: INITIAL_LIQUID_LEVEL,
            glow: 0.0,
            shake: 0.0,
        }
    }
}

/// Flask displacement for one rendered frame.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Shake {
    pub dx: f32,
    pub dy: f32,
    pub degrees: f32,
}

impl Heat {
    pub fn tick(&mut self, law: HeatTick) {
        match law {
            HeatTick::Heating => {
                self.glow = (self.glow + HEATING_GLOW_STEP).min(HEATING_GLOW_CAP);
                self.liquid_level =
                    (self.liquid_level - HEATING_LEVEL_STEP).max(HEATING_LEVEL_FLOOR);
            }
            HeatTick::Boiling => {
                self.glow = (self.glow + BOILING_GLOW_STEP).min(GLOW_CAP);
                self.shake = (self.shake + BOILING_SHAKE_STEP).min(SHAKE_CAP);
                self.liquid_level =
                    (self.liquid_level - BOILING_LEVEL_STEP).max(BOILING_LEVEL_FLOOR);
            }
        }
    }

    /// Random jitter scaled by the current shake; ±3 x, ±2 y, ±1 degree at full shake.
    pub fn shake_offset<R: Rng>(&self, rng: &mut R) -> Shake {
        let mut jitter = |span: f32| (rng.gen::<f32>() - 0.5) * self.shake * span;
        Shake {
            dx: jitter(6.0),
            dy: jitter(4.0),
            degrees: jitter(2.0),
        }
    }
}
