//! One-shot explosion burst.
//!
//! Generated once when boiling ends, in three batches: a radial burst with
//! even angular spacing, a faster random spray, and slow droplets falling
//! from just above the flask neck. Each animation frame applies velocity,
//! gravity and drag, shrinks the particle and spins it. Particles are
//! dropped once they shrink to nothing or leave the bounding region.
//!
//! Coordinates are percentages of the intro stage; y grows downward.

use std::f32::consts::TAU;
use std::fmt;

use rand::Rng;

pub const RADIAL_COUNT: usize = 100;
pub const SPRAY_COUNT: usize = 60;
pub const DROPLET_COUNT: usize = 30;
pub const BURST_SIZE: usize = RADIAL_COUNT + SPRAY_COUNT + DROPLET_COUNT;

/// Where the radial burst and spray originate.
const ORIGIN: (f32, f32) = (50.0, 42.0);

/// Fraction of velocity applied to position per frame.
const VELOCITY_SCALE: f32 = 0.32;
const GRAVITY: f32 = 0.22;
const DRAG: f32 = 0.98;
const SHRINK: f32 = 0.15;

/// Particles leaving this region are culled. Generous so the spray can
/// fly off-screen before vanishing.
const MIN_X: f32 = -20.0;
const MAX_X: f32 = 120.0;
const MAX_Y: f32 = 160.0;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Medical blue, health green, light blue, light green, soft white.
pub const PALETTE: [Rgb; 5] = [
    Rgb { r: 0x1E, g: 0x6F, b: 0x9F },
    Rgb { r: 0x4E, g: 0x8D, b: 0x7C },
    Rgb { r: 0x7D, g: 0xB9, b: 0xE8 },
    Rgb { r: 0x6F, g: 0xBF, b: 0xA3 },
    Rgb { r: 0xE6, g: 0xED, b: 0xF3 },
];

/// Discriminant values are written into the render buffer; do not reorder.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Shape {
    Round = 0,
    Droplet = 1,
    Polygonal = 2,
}

impl Shape {
    pub const ALL: [Shape; 3] = [Shape::Round, Shape::Droplet, Shape::Polygonal];
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Index into `PALETTE`.
    pub color: u8,
    pub size: f32,
    pub rotation: f32,
    pub rotation_speed: f32,
    pub shape: Shape,
}

impl Particle {
    /// One animation frame. Position moves with the velocity from before
    /// gravity and drag are applied.
    pub fn step(&mut self) {
        self.x += self.vx * VELOCITY_SCALE;
        self.y += self.vy * VELOCITY_SCALE;
        self.vy += GRAVITY;
        self.vx *= DRAG;
        self.size = (self.size - SHRINK).max(0.0);
        self.rotation += self.rotation_speed;
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.size > 0.0 && self.y < MAX_Y && self.x > MIN_X && self.x < MAX_X
    }
}

#[derive(Clone, Debug, Default)]
pub struct Explosion {
    particles: Vec<Particle>,
}

impl Explosion {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the particle set with a fresh burst of `BURST_SIZE` particles.
    pub fn detonate<R: Rng>(&mut self, rng: &mut R) {
        self.particles.clear();
        self.particles.reserve(BURST_SIZE);
        self.particles
            .extend((0..RADIAL_COUNT).map(|i| radial(i, rng)));
        self.particles.extend((0..SPRAY_COUNT).map(|_| spray(rng)));
        self.particles
            .extend((0..DROPLET_COUNT).map(|i| droplet(i, rng)));
    }

    /// Advance every particle one frame and drop the dead ones.
    pub fn step(&mut self) {
        for p in &mut self.particles {
            p.step();
        }
        self.particles.retain(Particle::is_alive);
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Flattened `[x, y, size, rotation, color, shape]` per particle for the page.
    #[must_use]
    pub fn render_buffer(&self) -> Vec<f32> {
        self.particles
            .iter()
            .flat_map(|p| {
                [
                    p.x,
                    p.y,
                    p.size,
                    p.rotation,
                    f32::from(p.color),
                    f32::from(p.shape as u8),
                ]
            })
            .collect()
    }
}

fn random_color<R: Rng>(rng: &mut R) -> u8 {
    rng.gen_range(0..PALETTE.len()) as u8
}

/// Evenly spaced around the circle with a little jitter, biased upward.
fn radial<R: Rng>(i: usize, rng: &mut R) -> Particle {
    let angle = TAU * i as f32 / RADIAL_COUNT as f32 + rng.gen_range(-0.15..0.15);
    let speed = rng.gen_range(6.0..20.0);
    Particle {
        x: ORIGIN.0,
        y: ORIGIN.1,
        vx: angle.cos() * speed,
        vy: angle.sin() * speed - 5.0,
        color: random_color(rng),
        size: rng.gen_range(8.0..28.0),
        rotation: rng.gen_range(0.0..360.0),
        rotation_speed: rng.gen_range(-7.5..7.5),
        shape: Shape::ALL[rng.gen_range(0..Shape::ALL.len())],
    }
}

/// Smaller and faster than the radial burst, at random angles.
fn spray<R: Rng>(rng: &mut R) -> Particle {
    let angle = rng.gen_range(0.0..TAU);
    let speed = rng.gen_range(10.0..28.0);
    Particle {
        x: ORIGIN.0,
        y: ORIGIN.1,
        vx: angle.cos() * speed,
        vy: angle.sin() * speed - 8.0,
        color: random_color(rng),
        size: rng.gen_range(3.0..13.0),
        rotation: rng.gen_range(0.0..360.0),
        rotation_speed: rng.gen_range(-12.5..12.5),
        shape: Shape::Round,
    }
}

/// Slow drops from around the neck, alternating blue and green.
fn droplet<R: Rng>(i: usize, rng: &mut R) -> Particle {
    Particle {
        x: rng.gen_range(40.0..60.0),
        y: rng.gen_range(35.0..50.0),
        vx: rng.gen_range(-2.0..2.0),
        vy: rng.gen_range(-2.0..0.0),
        color: if i % 2 == 0 { 0 } else { 1 },
        size: rng.gen_range(4.0..12.0),
        rotation: 0.0,
        rotation_speed: 0.0,
        shape: Shape::Droplet,
    }
}
