//! Flask intro sequencer.
//!
//! Drives the portfolio intro: liquid bubbles, heats and boils in a flask,
//! the flask bursts into particles, the title is revealed and the overlay
//! fades out. The page owns the real clock and the drawing; this crate owns
//! the phase timeline, the timers (on a virtual clock) and the particle
//! physics.

pub mod bubbles;
pub mod config;
pub mod error;
pub mod explosion;
pub mod heat;
pub mod host;
pub mod phase;
pub mod schedule;
pub mod sequencer;

#[cfg(test)]
mod scenario_test;

pub use config::IntroConfig;
pub use error::ConfigError;
pub use phase::Phase;
pub use sequencer::Sequencer;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::warn;
use wasm_bindgen::prelude::*;

/// Turns fractional frame deltas from `requestAnimationFrame` into whole
/// milliseconds without losing the remainder.
#[derive(Debug, Default)]
struct FrameClock {
    carry_ms: f64,
}

impl FrameClock {
    fn whole_ms(&mut self, dt_ms: f64) -> u64 {
        if !dt_ms.is_finite() || dt_ms <= 0.0 {
            return 0;
        }
        let total = self.carry_ms + dt_ms;
        let whole = total.floor();
        self.carry_ms = total - whole;
        whole as u64
    }
}

/// Browser handle to one intro run.
#[wasm_bindgen]
#[derive(Debug)]
pub struct Intro {
    sequencer: Sequencer<SmallRng>,
    clock: FrameClock,
}

fn notify(on_complete: js_sys::Function) -> impl FnOnce() {
    move || {
        if let Err(err) = on_complete.call0(&JsValue::NULL) {
            warn!(?err, "intro completion callback threw");
        }
    }
}

impl Intro {
    fn build(config: IntroConfig, seed: u32, on_complete: js_sys::Function) -> Intro {
        Intro {
            sequencer: Sequencer::new(
                config,
                SmallRng::seed_from_u64(u64::from(seed)),
                notify(on_complete),
            ),
            clock: FrameClock::default(),
        }
    }
}

#[wasm_bindgen]
impl Intro {
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new(seed: u32, on_complete: js_sys::Function) -> Intro {
        Self::build(IntroConfig::default(), seed, on_complete)
    }

    /// Like `new`, with timings from a JSON object. Missing fields keep
    /// their defaults.
    ///
    /// # Errors
    ///
    /// The config is rejected by `IntroConfig::from_json`.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(
        config_json: &str,
        seed: u32,
        on_complete: js_sys::Function,
    ) -> Result<Intro, JsError> {
        let config = IntroConfig::from_json(config_json).map_err(|err| {
            warn!(%err, "rejected intro config");
            JsError::from(err)
        })?;
        Ok(Self::build(config, seed, on_complete))
    }

    pub fn start(&mut self) {
        self.sequencer.start();
    }

    /// Feed the elapsed frame time in milliseconds.
    pub fn advance(&mut self, dt_ms: f64) {
        let whole = self.clock.whole_ms(dt_ms);
        self.sequencer.advance(whole);
    }

    pub fn skip(&mut self) {
        self.sequencer.skip();
    }

    /// Call when the intro is unmounted without finishing.
    pub fn teardown(&mut self) {
        self.sequencer.teardown();
    }

    /// `Phase` discriminant.
    #[must_use]
    pub fn phase(&self) -> u8 {
        self.sequencer.phase() as u8
    }

    #[wasm_bindgen(js_name = isComplete)]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.sequencer.is_complete()
    }

    #[wasm_bindgen(js_name = liquidLevel)]
    #[must_use]
    pub fn liquid_level(&self) -> f32 {
        self.sequencer.heat().liquid_level
    }

    #[must_use]
    pub fn glow(&self) -> f32 {
        self.sequencer.heat().glow
    }

    #[must_use]
    pub fn shake(&self) -> f32 {
        self.sequencer.heat().shake
    }

    /// `[dx, dy, degrees]` for the flask transform this frame.
    #[wasm_bindgen(js_name = shakeOffset)]
    pub fn shake_offset(&mut self) -> Vec<f32> {
        let offset = self.sequencer.shake_offset();
        vec![offset.dx, offset.dy, offset.degrees]
    }

    /// `[x, y, size, opacity]` per bubble.
    #[must_use]
    pub fn bubbles(&self) -> Vec<f32> {
        self.sequencer.bubbles().render_buffer()
    }

    /// `[x, y, size, rotation, color, shape]` per particle.
    #[must_use]
    pub fn particles(&self) -> Vec<f32> {
        self.sequencer.explosion().render_buffer()
    }

    #[wasm_bindgen(js_name = flaskVisible)]
    #[must_use]
    pub fn flask_visible(&self) -> bool {
        self.sequencer.phase().flask_visible()
    }

    #[wasm_bindgen(js_name = isHeated)]
    #[must_use]
    pub fn is_heated(&self) -> bool {
        self.sequencer.phase().is_heated()
    }

    #[wasm_bindgen(js_name = showsTitle)]
    #[must_use]
    pub fn shows_title(&self) -> bool {
        self.sequencer.phase().shows_title()
    }

    #[wasm_bindgen(js_name = isFading)]
    #[must_use]
    pub fn is_fading(&self) -> bool {
        self.sequencer.phase().is_fading()
    }

    #[wasm_bindgen(js_name = surfacePeriodMs)]
    #[must_use]
    pub fn surface_period_ms(&self) -> u32 {
        self.sequencer.phase().surface_period_ms()
    }
}

/// Palette entry for a particle color index, as `#RRGGBB`.
#[wasm_bindgen(js_name = paletteHex)]
#[must_use]
pub fn palette_hex(index: u8) -> String {
    explosion::PALETTE[usize::from(index) % explosion::PALETTE.len()].to_string()
}

/// Whether the page should mount the intro, given the raw session flag.
#[wasm_bindgen(js_name = shouldPlayIntro)]
#[must_use]
pub fn should_play_intro(seen: Option<String>) -> bool {
    !host::is_seen(seen.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn frame_clock_keeps_the_remainder() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.whole_ms(16.6), 16);
        assert_eq!(clock.whole_ms(16.6), 33 - 16);
        assert_eq!(clock.whole_ms(16.9), 17);
    }

    #[test]
    fn frame_clock_ignores_bad_deltas() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.whole_ms(-5.0), 0);
        assert_eq!(clock.whole_ms(f64::NAN), 0);
        assert_eq!(clock.whole_ms(f64::INFINITY), 0);
        assert_eq!(clock.whole_ms(0.0), 0);
        assert_eq!(clock.whole_ms(1.0), 1);
    }

    #[test]
    fn palette_hex_wraps() {
        assert_eq!(palette_hex(0), "#1E6F9F");
        assert_eq!(palette_hex(4), "#E6EDF3");
        assert_eq!(palette_hex(5), "#1E6F9F");
    }

    #[test]
    fn should_play_only_without_flag() {
        assert!(should_play_intro(None));
        assert!(should_play_intro(Some(String::new())));
        assert!(!should_play_intro(Some("true".into())));
    }

    proptest! {
        #[test]
        fn prop_frame_clock_loses_no_time(deltas in proptest::collection::vec(0.0f64..50.0, 1..200)) {
            let mut clock = FrameClock::default();
            let whole: u64 = deltas.iter().map(|dt| clock.whole_ms(*dt)).sum();
            let exact: f64 = deltas.iter().sum();
            prop_assert!((exact - whole as f64) < 1.0 + 1e-6);
            prop_assert!(whole as f64 <= exact + 1e-6);
        }
    }
}
