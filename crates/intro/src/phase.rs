//! Phase and timeline types for the intro sequence.

use std::fmt;

use crate::config::IntroConfig;

/// Discriminant values are read by the page through `Intro::phase`; do not reorder.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Phase {
    Idle = 0,
    Bubbling = 1,
    Heating = 2,
    Boiling = 3,
    Exploding = 4,
    Revealing = 5,
    Fade = 6,
    Complete = 7,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Bubbling => write!(f, "bubbling"),
            Self::Heating => write!(f, "heating"),
            Self::Boiling => write!(f, "boiling"),
            Self::Exploding => write!(f, "exploding"),
            Self::Revealing => write!(f, "revealing"),
            Self::Fade => write!(f, "fade"),
            Self::Complete => write!(f, "complete"),
        }
    }
}

impl Phase {
    /// Every phase in timeline order.
    pub const ALL: [Phase; 8] = [
        Phase::Idle,
        Phase::Bubbling,
        Phase::Heating,
        Phase::Boiling,
        Phase::Exploding,
        Phase::Revealing,
        Phase::Fade,
        Phase::Complete,
    ];

    /// The phase that follows this one. `Complete` is terminal.
    #[must_use]
    pub fn next(self) -> Option<Phase> {
        match self {
            Self::Idle => Some(Self::Bubbling),
            Self::Bubbling => Some(Self::Heating),
            Self::Heating => Some(Self::Boiling),
            Self::Boiling => Some(Self::Exploding),
            Self::Exploding => Some(Self::Revealing),
            Self::Revealing => Some(Self::Fade),
            Self::Fade => Some(Self::Complete),
            Self::Complete => None,
        }
    }

    /// Liquid phases: the bubble task runs while one of these is active.
    #[must_use]
    pub fn is_liquid(self) -> bool {
        matches!(self, Self::Bubbling | Self::Heating | Self::Boiling)
    }

    /// Burst phases: the explosion frame task runs while one of these is active.
    #[must_use]
    pub fn is_burst(self) -> bool {
        matches!(self, Self::Exploding | Self::Revealing | Self::Fade)
    }

    #[must_use]
    pub fn flask_visible(self) -> bool {
        matches!(
            self,
            Self::Idle | Self::Bubbling | Self::Heating | Self::Boiling
        )
    }

    /// Heat glow under the flask and the shake transform.
    #[must_use]
    pub fn is_heated(self) -> bool {
        matches!(self, Self::Heating | Self::Boiling)
    }

    #[must_use]
    pub fn shows_title(self) -> bool {
        matches!(self, Self::Revealing | Self::Fade)
    }

    #[must_use]
    pub fn is_fading(self) -> bool {
        self == Self::Fade
    }

    /// Period of the animated liquid surface; it churns faster while boiling.
    #[must_use]
    pub fn surface_period_ms(self) -> u32 {
        if self == Self::Boiling {
            400
        } else {
            1500
        }
    }
}

/// Which intensity law a stage ticks while it is active.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HeatTick {
    Heating,
    Boiling,
}

/// One row of the timeline: how long a phase lasts, what it ticks, where it goes.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Stage {
    pub duration_ms: u64,
    pub tick: Option<(HeatTick, u64)>,
    pub next: Phase,
}

/// Phase → stage table. `Complete` has no row.
#[derive(Clone, Debug)]
pub struct Timeline {
    stages: [Stage; 7],
}

impl Timeline {
    #[must_use]
    pub fn from_config(config: &IntroConfig) -> Self {
        let row = |phase: Phase, duration_ms: u64, tick: Option<(HeatTick, u64)>| Stage {
            duration_ms,
            tick,
            next: phase.next().unwrap_or(Phase::Complete),
        };
        Self {
            stages: [
                row(Phase::Idle, config.start_delay_ms, None),
                row(Phase::Bubbling, config.bubbling_ms, None),
                row(
                    Phase::Heating,
                    config.heating_ms,
                    Some((HeatTick::Heating, config.heating_tick_ms)),
                ),
                row(
                    Phase::Boiling,
                    config.boiling_ms,
                    Some((HeatTick::Boiling, config.boiling_tick_ms)),
                ),
                row(Phase::Exploding, config.exploding_ms, None),
                row(Phase::Revealing, config.revealing_ms, None),
                row(Phase::Fade, config.fade_ms, None),
            ],
        }
    }

    #[must_use]
    pub fn stage(&self, phase: Phase) -> Option<Stage> {
        self.stages.get(phase as usize).copied()
    }
}
