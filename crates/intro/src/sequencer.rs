//! The intro state machine.
//!
//! A single `Phase` value walks the `Timeline` on the virtual clock of a
//! `Scheduler`. Every task the sequencer registers is held by handle:
//!
//! - phase tasks (the transition timer and the optional intensity tick) are
//!   cancelled when the phase is left, before the next phase registers its own;
//! - the bubble task lives from `bubbling` entry until `boiling` ends;
//! - the frame task lives from `exploding` entry until the burst is empty or
//!   the sequence completes.
//!
//! Completion, skip and teardown all clear the scheduler, so nothing can fire
//! after the sequence is over.

use std::fmt;

use rand::Rng;
use tracing::{debug, info, trace, warn};

use crate::bubbles::Bubbles;
use crate::config::IntroConfig;
use crate::explosion::Explosion;
use crate::heat::{Heat, Shake};
use crate::phase::{Phase, Timeline};
use crate::schedule::{Job, Scheduler, TaskId};

/// Notification fired once when the intro is over.
pub type OnComplete = Box<dyn FnOnce()>;

#[derive(Debug, Default)]
struct PhaseTasks {
    transition: Option<TaskId>,
    heat: Option<TaskId>,
}

pub struct Sequencer<R> {
    config: IntroConfig,
    timeline: Timeline,
    scheduler: Scheduler,
    phase: Phase,
    started: bool,
    torn_down: bool,
    heat: Heat,
    bubbles: Bubbles,
    explosion: Explosion,
    rng: R,
    phase_tasks: PhaseTasks,
    bubble_task: Option<TaskId>,
    frame_task: Option<TaskId>,
    on_complete: Option<OnComplete>,
}

impl<R> fmt::Debug for Sequencer<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequencer")
            .field("phase", &self.phase)
            .field("now_ms", &self.scheduler.now())
            .field("heat", &self.heat)
            .field("bubbles", &self.bubbles.len())
            .field("particles", &self.explosion.len())
            .field("pending_tasks", &self.scheduler.pending())
            .finish_non_exhaustive()
    }
}

impl<R: Rng> Sequencer<R> {
    /// Build an idle sequencer. Nothing runs until `start`.
    #[must_use]
    pub fn new(config: IntroConfig, rng: R, on_complete: impl FnOnce() + 'static) -> Self {
        let timeline = Timeline::from_config(&config);
        Self {
            config,
            timeline,
            scheduler: Scheduler::new(),
            phase: Phase::Idle,
            started: false,
            torn_down: false,
            heat: Heat::default(),
            bubbles: Bubbles::new(),
            explosion: Explosion::new(),
            rng,
            phase_tasks: PhaseTasks::default(),
            bubble_task: None,
            frame_task: None,
            on_complete: Some(Box::new(on_complete)),
        }
    }

    /// Arm the start delay. Later calls are ignored.
    pub fn start(&mut self) {
        if self.torn_down {
            warn!("start after teardown ignored");
            return;
        }
        if self.phase == Phase::Complete {
            debug!("start after completion ignored");
            return;
        }
        if self.started {
            warn!(phase = %self.phase, "intro already started");
            return;
        }
        self.started = true;
        self.enter(Phase::Idle);
    }

    /// Move virtual time forward by `dt_ms`, running every task that falls due.
    pub fn advance(&mut self, dt_ms: u64) {
        if !self.is_running() {
            return;
        }
        let until = self.scheduler.now().saturating_add(dt_ms);
        while let Some((_, job)) = self.scheduler.pop_due(until) {
            self.run(job);
            if self.phase == Phase::Complete {
                return;
            }
        }
        self.scheduler.settle(until);
    }

    /// Jump straight to completion from any phase.
    pub fn skip(&mut self) {
        if self.torn_down || self.phase == Phase::Complete {
            return;
        }
        info!(phase = %self.phase, at_ms = self.scheduler.now(), "intro skipped");
        self.complete();
    }

    /// Unmount without completing: cancel everything and go inert.
    pub fn teardown(&mut self) {
        self.scheduler.clear();
        self.phase_tasks = PhaseTasks::default();
        self.bubble_task = None;
        self.frame_task = None;
        self.on_complete = None;
        self.torn_down = true;
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.started && !self.torn_down && self.phase != Phase::Complete
    }

    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.scheduler.now()
    }

    #[must_use]
    pub fn heat(&self) -> Heat {
        self.heat
    }

    #[must_use]
    pub fn bubbles(&self) -> &Bubbles {
        &self.bubbles
    }

    #[must_use]
    pub fn explosion(&self) -> &Explosion {
        &self.explosion
    }

    /// Registered tasks, across all owners.
    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }

    /// Flask jitter for the next rendered frame; still outside heating and boiling.
    pub fn shake_offset(&mut self) -> Shake {
        if self.phase.is_heated() {
            self.heat.shake_offset(&mut self.rng)
        } else {
            Shake::default()
        }
    }

    fn enter(&mut self, phase: Phase) {
        self.phase = phase;
        debug!(%phase, at_ms = self.scheduler.now(), "phase entered");

        match phase {
            Phase::Bubbling => {
                self.bubble_task = Some(
                    self.scheduler
                        .every(self.config.bubble_tick_ms, Job::Bubbles),
                );
            }
            Phase::Exploding => {
                self.frame_task = Some(self.scheduler.every(self.config.frame_ms, Job::Frame));
            }
            _ => {}
        }

        let Some(stage) = self.timeline.stage(phase) else {
            return;
        };
        // The intensity tick is registered first so that, when both fall due
        // on the last instant of the phase, it runs before the transition.
        if let Some((_, period)) = stage.tick {
            self.phase_tasks.heat = Some(self.scheduler.every(period, Job::Heat));
        }
        self.phase_tasks.transition = Some(self.scheduler.once(stage.duration_ms, Job::Advance));
    }

    fn run(&mut self, job: Job) {
        match job {
            Job::Advance => self.leave(),
            Job::Heat => {
                if let Some((law, _)) = self.timeline.stage(self.phase).and_then(|s| s.tick) {
                    self.heat.tick(law);
                }
            }
            Job::Bubbles => {
                if self.phase.is_liquid() {
                    self.bubbles
                        .tick(self.phase, self.heat.liquid_level, &mut self.rng);
                    trace!(population = self.bubbles.len(), "bubble tick");
                }
            }
            Job::Frame => {
                if self.phase.is_burst() {
                    self.explosion.step();
                }
                if self.explosion.is_empty() {
                    if let Some(id) = self.frame_task.take() {
                        self.scheduler.cancel(id);
                    }
                }
            }
        }
    }

    fn leave(&mut self) {
        let leaving = self.phase;
        self.cancel_phase_tasks();

        if leaving == Phase::Boiling {
            if let Some(id) = self.bubble_task.take() {
                self.scheduler.cancel(id);
            }
            self.bubbles.clear();
            self.explosion.detonate(&mut self.rng);
            debug!(count = self.explosion.len(), "burst generated");
        }

        match self.timeline.stage(leaving).map(|stage| stage.next) {
            Some(Phase::Complete) | None => self.complete(),
            Some(next) => self.enter(next),
        }
    }

    fn cancel_phase_tasks(&mut self) {
        let tasks = std::mem::take(&mut self.phase_tasks);
        for id in [tasks.transition, tasks.heat].into_iter().flatten() {
            self.scheduler.cancel(id);
        }
    }

    fn complete(&mut self) {
        self.scheduler.clear();
        self.phase_tasks = PhaseTasks::default();
        self.bubble_task = None;
        self.frame_task = None;
        self.phase = Phase::Complete;
        if let Some(on_complete) = self.on_complete.take() {
            info!(at_ms = self.scheduler.now(), "intro complete");
            on_complete();
        }
    }
}
