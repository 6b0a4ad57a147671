//! Whole-run scenarios on the virtual clock, including the page handing
//! off from intro to main content.

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use crate::explosion::BURST_SIZE;
    use crate::host::{MemoryStore, Page, SessionStore, View, SEEN_KEY};
    use crate::{IntroConfig, Phase, Sequencer};

    fn counted(seed: u64) -> (Sequencer<SmallRng>, Rc<Cell<u32>>) {
        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        let seq = Sequencer::new(
            IntroConfig::default(),
            SmallRng::seed_from_u64(seed),
            move || counter.set(counter.get() + 1),
        );
        (seq, fired)
    }

    /// Advance to an absolute virtual time.
    fn advance_to(seq: &mut Sequencer<SmallRng>, at_ms: u64) {
        let now = seq.now_ms();
        seq.advance(at_ms - now);
    }

    #[test]
    fn default_timeline_end_to_end() {
        let (mut seq, fired) = counted(42);
        seq.start();

        let checkpoints = [
            (599, Phase::Idle),
            (600, Phase::Bubbling),
            (2599, Phase::Bubbling),
            (2600, Phase::Heating),
            (4600, Phase::Boiling),
            (6099, Phase::Boiling),
        ];
        for (at, phase) in checkpoints {
            advance_to(&mut seq, at);
            assert_eq!(seq.phase(), phase, "at {at}ms");
        }

        advance_to(&mut seq, 6100);
        assert_eq!(seq.phase(), Phase::Exploding);
        assert_eq!(seq.explosion().len(), BURST_SIZE);

        advance_to(&mut seq, 6700);
        assert_eq!(seq.phase(), Phase::Revealing);
        advance_to(&mut seq, 8899);
        assert_eq!(seq.phase(), Phase::Revealing);
        advance_to(&mut seq, 8900);
        assert_eq!(seq.phase(), Phase::Fade);

        advance_to(&mut seq, 9799);
        assert_eq!(fired.get(), 0);
        advance_to(&mut seq, 9800);
        assert!(seq.is_complete());
        assert_eq!(fired.get(), 1);
        assert_eq!(seq.pending_tasks(), 0);
    }

    #[test]
    fn one_big_step_still_completes_once() {
        let (mut seq, fired) = counted(43);
        seq.start();
        seq.advance(9800);
        assert!(seq.is_complete());
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn browser_frame_cadence_completes() {
        let (mut seq, fired) = counted(44);
        seq.start();
        let mut frames = 0;
        while !seq.is_complete() {
            seq.advance(16);
            frames += 1;
            assert!(frames < 1000);
        }
        // 9800 / 16 rounds up to 613 frames.
        assert_eq!(frames, 613);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn bubbles_peak_while_boiling() {
        let (mut seq, _) = counted(45);
        seq.start();
        let mut peak = [0usize; 3];
        while seq.phase() != Phase::Exploding {
            seq.advance(10);
            let slot = match seq.phase() {
                Phase::Bubbling => 0,
                Phase::Heating => 1,
                Phase::Boiling => 2,
                _ => continue,
            };
            peak[slot] = peak[slot].max(seq.bubbles().len());
        }
        assert!(peak[0] <= 20);
        assert!(peak[1] <= 35);
        assert!(peak[2] <= 50);
        assert!(peak[2] > peak[0], "peaks {peak:?}");
    }

    #[test]
    fn page_switches_to_main_when_intro_completes() {
        let page = Rc::new(RefCell::new(Page::load(MemoryStore::new())));
        assert_eq!(page.borrow().view(), View::Intro);

        let handle = Rc::clone(&page);
        let mut seq = Sequencer::new(
            IntroConfig::default(),
            SmallRng::seed_from_u64(46),
            move || handle.borrow_mut().intro_complete(),
        );
        seq.start();
        seq.advance(9000);
        assert_eq!(page.borrow().view(), View::Intro);
        seq.advance(800);
        assert_eq!(page.borrow().view(), View::Main);

        drop(seq);
        let store = Rc::try_unwrap(page)
            .map(|cell| cell.into_inner().into_store())
            .unwrap();
        assert_eq!(store.get(SEEN_KEY).as_deref(), Some("true"));
        assert_eq!(Page::load(store).view(), View::Main);
    }

    #[test]
    fn skip_hands_off_immediately() {
        let page = Rc::new(RefCell::new(Page::load(MemoryStore::new())));
        let handle = Rc::clone(&page);
        let mut seq = Sequencer::new(
            IntroConfig::default(),
            SmallRng::seed_from_u64(47),
            move || handle.borrow_mut().intro_complete(),
        );
        seq.start();
        seq.advance(3000);
        assert_eq!(seq.phase(), Phase::Heating);

        seq.skip();
        assert_eq!(page.borrow().view(), View::Main);
        let level = seq.heat().liquid_level;
        seq.advance(10_000);
        assert!((seq.heat().liquid_level - level).abs() < f32::EPSILON);
        assert_eq!(seq.pending_tasks(), 0);
    }

    #[test]
    fn custom_timings_from_json() {
        let config = IntroConfig::from_json(
            r#"{"start_delay_ms": 0, "bubbling_ms": 100, "heating_ms": 100,
                "boiling_ms": 100, "exploding_ms": 100, "revealing_ms": 100, "fade_ms": 100}"#,
        )
        .unwrap();
        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        let mut seq = Sequencer::new(config, SmallRng::seed_from_u64(48), move || {
            counter.set(counter.get() + 1);
        });
        seq.start();
        seq.advance(299);
        assert_eq!(seq.phase(), Phase::Boiling);
        seq.advance(1);
        assert_eq!(seq.phase(), Phase::Exploding);
        assert_eq!(seq.explosion().len(), BURST_SIZE);
        seq.advance(300);
        assert!(seq.is_complete());
        assert_eq!(fired.get(), 1);
    }
}
