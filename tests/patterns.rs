mod tests {
    use garland_composer::color::{BLACK, WHITE};
    use garland_composer::{
        Action, Framebuffer, Instant, Lifecycle, PatternId, PatternSlot, Phase,
    };

    const LEN: usize = 60;
    const SEED: u64 = 42;

    struct Harness {
        lifecycle: Lifecycle,
        pattern: PatternSlot<64>,
        frame: Framebuffer<64>,
        now: u64,
    }

    impl Harness {
        fn new(id: PatternId) -> Self {
            Self {
                lifecycle: Lifecycle::new(),
                pattern: id.to_slot(LEN, SEED),
                frame: Framebuffer::new(LEN).unwrap(),
                now: 0,
            }
        }

        fn step(&mut self) -> Phase {
            self.now += 25;
            self.lifecycle
                .step(&mut self.pattern, Instant::from_millis(self.now), &mut self.frame)
        }

        /// Step until `phase` is reached, returning the number of ticks taken
        fn run_until(&mut self, phase: Phase, limit: u32) -> Option<u32> {
            (1..=limit).find(|_| self.step() == phase)
        }

        fn is_black(&self) -> bool {
            self.frame.as_slice().iter().all(|pixel| *pixel == BLACK)
        }
    }

    #[test]
    fn test_slots_match_ids() {
        for id in PatternId::ALL {
            let slot: PatternSlot<64> = id.to_slot(LEN, SEED);
            assert_eq!(slot.id(), id);
        }
    }

    #[test]
    fn test_every_pattern_activates() {
        for id in PatternId::ALL {
            let mut harness = Harness::new(id);
            harness.lifecycle.apply(Action::Start);
            assert!(
                harness.run_until(Phase::Active, 5000).is_some(),
                "{} never became active",
                id.as_str()
            );
        }
    }

    #[test]
    fn test_every_pattern_stops_softly() {
        for id in PatternId::ALL {
            let mut harness = Harness::new(id);
            harness.lifecycle.apply(Action::Start);
            harness.run_until(Phase::Active, 5000);
            for _ in 0..50 {
                harness.step();
            }

            harness.lifecycle.apply(Action::Stop);
            assert!(
                harness.run_until(Phase::Idle, 5000).is_some(),
                "{} never went idle",
                id.as_str()
            );
        }
    }

    #[test]
    fn test_hard_stop_blanks_in_one_tick() {
        for id in PatternId::ALL {
            let mut harness = Harness::new(id);
            harness.lifecycle.apply(Action::Start);
            for _ in 0..200 {
                harness.step();
            }

            harness.lifecycle.apply(Action::HardStop);
            assert_eq!(harness.step(), Phase::Idle, "{}", id.as_str());
            assert!(harness.is_black(), "{} left pixels lit", id.as_str());
        }
    }

    #[test]
    fn test_hard_stop_while_activating() {
        for id in PatternId::ALL {
            let mut harness = Harness::new(id);
            harness.lifecycle.apply(Action::Start);
            harness.step();

            harness.lifecycle.apply(Action::HardStop);
            assert_eq!(harness.step(), Phase::Idle, "{}", id.as_str());
            assert!(harness.is_black(), "{} left pixels lit", id.as_str());
        }
    }

    #[test]
    fn test_hard_stop_while_fading_out() {
        for id in PatternId::ALL {
            let mut harness = Harness::new(id);
            harness.lifecycle.apply(Action::Start);
            harness.run_until(Phase::Active, 5000).unwrap();

            harness.lifecycle.apply(Action::Stop);
            for _ in 0..2 {
                harness.step();
            }
            assert_eq!(harness.lifecycle.phase(), Phase::Deactivating, "{}", id.as_str());

            assert!(harness.lifecycle.apply(Action::HardStop));
            assert_eq!(harness.step(), Phase::Idle, "{}", id.as_str());
            assert!(harness.is_black(), "{} left pixels lit", id.as_str());
        }
    }

    /// Ticks from a soft stop until the pattern goes idle
    fn fade_out_ticks(harness: &mut Harness) -> Option<u32> {
        harness.lifecycle.apply(Action::Stop);
        harness.run_until(Phase::Idle, 5000)
    }

    #[test]
    fn test_restart_mid_drain_fades_out_fully() {
        let mut fresh = Harness::new(PatternId::Rainbow);
        fresh.lifecycle.apply(Action::Start);
        fresh.run_until(Phase::Active, 5000).unwrap();
        let expected = fade_out_ticks(&mut fresh).unwrap();

        let mut restarted = Harness::new(PatternId::Rainbow);
        restarted.lifecycle.apply(Action::Start);
        restarted.run_until(Phase::Active, 5000).unwrap();
        restarted.lifecycle.apply(Action::Stop);
        // Past the first blanking pass, into the second
        for _ in 0..7 {
            restarted.step();
        }
        assert_eq!(restarted.lifecycle.phase(), Phase::Deactivating);
        restarted.lifecycle.apply(Action::Start);
        restarted.run_until(Phase::Active, 5000).unwrap();

        assert_eq!(fade_out_ticks(&mut restarted), Some(expected));
    }

    #[test]
    fn test_restart_after_idle() {
        let mut harness = Harness::new(PatternId::Candycane);
        harness.lifecycle.apply(Action::Start);
        harness.run_until(Phase::Active, 5000).unwrap();
        harness.lifecycle.apply(Action::HardStop);
        harness.step();

        harness.lifecycle.apply(Action::Start);
        assert_eq!(harness.step(), Phase::Activating);
        assert!(harness.run_until(Phase::Active, 5000).is_some());
    }

    #[test]
    fn test_off_clears_strip_in_one_pass() {
        let mut harness = Harness::new(PatternId::Off);
        harness.frame.fill(WHITE);
        harness.lifecycle.apply(Action::Start);

        let ticks = harness.run_until(Phase::Active, 5000).unwrap();
        assert_eq!(ticks, u32::try_from(LEN).unwrap() + 1);
        assert!(harness.is_black());
    }

    #[test]
    fn test_same_seed_same_frames() {
        let mut first = Harness::new(PatternId::Twinkle);
        let mut second = Harness::new(PatternId::Twinkle);
        first.lifecycle.apply(Action::Start);
        second.lifecycle.apply(Action::Start);
        for _ in 0..300 {
            first.step();
            second.step();
        }
        assert_eq!(first.frame, second.frame);
    }

    #[test]
    fn test_blur_keeps_adopted_frame() {
        let mut harness = Harness::new(PatternId::Blur);
        harness.frame.fill(WHITE);
        harness.lifecycle.apply(Action::Start);
        assert_eq!(harness.step(), Phase::Active);
        harness.step();
        // No dots before tick 10, and neighbors of a uniform strip average
        // to the same color
        assert!(
            harness
                .frame
                .as_slice()
                .iter()
                .all(|pixel| *pixel == WHITE)
        );
    }
}
