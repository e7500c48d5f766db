mod tests {
    use garland_composer::color::WHITE;
    use garland_composer::{Action, Framebuffer, Instant, Lifecycle, Pattern, Phase, Step};

    /// Goes active after `grow` steps and idle after `shrink` retiring steps
    #[derive(Default)]
    struct Counter {
        grow: u32,
        shrink: u32,
        steps: u32,
        resets: u32,
        seen: Vec<Step>,
    }

    impl Pattern<8> for Counter {
        fn step(&mut self, step: &Step, frame: &mut Framebuffer<8>) -> Phase {
            self.seen.push(*step);
            if step.hard_stop {
                frame.clear();
                return Phase::Idle;
            }
            self.steps += 1;
            frame.set(0, WHITE);
            match step.phase {
                Phase::Activating if self.steps >= self.grow => Phase::Active,
                Phase::Deactivating if self.steps >= self.shrink => Phase::Idle,
                phase => phase,
            }
        }

        fn reset(&mut self) {
            self.steps = 0;
            self.resets += 1;
        }
    }

    fn counter(grow: u32, shrink: u32) -> Counter {
        Counter {
            grow,
            shrink,
            ..Counter::default()
        }
    }

    #[test]
    fn test_transition_table() {
        let mut lifecycle = Lifecycle::new();
        assert!(!lifecycle.apply(Action::Stop));
        assert!(!lifecycle.apply(Action::HardStop));
        assert_eq!(lifecycle.phase(), Phase::Idle);

        assert!(lifecycle.apply(Action::Start));
        assert_eq!(lifecycle.phase(), Phase::Activating);
        assert!(!lifecycle.apply(Action::Start));

        assert!(lifecycle.apply(Action::Stop));
        assert_eq!(lifecycle.phase(), Phase::Deactivating);
        assert!(!lifecycle.is_hard_stopping());

        assert!(lifecycle.apply(Action::HardStop));
        assert!(lifecycle.is_hard_stopping());
        assert!(!lifecycle.apply(Action::HardStop));

        assert!(lifecycle.apply(Action::Start));
        assert_eq!(lifecycle.phase(), Phase::Activating);
        assert!(!lifecycle.is_hard_stopping());
    }

    #[test]
    fn test_idle_is_not_stepped() {
        let mut lifecycle = Lifecycle::new();
        let mut pattern = counter(1, 1);
        let mut frame: Framebuffer<8> = Framebuffer::new(8).unwrap();

        assert_eq!(
            lifecycle.step(&mut pattern, Instant::from_millis(0), &mut frame),
            Phase::Idle
        );
        assert!(pattern.seen.is_empty());
        assert_eq!(lifecycle.ticks(), 0);
    }

    #[test]
    fn test_full_cycle_resets_pattern() {
        let mut lifecycle = Lifecycle::new();
        let mut pattern = counter(3, 5);
        let mut frame: Framebuffer<8> = Framebuffer::new(8).unwrap();
        let now = Instant::from_millis(0);

        lifecycle.apply(Action::Start);
        assert_eq!(lifecycle.step(&mut pattern, now, &mut frame), Phase::Activating);
        assert_eq!(lifecycle.step(&mut pattern, now, &mut frame), Phase::Activating);
        assert_eq!(lifecycle.step(&mut pattern, now, &mut frame), Phase::Active);
        assert_eq!(lifecycle.step(&mut pattern, now, &mut frame), Phase::Active);

        lifecycle.apply(Action::Stop);
        assert_eq!(lifecycle.step(&mut pattern, now, &mut frame), Phase::Idle);
        assert_eq!(lifecycle.phase(), Phase::Idle);
        assert_eq!(pattern.resets, 1);
        assert_eq!(pattern.steps, 0);

        let ticks: Vec<u32> = pattern.seen.iter().map(|step| step.tick).collect();
        assert_eq!(ticks, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_hard_stop_reaches_pattern() {
        let mut lifecycle = Lifecycle::new();
        let mut pattern = counter(1, 100);
        let mut frame: Framebuffer<8> = Framebuffer::new(8).unwrap();
        let now = Instant::from_millis(0);

        lifecycle.apply(Action::Start);
        lifecycle.step(&mut pattern, now, &mut frame);
        assert_eq!(frame.get(0), WHITE);

        lifecycle.apply(Action::HardStop);
        assert_eq!(lifecycle.step(&mut pattern, now, &mut frame), Phase::Idle);
        let last = pattern.seen.last().unwrap();
        assert!(last.hard_stop);
        assert!(last.is_retiring());
        assert!(!lifecycle.is_hard_stopping());
        assert!(frame.as_slice().iter().all(|pixel| pixel.r == 0));
    }
}
