mod tests {
    use garland_composer::color::{BLACK, Rgb, wheel};
    use garland_composer::{
        ColorOrder, CommandBoard, Duration, EngineConfig, FrameScheduler, Instant, OutputDriver,
        PatternId, Phase, Renderer, ShutdownSignal, SmartLedsOutput,
    };
    use smart_leds::{RGB8, SmartLedsWrite};

    /// Records every frame it is handed, optionally rejecting them
    #[derive(Default)]
    struct Recorder {
        frames: Vec<Vec<Rgb>>,
        reject: bool,
    }

    impl OutputDriver for Recorder {
        type Error = &'static str;

        fn write(&mut self, colors: &[Rgb]) -> Result<(), Self::Error> {
            if self.reject {
                return Err("bus busy");
            }
            self.frames.push(colors.to_vec());
            Ok(())
        }
    }

    fn config(led_count: u16) -> EngineConfig {
        EngineConfig {
            led_count,
            ..EngineConfig::default()
        }
    }

    #[test]
    fn test_rainbow_first_tick() {
        let board = CommandBoard::new();
        let renderer: Renderer<'_, 8> = Renderer::new(&board, &config(8)).unwrap();
        let mut scheduler = FrameScheduler::new(renderer, Recorder::default());

        assert!(board.dispatcher().dispatch("rainbow"));
        let result = scheduler.tick(Instant::from_millis(1000));

        assert!(result.transmitted);
        let frame = &scheduler.output().frames[0];
        assert_eq!(frame.len(), 8);
        // 1000 ms at 30 wheel steps per second
        assert_eq!(frame[0], wheel(30));
        assert_eq!(frame[5], wheel(35));
        assert_eq!(board.phase(PatternId::Rainbow), Phase::Active);
    }

    #[test]
    fn test_deadline_and_sleep() {
        let board = CommandBoard::new();
        let renderer: Renderer<'_, 8> = Renderer::new(&board, &config(8)).unwrap();
        let mut scheduler = FrameScheduler::from_config(renderer, Recorder::default(), &config(8));
        assert_eq!(scheduler.frame_duration(), Duration::from_millis(25));

        let result = scheduler.tick(Instant::from_millis(100));
        assert_eq!(result.started, Instant::from_millis(100));
        assert_eq!(result.next_deadline, Instant::from_millis(125));
        assert_eq!(
            scheduler.pace(&result, Instant::from_millis(110)),
            Duration::from_millis(15)
        );
        assert_eq!(scheduler.stats().overruns, 0);
    }

    #[test]
    fn test_overrun_does_not_catch_up() {
        let board = CommandBoard::new();
        let renderer: Renderer<'_, 8> = Renderer::new(&board, &config(8)).unwrap();
        let mut scheduler = FrameScheduler::new(renderer, Recorder::default());

        let result = scheduler.tick(Instant::from_millis(0));
        assert_eq!(
            scheduler.pace(&result, Instant::from_millis(60)),
            Duration::from_ticks(0)
        );
        assert_eq!(scheduler.stats().overruns, 1);

        let next = scheduler.tick(Instant::from_millis(60));
        assert_eq!(next.next_deadline, Instant::from_millis(85));
    }

    #[test]
    fn test_sink_failure_skips_frame() {
        let board = CommandBoard::new();
        let renderer: Renderer<'_, 8> = Renderer::new(&board, &config(8)).unwrap();
        let mut scheduler = FrameScheduler::new(
            renderer,
            Recorder {
                reject: true,
                ..Recorder::default()
            },
        );

        board.dispatcher().dispatch("classic");
        let result = scheduler.tick(Instant::from_millis(0));
        assert!(!result.transmitted);
        assert_eq!(scheduler.stats().failed, 1);
        assert_eq!(scheduler.stats().frames, 1);

        // The engine keeps running regardless
        let result = scheduler.tick(Instant::from_millis(25));
        assert!(!result.transmitted);
        assert_eq!(scheduler.stats().frames, 2);
        assert!(scheduler.renderer().phase(PatternId::Classic).is_running());
    }

    #[test]
    fn test_teardown_sends_black_frame() {
        let board = CommandBoard::new();
        let renderer: Renderer<'_, 64> = Renderer::new(&board, &config(60)).unwrap();
        let mut scheduler = FrameScheduler::new(renderer, Recorder::default());

        board.dispatcher().dispatch("twinkle");
        for tick in 0..100 {
            scheduler.tick(Instant::from_millis(tick * 25));
        }
        board.dispatcher().dispatch("candycane");

        assert!(scheduler.teardown(Instant::from_millis(2500)));
        let last = scheduler.output().frames.last().unwrap();
        assert!(last.iter().all(|pixel| *pixel == BLACK));
        for id in PatternId::ALL {
            assert_eq!(scheduler.renderer().phase(id), Phase::Idle);
            assert_eq!(board.pending(id), None);
        }
    }

    #[test]
    fn test_shutdown_signal() {
        static SHUTDOWN: ShutdownSignal = ShutdownSignal::new();
        assert!(!SHUTDOWN.is_requested());
        SHUTDOWN.request();
        assert!(SHUTDOWN.is_requested());
    }

    /// Minimal `smart-leds` writer capturing the last frame
    #[derive(Default)]
    struct Capture {
        pixels: Vec<RGB8>,
    }

    impl SmartLedsWrite for Capture {
        type Error = ();
        type Color = RGB8;

        fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
        where
            T: IntoIterator<Item = I>,
            I: Into<Self::Color>,
        {
            self.pixels = iterator.into_iter().map(Into::into).collect();
            Ok(())
        }
    }

    #[test]
    fn test_smart_leds_output_reorders() {
        let mut output = SmartLedsOutput::new(Capture::default(), ColorOrder::Grb);
        OutputDriver::write(&mut output, &[Rgb { r: 10, g: 20, b: 30 }]).unwrap();
        assert_eq!(output.into_inner().pixels, [RGB8 { r: 20, g: 10, b: 30 }]);
    }
}
