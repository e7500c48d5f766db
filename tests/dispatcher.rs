mod tests {
    use garland_composer::{
        Action, Command, CommandBoard, EngineConfig, Instant, PatternId, Phase, Renderer,
    };

    fn config(led_count: u16) -> EngineConfig {
        EngineConfig {
            led_count,
            ..EngineConfig::default()
        }
    }

    #[test]
    fn test_solo_exclusive_hard_stops_others() {
        let board = CommandBoard::new();
        let mut renderer: Renderer<'_, 64> = Renderer::new(&board, &config(60)).unwrap();
        let dispatcher = board.dispatcher();
        for id in PatternId::ALL {
            dispatcher.request_start(id);
        }
        renderer.render(Instant::from_millis(0));

        dispatcher.request_solo(PatternId::Rainbow);
        assert_eq!(board.pending(PatternId::Rainbow), Some(Action::Start));
        for id in PatternId::ALL {
            if id != PatternId::Rainbow {
                assert_eq!(board.pending(id), Some(Action::HardStop), "{}", id.as_str());
            }
        }
    }

    #[test]
    fn test_solo_skips_idle_patterns() {
        let board = CommandBoard::new();
        board.dispatcher().request_solo(PatternId::Wind);

        assert_eq!(board.pending(PatternId::Wind), Some(Action::Start));
        for id in PatternId::ALL {
            if id != PatternId::Wind {
                assert_eq!(board.pending(id), None, "{}", id.as_str());
            }
        }
    }

    #[test]
    fn test_solo_uses_target_flag() {
        let board = CommandBoard::new();
        let mut renderer: Renderer<'_, 300> = Renderer::new(&board, &config(300)).unwrap();
        let dispatcher = board.dispatcher();

        assert!(dispatcher.dispatch("rainbow"));
        renderer.render(Instant::from_millis(0));
        assert_eq!(renderer.phase(PatternId::Rainbow), Phase::Activating);

        assert!(dispatcher.dispatch("off"));
        assert_eq!(board.pending(PatternId::Rainbow), Some(Action::Stop));
        assert_eq!(board.pending(PatternId::Off), Some(Action::Start));

        renderer.render(Instant::from_millis(25));
        assert_eq!(renderer.phase(PatternId::Rainbow), Phase::Deactivating);
        assert!(!renderer.registry().entry(PatternId::Rainbow).lifecycle().is_hard_stopping());
        assert_eq!(renderer.phase(PatternId::Off), Phase::Activating);
    }

    #[test]
    fn test_solo_leaves_target_running_and_others_stopping() {
        let board = CommandBoard::new();
        let mut renderer: Renderer<'_, 64> = Renderer::new(&board, &config(60)).unwrap();
        let dispatcher = board.dispatcher();

        for id in PatternId::ALL {
            dispatcher.request_start(id);
        }
        renderer.render(Instant::from_millis(0));

        dispatcher.request_solo(PatternId::Twinkle);
        renderer.render(Instant::from_millis(25));
        for id in PatternId::ALL {
            let phase = renderer.phase(id);
            if id == PatternId::Twinkle {
                assert!(matches!(phase, Phase::Activating | Phase::Active));
            } else {
                assert!(
                    matches!(phase, Phase::Deactivating | Phase::Idle),
                    "{} is {}",
                    id.as_str(),
                    phase.as_str()
                );
            }
        }
    }

    #[test]
    fn test_later_request_replaces_pending() {
        let board = CommandBoard::new();
        let mut renderer: Renderer<'_, 64> = Renderer::new(&board, &config(60)).unwrap();
        let dispatcher = board.dispatcher();
        dispatcher.request_start(PatternId::Wind);
        renderer.render(Instant::from_millis(0));

        assert!(dispatcher.request_stop(PatternId::Wind, false));
        assert!(dispatcher.request_stop(PatternId::Wind, true));
        assert_eq!(board.pending(PatternId::Wind), Some(Action::HardStop));

        assert!(board.post(Command::new(PatternId::Wind, Action::Start)));
        assert_eq!(board.pending(PatternId::Wind), Some(Action::Start));
    }

    #[test]
    fn test_start_on_active_keeps_pending_stop() {
        let board = CommandBoard::new();
        let mut renderer: Renderer<'_, 64> = Renderer::new(&board, &config(60)).unwrap();
        let dispatcher = board.dispatcher();
        dispatcher.request_start(PatternId::Blur);
        renderer.render(Instant::from_millis(0));
        assert_eq!(board.phase(PatternId::Blur), Phase::Active);

        assert!(dispatcher.request_stop(PatternId::Blur, false));
        assert!(!dispatcher.request_start(PatternId::Blur));
        assert_eq!(board.pending(PatternId::Blur), Some(Action::Stop));

        renderer.render(Instant::from_millis(25));
        assert_eq!(renderer.phase(PatternId::Blur), Phase::Deactivating);
    }

    #[test]
    fn test_stop_on_idle_keeps_pending_start() {
        let board = CommandBoard::new();
        let mut renderer: Renderer<'_, 64> = Renderer::new(&board, &config(60)).unwrap();
        let dispatcher = board.dispatcher();

        assert!(dispatcher.request_start(PatternId::Candycane));
        assert!(!dispatcher.request_stop(PatternId::Candycane, false));
        assert_eq!(board.pending(PatternId::Candycane), Some(Action::Start));

        renderer.render(Instant::from_millis(0));
        assert_eq!(renderer.phase(PatternId::Candycane), Phase::Activating);
    }

    #[test]
    fn test_start_on_active_is_noop() {
        let board = CommandBoard::new();
        let mut renderer: Renderer<'_, 64> = Renderer::new(&board, &config(60)).unwrap();
        let dispatcher = board.dispatcher();

        assert!(dispatcher.request_start(PatternId::Blur));
        renderer.render(Instant::from_millis(0));
        assert_eq!(board.phase(PatternId::Blur), Phase::Active);

        let before = renderer.framebuffer().clone();
        assert!(!dispatcher.request_start(PatternId::Blur));
        assert_eq!(board.pending(PatternId::Blur), None);
        renderer.render(Instant::from_millis(25));
        assert_eq!(renderer.phase(PatternId::Blur), Phase::Active);
        assert_eq!(board.pending(PatternId::Blur), None);
        // An all-black strip blurs to itself
        assert_eq!(renderer.framebuffer(), &before);
    }

    #[test]
    fn test_stop_on_idle_is_noop() {
        let board = CommandBoard::new();
        let mut renderer: Renderer<'_, 64> = Renderer::new(&board, &config(60)).unwrap();

        assert!(!board.dispatcher().request_stop(PatternId::Fairy, false));
        assert_eq!(board.pending(PatternId::Fairy), None);
        renderer.render(Instant::from_millis(0));
        assert_eq!(renderer.phase(PatternId::Fairy), Phase::Idle);
    }

    #[test]
    fn test_unknown_names_are_ignored() {
        let board = CommandBoard::new();
        let dispatcher = board.dispatcher();
        assert!(!dispatcher.dispatch("strobe"));
        assert!(!dispatcher.dispatch(""));
        for id in PatternId::ALL {
            assert_eq!(board.pending(id), None);
        }

        assert!(dispatcher.dispatch(" classic\n"));
        assert_eq!(board.pending(PatternId::Classic), Some(Action::Start));
    }

    #[test]
    fn test_pattern_names_round_trip() {
        for id in PatternId::ALL {
            assert_eq!(PatternId::parse_from_str(id.as_str()), Some(id));
            assert_eq!(PatternId::from_raw(id as u8), Some(id));
        }
        assert_eq!(PatternId::from_raw(8), None);
        assert!(PatternId::Rainbow.is_exclusive());
        assert!(PatternId::Blur.is_exclusive());
        assert!(!PatternId::Off.is_exclusive());
    }
}
