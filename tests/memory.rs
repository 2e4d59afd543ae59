mod common;

mod tests {
    use myrtio_led_arcade::game::MemorySequence;
    use myrtio_led_arcade::{
        Button, Game, GameOutcome, GameSpeed, InputSnapshot, PatternCode, Stage, Timings,
    };

    use crate::common::{Driver, ScriptedRng, bank, led_button};

    fn game(draws: &[u32]) -> MemorySequence<ScriptedRng> {
        game_at(draws, GameSpeed::default())
    }

    fn game_at(draws: &[u32], speed: GameSpeed) -> MemorySequence<ScriptedRng> {
        MemorySequence::new(ScriptedRng::new(draws), bank(4), speed, Timings::default())
    }

    /// Milliseconds from the first tick until the player may answer
    fn showing_millis(speed: GameSpeed) -> i64 {
        let mut driver = Driver::new(4);
        let mut game = game_at(&[1, 3, 0], speed);
        driver.idle_until(&mut game, Stage::AwaitingInput);
        i64::try_from(driver.now.as_millis()).unwrap()
    }

    fn repeat(driver: &mut Driver, game: &mut MemorySequence<ScriptedRng>) {
        let sequence = game.sequence().to_vec();
        for led in sequence {
            assert_eq!(driver.tap(game, led_button(led)), GameOutcome::Running);
        }
    }

    #[test]
    fn test_memory_full_round_then_wrong_guess() {
        let mut driver = Driver::new(4);
        let mut game = game(&[1, 3, 0, 2]);
        assert_eq!(game.sequence(), [1, 3, 0]);
        assert_eq!(game.stage(), Stage::Idle);

        driver.idle_until(&mut game, Stage::AwaitingInput);
        for button in [Button::B, Button::Y, Button::A] {
            assert_eq!(driver.tap(&mut game, button), GameOutcome::Running);
        }
        assert_eq!(game.sequence(), [1, 3, 0, 2]);
        assert_eq!(game.session().round(), 1);
        assert_eq!(game.stage(), Stage::Showing);

        driver.idle_until(&mut game, Stage::AwaitingInput);
        for button in [Button::B, Button::Y, Button::A] {
            driver.tap(&mut game, button);
        }
        driver.tap(&mut game, Button::Y);
        assert_eq!(game.stage(), Stage::Ending);

        let outcome = driver.finish(&mut game);
        assert_eq!(outcome, GameOutcome::Failed { score: 3 });
        assert_eq!(game.stage(), Stage::Over(outcome));
        assert_eq!(driver.leds.state(), PatternCode::EMPTY);
    }

    #[test]
    fn test_memory_sequence_grows_by_one_per_round() {
        let mut driver = Driver::new(4);
        let mut game = game(&[2, 0, 3, 1, 1, 2]);
        for round in 0..4 {
            driver.idle_until(&mut game, Stage::AwaitingInput);
            assert_eq!(game.sequence().len(), 3 + round);
            repeat(&mut driver, &mut game);
        }
        assert_eq!(game.sequence().len(), 7);
        assert_eq!(game.session().round(), 4);
        assert_eq!(game.stage(), Stage::Showing);
    }

    #[test]
    fn test_memory_two_leds_at_once_fail() {
        let mut driver = Driver::new(4);
        let mut game = game(&[1, 1, 1]);
        driver.idle_until(&mut game, Stage::AwaitingInput);

        let both = InputSnapshot::idle().with(Button::B).with(Button::X);
        driver.tick(&mut game, &both);
        assert_eq!(driver.leds.state(), PatternCode::from_indices(&[1, 2]));
        driver.tick(&mut game, &InputSnapshot::idle());
        assert_eq!(driver.finish(&mut game), GameOutcome::Failed { score: 2 });
    }

    #[test]
    fn test_memory_pick_is_evaluated_on_release() {
        let mut driver = Driver::new(4);
        let mut game = game(&[0, 1, 2]);
        driver.idle_until(&mut game, Stage::AwaitingInput);

        driver.hold(&mut game, &InputSnapshot::idle().with(Button::A), 20);
        assert_eq!(game.session().cursor(), 0);
        assert_eq!(driver.leds.state(), PatternCode::single(0));
        driver.tick(&mut game, &InputSnapshot::idle());
        assert_eq!(game.session().cursor(), 1);
        assert_eq!(driver.leds.state(), PatternCode::EMPTY);
    }

    #[test]
    fn test_memory_exit_while_showing() {
        let mut driver = Driver::new(4);
        let mut game = game(&[3, 2, 1]);
        driver.hold(&mut game, &InputSnapshot::idle(), 30);
        assert_eq!(game.stage(), Stage::Showing);

        driver.tap(&mut game, Button::Back);
        assert_eq!(game.stage(), Stage::Ending);
        assert_eq!(driver.finish(&mut game), GameOutcome::Aborted { score: 2 });
        assert_eq!(driver.leds.state(), PatternCode::EMPTY);
    }

    #[test]
    fn test_memory_restarts_fresh() {
        let mut driver = Driver::new(4);
        let mut game = game(&[0, 0, 0]);
        driver.idle_until(&mut game, Stage::AwaitingInput);
        driver.tap(&mut game, Button::Y);
        assert!(driver.finish(&mut game).is_over());

        let mut again = crate::tests::game(&[0, 0, 0]);
        driver.idle_until(&mut again, Stage::AwaitingInput);
        assert_eq!(again.session().round(), 0);
    }

    #[test]
    fn test_memory_speed_scales_show_time() {
        let slow = showing_millis(GameSpeed::new(0));
        let normal = showing_millis(GameSpeed::default());
        let fast = showing_millis(GameSpeed::new(3));
        assert!(slow > normal && normal > fast);

        // three announcement blinks (on plus a third off) and three sequence
        // steps (on plus off), each scaled by 1 / reciprocal
        let shown = |reciprocal: f64| (3.0 * 1.33 + 6.0) * 500.0 / reciprocal;
        let expected = (shown(0.75) - shown(1.8)).round() as i64;
        assert!((slow - fast - expected).abs() <= 20, "{slow} - {fast} vs {expected}");
        let expected = (shown(1.0) - shown(1.8)).round() as i64;
        assert!((normal - fast - expected).abs() <= 20, "{normal} - {fast} vs {expected}");
    }
}
