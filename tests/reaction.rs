mod common;

mod tests {
    use myrtio_led_arcade::config::time_budget;
    use myrtio_led_arcade::game::{ReactionRace, TURNS_PER_ROUND};
    use myrtio_led_arcade::{
        Button, Duration, Game, GameOutcome, InputSnapshot, PatternCode, Stage, Timings,
    };

    use crate::common::{Driver, ScriptedRng, TICK, bank, led_button, press};

    /// Pauses of 0.3 s, secret LED 2
    fn game() -> ReactionRace<ScriptedRng> {
        ReactionRace::new(ScriptedRng::new(&[0, 2]), bank(4), Timings::default())
    }

    /// Wait until `deadline - ahead`, then press the secret and release it
    fn answer(driver: &mut Driver, game: &mut ReactionRace<ScriptedRng>, ahead: Duration) {
        let deadline = game.deadline().unwrap();
        let secret = game.secret().unwrap();
        while driver.now + TICK + ahead < deadline {
            driver.tick(game, &InputSnapshot::idle());
        }
        driver.tick(game, &press(led_button(secret)));
        driver.tick(game, &InputSnapshot::idle());
    }

    #[test]
    fn test_reaction_deadline_uses_budget_and_grace() {
        let mut driver = Driver::new(4);
        let mut game = game();
        driver.idle_until(&mut game, Stage::AwaitingInput);

        assert_eq!(game.secret(), Some(2));
        assert_eq!(driver.leds.state(), PatternCode::single(2));
        let lit_at = game.lit_at().unwrap();
        assert_eq!(game.deadline(), Some(lit_at + Duration::from_millis(1500)));
        assert_eq!(game.window(), time_budget(0) + Duration::from_millis(250));
    }

    #[test]
    fn test_reaction_release_on_deadline_is_in_time() {
        let mut driver = Driver::new(4);
        let mut game = game();
        driver.idle_until(&mut game, Stage::AwaitingInput);

        let deadline = game.deadline().unwrap();
        answer(&mut driver, &mut game, Duration::from_ticks(0));
        assert_eq!(driver.now, deadline + TICK);
        assert_eq!(game.turn(), 1);
        assert_eq!(game.stage(), Stage::Showing);
    }

    #[test]
    fn test_reaction_late_release_fails() {
        let mut driver = Driver::new(4);
        let mut game = game();
        driver.idle_until(&mut game, Stage::AwaitingInput);

        let deadline = game.deadline().unwrap();
        while driver.now < deadline {
            driver.tick(&mut game, &InputSnapshot::idle());
        }
        driver.tick(&mut game, &press(Button::X));
        assert_eq!(game.stage(), Stage::AwaitingInput);
        driver.tick(&mut game, &InputSnapshot::idle());
        assert_eq!(game.stage(), Stage::Ending);
        assert_eq!(driver.finish(&mut game), GameOutcome::Failed { score: 0 });
        assert_eq!(driver.leds.state(), PatternCode::EMPTY);
    }

    #[test]
    fn test_reaction_no_answer_fails() {
        let mut driver = Driver::new(4);
        let mut game = game();
        driver.idle_until(&mut game, Stage::AwaitingInput);
        assert_eq!(driver.finish(&mut game), GameOutcome::Failed { score: 0 });
    }

    #[test]
    fn test_reaction_wrong_button_fails() {
        let mut driver = Driver::new(4);
        let mut game = game();
        driver.idle_until(&mut game, Stage::AwaitingInput);

        driver.tick(&mut game, &press(Button::A));
        assert_eq!(driver.leds.state(), PatternCode::from_indices(&[0, 2]));
        driver.tick(&mut game, &InputSnapshot::idle());
        assert_eq!(game.stage(), Stage::Ending);
        assert_eq!(driver.finish(&mut game), GameOutcome::Failed { score: 0 });
    }

    #[test]
    fn test_reaction_extra_button_fails() {
        let mut driver = Driver::new(4);
        let mut game = game();
        driver.idle_until(&mut game, Stage::AwaitingInput);

        driver.tick(&mut game, &press(Button::X).with(Button::Y));
        driver.tick(&mut game, &InputSnapshot::idle());
        assert_eq!(driver.finish(&mut game), GameOutcome::Failed { score: 0 });
    }

    #[test]
    fn test_reaction_round_shortens_window() {
        let mut driver = Driver::new(4);
        let mut game = game();
        for turn in 0..TURNS_PER_ROUND {
            driver.idle_until(&mut game, Stage::AwaitingInput);
            assert_eq!(game.turn(), turn);
            answer(&mut driver, &mut game, Duration::from_millis(1000));
        }
        assert_eq!(game.round(), 1);
        assert_eq!(game.turn(), 0);

        driver.idle_until(&mut game, Stage::AwaitingInput);
        let lit_at = game.lit_at().unwrap();
        assert_eq!(game.deadline(), Some(lit_at + Duration::from_millis(1350)));

        driver.tap(&mut game, Button::Back);
        assert_eq!(driver.finish(&mut game), GameOutcome::Aborted { score: 1 });
    }

    fn full_frames(driver: &Driver, from: usize, count: u8) -> usize {
        let all = bank(count).all();
        let frames = &driver.leds.output().frames[from..];
        frames.iter().filter(|&&code| code == all).count()
    }

    #[test]
    fn test_reaction_first_round_has_no_flourish() {
        let mut driver = Driver::new(4);
        let mut game = game();
        driver.idle_until(&mut game, Stage::AwaitingInput);
        // only the intro progress bar fills the bank
        assert_eq!(full_frames(&driver, 0, 4), 1);
    }

    #[test]
    fn test_reaction_flourish_blinks_round_times() {
        let mut driver = Driver::new(8);
        let mut game = ReactionRace::new(ScriptedRng::new(&[0, 2]), bank(8), Timings::default());
        let mut round_end = 0;
        for _ in 0..TURNS_PER_ROUND {
            driver.idle_until(&mut game, Stage::AwaitingInput);
            round_end = driver.leds.output().frames.len();
            answer(&mut driver, &mut game, Duration::from_millis(1000));
        }
        assert_eq!(game.round(), 1);

        driver.idle_until(&mut game, Stage::AwaitingInput);
        assert_eq!(full_frames(&driver, round_end, 8), 1);
    }

    #[test]
    fn test_time_budget_is_clamped() {
        assert_eq!(time_budget(0), Duration::from_millis(1250));
        assert_eq!(time_budget(11), Duration::from_millis(200));
        assert_eq!(time_budget(15), Duration::from_ticks(0));
        assert_eq!(time_budget(500), Duration::from_ticks(0));
    }
}
