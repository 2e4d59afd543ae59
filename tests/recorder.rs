mod common;

mod tests {
    use myrtio_led_arcade::game::PatternRecorder;
    use myrtio_led_arcade::pattern::MAX_SEGMENTS;
    use myrtio_led_arcade::{
        Button, Duration, Game, GameOutcome, InputSnapshot, PatternCode, Stage, Timings,
    };

    use crate::common::{Driver, bank, press};

    fn ready() -> (Driver, PatternRecorder) {
        let mut driver = Driver::new(4);
        let mut game = PatternRecorder::new(bank(4), Timings::default(), 11);
        driver.idle_until(&mut game, Stage::AwaitingInput);
        (driver, game)
    }

    fn record_sample(driver: &mut Driver, game: &mut PatternRecorder) {
        driver.tap(game, Button::DPadDown);
        assert!(game.is_recording());
        driver.hold(game, &press(Button::A), 30);
        driver.hold(game, &press(Button::B), 20);
        driver.hold(game, &InputSnapshot::idle(), 10);
        driver.tick(game, &press(Button::Back));
    }

    #[test]
    fn test_recorder_captures_every_interval() {
        let (mut driver, mut game) = ready();
        record_sample(&mut driver, &mut game);
        assert!(!game.is_recording());

        let recorded: Vec<(u8, Duration)> = game
            .segments()
            .iter()
            .map(|segment| (segment.code.bits(), segment.duration))
            .collect();
        assert_eq!(
            recorded,
            [
                (0, Duration::from_millis(20)),
                (0b01, Duration::from_millis(300)),
                (0b10, Duration::from_millis(200)),
                (0, Duration::from_millis(100)),
            ]
        );
    }

    #[test]
    fn test_recorder_mirrors_held_buttons() {
        let (mut driver, mut game) = ready();
        driver.tap(&mut game, Button::DPadDown);
        driver.tick(&mut game, &press(Button::A).with(Button::Y));
        assert_eq!(driver.leds.state(), PatternCode::from_indices(&[0, 3]));
    }

    #[test]
    fn test_recorder_replays_verbatim() {
        let (mut driver, mut game) = ready();
        record_sample(&mut driver, &mut game);
        // Back is still held after saving, it must not exit
        driver.hold(&mut game, &press(Button::Back), 5);
        driver.idle_until(&mut game, Stage::AwaitingInput);

        let before = driver.leds.output().frames.len();
        driver.tap(&mut game, Button::DPadUp);
        assert_eq!(game.stage(), Stage::Showing);
        driver.idle_until(&mut game, Stage::AwaitingInput);

        let frames: Vec<u8> = driver.leds.output().frames[before..]
            .iter()
            .map(|code| code.bits())
            .collect();
        assert_eq!(frames, [0, 0b01, 0b10, 0, 0]);
    }

    #[test]
    fn test_recorder_plays_showcase_when_empty() {
        let (mut driver, mut game) = ready();
        driver.tap(&mut game, Button::DPadUp);
        assert_eq!(game.stage(), Stage::Showing);
        assert!(game.segments().is_empty());
    }

    #[test]
    fn test_recorder_saves_when_full() {
        let (mut driver, mut game) = ready();
        driver.tap(&mut game, Button::DPadDown);
        for _ in 0..MAX_SEGMENTS {
            driver.tick(&mut game, &press(Button::X));
            driver.tick(&mut game, &InputSnapshot::idle());
        }
        assert!(!game.is_recording());
        assert_eq!(game.segments().len(), MAX_SEGMENTS);
    }

    #[test]
    fn test_recorder_exit_from_menu() {
        let (mut driver, mut game) = ready();
        record_sample(&mut driver, &mut game);
        driver.tick(&mut game, &InputSnapshot::idle());
        driver.idle_until(&mut game, Stage::AwaitingInput);

        driver.tap(&mut game, Button::Back);
        assert_eq!(driver.finish(&mut game), GameOutcome::Aborted { score: 4 });
        assert_eq!(driver.leds.state(), PatternCode::EMPTY);
    }
}
