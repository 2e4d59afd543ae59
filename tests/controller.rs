mod common;

mod tests {
    use myrtio_led_arcade::pattern::{Blink, Flicker, PhaseBlink, ProgressBar, Sweep};
    use myrtio_led_arcade::{Duration, Instant, PatternCode, PhaseUpdate, Timings};

    use crate::common::controller;

    const STEP: Duration = Duration::from_millis(100);

    fn no_wait(_: Duration) {}

    #[test]
    fn test_set_phase_empty_matches_all_off() {
        let mut a = controller(4);
        let mut b = controller(4);
        a.set_phase(PatternCode::from_bits(0b1111));
        b.set_phase(PatternCode::from_bits(0b1111));

        a.set_phase(PatternCode::EMPTY);
        b.all_off();
        assert_eq!(a.output().pins, b.output().pins);
        assert_eq!(a.state(), PatternCode::EMPTY);
    }

    #[test]
    fn test_set_phase_commits_whole_frame_at_once() {
        let mut leds = controller(4);
        leds.set_phase(PatternCode::single(0));
        let code = PatternCode::from_indices(&[1, 3]);
        leds.set_phase(code);

        let sink = leds.output();
        assert_eq!(sink.frames.last(), Some(&code));
        // No frame ever showed a state in between
        assert_eq!(sink.frames.len(), 2);
        assert_eq!(sink.lit(), code);
    }

    #[test]
    fn test_inverted_equals_complement() {
        let code = PatternCode::from_indices(&[0, 2]);
        let mut a = controller(4);
        let mut b = controller(4);
        a.apply(&PhaseUpdate::set(code).inverted());
        b.set_phase(code.complement(b.bank()));
        assert_eq!(a.output().pins, b.output().pins);
        assert_eq!(a.state(), PatternCode::from_indices(&[1, 3]));
    }

    #[test]
    fn test_out_of_range_code_is_clamped() {
        let mut leds = controller(3);
        leds.set_phase(PatternCode::from_bits(0b1111_0001));
        assert_eq!(leds.state(), PatternCode::single(0));
        assert!(leds.output().writes.iter().all(|(index, _)| *index < 3));
    }

    #[test]
    fn test_auto_revert_restores_previous_state() {
        let mut leds = controller(4);
        leds.set_phase(PatternCode::single(0));
        let mut waited = Duration::from_ticks(0);
        leds.set_phase_advanced(
            PhaseUpdate::overlay(PatternCode::single(2)),
            STEP,
            true,
            Instant::from_millis(0),
            |d| waited += d,
        );
        assert_eq!(waited, STEP);
        assert_eq!(leds.state(), PatternCode::single(0));
        assert!(leds.output().frames.contains(&PatternCode::from_indices(&[0, 2])));
    }

    #[test]
    fn test_blink_returns_completion_instant() {
        let mut leds = controller(4);
        let blink = Blink::new(PatternCode::single(1), 3, STEP, Duration::from_millis(50));
        let start = Instant::from_millis(1000);
        assert_eq!(blink.completes_at(start), Instant::from_millis(1450));

        let end = leds.blink_pattern(blink, start, no_wait);
        assert_eq!(end, Instant::from_millis(1450));
        assert_eq!(leds.output().frames.len(), 6);
        assert_eq!(leds.state(), PatternCode::EMPTY);
    }

    #[test]
    fn test_sweep_lights_one_led_at_a_time() {
        let mut leds = controller(3);
        let start = Instant::from_millis(0);
        let end = leds.sweep(Sweep::new(STEP, 2), start, no_wait);
        assert_eq!(end, Instant::from_millis(600));

        let frames: Vec<u8> = leds.output().frames.iter().map(|c| c.bits()).collect();
        assert_eq!(frames, [0b001, 0b010, 0b100, 0b001, 0b010, 0b100, 0]);
    }

    #[test]
    fn test_reversed_sweep_walks_right_to_left() {
        let mut leds = controller(3);
        leds.sweep(Sweep::new(STEP, 1).reversed(), Instant::from_millis(0), no_wait);
        let frames: Vec<u8> = leds.output().frames.iter().map(|c| c.bits()).collect();
        assert_eq!(frames, [0b100, 0b010, 0b001, 0]);
    }

    #[test]
    fn test_progress_bar_variants() {
        let cases = [
            (ProgressBar::new(STEP, 1), [0b0001, 0b0011, 0b0111, 0b1111]),
            (ProgressBar::new(STEP, 1).reversed(), [0b1000, 0b1100, 0b1110, 0b1111]),
            (ProgressBar::new(STEP, 1).inverted(), [0b1111, 0b0111, 0b0011, 0b0001]),
            (
                ProgressBar::new(STEP, 1).reversed().inverted(),
                [0b1111, 0b1110, 0b1100, 0b1000],
            ),
        ];
        for (progress, expected) in cases {
            let mut leds = controller(4);
            leds.progress_bar(progress, Instant::from_millis(0), no_wait);
            let frames: Vec<u8> = leds.output().frames.iter().map(|c| c.bits()).collect();
            assert_eq!(frames[..4], expected);
            assert_eq!(frames[4], 0);
        }
    }

    #[test]
    fn test_flicker_never_draws_empty_subset() {
        let mut leds = controller(4);
        leds.random_flicker(Flicker::new(200, 7), Instant::from_millis(0), |d| {
            assert!(d < Duration::from_millis(200));
        });
        let frames = &leds.output().frames;
        assert_eq!(frames.len(), 201);
        assert!(frames[..200].iter().all(|code| !code.is_empty()));
        assert!(frames.iter().all(|code| code.bits() < 16));
        assert_eq!(leds.state(), PatternCode::EMPTY);
    }

    #[test]
    fn test_phase_blink_keeps_base_lit() {
        let mut leds = controller(4);
        let base = PatternCode::single(0);
        let flash = PatternCode::single(2);
        leds.phase_blink(
            PhaseBlink::new(base, flash, 2, STEP, STEP),
            Instant::from_millis(0),
            no_wait,
        );
        let frames: Vec<u8> = leds.output().frames.iter().map(|c| c.bits()).collect();
        assert_eq!(frames, [0b0001, 0b0101, 0b0001, 0b0101, 0b0001]);
    }

    #[test]
    fn test_showcase_ends_dark() {
        let mut leds = controller(4);
        let timings = Timings::default();
        let end = leds.showcase(&timings, 3, Instant::from_millis(0), no_wait);
        assert!(end > Instant::from_millis(5000));
        assert_eq!(leds.state(), PatternCode::EMPTY);
    }

    #[test]
    fn test_shutdown_releases_outputs() {
        let mut leds = controller(4);
        leds.light(3);
        leds.light(1);
        assert_eq!(leds.state(), PatternCode::from_indices(&[1, 3]));
        leds.shutdown();
        assert_eq!(leds.state(), PatternCode::EMPTY);
        assert!(leds.output().cleaned);
    }
}
