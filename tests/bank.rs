mod common;

mod tests {
    use myrtio_led_arcade::{ArcadeConfig, Error, LedBank, PatternCode, PhaseUpdate};

    use crate::common::bank;

    #[test]
    fn test_bank_rejects_invalid_sizes() {
        assert_eq!(LedBank::new(0), Err(Error::InvalidLedCount(0)));
        assert_eq!(LedBank::new(9), Err(Error::InvalidLedCount(9)));
        assert!(LedBank::new(3).is_ok());
        assert!(ArcadeConfig::with_led_count(9).is_err());
    }

    #[test]
    fn test_checked_code_rejects_out_of_range() {
        let bank = bank(4);
        assert_eq!(
            bank.code(&[1, 4]),
            Err(Error::LedOutOfRange { index: 4, count: 4 })
        );
        assert_eq!(bank.code(&[0, 3]), Ok(PatternCode::from_bits(0b1001)));
    }

    #[test]
    fn test_leading_and_trailing_are_clamped() {
        let bank = bank(4);
        assert_eq!(bank.leading(0), PatternCode::EMPTY);
        assert_eq!(bank.leading(2), PatternCode::from_bits(0b0011));
        assert_eq!(bank.leading(9), bank.all());
        assert_eq!(bank.trailing(0), PatternCode::EMPTY);
        assert_eq!(bank.trailing(1), PatternCode::from_bits(0b1000));
        assert_eq!(bank.trailing(9), bank.all());

        let full = crate::common::bank(8);
        assert_eq!(full.trailing(0), PatternCode::EMPTY);
        assert_eq!(full.all().bits(), 0xff);
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let bank = bank(4);
        for value in 0..bank.capacity() {
            assert_eq!(bank.decode(bank.encode(value)), value);
        }
        assert_eq!(bank.encode(16), PatternCode::EMPTY);
        assert_eq!(bank.encode(5), PatternCode::from_indices(&[0, 2]));
    }

    #[test]
    fn test_complement_stays_inside_bank() {
        let bank = bank(3);
        let code = PatternCode::single(1);
        assert_eq!(code.complement(bank), PatternCode::from_indices(&[0, 2]));
        assert_eq!(PatternCode::EMPTY.complement(bank), bank.all());
    }

    #[test]
    fn test_independent_update_leaves_others_untouched() {
        let bank = bank(4);
        let targets = PhaseUpdate::overlay(PatternCode::single(2)).targets(bank);
        assert_eq!(targets[..4], [None, None, Some(true), None]);

        let targets = PhaseUpdate::overlay(PatternCode::single(2))
            .reversed()
            .targets(bank);
        assert_eq!(targets[2], Some(false));
    }

    #[test]
    fn test_revert_restores_an_overlay() {
        let bank = bank(4);
        let start = PatternCode::single(0);
        let flash = PhaseUpdate::overlay(PatternCode::single(3));
        let lit = flash.resolve(bank, start);
        assert_eq!(lit, PatternCode::from_indices(&[0, 3]));
        assert_eq!(flash.revert().resolve(bank, lit), start);
    }

    #[test]
    fn test_noop_writes_nothing() {
        let targets = PhaseUpdate::noop().targets(bank(4));
        assert!(targets.iter().all(Option::is_none));
    }
}
