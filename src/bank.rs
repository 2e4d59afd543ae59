use core::ops::Range;

use crate::error::Error;

/// Maximum number of LEDs a bank can hold.
pub const MAX_LEDS: usize = 8;

/// Position of a LED within the bank, `0` is the leftmost LED.
pub type LedIndex = u8;

/// Set of LEDs that are lit during a phase.
///
/// Bit `k` stands for the LED with index `k`. The empty code means "all off".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct PatternCode(u8);

impl PatternCode {
    pub const EMPTY: Self = Self(0);

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Code with a single lit LED.
    ///
    /// Indices beyond [`MAX_LEDS`] produce the empty code.
    pub const fn single(index: LedIndex) -> Self {
        match 1u8.checked_shl(index as u32) {
            Some(bit) => Self(bit),
            None => Self::EMPTY,
        }
    }

    /// Build a code from a list of indices, ignoring indices beyond [`MAX_LEDS`].
    pub fn from_indices(indices: &[LedIndex]) -> Self {
        indices
            .iter()
            .fold(Self::EMPTY, |code, &index| code.with(index))
    }

    pub const fn contains(self, index: LedIndex) -> bool {
        self.0 & Self::single(index).0 != 0
    }

    pub const fn with(self, index: LedIndex) -> Self {
        Self(self.0 | Self::single(index).0)
    }

    pub const fn without(self, index: LedIndex) -> Self {
        Self(self.0 & !Self::single(index).0)
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of lit LEDs.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn len(self) -> u8 {
        self.0.count_ones() as u8
    }

    /// Lowest lit index.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn first(self) -> Option<LedIndex> {
        if self.0 == 0 {
            return None;
        }
        Some(self.0.trailing_zeros() as u8)
    }

    /// Every LED of `bank` that is not part of this code.
    pub const fn complement(self, bank: LedBank) -> Self {
        Self(!self.0 & bank.all().0)
    }

    /// Iterate over lit indices in ascending order.
    pub fn iter(self) -> impl Iterator<Item = LedIndex> {
        (0..MAX_LEDS as u8).filter(move |&index| self.contains(index))
    }
}

/// The ordered set of LEDs driven by a controller.
///
/// The size is fixed for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedBank {
    count: u8,
}

impl Default for LedBank {
    fn default() -> Self {
        Self { count: 4 }
    }
}

impl LedBank {
    pub const fn new(count: u8) -> Result<Self, Error> {
        if count == 0 || count as usize > MAX_LEDS {
            return Err(Error::InvalidLedCount(count));
        }
        Ok(Self { count })
    }

    /// Get the number of LEDs in the bank.
    pub const fn count(self) -> u8 {
        self.count
    }

    pub const fn indices(self) -> Range<LedIndex> {
        0..self.count
    }

    pub const fn contains(self, index: LedIndex) -> bool {
        index < self.count
    }

    /// Code with every LED of the bank lit.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn all(self) -> PatternCode {
        PatternCode(((1u16 << self.count) - 1) as u8)
    }

    /// Drop every index that is not part of the bank.
    pub const fn clamp(self, code: PatternCode) -> PatternCode {
        PatternCode(code.0 & self.all().0)
    }

    /// Build a code from indices, rejecting indices outside of the bank.
    pub fn code(self, indices: &[LedIndex]) -> Result<PatternCode, Error> {
        let mut code = PatternCode::EMPTY;
        for &index in indices {
            if !self.contains(index) {
                return Err(Error::LedOutOfRange {
                    index,
                    count: self.count,
                });
            }
            code = code.with(index);
        }
        Ok(code)
    }

    /// The `amount` leftmost LEDs, clamped to the bank size.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn leading(self, amount: u8) -> PatternCode {
        let amount = if amount > self.count { self.count } else { amount };
        PatternCode(((1u16 << amount) - 1) as u8)
    }

    /// The `amount` rightmost LEDs, clamped to the bank size.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn trailing(self, amount: u8) -> PatternCode {
        let amount = if amount > self.count { self.count } else { amount };
        let shifted = (self.leading(amount).0 as u16) << (self.count - amount);
        PatternCode(shifted as u8)
    }

    /// Number of values a code of this bank can encode (`2^count`).
    pub const fn capacity(self) -> u16 {
        1u16 << self.count
    }

    /// Encode a number as the LEDs of its binary representation.
    ///
    /// LED `k` carries the weight `2^k`. Values wrap around [`Self::capacity`].
    #[allow(clippy::cast_possible_truncation)]
    pub const fn encode(self, value: u16) -> PatternCode {
        PatternCode((value % self.capacity()) as u8)
    }

    /// Decode the number represented by a code.
    pub const fn decode(self, code: PatternCode) -> u16 {
        self.clamp(code).0 as u16
    }
}
