//! This module contains the [BitField] type, a descriptor of a contiguous range of bits within a
//! [Word].

use crate::{
    error::{BitFieldError, BitFieldResult},
    types::{BitIndex, UWord, Word, MAX_BIT_INDEX, WORD_BITS},
    utils::sign_extend,
};
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, ops::RangeInclusive, str::FromStr};

/// A [BitField] addresses the bits `low..=high` of a [Word], where bit `0` is the least
/// significant bit.
///
/// A [BitField] never owns a word. It is a pure function object that is applied to words supplied
/// by the caller, and is usually created once per logical field and reused.
///
/// Fields may be up to 128 bits wide, so the highest addressable bit is [MAX_BIT_INDEX].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawBitField")]
pub struct BitField {
    /// The inclusive lowest bit index of the field.
    low: BitIndex,
    /// The inclusive highest bit index of the field.
    high: BitIndex,
}

/// The unvalidated, serialized form of a [BitField].
#[derive(Deserialize)]
struct RawBitField {
    low: BitIndex,
    high: BitIndex,
}

impl TryFrom<RawBitField> for BitField {
    type Error = BitFieldError;

    fn try_from(raw: RawBitField) -> Result<Self, Self::Error> {
        Self::new(raw.low, raw.high)
    }
}

impl BitField {
    /// Creates a new [BitField] covering the bits `low..=high`.
    ///
    /// # Arguments
    /// - `low`: The inclusive lowest bit index.
    /// - `high`: The inclusive highest bit index.
    ///
    /// # Returns
    /// - `Ok(BitField)` if `low <= high <= MAX_BIT_INDEX`
    /// - `Err(_)` otherwise
    pub const fn new(low: BitIndex, high: BitIndex) -> BitFieldResult<Self> {
        if low > high {
            return Err(BitFieldError::InvalidRange { low, high });
        }
        if high > MAX_BIT_INDEX {
            return Err(BitFieldError::OutOfBounds { high });
        }
        Ok(Self { low, high })
    }

    /// Creates a one bit wide [BitField] at `bit`.
    pub const fn single(bit: BitIndex) -> BitFieldResult<Self> {
        Self::new(bit, bit)
    }

    /// Creates a [BitField] that is `width` bits wide, starting at `low`.
    pub const fn from_width(low: BitIndex, width: BitIndex) -> BitFieldResult<Self> {
        if width == 0 {
            return Err(BitFieldError::ZeroWidth);
        }
        match low.checked_add(width - 1) {
            Some(high) => Self::new(low, high),
            None => Err(BitFieldError::OutOfBounds { high: BitIndex::MAX }),
        }
    }

    /// Returns the inclusive lowest bit index of the field.
    #[inline(always)]
    pub const fn low(&self) -> BitIndex {
        self.low
    }

    /// Returns the inclusive highest bit index of the field.
    #[inline(always)]
    pub const fn high(&self) -> BitIndex {
        self.high
    }

    /// Returns the number of bits in the field. Always at least `1`.
    #[inline(always)]
    pub const fn width(&self) -> BitIndex {
        self.high - self.low + 1
    }

    /// Returns a mask of [Self::width] ones, aligned to bit `0`.
    #[inline(always)]
    pub const fn mask(&self) -> UWord {
        UWord::MAX >> (WORD_BITS - self.width())
    }

    /// Returns the mask of the bits that the field occupies within a word.
    #[inline(always)]
    pub const fn field_mask(&self) -> UWord {
        self.mask() << self.low
    }

    /// Extracts the field from `word`, right aligned to bit `0`.
    ///
    /// Bits of `word` outside of the field never influence the result, which is always within
    /// `[0, 2^width - 1]`.
    #[inline(always)]
    pub const fn extract(&self, word: Word) -> UWord {
        ((word as UWord) >> self.low) & self.mask()
    }

    /// Returns `word` with the field replaced by the low [Self::width] bits of `value`.
    ///
    /// All bits of `word` outside of the field are left unchanged. Excess high bits of `value` are
    /// discarded, so a negative `value` is stored as its two's-complement truncation.
    #[inline(always)]
    pub const fn insert(&self, value: Word, word: Word) -> Word {
        let cleared = (word as UWord) & !self.field_mask();
        (cleared | (((value as UWord) & self.mask()) << self.low)) as Word
    }

    /// Extracts the field from `word` and interprets it as a two's-complement signed integer of
    /// [Self::width] bits.
    #[inline(always)]
    pub fn extract_signed(&self, word: Word) -> Word {
        sign_extend(self.extract(word), self.width())
    }

    /// Counterpart of [Self::extract_signed]. Identical to [Self::insert], since insertion already
    /// truncates signed values to their two's-complement representation.
    #[inline(always)]
    pub const fn insert_signed(&self, value: Word, word: Word) -> Word {
        self.insert(value, word)
    }

    /// Returns whether `value` survives an [Self::insert] followed by an [Self::extract] without
    /// truncation.
    pub const fn fits(&self, value: Word) -> bool {
        self.extract(self.insert(value, 0)) as Word == value
    }

    /// Returns whether `value` survives an [Self::insert] followed by an [Self::extract_signed]
    /// without truncation.
    pub fn fits_signed(&self, value: Word) -> bool {
        self.extract_signed(self.insert(value, 0)) == value
    }

    /// Returns whether `self` and `other` share at least one bit position.
    pub const fn overlaps(&self, other: &BitField) -> bool {
        self.low <= other.high && other.low <= self.high
    }
}

impl TryFrom<RangeInclusive<BitIndex>> for BitField {
    type Error = BitFieldError;

    fn try_from(range: RangeInclusive<BitIndex>) -> Result<Self, Self::Error> {
        Self::new(*range.start(), *range.end())
    }
}

impl FromStr for BitField {
    type Err = anyhow::Error;

    /// Parses register notation, either `high:low` or a single bit index. Surrounding brackets
    /// are optional, so the [fmt::Display] form parses back.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s.trim();
        let inner = inner.strip_prefix('[').and_then(|i| i.strip_suffix(']')).unwrap_or(inner);

        let parse_index = |i: &str| {
            i.trim()
                .parse::<BitIndex>()
                .map_err(|e| anyhow!("Invalid bit index {:?} in field {:?}: {}", i, s, e))
        };

        let field = match inner.split_once(':') {
            Some((high, low)) => Self::new(parse_index(low)?, parse_index(high)?),
            None => Self::single(parse_index(inner)?),
        };
        Ok(field?)
    }
}

impl fmt::Display for BitField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.low == self.high {
            write!(f, "[{}]", self.low)
        } else {
            write!(f, "[{}:{}]", self.high, self.low)
        }
    }
}

#[cfg(test)]
mod test {
    use super::BitField;
    use crate::{
        error::BitFieldError,
        types::{UWord, Word, MAX_BIT_INDEX},
        utils::sign_extend,
    };
    use proptest::{
        prelude::{any, prop_assert_eq, Arbitrary},
        proptest,
        strategy::{BoxedStrategy, Just, Strategy},
    };

    impl Arbitrary for BitField {
        type Parameters = ();
        type Strategy = BoxedStrategy<Self>;

        fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
            (0..=MAX_BIT_INDEX)
                .prop_flat_map(|low| (Just(low), low..=MAX_BIT_INDEX))
                .prop_map(|(low, high)| BitField::new(low, high).unwrap())
                .boxed()
        }
    }

    #[test]
    fn extract_low() {
        let low_bits = BitField::new(0, 2).unwrap();
        #[allow(clippy::unusual_byte_groupings)]
        let word = 0b10101010_101;
        assert_eq!(low_bits.extract(word), 0b101);
    }

    #[test]
    fn extract_middle() {
        let middle_bits = BitField::new(5, 9).unwrap();
        assert_eq!(middle_bits.extract(0b1010101101101011), 0b11011);
    }

    #[test]
    fn extract_negative_word() {
        let field = BitField::new(60, 67).unwrap();
        assert_eq!(field.extract(-1), 0xFF);
        assert_eq!(field.extract(Word::MIN), 0);
        assert_eq!(BitField::new(120, 127).unwrap().extract(Word::MIN), 0x80);
    }

    #[test]
    fn insert_low() {
        let low_bits = BitField::new(0, 4).unwrap();
        assert_eq!(low_bits.insert(15, 0), 15);

        // Bit 4 belongs to the field, so it is cleared along with the rest.
        let packed = low_bits.insert(0b1010, 0b1111_0000);
        assert_eq!(packed, 0b1110_1010);
        assert_eq!(low_bits.extract(packed), 0b1010);

        // Slipping in under a narrower field leaves the higher bits alone.
        assert_eq!(BitField::new(0, 3).unwrap().insert(0b1010, 0b1111_0000), 0b1111_1010);
    }

    #[test]
    fn insert_truncates_oversized_value() {
        let field = BitField::new(4, 7).unwrap();
        assert_eq!(field.insert(0x1_23, 0), 0x30);
        assert!(!field.fits(0x123));
        assert!(field.fits(0xF));
        assert!(!field.fits(-1));
    }

    #[test]
    fn extract_signed() {
        let bitfield = BitField::new(2, 4).unwrap();
        #[allow(clippy::unusual_byte_groupings)]
        let (negative, positive) = (0b101_111_10, 0b101_011_10);
        assert_eq!(bitfield.extract_signed(negative), -1);
        assert_eq!(bitfield.extract_signed(positive), 3);
    }

    #[test]
    fn insert_negative() {
        let bitfield = BitField::new(3, 5).unwrap();
        let packed = bitfield.insert(-1, 0);
        #[allow(clippy::unusual_byte_groupings)]
        let expected = 0b000_111_000;
        assert_eq!(packed, expected);
        assert_eq!(bitfield.extract_signed(packed), -1);
        assert_eq!(bitfield.insert_signed(-4, 0), 0b100_000);
        assert!(bitfield.fits_signed(-4));
        assert!(!bitfield.fits_signed(-5));
        assert!(!bitfield.fits_signed(4));
    }

    #[test]
    fn full_width_field() {
        let field = BitField::new(0, MAX_BIT_INDEX).unwrap();
        assert_eq!(field.width(), 128);
        assert_eq!(field.mask(), UWord::MAX);
        assert_eq!(field.extract(-1), UWord::MAX);
        assert_eq!(field.extract_signed(-5), -5);
        assert_eq!(field.insert(-5, 12345), -5);
        assert!(field.fits(-1));
    }

    #[test]
    fn masks() {
        let field = BitField::new(3, 5).unwrap();
        assert_eq!(field.width(), 3);
        assert_eq!(field.mask(), 0b111);
        assert_eq!(field.field_mask(), 0b111_000);
    }

    #[test]
    fn construction_errors() {
        assert_eq!(BitField::new(4, 3), Err(BitFieldError::InvalidRange { low: 4, high: 3 }));
        assert_eq!(BitField::new(0, 128), Err(BitFieldError::OutOfBounds { high: 128 }));
        assert_eq!(BitField::from_width(3, 0), Err(BitFieldError::ZeroWidth));
        assert_eq!(BitField::from_width(120, 9), Err(BitFieldError::OutOfBounds { high: 128 }));
        assert_eq!(BitField::from_width(5, 5), BitField::new(5, 9));
        assert_eq!(BitField::single(7), BitField::new(7, 7));
        assert_eq!(BitField::try_from(2u32..=4), BitField::new(2, 4));
        assert!(BitField::try_from(4u32..=2).is_err());
    }

    #[test]
    fn overlaps() {
        let a = BitField::new(4, 6).unwrap();
        assert!(a.overlaps(&BitField::new(6, 9).unwrap()));
        assert!(a.overlaps(&BitField::new(0, 4).unwrap()));
        assert!(a.overlaps(&BitField::new(5, 5).unwrap()));
        assert!(!a.overlaps(&BitField::new(1, 3).unwrap()));
        assert!(!a.overlaps(&BitField::new(7, 9).unwrap()));
    }

    #[test]
    fn parse_and_display() {
        let field: BitField = "9:5".parse().unwrap();
        assert_eq!(field, BitField::new(5, 9).unwrap());
        assert_eq!(field.to_string(), "[9:5]");
        assert_eq!(field.to_string().parse::<BitField>().unwrap(), field);

        let bit: BitField = "[7]".parse().unwrap();
        assert_eq!(bit, BitField::single(7).unwrap());
        assert_eq!(bit.to_string(), "[7]");

        assert!("2:4".parse::<BitField>().is_err());
        assert!("a:0".parse::<BitField>().is_err());
        assert!("128".parse::<BitField>().is_err());
    }

    #[test]
    fn serde_validates() {
        let field: BitField = serde_json::from_str(r#"{"low":2,"high":4}"#).unwrap();
        assert_eq!(field, BitField::new(2, 4).unwrap());
        assert_eq!(serde_json::to_string(&field).unwrap(), r#"{"low":2,"high":4}"#);
        assert!(serde_json::from_str::<BitField>(r#"{"low":4,"high":2}"#).is_err());
        assert!(serde_json::from_str::<BitField>(r#"{"low":0,"high":200}"#).is_err());
    }

    proptest! {
        #[test]
        fn extract_insert_round_trip(field: BitField, word in any::<Word>(), raw in any::<UWord>()) {
            let value = (raw & field.mask()) as Word;
            let inserted = field.insert(value, word);
            prop_assert_eq!(field.extract(inserted) as Word, value);
        }

        #[test]
        fn insert_leaves_other_bits(field: BitField, word in any::<Word>(), value in any::<Word>()) {
            let inserted = field.insert(value, word) as UWord;
            let outside = !field.field_mask();
            prop_assert_eq!(inserted & outside, (word as UWord) & outside);
        }

        #[test]
        fn extract_is_width_bounded(field: BitField, word in any::<Word>()) {
            prop_assert_eq!(field.extract(word) & !field.mask(), 0);
        }

        #[test]
        fn extract_signed_matches_sign_extend(field: BitField, word in any::<Word>()) {
            prop_assert_eq!(
                field.extract_signed(word),
                sign_extend(field.extract(word), field.width())
            );
        }
    }
}
