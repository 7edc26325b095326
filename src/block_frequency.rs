use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign},
};

use num_integer::Integer;
use num_traits::{Bounded, SaturatingAdd, Zero};

use crate::branch_probability::BranchProbability;

/// Block frequency as a 64-bit fixed-point number scaled by the entry frequency.
///
/// The entry block of a function has frequency [`BlockFrequency::ENTRY_FREQUENCY`];
/// every other block is expressed relative to it. All arithmetic saturates at
/// [`BlockFrequency::MAX_FREQUENCY`] instead of wrapping around.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockFrequency {
    frequency: u64,
}

impl BlockFrequency {
    pub const ENTRY_FREQUENCY: u64 = 1 << 14;
    pub const MAX_FREQUENCY: u64 = u64::MAX;

    pub const fn new(frequency: u64) -> Self {
        Self { frequency }
    }

    /// Returns the frequency of the entry block of the function.
    pub const fn entry_frequency() -> u64 {
        Self::ENTRY_FREQUENCY
    }

    /// Returns the maximum possible frequency, the saturation value.
    pub const fn max_frequency() -> u64 {
        Self::MAX_FREQUENCY
    }

    /// Returns the frequency as a fixpoint number scaled by the entry frequency.
    pub const fn frequency(&self) -> u64 {
        self.frequency
    }

    /// Number of times this block runs per execution of the function entry.
    pub fn to_entry_relative(&self) -> f64 {
        self.frequency as f64 / Self::ENTRY_FREQUENCY as f64
    }

    /// Scale the frequency by `numerator / denominator`, returning the remainder
    /// of the division by `denominator`.
    ///
    /// Upon overflow the frequency saturates to [`Self::MAX_FREQUENCY`] and the
    /// returned remainder is `denominator` itself, a value no real remainder can
    /// take.
    pub fn scale(&mut self, numerator: u32, denominator: u32) -> u32 {
        assert!(denominator != 0, "cannot scale a block frequency by N/0");

        // (2^64 - 1) * (2^32 - 1) always fits in 128 bits.
        let product = u128::from(self.frequency) * u128::from(numerator);
        let (quotient, remainder) = product.div_rem(&u128::from(denominator));

        match u64::try_from(quotient) {
            Ok(quotient) => {
                self.frequency = quotient;
                // remainder < denominator <= u32::MAX
                remainder as u32
            }

            Err(_) => {
                tracing::trace!(
                    frequency = self.frequency,
                    numerator,
                    denominator,
                    "block frequency saturated"
                );
                self.frequency = Self::MAX_FREQUENCY;
                denominator
            }
        }
    }

    /// Scale the frequency by `prob`. Return the remainder from the division by
    /// the probability's denominator. Upon overflow, the routine will saturate.
    pub fn scale_by_probability(&mut self, prob: BranchProbability) -> u32 {
        self.scale(prob.numerator(), prob.denominator())
    }

    /// Multiplies with a branch probability. The computation never overflows.
    pub fn mul_probability(self, prob: BranchProbability) -> Self {
        let mut freq = self;
        freq.scale_by_probability(prob);
        freq
    }

    /// Divides by a non-zero branch probability using saturating arithmetic.
    ///
    /// # Panics
    ///
    /// Panics if `prob` is zero.
    pub fn div_probability(self, prob: BranchProbability) -> Self {
        assert!(
            prob.numerator() != 0,
            "cannot divide a block frequency by a zero probability"
        );

        let mut freq = self;
        freq.scale(prob.denominator(), prob.numerator());
        freq
    }

    /// Adds another block frequency using saturating arithmetic.
    pub const fn saturating_add(self, other: Self) -> Self {
        Self::new(self.frequency.saturating_add(other.frequency))
    }
}

impl From<u64> for BlockFrequency {
    fn from(frequency: u64) -> Self {
        Self::new(frequency)
    }
}

impl From<BlockFrequency> for u64 {
    fn from(freq: BlockFrequency) -> Self {
        freq.frequency
    }
}

impl Mul<BranchProbability> for BlockFrequency {
    type Output = Self;

    fn mul(self, prob: BranchProbability) -> Self {
        self.mul_probability(prob)
    }
}

impl MulAssign<BranchProbability> for BlockFrequency {
    fn mul_assign(&mut self, prob: BranchProbability) {
        self.scale_by_probability(prob);
    }
}

impl Div<BranchProbability> for BlockFrequency {
    type Output = Self;

    fn div(self, prob: BranchProbability) -> Self {
        self.div_probability(prob)
    }
}

impl DivAssign<BranchProbability> for BlockFrequency {
    fn div_assign(&mut self, prob: BranchProbability) {
        *self = self.div_probability(prob);
    }
}

impl Add for BlockFrequency {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.saturating_add(other)
    }
}

impl AddAssign for BlockFrequency {
    fn add_assign(&mut self, other: Self) {
        *self = self.saturating_add(other);
    }
}

impl Sum for BlockFrequency {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

impl<'a> Sum<&'a BlockFrequency> for BlockFrequency {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Zero for BlockFrequency {
    fn zero() -> Self {
        Self::new(0)
    }

    fn is_zero(&self) -> bool {
        self.frequency == 0
    }
}

impl Bounded for BlockFrequency {
    fn min_value() -> Self {
        Self::new(0)
    }

    fn max_value() -> Self {
        Self::new(Self::MAX_FREQUENCY)
    }
}

impl SaturatingAdd for BlockFrequency {
    fn saturating_add(&self, other: &Self) -> Self {
        BlockFrequency::saturating_add(*self, *other)
    }
}

impl fmt::Display for BlockFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.frequency)
    }
}
