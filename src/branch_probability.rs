use std::{cmp::Ordering, fmt};

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProbabilityError {
    #[error("branch probability denominator must not be zero")]
    ZeroDenominator,
    #[error("branch probability numerator {numerator} exceeds denominator {denominator}")]
    NumeratorExceedsDenominator { numerator: u32, denominator: u32 },
}

/// Probability of taking a control flow edge, stored as `numerator / denominator`.
///
/// Always satisfies `denominator > 0` and `numerator <= denominator`. Two
/// probabilities compare by the ratio they denote, so `1/2 == 2/4`.
#[derive(Debug, Clone, Copy)]
pub struct BranchProbability {
    numerator: u32,
    denominator: u32,
}

impl BranchProbability {
    /// # Panics
    ///
    /// Panics if `denominator` is zero or `numerator > denominator`.
    pub fn new(numerator: u32, denominator: u32) -> Self {
        assert!(denominator != 0, "denominator cannot be 0");
        assert!(
            numerator <= denominator,
            "probability cannot be bigger than 1 ({} / {})",
            numerator,
            denominator
        );

        Self {
            numerator,
            denominator,
        }
    }

    pub fn try_new(numerator: u32, denominator: u32) -> Result<Self, ProbabilityError> {
        if denominator == 0 {
            return Err(ProbabilityError::ZeroDenominator);
        }

        if numerator > denominator {
            return Err(ProbabilityError::NumeratorExceedsDenominator {
                numerator,
                denominator,
            });
        }

        Ok(Self {
            numerator,
            denominator,
        })
    }

    pub const fn zero() -> Self {
        Self {
            numerator: 0,
            denominator: 1,
        }
    }

    pub const fn one() -> Self {
        Self {
            numerator: 1,
            denominator: 1,
        }
    }

    pub const fn numerator(&self) -> u32 {
        self.numerator
    }

    pub const fn denominator(&self) -> u32 {
        self.denominator
    }

    /// Probability of the other edge of a two-way branch.
    pub const fn complement(&self) -> Self {
        Self {
            numerator: self.denominator - self.numerator,
            denominator: self.denominator,
        }
    }

    fn cross(&self, other: &Self) -> (u64, u64) {
        (
            u64::from(self.numerator) * u64::from(other.denominator),
            u64::from(other.numerator) * u64::from(self.denominator),
        )
    }
}

impl PartialEq for BranchProbability {
    fn eq(&self, other: &Self) -> bool {
        let (lhs, rhs) = self.cross(other);
        lhs == rhs
    }
}

impl Eq for BranchProbability {}

impl PartialOrd for BranchProbability {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BranchProbability {
    fn cmp(&self, other: &Self) -> Ordering {
        let (lhs, rhs) = self.cross(other);
        lhs.cmp(&rhs)
    }
}

impl fmt::Display for BranchProbability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let percent = self.numerator as f64 * 100.0 / self.denominator as f64;
        write!(
            f,
            "{} / {} = {:.2}%",
            self.numerator, self.denominator, percent
        )
    }
}
