use block_frequency::{BlockFrequency, BranchProbability};
use proptest::prelude::*;

const MAX: u64 = BlockFrequency::MAX_FREQUENCY;

fn probability() -> impl Strategy<Value = BranchProbability> {
    (1u32..=u32::MAX).prop_flat_map(|d| (0..=d, Just(d)).prop_map(|(n, d)| BranchProbability::new(n, d)))
}

fn saturate(exact: u128) -> u64 {
    u64::try_from(exact).unwrap_or(MAX)
}

proptest! {
    #[test]
    fn add_saturates(a in any::<u64>(), b in any::<u64>()) {
        let sum = BlockFrequency::new(a) + BlockFrequency::new(b);
        prop_assert_eq!(sum.frequency(), saturate(u128::from(a) + u128::from(b)));
    }

    #[test]
    fn multiply_is_floor_of_exact_product(f in any::<u64>(), prob in probability()) {
        let exact = u128::from(f) * u128::from(prob.numerator()) / u128::from(prob.denominator());
        let scaled = BlockFrequency::new(f) * prob;

        prop_assert_eq!(scaled.frequency(), saturate(exact));
        // A probability never raises a frequency.
        prop_assert!(scaled.frequency() <= f);
    }

    #[test]
    fn divide_is_inverse_scale(f in any::<u64>(), prob in probability()) {
        prop_assume!(prob.numerator() != 0);

        let exact = u128::from(f) * u128::from(prob.denominator()) / u128::from(prob.numerator());
        let divided = BlockFrequency::new(f) / prob;

        prop_assert_eq!(divided.frequency(), saturate(exact));
        prop_assert!(divided.frequency() >= f);
    }

    #[test]
    fn scale_reports_remainder_or_sentinel(f in any::<u64>(), n in any::<u32>(), d in 1u32..=u32::MAX) {
        let product = u128::from(f) * u128::from(n);
        let mut freq = BlockFrequency::new(f);
        let remainder = freq.scale(n, d);

        match u64::try_from(product / u128::from(d)) {
            Ok(quotient) => {
                prop_assert_eq!(freq.frequency(), quotient);
                prop_assert!(remainder < d);
                prop_assert_eq!(u128::from(remainder), product % u128::from(d));
            }
            Err(_) => {
                prop_assert_eq!(freq.frequency(), MAX);
                prop_assert_eq!(remainder, d);
            }
        }
    }

    #[test]
    fn ordering_follows_raw_value(a in any::<u64>(), b in any::<u64>()) {
        let (fa, fb) = (BlockFrequency::new(a), BlockFrequency::new(b));

        prop_assert_eq!(fa < fb, a < b);
        prop_assert_eq!(fa <= fb, a <= b);
        prop_assert_eq!(fa > fb, a > b);
        prop_assert_eq!(fa >= fb, a >= b);
        prop_assert_eq!(fa == fb, a == b);
    }

    #[test]
    fn render_is_decimal_value(f in any::<u64>()) {
        prop_assert_eq!(BlockFrequency::new(f).to_string(), f.to_string());
    }

    #[test]
    fn complement_sums_to_one(prob in probability(), f in 0u64..(1 << 32)) {
        // Both halves are exact when the denominator divides the scaled value.
        let entry = BlockFrequency::new(f * u64::from(prob.denominator()));
        let total = entry * prob + entry * prob.complement();
        prop_assert_eq!(total, entry);
    }
}
