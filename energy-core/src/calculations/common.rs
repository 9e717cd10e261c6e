//! Rounding helpers shared by the estimation steps.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to one decimal place, ties away from zero.
///
/// The result always carries exactly one decimal digit, so `32` comes back
/// as `32.0` and renders that way.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use energy_core::calculations::common::round_to_tenth;
///
/// assert_eq!(round_to_tenth(dec!(22.1538)), dec!(22.2));
/// assert_eq!(round_to_tenth(dec!(2.25)), dec!(2.3));
/// assert_eq!(round_to_tenth(dec!(-2.25)), dec!(-2.3)); // Away from zero
/// assert_eq!(round_to_tenth(dec!(32)).to_string(), "32.0");
/// ```
pub fn round_to_tenth(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(1);
    rounded
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn rounds_down_below_midpoint() {
        assert_eq!(round_to_tenth(dec!(22.14)), dec!(22.1));
    }

    #[test]
    fn rounds_up_at_midpoint() {
        assert_eq!(round_to_tenth(dec!(22.15)), dec!(22.2));
    }

    #[test]
    fn rounds_even_digit_up_at_midpoint() {
        // Banker's rounding would give 2.2 here.
        assert_eq!(round_to_tenth(dec!(2.25)), dec!(2.3));
    }

    #[test]
    fn rounds_negative_midpoint_away_from_zero() {
        assert_eq!(round_to_tenth(dec!(-2.25)), dec!(-2.3));
    }

    #[test]
    fn whole_numbers_gain_one_decimal_digit() {
        let result = round_to_tenth(dec!(32));

        assert_eq!(result, dec!(32.0));
        assert_eq!(result.scale(), 1);
        assert_eq!(result.to_string(), "32.0");
    }

    #[test]
    fn handles_zero() {
        assert_eq!(round_to_tenth(dec!(0)).to_string(), "0.0");
    }
}
