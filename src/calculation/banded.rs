//! Progressive-band deduction calculation.
//!
//! This module provides the generic band walk shared by income tax and
//! National Insurance: each band taxes the slice of income falling inside it
//! at the band's own rate.
//!
//! ## Rounding
//!
//! Each band's deduction is rounded to the nearest penny independently and
//! the total is the sum of the rounded lines. Rounding per band rather than
//! once at the end matches the official convention and keeps every line in
//! the breakdown penny-exact.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::Band;
use crate::models::BandLine;

/// The result of applying a progressive band table to an amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandedDeduction {
    /// One line per band the amount reaches, in ascending band order.
    pub lines: Vec<BandLine>,
    /// The sum of the per-band amounts.
    pub total: Decimal,
}

impl BandedDeduction {
    /// A deduction of zero with no band lines.
    pub fn zero() -> Self {
        Self {
            lines: Vec::new(),
            total: Decimal::ZERO,
        }
    }
}

/// Applies a progressive band table to an amount.
///
/// For each band in ascending order, the slice of the amount between the
/// band's lower bound and the smaller of its upper bound and the amount is
/// deducted at the band's rate. The unbounded top band takes everything
/// above its lower bound. A zero or negative amount produces a zero
/// deduction, never an error.
///
/// # Examples
///
/// ```
/// use paye_engine::calculation::apply_bands;
/// use paye_engine::config::Band;
/// use rust_decimal_macros::dec;
///
/// let bands = vec![
///     Band {
///         name: "basic".to_string(),
///         lower: dec!(0),
///         upper: Some(dec!(37700)),
///         rate: dec!(0.20),
///     },
///     Band {
///         name: "higher".to_string(),
///         lower: dec!(37700),
///         upper: None,
///         rate: dec!(0.40),
///     },
/// ];
///
/// let deduction = apply_bands(dec!(50000), &bands);
/// assert_eq!(deduction.lines.len(), 2);
/// assert_eq!(deduction.lines[0].amount, dec!(7540.00));
/// assert_eq!(deduction.lines[1].amount, dec!(4920.00));
/// assert_eq!(deduction.total, dec!(12460.00));
/// ```
pub fn apply_bands(amount: Decimal, bands: &[Band]) -> BandedDeduction {
    if amount <= Decimal::ZERO {
        return BandedDeduction::zero();
    }

    let mut lines = Vec::new();
    let mut total = Decimal::ZERO;

    for band in bands {
        if amount <= band.lower {
            break;
        }

        let ceiling = band.upper.map_or(amount, |upper| amount.min(upper));
        let slice = ceiling - band.lower;
        if slice <= Decimal::ZERO {
            continue;
        }

        let due = (slice * band.rate).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        total += due;
        lines.push(BandLine {
            band: band.name.clone(),
            taxable: slice,
            rate: band.rate,
            amount: due,
        });
    }

    BandedDeduction { lines, total }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_fixtures::table_2025_26;
    use rust_decimal_macros::dec;

    #[test]
    fn test_zero_amount_yields_zero_deduction() {
        let table = table_2025_26();

        let deduction = apply_bands(Decimal::ZERO, &table.income_tax.bands);
        assert_eq!(deduction, BandedDeduction::zero());
    }

    #[test]
    fn test_negative_amount_yields_zero_not_error() {
        let table = table_2025_26();

        let deduction = apply_bands(dec!(-5000), &table.income_tax.bands);
        assert_eq!(deduction.total, Decimal::ZERO);
        assert!(deduction.lines.is_empty());
    }

    #[test]
    fn test_amount_within_first_band() {
        let table = table_2025_26();

        let deduction = apply_bands(dec!(30000), &table.income_tax.bands);
        assert_eq!(deduction.lines.len(), 1);
        assert_eq!(deduction.lines[0].band, "basic");
        assert_eq!(deduction.lines[0].taxable, dec!(30000));
        assert_eq!(deduction.total, dec!(6000.00));
    }

    #[test]
    fn test_first_band_applies_from_the_first_pound() {
        let table = table_2025_26();

        let deduction = apply_bands(dec!(1), &table.income_tax.bands);
        assert_eq!(deduction.total, dec!(0.20));
    }

    #[test]
    fn test_amount_spanning_two_bands() {
        let table = table_2025_26();

        // £87,430 taxable: £37,700 basic + £49,730 higher.
        let deduction = apply_bands(dec!(87430), &table.income_tax.bands);
        assert_eq!(deduction.lines.len(), 2);
        assert_eq!(deduction.lines[0].amount, dec!(7540.00));
        assert_eq!(deduction.lines[1].taxable, dec!(49730));
        assert_eq!(deduction.lines[1].amount, dec!(19892.00));
        assert_eq!(deduction.total, dec!(27432.00));
    }

    #[test]
    fn test_amount_reaching_unbounded_top_band() {
        let table = table_2025_26();

        let deduction = apply_bands(dec!(150000), &table.income_tax.bands);
        assert_eq!(deduction.lines.len(), 3);
        assert_eq!(deduction.lines[2].band, "additional");
        assert_eq!(deduction.lines[2].taxable, dec!(24860));
        assert_eq!(deduction.lines[2].amount, dec!(11187.00));
    }

    #[test]
    fn test_amount_exactly_on_band_boundary() {
        let table = table_2025_26();

        // Exactly at the top of the basic band: no higher-band line.
        let deduction = apply_bands(dec!(37700), &table.income_tax.bands);
        assert_eq!(deduction.lines.len(), 1);
        assert_eq!(deduction.total, dec!(7540.00));

        // One pound over: a £1 higher-band slice appears.
        let deduction = apply_bands(dec!(37701), &table.income_tax.bands);
        assert_eq!(deduction.lines.len(), 2);
        assert_eq!(deduction.lines[1].taxable, dec!(1));
        assert_eq!(deduction.lines[1].amount, dec!(0.40));
    }

    #[test]
    fn test_ni_zero_band_produces_zero_line() {
        let table = table_2025_26();

        let deduction = apply_bands(dec!(20000), &table.national_insurance.bands);
        assert_eq!(deduction.lines.len(), 2);
        assert_eq!(deduction.lines[0].band, "below_primary_threshold");
        assert_eq!(deduction.lines[0].amount, dec!(0.00));
        assert_eq!(deduction.lines[1].taxable, dec!(7430));
        assert_eq!(deduction.lines[1].amount, dec!(594.40));
        assert_eq!(deduction.total, dec!(594.40));
    }

    #[test]
    fn test_ni_below_primary_threshold_is_zero() {
        let table = table_2025_26();

        let deduction = apply_bands(dec!(12570), &table.national_insurance.bands);
        assert_eq!(deduction.total, Decimal::ZERO);
    }

    #[test]
    fn test_per_band_rounding_to_nearest_penny() {
        // A taxable slice that does not fall on a whole penny: £100.03 at 8%
        // is £8.0024, which rounds to £8.00 within its own band.
        let bands = vec![
            Band {
                name: "only".to_string(),
                lower: dec!(0),
                upper: None,
                rate: dec!(0.08),
            },
        ];

        let deduction = apply_bands(dec!(100.03), &bands);
        assert_eq!(deduction.total, dec!(8.00));

        // £100.07 at 8% is £8.0056, rounding up to £8.01.
        let deduction = apply_bands(dec!(100.07), &bands);
        assert_eq!(deduction.total, dec!(8.01));
    }

    #[test]
    fn test_total_is_sum_of_lines() {
        let table = table_2025_26();

        let deduction = apply_bands(dec!(123456.78), &table.income_tax.bands);
        let summed: Decimal = deduction.lines.iter().map(|l| l.amount).sum();
        assert_eq!(deduction.total, summed);
    }
}
