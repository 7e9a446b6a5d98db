use tipscan_core::Category;

use crate::types::{SummaryRecord, Totals};

/// Sum sale and tip amounts across a record set.
///
/// Amounts are added at full precision; callers round when rendering.
pub fn aggregate(records: &[SummaryRecord]) -> Totals {
    records.iter().fold(Totals::default(), |mut acc, record| {
        match *record {
            SummaryRecord::Paired { sale, tip } => {
                acc.total_sale += sale;
                acc.total_tip += tip;
            }
            SummaryRecord::Line { category: Category::Sale, amount } => acc.total_sale += amount,
            SummaryRecord::Line { category: Category::Tip, amount } => acc.total_tip += amount,
        }
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::Extractor;
    use rust_decimal::Decimal;
    use tipscan_core::Money;

    fn m(cents: i64) -> Money {
        Money::from_cents(cents)
    }

    #[test]
    fn empty_records_are_zero() {
        let t = aggregate(&[]);
        assert_eq!(t.total_sale.to_fixed(), "0.00");
        assert_eq!(t.total_tip.to_fixed(), "0.00");
    }

    #[test]
    fn paired_records_sum_per_column() {
        let t = aggregate(&[
            SummaryRecord::paired(m(1000), m(150)),
            SummaryRecord::paired(m(2000), m(300)),
        ]);
        assert_eq!(t.total_sale, m(3000));
        assert_eq!(t.total_tip, m(450));
    }

    #[test]
    fn line_records_sum_by_category() {
        let t = aggregate(&[
            SummaryRecord::line(Category::Sale, m(1234)),
            SummaryRecord::line(Category::Tip, m(300)),
            SummaryRecord::line(Category::Sale, m(66)),
        ]);
        assert_eq!(t.total_sale, m(1300));
        assert_eq!(t.total_tip, m(300));
    }

    #[test]
    fn no_intermediate_rounding() {
        let third = Money::from_decimal(Decimal::ONE / Decimal::from(3));
        let records = vec![SummaryRecord::line(Category::Tip, third); 3];
        assert_eq!(aggregate(&records).total_tip.to_fixed(), "1.00");
    }

    #[test]
    fn oversized_ocr_digits_saturate_instead_of_panicking() {
        let r = Extractor::default().extract("Card 79228162514264337593543950335 1");
        assert_eq!(r.records.len(), 2);
        let t = aggregate(&r.records);
        assert_eq!(t.total_sale, Money::from_decimal(Decimal::MAX));
        assert!(t.total_tip.is_zero());
    }
}
