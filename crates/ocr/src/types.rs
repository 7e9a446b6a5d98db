use serde::{Deserialize, Serialize};
use tipscan_core::{Category, Money};

/// One structured payment record lifted from receipt text.
///
/// The variant is decided by the strategy that matched, and a single
/// [`ExtractionResult`] only ever holds one shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SummaryRecord {
    /// A labeled total matched up with a labeled tip.
    Paired { sale: Money, tip: Money },
    /// A single amount found on a payment-keyword line.
    Line { category: Category, amount: Money },
}

impl SummaryRecord {
    pub fn paired(sale: Money, tip: Money) -> Self {
        SummaryRecord::Paired { sale, tip }
    }

    pub fn line(category: Category, amount: Money) -> Self {
        SummaryRecord::Line { category, amount }
    }
}

/// Which heuristic produced the records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    LabeledSummary,
    KeywordLines,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::LabeledSummary => write!(f, "labeled_summary"),
            Strategy::KeywordLines => write!(f, "keyword_lines"),
        }
    }
}

/// A labeled total or tip that had no partner and was left out of the records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnpairedEntry {
    pub category: Category,
    /// Position within its own list of matches (0-based).
    pub index: usize,
    pub amount: Money,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub records: Vec<SummaryRecord>,
    pub strategy: Option<Strategy>,
    /// Only populated when `report_unpaired` is enabled.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unpaired: Vec<UnpairedEntry>,
}

impl ExtractionResult {
    pub fn empty() -> Self {
        Self::default()
    }

    /// `false` means the caller should show a "no data" state.
    pub fn found(&self) -> bool {
        !self.records.is_empty()
    }
}

/// Aggregate sale and tip amounts, always derived from a record set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub total_sale: Money,
    pub total_tip: Money,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_result_is_not_found() {
        let r = ExtractionResult::empty();
        assert!(!r.found());
        assert!(r.strategy.is_none());
    }

    #[test]
    fn result_with_records_is_found() {
        let r = ExtractionResult {
            records: vec![SummaryRecord::line(Category::Sale, Money::from_cents(100))],
            strategy: Some(Strategy::KeywordLines),
            unpaired: vec![],
        };
        assert!(r.found());
    }

    #[test]
    fn record_serializes_with_kind_tag() {
        let json = serde_json::to_value(SummaryRecord::paired(
            Money::from_cents(4500),
            Money::from_cents(500),
        ))
        .unwrap();
        assert_eq!(json["kind"], "paired");
        assert!(json.get("sale").is_some());
        assert!(json.get("tip").is_some());
    }

    #[test]
    fn strategy_display() {
        assert_eq!(Strategy::LabeledSummary.to_string(), "labeled_summary");
        assert_eq!(Strategy::KeywordLines.to_string(), "keyword_lines");
    }
}
