pub mod aggregate;
pub mod config;
pub mod extract;
pub mod pipeline;
pub mod recognizer;
pub mod types;

pub use aggregate::aggregate;
pub use config::{ConfigError, ExtractorConfig, ReportConfig, TipscanConfig};
pub use extract::Extractor;
pub use pipeline::{PipelineError, ReceiptPipeline, ScanOutcome, ScanReport};
pub use recognizer::{MockRecognizer, OcrBackend, OcrError, TranscriptRecognizer, UnavailableRecognizer};
pub use types::{ExtractionResult, Strategy, SummaryRecord, Totals, UnpairedEntry};

/// Extract records from OCR text with default settings and total them.
pub fn summarize(ocr_text: &str) -> (ExtractionResult, Totals) {
    let extraction = Extractor::default().extract(ocr_text);
    let totals = aggregate(&extraction.records);
    (extraction, totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tipscan_core::{Category, Money};

    #[test]
    fn summarize_pairs_and_totals() {
        let (r, t) = summarize("Total $10.00 Tip $1.50\nTotal $20.00 Tip $3.00");
        assert_eq!(
            r.records,
            vec![
                SummaryRecord::paired(Money::from_cents(1000), Money::from_cents(150)),
                SummaryRecord::paired(Money::from_cents(2000), Money::from_cents(300)),
            ]
        );
        assert_eq!(t.total_sale.to_fixed(), "30.00");
        assert_eq!(t.total_tip.to_fixed(), "4.50");
    }

    #[test]
    fn summarize_fallback() {
        let (r, t) = summarize("Credit Card $12.34");
        assert_eq!(r.records, vec![SummaryRecord::line(Category::Sale, Money::from_cents(1234))]);
        assert_eq!(t.total_sale.to_fixed(), "12.34");
        assert_eq!(t.total_tip.to_fixed(), "0.00");
    }

    #[test]
    fn summarize_nothing() {
        let (r, t) = summarize("thank you for visiting");
        assert!(!r.found());
        assert_eq!(t, Totals::default());
    }
}
