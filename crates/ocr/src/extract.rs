use std::sync::OnceLock;

use regex::Regex;
use tipscan_core::{Category, Money};
use tracing::{debug, warn};

use crate::config::ExtractorConfig;
use crate::types::{ExtractionResult, Strategy, SummaryRecord, UnpairedEntry};

// ── Compiled regex cache ─────────────────────────────────────────────────────

macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static Regex {
            static R: OnceLock<Regex> = OnceLock::new();
            R.get_or_init(|| Regex::new($pat).expect("invalid regex"))
        }
    };
}

// The fraction is captured whole and filtered to exactly two digits, so a
// glued suffix like `45.00USD` still matches while `45.001` does not.
re!(re_labeled_total,
    r"(?i)\btotal\s*(?:US\$|\$)?\s*(\d[\d,]*\.(\d+))");
re!(re_labeled_tip,
    r"(?i)\btip\s*(?:US\$|\$)?\s*(\d[\d,]*\.(\d+))");
re!(re_money_token,
    r"\$?\d+(?:\.\d{1,2})?");

// ── Public extraction API ─────────────────────────────────────────────────────

/// Turns OCR text into sale/tip records.
///
/// Labeled `total`/`tip` amounts are tried first and paired in order of
/// appearance. Only when that yields nothing are individual payment-keyword
/// lines scanned for amounts.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractorConfig,
}

impl Extractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn extract(&self, ocr_text: &str) -> ExtractionResult {
        let labeled = self.extract_labeled(ocr_text);
        if labeled.found() {
            debug!(records = labeled.records.len(), "labeled summary matched");
            return labeled;
        }

        let lines = self.extract_keyword_lines(ocr_text);
        if lines.is_empty() {
            debug!("no summary data in text");
            // Surplus labeled entries are still worth reporting when nothing paired.
            return ExtractionResult { unpaired: labeled.unpaired, ..ExtractionResult::empty() };
        }

        debug!(records = lines.len(), "falling back to keyword lines");
        ExtractionResult {
            records: lines,
            strategy: Some(Strategy::KeywordLines),
            unpaired: labeled.unpaired,
        }
    }

    // ── Strategy A: labeled totals and tips ───────────────────────────────────

    fn extract_labeled(&self, text: &str) -> ExtractionResult {
        let totals = labeled_amounts(re_labeled_total(), text);
        let tips = labeled_amounts(re_labeled_tip(), text);

        // Zip stops at the shorter list; the rest never becomes a record.
        let records: Vec<SummaryRecord> = totals
            .iter()
            .zip(tips.iter())
            .map(|(&sale, &tip)| SummaryRecord::paired(sale, tip))
            .collect();

        let paired = records.len();
        let surplus = surplus_entries(&totals, &tips, paired);
        if !surplus.is_empty() {
            if self.config.report_unpaired {
                warn!(
                    totals = totals.len(),
                    tips = tips.len(),
                    dropped = surplus.len(),
                    "labeled totals and tips do not pair up"
                );
            } else {
                debug!(dropped = surplus.len(), "dropping unpaired totals/tips");
            }
        }

        ExtractionResult {
            strategy: if records.is_empty() { None } else { Some(Strategy::LabeledSummary) },
            records,
            unpaired: if self.config.report_unpaired { surplus } else { Vec::new() },
        }
    }

    // ── Strategy B: payment keyword lines ─────────────────────────────────────

    fn extract_keyword_lines(&self, text: &str) -> Vec<SummaryRecord> {
        let keywords: Vec<String> = self
            .config
            .line_keywords
            .iter()
            .map(|k| k.to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        let tip_keyword = self.config.tip_keyword.to_lowercase();

        text.lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .filter_map(|line| {
                let lower = line.to_lowercase();
                if !keywords.iter().any(|k| lower.contains(k.as_str())) {
                    return None;
                }
                let category = if !tip_keyword.is_empty() && lower.contains(tip_keyword.as_str()) {
                    Category::Tip
                } else {
                    Category::Sale
                };
                Some((line, category))
            })
            .flat_map(|(line, category)| {
                re_money_token()
                    .find_iter(line)
                    .map(move |m| SummaryRecord::line(category, Money::parse_lenient(m.as_str())))
            })
            .collect()
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn labeled_amounts(re: &Regex, text: &str) -> Vec<Money> {
    re.captures_iter(text)
        .filter(|c| c.get(2).is_some_and(|frac| frac.as_str().len() == 2))
        .map(|c| c.get(1).map_or_else(Money::zero, |m| Money::parse_lenient(m.as_str())))
        .collect()
}

fn surplus_entries(totals: &[Money], tips: &[Money], paired: usize) -> Vec<UnpairedEntry> {
    let leftover = |category: Category, amounts: &[Money]| {
        amounts
            .iter()
            .enumerate()
            .skip(paired)
            .map(move |(index, &amount)| UnpairedEntry { category, index, amount })
            .collect::<Vec<_>>()
    };
    let mut out = leftover(Category::Sale, totals);
    out.extend(leftover(Category::Tip, tips));
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
