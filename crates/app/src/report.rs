use serde_json::{json, Value};
use tipscan_core::{Category, Money};
use tipscan_ocr::{ScanOutcome, ScanReport, SummaryRecord};

const NO_DATA: &str = "No receipt data found. Try another photo.";
const FAILED: &str = "Something went wrong while reading the receipt";

/// Plain-text rendering of one scan for the terminal.
pub fn render_text(label: &str, outcome: &ScanOutcome, currency: &str) -> String {
    let mut out = format!("== {label}\n");
    match outcome {
        ScanOutcome::Summary(report) => write_summary(&mut out, report, currency),
        ScanOutcome::NoData => out.push_str(&format!("{NO_DATA}\n")),
        ScanOutcome::Failed { message } => out.push_str(&format!("{FAILED}: {message}\n")),
    }
    out
}

fn write_summary(out: &mut String, report: &ScanReport, currency: &str) {
    let fmt = |m: Money| m.format_with(currency);

    if let Some(strategy) = report.extraction.strategy {
        out.push_str(&format!("strategy: {strategy}\n"));
    }
    for (i, record) in report.extraction.records.iter().enumerate() {
        let row = match *record {
            SummaryRecord::Paired { sale, tip } => {
                format!("{:>3}  Sale {:>12}  Tip {:>12}\n", i + 1, fmt(sale), fmt(tip))
            }
            SummaryRecord::Line { category, amount } => {
                format!("{:>3}  {:<4} {:>12}\n", i + 1, category.to_string(), fmt(amount))
            }
        };
        out.push_str(&row);
    }
    for entry in &report.extraction.unpaired {
        let label = match entry.category {
            Category::Sale => "total",
            Category::Tip => "tip",
        };
        out.push_str(&format!(
            "warning: unpaired {label} #{} ({}) was not counted\n",
            entry.index + 1,
            fmt(entry.amount)
        ));
    }
    out.push_str(&format!("Total sale: {}\n", fmt(report.totals.total_sale)));
    out.push_str(&format!("Total tip:  {}\n", fmt(report.totals.total_tip)));
}

/// JSON rendering; amounts are two-decimal strings so no precision is lost to floats.
pub fn render_json(label: &str, outcome: &ScanOutcome, currency: &str) -> Value {
    match outcome {
        ScanOutcome::Summary(report) => {
            let records: Vec<Value> = report
                .extraction
                .records
                .iter()
                .map(|record| match *record {
                    SummaryRecord::Paired { sale, tip } => {
                        json!({ "sale": sale.to_fixed(), "tip": tip.to_fixed() })
                    }
                    SummaryRecord::Line { category, amount } => {
                        json!({ "category": category.to_string(), "amount": amount.to_fixed() })
                    }
                })
                .collect();
            json!({
                "file": label,
                "status": "found",
                "strategy": report.extraction.strategy,
                "currency": currency,
                "records": records,
                "unpaired": report.extraction.unpaired,
                "total_sale": report.totals.total_sale.to_fixed(),
                "total_tip": report.totals.total_tip.to_fixed(),
            })
        }
        ScanOutcome::NoData => json!({ "file": label, "status": "no_data" }),
        ScanOutcome::Failed { message } => {
            json!({ "file": label, "status": "failed", "message": message })
        }
    }
}
