use std::path::Path;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::aggregate::aggregate;
use crate::extract::Extractor;
use crate::recognizer::{OcrBackend, OcrError};
use crate::types::{ExtractionResult, Totals};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("OCR recognition failed: {0}")]
    Ocr(#[from] OcrError),
}

/// The result of a single receipt processing run.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// Raw OCR text output.
    pub ocr_text: String,
    pub extraction: ExtractionResult,
    /// Derived from `extraction.records`.
    pub totals: Totals,
}

impl ScanReport {
    pub fn from_text(ocr_text: String, extractor: &Extractor) -> Self {
        let extraction = extractor.extract(&ocr_text);
        let totals = aggregate(&extraction.records);
        Self { ocr_text, extraction, totals }
    }
}

/// What the presentation layer should show for one receipt.
///
/// `NoData` and `Failed` stay distinct: the first means the text held nothing
/// recognizable, the second that the text could not be produced at all.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScanOutcome {
    Summary(ScanReport),
    NoData,
    Failed { message: String },
}

impl ScanOutcome {
    pub fn from_result(result: Result<ScanReport, PipelineError>) -> Self {
        match result {
            Ok(report) if report.extraction.found() => ScanOutcome::Summary(report),
            Ok(_) => ScanOutcome::NoData,
            Err(e) => ScanOutcome::Failed { message: e.to_string() },
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ScanOutcome::Failed { .. })
    }
}

/// Orchestrates: read → OCR → extract → aggregate.
pub struct ReceiptPipeline<R: OcrBackend> {
    recognizer: R,
    extractor: Extractor,
}

impl<R: OcrBackend> ReceiptPipeline<R> {
    pub fn new(recognizer: R, extractor: Extractor) -> Self {
        Self { recognizer, extractor }
    }

    /// Process a file on disk.
    pub async fn process_file(&self, path: &Path) -> Result<ScanReport, PipelineError> {
        let bytes = tokio::fs::read(path).await?;
        debug!(path = %path.display(), bytes = bytes.len(), "read receipt");
        self.process_bytes(&bytes)
    }

    /// Process raw bytes (from camera capture or file read).
    pub fn process_bytes(&self, data: &[u8]) -> Result<ScanReport, PipelineError> {
        let ocr_text = self.recognizer.recognize(data).inspect_err(|e| {
            warn!("OCR backend failed: {e}");
        })?;
        Ok(ScanReport::from_text(ocr_text, &self.extractor))
    }

    /// Process a file and fold any failure into a [`ScanOutcome`].
    pub async fn scan(&self, path: &Path) -> ScanOutcome {
        ScanOutcome::from_result(self.process_file(path).await)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
