use thiserror::Error;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Image decode error: {0}")]
    ImageDecode(String),
    #[error("OCR engine error: {0}")]
    Engine(String),
    #[error("Tesseract not available — build with `tesseract` feature")]
    NotAvailable,
}

/// Abstraction over an OCR backend.
/// Implementations accept raw image bytes and return the recognized text.
pub trait OcrBackend: Send + Sync {
    fn recognize(&self, image_bytes: &[u8]) -> Result<String, OcrError>;
}

impl<T: OcrBackend + ?Sized> OcrBackend for Box<T> {
    fn recognize(&self, image_bytes: &[u8]) -> Result<String, OcrError> {
        (**self).recognize(image_bytes)
    }
}

// ── Mock backend (always available, used for tests) ───────────────────────────

/// Returns a pre-set string regardless of input.
pub struct MockRecognizer {
    pub text: String,
}

impl MockRecognizer {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl OcrBackend for MockRecognizer {
    fn recognize(&self, _image_bytes: &[u8]) -> Result<String, OcrError> {
        Ok(self.text.clone())
    }
}

// ── Transcript backend ────────────────────────────────────────────────────────

/// Treats the input as text that has already been recognized elsewhere.
/// Invalid UTF-8 sequences are replaced rather than rejected.
#[derive(Debug, Default, Clone, Copy)]
pub struct TranscriptRecognizer;

impl OcrBackend for TranscriptRecognizer {
    fn recognize(&self, image_bytes: &[u8]) -> Result<String, OcrError> {
        Ok(String::from_utf8_lossy(image_bytes).into_owned())
    }
}

// ── Tesseract backend (optional, gated behind `tesseract` feature) ─────────────

#[cfg(feature = "tesseract")]
pub mod tesseract_backend {
    use super::{OcrBackend, OcrError};
    use leptess::LepTess;

    pub struct TesseractRecognizer {
        data_path: Option<String>,
        lang: String,
    }

    impl TesseractRecognizer {
        pub fn new(data_path: Option<String>, lang: &str) -> Self {
            Self { data_path, lang: lang.to_string() }
        }
    }

    impl OcrBackend for TesseractRecognizer {
        fn recognize(&self, image_bytes: &[u8]) -> Result<String, OcrError> {
            // LepTess is not Sync, so each call gets its own engine.
            let mut lt = LepTess::new(self.data_path.as_deref(), &self.lang)
                .map_err(|e| OcrError::Engine(e.to_string()))?;
            lt.set_image_from_mem(image_bytes)
                .map_err(|e| OcrError::ImageDecode(e.to_string()))?;
            lt.get_utf8_text().map_err(|e| OcrError::Engine(e.to_string()))
        }
    }
}

/// A backend that always fails; stands in for an engine that is not compiled in.
pub struct UnavailableRecognizer;

impl OcrBackend for UnavailableRecognizer {
    fn recognize(&self, _image_bytes: &[u8]) -> Result<String, OcrError> {
        Err(OcrError::NotAvailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_returns_preset_text() {
        let r = MockRecognizer::new("Total $5.50\nTip $1.00");
        assert_eq!(r.recognize(b"fake image data").unwrap(), "Total $5.50\nTip $1.00");
    }

    #[test]
    fn mock_ignores_image_content() {
        let r = MockRecognizer::new("hello");
        assert_eq!(r.recognize(b"anything").unwrap(), "hello");
        assert_eq!(r.recognize(b"").unwrap(), "hello");
    }

    #[test]
    fn transcript_passes_text_through() {
        let r = TranscriptRecognizer;
        assert_eq!(r.recognize(b"Credit Card $12.34\n").unwrap(), "Credit Card $12.34\n");
    }

    #[test]
    fn transcript_replaces_invalid_utf8() {
        let r = TranscriptRecognizer;
        let text = r.recognize(b"Tip \xff$3.00").unwrap();
        assert!(text.contains("$3.00"));
        assert!(text.contains('\u{FFFD}'));
    }

    #[test]
    fn boxed_backend_delegates() {
        let r: Box<dyn OcrBackend> = Box::new(MockRecognizer::new("boxed"));
        assert_eq!(r.recognize(b"").unwrap(), "boxed");
    }

    #[test]
    fn unavailable_always_errors() {
        assert!(matches!(
            UnavailableRecognizer.recognize(b"png"),
            Err(OcrError::NotAvailable)
        ));
    }
}
