//! OCR backends. `AppState` holds an `Arc<dyn TextRecognizer>`.

use std::io::Write;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use super::OcrError;

/// Reads text out of a PNG-encoded image.
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    async fn recognize(&self, png: &[u8]) -> Result<String, OcrError>;
}

/// Runs the Tesseract command-line tool, one process per image.
pub struct TesseractCli {
    command: String,
    language: String,
}

impl TesseractCli {
    pub fn new(command: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            language: language.into(),
        }
    }
}

#[async_trait]
impl TextRecognizer for TesseractCli {
    async fn recognize(&self, png: &[u8]) -> Result<String, OcrError> {
        let mut file = tempfile::Builder::new()
            .prefix("badge-")
            .suffix(".png")
            .tempfile()?;
        file.write_all(png)?;
        file.flush()?;

        debug!("Running {} on {}", self.command, file.path().display());

        // LSTM engine, single uniform block of text
        let output = Command::new(&self.command)
            .arg(file.path())
            .arg("stdout")
            .args(["--oem", "3", "--psm", "6", "-l", self.language.as_str()])
            .output()
            .await
            .map_err(|e| OcrError::Engine(format!("failed to run '{}': {e}", self.command)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::Engine(format!(
                "'{}' exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Canned backends for tests.
#[cfg(test)]
pub mod stub {
    use super::*;

    pub struct FixedText(pub &'static str);

    #[async_trait]
    impl TextRecognizer for FixedText {
        async fn recognize(&self, _png: &[u8]) -> Result<String, OcrError> {
            Ok(self.0.to_string())
        }
    }

    pub struct Unavailable;

    #[async_trait]
    impl TextRecognizer for Unavailable {
        async fn recognize(&self, _png: &[u8]) -> Result<String, OcrError> {
            Err(OcrError::Engine("engine offline".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_binary_is_an_engine_error() {
        let engine = TesseractCli::new("hr-chatbot-no-such-ocr-binary", "spa");
        let err = engine.recognize(b"not really a png").await.unwrap_err();
        assert!(matches!(err, OcrError::Engine(ref m) if m.contains("failed to run")));
    }
}
