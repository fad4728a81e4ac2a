use std::path::{Path, PathBuf};

use async_trait::async_trait;
use quiz_core::model::QuestionBank;

use crate::repository::{BankError, BankSource, parse_bank};

/// Bank stored as a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileBankSource {
    path: PathBuf,
}

impl FileBankSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl BankSource for FileBankSource {
    async fn load_bank(&self) -> Result<QuestionBank, BankError> {
        let bytes = tokio::fs::read(&self.path).await?;
        parse_bank(&bytes)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn reads_bank_from_disk() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"CO1": [{{"qno": 1, "question": "q", "options": ["p", "q"], "answer": "q"}}]}}"#
        )
        .unwrap();

        let source = FileBankSource::new(file.path());
        let bank = source.load_bank().await.unwrap();

        assert_eq!(bank.group("CO1").unwrap().questions().len(), 1);
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileBankSource::new(dir.path().join("absent.json"));

        let err = source.load_bank().await.unwrap_err();

        assert!(matches!(err, BankError::Io(_)));
    }
}
