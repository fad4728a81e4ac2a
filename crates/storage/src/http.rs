use async_trait::async_trait;
use quiz_core::model::QuestionBank;
use reqwest::Client;

use crate::repository::{BankError, BankSource, parse_bank};

/// Bank served as a static JSON file over HTTP.
///
/// One GET per load, no retry and no request timeout.
#[derive(Clone, Debug)]
pub struct HttpBankSource {
    client: Client,
    url: String,
}

impl HttpBankSource {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), url)
    }

    #[must_use]
    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl BankSource for HttpBankSource {
    async fn load_bank(&self) -> Result<QuestionBank, BankError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            log::warn!("bank request to {} returned {status}", self.url);
            return Err(BankError::HttpStatus(status));
        }
        let bytes = response.bytes().await?;
        parse_bank(&bytes)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
