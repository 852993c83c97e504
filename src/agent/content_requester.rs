// SYNOID Shorts Content Requester
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Builds the themed prompt, asks the language model for the five labelled
// fields and parses them over the seeded defaults. A failed call is reported
// with its cause; the caller decides whether to fall back.

use crate::agent::prompt::PromptTemplate;
use crate::agent::record::ContentRecord;
use crate::agent::response_parser::parse_response;
use crate::agent::themes::{Theme, ThemeCatalog};
use rand::Rng;
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("API key not set (expected in ${0})")]
    MissingApiKey(String),
    #[error("network failure: {0}")]
    Network(String),
    #[error("authentication rejected: {0}")]
    Auth(String),
    #[error("quota exhausted: {0}")]
    Quota(String),
    #[error("model API returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("malformed model response: {0}")]
    MalformedResponse(String),
}

/// Anything that can turn a prompt into free text.
#[allow(async_fn_in_trait)]
pub trait LanguageModel {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

pub struct ContentRequester<M> {
    model: M,
    catalog: ThemeCatalog,
    template: PromptTemplate,
}

impl<M: LanguageModel> ContentRequester<M> {
    pub fn new(model: M, catalog: ThemeCatalog, template: PromptTemplate) -> Self {
        Self {
            model,
            catalog,
            template,
        }
    }

    pub fn catalog(&self) -> &ThemeCatalog {
        &self.catalog
    }

    pub fn choose_theme<R: Rng + ?Sized>(&self, rng: &mut R) -> Theme {
        self.catalog.pick(rng)
    }

    pub async fn request(&self, theme: &Theme) -> Result<ContentRecord, GenerationError> {
        info!("[CONTENT] 🤖 AI thinking... theme '{}' ({})", theme.name, theme.category);

        let prompt = self.template.render(theme);
        let text = self.model.generate(&prompt).await?;
        let record = parse_response(text.trim(), ContentRecord::seeded(&theme.name));

        info!("[CONTENT] 🔹 Theme: {}", theme.name);
        info!("[CONTENT] 🔹 Hook: {}", record.hook);
        info!("[CONTENT] 🔹 Body: {}", record.body);
        Ok(record)
    }

    /// Same as `request`, but any failure yields `ContentRecord::fallback()`.
    pub async fn request_or_fallback(&self, theme: &Theme) -> ContentRecord {
        match self.request(theme).await {
            Ok(record) => record,
            Err(e) => {
                error!("[CONTENT] ❌ Generation failed: {}", e);
                warn!("[CONTENT] ⚠️ AI data failed! Using fallback content.");
                ContentRecord::fallback()
            }
        }
    }
}
