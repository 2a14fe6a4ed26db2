use std::env;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use vocab_core::model::{EntryId, VocabularyEntry};

use crate::error::EnrichError;

/// Longest input forwarded to the model, in characters.
pub const MAX_INPUT_CHARS: usize = 15_000;

/// Turns pasted text into vocabulary entries.
///
/// Used by the import flow only; the quiz engine never calls it.
#[async_trait]
pub trait Enricher: Send + Sync {
    /// # Errors
    ///
    /// Returns `EnrichError` if the text cannot be turned into entries.
    async fn enrich(&self, raw_text: &str) -> Result<Vec<VocabularyEntry>, EnrichError>;
}

#[derive(Clone, Debug)]
pub struct EnricherConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl EnricherConfig {
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("VOCAB_AI_API_KEY").ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        let base_url =
            env::var("VOCAB_AI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com/v1".into());
        let model = env::var("VOCAB_AI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into());
        Some(Self {
            base_url,
            api_key,
            model,
        })
    }
}

/// `Enricher` backed by an OpenAI-compatible chat completions endpoint.
#[derive(Clone)]
pub struct ChatEnricher {
    client: Client,
    config: Option<EnricherConfig>,
}

impl ChatEnricher {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(EnricherConfig::from_env())
    }

    #[must_use]
    pub fn new(config: Option<EnricherConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }
}

#[async_trait]
impl Enricher for ChatEnricher {
    async fn enrich(&self, raw_text: &str) -> Result<Vec<VocabularyEntry>, EnrichError> {
        let config = self.config.as_ref().ok_or(EnrichError::Disabled)?;

        let url = format!(
            "{}/chat/completions",
            config.base_url.trim_end_matches('/')
        );
        let payload = ChatRequest {
            model: config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: truncate_chars(raw_text, MAX_INPUT_CHARS),
                },
            ],
            temperature: 0.2,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(&config.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "enrichment request rejected");
            return Err(EnrichError::HttpStatus(response.status()));
        }

        let body: ChatResponse = response.json().await?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(EnrichError::EmptyResponse)?;

        let entries = parse_entries(&content)?;
        tracing::info!(entries = entries.len(), model = %config.model, "text enriched");
        Ok(entries)
    }
}

const SYSTEM_PROMPT: &str = "You build vocabulary cards for English learners whose native \
language is Vietnamese. The user sends either word pairs such as \"mitigate: giảm nhẹ\" \
(keep those pairs exactly) or running text (pick the most useful academic terms and translate \
them). Reply with a JSON object {\"entries\": [...]} where every entry has: term, \
vietnameseTranslation, definition (concise academic English), example (one natural sentence), \
bandLevel (estimated IELTS band, e.g. \"7.5\") and collocations (three common word partners).";

/// Parse a model reply into entries.
///
/// Accepts `{"entries": [...]}` or a bare array, optionally inside a code
/// fence. Entries without a term or translation are dropped; missing ids are
/// generated.
///
/// # Errors
///
/// Returns `EnrichError::Malformed` if the reply is not a word list and
/// `EnrichError::NoTerms` if no usable entry remains.
pub fn parse_entries(content: &str) -> Result<Vec<VocabularyEntry>, EnrichError> {
    let payload: EntriesPayload = serde_json::from_str(strip_code_fence(content))
        .map_err(|e| EnrichError::Malformed(e.to_string()))?;

    let drafts = match payload {
        EntriesPayload::Wrapped { entries } => entries,
        EntriesPayload::Bare(entries) => entries,
    };
    let received = drafts.len();

    let entries: Vec<VocabularyEntry> = drafts
        .into_iter()
        .filter_map(EntryDraft::into_entry)
        .collect();

    if entries.len() < received {
        tracing::warn!(
            dropped = received - entries.len(),
            "skipped entries without term or translation"
        );
    }
    if entries.is_empty() {
        return Err(EnrichError::NoTerms);
    }
    Ok(entries)
}

fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EntriesPayload {
    Wrapped { entries: Vec<EntryDraft> },
    Bare(Vec<EntryDraft>),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EntryDraft {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    term: String,
    #[serde(default, alias = "vietnameseTranslation")]
    translation: String,
    #[serde(default)]
    definition: String,
    #[serde(default)]
    example: String,
    #[serde(default, alias = "bandLevel")]
    level: String,
    #[serde(default)]
    collocations: Vec<String>,
}

impl EntryDraft {
    fn into_entry(self) -> Option<VocabularyEntry> {
        let term = self.term.trim();
        let translation = self.translation.trim();
        if term.is_empty() || translation.is_empty() {
            return None;
        }

        let id = self
            .id
            .filter(|id| !id.trim().is_empty())
            .map_or_else(EntryId::generate, EntryId::new);

        Some(VocabularyEntry {
            id,
            term: term.to_owned(),
            translation: translation.to_owned(),
            definition: self.definition,
            example: self.example,
            level: self.level,
            collocations: self.collocations,
        })
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wrapped_entries_and_fills_ids() {
        let content = r#"{"entries": [
            {"term": "Mitigate", "vietnameseTranslation": "Giảm nhẹ", "bandLevel": "7.5",
             "collocations": ["mitigate the risk"]},
            {"id": "x1", "term": "Adversity", "translation": "Nghịch cảnh"}
        ]}"#;

        let entries = parse_entries(content).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].translation, "Giảm nhẹ");
        assert_eq!(entries[0].level, "7.5");
        assert!(!entries[0].id.as_str().is_empty());
        assert_eq!(entries[1].id, EntryId::new("x1"));
    }

    #[test]
    fn parses_bare_array_in_code_fence() {
        let content = "```json\n[{\"term\": \"Ambiguous\", \"vietnameseTranslation\": \"Mơ hồ\"}]\n```";
        let entries = parse_entries(content).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].term, "Ambiguous");
    }

    #[test]
    fn drops_incomplete_entries() {
        let content = r#"[{"term": "Lonely"}, {"term": "Resilient", "translation": "Kiên cường"}]"#;
        let entries = parse_entries(content).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].term, "Resilient");
    }

    #[test]
    fn empty_list_means_no_terms() {
        let err = parse_entries(r#"{"entries": []}"#).unwrap_err();
        assert!(matches!(err, EnrichError::NoTerms));
    }

    #[test]
    fn prose_is_malformed() {
        let err = parse_entries("Sorry, I cannot help with that.").unwrap_err();
        assert!(matches!(err, EnrichError::Malformed(_)));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_chars("đẹp quá", 3), "đẹp");
        assert_eq!(truncate_chars("ok", 10), "ok");
    }

    #[tokio::test]
    async fn disabled_enricher_refuses() {
        let err = ChatEnricher::new(None).enrich("mitigate").await.unwrap_err();
        assert!(matches!(err, EnrichError::Disabled));
    }
}
