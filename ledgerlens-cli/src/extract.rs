//! Extraction client: sends a statement to Gemini and returns the raw CSV text.
//!
//! One request per statement. No retry, no streaming.

use std::future::Future;
use std::time::Duration;

use anyhow::Context;
use base64::Engine;
use ledgerlens_core::{Error, Result};
use ledgerlens_ingest::StatementFile;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ExtractionSection;

/// Anything that can turn a statement file into raw CSV text.
pub trait Extractor {
    fn extract(&self, file: &StatementFile) -> impl Future<Output = Result<String>> + Send;
}

pub const EXTRACTION_PROMPT: &str = r#"You are a bank statement OCR and data extraction system.

Perform OCR on the attached bank statement (image or PDF), from any bank, and extract
every transaction with these fields:
1. Date
2. Description (transaction title)
3. Amount: negative for debits/expenses, positive for credits/income
4. Category: one of Food, Shopping, Travel, Utilities, Rent, Salary, Transfer, ATM, EMI, Fees, Investment, Other
5. Notes: a brief contextual note if available or inferable (e.g. "UPI payment", "ATM withdrawal", "Online transfer")

Output rules:
- Return ONLY a CSV table. No explanations, comments or extra text.
- The first row is the header, in exactly this column order:
Date,Description,Amount,Category,Notes
- Date format: YYYY-MM-DD
- Amount is numeric, without currency symbols or thousands separators
- Remove duplicate transactions
- Ignore opening balance, closing balance and summary sections
- Leave missing fields empty
- Preserve the transaction order of the statement

Example:
Date,Description,Amount,Category,Notes
2024-07-02,UPI-ZOMATO,-450,Food,UPI food delivery payment
2024-07-05,SALARY CREDIT,55000,Salary,Monthly salary
2024-07-08,ATM CASH WITHDRAWAL,-2000,ATM,Cash withdrawal
"#;

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    Inline { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

fn build_request(file: &StatementFile) -> GenerateRequest {
    let data = base64::engine::general_purpose::STANDARD.encode(&file.bytes);
    GenerateRequest {
        contents: vec![Content {
            parts: vec![
                Part::Text {
                    text: EXTRACTION_PROMPT.to_string(),
                },
                Part::Inline {
                    inline_data: InlineData {
                        mime_type: file.mime_type.clone(),
                        data,
                    },
                },
            ],
        }],
    }
}

/// Text of the first candidate, or why there is none.
fn response_text(resp: GenerateResponse) -> Result<String> {
    if let Some(reason) = resp.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(Error::Service(format!("response blocked: {reason}")));
    }

    let Some(candidate) = resp.candidates.into_iter().next() else {
        return Err(Error::EmptyResponse);
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        if let Some(reason) = candidate.finish_reason.filter(|r| r != "STOP") {
            return Err(Error::Service(format!("no text returned (finish reason: {reason})")));
        }
        return Err(Error::EmptyResponse);
    }
    Ok(text)
}

#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(cfg: &ExtractionSection, api_key: String) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .context("build HTTP client")?;

        Ok(Self {
            http,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            model: cfg.model.clone(),
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

impl Extractor for GeminiClient {
    async fn extract(&self, file: &StatementFile) -> Result<String> {
        let body = build_request(file);
        debug!(model = %self.model, mime = %file.mime_type, bytes = file.bytes.len(), "sending statement for extraction");

        let resp = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Service(format!("request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let txt = resp.text().await.unwrap_or_default();
            debug!(%status, "extraction request rejected");
            return Err(Error::Service(format!("{status} {}", txt.trim())));
        }

        let out: GenerateResponse = resp
            .json()
            .await
            .map_err(|e| Error::Service(format!("unreadable response: {e}")))?;

        let text = response_text(out)?;
        debug!(chars = text.len(), "extraction response received");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(v: serde_json::Value) -> GenerateResponse {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn test_request_body_shape() {
        let file = StatementFile::from_bytes("july.pdf", b"%PDF".to_vec()).unwrap();
        let body = serde_json::to_value(build_request(&file)).unwrap();

        let parts = &body["contents"][0]["parts"];
        assert!(parts[0]["text"].as_str().unwrap().contains("Date,Description,Amount,Category,Notes"));
        assert_eq!(parts[1]["inline_data"]["mime_type"], "application/pdf");
        assert_eq!(parts[1]["inline_data"]["data"], "JVBERg==");
    }

    #[test]
    fn test_joins_text_parts() {
        let resp = parse(json!({
            "candidates": [{
                "content": { "parts": [
                    { "text": "```csv\nDate,Description,Amount,Category,Notes\n" },
                    { "text": "2024-07-02,UPI-ZOMATO,-450,Food,\n```" }
                ]},
                "finishReason": "STOP"
            }]
        }));
        let text = response_text(resp).unwrap();
        assert!(text.starts_with("```csv\nDate,"));
        assert!(text.ends_with("Food,\n```"));
    }

    #[test]
    fn test_blocked_prompt_is_service_error() {
        let resp = parse(json!({ "promptFeedback": { "blockReason": "SAFETY" } }));
        match response_text(resp) {
            Err(Error::Service(msg)) => assert_eq!(msg, "response blocked: SAFETY"),
            other => panic!("expected Service error, got {other:?}"),
        }
    }

    #[test]
    fn test_no_candidates_is_empty_response() {
        assert!(matches!(
            response_text(parse(json!({}))),
            Err(Error::EmptyResponse)
        ));
    }

    #[test]
    fn test_blank_text_is_empty_response() {
        let resp = parse(json!({
            "candidates": [{ "content": { "parts": [{ "text": "  \n" }] }, "finishReason": "STOP" }]
        }));
        assert!(matches!(response_text(resp), Err(Error::EmptyResponse)));
    }

    #[test]
    fn test_missing_text_with_reason_is_service_error() {
        let resp = parse(json!({ "candidates": [{ "finishReason": "RECITATION" }] }));
        match response_text(resp) {
            Err(Error::Service(msg)) => assert!(msg.contains("RECITATION")),
            other => panic!("expected Service error, got {other:?}"),
        }
    }

    #[test]
    fn test_endpoint() {
        let cfg = ExtractionSection {
            base_url: "https://example.test/".to_string(),
            ..ExtractionSection::default()
        };
        let client = GeminiClient::new(&cfg, "AIza-test".to_string()).unwrap();
        assert_eq!(
            client.endpoint(),
            "https://example.test/v1beta/models/gemini-3-flash-preview:generateContent"
        );
    }
}
