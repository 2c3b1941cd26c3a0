/**
 * AI Caption Service
 *
 * This module proxies caption generation to the Gemini generateContent REST
 * API. Its responsibilities end at prompt construction and lightweight
 * post-parsing of the reply. There is no retry, backoff, or rate limiting;
 * any provider failure surfaces as a single `ExternalService` error.
 */

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Client for the generative-text provider.
///
/// Cheap to clone; the inner `reqwest::Client` is an `Arc` internally.
#[derive(Clone)]
pub struct CaptionService {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize, Default)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

impl CaptionService {
    /// Create a service against the given provider base URL and model.
    ///
    /// A `None` api_key leaves the endpoints callable but failing with
    /// `ExternalService`, matching an unconfigured deployment.
    pub fn new(base_url: String, model: String, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            model,
            api_key,
        }
    }

    /// Generate a single caption for an image description.
    ///
    /// The optional base64 image payload is accepted for wire compatibility
    /// but does not influence the prompt.
    pub async fn generate_caption(
        &self,
        image_description: &str,
        _base64_image: Option<&str>,
    ) -> Result<String, ApiError> {
        let prompt = format!(
            "Generate a creative, engaging Instagram caption for an image with the following description: \"{image_description}\". \
             The caption should:\n\
             - Be catchy and engaging\n\
             - Include relevant hashtags (2-5)\n\
             - Be appropriate for social media\n\
             - Be 50-150 characters including hashtags\n\
             Return only the caption, nothing else."
        );

        let text = self.generate(&prompt).await?;
        let caption = text.trim();
        if caption.is_empty() {
            return Err(ApiError::ExternalService(
                "Failed to generate caption".to_string(),
            ));
        }

        Ok(caption.to_string())
    }

    /// Generate three distinct caption suggestions for an image description.
    pub async fn generate_suggestions(
        &self,
        image_description: &str,
    ) -> Result<Vec<String>, ApiError> {
        let prompt = format!(
            "Generate 3 different creative and engaging Instagram captions for an image with the following description: \"{image_description}\". \
             Each caption should:\n\
             - Be catchy and engaging\n\
             - Include relevant hashtags (2-3)\n\
             - Be appropriate for social media\n\
             - Be unique and different from each other\n\n\
             Format the response as a numbered list (1. Caption, 2. Caption, 3. Caption). Return only the captions, nothing else."
        );

        let text = self.generate(&prompt).await?;
        Ok(parse_suggestions(&text))
    }

    /// Generate hashtags for an existing caption.
    pub async fn generate_hashtags(&self, caption: &str) -> Result<Vec<String>, ApiError> {
        let prompt = format!(
            "Based on this Instagram caption, generate 10-15 relevant hashtags that would help increase visibility:\n\
             \"{caption}\"\n\n\
             Return only the hashtags separated by spaces, starting with # (e.g., #hashtag1 #hashtag2). No numbering or other text."
        );

        let text = self.generate(&prompt).await?;
        Ok(parse_hashtags(&text))
    }

    /// One round trip to the provider: prompt in, raw text out.
    async fn generate(&self, prompt: &str) -> Result<String, ApiError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            ApiError::ExternalService("GEMINI_API_KEY not configured".to_string())
        })?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, api_key
        );

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<GenerateResponse>()
            .await?;

        let text: String = response
            .candidates
            .into_iter()
            .next()
            .map(|c| c.content.parts)
            .unwrap_or_default()
            .into_iter()
            .map(|p| p.text)
            .collect();

        if text.trim().is_empty() {
            return Err(ApiError::ExternalService(
                "Empty response from AI provider".to_string(),
            ));
        }

        Ok(text)
    }
}

/// Split a numbered-list reply into individual captions, dropping the
/// numbering and blank lines.
fn parse_suggestions(text: &str) -> Vec<String> {
    text.lines()
        .map(strip_list_prefix)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Keep only `#`-prefixed tokens, lower-cased.
fn parse_hashtags(text: &str) -> Vec<String> {
    text.split_whitespace()
        .filter(|token| token.starts_with('#'))
        .map(|token| token.to_lowercase())
        .collect()
}

/// Strip a leading "N." or "N)" list marker from a line.
fn strip_list_prefix(line: &str) -> &str {
    let trimmed = line.trim_start();
    let digits = trimmed.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return trimmed;
    }

    let rest = &trimmed[digits..];
    rest.strip_prefix('.')
        .or_else(|| rest.strip_prefix(')'))
        .unwrap_or(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_suggestions_strips_numbering() {
        let text = "1. Chasing sunsets #goldenhour\n2) Lost in the light #sunset\n\n3. Sky on fire #dusk";
        let suggestions = parse_suggestions(text);
        assert_eq!(
            suggestions,
            vec![
                "Chasing sunsets #goldenhour",
                "Lost in the light #sunset",
                "Sky on fire #dusk",
            ]
        );
    }

    #[test]
    fn test_parse_suggestions_keeps_unnumbered_lines() {
        let suggestions = parse_suggestions("Just one caption #simple");
        assert_eq!(suggestions, vec!["Just one caption #simple"]);
    }

    #[test]
    fn test_parse_hashtags_filters_and_lowercases() {
        let tags = parse_hashtags("#Sunset some words #BEACH  #golden_hour extra");
        assert_eq!(tags, vec!["#sunset", "#beach", "#golden_hour"]);
    }

    #[test]
    fn test_parse_hashtags_empty_when_no_tags() {
        assert!(parse_hashtags("no tags here at all").is_empty());
    }

    #[test]
    fn test_strip_list_prefix_ignores_bare_numbers() {
        // A line that is a number with no list marker stays intact.
        assert_eq!(strip_list_prefix("2024 was wild"), "2024 was wild");
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_fast() {
        let service = CaptionService::new(
            "http://localhost:0".to_string(),
            "gemini-2.0-flash".to_string(),
            None,
        );
        let err = service.generate_caption("a dog", None).await.unwrap_err();
        assert!(matches!(err, ApiError::ExternalService(_)));
    }
}
