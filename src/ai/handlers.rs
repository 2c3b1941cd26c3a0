/**
 * AI Caption Handlers
 *
 * HTTP handlers for the /api/ai surface. Each validates its text input,
 * delegates to the caption service, and wraps the result in the response
 * envelope. All three endpoints require an authenticated session.
 */

use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};

use crate::ai::service::CaptionService;
use crate::error::ApiError;

#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct CaptionRequest {
    #[serde(default)]
    pub image_description: Option<String>,
    #[serde(default)]
    pub base64_image: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionsRequest {
    #[serde(default)]
    pub image_description: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Default)]
pub struct HashtagsRequest {
    #[serde(default)]
    pub caption: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct CaptionEnvelope {
    pub success: bool,
    pub message: String,
    pub caption: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SuggestionsEnvelope {
    pub success: bool,
    pub message: String,
    pub suggestions: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct HashtagsEnvelope {
    pub success: bool,
    pub message: String,
    pub hashtags: Vec<String>,
}

/// POST /api/ai/generate-caption
pub async fn generate_caption_handler(
    State(captions): State<CaptionService>,
    Json(request): Json<CaptionRequest>,
) -> Result<Json<CaptionEnvelope>, ApiError> {
    let description = request.image_description.as_deref().unwrap_or("").trim();
    if description.is_empty() {
        return Err(ApiError::validation("Image description is required"));
    }

    let caption = captions
        .generate_caption(description, request.base64_image.as_deref())
        .await?;

    Ok(Json(CaptionEnvelope {
        success: true,
        message: "Caption generated successfully".to_string(),
        caption,
    }))
}

/// POST /api/ai/generate-suggestions
pub async fn generate_suggestions_handler(
    State(captions): State<CaptionService>,
    Json(request): Json<SuggestionsRequest>,
) -> Result<Json<SuggestionsEnvelope>, ApiError> {
    let description = request.image_description.as_deref().unwrap_or("").trim();
    if description.is_empty() {
        return Err(ApiError::validation("Image description is required"));
    }

    let suggestions = captions.generate_suggestions(description).await?;

    Ok(Json(SuggestionsEnvelope {
        success: true,
        message: "Caption suggestions generated successfully".to_string(),
        suggestions,
    }))
}

/// POST /api/ai/generate-hashtags
pub async fn generate_hashtags_handler(
    State(captions): State<CaptionService>,
    Json(request): Json<HashtagsRequest>,
) -> Result<Json<HashtagsEnvelope>, ApiError> {
    let caption = request.caption.as_deref().unwrap_or("").trim();
    if caption.is_empty() {
        return Err(ApiError::validation("Caption is required"));
    }

    let hashtags = captions.generate_hashtags(caption).await?;

    Ok(Json(HashtagsEnvelope {
        success: true,
        message: "Hashtags generated successfully".to_string(),
        hashtags,
    }))
}
