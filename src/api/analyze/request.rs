// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Photo analysis request types and validation

use serde::{Deserialize, Serialize};
use url::Url;

use crate::api::errors::ApiError;

/// Request for single-photo analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    /// URL of the photo to analyze
    pub photo_url: String,
}

impl AnalyzeRequest {
    /// Validate the analyze request
    pub fn validate(&self) -> Result<(), ApiError> {
        validate_photo_url("photoUrl", &self.photo_url)
    }
}

/// Request for multi-photo analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeMultipleRequest {
    /// URLs of the photos to analyze
    pub photo_urls: Vec<String>,
}

impl AnalyzeMultipleRequest {
    /// Validate the multi-photo request
    ///
    /// Every URL must be well-formed; an empty list is accepted.
    pub fn validate(&self) -> Result<(), ApiError> {
        for url in &self.photo_urls {
            validate_photo_url("photoUrls", url)?;
        }
        Ok(())
    }
}

fn validate_photo_url(field: &str, value: &str) -> Result<(), ApiError> {
    if value.is_empty() {
        return Err(ApiError::ValidationError {
            field: field.to_string(),
            message: format!("{} is required", field),
        });
    }

    let parsed = Url::parse(value).map_err(|e| ApiError::ValidationError {
        field: field.to_string(),
        message: format!("invalid URL '{}': {}", value, e),
    })?;

    if !["http", "https"].contains(&parsed.scheme()) {
        return Err(ApiError::ValidationError {
            field: field.to_string(),
            message: format!("unsupported URL scheme '{}'", parsed.scheme()),
        });
    }

    Ok(())
}
