// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Photo analysis endpoints

pub mod handler;
pub mod request;
pub mod response;

pub use handler::{analyze_handler, analyze_multiple_handler};
pub use request::{AnalyzeMultipleRequest, AnalyzeRequest};
pub use response::AnalysisResponse;
