// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Codewerk.
//
// Every variant here collapses to "no result" at the engine boundary; the
// taxonomy exists so logs can state *why* a detection produced nothing.

use thiserror::Error;

/// Top-level error type for all Codewerk operations.
#[derive(Debug, Error)]
pub enum CodewerkError {
    // -- Detection errors --
    #[error("no symbol found on the page")]
    NoSymbol,

    #[error("symbol decode failed: {0}")]
    Decode(String),

    #[error("symbol bounding box is degenerate")]
    GeometryRejected,

    #[error("symbol encode failed: {0}")]
    Encode(String),

    #[error("detection cancelled by caller")]
    Cancelled,

    // -- Pixel buffer errors --
    #[error("image processing failed: {0}")]
    Image(String),

    // -- Configuration --
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, CodewerkError>;
