// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Engine configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::ReaderOptions;

/// Tuning knobs the embedding application may persist and hand to the
/// engine at construction time. Storage (files, preferences) is the
/// application's job; this type only defines the shape and JSON codec.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Decode-side options applied to every crop region.
    pub reader: ReaderOptions,
    /// Default for the per-call extra-hard flag when the caller has no
    /// preference of its own.
    pub try_extra_hard: bool,
    /// Default for the per-call regenerate flag.
    pub regenerate: bool,
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
