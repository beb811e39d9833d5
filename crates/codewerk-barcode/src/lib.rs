// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// codewerk-barcode — Barcode detection and resynthesis for Codewerk.
//
// Locates a printed barcode on a rasterized document page (any supported
// symbology, possibly rotated, low-contrast, or tiny relative to the page),
// decodes its payload through a pluggable symbology codec, and produces a
// clean output image: either a tight crop of the original pixels or a
// freshly rendered canonical symbol.

pub mod codec;
pub mod engine;
pub mod geometry;
pub mod priority;
pub mod regions;
pub mod render;
pub mod rxing_codec;
pub mod scan;

// Re-export the primary entry points so callers can use
// `codewerk_barcode::BarcodeEngine` etc.
pub use codec::{SymbolCodec, SymbolPayload};
pub use engine::BarcodeEngine;
pub use rxing_codec::RxingCodec;
