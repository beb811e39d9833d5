// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Multi-region scan loop.

use codewerk_core::error::{CodewerkError, Result};
use codewerk_core::types::{CancelFlag, CropRect, ReaderOptions, ScanHit};
use image::DynamicImage;
use tracing::{debug, warn};

use crate::codec::SymbolCodec;

/// Decode every planned region in order and aggregate all hits.
///
/// The cancel flag is polled before each decode attempt; once observed the
/// whole call resolves to `Cancelled` and every hit gathered so far is
/// discarded — a partial result is never surfaced. A codec failure on one
/// region (malformed input, resource exhaustion inside the backend)
/// degrades to zero hits for that region only; the remaining regions are
/// still tried, and nothing is retried.
pub fn scan_regions<C: SymbolCodec>(
    codec: &C,
    image: &DynamicImage,
    regions: &[CropRect],
    options: &ReaderOptions,
    cancel: &CancelFlag,
) -> Result<Vec<ScanHit>> {
    let mut hits = Vec::new();

    for &region in regions {
        if cancel.is_cancelled() {
            return Err(CodewerkError::Cancelled);
        }

        match codec.decode(image, region, 0, options) {
            Ok(found) => {
                if !found.is_empty() {
                    debug!(%region, count = found.len(), "region produced hits");
                }
                hits.extend(found.into_iter().map(|hit| ScanHit { hit, region }));
            }
            Err(err) => {
                warn!(%region, error = %err, "decode failed, skipping region");
            }
        }
    }

    Ok(hits)
}
