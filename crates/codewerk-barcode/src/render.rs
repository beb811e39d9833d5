// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Output synthesis — crop the source pixels, or regenerate a canonical
// symbol image from the decoded payload.

use codewerk_core::error::{CodewerkError, Result};
use codewerk_core::types::{ContentType, DecodeHit, ScanHit, SymbolMatrix};
use image::imageops::FilterType;
use image::{DynamicImage, GrayImage, Luma};
use tracing::debug;

use crate::codec::{SymbolCodec, SymbolPayload};
use crate::geometry;

/// Edge length of a regenerated symbol when the payload is re-encoded.
pub const CANONICAL_SIZE: u32 = 400;
/// Integer upscale factor applied to a module grid rendered 1:1.
pub const RENDER_MULTIPLIER: u32 = 10;
/// Dark-module color of synthesized output.
pub const FOREGROUND: Luma<u8> = Luma([0x00]);
/// Background color of synthesized output.
pub const BACKGROUND: Luma<u8> = Luma([0xff]);

/// Produce the final output bitmap for the winning hit.
///
/// Crop mode preserves the authentic appearance of the printed symbol;
/// regenerate mode trades that for a scanner-friendly, resolution-
/// independent rendition. Either way the result is a fresh allocation —
/// the source bitmap is never mutated.
pub fn synthesize<C: SymbolCodec>(
    codec: &C,
    source: &DynamicImage,
    winner: &ScanHit,
    regenerate: bool,
) -> Result<DynamicImage> {
    if regenerate {
        match &winner.hit.symbol {
            Some(matrix) if !matrix.is_degenerate() => Ok(render_matrix(matrix)),
            _ => reencode_payload(codec, &winner.hit),
        }
    } else {
        crop_bounding_box(source, winner)
    }
}

/// Crop the source to the symbol's padded bounding box.
fn crop_bounding_box(source: &DynamicImage, winner: &ScanHit) -> Result<DynamicImage> {
    let rect = geometry::padded_bounding_box(
        &winner.hit.corners,
        winner.region,
        source.width(),
        source.height(),
    )
    .ok_or(CodewerkError::GeometryRejected)?;

    debug!(%rect, "cropping symbol bounding box");
    Ok(source.crop_imm(rect.left, rect.top, rect.width(), rect.height()))
}

/// Render a module grid 1 pixel per module, then upscale by an integer
/// factor with nearest-neighbour sampling so edges stay crisp and the
/// output stays strictly two-colored.
fn render_matrix(matrix: &SymbolMatrix) -> DynamicImage {
    let modules = GrayImage::from_fn(matrix.width, matrix.height, |x, y| {
        if matrix.get(x, y) { FOREGROUND } else { BACKGROUND }
    });

    let scaled = image::imageops::resize(
        &modules,
        matrix.width * RENDER_MULTIPLIER,
        matrix.height * RENDER_MULTIPLIER,
        FilterType::Nearest,
    );
    DynamicImage::ImageLuma8(scaled)
}

/// Re-encode the decoded payload as a canonical symbol of the same format.
fn reencode_payload<C: SymbolCodec>(codec: &C, hit: &DecodeHit) -> Result<DynamicImage> {
    let payload = match hit.content_type {
        ContentType::Text => SymbolPayload::Text(&hit.text),
        ContentType::Binary => SymbolPayload::Bytes(&hit.raw_bytes),
    };

    let encoded = codec.encode(
        payload,
        hit.format,
        CANONICAL_SIZE,
        CANONICAL_SIZE,
        FOREGROUND,
        BACKGROUND,
        0,
    )?;
    Ok(DynamicImage::ImageLuma8(encoded))
}
