// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bounding-box geometry for the winning hit.

use codewerk_core::types::{CropRect, Point};

/// Padding added on each side, as a fraction of the axis span.
const PAD_RATIO: f32 = 0.1;

/// Padded, clamped bounding rectangle of a symbol in full-image coordinates.
///
/// `corners` are local to `origin` (the crop region the hit came from).
/// Rejection happens twice: a quadrilateral collapsed to a line or point is
/// dropped before padding, and a box that clamping reduced to nothing is
/// dropped after — a symbol hard against an image edge survives, a
/// degenerate one does not.
pub fn padded_bounding_box(
    corners: &[Point; 4],
    origin: CropRect,
    image_width: u32,
    image_height: u32,
) -> Option<CropRect> {
    let xs = corners.map(|p| p.x + origin.left as i32);
    let ys = corners.map(|p| p.y + origin.top as i32);

    let min_x = xs.into_iter().fold(i32::MAX, i32::min);
    let max_x = xs.into_iter().fold(i32::MIN, i32::max);
    let min_y = ys.into_iter().fold(i32::MAX, i32::min);
    let max_y = ys.into_iter().fold(i32::MIN, i32::max);

    if min_x >= max_x || min_y >= max_y {
        return None;
    }

    let pad_x = ((max_x - min_x) as f32 * PAD_RATIO) as i32;
    let pad_y = ((max_y - min_y) as f32 * PAD_RATIO) as i32;

    let left = (min_x - pad_x).max(0);
    let top = (min_y - pad_y).max(0);
    let right = (max_x + pad_x).min(image_width as i32);
    let bottom = (max_y + pad_y).min(image_height as i32);

    if right - left <= 0 || bottom - top <= 0 {
        return None;
    }

    CropRect::new(left as u32, top as u32, right as u32, bottom as u32)
}
