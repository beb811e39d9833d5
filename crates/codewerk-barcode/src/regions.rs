// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Crop region planning.
//
// Barcodes on a document page usually sit in a margin strip, so slicing the
// longer axis into a few full-width (or full-height) strips finds
// high-contrast sub-regions cheaply without a full tiled search.

use codewerk_core::types::CropRect;

/// Strip counts probed along the longer axis when the caller asks for an
/// extra-hard search, in probe order.
const EXTRA_HARD_DIVISORS: [u32; 3] = [3, 4, 5];

/// Ordered candidate regions for one page, full image always first.
///
/// With `try_extra_hard`, the page is additionally sliced into N strips
/// along its longer axis (1 cell along the shorter axis) for N of 3, 4, 5.
/// Cell bounds use truncating integer division for every cell, so a thin
/// remainder margin at the far edge stays uncovered when the dimension is
/// not divisible. That asymmetry is load-bearing: downstream consumers rely
/// on cell bounds being reproducible across releases, so it must not be
/// "fixed" by redistributing the remainder.
pub fn plan_regions(width: u32, height: u32, try_extra_hard: bool) -> Vec<CropRect> {
    let mut regions: Vec<CropRect> = CropRect::full(width, height).into_iter().collect();
    if try_extra_hard {
        for divisor in EXTRA_HARD_DIVISORS {
            regions.extend(grid_cells(width, height, divisor, 1));
        }
    }
    regions
}

/// Cells of a grid slicing the longer axis into `longer_divisor` parts and
/// the shorter axis into `shorter_divisor` parts. Degenerate cells are
/// skipped.
fn grid_cells(
    width: u32,
    height: u32,
    longer_divisor: u32,
    shorter_divisor: u32,
) -> Vec<CropRect> {
    let (divisor_x, divisor_y) = if width > height {
        (longer_divisor, shorter_divisor)
    } else {
        (shorter_divisor, longer_divisor)
    };

    let cell_w = width / divisor_x;
    let cell_h = height / divisor_y;

    let mut cells = Vec::new();
    for x in 0..divisor_x {
        for y in 0..divisor_y {
            cells.extend(CropRect::new(
                cell_w * x,
                cell_h * y,
                cell_w * (x + 1),
                cell_h * (y + 1),
            ));
        }
    }
    cells
}
