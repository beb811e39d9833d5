// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the synchronous pipeline stages of the
// codewerk-barcode crate: region planning, priority resolution, and
// bounding-box geometry. The codec boundary is excluded — its cost is
// owned by the backing symbology library, not by this crate.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use codewerk_barcode::{geometry, priority, regions};
use codewerk_core::types::{ContentType, CropRect, DecodeHit, Point, ScanHit, SymbolFormat};

fn sample_hit(format: SymbolFormat, offset: i32) -> ScanHit {
    ScanHit {
        hit: DecodeHit {
            format,
            text: "BENCH".into(),
            raw_bytes: b"BENCH".to_vec(),
            content_type: ContentType::Text,
            corners: [
                Point::new(offset, offset),
                Point::new(offset + 120, offset),
                Point::new(offset + 120, offset + 90),
                Point::new(offset, offset + 90),
            ],
            symbol: None,
        },
        region: CropRect::full(2480, 3508).unwrap(),
    }
}

/// Benchmark region planning for an A4 page at 300 dpi with the extra-hard
/// grid enabled — the worst-case plan the engine ever builds.
fn bench_plan_regions(c: &mut Criterion) {
    c.bench_function("plan_regions (A4 @300dpi, extra hard)", |b| {
        b.iter(|| black_box(regions::plan_regions(black_box(2480), black_box(3508), true)));
    });
}

/// Benchmark winner selection over one hit per supported format.
fn bench_resolve(c: &mut Criterion) {
    c.bench_function("priority::resolve (13 formats)", |b| {
        b.iter(|| {
            let hits: Vec<ScanHit> = SymbolFormat::ALL
                .iter()
                .enumerate()
                .map(|(i, f)| sample_hit(*f, i as i32 * 100))
                .collect();
            black_box(priority::resolve(hits))
        });
    });
}

/// Benchmark the padded bounding-box computation.
fn bench_geometry(c: &mut Criterion) {
    let hit = sample_hit(SymbolFormat::QrCode, 400);
    c.bench_function("padded_bounding_box", |b| {
        b.iter(|| {
            black_box(geometry::padded_bounding_box(
                black_box(&hit.hit.corners),
                hit.region,
                2480,
                3508,
            ))
        });
    });
}

criterion_group!(benches, bench_plan_regions, bench_resolve, bench_geometry);
criterion_main!(benches);
