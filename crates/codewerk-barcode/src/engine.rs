// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Detection orchestrator.
//
// One call = one pure pipeline: plan regions → scan → resolve priority →
// synthesize, short-circuiting to "no result" at the first empty or failed
// stage. The engine never raises an error outward — a page without a
// readable symbol and a page where detection failed are indistinguishable
// by contract.

use std::sync::Arc;

use codewerk_core::config::EngineConfig;
use codewerk_core::error::{CodewerkError, Result};
use codewerk_core::types::{CancelFlag, CropRect, DetectRequest, DetectionId, ReaderOptions};
use image::DynamicImage;
use tokio::sync::Semaphore;
use tracing::{debug, info, instrument, warn};

use crate::codec::SymbolCodec;
use crate::{priority, regions, render, scan};

/// Barcode detection-and-resynthesis engine.
///
/// Stateless across calls apart from the codec and configuration it was
/// built with. Concurrent calls are serialized onto a single worker slot to
/// bound peak memory — pixel decode is memory-heavy, and unconstrained
/// parallel decoding risks exhaustion.
pub struct BarcodeEngine<C> {
    codec: Arc<C>,
    options: ReaderOptions,
    defaults: DetectRequest,
    worker: Arc<Semaphore>,
}

impl<C: SymbolCodec + 'static> BarcodeEngine<C> {
    pub fn new(codec: C) -> Self {
        Self::with_config(codec, EngineConfig::default())
    }

    pub fn with_config(codec: C, config: EngineConfig) -> Self {
        Self {
            codec: Arc::new(codec),
            options: config.reader,
            defaults: DetectRequest {
                try_extra_hard: config.try_extra_hard,
                regenerate: config.regenerate,
            },
            worker: Arc::new(Semaphore::new(1)),
        }
    }

    /// Per-call flags from the engine configuration, for callers without a
    /// preference of their own.
    pub fn default_request(&self) -> DetectRequest {
        self.defaults
    }

    /// Detect a barcode on `document` and produce a clean output image.
    ///
    /// Returns `None` when the page has no readable symbol, when the caller
    /// cancels, or when any internal stage fails — the distinction only
    /// shows up in logs. The input bitmap is never mutated; the output is a
    /// fresh allocation owned by the caller.
    pub async fn detect_and_render(
        &self,
        document: Option<Arc<DynamicImage>>,
        request: DetectRequest,
        cancel: CancelFlag,
    ) -> Option<DynamicImage> {
        let document = document?;

        // Single permit: calls queue here rather than decoding in parallel.
        let _permit = match Arc::clone(&self.worker).acquire_owned().await {
            Ok(permit) => permit,
            Err(_) => return None,
        };

        let codec = Arc::clone(&self.codec);
        let options = self.options.clone();
        let id = DetectionId::new();

        let outcome = tokio::task::spawn_blocking(move || {
            run_pipeline(codec.as_ref(), &document, &options, request, &cancel, id)
        })
        .await;

        match outcome {
            Ok(Ok(output)) => Some(output),
            Ok(Err(err)) => {
                debug!(%id, error = %err, "detection resolved to no result");
                None
            }
            Err(err) => {
                warn!(%id, error = %err, "detection worker failed");
                None
            }
        }
    }
}

/// The synchronous pipeline body, run on the blocking worker pool.
#[instrument(
    skip_all,
    fields(
        %id,
        width = document.width(),
        height = document.height(),
        try_extra_hard = request.try_extra_hard,
        regenerate = request.regenerate,
    )
)]
fn run_pipeline<C: SymbolCodec>(
    codec: &C,
    document: &DynamicImage,
    options: &ReaderOptions,
    request: DetectRequest,
    cancel: &CancelFlag,
    id: DetectionId,
) -> Result<DynamicImage> {
    let planned: Vec<CropRect> =
        regions::plan_regions(document.width(), document.height(), request.try_extra_hard);
    debug!(regions = planned.len(), "planned crop regions");

    let hits = scan::scan_regions(codec, document, &planned, options, cancel)?;
    let winner = priority::resolve(hits).ok_or(CodewerkError::NoSymbol)?;
    info!(format = %winner.hit.format, region = %winner.region, "symbol detected");

    // Last poll before synthesis — encoding is the one stage left that can
    // still burn real time.
    if cancel.is_cancelled() {
        return Err(CodewerkError::Cancelled);
    }

    let output = render::synthesize(codec, document, &winner, request.regenerate)?;
    info!(
        out_width = output.width(),
        out_height = output.height(),
        "output synthesized"
    );
    Ok(output)
}
