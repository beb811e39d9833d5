// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Symbology codec boundary.
//
// The decode/encode mathematics for individual symbologies is deliberately
// outside this crate's scope — the engine orchestrates *around* a codec
// implementing this contract. The production binding lives in
// `rxing_codec`; tests script the boundary with a mock.

use codewerk_core::error::Result;
use codewerk_core::types::{CropRect, DecodeHit, ReaderOptions, SymbolFormat};
use image::{DynamicImage, GrayImage, Luma};

/// Payload handed back to the codec when re-encoding a decoded symbol.
#[derive(Debug, Clone, Copy)]
pub enum SymbolPayload<'a> {
    Text(&'a str),
    Bytes(&'a [u8]),
}

/// Decode and encode capability for all supported symbologies.
///
/// Both operations may fail on malformed input or when the backend runs out
/// of resources; callers treat a decode failure as zero hits for the region
/// in question and an encode failure as "no result".
pub trait SymbolCodec: Send + Sync {
    /// Search one crop region of `image` for symbols.
    ///
    /// `rotation` is an extra clockwise rotation in degrees (multiples of
    /// 90) applied to the region before decoding; the scan loop always
    /// passes 0 and leaves orientation search to the codec's own
    /// heuristics. Corner points in the returned hits are local to
    /// `region`.
    fn decode(
        &self,
        image: &DynamicImage,
        region: CropRect,
        rotation: i32,
        options: &ReaderOptions,
    ) -> Result<Vec<DecodeHit>>;

    /// Render `payload` as a fresh symbol of the given format and size.
    ///
    /// `margin` is the quiet zone in modules. The output uses exactly the
    /// two colors given — dark modules `foreground`, everything else
    /// `background`.
    fn encode(
        &self,
        payload: SymbolPayload<'_>,
        format: SymbolFormat,
        width: u32,
        height: u32,
        foreground: Luma<u8>,
        background: Luma<u8>,
        margin: u32,
    ) -> Result<GrayImage>;
}

#[cfg(test)]
pub(crate) mod mock {
    //! Scripted codec for exercising the pipeline without real symbology
    //! math. Records every boundary call so tests can assert on them.

    use super::*;
    use codewerk_core::error::CodewerkError;
    use codewerk_core::types::{ContentType, Point};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    pub struct MockCodec {
        /// Hits to report, keyed by the exact region queried.
        hits: Vec<(CropRect, DecodeHit)>,
        /// Regions on which decode reports a failure.
        failing: Vec<CropRect>,
        fail_encode: bool,
        pub decoded_regions: Mutex<Vec<CropRect>>,
        pub encode_calls: AtomicUsize,
    }

    impl MockCodec {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_hit(mut self, region: CropRect, hit: DecodeHit) -> Self {
            self.hits.push((region, hit));
            self
        }

        pub fn failing_on(mut self, region: CropRect) -> Self {
            self.failing.push(region);
            self
        }

        pub fn failing_encode(mut self) -> Self {
            self.fail_encode = true;
            self
        }

        pub fn decode_count(&self) -> usize {
            self.decoded_regions.lock().unwrap().len()
        }
    }

    impl SymbolCodec for MockCodec {
        fn decode(
            &self,
            _image: &DynamicImage,
            region: CropRect,
            _rotation: i32,
            _options: &ReaderOptions,
        ) -> Result<Vec<DecodeHit>> {
            self.decoded_regions.lock().unwrap().push(region);
            if self.failing.contains(&region) {
                return Err(CodewerkError::Decode("scripted failure".into()));
            }
            Ok(self
                .hits
                .iter()
                .filter(|(r, _)| *r == region)
                .map(|(_, hit)| hit.clone())
                .collect())
        }

        fn encode(
            &self,
            _payload: SymbolPayload<'_>,
            _format: SymbolFormat,
            width: u32,
            height: u32,
            foreground: Luma<u8>,
            background: Luma<u8>,
            _margin: u32,
        ) -> Result<GrayImage> {
            self.encode_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_encode {
                return Err(CodewerkError::Encode("scripted failure".into()));
            }
            // Vertical stripes: binary, uses exactly the two colors given.
            Ok(GrayImage::from_fn(width, height, |x, _| {
                if x % 2 == 0 { foreground } else { background }
            }))
        }
    }

    /// A plain text hit with the given corners, no module matrix.
    pub fn text_hit(format: SymbolFormat, corners: [(i32, i32); 4]) -> DecodeHit {
        DecodeHit {
            format,
            text: "PAYLOAD".into(),
            raw_bytes: b"PAYLOAD".to_vec(),
            content_type: ContentType::Text,
            corners: corners.map(|(x, y)| Point::new(x, y)),
            symbol: None,
        }
    }
}
