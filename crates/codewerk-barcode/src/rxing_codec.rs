// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Production symbology codec backed by `rxing`, the pure-Rust ZXing port.

use std::collections::HashSet;

use codewerk_core::error::{CodewerkError, Result};
use codewerk_core::types::{ContentType, CropRect, DecodeHit, Point, ReaderOptions, SymbolFormat};
use image::{DynamicImage, GrayImage, Luma};
use rxing::common::HybridBinarizer;
use rxing::multi::{GenericMultipleBarcodeReader, MultipleBarcodeReader};
use rxing::{
    BarcodeFormat, BinaryBitmap, DecodeHintValue, DecodeHints, EncodeHintValue, EncodeHints,
    Exceptions, Luma8LuminanceSource, MultiFormatReader, MultiFormatWriter, Writer,
};
use tracing::debug;

use crate::codec::{SymbolCodec, SymbolPayload};

/// Codec binding onto `rxing`.
///
/// `rxing` exposes no module matrix on the read path, so decode hits carry
/// `symbol: None` and regeneration goes through [`SymbolCodec::encode`].
/// The `try_rotate`/`try_downscale` heuristics have no dedicated knob
/// either — orientation and scale search ride on the backend's try-harder
/// path.
#[derive(Debug, Clone, Copy, Default)]
pub struct RxingCodec;

impl RxingCodec {
    pub fn new() -> Self {
        Self
    }
}

impl SymbolCodec for RxingCodec {
    fn decode(
        &self,
        image: &DynamicImage,
        region: CropRect,
        rotation: i32,
        options: &ReaderOptions,
    ) -> Result<Vec<DecodeHit>> {
        let view = image.crop_imm(region.left, region.top, region.width(), region.height());
        let view = match rotation.rem_euclid(360) {
            0 => view,
            90 => view.rotate90(),
            180 => view.rotate180(),
            270 => view.rotate270(),
            other => {
                return Err(CodewerkError::Decode(format!(
                    "unsupported rotation {other}"
                )));
            }
        };

        let gray = view.to_luma8();
        let (width, height) = gray.dimensions();
        let source = Luma8LuminanceSource::new(gray.into_raw(), width, height);
        let mut bitmap = BinaryBitmap::new(HybridBinarizer::new(source));

        let formats: HashSet<BarcodeFormat> =
            options.formats.iter().map(|f| to_rxing(*f)).collect();
        let try_harder = options.try_harder || options.try_rotate || options.try_downscale;
        let hints = DecodeHints::default()
            .with(DecodeHintValue::TryHarder(try_harder))
            .with(DecodeHintValue::AlsoInverted(options.try_invert))
            .with(DecodeHintValue::PossibleFormats(formats));

        let mut reader = GenericMultipleBarcodeReader::new(MultiFormatReader::default());
        let results = match reader.decode_multiple_with_hints(&mut bitmap, &hints) {
            Ok(results) => results,
            // Nothing in this region — the normal outcome, not a failure.
            Err(Exceptions::NotFoundException(_)) => return Ok(Vec::new()),
            Err(err) => return Err(CodewerkError::Decode(err.to_string())),
        };
        debug!(%region, count = results.len(), "rxing reported symbols");

        let mut hits = Vec::new();
        for result in results
            .into_iter()
            .take(options.max_symbols_per_region.max(1) as usize)
        {
            let Some(format) = from_rxing(result.getBarcodeFormat()) else {
                continue;
            };
            if !options.formats.contains(&format) {
                continue;
            }
            let text = result.getText().to_string();
            let content_type = if text.is_empty() {
                ContentType::Binary
            } else {
                ContentType::Text
            };
            hits.push(DecodeHit {
                format,
                raw_bytes: result.getRawBytes().to_vec(),
                content_type,
                corners: corners_from_points(result.getPoints()),
                symbol: None,
                text,
            });
        }
        Ok(hits)
    }

    fn encode(
        &self,
        payload: SymbolPayload<'_>,
        format: SymbolFormat,
        width: u32,
        height: u32,
        foreground: Luma<u8>,
        background: Luma<u8>,
        margin: u32,
    ) -> Result<GrayImage> {
        let contents: String = match payload {
            SymbolPayload::Text(text) => text.to_owned(),
            // Latin-1 maps every byte to the code point of the same value,
            // which the charset hint below undoes on the wire.
            SymbolPayload::Bytes(bytes) => bytes.iter().map(|&b| b as char).collect(),
        };

        let mut hints = EncodeHints::default().with(EncodeHintValue::Margin(margin.to_string()));
        if matches!(payload, SymbolPayload::Bytes(_)) {
            hints = hints.with(EncodeHintValue::CharacterSet("ISO-8859-1".into()));
        }

        let matrix = MultiFormatWriter::default()
            .encode_with_hints(
                &contents,
                &to_rxing(format),
                width as i32,
                height as i32,
                &hints,
            )
            .map_err(|err| CodewerkError::Encode(err.to_string()))?;

        Ok(GrayImage::from_fn(matrix.width(), matrix.height(), |x, y| {
            if matrix.get(x, y) { foreground } else { background }
        }))
    }
}

fn to_rxing(format: SymbolFormat) -> BarcodeFormat {
    match format {
        SymbolFormat::Aztec => BarcodeFormat::AZTEC,
        SymbolFormat::DataMatrix => BarcodeFormat::DATA_MATRIX,
        SymbolFormat::Pdf417 => BarcodeFormat::PDF_417,
        SymbolFormat::QrCode => BarcodeFormat::QR_CODE,
        SymbolFormat::UpcA => BarcodeFormat::UPC_A,
        SymbolFormat::UpcE => BarcodeFormat::UPC_E,
        SymbolFormat::Ean8 => BarcodeFormat::EAN_8,
        SymbolFormat::Ean13 => BarcodeFormat::EAN_13,
        SymbolFormat::Code39 => BarcodeFormat::CODE_39,
        SymbolFormat::Code93 => BarcodeFormat::CODE_93,
        SymbolFormat::Code128 => BarcodeFormat::CODE_128,
        SymbolFormat::Codabar => BarcodeFormat::CODABAR,
        SymbolFormat::Itf => BarcodeFormat::ITF,
    }
}

fn from_rxing(format: &BarcodeFormat) -> Option<SymbolFormat> {
    match format {
        BarcodeFormat::AZTEC => Some(SymbolFormat::Aztec),
        BarcodeFormat::DATA_MATRIX => Some(SymbolFormat::DataMatrix),
        BarcodeFormat::PDF_417 => Some(SymbolFormat::Pdf417),
        BarcodeFormat::QR_CODE => Some(SymbolFormat::QrCode),
        BarcodeFormat::UPC_A => Some(SymbolFormat::UpcA),
        BarcodeFormat::UPC_E => Some(SymbolFormat::UpcE),
        BarcodeFormat::EAN_8 => Some(SymbolFormat::Ean8),
        BarcodeFormat::EAN_13 => Some(SymbolFormat::Ean13),
        BarcodeFormat::CODE_39 => Some(SymbolFormat::Code39),
        BarcodeFormat::CODE_93 => Some(SymbolFormat::Code93),
        BarcodeFormat::CODE_128 => Some(SymbolFormat::Code128),
        BarcodeFormat::CODABAR => Some(SymbolFormat::Codabar),
        BarcodeFormat::ITF => Some(SymbolFormat::Itf),
        _ => None,
    }
}

/// Axis-aligned corner quad over whatever points the backend reported.
///
/// 1D readers report the two endpoints of a scan line; a collapsed axis is
/// widened by one pixel each way so the quad keeps a nonzero area.
fn corners_from_points(points: &[rxing::Point]) -> [Point; 4] {
    if points.is_empty() {
        return [Point::new(0, 0); 4];
    }

    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;
    for point in points {
        min_x = min_x.min(point.x);
        min_y = min_y.min(point.y);
        max_x = max_x.max(point.x);
        max_y = max_y.max(point.y);
    }

    let mut min_x = min_x.floor() as i32;
    let mut min_y = min_y.floor() as i32;
    let mut max_x = max_x.ceil() as i32;
    let mut max_y = max_y.ceil() as i32;

    if max_x <= min_x {
        min_x -= 1;
        max_x += 1;
    }
    if max_y <= min_y {
        min_y -= 1;
        max_y += 1;
    }

    [
        Point::new(min_x, min_y),
        Point::new(max_x, min_y),
        Point::new(max_x, max_y),
        Point::new(min_x, max_y),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_region_decodes_to_nothing() {
        let page = DynamicImage::new_luma8(200, 200);
        let hits = RxingCodec::new()
            .decode(
                &page,
                CropRect::full(200, 200).unwrap(),
                0,
                &ReaderOptions::default(),
            )
            .unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn encoded_qr_is_binary_and_sized() {
        let out = RxingCodec::new()
            .encode(
                SymbolPayload::Text("HELLO CODEWERK"),
                SymbolFormat::QrCode,
                400,
                400,
                Luma([0x00]),
                Luma([0xff]),
                0,
            )
            .unwrap();

        assert_eq!((out.width(), out.height()), (400, 400));
        let mut values: Vec<u8> = out.pixels().map(|p| p.0[0]).collect();
        values.sort_unstable();
        values.dedup();
        assert_eq!(values, vec![0x00, 0xff]);
    }

    #[test]
    fn encoded_qr_decodes_back() {
        let codec = RxingCodec::new();
        let encoded = codec
            .encode(
                SymbolPayload::Text("ROUNDTRIP"),
                SymbolFormat::QrCode,
                400,
                400,
                Luma([0x00]),
                Luma([0xff]),
                4,
            )
            .unwrap();

        let page = DynamicImage::ImageLuma8(encoded);
        let hits = codec
            .decode(
                &page,
                CropRect::full(page.width(), page.height()).unwrap(),
                0,
                &ReaderOptions::default(),
            )
            .unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].format, SymbolFormat::QrCode);
        assert_eq!(hits[0].text, "ROUNDTRIP");
    }

    #[test]
    fn scan_line_points_widen_to_a_quad() {
        let points = [rxing::Point { x: 10.0, y: 50.0 }, rxing::Point { x: 90.0, y: 50.0 }];
        let corners = corners_from_points(&points);
        assert_eq!(corners[0], Point::new(10, 49));
        assert_eq!(corners[2], Point::new(90, 51));
    }
}
