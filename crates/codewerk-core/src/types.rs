// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Codewerk barcode engine.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

/// Unique identifier for one detection call, used to correlate log lines.
///
/// Generated per invocation and never persisted — the engine is stateless
/// across calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DetectionId(pub Uuid);

impl DetectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DetectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DetectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Supported barcode symbologies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolFormat {
    Aztec,
    DataMatrix,
    Pdf417,
    QrCode,
    UpcA,
    UpcE,
    Ean8,
    Ean13,
    Code39,
    Code93,
    Code128,
    Codabar,
    Itf,
}

impl SymbolFormat {
    /// Every symbology the engine understands.
    pub const ALL: [SymbolFormat; 13] = [
        SymbolFormat::Aztec,
        SymbolFormat::DataMatrix,
        SymbolFormat::Pdf417,
        SymbolFormat::QrCode,
        SymbolFormat::UpcA,
        SymbolFormat::UpcE,
        SymbolFormat::Ean8,
        SymbolFormat::Ean13,
        SymbolFormat::Code39,
        SymbolFormat::Code93,
        SymbolFormat::Code128,
        SymbolFormat::Codabar,
        SymbolFormat::Itf,
    ];
}

impl std::fmt::Display for SymbolFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Aztec => "AZTEC",
            Self::DataMatrix => "DATA_MATRIX",
            Self::Pdf417 => "PDF_417",
            Self::QrCode => "QR_CODE",
            Self::UpcA => "UPC_A",
            Self::UpcE => "UPC_E",
            Self::Ean8 => "EAN_8",
            Self::Ean13 => "EAN_13",
            Self::Code39 => "CODE_39",
            Self::Code93 => "CODE_93",
            Self::Code128 => "CODE_128",
            Self::Codabar => "CODABAR",
            Self::Itf => "ITF",
        };
        write!(f, "{name}")
    }
}

/// Whether a decoded payload is human-readable text or opaque bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentType {
    Text,
    Binary,
}

/// A corner coordinate reported by the codec, local to the crop region it
/// was decoded from. Signed: codecs may report points slightly outside the
/// region and the geometry math must survive that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned sub-region of a bitmap used as decode input.
///
/// Invariant: `left < right` and `top < bottom`; producers are responsible
/// for keeping the rectangle inside the bitmap they slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CropRect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl CropRect {
    /// Build a rectangle, rejecting degenerate (zero-area) bounds.
    pub fn new(left: u32, top: u32, right: u32, bottom: u32) -> Option<Self> {
        if left < right && top < bottom {
            Some(Self {
                left,
                top,
                right,
                bottom,
            })
        } else {
            None
        }
    }

    /// The full-bitmap rectangle, or `None` for an empty bitmap.
    pub fn full(width: u32, height: u32) -> Option<Self> {
        Self::new(0, 0, width, height)
    }

    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }
}

impl std::fmt::Display for CropRect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({},{})-({},{})",
            self.left, self.top, self.right, self.bottom
        )
    }
}

/// 2D module grid of a structured symbol before pixel rendering.
///
/// `modules` is row-major, `true` = dark module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolMatrix {
    pub width: u32,
    pub height: u32,
    pub modules: Vec<bool>,
}

impl SymbolMatrix {
    pub fn new(width: u32, height: u32, modules: Vec<bool>) -> Self {
        debug_assert_eq!(modules.len(), (width * height) as usize);
        Self {
            width,
            height,
            modules,
        }
    }

    pub fn get(&self, x: u32, y: u32) -> bool {
        self.modules
            .get((y * self.width + x) as usize)
            .copied()
            .unwrap_or(false)
    }

    /// A matrix with no data or a zero dimension cannot be rendered.
    pub fn is_degenerate(&self) -> bool {
        self.modules.is_empty() || self.width == 0 || self.height == 0
    }
}

/// One decoded symbol as reported by the codec. Immutable; produced only at
/// the codec boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeHit {
    pub format: SymbolFormat,
    /// Decoded payload as text (may be empty for opaque payloads).
    pub text: String,
    /// Raw payload bytes.
    pub raw_bytes: Vec<u8>,
    pub content_type: ContentType,
    /// Symbol corners in crop-local coordinates.
    pub corners: [Point; 4],
    /// Module grid, when the codec exposes one (typically 2D symbologies).
    pub symbol: Option<SymbolMatrix>,
}

/// A decode hit together with the crop region it came from — needed to
/// translate the hit's local corners into full-image coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanHit {
    pub hit: DecodeHit,
    pub region: CropRect,
}

/// Decode-side tuning passed to the codec for every region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReaderOptions {
    /// Symbologies the codec should look for.
    pub formats: Vec<SymbolFormat>,
    /// Spend extra CPU time for recall on degraded input.
    pub try_harder: bool,
    /// Also search rotated orientations.
    pub try_rotate: bool,
    /// Also search inverted-contrast (light-on-dark) symbols.
    pub try_invert: bool,
    /// Also search downscaled renditions of large inputs.
    pub try_downscale: bool,
    /// Upper bound on symbols reported per region, at least 1.
    pub max_symbols_per_region: u32,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            formats: SymbolFormat::ALL.to_vec(),
            try_harder: true,
            try_rotate: true,
            try_invert: true,
            try_downscale: true,
            max_symbols_per_region: 2,
        }
    }
}

/// Caller flags for one detection call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectRequest {
    /// Probe grid sub-regions in addition to the full page.
    pub try_extra_hard: bool,
    /// Synthesize a canonical symbol image instead of cropping the source.
    pub regenerate: bool,
}

/// Cooperative cancellation handle shared between caller and worker.
///
/// Cloning is cheap; all clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    flag: Arc<AtomicBool>,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Irrevocable for the current call.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
