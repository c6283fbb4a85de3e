//! Error and warning types produced while decoding or encoding a PNG.

use core::fmt::{self, Display};

/// Severity of a problem found while decoding.
///
/// In [`strict_mode`](crate::decode::DecodeOptions::strict_mode) every
/// [`Warning`] is promoted to a [`PngError`] at the moment it would otherwise
/// have been recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
  /// Halts the decode entirely.
  Error,
  /// Recorded and decoding continues.
  Warning,
}

/// The kinds of fatal problem that can stop a decode or encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum PngErrorKind {
  /// Fewer than 8 bytes of input, or the first 8 bytes aren't the PNG
  /// signature.
  NoPngSignature,
  /// A chunk's length, type, data, or CRC field runs past the end of input.
  Truncated,
  /// The very first chunk in the stream wasn't `IHDR`.
  FirstChunkNotIhdr,
  /// No `IDAT` chunk was found anywhere in the stream.
  NoIdatChunks,
  /// Two runs of `IDAT` chunks were separated by some other chunk type.
  NonConsecutiveIdat,
  /// `IHDR` declared a (color type, bit depth) pair that the format doesn't
  /// allow.
  IllegalColorTypeBitDepthCombination,
  /// `IHDR`'s width or height field was zero.
  IllegalDimensions,
  /// `IHDR` data wasn't exactly 13 bytes, or a reserved byte had a bad value.
  MalformedIhdr,
  /// `PLTE` data length wasn't a multiple of 3, was zero, or exceeded 256
  /// entries.
  InvalidPaletteLength,
  /// An unrecognized chunk type whose first letter is uppercase: a critical
  /// chunk this decoder doesn't know how to skip safely.
  UnknownCriticalChunk,
  /// The inflated `IDAT` stream was shorter or longer than `IHDR` implies.
  IdatLengthMismatch,
  /// The opaque zlib inflate primitive reported a failure.
  InflateFailure,
  /// A scanline's filter-type byte wasn't 0 through 4.
  InvalidFilter,
  /// An indexed-color pixel referenced a palette entry past the end of
  /// `PLTE`.
  PaletteIndexOutOfRange,
  /// A `tRNS` chunk was present for a color type that already carries its own
  /// alpha channel (`GrayscaleAlpha` or `Rgba`), where `tRNS` is forbidden.
  TrnsForbiddenForColorType,
  /// `strict_mode` promoted a recoverable [`Warning`] into an error.
  PromotedWarning(WarningKind),
  /// Asked to encode `colorType = 3` from an image with more than 256
  /// distinct colors.
  PaletteOverflow,
  /// The opaque zlib deflate primitive reported a failure.
  DeflateFailure,
}

/// A fatal decode or encode error.
///
/// Carries the byte offset at which the problem was detected (best-effort;
/// errors with no meaningful location, like a missing signature, use `0`)
/// along with whatever warnings had already accumulated before the error was
/// raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PngError {
  pub kind: PngErrorKind,
  pub offset: usize,
  #[cfg(feature = "alloc")]
  pub warnings: alloc::vec::Vec<Warning>,
}
impl PngError {
  #[inline]
  #[must_use]
  pub fn new(kind: PngErrorKind, offset: usize) -> Self {
    Self {
      kind,
      offset,
      #[cfg(feature = "alloc")]
      warnings: alloc::vec::Vec::new(),
    }
  }

  /// Builds an error that carries whatever warnings had already accumulated
  /// before it was raised, per §6's "errors carry the warning list so far".
  #[inline]
  #[must_use]
  #[cfg(feature = "alloc")]
  pub fn with_warnings(kind: PngErrorKind, offset: usize, warnings: alloc::vec::Vec<Warning>) -> Self {
    Self { kind, offset, warnings }
  }

  /// Most fatal errors genuinely prevent any further progress. A few, like an
  /// unrecognized ancillary-adjacent chunk, would be merely informational if
  /// they weren't reached via `strict_mode`.
  #[inline]
  #[must_use]
  pub const fn is_critical(&self) -> bool {
    !matches!(self.kind, PngErrorKind::PromotedWarning(_))
  }
}
impl Display for PngError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:?} at offset {}", self.kind, self.offset)
  }
}
#[cfg(feature = "std")]
impl std::error::Error for PngError {}

/// The kinds of recoverable problem collected in
/// [`DecodeResult::warnings`](crate::decode::DecodeResult::warnings).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum WarningKind {
  /// `CRC32(type||data)` didn't match the chunk's declared CRC.
  CrcMismatch,
  /// A chunk that should appear at most once appeared again.
  DuplicateChunk,
  /// A chunk appeared after a chunk it's required to precede (e.g. `tRNS`
  /// after `IDAT`).
  OutOfOrderChunk,
  /// `IEND` wasn't the last chunk, or a chunk appeared after `IEND`.
  MalformedIend,
  /// A fixed-size ancillary chunk had a data length that didn't match what
  /// its type implies.
  UnexpectedChunkSize,
  /// An ancillary chunk failed its own (non-fatal) parse.
  AncillaryParseFailed,
  /// A chunk claimed an unsupported compression method.
  UnknownCompressionMethod,
}

/// A non-fatal problem found at a particular byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Warning {
  pub kind: WarningKind,
  pub offset: usize,
}
impl Warning {
  #[inline]
  #[must_use]
  pub const fn new(kind: WarningKind, offset: usize) -> Self {
    Self { kind, offset }
  }
}

/// Result alias used throughout the crate.
pub type PngResult<T> = Result<T, PngError>;
