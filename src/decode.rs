//! The public decode orchestrator: drives the whole pipeline in §2's data
//! flow order — signature, chunk framing, ordering, `IDAT` inflate, filter
//! reversal, Adam7, pixel unpacking, ancillary dispatch.

use alloc::vec;
use alloc::vec::Vec;

use crate::adam7::pass_dimensions;
use crate::ancillary::{self, AncillaryChunk};
use crate::error::{PngError, PngErrorKind, PngResult, Warning, WarningKind};
use crate::filter::{strip_filter_bytes, unfilter_pass};
use crate::header::{Ihdr, PngColorType};
use crate::image::RgbaImage;
use crate::ordering::OrderingTracker;
use crate::palette::Plte;
use crate::raw_chunk::RawChunkIter;
use crate::signature::strip_signature;
use crate::transparency::Transparency;
use crate::unpack::{unpack_pass, UnfilteredPass};

/// Which ancillary chunk types [`decode`] should attempt to parse into
/// [`AncillaryChunk`] records, per §3's `parseChunkTypes` option.
///
/// A type outside this set is simply skipped: its bytes are still framed and
/// CRC-checked (and still counted for ordering/duplicate purposes), it just
/// never reaches a decoder and never appears in
/// [`DecodeResult::metadata`](DecodeResult::metadata).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseChunkTypes {
  All,
  Only(Vec<[u8; 4]>),
}
impl Default for ParseChunkTypes {
  fn default() -> Self {
    Self::All
  }
}
impl ParseChunkTypes {
  #[must_use]
  fn allows(&self, ty: [u8; 4]) -> bool {
    match self {
      Self::All => true,
      Self::Only(list) => list.contains(&ty),
    }
  }
}

/// Decode-time options, per §3.
#[derive(Debug, Clone, Default)]
pub struct DecodeOptions {
  /// Promotes every [`Warning`] to a fatal [`PngError`] the moment it would
  /// otherwise have been recorded, per §7.
  pub strict_mode: bool,
  /// Always returns [`RgbaImage::Rgba8`], reducing 16-bit source samples by
  /// `x >> 8` rather than returning [`RgbaImage::Rgba16`].
  pub force32: bool,
  /// Which ancillary chunk types get parsed into [`DecodeResult::metadata`].
  pub parse_chunk_types: ParseChunkTypes,
}

/// `(colorType, bitDepth, interlaceMethod)`, echoed back from the parsed
/// `IHDR`, per §6.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDetails {
  pub bit_depth: u8,
  pub color_type: PngColorType,
  pub interlaced: bool,
}

/// One successfully decoded ancillary chunk, alongside its byte offset.
#[derive(Debug, Clone, PartialEq)]
pub struct AncillaryRecord {
  pub chunk_type: [u8; 4],
  pub offset: usize,
  pub chunk: AncillaryChunk,
}

/// A framing-level summary of one chunk, independent of whether this crate
/// knows how to interpret its contents. Exposed so diagnostic tools can walk
/// the whole chunk stream without re-parsing it, per §6's `rawChunks`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkSummary {
  pub offset: usize,
  pub chunk_type: [u8; 4],
  pub data_length: u32,
  pub crc_valid: bool,
}

/// An unrecognized ancillary chunk type, recorded as `info` rather than a
/// warning or error, per §6 / §7.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfoEntry {
  pub offset: usize,
  pub chunk_type: [u8; 4],
}

/// The full result of a successful [`decode`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeResult {
  pub image: RgbaImage,
  pub details: ImageDetails,
  pub palette: Option<Vec<[u8; 3]>>,
  pub metadata: Vec<AncillaryRecord>,
  pub raw_chunks: Vec<ChunkSummary>,
  pub warnings: Vec<Warning>,
  pub info: Vec<InfoEntry>,
}

/// Records `warning` if not in strict mode; in strict mode, immediately
/// returns a fatal [`PngError`] carrying every warning accumulated so far.
macro_rules! record_or_promote {
  ($warnings:expr, $strict:expr, $warning:expr) => {{
    let warning = $warning;
    if $strict {
      return Err(PngError::with_warnings(
        PngErrorKind::PromotedWarning(warning.kind),
        warning.offset,
        $warnings.clone(),
      ));
    }
    $warnings.push(warning);
  }};
}

/// Decodes a complete PNG byte buffer into pixels and metadata, per §2 / §6.
pub fn decode(input: &[u8], options: &DecodeOptions) -> PngResult<DecodeResult> {
  let Some(after_signature) = strip_signature(input) else {
    return Err(PngError::new(PngErrorKind::NoPngSignature, 0));
  };

  let mut warnings: Vec<Warning> = Vec::new();
  let mut info: Vec<InfoEntry> = Vec::new();
  let mut raw_chunks: Vec<ChunkSummary> = Vec::new();
  let mut metadata: Vec<AncillaryRecord> = Vec::new();

  let mut tracker = OrderingTracker::new();
  let mut ihdr: Option<Ihdr> = None;
  let mut plte: Option<Plte> = None;
  let mut trns: Option<Transparency> = None;
  let mut idat_chunks: Vec<&[u8]> = Vec::new();
  let mut first_idat_offset = 0usize;

  for chunk in RawChunkIter::new(after_signature, 8) {
    let chunk = chunk?;
    let crc_valid = chunk.crc_is_valid();

    if !crc_valid {
      record_or_promote!(warnings, options.strict_mode, Warning::new(WarningKind::CrcMismatch, chunk.offset));
    }

    let color_type = ihdr.map(|h| h.color_type);
    match tracker.observe(&chunk, color_type) {
      Ok(Some(warning)) => record_or_promote!(warnings, options.strict_mode, warning),
      Ok(None) => {}
      Err(err) => return Err(PngError::with_warnings(err.kind, err.offset, warnings)),
    }

    raw_chunks.push(ChunkSummary {
      offset: chunk.offset,
      chunk_type: chunk.chunk_type,
      data_length: chunk.data.len() as u32,
      crc_valid,
    });

    match &chunk.chunk_type {
      b"IHDR" => {
        if ihdr.is_none() {
          ihdr = Some(Ihdr::parse(chunk.data, chunk.offset).map_err(|e| {
            PngError::with_warnings(e.kind, e.offset, core::mem::take(&mut warnings))
          })?);
        }
      }
      b"PLTE" => {
        if plte.is_none() {
          match Plte::parse(chunk.data, chunk.offset) {
            Ok(p) => plte = Some(p),
            Err(e) => return Err(PngError::with_warnings(e.kind, e.offset, warnings)),
          }
        }
      }
      b"tRNS" => {
        if trns.is_none() {
          // IHDR is always the first chunk (enforced by `tracker.observe`
          // above), so every later chunk sees `ihdr` already populated.
          let h = ihdr.expect("IHDR always precedes tRNS");
          if !h.color_type.allows_trns() {
            record_or_promote!(
              warnings,
              options.strict_mode,
              Warning::new(WarningKind::OutOfOrderChunk, chunk.offset)
            );
          } else {
            match Transparency::parse(chunk.data, chunk.offset, h.color_type) {
              Ok(t) => trns = Some(t),
              Err(_) => record_or_promote!(
                warnings,
                options.strict_mode,
                Warning::new(WarningKind::UnexpectedChunkSize, chunk.offset)
              ),
            }
          }
        }
      }
      b"IDAT" => {
        if idat_chunks.is_empty() {
          first_idat_offset = chunk.offset;
        }
        idat_chunks.push(chunk.data);
      }
      b"IEND" => {}
      _ => {
        if chunk.is_ancillary() {
          if options.parse_chunk_types.allows(chunk.chunk_type) {
            let h = ihdr.expect("IHDR always precedes ancillary chunks");
            match ancillary::decode_known_chunk(chunk.chunk_type, chunk.data, chunk.offset, h.color_type) {
              Some(Ok(parsed)) => {
                metadata.push(AncillaryRecord { chunk_type: chunk.chunk_type, offset: chunk.offset, chunk: parsed })
              }
              Some(Err(warning)) => record_or_promote!(warnings, options.strict_mode, warning),
              None => info.push(InfoEntry { offset: chunk.offset, chunk_type: chunk.chunk_type }),
            }
          } else {
            info.push(InfoEntry { offset: chunk.offset, chunk_type: chunk.chunk_type });
          }
        } else {
          return Err(PngError::with_warnings(PngErrorKind::UnknownCriticalChunk, chunk.offset, warnings));
        }
      }
    }
  }

  let Some(ihdr) = ihdr else {
    return Err(PngError::with_warnings(PngErrorKind::FirstChunkNotIhdr, 0, warnings));
  };
  if idat_chunks.is_empty() {
    debug_assert!(!tracker.any_idat_seen());
    return Err(PngError::with_warnings(PngErrorKind::NoIdatChunks, 8, warnings));
  }

  let expected_len = ihdr.expected_decompressed_len();
  let mut inflated = vec![0u8; expected_len];
  crate::inflate::inflate_idat(&mut inflated, idat_chunks.into_iter(), first_idat_offset)
    .map_err(|e| PngError::with_warnings(e.kind, e.offset, warnings.clone()))?;

  let image = if options.force32 {
    RgbaImage::new_rgba8(ihdr.width, ihdr.height)
  } else if ihdr.bit_depth == 16 {
    RgbaImage::new_rgba16(ihdr.width, ihdr.height)
  } else {
    RgbaImage::new_rgba8(ihdr.width, ihdr.height)
  };
  let mut image = image;

  let filter_unit = ihdr.filter_unit();
  if ihdr.interlaced {
    let dims = pass_dimensions(ihdr.width, ihdr.height);
    let mut byte_offset = 0usize;
    for (pass, &(pw, ph)) in dims.iter().enumerate() {
      if pw == 0 || ph == 0 {
        continue;
      }
      let row_bytes = ihdr.bytes_per_filterline(pw) - 1;
      let stride = 1 + row_bytes;
      let pass_len = stride * ph as usize;
      let pass_bytes = &mut inflated[byte_offset..byte_offset + pass_len];
      unfilter_pass(pass_bytes, row_bytes, filter_unit, first_idat_offset)
        .map_err(|e| PngError::with_warnings(e.kind, e.offset, warnings.clone()))?;
      let samples = strip_filter_bytes(pass_bytes, row_bytes);
      let unfiltered = UnfilteredPass { pass, reduced_width: pw, reduced_height: ph, samples: &samples };
      unpack_pass(&ihdr, &unfiltered, plte.as_ref(), trns.as_ref(), first_idat_offset, &mut image)
        .map_err(|e| PngError::with_warnings(e.kind, e.offset, warnings.clone()))?;
      byte_offset += pass_len;
    }
  } else {
    let row_bytes = ihdr.bytes_per_filterline(ihdr.width) - 1;
    unfilter_pass(&mut inflated, row_bytes, filter_unit, first_idat_offset)
      .map_err(|e| PngError::with_warnings(e.kind, e.offset, warnings.clone()))?;
    let samples = strip_filter_bytes(&inflated, row_bytes);
    let unfiltered = UnfilteredPass { pass: 0, reduced_width: ihdr.width, reduced_height: ihdr.height, samples: &samples };
    unpack_pass(&ihdr, &unfiltered, plte.as_ref(), trns.as_ref(), first_idat_offset, &mut image)
      .map_err(|e| PngError::with_warnings(e.kind, e.offset, warnings.clone()))?;
  }

  Ok(DecodeResult {
    image,
    details: ImageDetails { bit_depth: ihdr.bit_depth, color_type: ihdr.color_type, interlaced: ihdr.interlaced },
    palette: plte.map(|p| p.entries),
    metadata,
    raw_chunks,
    warnings,
    info,
  })
}
