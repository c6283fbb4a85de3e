//! The public encode path: the mirror image of [`crate::decode`], producing
//! a complete PNG byte stream from an RGBA8 buffer, per §5.
//!
//! Scoped to non-interlaced output only (see `DESIGN.md` for why Adam7
//! encode is a non-goal here).

use alloc::vec::Vec;

use crate::crc32::chunk_crc32;
use crate::error::{PngError, PngErrorKind, PngResult};
use crate::filter::filter_pass;
use crate::header::{Ihdr, PngColorType};
use crate::pack::pack_rgba8;
use crate::palette::Plte;
use crate::signature::PNG_SIGNATURE;

/// A caller-supplied chunk to splice verbatim into the output stream, ahead
/// of `IEND`, per §5's "ancillary passthrough" requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAncillaryChunk {
  pub chunk_type: [u8; 4],
  pub data: Vec<u8>,
}

/// Encode-time options, per §5.
#[derive(Debug, Clone)]
pub struct EncodeOptions {
  pub bit_depth: u8,
  pub color_type: PngColorType,
  /// `miniz_oxide` compression level: 0 (stored) through 10 (maximum).
  pub compression_level: u8,
  /// Maximum bytes of compressed data per `IDAT` chunk.
  pub idat_chunk_size: usize,
  /// Ancillary chunks to carry through into the output stream, in order,
  /// after `PLTE`/`tRNS` and before `IEND`.
  pub ancillary_chunks: Vec<RawAncillaryChunk>,
}
impl Default for EncodeOptions {
  fn default() -> Self {
    Self {
      bit_depth: 8,
      color_type: PngColorType::Rgba,
      compression_level: 6,
      idat_chunk_size: 8192,
      ancillary_chunks: Vec::new(),
    }
  }
}

/// Encodes an RGBA8 buffer (`width * height * 4` bytes, row-major, one byte
/// per channel) into a complete PNG byte stream, per §5.
///
/// For [`PngColorType::Indexed`] the palette is synthesized from the
/// distinct colors actually present in `pixels`; encoding fails with
/// [`PngErrorKind::PaletteOverflow`] if there are more than 256.
pub fn encode(pixels: &[u8], width: u32, height: u32, options: &EncodeOptions) -> PngResult<Vec<u8>> {
  if width == 0 || height == 0 {
    return Err(PngError::new(PngErrorKind::IllegalDimensions, 0));
  }
  if pixels.len() != (width as usize) * (height as usize) * 4 {
    return Err(PngError::new(PngErrorKind::Truncated, 0));
  }
  if !options.color_type.is_legal_bit_depth(options.bit_depth) {
    return Err(PngError::new(PngErrorKind::IllegalColorTypeBitDepthCombination, 0));
  }

  let palette = if options.color_type == PngColorType::Indexed {
    Some(Plte::synthesize(pixels).ok_or_else(|| PngError::new(PngErrorKind::PaletteOverflow, 0))?)
  } else {
    None
  };

  let ihdr = Ihdr {
    width,
    height,
    bit_depth: options.bit_depth,
    color_type: options.color_type,
    interlaced: false,
  };

  let packed = pack_rgba8(pixels, width, height, options.color_type, options.bit_depth, palette.as_ref());
  let row_bytes = ihdr.bytes_per_filterline(width) - 1;
  let filtered = filter_pass(&packed, row_bytes, ihdr.filter_unit());
  let compressed = crate::deflate::deflate_image(&filtered, options.compression_level);
  let idat_payloads = crate::deflate::split_into_idat_payloads(&compressed, options.idat_chunk_size)?;

  let mut out = Vec::with_capacity(compressed.len() + 128);
  out.extend_from_slice(&PNG_SIGNATURE);

  write_chunk(&mut out, *b"IHDR", &ihdr_bytes(&ihdr));

  if let Some(plte) = &palette {
    write_chunk(&mut out, *b"PLTE", &plte.to_bytes());
  }

  for ancillary in &options.ancillary_chunks {
    write_chunk(&mut out, ancillary.chunk_type, &ancillary.data);
  }

  for payload in idat_payloads {
    write_chunk(&mut out, *b"IDAT", payload);
  }

  write_chunk(&mut out, *b"IEND", &[]);

  Ok(out)
}

fn ihdr_bytes(ihdr: &Ihdr) -> [u8; 13] {
  let mut data = [0u8; 13];
  data[0..4].copy_from_slice(&ihdr.width.to_be_bytes());
  data[4..8].copy_from_slice(&ihdr.height.to_be_bytes());
  data[8] = ihdr.bit_depth;
  data[9] = ihdr.color_type as u8;
  data[10] = 0; // compression method
  data[11] = 0; // filter method
  data[12] = u8::from(ihdr.interlaced);
  data
}

fn write_chunk(out: &mut Vec<u8>, chunk_type: [u8; 4], data: &[u8]) {
  out.extend_from_slice(&(data.len() as u32).to_be_bytes());
  out.extend_from_slice(&chunk_type);
  out.extend_from_slice(data);
  out.extend_from_slice(&chunk_crc32(chunk_type, data).to_be_bytes());
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn encodes_a_single_pixel_with_valid_signature_and_crcs() {
    let pixels = [10u8, 20, 30, 255];
    let png = encode(&pixels, 1, 1, &EncodeOptions::default()).unwrap();
    assert_eq!(&png[0..8], &PNG_SIGNATURE);
    for chunk in crate::raw_chunk::RawChunkIter::new(&png[8..], 8) {
      assert!(chunk.unwrap().crc_is_valid());
    }
  }

  #[test]
  fn rejects_mismatched_pixel_buffer_length() {
    let pixels = [0u8; 3];
    let err = encode(&pixels, 1, 1, &EncodeOptions::default()).unwrap_err();
    assert_eq!(err.kind, PngErrorKind::Truncated);
  }

  #[test]
  fn rejects_illegal_bit_depth_for_color_type() {
    let pixels = [0u8; 4];
    let options = EncodeOptions { bit_depth: 4, color_type: PngColorType::Rgba, ..Default::default() };
    let err = encode(&pixels, 1, 1, &options).unwrap_err();
    assert_eq!(err.kind, PngErrorKind::IllegalColorTypeBitDepthCombination);
  }

  #[test]
  fn indexed_encode_synthesizes_a_palette() {
    let pixels = [255u8, 0, 0, 255, 0, 255, 0, 255];
    let options = EncodeOptions { bit_depth: 8, color_type: PngColorType::Indexed, ..Default::default() };
    let png = encode(&pixels, 2, 1, &options).unwrap();
    let found_plte = crate::raw_chunk::RawChunkIter::new(&png[8..], 8)
      .map(|c| c.unwrap())
      .any(|c| &c.chunk_type == b"PLTE");
    assert!(found_plte);
  }

  #[test]
  fn indexed_encode_overflows_past_256_colors() {
    let mut pixels = Vec::new();
    for i in 0..257u32 {
      pixels.extend_from_slice(&[(i & 0xFF) as u8, (i >> 8) as u8, 0, 255]);
    }
    let options = EncodeOptions { bit_depth: 8, color_type: PngColorType::Indexed, ..Default::default() };
    let err = encode(&pixels, 257, 1, &options).unwrap_err();
    assert_eq!(err.kind, PngErrorKind::PaletteOverflow);
  }
}
