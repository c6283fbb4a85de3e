//! Zlib deflate for the encode path, wrapping `miniz_oxide` as an opaque
//! primitive, mirroring [`crate::inflate`].

use alloc::vec::Vec;

use crate::error::{PngError, PngErrorKind};

/// Compresses `data` into a complete zlib stream (2-byte header, deflate
/// body, 4-byte Adler-32 trailer) ready to be split across `IDAT` chunks.
///
/// `level` is passed straight through to `miniz_oxide`: 0 is stored
/// (uncompressed), 6 is its default trade-off, 10 is maximum compression.
#[must_use]
pub fn deflate_image(data: &[u8], level: u8) -> Vec<u8> {
  miniz_oxide::deflate::compress_to_vec_zlib(data, level)
}

/// Splits a compressed stream into `IDAT` payloads no larger than
/// `chunk_size` bytes each, per §4.8 (encoders are free to choose any chunk
/// boundary; `chunk_size` lets a caller bound memory use for very large
/// images).
pub fn split_into_idat_payloads(compressed: &[u8], chunk_size: usize) -> Result<Vec<&[u8]>, PngError> {
  if chunk_size == 0 {
    return Err(PngError::new(PngErrorKind::DeflateFailure, 0));
  }
  if compressed.is_empty() {
    return Ok(alloc::vec![compressed]);
  }
  Ok(compressed.chunks(chunk_size).collect())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn compresses_and_round_trips_via_inflate() {
    let original: Vec<u8> = (0..=255u8).cycle().take(3000).collect();
    let compressed = deflate_image(&original, 6);
    let mut out = alloc::vec![0u8; original.len()];
    crate::inflate::inflate_idat(&mut out, core::iter::once(compressed.as_slice()), 0).unwrap();
    assert_eq!(out, original);
  }

  #[test]
  fn splits_into_bounded_payloads() {
    let compressed = alloc::vec![0u8; 100];
    let payloads = split_into_idat_payloads(&compressed, 30).unwrap();
    assert_eq!(payloads.len(), 4);
    assert!(payloads.iter().all(|p| p.len() <= 30));
  }

  #[test]
  fn zero_chunk_size_is_rejected() {
    assert!(split_into_idat_payloads(&[1, 2, 3], 0).is_err());
  }
}
