//! Zlib inflate, wrapping `miniz_oxide` as an opaque primitive per §4.3: this
//! module never interprets Huffman trees or LZ77 tokens itself, it only
//! drives the decompressor and checks the resulting length.

use miniz_oxide::inflate::core::{
  decompress,
  inflate_flags::{
    TINFL_FLAG_HAS_MORE_INPUT, TINFL_FLAG_IGNORE_ADLER32, TINFL_FLAG_PARSE_ZLIB_HEADER,
    TINFL_FLAG_USING_NON_WRAPPING_OUTPUT_BUF,
  },
  DecompressorOxide,
};
use miniz_oxide::inflate::TINFLStatus;

use crate::error::{PngError, PngErrorKind};

/// Inflates the concatenation of every `IDAT` chunk's data into `out`, which
/// must be exactly [`Ihdr::expected_decompressed_len`](crate::header::Ihdr::expected_decompressed_len)
/// bytes long.
///
/// Returns [`PngErrorKind::IdatLengthMismatch`] if the stream produces more or
/// fewer bytes than `out` holds, and [`PngErrorKind::InflateFailure`] if
/// `miniz_oxide` itself reports a failure.
pub fn inflate_idat<'inp>(
  out: &mut [u8],
  chunks: impl Iterator<Item = &'inp [u8]>,
  offset: usize,
) -> Result<(), PngError> {
  let mut chunks = chunks.peekable();
  let decompressor = &mut DecompressorOxide::new();
  let mut out_pos = 0;
  let mut zlib_header = true;

  while let Some(in_buf) = chunks.next() {
    let has_more_input = chunks.peek().is_some();
    let flags = if zlib_header { TINFL_FLAG_PARSE_ZLIB_HEADER } else { 0 }
      | TINFL_FLAG_USING_NON_WRAPPING_OUTPUT_BUF
      | TINFL_FLAG_IGNORE_ADLER32
      | if has_more_input { TINFL_FLAG_HAS_MORE_INPUT } else { 0 };
    let (status, _input_read, bytes_written) = decompress(decompressor, in_buf, out, out_pos, flags);
    zlib_header = false;
    out_pos += bytes_written;

    match status {
      TINFLStatus::Done => {
        return if out_pos == out.len() {
          Ok(())
        } else {
          Err(PngError::new(PngErrorKind::IdatLengthMismatch, offset))
        };
      }
      TINFLStatus::NeedsMoreInput | TINFLStatus::FailedCannotMakeProgress => {
        if has_more_input {
          continue;
        }
        return Err(PngError::new(PngErrorKind::IdatLengthMismatch, offset));
      }
      TINFLStatus::HasMoreOutput => {
        return Err(PngError::new(PngErrorKind::IdatLengthMismatch, offset));
      }
      TINFLStatus::BadParam | TINFLStatus::Failed | TINFLStatus::Adler32Mismatch => {
        return Err(PngError::new(PngErrorKind::InflateFailure, offset));
      }
    }
  }

  if out_pos == out.len() {
    Ok(())
  } else {
    Err(PngError::new(PngErrorKind::IdatLengthMismatch, offset))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use alloc::vec;

  fn zlib_compress(data: &[u8]) -> alloc::vec::Vec<u8> {
    miniz_oxide::deflate::compress_to_vec_zlib(data, 6)
  }

  #[test]
  fn round_trips_a_single_chunk() {
    let original: alloc::vec::Vec<u8> = (0..=255u8).cycle().take(2000).collect();
    let compressed = zlib_compress(&original);
    let mut out = vec![0u8; original.len()];
    inflate_idat(&mut out, core::iter::once(compressed.as_slice()), 0).unwrap();
    assert_eq!(out, original);
  }

  #[test]
  fn round_trips_across_several_chunks() {
    let original: alloc::vec::Vec<u8> = (0..=255u8).cycle().take(5000).collect();
    let compressed = zlib_compress(&original);
    let pieces: alloc::vec::Vec<&[u8]> = compressed.chunks(37).collect();
    let mut out = vec![0u8; original.len()];
    inflate_idat(&mut out, pieces.into_iter(), 0).unwrap();
    assert_eq!(out, original);
  }

  #[test]
  fn rejects_length_mismatch() {
    let original = vec![1u8, 2, 3, 4, 5];
    let compressed = zlib_compress(&original);
    let mut out = vec![0u8; original.len() - 1];
    let err = inflate_idat(&mut out, core::iter::once(compressed.as_slice()), 0).unwrap_err();
    assert_eq!(err.kind, PngErrorKind::IdatLengthMismatch);
  }
}
