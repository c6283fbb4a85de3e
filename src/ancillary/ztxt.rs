//! `zTXt`: zlib-compressed Latin-1 keyword/text pairs.

use alloc::string::String;

use crate::error::{Warning, WarningKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ztxt {
  pub keyword: String,
  pub text: String,
}
impl Ztxt {
  pub fn parse(data: &[u8], offset: usize) -> Result<Self, Warning> {
    let null_pos =
      data.iter().position(|&b| b == 0).ok_or(Warning::new(WarningKind::UnexpectedChunkSize, offset))?;
    let (keyword_bytes, rest) = data.split_at(null_pos);
    if keyword_bytes.is_empty() || keyword_bytes.len() > 79 {
      return Err(Warning::new(WarningKind::UnexpectedChunkSize, offset));
    }
    let rest = &rest[1..];
    let [compression_method, compressed @ ..] = rest else {
      return Err(Warning::new(WarningKind::UnexpectedChunkSize, offset));
    };
    if *compression_method != 0 {
      return Err(Warning::new(WarningKind::UnknownCompressionMethod, offset));
    }
    let text_bytes = inflate_zlib(compressed).map_err(|_| Warning::new(WarningKind::AncillaryParseFailed, offset))?;
    let keyword = keyword_bytes.iter().map(|&b| b as char).collect();
    let text = text_bytes.iter().map(|&b| b as char).collect();
    Ok(Self { keyword, text })
  }
}

#[cfg(feature = "miniz_oxide")]
fn inflate_zlib(compressed: &[u8]) -> Result<alloc::vec::Vec<u8>, ()> {
  miniz_oxide::inflate::decompress_to_vec_zlib(compressed).map_err(|_| ())
}

/// Without the `miniz_oxide` feature there's no inflate primitive available,
/// so a compressed `zTXt` body can never be recovered.
#[cfg(not(feature = "miniz_oxide"))]
fn inflate_zlib(_compressed: &[u8]) -> Result<alloc::vec::Vec<u8>, ()> {
  Err(())
}
