//! `iCCP`: an embedded ICC color profile, zlib-compressed.

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::{Warning, WarningKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Iccp {
  pub profile_name: String,
  /// The decompressed ICC profile bytes. This crate doesn't interpret ICC
  /// profile contents; it only undoes the zlib framing.
  pub profile: Vec<u8>,
}
impl Iccp {
  pub fn parse(data: &[u8], offset: usize) -> Result<Self, Warning> {
    let null_pos =
      data.iter().position(|&b| b == 0).ok_or(Warning::new(WarningKind::UnexpectedChunkSize, offset))?;
    let (name_bytes, rest) = data.split_at(null_pos);
    if name_bytes.is_empty() || name_bytes.len() > 79 {
      return Err(Warning::new(WarningKind::UnexpectedChunkSize, offset));
    }
    let rest = &rest[1..];
    let [compression_method, compressed @ ..] = rest else {
      return Err(Warning::new(WarningKind::UnexpectedChunkSize, offset));
    };
    if *compression_method != 0 {
      return Err(Warning::new(WarningKind::UnknownCompressionMethod, offset));
    }
    let profile = inflate_zlib(compressed).map_err(|_| Warning::new(WarningKind::AncillaryParseFailed, offset))?;
    let profile_name = name_bytes.iter().map(|&b| b as char).collect();
    Ok(Self { profile_name, profile })
  }
}

#[cfg(feature = "miniz_oxide")]
fn inflate_zlib(compressed: &[u8]) -> Result<Vec<u8>, ()> {
  miniz_oxide::inflate::decompress_to_vec_zlib(compressed).map_err(|_| ())
}

/// Without the `miniz_oxide` feature there's no inflate primitive available,
/// so a compressed `iCCP` profile can never be recovered.
#[cfg(not(feature = "miniz_oxide"))]
fn inflate_zlib(_compressed: &[u8]) -> Result<Vec<u8>, ()> {
  Err(())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn build(name: &str, profile: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(name.as_bytes());
    out.push(0);
    out.push(0);
    out.extend_from_slice(&miniz_oxide::deflate::compress_to_vec_zlib(profile, 6));
    out
  }

  #[test]
  fn round_trips_profile_bytes() {
    let data = build("sRGB-ish", &[1, 2, 3, 4, 5]);
    let iccp = Iccp::parse(&data, 0).unwrap();
    assert_eq!(iccp.profile_name, "sRGB-ish");
    assert_eq!(iccp.profile, alloc::vec![1, 2, 3, 4, 5]);
  }

  #[test]
  fn unknown_compression_method_is_a_warning() {
    let mut data = build("name", &[1]);
    let null_pos = data.iter().position(|&b| b == 0).unwrap();
    data[null_pos + 1] = 9;
    assert!(Iccp::parse(&data, 0).is_err());
  }
}
