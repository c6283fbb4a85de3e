//! The static table of known ancillary chunk decoders, per §6 / §9.
//!
//! Each decoder is a pure function `(data, offset, header) -> Result<record,
//! Warning>`, invoked by [`crate::decode::decode`] once a chunk has been
//! framed, CRC-checked, and approved by [`crate::decode::ParseChunkTypes`].
//! There are 15 known types; an unrecognized ancillary chunk produces an
//! `info` entry instead of a metadata record, and an unrecognized critical
//! chunk is a fatal error (both handled by the caller, not here).

mod bkgd;
mod chrm;
mod cicp;
mod exif;
mod gama;
mod hist;
mod iccp;
mod itxt;
mod phys;
mod sbit;
mod splt;
mod srgb;
mod text;
mod time;
mod ztxt;

pub use bkgd::Bkgd;
pub use chrm::Chrm;
pub use cicp::Cicp;
pub use exif::Exif;
pub use gama::Gama;
pub use hist::Hist;
pub use iccp::Iccp;
pub use itxt::Itxt;
pub use phys::{Phys, PhysUnit};
pub use sbit::Sbit;
pub use splt::{Splt, SpltEntry};
pub use srgb::{RenderingIntent, Srgb};
pub use text::Text;
pub use time::Time;
pub use ztxt::Ztxt;

use crate::error::Warning;
use crate::header::PngColorType;

/// Every chunk type this crate knows how to decode past plain bytes, each
/// carrying its parsed record.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum AncillaryChunk {
  Background(Bkgd),
  Chromaticities(Chrm),
  CodingIndependentCodePoints(Cicp),
  Exif(Exif),
  Gamma(Gama),
  Histogram(Hist),
  IccProfile(Iccp),
  InternationalText(Itxt),
  PhysicalDimensions(Phys),
  SignificantBits(Sbit),
  SuggestedPalette(Splt),
  Srgb(Srgb),
  Text(Text),
  Time(Time),
  CompressedText(Ztxt),
}

/// The 4-byte type of every chunk this crate has a decoder for, i.e. every
/// type `"*"` in [`ParseChunkTypes`](crate::decode::ParseChunkTypes) enables.
pub const KNOWN_CHUNK_TYPES: [[u8; 4]; 15] = [
  *b"bKGD", *b"cHRM", *b"cICP", *b"eXIf", *b"gAMA", *b"hIST", *b"iCCP", *b"iTXt", *b"pHYs", *b"sBIT", *b"sPLT",
  *b"sRGB", *b"tEXt", *b"tIME", *b"zTXt",
];

/// Dispatches one ancillary chunk body to its decoder, if this crate knows
/// the type. Returns `None` for any chunk type outside [`KNOWN_CHUNK_TYPES`]
/// (the caller turns that into an `info` entry, per §6).
pub fn decode_known_chunk(
  chunk_type: [u8; 4],
  data: &[u8],
  offset: usize,
  color_type: PngColorType,
) -> Option<Result<AncillaryChunk, Warning>> {
  Some(match &chunk_type {
    b"bKGD" => Bkgd::parse(data, offset, color_type).map(AncillaryChunk::Background),
    b"cHRM" => Chrm::parse(data, offset).map(AncillaryChunk::Chromaticities),
    b"cICP" => Cicp::parse(data, offset).map(AncillaryChunk::CodingIndependentCodePoints),
    b"eXIf" => Exif::parse(data, offset).map(AncillaryChunk::Exif),
    b"gAMA" => Gama::parse(data, offset).map(AncillaryChunk::Gamma),
    b"hIST" => Hist::parse(data, offset).map(AncillaryChunk::Histogram),
    b"iCCP" => Iccp::parse(data, offset).map(AncillaryChunk::IccProfile),
    b"iTXt" => Itxt::parse(data, offset).map(AncillaryChunk::InternationalText),
    b"pHYs" => Phys::parse(data, offset).map(AncillaryChunk::PhysicalDimensions),
    b"sBIT" => Sbit::parse(data, offset, color_type).map(AncillaryChunk::SignificantBits),
    b"sPLT" => Splt::parse(data, offset).map(AncillaryChunk::SuggestedPalette),
    b"sRGB" => Srgb::parse(data, offset).map(AncillaryChunk::Srgb),
    b"tEXt" => Text::parse(data, offset).map(AncillaryChunk::Text),
    b"tIME" => Time::parse(data, offset).map(AncillaryChunk::Time),
    b"zTXt" => Ztxt::parse(data, offset).map(AncillaryChunk::CompressedText),
    _ => return None,
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn unknown_type_is_not_dispatched() {
    assert!(decode_known_chunk(*b"fooB", &[], 0, PngColorType::Rgba).is_none());
  }

  #[test]
  fn every_known_type_dispatches_to_something() {
    for &ty in &KNOWN_CHUNK_TYPES {
      assert!(decode_known_chunk(ty, &[], 0, PngColorType::Rgba).is_some());
    }
  }
}
