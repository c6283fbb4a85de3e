//! `bKGD`: the image's suggested background color. Shape depends on the
//! color type it was written against.

use crate::error::{Warning, WarningKind};
use crate::header::PngColorType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bkgd {
  /// `colorType` 0 or 4: a single grey sample, at `IHDR.bitDepth`.
  Gray(u16),
  /// `colorType` 2 or 6: an RGB triplet, at `IHDR.bitDepth`.
  Rgb { r: u16, g: u16, b: u16 },
  /// `colorType` 3: an index into `PLTE`.
  PaletteIndex(u8),
}
impl Bkgd {
  pub fn parse(data: &[u8], offset: usize, color_type: PngColorType) -> Result<Self, Warning> {
    match color_type {
      PngColorType::Grayscale | PngColorType::GrayscaleAlpha => {
        let [a, b] = *data else {
          return Err(Warning::new(WarningKind::UnexpectedChunkSize, offset));
        };
        Ok(Self::Gray(u16::from_be_bytes([a, b])))
      }
      PngColorType::Rgb | PngColorType::Rgba => {
        let [r0, r1, g0, g1, b0, b1] = *data else {
          return Err(Warning::new(WarningKind::UnexpectedChunkSize, offset));
        };
        Ok(Self::Rgb {
          r: u16::from_be_bytes([r0, r1]),
          g: u16::from_be_bytes([g0, g1]),
          b: u16::from_be_bytes([b0, b1]),
        })
      }
      PngColorType::Indexed => {
        let [index] = *data else {
          return Err(Warning::new(WarningKind::UnexpectedChunkSize, offset));
        };
        Ok(Self::PaletteIndex(index))
      }
    }
  }
}
