//! `tRNS`: simple transparency for color types that don't already carry an
//! alpha channel.

use crate::error::{PngError, PngErrorKind};
use crate::header::PngColorType;

/// A parsed `tRNS` chunk. Which variant is legal depends on `IHDR.colorType`:
/// `Gray` only for `Grayscale`, `Rgb` only for `Rgb`, `Index` only for
/// `Indexed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transparency {
  /// The single grey sample value (before bit-depth expansion) that's fully
  /// transparent.
  Gray(u16),
  /// The single RGB triplet (before bit-depth expansion) that's fully
  /// transparent.
  Rgb { r: u16, g: u16, b: u16 },
  /// Per-palette-entry alpha values, in `PLTE` order. Entries past the end of
  /// this list are implicitly fully opaque.
  Index(alloc::vec::Vec<u8>),
}
impl Transparency {
  pub fn parse(data: &[u8], offset: usize, color_type: PngColorType) -> Result<Self, PngError> {
    match color_type {
      PngColorType::Grayscale => {
        let [a, b] = *data else {
          return Err(PngError::new(PngErrorKind::Truncated, offset));
        };
        Ok(Self::Gray(u16::from_be_bytes([a, b])))
      }
      PngColorType::Rgb => {
        let [r0, r1, g0, g1, b0, b1] = *data else {
          return Err(PngError::new(PngErrorKind::Truncated, offset));
        };
        Ok(Self::Rgb {
          r: u16::from_be_bytes([r0, r1]),
          g: u16::from_be_bytes([g0, g1]),
          b: u16::from_be_bytes([b0, b1]),
        })
      }
      PngColorType::Indexed => {
        if data.len() > 256 {
          return Err(PngError::new(PngErrorKind::Truncated, offset));
        }
        Ok(Self::Index(data.to_vec()))
      }
      PngColorType::GrayscaleAlpha | PngColorType::Rgba => {
        Err(PngError::new(PngErrorKind::TrnsForbiddenForColorType, offset))
      }
    }
  }

  /// The alpha byte (0-255) for a given palette index, used when unpacking an
  /// `Indexed` image. Always `255` for non-`Index` variants and out-of-range
  /// indices.
  #[inline]
  #[must_use]
  pub fn alpha_for_index(&self, index: usize) -> u8 {
    match self {
      Self::Index(entries) => entries.get(index).copied().unwrap_or(255),
      _ => 255,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn gray_needs_exactly_two_bytes() {
    assert!(Transparency::parse(&[0, 5], 0, PngColorType::Grayscale).is_ok());
    assert!(Transparency::parse(&[0], 0, PngColorType::Grayscale).is_err());
  }

  #[test]
  fn index_alpha_defaults_to_opaque_past_the_end() {
    let t = Transparency::Index(alloc::vec![0, 128]);
    assert_eq!(t.alpha_for_index(0), 0);
    assert_eq!(t.alpha_for_index(1), 128);
    assert_eq!(t.alpha_for_index(2), 255);
  }

  #[test]
  fn rejects_on_color_types_with_their_own_alpha() {
    let rgba_err = Transparency::parse(&[], 0, PngColorType::Rgba).unwrap_err();
    assert_eq!(rgba_err.kind, crate::error::PngErrorKind::TrnsForbiddenForColorType);
    let gray_alpha_err = Transparency::parse(&[], 0, PngColorType::GrayscaleAlpha).unwrap_err();
    assert_eq!(gray_alpha_err.kind, crate::error::PngErrorKind::TrnsForbiddenForColorType);
  }
}
