//! `IHDR`: the image header, and the (color type, bit depth) legality table.

use crate::error::{PngError, PngErrorKind};

/// The five color types PNG supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum PngColorType {
  /// Greyscale.
  Grayscale = 0,
  /// Red, Green, Blue.
  Rgb = 2,
  /// Index into a [`Plte`](crate::palette::Plte) of `Rgb8` entries.
  Indexed = 3,
  /// Greyscale + Alpha.
  GrayscaleAlpha = 4,
  /// Red, Green, Blue, Alpha.
  Rgba = 6,
}
impl PngColorType {
  /// The number of samples per pixel, before any bit-depth expansion.
  #[inline]
  #[must_use]
  pub const fn channel_count(self) -> usize {
    match self {
      Self::Grayscale => 1,
      Self::Rgb => 3,
      Self::Indexed => 1,
      Self::GrayscaleAlpha => 2,
      Self::Rgba => 4,
    }
  }

  /// Whether this color type allows a `PLTE` chunk at all (required for
  /// `Indexed`, optional-and-advisory for `Rgb`/`Rgba`, forbidden otherwise).
  #[inline]
  #[must_use]
  pub const fn allows_palette(self) -> bool {
    matches!(self, Self::Rgb | Self::Indexed | Self::Rgba)
  }

  /// Whether this color type may carry a `tRNS` chunk. Forbidden for the two
  /// color types that already carry their own alpha channel.
  #[inline]
  #[must_use]
  pub const fn allows_trns(self) -> bool {
    !matches!(self, Self::GrayscaleAlpha | Self::Rgba)
  }

  const fn legal_bit_depths(self) -> &'static [u8] {
    match self {
      Self::Grayscale => &[1, 2, 4, 8, 16],
      Self::Rgb => &[8, 16],
      Self::Indexed => &[1, 2, 4, 8],
      Self::GrayscaleAlpha => &[8, 16],
      Self::Rgba => &[8, 16],
    }
  }

  /// Whether `depth` is a legal bit depth for this color type, per the
  /// table in §3. Used by the encode path to validate caller-requested
  /// `(colorType, bitDepth)` pairs the same way `IHDR::parse` validates them
  /// on decode.
  #[must_use]
  pub fn is_legal_bit_depth(self, depth: u8) -> bool {
    self.legal_bit_depths().contains(&depth)
  }
}
impl TryFrom<u8> for PngColorType {
  type Error = ();
  #[inline]
  fn try_from(value: u8) -> Result<Self, Self::Error> {
    Ok(match value {
      0 => Self::Grayscale,
      2 => Self::Rgb,
      3 => Self::Indexed,
      4 => Self::GrayscaleAlpha,
      6 => Self::Rgba,
      _ => return Err(()),
    })
  }
}

/// `IHDR`: image header.
///
/// This is always the first chunk in a conforming PNG, and gives everything
/// needed to know how much memory the rest of decoding will require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ihdr {
  pub width: u32,
  pub height: u32,
  pub bit_depth: u8,
  pub color_type: PngColorType,
  pub interlaced: bool,
}
impl Ihdr {
  /// Parses the 13-byte `IHDR` chunk body. `offset` is used only to stamp
  /// any error that's returned.
  pub fn parse(data: &[u8], offset: usize) -> Result<Self, PngError> {
    let [w0, w1, w2, w3, h0, h1, h2, h3, bit_depth, color_type, compression_method, filter_method, interlace_method] =
      *data
    else {
      return Err(PngError::new(PngErrorKind::MalformedIhdr, offset));
    };
    if compression_method != 0 || filter_method != 0 {
      return Err(PngError::new(PngErrorKind::MalformedIhdr, offset));
    }
    let width = u32::from_be_bytes([w0, w1, w2, w3]);
    let height = u32::from_be_bytes([h0, h1, h2, h3]);
    if width == 0 || height == 0 {
      return Err(PngError::new(PngErrorKind::IllegalDimensions, offset));
    }
    let color_type = PngColorType::try_from(color_type)
      .map_err(|_| PngError::new(PngErrorKind::IllegalColorTypeBitDepthCombination, offset))?;
    if !color_type.legal_bit_depths().contains(&bit_depth) {
      return Err(PngError::new(PngErrorKind::IllegalColorTypeBitDepthCombination, offset));
    }
    let interlaced = match interlace_method {
      0 => false,
      1 => true,
      _ => return Err(PngError::new(PngErrorKind::MalformedIhdr, offset)),
    };
    Ok(Self { width, height, bit_depth, color_type, interlaced })
  }

  /// Bits used by one pixel's worth of samples, before byte rounding.
  #[inline]
  #[must_use]
  pub const fn bits_per_pixel(&self) -> usize {
    (self.bit_depth as usize) * self.color_type.channel_count()
  }

  /// The "filter unit": `max(1, ceil(channels * bit_depth / 8))`. This is the
  /// stride the filter predictors look back by, per §4.4 / §GLOSSARY.
  #[inline]
  #[must_use]
  pub const fn filter_unit(&self) -> usize {
    let bits = self.bits_per_pixel();
    let bytes = (bits + 7) / 8;
    if bytes == 0 {
      1
    } else {
      bytes
    }
  }

  /// Bytes in one filtered scanline of a sub-image of the given `width`,
  /// including the leading filter-type byte.
  #[inline]
  #[must_use]
  pub const fn bytes_per_filterline(&self, width: u32) -> usize {
    1 + ((self.bits_per_pixel() * (width as usize)) + 7) / 8
  }

  /// Exact byte length the inflated `IDAT` stream must have, per §4.3.
  #[must_use]
  pub fn expected_decompressed_len(&self) -> usize {
    if self.interlaced {
      crate::adam7::pass_dimensions(self.width, self.height)
        .iter()
        .map(|&(w, h)| self.filtered_image_len(w, h))
        .sum()
    } else {
      self.filtered_image_len(self.width, self.height)
    }
  }

  #[inline]
  fn filtered_image_len(&self, width: u32, height: u32) -> usize {
    if width == 0 || height == 0 {
      0
    } else {
      self.bytes_per_filterline(width).saturating_mul(height as usize)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn ihdr_bytes(width: u32, height: u32, bit_depth: u8, color_type: u8, interlace: u8) -> [u8; 13] {
    let mut out = [0u8; 13];
    out[0..4].copy_from_slice(&width.to_be_bytes());
    out[4..8].copy_from_slice(&height.to_be_bytes());
    out[8] = bit_depth;
    out[9] = color_type;
    out[12] = interlace;
    out
  }

  #[test]
  fn rejects_illegal_combination() {
    let data = ihdr_bytes(4, 4, 4, 2, 0); // RGB at 4 bits per channel: illegal
    let err = Ihdr::parse(&data, 8).unwrap_err();
    assert_eq!(err.kind, PngErrorKind::IllegalColorTypeBitDepthCombination);
  }

  #[test]
  fn accepts_every_legal_pair() {
    let legal: &[(u8, &[u8])] = &[
      (0, &[1, 2, 4, 8, 16]),
      (2, &[8, 16]),
      (3, &[1, 2, 4, 8]),
      (4, &[8, 16]),
      (6, &[8, 16]),
    ];
    for &(color_type, depths) in legal {
      for &depth in depths {
        let data = ihdr_bytes(1, 1, depth, color_type, 0);
        assert!(Ihdr::parse(&data, 8).is_ok());
      }
    }
  }

  #[test]
  fn zero_dimensions_are_illegal() {
    let data = ihdr_bytes(0, 4, 8, 6, 0);
    assert_eq!(Ihdr::parse(&data, 8).unwrap_err().kind, PngErrorKind::IllegalDimensions);
  }
}
