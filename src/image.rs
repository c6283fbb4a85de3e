//! The decoded pixel buffer returned to callers: RGBA samples at either 8 or
//! 16 bits per channel, always non-premultiplied, per §4.6 / §6.

use alloc::vec;
use alloc::vec::Vec;

/// A fully decoded image: every pixel expanded to RGBA, tightly packed in
/// row-major order.
///
/// `force32` in [`DecodeOptions`](crate::decode::DecodeOptions) always
/// produces [`Rgba8`](Self::Rgba8); without it, the bit depth follows
/// `IHDR.bit_depth` (16-bit source images decode to `Rgba16`, everything
/// else to `Rgba8`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RgbaImage {
  Rgba8 { width: u32, height: u32, pixels: Vec<u8> },
  Rgba16 { width: u32, height: u32, pixels: Vec<u16> },
}
impl RgbaImage {
  #[must_use]
  pub fn new_rgba8(width: u32, height: u32) -> Self {
    Self::Rgba8 { width, height, pixels: vec![0u8; (width as usize) * (height as usize) * 4] }
  }

  #[must_use]
  pub fn new_rgba16(width: u32, height: u32) -> Self {
    Self::Rgba16 { width, height, pixels: vec![0u16; (width as usize) * (height as usize) * 4] }
  }

  #[inline]
  #[must_use]
  pub const fn width(&self) -> u32 {
    match self {
      Self::Rgba8 { width, .. } | Self::Rgba16 { width, .. } => *width,
    }
  }

  #[inline]
  #[must_use]
  pub const fn height(&self) -> u32 {
    match self {
      Self::Rgba8 { width: _, height, .. } | Self::Rgba16 { width: _, height, .. } => *height,
    }
  }

  /// Reduces a 16-bit-per-channel image to 8-bit by dropping the low byte of
  /// each sample, per §4.6's `force32` behavior. A no-op on `Rgba8`.
  #[must_use]
  pub fn into_rgba8(self) -> Self {
    match self {
      Self::Rgba8 { .. } => self,
      Self::Rgba16 { width, height, pixels } => {
        let pixels = pixels.into_iter().map(|sample| (sample >> 8) as u8).collect();
        Self::Rgba8 { width, height, pixels }
      }
    }
  }
}
