//! `PLTE`: the optional-or-required palette of RGB triplets used by indexed
//! color images (and advisory for true-color images).

use alloc::vec::Vec;

use crate::error::{PngError, PngErrorKind};

/// An ordered palette of RGB triplets, 1 to 256 entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plte {
  pub entries: Vec<[u8; 3]>,
}
impl Plte {
  /// Parses a `PLTE` chunk body. The length must be a nonzero multiple of 3
  /// no greater than `256 * 3`.
  pub fn parse(data: &[u8], offset: usize) -> Result<Self, PngError> {
    if data.is_empty() || data.len() % 3 != 0 || data.len() > 256 * 3 {
      return Err(PngError::new(PngErrorKind::InvalidPaletteLength, offset));
    }
    let entries = data.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect();
    Ok(Self { entries })
  }

  #[inline]
  #[must_use]
  pub fn get(&self, index: usize) -> Option<[u8; 3]> {
    self.entries.get(index).copied()
  }

  /// Builds the smallest palette covering every color in an RGBA8 buffer, in
  /// first-seen order. Returns `None` if the image has more than 256 distinct
  /// colors (the `colorType = 3` encode path can't represent it).
  ///
  /// Alpha is intentionally ignored here: `PLTE` itself is RGB-only, and
  /// per-entry alpha is carried separately in a `tRNS` chunk by the caller.
  #[must_use]
  pub fn synthesize(rgba8: &[u8]) -> Option<Self> {
    let mut entries: Vec<[u8; 3]> = Vec::new();
    for px in rgba8.chunks_exact(4) {
      let rgb = [px[0], px[1], px[2]];
      if !entries.contains(&rgb) {
        if entries.len() == 256 {
          return None;
        }
        entries.push(rgb);
      }
    }
    Some(Self { entries })
  }

  /// Index of `rgb` within this palette, built by [`synthesize`](Self::synthesize)
  /// so every color used in the source image is present.
  #[inline]
  #[must_use]
  pub fn index_of(&self, rgb: [u8; 3]) -> Option<u8> {
    self.entries.iter().position(|&e| e == rgb).map(|i| i as u8)
  }

  pub fn to_bytes(&self) -> Vec<u8> {
    let mut out = Vec::with_capacity(self.entries.len() * 3);
    for e in &self.entries {
      out.extend_from_slice(e);
    }
    out
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rejects_length_not_multiple_of_three() {
    let data = [0u8; 4];
    assert_eq!(Plte::parse(&data, 0).unwrap_err().kind, PngErrorKind::InvalidPaletteLength);
  }

  #[test]
  fn rejects_empty_and_oversized() {
    assert!(Plte::parse(&[], 0).is_err());
    let big = alloc::vec![0u8; 257 * 3];
    assert!(Plte::parse(&big, 0).is_err());
  }

  #[test]
  fn synthesize_overflows_past_256_colors() {
    let mut rgba = Vec::new();
    for i in 0..257u32 {
      rgba.extend_from_slice(&[(i & 0xFF) as u8, (i >> 8) as u8, 0, 255]);
    }
    assert!(Plte::synthesize(&rgba).is_none());
  }

  #[test]
  fn synthesize_dedupes_colors() {
    let rgba = [255u8, 0, 0, 255, 255, 0, 0, 255, 0, 255, 0, 255];
    let plte = Plte::synthesize(&rgba).unwrap();
    assert_eq!(plte.entries.len(), 2);
  }
}
