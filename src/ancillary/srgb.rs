//! `sRGB`: indicates the image conforms to the sRGB color space, and gives
//! the rendering intent used to produce it.

use crate::error::{Warning, WarningKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RenderingIntent {
  Perceptual = 0,
  RelativeColorimetric = 1,
  Saturation = 2,
  AbsoluteColorimetric = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Srgb {
  pub rendering_intent: RenderingIntent,
}
impl Srgb {
  pub fn parse(data: &[u8], offset: usize) -> Result<Self, Warning> {
    let [intent] = *data else {
      return Err(Warning::new(WarningKind::UnexpectedChunkSize, offset));
    };
    let rendering_intent = match intent {
      0 => RenderingIntent::Perceptual,
      1 => RenderingIntent::RelativeColorimetric,
      2 => RenderingIntent::Saturation,
      3 => RenderingIntent::AbsoluteColorimetric,
      _ => return Err(Warning::new(WarningKind::AncillaryParseFailed, offset)),
    };
    Ok(Self { rendering_intent })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_each_intent() {
    for b in 0u8..=3 {
      assert!(Srgb::parse(&[b], 0).is_ok());
    }
  }

  #[test]
  fn rejects_unknown_intent() {
    assert!(Srgb::parse(&[9], 0).is_err());
  }
}
