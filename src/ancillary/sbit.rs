//! `sBIT`: the number of significant bits per channel in the original
//! (pre-PNG) sample data, one byte per channel of `IHDR.colorType`.

use alloc::vec::Vec;

use crate::error::{Warning, WarningKind};
use crate::header::PngColorType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sbit {
  pub significant_bits: Vec<u8>,
}
impl Sbit {
  pub fn parse(data: &[u8], offset: usize, color_type: PngColorType) -> Result<Self, Warning> {
    if data.len() != color_type.channel_count() {
      return Err(Warning::new(WarningKind::UnexpectedChunkSize, offset));
    }
    Ok(Self { significant_bits: data.to_vec() })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn matches_channel_count() {
    let sbit = Sbit::parse(&[5, 5, 5], 0, PngColorType::Rgb).unwrap();
    assert_eq!(sbit.significant_bits, alloc::vec![5, 5, 5]);
  }

  #[test]
  fn wrong_channel_count_is_a_warning() {
    assert!(Sbit::parse(&[5, 5], 0, PngColorType::Rgb).is_err());
  }
}
