//! `eXIf`: an embedded Exif (TIFF-format) metadata blob. Its internal layout
//! is well outside the PNG spec; this crate only hands back the raw bytes.

use alloc::vec::Vec;

use crate::error::Warning;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exif {
  pub data: Vec<u8>,
}
impl Exif {
  pub fn parse(data: &[u8], _offset: usize) -> Result<Self, Warning> {
    Ok(Self { data: data.to_vec() })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn always_succeeds_and_copies_the_payload() {
    let exif = Exif::parse(&[1, 2, 3], 0).unwrap();
    assert_eq!(exif.data, alloc::vec![1, 2, 3]);
  }
}
