//! `pHYs`: intended pixel aspect ratio / physical resolution.

use crate::error::{Warning, WarningKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhysUnit {
  Unknown,
  Meter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phys {
  pub pixels_per_unit_x: u32,
  pub pixels_per_unit_y: u32,
  pub unit: PhysUnit,
}
impl Phys {
  pub fn parse(data: &[u8], offset: usize) -> Result<Self, Warning> {
    if data.len() != 9 {
      return Err(Warning::new(WarningKind::UnexpectedChunkSize, offset));
    }
    let x = u32::from_be_bytes(data[0..4].try_into().unwrap());
    let y = u32::from_be_bytes(data[4..8].try_into().unwrap());
    let unit = match data[8] {
      0 => PhysUnit::Unknown,
      1 => PhysUnit::Meter,
      _ => return Err(Warning::new(WarningKind::AncillaryParseFailed, offset)),
    };
    Ok(Self { pixels_per_unit_x: x, pixels_per_unit_y: y, unit })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_meter_unit() {
    let mut data = alloc::vec::Vec::new();
    data.extend_from_slice(&2835u32.to_be_bytes());
    data.extend_from_slice(&2835u32.to_be_bytes());
    data.push(1);
    let phys = Phys::parse(&data, 0).unwrap();
    assert_eq!(phys.unit, PhysUnit::Meter);
    assert_eq!(phys.pixels_per_unit_x, 2835);
  }
}
