//! Scanline filtering: the five reconstruction filters (§4.4) and, for
//! encoding, the per-line minimum-sum-of-absolute-differences heuristic that
//! picks among them (§4.7).

use alloc::vec::Vec;

use crate::error::{PngError, PngErrorKind};

/// The five PNG filter types, keyed by the leading byte of every filtered
/// scanline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum FilterType {
  None = 0,
  Sub = 1,
  Up = 2,
  Average = 3,
  Paeth = 4,
}
impl FilterType {
  #[inline]
  #[must_use]
  const fn from_byte(b: u8) -> Option<Self> {
    Some(match b {
      0 => Self::None,
      1 => Self::Sub,
      2 => Self::Up,
      3 => Self::Average,
      4 => Self::Paeth,
      _ => return None,
    })
  }
}

/// Reverses filtering over every scanline of one pass (or the whole image,
/// for non-interlaced data), mutating `data` in place.
///
/// `data` holds `height` scanlines back to back, each `1 + row_bytes` long
/// (the leading filter-type byte plus `row_bytes` of filtered sample bytes).
/// `filter_unit` is [`Ihdr::filter_unit`](crate::header::Ihdr::filter_unit):
/// how many bytes back the "left" neighbor sample sits.
pub fn unfilter_pass(
  data: &mut [u8],
  row_bytes: usize,
  filter_unit: usize,
  offset: usize,
) -> Result<(), PngError> {
  let stride = 1 + row_bytes;
  if row_bytes == 0 || data.len() % stride != 0 {
    return Err(PngError::new(PngErrorKind::InvalidFilter, offset));
  }
  let height = data.len() / stride;
  for row in 0..height {
    let row_offset = offset + row * stride;
    let filter_byte = data[row * stride];
    let filter = FilterType::from_byte(filter_byte)
      .ok_or_else(|| PngError::new(PngErrorKind::InvalidFilter, row_offset))?;

    let line_start = row * stride + 1;
    let prev_line_start = line_start.checked_sub(stride);

    for i in 0..row_bytes {
      let here = line_start + i;
      let a = if i >= filter_unit { Some(data[here - filter_unit]) } else { None };
      let b = prev_line_start.map(|p| data[p + i]);
      let c = prev_line_start.and_then(|p| if i >= filter_unit { Some(data[p + i - filter_unit]) } else { None });
      let x = data[here];
      data[here] = match filter {
        FilterType::None => x,
        FilterType::Sub => x.wrapping_add(a.unwrap_or(0)),
        FilterType::Up => x.wrapping_add(b.unwrap_or(0)),
        FilterType::Average => {
          let avg = ((a.unwrap_or(0) as u16 + b.unwrap_or(0) as u16) / 2) as u8;
          x.wrapping_add(avg)
        }
        FilterType::Paeth => x.wrapping_add(paeth_predict(a.unwrap_or(0), b.unwrap_or(0), c.unwrap_or(0))),
      };
    }
  }
  Ok(())
}

/// Strips the leading filter-type byte off every `1 + row_bytes`-long row of
/// an already-unfiltered buffer, leaving just the concatenated sample bytes.
/// Used after [`unfilter_pass`], since every other stage works on raw sample
/// bytes with no filter markers interleaved.
#[must_use]
pub fn strip_filter_bytes(data: &[u8], row_bytes: usize) -> Vec<u8> {
  let stride = 1 + row_bytes;
  let mut out = Vec::with_capacity(data.len().saturating_sub(data.len() / stride.max(1)));
  for row in data.chunks_exact(stride) {
    out.extend_from_slice(&row[1..]);
  }
  out
}

/// The Paeth predictor: picks whichever of `a` (left), `b` (up), `c`
/// (upper-left) is closest to `a + b - c`, preferring `a`, then `b`, then `c`
/// on ties.
#[inline]
#[must_use]
pub const fn paeth_predict(a: u8, b: u8, c: u8) -> u8 {
  let a_i = a as i32;
  let b_i = b as i32;
  let c_i = c as i32;
  let p = a_i + b_i - c_i;
  let pa = (p - a_i).abs();
  let pb = (p - b_i).abs();
  let pc = (p - c_i).abs();
  if pa <= pb && pa <= pc {
    a
  } else if pb <= pc {
    b
  } else {
    c
  }
}

/// Filters one unfiltered image (or pass) for encoding, choosing the filter
/// type per scanline by the "minimum sum of absolute differences" heuristic:
/// for each candidate filter, treat the filtered bytes as signed and sum
/// `|byte as i8|`, then keep whichever filter has the smallest sum.
///
/// `data` holds `height` unfiltered scanlines of `row_bytes` bytes each (no
/// filter-type bytes yet). Returns the filtered stream, one extra leading
/// byte per row.
#[must_use]
pub fn filter_pass(data: &[u8], row_bytes: usize, filter_unit: usize) -> Vec<u8> {
  if row_bytes == 0 {
    return Vec::new();
  }
  let height = data.len() / row_bytes;
  let mut out = Vec::with_capacity(data.len() + height);
  let mut candidate = Vec::with_capacity(row_bytes);

  for row in 0..height {
    let line = &data[row * row_bytes..(row + 1) * row_bytes];
    let prev_line = if row == 0 { None } else { Some(&data[(row - 1) * row_bytes..row * row_bytes]) };

    let mut best_filter = FilterType::None;
    let mut best_sum = u64::MAX;
    let mut best_bytes: Vec<u8> = Vec::new();

    for &filter in &[FilterType::None, FilterType::Sub, FilterType::Up, FilterType::Average, FilterType::Paeth] {
      candidate.clear();
      for i in 0..row_bytes {
        let a = if i >= filter_unit { line[i - filter_unit] } else { 0 };
        let b = prev_line.map_or(0, |p| p[i]);
        let c = if i >= filter_unit { prev_line.map_or(0, |p| p[i - filter_unit]) } else { 0 };
        let x = line[i];
        let filtered = match filter {
          FilterType::None => x,
          FilterType::Sub => x.wrapping_sub(a),
          FilterType::Up => x.wrapping_sub(b),
          FilterType::Average => x.wrapping_sub(((a as u16 + b as u16) / 2) as u8),
          FilterType::Paeth => x.wrapping_sub(paeth_predict(a, b, c)),
        };
        candidate.push(filtered);
      }
      let sum: u64 = candidate.iter().map(|&b| (b as i8).unsigned_abs() as u64).sum();
      if sum < best_sum {
        best_sum = sum;
        best_filter = filter;
        best_bytes.clear();
        best_bytes.extend_from_slice(&candidate);
      }
    }

    out.push(best_filter as u8);
    out.extend_from_slice(&best_bytes);
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn paeth_prefers_a_on_tie() {
    // a = b = c, p = a, all distances 0: a wins.
    assert_eq!(paeth_predict(10, 10, 10), 10);
  }

  #[test]
  fn none_filter_round_trips() {
    let row_bytes = 4;
    let unfiltered: Vec<u8> = alloc::vec![10, 20, 30, 40, 11, 21, 31, 41];
    let filtered = filter_pass(&unfiltered, row_bytes, 1);
    // prepend verified: filter type bytes interleaved every row_bytes+1
    let mut data = filtered;
    unfilter_pass(&mut data, row_bytes, 1, 0).unwrap();
    // strip filter-type bytes back out for comparison
    let mut recovered = Vec::new();
    for row in data.chunks(row_bytes + 1) {
      recovered.extend_from_slice(&row[1..]);
    }
    assert_eq!(recovered, unfiltered);
  }

  #[test]
  fn sub_filter_round_trips_with_filter_unit() {
    let row_bytes = 6;
    let filter_unit = 3;
    let unfiltered: Vec<u8> = alloc::vec![1, 2, 3, 4, 6, 9, 250, 251, 252, 0, 1, 2];
    let filtered = filter_pass(&unfiltered, row_bytes, filter_unit);
    let mut data = filtered.clone();
    unfilter_pass(&mut data, row_bytes, filter_unit, 0).unwrap();
    let mut recovered = Vec::new();
    for row in data.chunks(row_bytes + 1) {
      recovered.extend_from_slice(&row[1..]);
    }
    assert_eq!(recovered, unfiltered);
  }

  #[test]
  fn invalid_filter_byte_is_rejected() {
    let mut data = alloc::vec![5u8, 0, 0, 0, 0];
    assert_eq!(unfilter_pass(&mut data, 4, 1, 0).unwrap_err().kind, PngErrorKind::InvalidFilter);
  }
}
