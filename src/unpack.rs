//! Pixel unpacking: turns unfiltered scanline samples into RGBA pixels,
//! per §4.6. Handles every legal (colorType, bitDepth) pair, palette and
//! `tRNS` lookups, and the Adam7 scatter from reduced-image to full-image
//! coordinates.

use bitfrob::{u8_bit_split_1x8_rev, u8_bit_split_2x4_rev, u8_bit_split_4x2_rev};

use crate::adam7::scatter_position;
use crate::error::{PngError, PngErrorKind};
use crate::header::{Ihdr, PngColorType};
use crate::image::RgbaImage;
use crate::palette::Plte;
use crate::transparency::Transparency;

/// Scales an `n`-bit sample up to a full 16-bit value by bit replication
/// (`0b101` at 3 bits becomes `0b101_101_101_10` at 16, i.e. `value *
/// 65535 / max`), which is what every PNG viewer does for sub-8-bit
/// greyscale/palette-adjacent samples when presenting them as 8 or 16 bit.
#[inline]
#[must_use]
fn scale_sample(value: u16, bit_depth: u8) -> u16 {
  if bit_depth == 16 {
    return value;
  }
  let max = (1u32 << bit_depth) - 1;
  ((value as u32 * 65535) / max) as u16
}

/// Unfiltered scanline samples for one pass (or the whole image, if not
/// interlaced), without any leading filter-type bytes: `reduced_height` rows
/// of `bytes_per_filterline(reduced_width) - 1` bytes each.
pub struct UnfilteredPass<'a> {
  pub pass: usize,
  pub reduced_width: u32,
  pub reduced_height: u32,
  pub samples: &'a [u8],
}

/// Unpacks one pass's worth of samples into `out`, scattering each pixel to
/// its full-image position via [`scatter_position`].
///
/// Fails with [`PngErrorKind::PaletteIndexOutOfRange`] the moment an indexed
/// pixel names a palette entry past the end of `PLTE` (or there's no `PLTE`
/// at all), per §4.6.
pub fn unpack_pass(
  ihdr: &Ihdr,
  pass_data: &UnfilteredPass<'_>,
  palette: Option<&Plte>,
  trns: Option<&Transparency>,
  offset: usize,
  out: &mut RgbaImage,
) -> Result<(), PngError> {
  if pass_data.reduced_width == 0 || pass_data.reduced_height == 0 {
    return Ok(());
  }
  let row_bytes = ihdr.bytes_per_filterline(pass_data.reduced_width) - 1;

  for (row, line) in pass_data.samples.chunks_exact(row_bytes).enumerate() {
    if row as u32 >= pass_data.reduced_height {
      break;
    }
    let mut oor = None;
    for_each_pixel_in_line(ihdr, line, pass_data.reduced_width, |reduced_x, channels| {
      if oor.is_some() {
        return;
      }
      if ihdr.color_type == PngColorType::Indexed {
        let index = channels[0] as usize;
        if palette.map_or(true, |p| p.get(index).is_none()) {
          oor = Some(());
          return;
        }
      }
      let (full_x, full_y) = scatter_position(pass_data.pass, reduced_x, row as u32);
      if full_x >= out.width() || full_y >= out.height() {
        return;
      }
      let rgba = channels_to_rgba(ihdr.color_type, ihdr.bit_depth, &channels, palette, trns);
      write_pixel(out, full_x, full_y, rgba);
    });
    if oor.is_some() {
      return Err(PngError::new(PngErrorKind::PaletteIndexOutOfRange, offset));
    }
  }
  Ok(())
}

/// Calls `op(reduced_x, channel_samples)` for every pixel in one scanline's
/// worth of sample bytes (filter byte already stripped).
fn for_each_pixel_in_line(ihdr: &Ihdr, line: &[u8], width: u32, mut op: impl FnMut(u32, [u16; 4])) {
  let channels = ihdr.color_type.channel_count();
  match ihdr.bit_depth {
    1 | 2 | 4 if channels == 1 => {
      let per_byte: usize = match ihdr.bit_depth {
        1 => 8,
        2 => 4,
        4 => 2,
        _ => unreachable!(),
      };
      let mut x = 0u32;
      for &byte in line {
        let values: [u8; 8] = match ihdr.bit_depth {
          1 => u8_bit_split_1x8_rev(byte),
          2 => {
            let [a, b, c, d] = u8_bit_split_2x4_rev(byte);
            [a, b, c, d, 0, 0, 0, 0]
          }
          4 => {
            let [a, b] = u8_bit_split_4x2_rev(byte);
            [a, b, 0, 0, 0, 0, 0, 0]
          }
          _ => unreachable!(),
        };
        for &v in values.iter().take(per_byte) {
          if x >= width {
            break;
          }
          op(x, [v as u16, 0, 0, 0]);
          x += 1;
        }
      }
    }
    8 => {
      for (x, px) in line.chunks_exact(channels).enumerate() {
        if x as u32 >= width {
          break;
        }
        let mut samples = [0u16; 4];
        for (i, &b) in px.iter().enumerate() {
          samples[i] = b as u16;
        }
        op(x as u32, samples);
      }
    }
    16 => {
      for (x, px) in line.chunks_exact(channels * 2).enumerate() {
        if x as u32 >= width {
          break;
        }
        let mut samples = [0u16; 4];
        for i in 0..channels {
          samples[i] = u16::from_be_bytes([px[i * 2], px[i * 2 + 1]]);
        }
        op(x as u32, samples);
      }
    }
    _ => unreachable!("IHDR parse already rejected illegal bit depths"),
  }
}

/// Converts raw channel samples (still at their native bit depth, except
/// indexed color which is a palette index) into an `(r, g, b, a)` RGBA16
/// tuple.
fn channels_to_rgba(
  color_type: PngColorType,
  bit_depth: u8,
  samples: &[u16; 4],
  palette: Option<&Plte>,
  trns: Option<&Transparency>,
) -> (u16, u16, u16, u16) {
  match color_type {
    PngColorType::Grayscale => {
      let y = scale_sample(samples[0], bit_depth);
      let a = match trns {
        Some(Transparency::Gray(key)) if *key == samples[0] => 0,
        _ => 65535,
      };
      (y, y, y, a)
    }
    PngColorType::GrayscaleAlpha => {
      let y = scale_sample(samples[0], bit_depth);
      let a = scale_sample(samples[1], bit_depth);
      (y, y, y, a)
    }
    PngColorType::Rgb => {
      let r = scale_sample(samples[0], bit_depth);
      let g = scale_sample(samples[1], bit_depth);
      let b = scale_sample(samples[2], bit_depth);
      let a = match trns {
        Some(Transparency::Rgb { r: kr, g: kg, b: kb })
          if *kr == samples[0] && *kg == samples[1] && *kb == samples[2] =>
        {
          0
        }
        _ => 65535,
      };
      (r, g, b, a)
    }
    PngColorType::Rgba => {
      let r = scale_sample(samples[0], bit_depth);
      let g = scale_sample(samples[1], bit_depth);
      let b = scale_sample(samples[2], bit_depth);
      let a = scale_sample(samples[3], bit_depth);
      (r, g, b, a)
    }
    PngColorType::Indexed => {
      let index = samples[0] as usize;
      let [r, g, b] = palette.and_then(|p| p.get(index)).unwrap_or([0, 0, 0]);
      let a = trns.map_or(255, |t| t.alpha_for_index(index));
      (r as u16 * 257, g as u16 * 257, b as u16 * 257, a as u16 * 257)
    }
  }
}

fn write_pixel(out: &mut RgbaImage, x: u32, y: u32, rgba: (u16, u16, u16, u16)) {
  let (r, g, b, a) = rgba;
  match out {
    RgbaImage::Rgba8 { width, pixels, .. } => {
      let idx = ((y * *width + x) * 4) as usize;
      pixels[idx] = (r >> 8) as u8;
      pixels[idx + 1] = (g >> 8) as u8;
      pixels[idx + 2] = (b >> 8) as u8;
      pixels[idx + 3] = (a >> 8) as u8;
    }
    RgbaImage::Rgba16 { width, pixels, .. } => {
      let idx = ((y * *width + x) * 4) as usize;
      pixels[idx] = r;
      pixels[idx + 1] = g;
      pixels[idx + 2] = b;
      pixels[idx + 3] = a;
    }
  }
}
