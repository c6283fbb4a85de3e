//! Chunk ordering rules (§4.2): which chunks must precede or follow which
//! others, and which violations are fatal versus merely warned about.

use crate::error::{PngError, PngErrorKind, Warning, WarningKind};
use crate::header::PngColorType;
use crate::raw_chunk::RawChunk;

/// Tracks cross-chunk ordering state while walking a stream of
/// [`RawChunk`]s, per §4.2 / §7.
#[derive(Debug, Default)]
pub struct OrderingTracker {
  seen_ihdr: bool,
  seen_plte: bool,
  seen_idat_run: bool,
  idat_run_closed: bool,
  seen_iend: bool,
  seen_trns: bool,
  seen_bkgd: bool,
  seen_hist: bool,
  seen_splt: bool,
}
impl OrderingTracker {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Call once per chunk, in stream order, after CRC checking. Returns a
  /// fatal [`PngError`] immediately, or a [`Warning`] to accumulate.
  pub fn observe(
    &mut self,
    chunk: &RawChunk<'_>,
    color_type: Option<PngColorType>,
  ) -> Result<Option<Warning>, PngError> {
    let ty = &chunk.chunk_type;

    if !self.seen_ihdr {
      if ty != b"IHDR" {
        return Err(PngError::new(PngErrorKind::FirstChunkNotIhdr, chunk.offset));
      }
      self.seen_ihdr = true;
      return Ok(None);
    }

    if self.seen_iend {
      return Ok(Some(Warning::new(WarningKind::MalformedIend, chunk.offset)));
    }

    // Any chunk other than IDAT ends a run of IDATs that's already started;
    // a later IDAT is then non-consecutive. Checked before the match below so
    // every non-IDAT arm (including PLTE/tRNS, not just the ancillary catch-all)
    // closes the run.
    if self.seen_idat_run && ty != b"IDAT" {
      self.idat_run_closed = true;
    }

    match ty {
      b"IHDR" => Ok(Some(Warning::new(WarningKind::DuplicateChunk, chunk.offset))),
      b"PLTE" => {
        if self.seen_idat_run {
          return Ok(Some(Warning::new(WarningKind::OutOfOrderChunk, chunk.offset)));
        }
        if self.seen_plte {
          return Ok(Some(Warning::new(WarningKind::DuplicateChunk, chunk.offset)));
        }
        if let Some(ct) = color_type {
          if !ct.allows_palette() {
            return Ok(Some(Warning::new(WarningKind::OutOfOrderChunk, chunk.offset)));
          }
        }
        // PLTE must precede tRNS/bKGD/hIST/sPLT too, per §4.2.
        if self.seen_trns || self.seen_bkgd || self.seen_hist || self.seen_splt {
          return Ok(Some(Warning::new(WarningKind::OutOfOrderChunk, chunk.offset)));
        }
        self.seen_plte = true;
        Ok(None)
      }
      b"tRNS" => {
        if self.seen_idat_run {
          return Ok(Some(Warning::new(WarningKind::OutOfOrderChunk, chunk.offset)));
        }
        if self.seen_trns {
          return Ok(Some(Warning::new(WarningKind::DuplicateChunk, chunk.offset)));
        }
        self.seen_trns = true;
        Ok(None)
      }
      b"bKGD" => {
        self.seen_bkgd = true;
        Ok(None)
      }
      b"hIST" => {
        self.seen_hist = true;
        Ok(None)
      }
      b"sPLT" => {
        self.seen_splt = true;
        Ok(None)
      }
      b"IDAT" => {
        if self.idat_run_closed {
          // A later, non-consecutive run of IDAT chunks: fatal per §9.
          return Err(PngError::new(PngErrorKind::NonConsecutiveIdat, chunk.offset));
        }
        self.seen_idat_run = true;
        Ok(None)
      }
      b"IEND" => {
        self.seen_iend = true;
        Ok(None)
      }
      _ => Ok(None),
    }
  }

  #[inline]
  #[must_use]
  pub const fn any_idat_seen(&self) -> bool {
    self.seen_idat_run
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn chunk(ty: &'static [u8; 4], offset: usize) -> RawChunk<'static> {
    RawChunk { offset, chunk_type: *ty, data: &[], declared_crc: 0 }
  }

  #[test]
  fn first_chunk_must_be_ihdr() {
    let mut tracker = OrderingTracker::new();
    let err = tracker.observe(&chunk(b"IDAT", 8), None).unwrap_err();
    assert_eq!(err.kind, PngErrorKind::FirstChunkNotIhdr);
  }

  #[test]
  fn non_consecutive_idat_is_fatal() {
    let mut tracker = OrderingTracker::new();
    tracker.observe(&chunk(b"IHDR", 8), None).unwrap();
    tracker.observe(&chunk(b"IDAT", 21), None).unwrap();
    tracker.observe(&chunk(b"tEXt", 40), None).unwrap();
    let err = tracker.observe(&chunk(b"IDAT", 70), None).unwrap_err();
    assert_eq!(err.kind, PngErrorKind::NonConsecutiveIdat);
  }

  #[test]
  fn chunk_after_iend_is_a_warning_not_an_error() {
    let mut tracker = OrderingTracker::new();
    tracker.observe(&chunk(b"IHDR", 8), None).unwrap();
    tracker.observe(&chunk(b"IDAT", 21), None).unwrap();
    tracker.observe(&chunk(b"IEND", 40), None).unwrap();
    let warning = tracker.observe(&chunk(b"tEXt", 52), None).unwrap();
    assert_eq!(warning.unwrap().kind, WarningKind::MalformedIend);
  }

  #[test]
  fn plte_after_idat_is_out_of_order() {
    let mut tracker = OrderingTracker::new();
    tracker.observe(&chunk(b"IHDR", 8), None).unwrap();
    tracker.observe(&chunk(b"IDAT", 21), None).unwrap();
    let warning = tracker.observe(&chunk(b"PLTE", 40), Some(PngColorType::Rgb)).unwrap();
    assert_eq!(warning.unwrap().kind, WarningKind::OutOfOrderChunk);
  }

  #[test]
  fn non_consecutive_idat_separated_by_plte_is_fatal() {
    let mut tracker = OrderingTracker::new();
    tracker.observe(&chunk(b"IHDR", 8), None).unwrap();
    tracker.observe(&chunk(b"IDAT", 21), None).unwrap();
    tracker.observe(&chunk(b"PLTE", 40), Some(PngColorType::Rgb)).unwrap();
    let err = tracker.observe(&chunk(b"IDAT", 70), None).unwrap_err();
    assert_eq!(err.kind, PngErrorKind::NonConsecutiveIdat);
  }

  #[test]
  fn non_consecutive_idat_separated_by_trns_is_fatal() {
    let mut tracker = OrderingTracker::new();
    tracker.observe(&chunk(b"IHDR", 8), None).unwrap();
    tracker.observe(&chunk(b"IDAT", 21), None).unwrap();
    tracker.observe(&chunk(b"tRNS", 40), Some(PngColorType::Grayscale)).unwrap();
    let err = tracker.observe(&chunk(b"IDAT", 70), None).unwrap_err();
    assert_eq!(err.kind, PngErrorKind::NonConsecutiveIdat);
  }

  #[test]
  fn trns_before_plte_is_out_of_order() {
    let mut tracker = OrderingTracker::new();
    tracker.observe(&chunk(b"IHDR", 8), None).unwrap();
    tracker.observe(&chunk(b"tRNS", 21), Some(PngColorType::Indexed)).unwrap();
    let warning = tracker.observe(&chunk(b"PLTE", 40), Some(PngColorType::Indexed)).unwrap();
    assert_eq!(warning.unwrap().kind, WarningKind::OutOfOrderChunk);
  }

  #[test]
  fn bkgd_hist_splt_before_plte_are_out_of_order() {
    for ty in [b"bKGD", b"hIST", b"sPLT"] {
      let mut tracker = OrderingTracker::new();
      tracker.observe(&chunk(b"IHDR", 8), None).unwrap();
      tracker.observe(&chunk(ty, 21), Some(PngColorType::Indexed)).unwrap();
      let warning = tracker.observe(&chunk(b"PLTE", 40), Some(PngColorType::Indexed)).unwrap();
      assert_eq!(warning.unwrap().kind, WarningKind::OutOfOrderChunk);
    }
  }
}
