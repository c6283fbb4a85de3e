#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
//#![warn(missing_docs)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

/// Prints a trace line (file, line, and the given `println!`-style
/// arguments) when the `trace` feature is enabled; compiles away to nothing
/// otherwise.
#[macro_export]
macro_rules! trace {
  ($($arg:tt)*) => {
    #[cfg(feature = "trace")] {
      ::std::print!("{file}:{line}> ", file = file!(), line = line!());
      ::std::println!($($arg)*);
    }
  }
}

pub mod adam7;
pub mod ancillary;
pub mod crc32;
// Decoding and encoding both bottom out in zlib inflate/deflate, so they
// only exist when `miniz_oxide` is available. The framing, header, filter,
// and ancillary-parsing modules stand on their own without it.
#[cfg(feature = "miniz_oxide")]
pub mod decode;
#[cfg(feature = "miniz_oxide")]
pub mod deflate;
#[cfg(feature = "miniz_oxide")]
pub mod encode;
pub mod error;
pub mod filter;
pub mod header;
#[cfg(feature = "miniz_oxide")]
pub mod inflate;
pub mod image;
pub mod ordering;
pub mod pack;
pub mod palette;
pub mod raw_chunk;
pub mod signature;
pub mod transparency;
pub mod unpack;

#[cfg(feature = "miniz_oxide")]
pub use decode::{decode, DecodeOptions, DecodeResult};
#[cfg(feature = "miniz_oxide")]
pub use encode::{encode, EncodeOptions};
pub use error::{PngError, PngErrorKind, PngResult, Severity, Warning, WarningKind};
pub use header::{Ihdr, PngColorType};
pub use image::RgbaImage;
