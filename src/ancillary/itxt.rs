//! `iTXt`: international (UTF-8), optionally compressed, keyword/text triples.

use alloc::string::String;

use crate::error::{Warning, WarningKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Itxt {
  pub keyword: String,
  pub language_tag: String,
  pub translated_keyword: String,
  pub text: String,
}
impl Itxt {
  pub fn parse(data: &[u8], offset: usize) -> Result<Self, Warning> {
    let bad_size = || Warning::new(WarningKind::UnexpectedChunkSize, offset);

    let keyword_end = data.iter().position(|&b| b == 0).ok_or_else(bad_size)?;
    let (keyword_bytes, rest) = data.split_at(keyword_end);
    if keyword_bytes.is_empty() || keyword_bytes.len() > 79 {
      return Err(bad_size());
    }
    let rest = &rest[1..];

    let [compression_flag, compression_method, rest @ ..] = rest else { return Err(bad_size()) };

    let lang_end = rest.iter().position(|&b| b == 0).ok_or_else(bad_size)?;
    let (lang_bytes, rest) = rest.split_at(lang_end);
    let rest = &rest[1..];

    let trans_end = rest.iter().position(|&b| b == 0).ok_or_else(bad_size)?;
    let (trans_bytes, rest) = rest.split_at(trans_end);
    let rest = &rest[1..];

    let text = match compression_flag {
      0 => core::str::from_utf8(rest).map_err(|_| Warning::new(WarningKind::AncillaryParseFailed, offset))?.into(),
      1 => {
        if *compression_method != 0 {
          return Err(Warning::new(WarningKind::UnknownCompressionMethod, offset));
        }
        let decompressed =
          inflate_zlib(rest).map_err(|_| Warning::new(WarningKind::AncillaryParseFailed, offset))?;
        String::from_utf8(decompressed).map_err(|_| Warning::new(WarningKind::AncillaryParseFailed, offset))?
      }
      _ => return Err(Warning::new(WarningKind::AncillaryParseFailed, offset)),
    };

    let keyword = keyword_bytes.iter().map(|&b| b as char).collect();
    let language_tag =
      core::str::from_utf8(lang_bytes).map_err(|_| Warning::new(WarningKind::AncillaryParseFailed, offset))?.into();
    let translated_keyword = String::from_utf8(trans_bytes.to_vec())
      .map_err(|_| Warning::new(WarningKind::AncillaryParseFailed, offset))?;

    Ok(Self { keyword, language_tag, translated_keyword, text })
  }
}

#[cfg(feature = "miniz_oxide")]
fn inflate_zlib(compressed: &[u8]) -> Result<alloc::vec::Vec<u8>, ()> {
  miniz_oxide::inflate::decompress_to_vec_zlib(compressed).map_err(|_| ())
}

/// Without the `miniz_oxide` feature there's no inflate primitive available,
/// so a compressed `iTXt` body can never be recovered.
#[cfg(not(feature = "miniz_oxide"))]
fn inflate_zlib(_compressed: &[u8]) -> Result<alloc::vec::Vec<u8>, ()> {
  Err(())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn build(keyword: &str, compressed: bool, lang: &str, translated: &str, text: &str) -> alloc::vec::Vec<u8> {
    let mut out = alloc::vec::Vec::new();
    out.extend_from_slice(keyword.as_bytes());
    out.push(0);
    out.push(compressed as u8);
    out.push(0);
    out.extend_from_slice(lang.as_bytes());
    out.push(0);
    out.extend_from_slice(translated.as_bytes());
    out.push(0);
    if compressed {
      out.extend_from_slice(&miniz_oxide::deflate::compress_to_vec_zlib(text.as_bytes(), 6));
    } else {
      out.extend_from_slice(text.as_bytes());
    }
    out
  }

  #[test]
  fn parses_uncompressed_utf8_text() {
    let data = build("Title", false, "en", "Title", "Hello, \u{1F600}");
    let itxt = Itxt::parse(&data, 0).unwrap();
    assert_eq!(itxt.keyword, "Title");
    assert_eq!(itxt.language_tag, "en");
    assert_eq!(itxt.text, "Hello, \u{1F600}");
  }

  #[test]
  fn parses_compressed_text() {
    let data = build("Title", true, "en", "", "compressed text body");
    let itxt = Itxt::parse(&data, 0).unwrap();
    assert_eq!(itxt.text, "compressed text body");
  }
}
