//! `tEXt`: uncompressed Latin-1 keyword/text pairs.

use alloc::string::String;

use crate::error::{Warning, WarningKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
  pub keyword: String,
  pub text: String,
}
impl Text {
  pub fn parse(data: &[u8], offset: usize) -> Result<Self, Warning> {
    let null_pos =
      data.iter().position(|&b| b == 0).ok_or(Warning::new(WarningKind::UnexpectedChunkSize, offset))?;
    let (keyword_bytes, rest) = data.split_at(null_pos);
    if keyword_bytes.is_empty() || keyword_bytes.len() > 79 {
      return Err(Warning::new(WarningKind::UnexpectedChunkSize, offset));
    }
    let text_bytes = &rest[1..];
    // Latin-1 maps 1:1 onto the first 256 Unicode scalars, so this can never fail.
    let keyword = keyword_bytes.iter().map(|&b| b as char).collect();
    let text = text_bytes.iter().map(|&b| b as char).collect();
    Ok(Self { keyword, text })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn splits_keyword_and_text_on_null() {
    let mut data = alloc::vec::Vec::new();
    data.extend_from_slice(b"Author");
    data.push(0);
    data.extend_from_slice(b"Jane Doe");
    let text = Text::parse(&data, 0).unwrap();
    assert_eq!(text.keyword, "Author");
    assert_eq!(text.text, "Jane Doe");
  }

  #[test]
  fn missing_null_is_a_warning() {
    assert!(Text::parse(b"no null here", 0).is_err());
  }
}
