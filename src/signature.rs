//! The fixed 8-byte prefix every PNG datastream must start with.

/// The first eight bytes of a PNG datastream should match these bytes.
///
/// `89 50 4E 47 0D 0A 1A 0A`: a non-ASCII marker byte, the string `PNG`, a
/// CRLF pair (to detect line-ending transforms mangling the file), a DOS
/// end-of-file byte, and a final LF (to detect the opposite transform).
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Strips the signature off the front of `bytes`, or gives back `None` if
/// `bytes` is shorter than the signature or doesn't match it.
#[inline]
#[must_use]
pub fn strip_signature(bytes: &[u8]) -> Option<&[u8]> {
  bytes.strip_prefix(PNG_SIGNATURE.as_slice())
}
