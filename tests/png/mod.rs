use pngcore::decode::{decode, DecodeOptions};

#[test]
fn random_bytes_never_panic_the_decoder() {
  // even totally random data should never panic the decoder, whether or
  // not it happens to pass the signature check.
  for _ in 0..200 {
    let v = super::rand_bytes(1024);
    let _ = decode(&v, &DecodeOptions::default());
  }
}

#[test]
fn truncated_valid_png_never_panics() {
  let pixels = [1u8, 2, 3, 255, 4, 5, 6, 255, 7, 8, 9, 255, 10, 11, 12, 255];
  let png = pngcore::encode::encode(
    &pixels,
    2,
    2,
    &pngcore::encode::EncodeOptions {
      bit_depth: 8,
      color_type: pngcore::header::PngColorType::Rgba,
      ..Default::default()
    },
  )
  .unwrap();
  for cut in 0..png.len() {
    let _ = decode(&png[..cut], &DecodeOptions::default());
  }
}
