//! Walks a PNG file's raw chunk list and prints a one-line summary of each
//! chunk, without attempting to decode any pixels.

use pngcore::raw_chunk::RawChunkIter;

fn main() {
  let args: Vec<String> = std::env::args().collect();
  println!("ARGS: {args:?}");
  for file_arg in args[1..].iter() {
    let path = std::path::Path::new(file_arg);
    print!("Reading `{}`... ", path.display());
    let bytes = match std::fs::read(path) {
      Ok(bytes) => {
        println!("got {} bytes.", bytes.len());
        bytes
      }
      Err(e) => {
        println!("{e:?}");
        continue;
      }
    };
    let Some(after_signature) = pngcore::signature::strip_signature(&bytes) else {
      println!("not a PNG file (bad signature)");
      continue;
    };
    for (n, raw_chunk) in RawChunkIter::new(after_signature, 8).enumerate() {
      match raw_chunk {
        Ok(chunk) => println!(
          "{n}: {} @ {} ({} bytes, crc_valid={})",
          chunk.type_str(),
          chunk.offset,
          chunk.data.len(),
          chunk.crc_is_valid()
        ),
        Err(e) => println!("{n}: {e}"),
      }
    }
  }
}
