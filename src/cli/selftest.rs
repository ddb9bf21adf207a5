use std::time::Instant;

use crate::cli::{self, CliError, Result, SelftestArgs};
use crate::codec;

const SAMPLE: &str = "Hello! This is a Huffman test\n\
                      Huffman coding should compress repeated patterns.\n\
                      aaaaaa bbbbbb cccccc\n";

pub fn selftest(args: SelftestArgs) -> Result<()> {
    let text = match &args.path {
        Some(path) => cli::read_text_file(path)?,
        None => SAMPLE.to_string(),
    };

    println!("Running self-test...");

    let started = Instant::now();
    let archive = codec::encode_text(&text, args.group_size, "selftest.txt")?;
    let compress_ms = started.elapsed().as_millis();

    let started = Instant::now();
    let decoded = codec::decode_archive(&archive, args.group_size)?;
    let decompress_ms = started.elapsed().as_millis();

    println!("Compression time: {compress_ms} ms");
    println!("Decompression time: {decompress_ms} ms");
    println!("Size: {} bytes -> {} bytes", text.len(), archive.len());

    if decoded.text == text {
        println!("SELF-TEST OK");
        Ok(())
    } else {
        Err(CliError::SelfTest(format!(
            "round trip diverged: {} code points in, {} out",
            text.chars().count(),
            decoded.text.chars().count()
        )))
    }
}
