use std::fs;
use std::time::Instant;

use crate::cli::{self, EncodeArgs, Result, paths};
use crate::codec;

pub fn encode(args: EncodeArgs) -> Result<()> {
    let input_path = &args.input;
    let text = cli::read_text_file(input_path)?;

    // only the base name goes into the archive, never the directory
    let file_name = input_path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let started = Instant::now();
    let archive = codec::encode_text(&text, args.group_size, &file_name)?;
    let elapsed = started.elapsed();

    let output_path = paths::archive_path(input_path);
    fs::write(&output_path, &archive)?;

    if_tracing! {
        tracing::info!(event = "encode_complete", input = %input_path.display(), output = %output_path.display(), elapsed_ms = elapsed.as_millis() as u64, compressed_len = archive.len(), "encode finished");
    }

    let in_size = text.len();
    let out_size = archive.len();
    println!("OK: created archive: {}", output_path.display());
    println!("Compression time: {} ms", elapsed.as_millis());
    println!("Size: {in_size} bytes -> {out_size} bytes");
    println!("Ratio: {:.4}", out_size as f64 / in_size.max(1) as f64);

    Ok(())
}
