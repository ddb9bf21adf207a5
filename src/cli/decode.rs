use std::fs;
use std::path::Path;
use std::time::Instant;

use crate::cli::{CliError, DecodeArgs, Result, paths};
use crate::codec;

pub fn decode(args: DecodeArgs) -> Result<()> {
    let input_path = &args.input;
    if !input_path.exists() {
        return Err(CliError::NotFound(input_path.clone()));
    }
    let data = fs::read(input_path)?;

    let started = Instant::now();
    let decoded = codec::decode_archive(&data, args.group_size)?;
    let elapsed = started.elapsed();

    // the header carries a bare name; reduce whatever we got to its final
    // component so a hostile archive cannot steer the write elsewhere
    let name = Path::new(&decoded.file_name)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("extracted.txt");

    let dir = match input_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let output_path = paths::unique_decode_path(dir, name);
    fs::write(&output_path, decoded.text.as_bytes())?;

    if_tracing! {
        tracing::info!(event = "decode_complete", input = %input_path.display(), output = %output_path.display(), elapsed_ms = elapsed.as_millis() as u64, decompressed_len = decoded.text.len(), "decode finished");
    }

    println!("OK: extracted file: {}", output_path.display());
    println!("Decompression time: {} ms", elapsed.as_millis());

    Ok(())
}
