use std::{
    fs,
    path::Path,
    time::{Duration, Instant},
};

use walkdir::WalkDir;

use crate::cli::{CorpusArgs, Result};
use crate::codec;

pub fn corpus(args: CorpusArgs) -> Result<()> {
    for entry in WalkDir::new(&args.dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() || e.file_type().is_symlink())
    {
        let path = entry.path();
        let bytes = fs::read(path)?;
        let Ok(text) = String::from_utf8(bytes) else {
            eprintln!("skipping {} (not UTF-8 text)", path.display());
            continue;
        };

        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let started = Instant::now();
        let archive = codec::encode_text(&text, args.group_size, &name)?;
        let compression_time = started.elapsed();

        let started = Instant::now();
        let roundtripped = codec::decode_archive(&archive, args.group_size).map(|d| d.text);
        let decompression_time = started.elapsed();

        validate_and_print_results(path, &text, archive.len(), roundtripped, compression_time, decompression_time);
    }

    Ok(())
}

fn save_failed_equality_results_to_file(expected: &str, got: &str, path: &Path) {
    let filename = path.file_name().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    let target_expected = format!("{filename}.expected.txt");
    let target_got = format!("{filename}.got.txt");

    fs::write(&target_expected, expected).ok();
    fs::write(&target_got, got).ok();
}

fn validate_and_print_results(
    path: &Path,
    expected: &str,
    compressed_size: usize,
    got: std::result::Result<String, codec::ArchiveError>,
    compression_time: Duration,
    decompression_time: Duration,
) {
    let original_size = expected.len();

    let ratio = if original_size == 0 {
        1.0
    } else {
        compressed_size as f64 / original_size as f64
    };

    let bytes_saved = original_size as isize - compressed_size as isize;
    let percent_saved = if original_size == 0 {
        0.0
    } else {
        (bytes_saved as f64) / (original_size as f64) * 100.0
    };

    let (passed, detail) = match &got {
        Ok(text) if text == expected => (true, String::new()),
        Ok(text) => {
            save_failed_equality_results_to_file(expected, text, path);
            let filename = path.file_name().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
            (
                false,
                format!("round trip diverged\nsee {filename}.expected.txt and {filename}.got.txt for details"),
            )
        }
        Err(err) => (false, format!("error: {err}")),
    };

    let passed_string = if passed { "PASSED" } else { "FAILED" };
    eprintln!(
        "======== {} {} ========\n\t{:.0?} encode\n\t{:.0?} decode\n\toriginal: {} bytes ({} code points)\n\tcompressed: {} bytes\n\tratio: {:.1}% (compressed/original)\n\tsaved: {:+} bytes ({:+.1}%)\n\t{}",
        passed_string,
        path.display(),
        compression_time,
        decompression_time,
        original_size,
        expected.chars().count(),
        compressed_size,
        ratio * 100.0,
        bytes_saved,
        percent_saved,
        detail
    );
}
