//! output path plumbing. kept out of the codec: the archive format never
//! sees directories, only the base file name.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// The archive is created next to the input file, with `.huf` appended.
pub fn archive_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(".huf");
    PathBuf::from(name)
}

/// Picks a path in `dir` for `name` that does not collide with an existing
/// file: `name` itself, then `decoded_<name>`, then numbered variants.
pub fn unique_decode_path(dir: &Path, name: &str) -> PathBuf {
    let candidate = dir.join(name);
    if !candidate.exists() {
        return candidate;
    }

    let decoded = dir.join(format!("decoded_{name}"));
    if !decoded.exists() {
        return decoded;
    }

    for i in 1..=9999 {
        let numbered = dir.join(format!("decoded_{i}_{name}"));
        if !numbered.exists() {
            return numbered;
        }
    }

    // last resort, effectively unreachable outside of stress setups
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    dir.join(format!("decoded_{millis}_{name}"))
}
