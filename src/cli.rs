//! cli component of the tokpack project.
//!
//! the surface is deliberately small. `$exename` stands for the executable
//! name, `<description>` denotes a required argument, `[description]` an
//! optional one.
//!
//! > `$exename encode <path to utf-8 text file> -n <group size>`
//!
//! compresses the file into an archive written next to it, with a `.huf`
//! extension appended. the group size is the number of unicode code points
//! folded into one alphabet symbol; it is stored in the archive, and the
//! same value must be passed again when decoding.
//!
//! > `$exename decode <path to archive> -n <group size>`
//!
//! extracts the archive next to itself, under the file name stored in the
//! header. if that name is already taken, the output is renamed
//! `decoded_<name>` (then `decoded_1_<name>` and so on) instead of
//! overwriting anything.
//!
//! > `$exename selftest [path] [-n <group size>]`
//!
//! round-trips a built-in sample (or the given file) in memory and reports
//! timings and sizes. exits non-zero if the round trip diverges.
//!
//! > `$exename corpus <directory> [-n <group size>]`
//!
//! round-trips every utf-8 file under the directory and prints a per-file
//! report. non-text files are skipped with a note.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use crate::codec::ArchiveError;

pub mod corpus;
pub mod decode;
pub mod encode;
pub mod paths;
pub mod selftest;

/// Error types for CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("{}: input is not valid UTF-8 text", .0.display())]
    NotUtf8(PathBuf),

    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error("self-test failed: {0}")]
    SelfTest(String),
}

pub type Result<T> = std::result::Result<T, CliError>;

/// CLI arguments for the tokpack application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Supported commands for tokpack
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compress a UTF-8 text file into an archive next to it
    #[command(alias = "enc")]
    Encode(EncodeArgs),

    /// Extract an archive next to it
    #[command(alias = "dec")]
    Decode(DecodeArgs),

    /// Round-trip a built-in sample (or a given file) and report results
    Selftest(SelftestArgs),

    /// Round-trip every file in a directory and report per-file results
    Corpus(CorpusArgs),
}

/// Arguments specific to the encode command
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Path to the input text file
    pub input: PathBuf,

    /// Code points per token
    #[arg(short = 'n', long)]
    pub group_size: u32,
}

/// Arguments specific to the decode command
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Path to the archive file
    pub input: PathBuf,

    /// Code points per token; must match the value used at encode time
    #[arg(short = 'n', long)]
    pub group_size: u32,
}

/// Arguments specific to the selftest command
#[derive(Args, Debug)]
pub struct SelftestArgs {
    /// Optional text file to round-trip instead of the built-in sample
    pub path: Option<PathBuf>,

    /// Code points per token
    #[arg(short = 'n', long, default_value_t = 2)]
    pub group_size: u32,
}

/// Arguments specific to the corpus command
#[derive(Args, Debug)]
pub struct CorpusArgs {
    /// Directory to walk
    pub dir: PathBuf,

    /// Code points per token
    #[arg(short = 'n', long, default_value_t = 2)]
    pub group_size: u32,
}

/// Reads a whole file as UTF-8 text.
pub(crate) fn read_text_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(CliError::NotFound(path.to_path_buf()));
    }
    let bytes = fs::read(path)?;
    String::from_utf8(bytes).map_err(|_| CliError::NotUtf8(path.to_path_buf()))
}
