//! standalone cyclic redundancy check utility.
//!
//! appends a CRC-8/16/32 remainder to a copy of a file (`<name>.crcN`), or
//! verifies such a file and restores the original bytes. textbook bitwise
//! remainder: MSB first, non-reflected, zero initial register. this tool
//! shares no code with the archiver.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};

/// CLI arguments for the crc tool
#[derive(Parser, Debug)]
#[command(author, version, about = "append or verify a file checksum", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Append the CRC remainder to a copy of the file (`<name>.crcN`)
    #[command(alias = "enc")]
    Encode(CrcArgs),

    /// Verify a `.crcN` file and restore the original bytes
    #[command(alias = "dec")]
    Decode(CrcArgs),
}

#[derive(Args, Debug)]
struct CrcArgs {
    /// Path to the file
    input: PathBuf,

    /// CRC width in bytes: 1, 2 or 4
    #[arg(short, long, default_value_t = 2)]
    width: u32,
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Command::Encode(args) => encode(args),
        Command::Decode(args) => decode(args),
    };

    if let Err(err) = result {
        eprintln!("ERROR: {err:#}");
        process::exit(1);
    }
}

/// Generator polynomial without its top x^r bit.
///
/// CRC-8:  x^8 + x^2 + x + 1          -> 0x07
/// CRC-16: x^16 + x^12 + x^5 + 1      -> 0x1021
/// CRC-32: x^32 + ... + 1             -> 0x04C11DB7
fn generator_low_part(width: u32) -> Result<u64> {
    Ok(match width {
        1 => 0x07,
        2 => 0x1021,
        4 => 0x04C1_1DB7,
        other => bail!("unsupported CRC width: {other} (allowed: 1, 2, 4)"),
    })
}

/// Remainder of data * x^r divided by the generator, in GF(2), r = width*8.
fn crc_remainder(data: &[u8], width: u32) -> Result<u64> {
    let poly = generator_low_part(width)?;
    let r = width * 8;
    let mask = (1u64 << r) - 1;

    let mut reg: u64 = 0;

    // feed the data bits, MSB first
    for &byte in data {
        for i in (0..8).rev() {
            let in_bit = u64::from((byte >> i) & 1);
            let top = (reg >> (r - 1)) & 1;
            reg = ((reg << 1) | in_bit) & mask;
            if top == 1 {
                reg ^= poly;
            }
        }
    }

    // append r zero bits
    for _ in 0..r {
        let top = (reg >> (r - 1)) & 1;
        reg = (reg << 1) & mask;
        if top == 1 {
            reg ^= poly;
        }
    }

    Ok(reg & mask)
}

fn to_be_bytes(value: u64, width: u32) -> Vec<u8> {
    (0..width).map(|i| (value >> (8 * (width - 1 - i))) as u8).collect()
}

fn from_be_bytes(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b))
}

fn encode(args: CrcArgs) -> Result<()> {
    let data = fs::read(&args.input).with_context(|| format!("cannot read {}", args.input.display()))?;

    let started = Instant::now();
    let crc = crc_remainder(&data, args.width)?;
    let elapsed = started.elapsed();

    let mut out = data.clone();
    out.extend_from_slice(&to_be_bytes(crc, args.width));

    let output_path = PathBuf::from(format!("{}.crc{}", args.input.display(), args.width));
    fs::write(&output_path, &out)?;

    let hex_digits = (args.width * 2) as usize;
    println!("=== ENCODE ===");
    println!("Input : {}", args.input.display());
    println!("Output: {}", output_path.display());
    println!("CRC({}): 0x{crc:0>hex_digits$X}", args.width * 8);
    println!("Input size : {} bytes", data.len());
    println!("Output size: {} bytes", out.len());
    println!("Overhead   : +{} bytes", args.width);
    println!("Time (encode+CRC): {:.3} ms", elapsed.as_secs_f64() * 1000.0);

    Ok(())
}

fn decode(args: CrcArgs) -> Result<()> {
    let all = fs::read(&args.input).with_context(|| format!("cannot read {}", args.input.display()))?;

    let width = args.width as usize;
    if all.len() < width {
        bail!("file is too short for a {width}-byte CRC");
    }

    let (data, tail) = all.split_at(all.len() - width);
    let stored = from_be_bytes(tail);

    let started = Instant::now();
    let calculated = crc_remainder(data, args.width)?;
    let elapsed = started.elapsed();

    let hex_digits = (args.width * 2) as usize;
    println!("=== DECODE / CHECK ===");
    println!("Input : {}", args.input.display());
    println!("Stored CRC: 0x{stored:0>hex_digits$X}");
    println!("Calc   CRC: 0x{calculated:0>hex_digits$X}");
    println!("Time (check): {:.3} ms", elapsed.as_secs_f64() * 1000.0);

    if stored != calculated {
        bail!("data is corrupted, the restored file will not be written");
    }

    println!("The file has not been corrupted");

    let output_path = restored_path(&args.input, args.width);
    fs::write(&output_path, data)?;
    println!("Restored file: {}", output_path.display());

    Ok(())
}

/// `<name>.crcN` becomes `<name>.decoded`; anything else just gets
/// `.decoded` appended.
fn restored_path(input: &Path, width: u32) -> PathBuf {
    let name = input
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let suffix = format!(".crc{width}");
    let base = name.strip_suffix(&suffix).unwrap_or(&name);
    input.with_file_name(format!("{base}.decoded"))
}
