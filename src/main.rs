extern crate anyhow;
extern crate cfg_if;
extern crate clap;
extern crate thiserror;
extern crate voxell_rng;
extern crate walkdir;

#[macro_export]
macro_rules! if_tracing {
    {$($body:tt)*} => {
        ::cfg_if::cfg_if! {
            if #[cfg(feature = "tracing")] {
                $($body)*
            }
        }
    };
}

#[macro_export]
macro_rules! if_not_tracing {
    {$($body:tt)*} => {
        ::cfg_if::cfg_if! {
            if #[cfg(not(feature = "tracing"))] {
                $($body)*
            }
        }
    };
}

if_tracing! {
    use tracing_subscriber::{EnvFilter, fmt};
}

use std::process;

use crate::cli::{Cli, Command};
use clap::Parser;

mod cli;
mod codec;
#[cfg(test)]
mod tests;

fn main() {
    if_tracing! {
        let subscriber = fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_target(false)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Encode(args) => cli::encode::encode(args),
        Command::Decode(args) => cli::decode::decode(args),
        Command::Selftest(args) => cli::selftest::selftest(args),
        Command::Corpus(args) => cli::corpus::corpus(args),
    };

    if let Err(err) = result {
        eprintln!("ERROR: {err}");
        process::exit(1);
    }
}
