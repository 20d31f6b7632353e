//! cli component of the huffdict project.
//!
//! > `$exename -i <input> -o <output> -m <mode> -d <dictionary> [--buffer-size <bytes>]`
//!
//! `<mode>` is `c` or `k` for compression and `d` for decompression; only its first character is
//! looked at, so `compress` and `decompress` work too. `-t` is accepted in place of `-m` and `-s`
//! in place of `-d`.
//!
//! # Compression
//!
//! the input is read twice. the first pass learns the byte frequencies chunk by chunk, the second
//! pass encodes the input with the finished dictionary. the packed bits go to the output file and
//! the dictionary is written to the dictionary file as json.
//!
//! # Decompression
//!
//! the dictionary file is read back, and exactly as many bytes as the dictionary has learned are
//! decoded from the input. the last byte of a compressed file is padded with zero bits, which is
//! why the symbol count is needed to know where the data ends.
use clap::{ArgAction, Parser};
use std::io;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

use huffdict::dictionary_file::DictionaryFileError;
use huffdict::stream::{DEFAULT_BUFFER_SIZE, StreamOptions};

pub mod compress;
pub mod decompress;

/// Error types for CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Dictionary error: {0}")]
    Dictionary(#[from] DictionaryFileError),

    #[error("Invalid mode: {0:?} (expected 'c' or 'k' for compression, 'd' for decompression)")]
    InvalidMode(String),

    #[error("Invalid buffer size: {0:?} (expected a positive number of bytes)")]
    InvalidBufferSize(String),

    #[error(transparent)]
    Stream(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;

impl CliError {
    pub fn io(path: &std::path::Path) -> impl FnOnce(io::Error) -> CliError + '_ {
        move |source| CliError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// What to do with the input file
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Compress,
    Decompress,
}

impl FromStr for Mode {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.chars().next() {
            Some('c' | 'k') => Ok(Mode::Compress),
            Some('d') => Ok(Mode::Decompress),
            _ => Err(CliError::InvalidMode(s.to_string())),
        }
    }
}

fn parse_buffer_size(s: &str) -> Result<usize> {
    match s.parse::<usize>() {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(CliError::InvalidBufferSize(s.to_string())),
    }
}

/// CLI arguments for the huffdict application
#[derive(Parser, Debug)]
#[command(author, version, about = "Compress files using Huffman compression.", long_about = None, disable_version_flag = true)]
pub struct Cli {
    /// Input file
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Output file
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// 'c' or 'k' for compression, 'd' for decompression
    #[arg(short, long, visible_short_alias = 't', value_name = "MODE")]
    pub mode: Mode,

    /// File to write the dictionary to when compressing, or to read it from when decompressing
    #[arg(short, long, visible_short_alias = 's', value_name = "FILE")]
    pub dictionary: PathBuf,

    /// Size of the read and write buffers in bytes
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_BUFFER_SIZE, value_parser = parse_buffer_size)]
    pub buffer_size: usize,

    /// Show the program's version
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    #[allow(dead_code)]
    version: Option<bool>,
}

impl Cli {
    pub fn stream_options(&self) -> StreamOptions {
        StreamOptions::with_buffer_size(self.buffer_size)
    }
}

/// Runs the mode selected on the command line.
pub fn execute_command(cli: &Cli) -> Result<()> {
    match cli.mode {
        Mode::Compress => compress::compress(cli),
        Mode::Decompress => decompress::decompress(cli),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_short_options() {
        let cli = Cli::try_parse_from(["huffdict", "-i", "in.txt", "-o", "out.huf", "-m", "c", "-d", "dict.json"]).unwrap();

        assert_eq!(cli.input, PathBuf::from("in.txt"));
        assert_eq!(cli.output, PathBuf::from("out.huf"));
        assert_eq!(cli.mode, Mode::Compress);
        assert_eq!(cli.dictionary, PathBuf::from("dict.json"));
        assert_eq!(cli.buffer_size, DEFAULT_BUFFER_SIZE);
    }

    #[test]
    fn parses_aliases() {
        let cli = Cli::try_parse_from(["huffdict", "-i", "a", "-o", "b", "-t", "k", "-s", "c", "--buffer-size", "16"]).unwrap();
        assert_eq!(cli.mode, Mode::Compress);
        assert_eq!(cli.dictionary, PathBuf::from("c"));
        assert_eq!(cli.stream_options(), StreamOptions::with_buffer_size(16));

        let cli = Cli::try_parse_from(["huffdict", "--input=a", "--output=b", "--mode=decompress", "--dictionary=c"]).unwrap();
        assert_eq!(cli.mode, Mode::Decompress);
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(Cli::try_parse_from(["huffdict", "-i", "a", "-o", "b", "-m", "x", "-d", "c"]).is_err());
        assert!(Cli::try_parse_from(["huffdict", "-i", "a", "-o", "b", "-m", "c"]).is_err());
        assert!(Cli::try_parse_from(["huffdict", "-i", "a", "-o", "b", "-m", "c", "-d", "c", "--buffer-size", "0"]).is_err());
    }

    #[test]
    fn version_flag() {
        let err = Cli::try_parse_from(["huffdict", "-v"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn mode_from_str() {
        assert_eq!("c".parse::<Mode>().unwrap(), Mode::Compress);
        assert_eq!("k".parse::<Mode>().unwrap(), Mode::Compress);
        assert_eq!("d".parse::<Mode>().unwrap(), Mode::Decompress);
        assert!(matches!("".parse::<Mode>(), Err(CliError::InvalidMode(_))));
    }
}
