//! Drives a [`HuffmanDictionary`] over readers and writers with fixed-size buffers.
//!
//! The dictionary only ever sees one buffer at a time. Between calls the driver carries the
//! unfinished trailing byte and its bit offset, so the output is the same as coding the whole input
//! in one go.

use std::io::{self, Read, Write};

use anyhow::{Context, anyhow, bail};

use crate::compressor::{CompressionError, DecompressionError, Result};
use crate::huffman::HuffmanDictionary;

if_tracing! {
    use tracing::{Level, debug, info, span};
}

pub const DEFAULT_BUFFER_SIZE: usize = 1024;

/// Sizes of the buffers used while streaming.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StreamOptions {
    /// Bytes read from the input per chunk.
    pub read_buffer: usize,
    /// Bytes of output produced per dictionary call.
    pub write_buffer: usize,
}

impl StreamOptions {
    pub const fn with_buffer_size(size: usize) -> Self {
        Self {
            read_buffer: size,
            write_buffer: size,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.read_buffer == 0 || self.write_buffer == 0 {
            bail!("buffer sizes must be greater than zero (got {:?})", self);
        }
        Ok(())
    }
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self::with_buffer_size(DEFAULT_BUFFER_SIZE)
    }
}

/// Byte counts of one streaming run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StreamStats {
    pub bytes_in: u64,
    pub bytes_out: u64,
}

/// Reads until `buf` is full or the reader is exhausted.
fn read_chunk<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Feeds everything `reader` yields to [`HuffmanDictionary::create_part`], `chunk_size` bytes at a
/// time. Returns the number of bytes learned.
pub fn learn<R: Read>(dictionary: &mut HuffmanDictionary, mut reader: R, chunk_size: usize) -> Result<u64> {
    let mut buffer = vec![0u8; chunk_size.max(1)];
    let mut learned = 0u64;

    loop {
        let read = read_chunk(&mut reader, &mut buffer).context("failed to read input")?;
        if read == 0 {
            break;
        }

        dictionary.create_part(&buffer[..read]);
        learned += read as u64;
    }

    if_tracing! {
        debug!(target = "stream", learned, size = dictionary.size(), "learning finished");
    }
    Ok(learned)
}

/// Encodes everything `reader` yields and writes the packed bits to `writer`.
///
/// The last byte is padded with zero bits. Fails if the input holds a byte the dictionary does not
/// know, or if a code is longer than the write buffer.
pub fn compress<R: Read, W: Write>(
    dictionary: &HuffmanDictionary,
    mut reader: R,
    mut writer: W,
    options: &StreamOptions,
) -> Result<StreamStats> {
    options.validate()?;
    if_tracing! {
        let compress_span = span!(Level::INFO, "compress", read_buffer = options.read_buffer, write_buffer = options.write_buffer);
        let _enter = compress_span.enter();
    }

    let mut read_buffer = vec![0u8; options.read_buffer];
    // One extra byte for the unfinished byte carried over from the previous call.
    let mut write_buffer = vec![0u8; options.write_buffer + 1];
    let mut stats = StreamStats::default();
    let mut offset = 0;

    loop {
        let read = read_chunk(&mut reader, &mut read_buffer).context("failed to read input")?;
        if read == 0 {
            break;
        }
        stats.bytes_in += read as u64;

        let mut pending = &read_buffer[..read];
        while let Some(&next) = pending.first() {
            let (consumed, reached) = dictionary.encode(pending, &mut write_buffer, offset);
            if consumed == 0 {
                let error = match dictionary.code(next) {
                    None => CompressionError::UnknownSymbol(next),
                    Some(code) => CompressionError::BufferTooSmall {
                        code_bits: code.len(),
                        buffer_bits: write_buffer.len() * 8 - offset,
                    },
                };
                return Err(anyhow!(error));
            }

            let full = reached / 8;
            writer.write_all(&write_buffer[..full]).context("failed to write output")?;
            stats.bytes_out += full as u64;

            offset = reached % 8;
            if offset > 0 {
                write_buffer[0] = write_buffer[full];
            }
            pending = &pending[consumed..];
        }
    }

    if offset > 0 {
        writer.write_all(&write_buffer[..1]).context("failed to write output")?;
        stats.bytes_out += 1;
    }
    writer.flush().context("failed to flush output")?;

    if_tracing! {
        info!(bytes_in = stats.bytes_in, bytes_out = stats.bytes_out, "compress finished");
    }
    Ok(stats)
}

/// Decodes exactly [`HuffmanDictionary::size`] symbols from `reader` into `writer`.
///
/// Input past the last symbol is ignored. Fails if the input ends early.
pub fn decompress<R: Read, W: Write>(
    dictionary: &HuffmanDictionary,
    mut reader: R,
    mut writer: W,
    options: &StreamOptions,
) -> Result<StreamStats> {
    options.validate()?;
    if_tracing! {
        let decompress_span = span!(Level::INFO, "decompress", symbols = dictionary.size());
        let _enter = decompress_span.enter();
    }

    let mut read_buffer = vec![0u8; options.read_buffer];
    let mut write_buffer = vec![0u8; options.write_buffer];
    // Holds at most one chunk plus the bytes of an unfinished code.
    let mut source: Vec<u8> = Vec::with_capacity(options.read_buffer * 2);
    let mut stats = StreamStats::default();
    let mut offset = 0;
    let mut symbols_left = dictionary.size();

    while symbols_left > 0 {
        let read = read_chunk(&mut reader, &mut read_buffer).context("failed to read input")?;
        if read == 0 {
            break;
        }
        stats.bytes_in += read as u64;
        source.extend_from_slice(&read_buffer[..read]);

        while symbols_left > 0 {
            let wanted = usize::try_from(symbols_left).map_or(write_buffer.len(), |left| left.min(write_buffer.len()));
            let (reached, produced) = dictionary.decode(&source, &mut write_buffer[..wanted], offset);
            if produced == 0 {
                break;
            }

            writer.write_all(&write_buffer[..produced]).context("failed to write output")?;
            stats.bytes_out += produced as u64;
            symbols_left -= produced as u64;

            source.drain(..reached / 8);
            offset = reached % 8;
        }
    }
    writer.flush().context("failed to flush output")?;

    if symbols_left > 0 {
        if_tracing! {
            tracing::error!(missing = symbols_left, "input ended early");
        }
        return Err(anyhow!(DecompressionError::Truncated { missing: symbols_left }));
    }

    if_tracing! {
        info!(bytes_in = stats.bytes_in, bytes_out = stats.bytes_out, "decompress finished");
    }
    Ok(stats)
}
