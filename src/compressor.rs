pub use anyhow::Result;
use core::error::Error;

/// Represents an error emitted while encoding data with a dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompressionError {
    /// The input contains a byte the dictionary never learned, so it has no code.
    UnknownSymbol(u8),

    /// A code is longer than the whole write buffer, so it can never be written.
    BufferTooSmall { code_bits: usize, buffer_bits: usize },
}

impl Error for CompressionError {}

impl core::fmt::Display for CompressionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnknownSymbol(byte) => {
                write!(f, "Byte 0x{:02X} is not part of the dictionary and cannot be encoded", byte)
            }
            Self::BufferTooSmall { code_bits, buffer_bits } => {
                write!(
                    f,
                    "A {}-bit code does not fit in a write buffer of {} bits",
                    code_bits, buffer_bits
                )
            }
        }
    }
}

/// Represents an error emitted while decoding data with a dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecompressionError {
    /// The input ended before the number of symbols recorded in the dictionary was decoded.
    Truncated { missing: u64 },
}

impl Error for DecompressionError {}

impl core::fmt::Display for DecompressionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Truncated { missing } => {
                write!(f, "Input data ended with {} symbols left to decode", missing)
            }
        }
    }
}

/// Represents shared behavior for all compressors.
///
/// Provides a method [`compress_bytes`](Compressor::compress_bytes) to compress data and
/// [`decompress_bytes`](Compressor::decompress_bytes) to decompress data.
///
/// # Note
///
/// No guarantees are made about the length of the resulting [`Vec<u8>`] from
/// [`compress_bytes`](Compressor::compress_bytes). It can be shorter, equal in length, or longer.
/// The only guarantee is that [`decompress_bytes`](Compressor::decompress_bytes) will be able to
/// reconstruct the original data, given the same compressor.
pub trait Compressor: 'static {
    /// Compresses a given byte slice and returns the encoded data.
    fn compress_bytes(&mut self, data: &[u8]) -> Result<Vec<u8>>;

    /// Decompresses a given byte slice and returns the decoded data.
    ///
    /// # Errors
    ///
    /// Returns an error if the input data was truncated.
    fn decompress_bytes(&mut self, data: &[u8]) -> Result<Vec<u8>>;

    /// Human readable name, used in diagnostics.
    fn compressor_name(&self) -> String {
        core::any::type_name::<Self>().to_string()
    }

    /// Performs a round-trip test on the compressor.
    ///
    /// Use for sanity checking the compressor and decompressor.
    fn test_roundtrip<'orig>(&mut self, data: &'orig [u8]) -> Result<RoundTripTestResult<'orig>> {
        let compressed = <Self as Compressor>::compress_bytes(self, data)?;
        let decompressed = <Self as Compressor>::decompress_bytes(self, &compressed)?;
        let equal = data == decompressed.as_slice();

        Ok(RoundTripTestResult {
            equal,
            original: data,
            compressed,
            decompressed,
        })
    }

    /// Converts the compressor into a boxed trait object.
    fn into_boxed(self) -> Box<dyn Compressor>
    where
        Self: Sized,
    {
        Box::new(self)
    }
}

/// Represents the result of a round-trip test.
///
/// Use accessor methods to retrieve the [`result`][RoundTripTestResult::is_successful],
/// the [`original data`][RoundTripTestResult::get_original],
/// the [`compressed data`][RoundTripTestResult::get_compressed],
/// and the [`decompressed data`][RoundTripTestResult::get_decompressed].
#[derive(Clone, Debug, Hash)]
pub struct RoundTripTestResult<'orig> {
    pub(crate) equal: bool,
    pub(crate) original: &'orig [u8],
    pub(crate) compressed: Vec<u8>,
    pub(crate) decompressed: Vec<u8>,
}

impl<'orig> RoundTripTestResult<'orig> {
    /// Whether the original and decompressed data were equal.
    pub const fn is_successful(&self) -> bool {
        self.equal
    }

    /// The original data before any action was taken.
    pub const fn get_original(&self) -> &'orig [u8] {
        self.original
    }

    /// The data after it has been encoded by the compressor.
    pub fn get_compressed(&self) -> &[u8] {
        self.compressed.as_slice()
    }

    /// The data after it has been decoded by the decompressor.
    pub fn get_decompressed(&self) -> &[u8] {
        self.decompressed.as_slice()
    }
}
