use core::fmt::Display;
use std::io::Cursor;

use crate::compressor::{Compressor, Result};
use crate::huffman::HuffmanDictionary;
use crate::stream::{self, StreamOptions};

/// Whole-buffer Huffman coding.
///
/// Compressing learns a fresh dictionary from the input and keeps it, decompressing uses the kept
/// dictionary. The dictionary is not part of the compressed bytes: store it next to them, see
/// [`crate::dictionary_file`].
#[derive(Clone, Debug, Default)]
pub struct HuffmanCoding {
    dictionary: HuffmanDictionary,
    options: StreamOptions,
}

impl HuffmanCoding {
    pub fn new(options: StreamOptions) -> Self {
        Self {
            dictionary: HuffmanDictionary::new(),
            options,
        }
    }

    /// A codec that decompresses with an existing dictionary.
    pub fn with_dictionary(dictionary: HuffmanDictionary) -> Self {
        Self {
            dictionary,
            options: StreamOptions::default(),
        }
    }

    pub fn dictionary(&self) -> &HuffmanDictionary {
        &self.dictionary
    }

    pub fn huffman_encode(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        self.dictionary.create(data);

        let mut compressed = Vec::with_capacity(data.len() / 2);
        stream::compress(&self.dictionary, data, &mut compressed, &self.options)?;
        Ok(compressed)
    }

    pub fn huffman_decode(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        let mut decompressed = Vec::new();
        stream::decompress(&self.dictionary, Cursor::new(data), &mut decompressed, &self.options)?;
        Ok(decompressed)
    }
}

impl Compressor for HuffmanCoding {
    fn compress_bytes(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        self.huffman_encode(data)
    }

    fn decompress_bytes(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        self.huffman_decode(data)
    }

    fn compressor_name(&self) -> String {
        self.to_string()
    }
}

impl Display for HuffmanCoding {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Huffman Coding")
    }
}
