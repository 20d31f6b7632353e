//! Huffman trees and bit-level coding over caller-owned buffers.
//!
//! Everything in here works on fixed-size buffers and absolute bit offsets. Running out of room or
//! out of input is never an error: the bounded operations report how far they got, and a caller
//! continues with new buffers from the reported offset.

pub mod bits;
pub mod builder;
pub mod decoder;
pub mod dictionary;
pub mod encoder;
pub mod frequency;
pub mod node;

pub use self::bits::{BitReader, BitWriter};
pub use self::builder::{build_tree, merge_frequencies};
pub use self::decoder::{Decoder, decode_bounded, decode_symbol};
pub use self::dictionary::HuffmanDictionary;
pub use self::encoder::{CodeTable, Encoder, encode_bounded, encode_symbol};
pub use self::frequency::FrequencyTable;
pub use self::node::HuffmanNode;
