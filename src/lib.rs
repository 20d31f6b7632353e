//! Byte-oriented Huffman compression with resumable, buffer-bounded coding.
//!
//! - [`huffman`]: tree construction, bit cursors, the encoder/decoder and the
//!   [`HuffmanDictionary`](huffman::HuffmanDictionary) facade.
//! - [`dictionary_file`]: the JSON file a dictionary is stored in.
//! - [`stream`]: drives a dictionary over readers and writers with fixed-size buffers.
//! - [`codec`]: whole-buffer [`Compressor`](compressor::Compressor) on top of the above.

extern crate anyhow;
extern crate cfg_if;
extern crate serde;
extern crate serde_json;
extern crate thiserror;

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

pub mod codec;
pub mod compressor;
pub mod dictionary_file;
pub mod huffman;
pub mod stream;


pub use crate::codec::HuffmanCoding;
pub use crate::huffman::{HuffmanDictionary, HuffmanNode};
