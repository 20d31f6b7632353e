use crate::huffman::{bits::BitReader, node::HuffmanNode};

/// Walks a tree according to the bits of a [`BitReader`].
#[derive(Debug)]
pub struct Decoder<'t, 'b> {
    root: &'t HuffmanNode,
    reader: BitReader<'b>,
}

impl<'t, 'b> Decoder<'t, 'b> {
    pub fn new(root: &'t HuffmanNode, reader: BitReader<'b>) -> Self {
        Self { root, reader }
    }

    /// Decodes one symbol.
    ///
    /// Returns `None` if the reader runs out before a leaf is reached, or if the tree has no codes
    /// at all (empty or a lone leaf). The reader is then left at the start of the incomplete code.
    pub fn decode(&mut self) -> Option<u8> {
        decode_symbol(self.root, &mut self.reader)
    }

    /// Absolute bit position after the last complete code.
    pub fn bits_processed(&self) -> usize {
        self.reader.bits_processed()
    }
}

/// Decodes one symbol of `root` from `reader`. See [`Decoder::decode`].
pub fn decode_symbol(root: &HuffmanNode, reader: &mut BitReader<'_>) -> Option<u8> {
    if root.is_leaf() {
        return None;
    }

    let mut cursor = *reader;
    let mut node = root;
    while let HuffmanNode::Internal { .. } = node {
        node = node.child(cursor.next_bit()?)?;
    }

    *reader = cursor;
    node.byte()
}

/// Decodes from `src` starting at bit `offset` into `dst`, until `dst` is full or `src` ends in the
/// middle of a code.
///
/// Returns the bit offset after the last complete code and the number of bytes written to `dst`.
pub fn decode_bounded(root: &HuffmanNode, src: &[u8], dst: &mut [u8], offset: usize) -> (usize, usize) {
    let mut decoder = Decoder::new(root, BitReader::new(src, offset));
    for (produced, slot) in dst.iter_mut().enumerate() {
        match decoder.decode() {
            Some(byte) => *slot = byte,
            None => return (decoder.bits_processed(), produced),
        }
    }

    (decoder.bits_processed(), dst.len())
}
