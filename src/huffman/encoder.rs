use crate::huffman::{bits::BitWriter, node::HuffmanNode};

/// The code of every byte value in a tree, derived once so encoding does not search the tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeTable {
    codes: Vec<Option<Box<[bool]>>>,
}

impl CodeTable {
    pub fn new(root: &HuffmanNode) -> Self {
        let mut codes = vec![None; 256];
        if !root.is_leaf() {
            collect(root, &mut Vec::new(), &mut codes);
        }
        Self { codes }
    }

    /// Root-to-leaf decisions for `byte` (`true` = left), if the tree contains it.
    pub fn get(&self, byte: u8) -> Option<&[bool]> {
        self.codes[byte as usize].as_deref()
    }
}

fn collect(node: &HuffmanNode, path: &mut Vec<bool>, codes: &mut [Option<Box<[bool]>>]) {
    match node {
        HuffmanNode::Leaf { byte, .. } => codes[*byte as usize] = Some(path.as_slice().into()),
        HuffmanNode::Internal { left, right, .. } => {
            path.push(true);
            collect(left, path, codes);
            path.pop();
            path.push(false);
            collect(right, path, codes);
            path.pop();
        }
    }
}

/// Streams codes from a [`CodeTable`] into a [`BitWriter`].
#[derive(Debug)]
pub struct Encoder<'c, 'b> {
    codes: &'c CodeTable,
    writer: BitWriter<'b>,
}

impl<'c, 'b> Encoder<'c, 'b> {
    pub fn new(codes: &'c CodeTable, writer: BitWriter<'b>) -> Self {
        Self { codes, writer }
    }

    /// Appends the code of `byte`.
    ///
    /// Returns `false` if the whole code does not fit or the byte has no code. Nothing is written
    /// in that case, so the writer still ends on the previous code boundary.
    pub fn encode(&mut self, byte: u8) -> bool {
        match self.codes.get(byte) {
            Some(code) => self.writer.push_bits(code),
            None => false,
        }
    }

    /// Absolute bit position after the last complete code.
    pub fn bits_written(&self) -> usize {
        self.writer.bits_written()
    }
}

/// Appends the code of `byte` in `root` to `writer`, searching the tree for it.
///
/// All-or-nothing like [`Encoder::encode`].
pub fn encode_symbol(root: &HuffmanNode, byte: u8, writer: &mut BitWriter<'_>) -> bool {
    root.code_of(byte).is_some_and(|code| writer.push_bits(&code))
}

/// Encodes `src` into `dst` starting at bit `offset`, until `src` runs out or the next code does not
/// fit.
///
/// Returns the number of bytes of `src` consumed and the bit offset after the last complete code.
pub fn encode_bounded(root: &HuffmanNode, src: &[u8], dst: &mut [u8], offset: usize) -> (usize, usize) {
    encode_with(&CodeTable::new(root), src, dst, offset)
}

pub(crate) fn encode_with(codes: &CodeTable, src: &[u8], dst: &mut [u8], offset: usize) -> (usize, usize) {
    let mut encoder = Encoder::new(codes, BitWriter::new(dst, offset));
    for (consumed, &byte) in src.iter().enumerate() {
        if !encoder.encode(byte) {
            return (consumed, encoder.bits_written());
        }
    }

    (src.len(), encoder.bits_written())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_tree() -> HuffmanNode {
        HuffmanNode::join(
            HuffmanNode::leaf(b'a', 7),
            HuffmanNode::join(HuffmanNode::leaf(b'b', 3), HuffmanNode::leaf(b'c', 1)),
        )
    }

    #[test]
    fn table_matches_search() {
        let tree = small_tree();
        let table = CodeTable::new(&tree);
        for byte in [b'a', b'b', b'c', b'd'] {
            assert_eq!(table.get(byte).map(<[bool]>::to_vec), tree.code_of(byte));
        }
    }

    #[test]
    fn table_of_leaf_is_empty() {
        let table = CodeTable::new(&HuffmanNode::leaf(b'a', 3));
        assert!((0..=u8::MAX).all(|byte| table.get(byte).is_none()));
    }

    #[test]
    fn encodes_small_tree() {
        let mut buffer = [0u8; 2];
        let (consumed, offset) = encode_bounded(&small_tree(), b"aaaaaaabbbc", &mut buffer, 0);

        assert_eq!(consumed, 11);
        assert_eq!(offset, 15);
        assert_eq!(buffer, [0x7F, 0x15]);
    }

    #[test]
    fn stops_on_code_boundary() {
        let mut buffer = [0xFFu8; 1];
        // 'a' x7 takes 7 bits, the two bits of 'b' do not fit in the last one.
        let (consumed, offset) = encode_bounded(&small_tree(), b"aaaaaaab", &mut buffer, 0);

        assert_eq!(consumed, 7);
        assert_eq!(offset, 7);
        assert_eq!(buffer, [0x7F]);
    }

    #[test]
    fn unknown_byte_stops() {
        let mut buffer = [0u8; 4];
        let (consumed, offset) = encode_bounded(&small_tree(), b"abzc", &mut buffer, 0);
        assert_eq!((consumed, offset), (2, 3));
    }

    #[test]
    fn empty_tree_encodes_nothing() {
        let (consumed, offset) = encode_bounded(&HuffmanNode::empty(), &[], &mut [], 0);
        assert_eq!((consumed, offset), (0, 0));

        let mut buffer = [0u8; 4];
        let (consumed, offset) = encode_bounded(&HuffmanNode::empty(), b"abc", &mut buffer, 5);
        assert_eq!((consumed, offset), (0, 5));
    }

    #[test]
    fn resumes_mid_byte() {
        let tree = small_tree();
        let mut buffer = [0u8; 2];
        let (_, offset) = encode_bounded(&tree, b"aaaaa", &mut buffer, 0);
        assert_eq!(offset, 5);
        let (consumed, offset) = encode_bounded(&tree, b"aabbbc", &mut buffer, offset);
        assert_eq!((consumed, offset), (6, 15));
        assert_eq!(buffer, [0x7F, 0x15]);
    }

    #[test]
    fn single_symbol_encoder() {
        let tree = small_tree();
        let mut buffer = [0u8; 1];
        let mut writer = BitWriter::new(&mut buffer, 0);

        assert!(encode_symbol(&tree, b'b', &mut writer));
        assert!(encode_symbol(&tree, b'a', &mut writer));
        assert!(!encode_symbol(&tree, b'x', &mut writer));
        assert_eq!(writer.bits_written(), 3);
        assert_eq!(buffer, [0b110]);
    }
}
