use crate::huffman::{
    builder::{build_tree, merge_frequencies},
    decoder::decode_bounded,
    encoder::{CodeTable, encode_with},
    frequency::FrequencyTable,
};
use crate::huffman::node::HuffmanNode;

if_tracing! {
    use tracing::debug;
}

/// A Huffman tree together with the operations to grow it and to code data with it.
///
/// Learning (`create`, `create_part`) needs `&mut self`, coding only needs `&self`, so the borrow
/// checker already keeps the tree from changing in the middle of an encode or decode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HuffmanDictionary {
    root: HuffmanNode,
    codes: CodeTable,
}

impl HuffmanDictionary {
    /// A dictionary that has learned nothing yet.
    pub fn new() -> Self {
        Self::from_root(HuffmanNode::empty())
    }

    /// Learns the frequencies of `src`, see [`HuffmanDictionary::create`].
    pub fn from_bytes(src: &[u8]) -> Self {
        let mut dictionary = Self::new();
        dictionary.create(src);
        dictionary
    }

    /// Uses an existing tree, for example one read back from a dictionary file.
    ///
    /// A lone leaf gets a phantom sibling, the same way [`build_tree`] treats a single distinct byte.
    pub fn from_root(root: HuffmanNode) -> Self {
        let root = root.with_phantom_sibling();
        let codes = CodeTable::new(&root);
        Self { root, codes }
    }

    pub fn from_frequencies(frequencies: &FrequencyTable) -> Self {
        Self::from_root(build_tree(frequencies))
    }

    /// Forgets everything learned so far and learns `src` instead.
    pub fn create(&mut self, src: &[u8]) {
        self.set_root(build_tree(&FrequencyTable::from_bytes(src)));
        if_tracing! {
            debug!(target = "huffman", input_len = src.len(), size = self.size(), "dictionary created");
        }
    }

    /// Adds the frequencies of `src` to what was learned so far and rebuilds the tree.
    ///
    /// Learning a file chunk by chunk gives the same tree as learning it in one piece.
    pub fn create_part(&mut self, src: &[u8]) {
        self.set_root(merge_frequencies(&self.root, src));
        if_tracing! {
            debug!(target = "huffman", input_len = src.len(), size = self.size(), "dictionary extended");
        }
    }

    fn set_root(&mut self, root: HuffmanNode) {
        self.codes = CodeTable::new(&root);
        self.root = root;
    }

    pub fn root(&self) -> &HuffmanNode {
        &self.root
    }

    pub fn into_root(self) -> HuffmanNode {
        self.root
    }

    /// Total number of symbols learned.
    pub fn size(&self) -> u64 {
        self.root.frequency()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Learned frequency of every byte value.
    pub fn frequencies(&self) -> FrequencyTable {
        FrequencyTable::from_tree(&self.root)
    }

    /// Code of `byte` as root-to-leaf decisions, `true` meaning left.
    pub fn code(&self, byte: u8) -> Option<&[bool]> {
        self.codes.get(byte)
    }

    /// Encodes `src` into `dst`, starting at bit `offset` of `dst`.
    ///
    /// Stops at the first byte whose code does not fit in the rest of `dst` (or that was never
    /// learned). Returns how many bytes of `src` were consumed and the bit offset after the last
    /// complete code. Bits past that offset in `dst` are never written, so the next call can simply
    /// continue at the returned offset.
    pub fn encode(&self, src: &[u8], dst: &mut [u8], offset: usize) -> (usize, usize) {
        encode_with(&self.codes, src, dst, offset)
    }

    /// Decodes from `src`, starting at bit `offset`, into `dst`.
    ///
    /// Stops when `dst` is full or `src` ends in the middle of a code. Returns the bit offset after
    /// the last complete code and the number of bytes written to `dst`.
    ///
    /// The zero bits padding the last byte of encoded data are not told apart from codes. Callers
    /// must keep `dst` no longer than the number of symbols still expected (at most
    /// [`size`](Self::size) in total), or the padding decodes as extra symbols.
    pub fn decode(&self, src: &[u8], dst: &mut [u8], offset: usize) -> (usize, usize) {
        decode_bounded(&self.root, src, dst, offset)
    }
}

impl Default for HuffmanDictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl From<HuffmanNode> for HuffmanDictionary {
    fn from(root: HuffmanNode) -> Self {
        Self::from_root(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &[u8] = b"ABBCCCDDDDEEEEEFFFFFFGGGGGGG";
    const SAMPLE_ENCODED: [u8; 10] = [0x7F, 0xB7, 0x8D, 0x24, 0x01, 0x00, 0x55, 0xA5, 0xAA, 0x02];

    #[test]
    fn create_empty() {
        let mut dictionary = HuffmanDictionary::new();
        dictionary.create(&[]);

        assert!(dictionary.is_empty());
        assert_eq!(dictionary.size(), 0);
    }

    #[test]
    fn default_is_empty() {
        let dictionary = HuffmanDictionary::default();
        assert!(dictionary.is_empty());
        assert_eq!(dictionary.size(), 0);
    }

    #[test]
    fn from_bytes() {
        let dictionary = HuffmanDictionary::from_bytes(SAMPLE);
        assert!(!dictionary.is_empty());
        assert_eq!(dictionary.size(), 28);
    }

    #[test]
    fn decode_empty() {
        let dictionary = HuffmanDictionary::new();
        let (offset, produced) = dictionary.decode(&[], &mut [], 0);

        assert_eq!((offset, produced), (0, 0));
        assert!(dictionary.is_empty());
    }

    #[test]
    fn encode_empty() {
        let dictionary = HuffmanDictionary::new();
        let (consumed, offset) = dictionary.encode(&[], &mut [], 0);

        assert_eq!((consumed, offset), (0, 0));
        assert!(dictionary.is_empty());
    }

    #[test]
    fn encode() {
        let mut dictionary = HuffmanDictionary::new();
        dictionary.create(SAMPLE);
        let mut buffer = [0u8; SAMPLE_ENCODED.len()];

        let (consumed, offset) = dictionary.encode(SAMPLE, &mut buffer, 0);

        assert_eq!(consumed, SAMPLE.len());
        assert_eq!(offset, 9 * 8 + 2);
        assert_eq!(buffer, SAMPLE_ENCODED);
    }

    #[test]
    fn decode() {
        let dictionary = HuffmanDictionary::from_bytes(SAMPLE);
        let mut decoded = vec![0u8; SAMPLE.len()];

        let (offset, produced) = dictionary.decode(&SAMPLE_ENCODED, &mut decoded, 0);

        assert_eq!(produced, SAMPLE.len());
        assert_eq!(offset, 9 * 8 + 2);
        assert_eq!(decoded, SAMPLE);
    }

    #[test]
    fn encode_and_decode_with_slack() {
        let dictionary = HuffmanDictionary::from_bytes(SAMPLE);
        let mut buffer = [0u8; 1024];
        let mut decoded = vec![0u8; SAMPLE.len()];

        dictionary.encode(SAMPLE, &mut buffer, 0);
        dictionary.decode(&buffer, &mut decoded, 0);

        assert_eq!(decoded, SAMPLE);
    }

    #[test]
    fn encode_in_small_buffers() {
        let dictionary = HuffmanDictionary::from_bytes(SAMPLE);
        let mut output = Vec::new();
        let mut buffer = [0u8; 2];
        let mut src = SAMPLE;
        let mut offset = 0;

        while !src.is_empty() {
            let (consumed, reached) = dictionary.encode(src, &mut buffer, offset);
            let full = reached / 8;
            output.extend_from_slice(&buffer[..full]);
            buffer[0] = buffer[full.min(buffer.len() - 1)];
            offset = reached % 8;
            src = &src[consumed..];
        }
        if offset > 0 {
            output.push(buffer[0]);
        }

        assert_eq!(output, SAMPLE_ENCODED);
    }

    #[test]
    fn create_part_matches_create() {
        let mut whole = HuffmanDictionary::new();
        whole.create(SAMPLE);

        let mut parts = HuffmanDictionary::new();
        for chunk in SAMPLE.chunks(5) {
            parts.create_part(chunk);
        }

        assert_eq!(parts.frequencies(), whole.frequencies());
        assert_eq!(parts, whole);
    }

    #[test]
    fn create_replaces() {
        let mut dictionary = HuffmanDictionary::from_bytes(SAMPLE);
        dictionary.create(b"xy");
        assert_eq!(dictionary.size(), 2);
        assert_eq!(dictionary.frequencies().get(b'A'), 0);
    }

    #[test]
    fn single_symbol_round_trip() {
        let dictionary = HuffmanDictionary::from_bytes(b"zzzzz");
        assert_eq!(dictionary.size(), 5);
        assert_eq!(dictionary.code(b'z'), Some(&[true][..]));

        let mut buffer = [0u8; 1];
        assert_eq!(dictionary.encode(b"zzzzz", &mut buffer, 0), (5, 5));
        assert_eq!(buffer, [0b1_1111]);

        let mut decoded = [0u8; 5];
        assert_eq!(dictionary.decode(&buffer, &mut decoded, 0), (5, 5));
        assert_eq!(&decoded, b"zzzzz");
    }

    #[test]
    fn padding_is_only_skipped_with_a_bounded_destination() {
        let dictionary = HuffmanDictionary::from_bytes(b"zzz");
        let mut buffer = [0u8; 1];
        assert_eq!(dictionary.encode(b"zzz", &mut buffer, 0), (3, 3));

        let mut decoded = [0u8; 3];
        assert_eq!(dictionary.decode(&buffer, &mut decoded, 0), (3, 3));
        assert_eq!(&decoded, b"zzz");

        // The five padding bits read as the phantom byte once `dst` is longer than `size()`.
        let mut unbounded = [0u8; 8];
        assert_eq!(dictionary.decode(&buffer, &mut unbounded, 0), (8, 8));
        assert_eq!(&unbounded[3..], &[b'{'; 5]);
    }

    #[test]
    fn lone_leaf_root_is_normalized() {
        let dictionary = HuffmanDictionary::from(HuffmanNode::leaf(b'q', 3));
        assert_eq!(dictionary.size(), 3);
        assert_eq!(dictionary.code(b'q'), Some(&[true][..]));
    }
}
