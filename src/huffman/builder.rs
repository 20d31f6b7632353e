use crate::huffman::{frequency::FrequencyTable, node::HuffmanNode};

if_tracing! {
    use tracing::trace;
}

/// Builds the Huffman tree for `frequencies`.
///
/// Candidates are kept in a vector sorted by ascending frequency. Every insertion goes to the first
/// position whose frequency is greater than or equal to the newcomer's, so among equal frequencies
/// the most recently inserted node comes first. Leaves are inserted in increasing byte order. The
/// two front candidates are joined (first one on the left) until one node is left.
///
/// No input gives [`HuffmanNode::empty`]. A single distinct byte gets a phantom sibling, see
/// [`HuffmanNode::with_phantom_sibling`].
pub fn build_tree(frequencies: &FrequencyTable) -> HuffmanNode {
    let mut candidates: Vec<HuffmanNode> = Vec::with_capacity(frequencies.distinct());
    for (byte, count) in frequencies.iter() {
        insert_sorted(&mut candidates, HuffmanNode::leaf(byte, count));
    }

    if_tracing! {
        trace!(target = "huffman", leaves = candidates.len(), total = frequencies.total(), "building tree");
    }

    while candidates.len() > 1 {
        let left = candidates.remove(0);
        let right = candidates.remove(0);
        insert_sorted(&mut candidates, HuffmanNode::join(left, right));
    }

    candidates.pop().unwrap_or_default().with_phantom_sibling()
}

/// Rebuilds `existing` with the byte counts of `data` added on top of its leaves.
pub fn merge_frequencies(existing: &HuffmanNode, data: &[u8]) -> HuffmanNode {
    let mut frequencies = FrequencyTable::from_tree(existing);
    frequencies.add_bytes(data);
    build_tree(&frequencies)
}

fn insert_sorted(candidates: &mut Vec<HuffmanNode>, node: HuffmanNode) {
    let position = candidates
        .iter()
        .position(|candidate| candidate.frequency() >= node.frequency())
        .unwrap_or(candidates.len());
    candidates.insert(position, node);
}
