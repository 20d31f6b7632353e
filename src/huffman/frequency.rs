use crate::huffman::node::HuffmanNode;

/// Occurrence counters for every byte value. Counters and totals saturate at `u64::MAX`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FrequencyTable {
    counts: [u64; 256],
}

impl FrequencyTable {
    pub const fn new() -> Self {
        Self { counts: [0; 256] }
    }

    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::new();
        table.add_bytes(data);
        table
    }

    /// Flattens a tree back into the counts it was built from.
    pub fn from_tree(root: &HuffmanNode) -> Self {
        let mut table = Self::new();
        table.add_tree(root);
        table
    }

    pub fn add_bytes(&mut self, data: &[u8]) {
        for &byte in data {
            self.add(byte, 1);
        }
    }

    /// Adds the frequency of every leaf of `root` to its byte's counter.
    pub fn add_tree(&mut self, root: &HuffmanNode) {
        root.for_each_leaf(&mut |byte, frequency| self.add(byte, frequency));
    }

    pub fn add(&mut self, byte: u8, count: u64) {
        let counter = &mut self.counts[byte as usize];
        *counter = counter.saturating_add(count);
    }

    pub const fn get(&self, byte: u8) -> u64 {
        self.counts[byte as usize]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().fold(0u64, |total, &count| total.saturating_add(count))
    }

    /// Number of byte values with a nonzero count.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&count| count > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&count| count == 0)
    }

    /// Nonzero entries in increasing byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        (0..=u8::MAX)
            .zip(self.counts.iter().copied())
            .filter(|&(_, count)| count > 0)
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<(u8, u64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (u8, u64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (byte, count) in iter {
            table.add(byte, count);
        }
        table
    }
}
