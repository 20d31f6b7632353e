/// A node of a Huffman tree.
///
/// A leaf stands for one byte value and the number of times it was learned. An internal node joins
/// exactly two subtrees it owns exclusively, and its frequency is always the sum of theirs.
///
/// A leaf with frequency 0 is the empty dictionary sentinel, see [`HuffmanNode::empty`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum HuffmanNode {
    Leaf {
        byte: u8,
        frequency: u64,
    },
    Internal {
        frequency: u64,
        left: Box<HuffmanNode>,
        right: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    /// The root of a dictionary that has learned nothing.
    pub const fn empty() -> Self {
        Self::Leaf { byte: 0, frequency: 0 }
    }

    pub const fn leaf(byte: u8, frequency: u64) -> Self {
        Self::Leaf { byte, frequency }
    }

    /// Joins two subtrees. `left` is reached with a `1` bit, `right` with a `0` bit.
    ///
    /// The frequency saturates at `u64::MAX`.
    pub fn join(left: HuffmanNode, right: HuffmanNode) -> Self {
        Self::Internal {
            frequency: left.frequency().saturating_add(right.frequency()),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub const fn frequency(&self) -> u64 {
        match self {
            Self::Leaf { frequency, .. } | Self::Internal { frequency, .. } => *frequency,
        }
    }

    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    /// Whether this node is the empty dictionary sentinel.
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Leaf { frequency: 0, .. })
    }

    /// The byte of a leaf, `None` for internal nodes.
    pub const fn byte(&self) -> Option<u8> {
        match self {
            Self::Leaf { byte, .. } => Some(*byte),
            Self::Internal { .. } => None,
        }
    }

    pub fn left(&self) -> Option<&HuffmanNode> {
        match self {
            Self::Internal { left, .. } => Some(&**left),
            Self::Leaf { .. } => None,
        }
    }

    pub fn right(&self) -> Option<&HuffmanNode> {
        match self {
            Self::Internal { right, .. } => Some(&**right),
            Self::Leaf { .. } => None,
        }
    }

    /// Follows one code bit: `true` goes left, `false` goes right.
    pub(crate) fn child(&self, bit: bool) -> Option<&HuffmanNode> {
        if bit { self.left() } else { self.right() }
    }

    /// Code of `byte` as root-to-leaf decisions, found by a depth-first search.
    ///
    /// Returns `None` if the byte has no leaf in this tree, or if the tree is a single leaf and
    /// would need a zero-bit code.
    pub fn code_of(&self, byte: u8) -> Option<Vec<bool>> {
        if self.is_leaf() {
            return None;
        }

        let mut path = Vec::new();
        self.search(byte, &mut path).then_some(path)
    }

    fn search(&self, target: u8, path: &mut Vec<bool>) -> bool {
        match self {
            Self::Leaf { byte, .. } => *byte == target,
            Self::Internal { left, right, .. } => {
                for (bit, child) in [(true, left), (false, right)] {
                    path.push(bit);
                    if child.search(target, path) {
                        return true;
                    }
                    path.pop();
                }
                false
            }
        }
    }

    /// Calls `f` with every leaf's byte and frequency, left subtree first.
    pub fn for_each_leaf(&self, f: &mut impl FnMut(u8, u64)) {
        match self {
            Self::Leaf { byte, frequency } => f(*byte, *frequency),
            Self::Internal { left, right, .. } => {
                left.for_each_leaf(f);
                right.for_each_leaf(f);
            }
        }
    }

    /// Number of edges on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        match self {
            Self::Leaf { .. } => 0,
            Self::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    /// Gives a lone leaf with a nonzero frequency a phantom sibling so its code is one bit long.
    ///
    /// The phantom has frequency 0, so the total frequency of the tree does not change.
    pub fn with_phantom_sibling(self) -> Self {
        match self {
            Self::Leaf { byte, frequency } if frequency > 0 => {
                Self::join(Self::leaf(byte, frequency), Self::leaf(byte.wrapping_add(1), 0))
            }
            other => other,
        }
    }
}

impl Default for HuffmanNode {
    fn default() -> Self {
        Self::empty()
    }
}
