//! JSON representation of a Huffman tree.
//!
//! The document has a single `root` object. Every node carries its `frequency`; leaves add the byte
//! value as `character`, internal nodes add `left` and `right` child objects:
//!
//! ```json
//! { "root": { "frequency": 3,
//!             "left": { "frequency": 1, "character": 97 },
//!             "right": { "frequency": 2, "character": 98 } } }
//! ```

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::huffman::HuffmanNode;

if_tracing! {
    use tracing::debug;
}

/// Error types for reading and writing dictionary files
#[derive(Debug, Error)]
pub enum DictionaryFileError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid node at {path}: it has no character and not both children")]
    MissingCharacter { path: String },

    #[error("Invalid node at {path}: frequency {recorded} does not match its children's sum {computed}")]
    FrequencyMismatch { path: String, recorded: u64, computed: u64 },

}

type Result<T> = std::result::Result<T, DictionaryFileError>;

/// Top level of a dictionary file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DictionaryDocument {
    pub root: NodeRecord,
}

/// One node of a dictionary file, as written on disk.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NodeRecord {
    pub frequency: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<Box<NodeRecord>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<Box<NodeRecord>>,
}

impl From<&HuffmanNode> for NodeRecord {
    fn from(node: &HuffmanNode) -> Self {
        match node {
            HuffmanNode::Leaf { byte, frequency } => NodeRecord {
                frequency: *frequency,
                character: Some(*byte),
                left: None,
                right: None,
            },
            HuffmanNode::Internal { frequency, left, right } => NodeRecord {
                frequency: *frequency,
                character: None,
                left: Some(Box::new(NodeRecord::from(&**left))),
                right: Some(Box::new(NodeRecord::from(&**right))),
            },
        }
    }
}

impl NodeRecord {
    /// Converts the record back into a tree node.
    ///
    /// A record with both children is an internal node. Anything else has to carry a
    /// `character`, and is read as a leaf even if it names a single child.
    pub fn to_node(&self, path: &str) -> Result<HuffmanNode> {
        if let (Some(left), Some(right)) = (&self.left, &self.right) {
            let left = left.to_node(&format!("{}.left", path))?;
            let right = right.to_node(&format!("{}.right", path))?;

            let computed = left.frequency().saturating_add(right.frequency());
            if computed != self.frequency {
                return Err(DictionaryFileError::FrequencyMismatch {
                    path: path.to_string(),
                    recorded: self.frequency,
                    computed,
                });
            }

            return Ok(HuffmanNode::join(left, right));
        }

        match self.character {
            Some(byte) => Ok(HuffmanNode::leaf(byte, self.frequency)),
            None => Err(DictionaryFileError::MissingCharacter { path: path.to_string() }),
        }
    }
}

pub fn to_json_string(root: &HuffmanNode) -> Result<String> {
    let document = DictionaryDocument { root: root.into() };
    Ok(serde_json::to_string_pretty(&document)?)
}

pub fn from_json_str(json: &str) -> Result<HuffmanNode> {
    let document: DictionaryDocument = serde_json::from_str(json)?;
    document.root.to_node("root")
}

/// Writes `root` to `path` as a dictionary file.
pub fn write_dictionary(path: &Path, root: &HuffmanNode) -> Result<()> {
    let json = to_json_string(root)?;
    fs::write(path, json)?;

    if_tracing! {
        debug!(target = "dictionary_file", path = %path.display(), size = root.frequency(), "dictionary written");
    }
    Ok(())
}

/// Reads the tree stored in the dictionary file at `path`.
pub fn read_dictionary(path: &Path) -> Result<HuffmanNode> {
    let json = fs::read_to_string(path)?;
    let root = from_json_str(&json)?;

    if_tracing! {
        debug!(target = "dictionary_file", path = %path.display(), size = root.frequency(), "dictionary read");
    }
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::huffman::HuffmanDictionary;

    #[test]
    fn round_trip() {
        let dictionary = HuffmanDictionary::from_bytes(b"ABBCCCDDDDEEEEEFFFFFFGGGGGGG");
        let json = to_json_string(dictionary.root()).unwrap();
        let root = from_json_str(&json).unwrap();
        assert_eq!(&root, dictionary.root());
    }

    #[test]
    fn empty_dictionary() {
        let json = to_json_string(&HuffmanNode::empty()).unwrap();
        let root = from_json_str(&json).unwrap();
        assert!(root.is_empty());
    }

    #[test]
    fn saturated_tree_reads_back() {
        let tree = HuffmanNode::join(HuffmanNode::leaf(b'a', u64::MAX), HuffmanNode::leaf(b'b', 3));
        let root = from_json_str(&to_json_string(&tree).unwrap()).unwrap();
        assert_eq!(root, tree);
        assert_eq!(root.frequency(), u64::MAX);
    }

    #[test]
    fn layout() {
        let tree = HuffmanNode::join(HuffmanNode::leaf(b'a', 1), HuffmanNode::leaf(b'b', 2));
        let value: serde_json::Value = serde_json::from_str(&to_json_string(&tree).unwrap()).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "root": {
                    "frequency": 3,
                    "left": { "frequency": 1, "character": 97 },
                    "right": { "frequency": 2, "character": 98 }
                }
            })
        );
    }

    #[test]
    fn single_child_with_character_is_leaf() {
        let json = r#"{ "root": { "frequency": 4, "character": 120, "left": { "frequency": 4, "character": 1 } } }"#;
        assert_eq!(from_json_str(json).unwrap(), HuffmanNode::leaf(b'x', 4));
    }

    #[test]
    fn rejects_missing_character() {
        let json = r#"{ "root": { "frequency": 3,
                        "left": { "frequency": 1, "character": 97 },
                        "right": { "frequency": 2 } } }"#;
        match from_json_str(json) {
            Err(DictionaryFileError::MissingCharacter { path }) => assert_eq!(path, "root.right"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn rejects_wrong_sum() {
        let json = r#"{ "root": { "frequency": 5,
                        "left": { "frequency": 1, "character": 97 },
                        "right": { "frequency": 2, "character": 98 } } }"#;
        assert!(matches!(
            from_json_str(json),
            Err(DictionaryFileError::FrequencyMismatch { recorded: 5, computed: 3, .. })
        ));
    }

    #[test]
    fn rejects_missing_fields() {
        assert!(matches!(from_json_str(r#"{ "tree": {} }"#), Err(DictionaryFileError::Json(_))));
        assert!(matches!(
            from_json_str(r#"{ "root": { "character": 1 } }"#),
            Err(DictionaryFileError::Json(_))
        ));
        assert!(matches!(
            from_json_str(r#"{ "root": { "frequency": 1, "character": 256 } }"#),
            Err(DictionaryFileError::Json(_))
        ));
    }

    #[test]
    fn file_round_trip() {
        let path = std::env::temp_dir().join(format!("huffdict-dictionary-{}.json", std::process::id()));
        let dictionary = HuffmanDictionary::from_bytes(b"hello, dictionary");

        write_dictionary(&path, dictionary.root()).unwrap();
        let root = read_dictionary(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(&root, dictionary.root());
    }

    #[test]
    fn missing_file() {
        let path = std::env::temp_dir().join("huffdict-this-file-does-not-exist.json");
        assert!(matches!(read_dictionary(&path), Err(DictionaryFileError::Io(_))));
    }
}
