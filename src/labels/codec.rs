use std::collections::HashMap;
use std::hash::Hash;

use crate::error::{Error, Result};

/// Two-way mapping between opaque labels and dense output indices.
///
/// The vocabulary is built once by first-occurrence deduplication; the index
/// of a label is its output node for the network's whole lifetime.
#[derive(Debug, Clone)]
pub struct LabelCodec<L> {
    labels: Vec<L>,
    index: HashMap<L, usize>,
}

impl<L: Clone + Eq + Hash> LabelCodec<L> {
    pub fn from_labels(labels: &[L]) -> LabelCodec<L> {
        let mut vocabulary = Vec::new();
        let mut index = HashMap::new();
        for label in labels {
            if !index.contains_key(label) {
                index.insert(label.clone(), vocabulary.len());
                vocabulary.push(label.clone());
            }
        }
        LabelCodec { labels: vocabulary, index }
    }

    pub fn index_of(&self, label: &L) -> Option<usize> {
        self.index.get(label).copied()
    }

    /// Maps every label to its index; fails on the first unknown label.
    pub fn encode(&self, labels: &[L]) -> Result<Vec<usize>> {
        labels
            .iter()
            .map(|label| self.index_of(label).ok_or(Error::UnknownLabel))
            .collect()
    }

    pub fn decode(&self, index: usize) -> Option<&L> {
        self.labels.get(index)
    }

    pub fn labels(&self) -> &[L] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vocabulary_keeps_first_occurrence_order() {
        let codec = LabelCodec::from_labels(&["b", "a", "b", "c", "a"]);
        assert_eq!(codec.labels(), &["b", "a", "c"]);
        assert_eq!(codec.len(), 3);
    }

    #[test]
    fn encode_then_decode_restores_labels() {
        let labels = vec!["red".to_string(), "green".to_string(), "red".to_string()];
        let codec = LabelCodec::from_labels(&labels);
        let indices = codec.encode(&labels).unwrap();
        assert_eq!(indices, vec![0, 1, 0]);
        let decoded: Vec<&String> = indices.iter().map(|&i| codec.decode(i).unwrap()).collect();
        assert_eq!(decoded, labels.iter().collect::<Vec<_>>());
    }

    #[test]
    fn unknown_label_fails_to_encode() {
        let codec = LabelCodec::from_labels(&[1, 2, 3]);
        assert!(matches!(codec.encode(&[1, 4]), Err(Error::UnknownLabel)));
        assert_eq!(codec.index_of(&4), None);
    }

    #[test]
    fn decode_out_of_range_is_none() {
        let codec = LabelCodec::from_labels(&['x']);
        assert_eq!(codec.decode(0), Some(&'x'));
        assert_eq!(codec.decode(1), None);
    }

    #[test]
    fn empty_vocabulary() {
        let codec: LabelCodec<u8> = LabelCodec::from_labels(&[]);
        assert!(codec.is_empty());
    }
}
