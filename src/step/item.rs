//! Sortable values with stable identity
//!
//! Raw input integers are wrapped in [`IndexedNumber`] before an algorithm
//! runs. The wrapper carries an identity assigned at input time, so a
//! renderer can follow one logical element across reorderings, and equal
//! values stay distinguishable.

/// One sortable value together with its stable identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexedNumber {
    /// Identity assigned at input time, stable for the whole run.
    pub id: usize,
    /// The value being sorted.
    pub value: i32,
    /// Explicit draw position overriding the element's slot, when set.
    pub draw_index: Option<usize>,
    /// Marks a stale working copy so renderers de-emphasize it.
    pub duplicated: bool,
}

impl IndexedNumber {
    pub fn new(id: usize, value: i32) -> Self {
        IndexedNumber {
            id,
            value,
            draw_index: None,
            duplicated: false,
        }
    }

    /// A de-emphasized copy sharing this element's identity.
    pub fn duplicate(&self) -> Self {
        IndexedNumber {
            duplicated: true,
            ..*self
        }
    }

    /// Restores the element to its ordinary, non-stale presentation.
    pub fn settle(&self) -> Self {
        IndexedNumber {
            duplicated: false,
            ..*self
        }
    }
}

/// Wraps raw input values, assigning identities in input order.
pub fn index_input(input: &[i32]) -> Vec<IndexedNumber> {
    input
        .iter()
        .enumerate()
        .map(|(id, &value)| IndexedNumber::new(id, value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_input_assigns_stable_ids() {
        let items = index_input(&[7, 7, 3]);
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].id, 0);
        assert_eq!(items[1].id, 1);
        assert_eq!(items[0].value, items[1].value);
        assert_ne!(items[0], items[1]);
    }

    #[test]
    fn test_duplicate_keeps_identity() {
        let item = IndexedNumber::new(4, 9);
        let copy = item.duplicate();
        assert!(copy.duplicated);
        assert_eq!(copy.id, item.id);
        assert_eq!(copy.value, item.value);
        assert_eq!(copy.settle(), item);
    }
}
