use crate::edge::Triplet;

/// Append-only log of staged edits.
///
/// Nothing here is deduplicated or validated beyond id resolution; repeated
/// `(parent, child)` pairs are summed when the log is compacted.
#[derive(Clone, Debug, Default)]
pub struct WriteBuffer {
    triplets: Vec<Triplet>,
}

impl WriteBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triplets: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, parent: usize, child: usize, weight: f32) {
        self.triplets.push(Triplet {
            parent,
            child,
            weight,
        });
    }

    pub fn triplets(&self) -> &[Triplet] {
        &self.triplets
    }

    pub fn len(&self) -> usize {
        self.triplets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triplets.is_empty()
    }

    pub fn clear(&mut self) {
        self.triplets.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_are_kept() {
        let mut buf = WriteBuffer::default();
        buf.push(0, 1, 3.0);
        buf.push(0, 1, 4.0);
        assert_eq!(buf.len(), 2);
        assert_eq!(buf.triplets()[1].weight, 4.0);
    }

    #[test]
    fn test_clear() {
        let mut buf = WriteBuffer::with_capacity(8);
        buf.push(2, 0, 1.0);
        buf.clear();
        assert!(buf.is_empty());
    }
}
