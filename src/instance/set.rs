//! Read-only instance arrays addressed by instance id

use super::record::{InstanceRecord, RawInstance};

/// A parallel, read-only array of instance transforms.
///
/// The draw count of a batch equals `len()`; indexing outside the array is
/// the caller's bug and is surfaced as a panic here rather than undefined
/// behavior.
#[derive(Clone, Debug, Default)]
pub struct InstanceSet {
    records: Vec<InstanceRecord>,
}

impl InstanceSet {
    pub fn new(records: Vec<InstanceRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: usize) -> &InstanceRecord {
        &self.records[id]
    }

    pub fn records(&self) -> &[InstanceRecord] {
        &self.records
    }

    /// Flatten into the GPU-ready layout for upload as a vertex/storage
    /// buffer.
    pub fn to_raw(&self) -> Vec<RawInstance> {
        self.records.iter().copied().map(RawInstance::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Mat4, Vec3};

    #[test]
    fn test_set_preserves_order_and_length() {
        let records: Vec<_> = (0..5)
            .map(|i| InstanceRecord::from_model(Mat4::from_translation(Vec3::X * i as f32)))
            .collect();
        let set = InstanceSet::new(records.clone());
        assert_eq!(set.len(), 5);
        for (i, rec) in records.iter().enumerate() {
            assert_eq!(set.get(i).model, rec.model);
        }
    }

    #[test]
    fn test_to_raw_matches_len() {
        let set = InstanceSet::new(vec![InstanceRecord::IDENTITY; 3]);
        assert_eq!(set.to_raw().len(), 3);
    }
}
