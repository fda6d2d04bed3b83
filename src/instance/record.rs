//! Instance transform pair and its GPU-ready raw layout

use bytemuck::{Pod, Zeroable};

use crate::core::types::{Mat3, Mat4, Vec3};

/// Model/normal transform pair for one instance.
///
/// Instances of a batch share geometry and shader state; only this record
/// varies. The array of records is owned and rewritten once per frame by
/// the external placement system and is read-only while a frame is in
/// flight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InstanceRecord {
    pub model: Mat4,
    /// Inverse-transpose of the model's upper 3x3, for normals under
    /// non-uniform scale.
    pub normal: Mat3,
}

impl InstanceRecord {
    pub const IDENTITY: Self = Self {
        model: Mat4::IDENTITY,
        normal: Mat3::IDENTITY,
    };

    /// Build a record from a model matrix, deriving the normal matrix.
    ///
    /// The model's upper 3x3 must be invertible.
    pub fn from_model(model: Mat4) -> Self {
        Self {
            model,
            normal: Mat3::from_mat4(model).inverse().transpose(),
        }
    }

    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.model.transform_point3(local)
    }

    /// Transform a normal; the result is not renormalized.
    pub fn transform_normal(&self, normal: Vec3) -> Vec3 {
        self.normal * normal
    }
}

/// GPU-ready form of [`InstanceRecord`]: column-major model matrix plus the
/// normal matrix as three vec4-padded columns. 112 bytes, 16-byte aligned.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct RawInstance {
    pub model: [[f32; 4]; 4],
    pub normal: [[f32; 4]; 3],
}

impl From<InstanceRecord> for RawInstance {
    fn from(record: InstanceRecord) -> Self {
        let n = record.normal.to_cols_array_2d();
        let pad = |col: [f32; 3]| [col[0], col[1], col[2], 0.0];
        Self {
            model: record.model.to_cols_array_2d(),
            normal: [pad(n[0]), pad(n[1]), pad(n[2])],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_instance_size() {
        assert_eq!(std::mem::size_of::<RawInstance>(), 112);
    }

    #[test]
    fn test_raw_instance_alignment() {
        assert_eq!(std::mem::size_of::<RawInstance>() % 16, 0);
    }

    #[test]
    fn test_bytemuck_cast() {
        let raw = RawInstance::from(InstanceRecord::IDENTITY);
        let bytes = bytemuck::bytes_of(&raw);
        assert_eq!(bytes.len(), 112);
        // Column 0 of the identity model matrix.
        assert_eq!(raw.model[0], [1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_normal_matrix_counters_nonuniform_scale() {
        let record = InstanceRecord::from_model(Mat4::from_scale(Vec3::new(1.0, 1.0, 4.0)));
        // A surface normal tilted in xz. Under the squashed-normal rule the
        // transformed normal must stay perpendicular to transformed tangents.
        let n = Vec3::new(1.0, 0.0, 1.0).normalize();
        let tangent = Vec3::new(1.0, 0.0, -1.0); // perpendicular to n
        let n_t = record.transform_normal(n);
        let tangent_t = record.model.transform_vector3(tangent);
        assert!(n_t.dot(tangent_t).abs() < 1e-5);
    }

    #[test]
    fn test_identity_record_is_a_noop() {
        let p = Vec3::new(0.4, -1.0, 2.0);
        assert_eq!(InstanceRecord::IDENTITY.transform_point(p), p);
        assert_eq!(InstanceRecord::IDENTITY.transform_normal(Vec3::Z), Vec3::Z);
    }
}
