use nalgebra::{Affine3, Scale3, Translation3, UnitQuaternion, Vector3};

/// Stores the translation, rotation and scale of a
/// [`SceneNode`](crate::core::SceneNode).
///
/// The transform keeps a precomputed model matrix so that retrieving it every
/// frame is cheap. Rotation is held as a unit quaternion end to end; Euler
/// angles never enter the pipeline.
#[derive(Clone)]
pub struct Transform {
    pos: Vector3<f32>,
    rot: UnitQuaternion<f32>,
    scale: Vector3<f32>,
    compound_mat: Affine3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Transform::new()
    }
}

impl Transform {
    /// Creates a transform at the origin with no rotation and a uniform scale
    /// of `1.0`.
    pub fn new() -> Self {
        Transform {
            pos: Vector3::zeros(),
            rot: UnitQuaternion::identity(),
            scale: Vector3::new(1.0, 1.0, 1.0),
            compound_mat: Affine3::identity(),
        }
    }

    /// Sets the position of the transform.
    #[inline(always)]
    pub fn set_position(&mut self, x: f32, y: f32, z: f32) {
        self.set_position_vec(Vector3::new(x, y, z))
    }

    /// Sets the position using a vector.
    pub fn set_position_vec(&mut self, pos: Vector3<f32>) {
        self.pos = pos;
        self.recalculate_matrix();
    }

    /// Returns a reference to the position vector.
    pub fn position(&self) -> &Vector3<f32> {
        &self.pos
    }

    /// Adds the given offset to the position.
    pub fn translate(&mut self, offset: Vector3<f32>) {
        self.pos += offset;
        self.recalculate_matrix();
    }

    /// Sets the rotation of the transform.
    pub fn set_rotation(&mut self, rotation: UnitQuaternion<f32>) {
        self.rot = rotation;
        self.recalculate_matrix();
    }

    /// Returns a reference to the rotation quaternion.
    pub fn rotation(&self) -> &UnitQuaternion<f32> {
        &self.rot
    }

    /// Applies a relative rotation to the transform.
    pub fn rotate(&mut self, rot: UnitQuaternion<f32>) {
        self.rot *= rot;
        self.recalculate_matrix();
    }

    /// Sets the scale using three independent factors.
    pub fn set_nonuniform_scale(&mut self, scale: Vector3<f32>) {
        self.scale = scale;
        self.recalculate_matrix();
    }

    /// Sets the scale uniformly.
    pub fn set_uniform_scale(&mut self, factor: f32) {
        self.set_nonuniform_scale(Vector3::new(factor, factor, factor));
    }

    /// Returns a reference to the scale vector.
    pub fn scale(&self) -> &Vector3<f32> {
        &self.scale
    }

    /// Returns a reference to the combined model matrix.
    pub fn full_matrix(&self) -> &Affine3<f32> {
        &self.compound_mat
    }

    /// Returns the forward direction in world space.
    pub fn forward(&self) -> Vector3<f32> {
        self.rot * Vector3::new(0.0, 0.0, -1.0)
    }

    /// Returns the right direction in world space.
    pub fn right(&self) -> Vector3<f32> {
        self.rot * Vector3::new(1.0, 0.0, 0.0)
    }

    /// Returns the up direction in world space.
    pub fn up(&self) -> Vector3<f32> {
        self.rot * Vector3::new(0.0, 1.0, 0.0)
    }

    fn recalculate_matrix(&mut self) {
        self.compound_mat = Affine3::from_matrix_unchecked(
            Translation3::from(self.pos).to_homogeneous()
                * self.rot.to_homogeneous()
                * Scale3::from(self.scale).to_homogeneous(),
        );
    }
}
