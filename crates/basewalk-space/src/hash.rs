//! Bit-exact hashing helpers for determinism verification.
//!
//! Floats are hashed through their bit patterns so that two states hash equal
//! only when every component is bit-identical. `-0.0` and `0.0` hash
//! differently on purpose: a reset must restore the exact spawn bits.

use std::hash::{Hash, Hasher};

use glam::Vec3;

use crate::Aabb;

/// Hash a single float by its bit pattern.
pub fn hash_f32<H: Hasher>(value: f32, hasher: &mut H) {
    value.to_bits().hash(hasher);
}

/// Hash a vector component-wise in x, y, z order.
pub fn hash_vec3<H: Hasher>(v: Vec3, hasher: &mut H) {
    hash_f32(v.x, hasher);
    hash_f32(v.y, hasher);
    hash_f32(v.z, hasher);
}

/// Hash a box as min corner followed by max corner.
pub fn hash_aabb<H: Hasher>(aabb: &Aabb, hasher: &mut H) {
    hash_vec3(aabb.min, hasher);
    hash_vec3(aabb.max, hasher);
}
