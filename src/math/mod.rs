//! Geometric utilities for pose data.
//!
//! This module provides:
//! - [`quaternion`]: Hamilton product, conjugate, vector rotation
//! - [`euler`]: Euler angle <-> quaternion conversion
//! - [`vector`]: vector angles and direction-to-direction rotations

pub mod euler;
pub mod quaternion;
pub mod vector;

pub use euler::{
    euler_rows_to_quaternions, euler_to_quaternion, quaternion_rows_to_euler, quaternion_to_euler,
};
pub use quaternion::{conjugate, multiply, rotate_vector, Quaternion};
pub use vector::{
    angle_degrees, cross3, dot3, norm3, normalize3, rotation_between, rotation_between_with_config,
};
