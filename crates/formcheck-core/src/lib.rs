//! # Formcheck-Core
//!
//! Core types and utilities for the formcheck exercise analysis engine:
//! pose landmark frames, the named keypoint view over them, joint angle
//! geometry and the exercise configuration registry.

pub mod config;
pub mod error;
pub mod geometry;
pub mod keypoints;
pub mod types;

pub use config::*;
pub use error::{Error, Result};
pub use geometry::*;
pub use keypoints::*;
pub use types::*;
