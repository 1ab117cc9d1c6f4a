//! # Formcheck-Analysis
//!
//! Per-frame exercise analysis: form scoring, repetition counting and
//! prioritized corrective feedback over a stream of pose landmark frames.
//!
//! ## Pipeline
//!
//! 1. **Keypoints**: the frame's 33 landmark slots are mapped to named joints
//! 2. **Policy**: the selected exercise turns joint geometry into signals,
//!    a deducted score and candidate feedback
//! 3. **Rep state machine**: phase hysteresis (`up`/`down`) counts completed
//!    repetitions and records one [`RepData`] per rep
//! 4. **Feedback ranking**: messages are ordered by priority and truncated
//!
//! ## Exercises
//!
//! - **Squat**: knee depth, knee valgus and forward lean; a rep counts when
//!   the athlete stands back up
//! - **Shoulder abduction**: range of motion around 90°, left/right symmetry
//!   and shoulder hiking; a rep counts when the arms return to the sides
//!
//! The analyzer is single-threaded by contract: one frame is analyzed to
//! completion before the next one is submitted.

pub mod analyzer;
pub mod feedback;
pub mod metrics;
pub mod policy;
mod rep;
pub mod scoring;
pub mod shoulder;
pub mod squat;
pub mod state;

pub use analyzer::*;
pub use feedback::*;
pub use metrics::*;
pub use policy::*;
pub use scoring::*;
pub use shoulder::*;
pub use squat::*;
pub use state::*;

#[cfg(test)]
pub(crate) mod test_support;
