//! Shared data structures for drill planning
//!
//! - Catalog: Drill, Equipment, FamilyKey, DrillRow
//! - Feedback: canonical versioned FeedbackIn, stored FeedbackRecord
//! - Sessions, showcase, parent summary and history views

mod drill;
mod feedback;
mod session;

pub use drill::*;
pub use feedback::*;
pub use session::*;
