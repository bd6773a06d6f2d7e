//! Controller layer: session events, reducer-like state transitions, and
//! effect orchestration.

pub mod events;
pub mod orchestration;
pub mod reducer;

pub use events::{Effect, SessionEvent, SubmissionRequest, SubmissionTicket};
pub use orchestration::{HttpReviewBackend, ReviewBackend, ReviewController, SessionRuntime};
pub use reducer::ReviewSession;
