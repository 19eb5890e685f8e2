//! Integer-vector representation of the assignment problem.
//!
//! Everything an integer-vector evolutionary optimizer needs to run over an
//! [`Instance`](crate::models::Instance): a slot-based encoding, a
//! deterministic decoder with a fallback cascade, an in-place repair
//! operator, the two-objective evaluator, and a greedy constructor for
//! seeding populations.
//!
//! # Pipeline
//!
//! ```text
//! Vec<i32> --repair--> Vec<i32> --decode--> ExamSchedule --evaluate--> Evaluation
//! ```
//!
//! The decoder never fails: vectors the operators have mangled still decode,
//! at worst to a schedule with unassigned exams, which the evaluator then
//! penalizes through the constraint channel.
//!
//! # Submodules
//!
//! - [`encoding`]: slot layout, sentinels, typed field access
//! - [`decoder`]: vector → schedule with occupancy tracking and fallbacks
//! - [`repair`]: structural and capacity invariant restoration
//! - [`evaluator`]: objectives and constraints
//! - [`greedy`]: deterministic baseline / population seed
//! - [`problem`]: facade bundling the above plus stochastic initializers

pub mod decoder;
pub mod encoding;
pub mod evaluator;
pub mod greedy;
pub mod problem;
pub mod repair;

pub use decoder::{Decoder, OccupancyGrid};
pub use encoding::{Encoding, MAX_ROOMS_PER_SLOT, SLOT_SIZE};
pub use evaluator::{Evaluation, Evaluator};
pub use greedy::GreedySolver;
pub use problem::ExamAssignmentProblem;
pub use repair::Repairer;
