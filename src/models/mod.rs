//! Exam-timetabling domain models.
//!
//! Pure data: the immutable problem catalogue ([`Instance`]) and the
//! decoded solution form ([`ExamSchedule`]). All algorithmic components
//! borrow these read-only; nothing here mutates after construction.

mod exam;
mod instance;
mod room;
mod schedule;

pub use exam::Exam;
pub use instance::{ConflictPair, Instance, BLOCKS_PER_DAY, MAX_DAYS};
pub use room::Room;
pub use schedule::{ExamSchedule, Placement};
