//! Multi-objective exam-to-room assignment.
//!
//! Models exam timetabling as an integer-vector optimization problem:
//! every exam gets a day, a start block, and up to four rooms on a fixed
//! 25-day horizon of 26 half-hour blocks. Two objectives are traded off —
//! total room pairings (minimize) against mean day-separation of
//! conflicting exams (maximize) — under capacity and assignment
//! constraints.
//!
//! This crate defines the problem, not the search: it exposes the
//! encoding, decoder, repair, evaluation and seeding hooks any
//! integer-vector evolutionary algorithm can drive, plus the Pareto
//! post-processing used to compare runs.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Exam`, `Room`, `Instance`,
//!   `ExamSchedule`, `Placement`
//! - **`ga`**: Encoding, decoder, repair, evaluator, greedy baseline,
//!   and the problem facade
//! - **`pareto`**: Front extraction and hypervolume on normalized
//!   objectives
//! - **`validation`**: Input integrity checks (duplicate IDs, empty
//!   exams, conflict index bounds)
//!
//! # Example
//!
//! ```
//! use examtable::ga::ExamAssignmentProblem;
//! use examtable::models::{ConflictPair, Exam, Instance, Room};
//!
//! let instance = Instance::new(
//!     vec![
//!         Exam::new("algebra", 40, 2.0),
//!         Exam::new("physics", 25, 1.5),
//!         Exam::new("calculus", 60, 2.0),
//!     ],
//!     vec![Room::new("aula-1", 50), Room::new("aula-2", 30)],
//!     vec![ConflictPair::new(0, 2)],
//! )
//! .unwrap();
//!
//! let problem = ExamAssignmentProblem::new(instance);
//! let vector = problem.greedy_solution();
//! let evaluation = problem.evaluate(&vector);
//! assert!(evaluation.is_feasible());
//! ```

pub mod ga;
pub mod models;
pub mod pareto;
pub mod validation;

pub use ga::{Evaluation, ExamAssignmentProblem};
pub use models::{ConflictPair, Exam, ExamSchedule, Instance, Placement, Room};
pub use validation::{ValidationError, ValidationErrorKind};
