//! Objective and constraint evaluation.
//!
//! Decodes the vector, then scores the resulting schedule:
//!
//! - `objectives[0]`: exam-room pairings in use (minimize)
//! - `objectives[1]`: negated mean day-separation over conflict pairs with
//!   both exams assigned (the optimizer minimizes, separation is maximized)
//! - `constraints[0]`: negated total capacity shortfall
//! - `constraints[1]`: negated count of unassigned exams
//!
//! Constraints follow the usual convention: non-negative means satisfied.

use crate::models::{ExamSchedule, Instance};

use super::decoder::{Decoder, OccupancyGrid};

/// Scores for one candidate vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// `[room_pairings, -mean_separation]`, both minimized.
    pub objectives: [f64; 2],
    /// `[-capacity_shortfall, -unassigned_count]`, satisfied when `>= 0`.
    pub constraints: [f64; 2],
}

impl Evaluation {
    /// Whether both constraints are satisfied.
    #[inline]
    pub fn is_feasible(&self) -> bool {
        self.constraints[0] >= 0.0 && self.constraints[1] >= 0.0
    }

    /// Room pairings in use (objective 1, un-negated).
    #[inline]
    pub fn room_pairings(&self) -> f64 {
        self.objectives[0]
    }

    /// Mean conflict-pair separation in days (objective 2, un-negated).
    #[inline]
    pub fn mean_separation(&self) -> f64 {
        -self.objectives[1]
    }
}

/// Evaluates encoded vectors against one instance.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    instance: &'a Instance,
    decoder: Decoder<'a>,
}

impl<'a> Evaluator<'a> {
    /// Evaluator for an instance.
    pub fn new(instance: &'a Instance) -> Self {
        Self {
            instance,
            decoder: Decoder::new(instance),
        }
    }

    /// Decodes and scores a vector.
    pub fn evaluate(&self, vector: &[i32]) -> Evaluation {
        let schedule = self.decoder.decode(vector);
        self.evaluate_schedule(&schedule)
    }

    /// Like [`evaluate`](Self::evaluate) but reusing a scratch grid.
    pub fn evaluate_with(&self, vector: &[i32], grid: &mut OccupancyGrid) -> Evaluation {
        let schedule = self.decoder.decode_into(vector, grid);
        self.evaluate_schedule(&schedule)
    }

    /// Scores an already-decoded schedule.
    pub fn evaluate_schedule(&self, schedule: &ExamSchedule) -> Evaluation {
        let mut pairings = 0usize;
        let mut capacity_shortfall = 0u32;
        let mut unassigned = 0usize;

        for exam in 0..self.instance.num_exams() {
            match schedule.placement(exam) {
                Some(p) if !p.rooms.is_empty() => {
                    pairings += p.rooms.len();
                    let enrolled = self.instance.exam(exam).enrolled;
                    capacity_shortfall += enrolled.saturating_sub(p.total_capacity);
                }
                _ => unassigned += 1,
            }
        }

        Evaluation {
            objectives: [pairings as f64, -self.mean_separation(schedule)],
            constraints: [-(capacity_shortfall as f64), -(unassigned as f64)],
        }
    }

    /// Mean `|day_a - day_b|` over conflict pairs with both exams assigned.
    /// Pairs with an unassigned side are excluded; no pairs yields 0.
    fn mean_separation(&self, schedule: &ExamSchedule) -> f64 {
        let mut total = 0.0;
        let mut counted = 0usize;

        for pair in self.instance.conflicts() {
            let (Some(pa), Some(pb)) = (schedule.placement(pair.a), schedule.placement(pair.b))
            else {
                continue;
            };
            total += (pa.day as f64 - pb.day as f64).abs();
            counted += 1;
        }

        if counted == 0 {
            0.0
        } else {
            total / counted as f64
        }
    }
}
