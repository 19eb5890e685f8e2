//! Problem facade tying the encoding, decoder, repair and evaluation
//! together behind the handful of hooks an integer-vector optimizer needs:
//! solution creation, repair, evaluation, and final decoding.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{ExamSchedule, Instance, MAX_DAYS};

use super::decoder::Decoder;
use super::encoding::{Encoding, MAX_ROOMS_PER_SLOT};
use super::evaluator::{Evaluation, Evaluator};
use super::greedy::GreedySolver;
use super::repair::Repairer;

/// Share of new solutions built purely greedily.
const GREEDY_SHARE: f64 = 0.50;
/// Share built greedily then perturbed.
const NOISY_SHARE: f64 = 0.30;
/// Per-slot chance of one random room write during noising.
const ROOM_NOISE_RATE: f64 = 0.10;
/// Chance of cutting a random slot's room list short at each position.
const ROOM_STOP_RATE: f64 = 0.30;

/// The exam-to-room assignment problem over one instance.
///
/// Owns the instance; everything else is derived on demand.
#[derive(Debug)]
pub struct ExamAssignmentProblem {
    instance: Instance,
    encoding: Encoding,
}

impl ExamAssignmentProblem {
    /// Wraps an instance as an optimizable problem.
    pub fn new(instance: Instance) -> Self {
        let encoding = Encoding::for_instance(&instance);
        Self { instance, encoding }
    }

    /// The underlying instance.
    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    /// The vector layout for this instance.
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Creates one solution vector: 50% greedy, 30% greedy with noise,
    /// 20% random. The mix keeps the initial population anchored near
    /// feasibility without collapsing its diversity.
    pub fn create_solution<R: Rng>(&self, rng: &mut R) -> Vec<i32> {
        let draw: f64 = rng.random_range(0.0..1.0);
        if draw < GREEDY_SHARE {
            self.greedy_solution()
        } else if draw < GREEDY_SHARE + NOISY_SHARE {
            self.noisy_greedy_solution(rng)
        } else {
            self.random_solution(rng)
        }
    }

    /// The deterministic greedy vector.
    pub fn greedy_solution(&self) -> Vec<i32> {
        GreedySolver::new(&self.instance).solve()
    }

    /// Greedy vector with light perturbation: a few slot swaps to shuffle
    /// decode priority, plus sporadic random room writes.
    pub fn noisy_greedy_solution<R: Rng>(&self, rng: &mut R) -> Vec<i32> {
        let mut vector = self.greedy_solution();
        let slots = self.encoding.num_slots();

        for _ in 0..slots / 10 {
            let a = rng.random_range(0..slots);
            let b = rng.random_range(0..slots);
            self.encoding.swap_slots(&mut vector, a, b);
        }

        for slot in 0..slots {
            if rng.random_bool(ROOM_NOISE_RATE) {
                let pos = rng.random_range(0..MAX_ROOMS_PER_SLOT);
                // Inclusive upper bound: the sentinel is a legal write.
                let raw = rng.random_range(0..=self.instance.num_rooms());
                let room = (raw < self.instance.num_rooms()).then_some(raw);
                self.encoding.set_room(&mut vector, slot, pos, room);
            }
        }

        vector
    }

    /// Fully random vector: shuffled exam order, random days, and random
    /// duplicate-free room lists that tend to stop once capacity is covered.
    pub fn random_solution<R: Rng>(&self, rng: &mut R) -> Vec<i32> {
        let enc = &self.encoding;
        let mut vector = enc.empty_vector();

        let mut order: Vec<usize> = (0..self.instance.num_exams()).collect();
        order.shuffle(rng);

        for (slot, &exam) in order.iter().enumerate() {
            enc.set_exam(&mut vector, slot, Some(exam));
            enc.set_day(&mut vector, slot, rng.random_range(0..MAX_DAYS));

            let mut needed = self.instance.exam(exam).enrolled as i64;
            let mut chosen: Vec<usize> = Vec::with_capacity(MAX_ROOMS_PER_SLOT);

            for pos in 0..MAX_ROOMS_PER_SLOT {
                if needed <= 0 || rng.random_bool(ROOM_STOP_RATE) {
                    enc.set_room(&mut vector, slot, pos, None);
                    continue;
                }

                // A handful of redraws keeps the slot duplicate-free without
                // ever stalling on tiny room pools.
                let mut room = rng.random_range(0..self.instance.num_rooms());
                let mut attempts = 1;
                while chosen.contains(&room) && attempts < 10 {
                    room = rng.random_range(0..self.instance.num_rooms());
                    attempts += 1;
                }

                if chosen.contains(&room) {
                    enc.set_room(&mut vector, slot, pos, None);
                } else {
                    enc.set_room(&mut vector, slot, pos, Some(room));
                    needed -= i64::from(self.instance.room(room).capacity);
                    chosen.push(room);
                }
            }
        }

        vector
    }

    /// Repairs a vector in place.
    pub fn repair(&self, vector: &mut [i32]) {
        Repairer::new(&self.instance).repair(vector);
    }

    /// Evaluates a vector.
    pub fn evaluate(&self, vector: &[i32]) -> Evaluation {
        Evaluator::new(&self.instance).evaluate(vector)
    }

    /// Decodes a vector to a concrete schedule.
    pub fn decode(&self, vector: &[i32]) -> ExamSchedule {
        Decoder::new(&self.instance).decode(vector)
    }
}
