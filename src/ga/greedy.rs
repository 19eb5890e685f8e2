//! Deterministic greedy baseline.
//!
//! No search: exams are taken largest-enrollment-first, each gets the
//! smallest single room that seats it (best fit) or, failing that, the
//! smallest set of largest rooms that covers it. Days are seeded
//! round-robin and advanced earliest-fit against running per-room-per-day
//! block counters, so the emitted vector usually decodes without touching
//! the fallback cascade. Used both as a strong population seed and as the
//! standalone baseline the evolved fronts are compared against.

use crate::models::{Instance, BLOCKS_PER_DAY, MAX_DAYS};

use super::encoding::{Encoding, MAX_ROOMS_PER_SLOT};

/// Builds one deterministic near-feasible vector per instance.
#[derive(Debug, Clone, Copy)]
pub struct GreedySolver<'a> {
    instance: &'a Instance,
    encoding: Encoding,
}

impl<'a> GreedySolver<'a> {
    /// Greedy solver for an instance.
    pub fn new(instance: &'a Instance) -> Self {
        Self {
            instance,
            encoding: Encoding::for_instance(instance),
        }
    }

    /// Constructs the greedy vector. Two calls produce identical output.
    pub fn solve(&self) -> Vec<i32> {
        let enc = &self.encoding;
        let mut vector = enc.empty_vector();

        // Hardest-to-seat exams claim rooms and early slots first.
        let mut order: Vec<usize> = (0..self.instance.num_exams()).collect();
        order.sort_by_key(|&e| std::cmp::Reverse(self.instance.exam(e).enrolled));

        // Blocks already promised per (room, day) during construction.
        let mut used = vec![[0usize; MAX_DAYS]; self.instance.num_rooms()];

        for (slot, &exam) in order.iter().enumerate() {
            let enrolled = self.instance.exam(exam).enrolled;
            let duration = self.instance.duration_blocks(exam);
            let rooms = self.rooms_for_capacity(enrolled);

            let seed = slot % MAX_DAYS;
            let day = self
                .earliest_fitting_day(&used, &rooms, duration, seed)
                .unwrap_or(seed);

            // Synchronized start: every room advances to the common block.
            let start = rooms.iter().map(|&r| used[r][day]).max().unwrap_or(0);
            if start + duration <= BLOCKS_PER_DAY {
                for &room in &rooms {
                    used[room][day] = start + duration;
                }
            }

            enc.set_exam(&mut vector, slot, Some(exam));
            enc.set_day(&mut vector, slot, day);
            for (pos, &room) in rooms.iter().enumerate() {
                enc.set_room(&mut vector, slot, pos, Some(room));
            }
        }

        vector
    }

    /// Best-fit single room if one seats everyone, otherwise the largest
    /// rooms until covered, capped at the per-slot room limit.
    fn rooms_for_capacity(&self, enrolled: u32) -> Vec<usize> {
        for &room in self.instance.rooms_by_capacity_asc() {
            if self.instance.room(room).capacity >= enrolled {
                return vec![room];
            }
        }

        let mut rooms = Vec::new();
        let mut covered = 0u32;
        for &room in self.instance.rooms_by_capacity_desc() {
            if covered >= enrolled || rooms.len() >= MAX_ROOMS_PER_SLOT {
                break;
            }
            covered += self.instance.room(room).capacity;
            rooms.push(room);
        }
        rooms
    }

    /// First day, scanning forward from `seed` with wraparound, where every
    /// chosen room still has `duration` free blocks.
    fn earliest_fitting_day(
        &self,
        used: &[[usize; MAX_DAYS]],
        rooms: &[usize],
        duration: usize,
        seed: usize,
    ) -> Option<usize> {
        (0..MAX_DAYS).map(|offset| (seed + offset) % MAX_DAYS).find(|&day| {
            let start = rooms.iter().map(|&r| used[r][day]).max().unwrap_or(0);
            start + duration <= BLOCKS_PER_DAY
        })
    }
}
