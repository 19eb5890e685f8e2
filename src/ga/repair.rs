//! In-place repair of encoded vectors after crossover/mutation.
//!
//! The external operators treat the vector as raw integers and routinely
//! break the structural invariants the decoder leans on. Repair rewrites
//! the vector so that:
//!
//! 1. every exam appears in exactly one slot (later duplicates cleared,
//!    missing exams inserted into freed slots),
//! 2. room lists are in-range, duplicate-free, front-compacted, and days
//!    are clamped to the horizon,
//! 3. every occupied slot's rooms seat the exam's enrollment, topping up
//!    from the capacity-descending pool when short,
//! 4. slots are reordered hardest-first so difficult exams reach the
//!    decoder while time windows are still open.
//!
//! Repair never fails and is idempotent: every choice it makes is a pure
//! function of the vector contents.

use crate::models::{Instance, MAX_DAYS};

use super::encoding::{Encoding, MAX_ROOMS_PER_SLOT, SLOT_SIZE};

/// Restores the structural and capacity invariants of an encoded vector.
#[derive(Debug, Clone, Copy)]
pub struct Repairer<'a> {
    instance: &'a Instance,
    encoding: Encoding,
}

impl<'a> Repairer<'a> {
    /// Repairer for an instance.
    pub fn new(instance: &'a Instance) -> Self {
        Self {
            instance,
            encoding: Encoding::for_instance(instance),
        }
    }

    /// The layout this repairer expects.
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Repairs the vector in place.
    pub fn repair(&self, vector: &mut [i32]) {
        self.encoding.check_vector(vector);
        self.enforce_uniqueness(vector);
        self.sanitize_slots(vector);
        self.ensure_capacity(vector);
        self.order_by_difficulty(vector);
    }

    /// Stage 1: each exam in exactly one slot. The first occurrence wins;
    /// later duplicates become empty slots; exams missing entirely are
    /// inserted (ascending index) into the empty slots in order.
    fn enforce_uniqueness(&self, vector: &mut [i32]) {
        let enc = &self.encoding;
        let mut seen = vec![false; self.instance.num_exams()];

        for slot in 0..enc.num_slots() {
            match enc.exam(vector, slot) {
                Some(exam) if !seen[exam] => seen[exam] = true,
                Some(_) => enc.set_exam(vector, slot, None),
                None => {
                    // Normalize any out-of-range raw value to the sentinel.
                    enc.set_exam(vector, slot, None);
                }
            }
        }

        let mut empty_slots = (0..enc.num_slots())
            .filter(|&s| enc.exam(vector, s).is_none())
            .collect::<Vec<_>>()
            .into_iter();
        for exam in (0..self.instance.num_exams()).filter(|&e| !seen[e]) {
            // One empty slot per missing exam is guaranteed: slots == exams.
            if let Some(slot) = empty_slots.next() {
                log::trace!("repair: reinserting missing exam {exam} into slot {slot}");
                enc.set_exam(vector, slot, Some(exam));
            }
        }
    }

    /// Stage 2: per-slot sanity. Rooms out of range or duplicated are
    /// dropped, survivors compacted to the front, the rest padded with the
    /// sentinel; the day field is clamped into the horizon.
    fn sanitize_slots(&self, vector: &mut [i32]) {
        let enc = &self.encoding;
        for slot in 0..enc.num_slots() {
            let day = enc.day(vector, slot).clamp(0, MAX_DAYS as i32 - 1);
            enc.set_day(vector, slot, day as usize);

            let mut rooms: Vec<usize> = Vec::with_capacity(MAX_ROOMS_PER_SLOT);
            for pos in 0..MAX_ROOMS_PER_SLOT {
                if let Some(room) = enc.room(vector, slot, pos) {
                    if !rooms.contains(&room) {
                        rooms.push(room);
                    }
                }
            }
            for pos in 0..MAX_ROOMS_PER_SLOT {
                enc.set_room(vector, slot, pos, rooms.get(pos).copied());
            }
        }
    }

    /// Stage 3: capacity sufficiency. Occupied slots whose room capacities
    /// fall short of enrollment get rooms appended from the
    /// capacity-descending pool until covered or the slot is full.
    fn ensure_capacity(&self, vector: &mut [i32]) {
        let enc = &self.encoding;
        for slot in 0..enc.num_slots() {
            let Some(exam) = enc.exam(vector, slot) else {
                continue;
            };
            let enrolled = self.instance.exam(exam).enrolled;
            let mut rooms = enc.rooms(vector, slot);
            let mut capacity = self.instance.capacity_of(&rooms);
            if capacity >= enrolled {
                continue;
            }

            for &candidate in self.instance.rooms_by_capacity_desc() {
                if capacity >= enrolled || rooms.len() >= MAX_ROOMS_PER_SLOT {
                    break;
                }
                if rooms.contains(&candidate) {
                    continue;
                }
                enc.set_room(vector, slot, rooms.len(), Some(candidate));
                capacity += self.instance.room(candidate).capacity;
                rooms.push(candidate);
            }

            if capacity < enrolled {
                log::debug!(
                    "repair: exam {exam} still {short} seats short after top-up",
                    short = enrolled - capacity
                );
            }
        }
    }

    /// Stage 4: permute whole slots so higher-difficulty exams come first.
    /// Stable on ties, so a repaired vector reorders to itself.
    fn order_by_difficulty(&self, vector: &mut [i32]) {
        let enc = &self.encoding;

        let mut occupied: Vec<(u32, [i32; SLOT_SIZE])> = (0..enc.num_slots())
            .filter_map(|slot| {
                enc.exam(vector, slot).map(|exam| {
                    let rooms = enc.rooms(vector, slot).len();
                    (
                        self.difficulty(exam, rooms),
                        enc.slot_contents(vector, slot),
                    )
                })
            })
            .collect();
        occupied.sort_by_key(|&(difficulty, _)| std::cmp::Reverse(difficulty));

        for (slot, (_, contents)) in occupied.iter().enumerate() {
            enc.write_slot(vector, slot, contents);
        }
        for slot in occupied.len()..enc.num_slots() {
            enc.clear_slot(vector, slot);
        }
    }

    /// Placement difficulty: exams needing many rooms, long durations, or
    /// many seats must reach the decoder first.
    pub fn difficulty(&self, exam: usize, room_count: usize) -> u32 {
        room_count as u32 * 100
            + self.instance.duration_blocks(exam) as u32 * 10
            + self.instance.exam(exam).enrolled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::evaluator::Evaluator;
    use crate::models::{ConflictPair, Exam, Room};

    fn sample_instance() -> Instance {
        let exams = vec![
            Exam::new("E0", 40, 2.0),
            Exam::new("E1", 25, 1.5),
            Exam::new("E2", 60, 2.0),
        ];
        let rooms = vec![Room::new("S0", 50), Room::new("S1", 30)];
        Instance::new(exams, rooms, vec![ConflictPair::new(0, 2)]).unwrap()
    }

    fn count_exam_occurrences(enc: &Encoding, v: &[i32], exam: usize) -> usize {
        (0..enc.num_slots())
            .filter(|&s| enc.exam(v, s) == Some(exam))
            .count()
    }

    #[test]
    fn test_uniqueness_restored() {
        let inst = sample_instance();
        let repairer = Repairer::new(&inst);
        let enc = repairer.encoding();
        let mut v = enc.empty_vector();

        // Exam 0 twice, exam 1 missing, exam 2 present.
        enc.set_exam(&mut v, 0, Some(0));
        enc.set_exam(&mut v, 1, Some(0));
        enc.set_exam(&mut v, 2, Some(2));

        repairer.repair(&mut v);
        for exam in 0..inst.num_exams() {
            assert_eq!(count_exam_occurrences(&enc, &v, exam), 1, "exam {exam}");
        }
    }

    #[test]
    fn test_room_lists_compacted_and_deduped() {
        let inst = sample_instance();
        let repairer = Repairer::new(&inst);
        let enc = repairer.encoding();
        let mut v = enc.empty_vector();

        enc.set_exam(&mut v, 0, Some(1));
        // Sentinel gap, duplicate, out-of-range raw value.
        enc.set_room(&mut v, 0, 1, Some(1));
        enc.set_room(&mut v, 0, 2, Some(1));
        v[2] = 99;

        repairer.repair(&mut v);

        // Exam 1 (25 seats) keeps room 1 (30 seats): compacted to position 0.
        let slot = (0..enc.num_slots())
            .find(|&s| enc.exam(&v, s) == Some(1))
            .unwrap();
        assert_eq!(enc.rooms(&v, slot), vec![1]);
        assert_eq!(enc.room(&v, slot, 1), None);
    }

    #[test]
    fn test_capacity_topped_up() {
        let inst = sample_instance();
        let repairer = Repairer::new(&inst);
        let enc = repairer.encoding();
        let mut v = enc.empty_vector();

        // Exam 2 needs 60 seats but lists only the 30-seat room.
        enc.set_exam(&mut v, 0, Some(2));
        enc.set_room(&mut v, 0, 0, Some(1));
        enc.set_exam(&mut v, 1, Some(0));
        enc.set_room(&mut v, 1, 0, Some(0));
        enc.set_exam(&mut v, 2, Some(1));
        enc.set_room(&mut v, 2, 0, Some(1));

        repairer.repair(&mut v);

        let slot = (0..enc.num_slots())
            .find(|&s| enc.exam(&v, s) == Some(2))
            .unwrap();
        let rooms = enc.rooms(&v, slot);
        assert!(inst.capacity_of(&rooms) >= 60);
    }

    #[test]
    fn test_difficulty_ordering() {
        let inst = sample_instance();
        let repairer = Repairer::new(&inst);
        let enc = repairer.encoding();
        let mut v = enc.empty_vector();

        enc.set_exam(&mut v, 0, Some(1)); // easiest: 25 seats, 3 blocks
        enc.set_room(&mut v, 0, 0, Some(1));
        enc.set_exam(&mut v, 1, Some(0));
        enc.set_room(&mut v, 1, 0, Some(0));
        enc.set_exam(&mut v, 2, Some(2)); // hardest: 60 seats, 2 rooms
        enc.set_room(&mut v, 2, 0, Some(0));
        enc.set_room(&mut v, 2, 1, Some(1));

        repairer.repair(&mut v);

        // E2: 2*100 + 4*10 + 60 = 300; E0: 100+40+40 = 180; E1: 100+30+25 = 155.
        assert_eq!(enc.exam(&v, 0), Some(2));
        assert_eq!(enc.exam(&v, 1), Some(0));
        assert_eq!(enc.exam(&v, 2), Some(1));
    }

    #[test]
    fn test_repair_is_idempotent() {
        let inst = sample_instance();
        let repairer = Repairer::new(&inst);
        let enc = repairer.encoding();
        let mut v = enc.empty_vector();

        // Deliberately broken vector.
        enc.set_exam(&mut v, 0, Some(0));
        enc.set_exam(&mut v, 1, Some(0));
        enc.set_room(&mut v, 0, 0, Some(0));
        enc.set_room(&mut v, 0, 1, Some(0));
        v[SLOT_SIZE + 1] = 999; // day far out of range

        repairer.repair(&mut v);
        let once = v.clone();
        repairer.repair(&mut v);
        assert_eq!(once, v);
    }

    #[test]
    fn test_repair_of_empty_vector_fills_all_exams() {
        let inst = sample_instance();
        let repairer = Repairer::new(&inst);
        let enc = repairer.encoding();
        let mut v = enc.empty_vector();

        repairer.repair(&mut v);

        for exam in 0..inst.num_exams() {
            assert_eq!(count_exam_occurrences(&enc, &v, exam), 1);
        }
        // Stage 3 gave every exam sufficient capacity from the pool.
        for slot in 0..enc.num_slots() {
            let exam = enc.exam(&v, slot).unwrap();
            let rooms = enc.rooms(&v, slot);
            assert!(inst.capacity_of(&rooms) >= inst.exam(exam).enrolled);
        }
    }

    #[test]
    fn test_repair_preserves_feasibility() {
        // A feasible vector (every exam placed, capacity satisfied) stays
        // feasible through repair.
        let inst = sample_instance();
        let repairer = Repairer::new(&inst);
        let enc = repairer.encoding();
        let evaluator = Evaluator::new(&inst);

        let mut v = enc.empty_vector();
        enc.set_exam(&mut v, 0, Some(2));
        enc.set_room(&mut v, 0, 0, Some(0));
        enc.set_room(&mut v, 0, 1, Some(1));
        enc.set_day(&mut v, 0, 0);
        enc.set_exam(&mut v, 1, Some(0));
        enc.set_room(&mut v, 1, 0, Some(0));
        enc.set_day(&mut v, 1, 12);
        enc.set_exam(&mut v, 2, Some(1));
        enc.set_room(&mut v, 2, 0, Some(1));
        enc.set_day(&mut v, 2, 24);

        let before = evaluator.evaluate(&v);
        assert!(before.is_feasible());

        repairer.repair(&mut v);
        let after = evaluator.evaluate(&v);
        assert!(after.is_feasible());
        assert!(after.constraints[0] >= before.constraints[0]);
        assert!(after.constraints[1] >= before.constraints[1]);
    }

    #[test]
    fn test_difficulty_formula() {
        let inst = sample_instance();
        let repairer = Repairer::new(&inst);
        // Exam 2: 4 blocks, 60 enrolled, 2 rooms.
        assert_eq!(repairer.difficulty(2, 2), 2 * 100 + 4 * 10 + 60);
    }
}
