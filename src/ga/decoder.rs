//! Deterministic decoder: encoded vector → concrete schedule.
//!
//! Slots are resolved front to back. For each one the decoder tries, in
//! order: the preferred day with the full room list, capacity-sufficient
//! subsets of that list, neighboring days outward from the preferred one,
//! and finally any single room large enough on the least-loaded days.
//! An exam that survives every fallback unplaced is reported unassigned;
//! the evaluator turns that into a constraint violation rather than an
//! error. Decoding is pure: same vector and instance, same schedule.

use crate::models::{ExamSchedule, Instance, Placement, BLOCKS_PER_DAY, MAX_DAYS};

use super::encoding::Encoding;

/// Per-call occupancy of every `(day, block, room)` cell.
///
/// Prevents double-booking during one decode. Allocate one per concurrent
/// decode, or keep one as a scratch buffer and pass it to
/// [`Decoder::decode_into`]; it is cleared on entry.
#[derive(Debug, Clone)]
pub struct OccupancyGrid {
    num_rooms: usize,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    /// Grid for an instance's room count, all cells free.
    pub fn new(instance: &Instance) -> Self {
        Self {
            num_rooms: instance.num_rooms(),
            cells: vec![false; MAX_DAYS * BLOCKS_PER_DAY * instance.num_rooms()],
        }
    }

    /// Frees every cell.
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    #[inline]
    fn index(&self, day: usize, block: usize, room: usize) -> usize {
        (day * BLOCKS_PER_DAY + block) * self.num_rooms + room
    }

    /// Whether a single cell is free.
    #[inline]
    pub fn is_free(&self, day: usize, block: usize, room: usize) -> bool {
        !self.cells[self.index(day, block, room)]
    }

    /// Whether a room is free for `duration` blocks from `start`.
    pub fn range_free(&self, day: usize, start: usize, duration: usize, room: usize) -> bool {
        (start..start + duration).all(|b| self.is_free(day, b, room))
    }

    /// Marks a room occupied for `duration` blocks from `start`.
    pub fn occupy(&mut self, day: usize, start: usize, duration: usize, room: usize) {
        for block in start..start + duration {
            let idx = self.index(day, block, room);
            self.cells[idx] = true;
        }
    }

    /// Occupied cell count for one day, across all rooms.
    pub fn day_load(&self, day: usize) -> usize {
        let from = day * BLOCKS_PER_DAY * self.num_rooms;
        let to = from + BLOCKS_PER_DAY * self.num_rooms;
        self.cells[from..to].iter().filter(|&&c| c).count()
    }

    /// Days ordered by ascending load, ties by day index.
    fn days_by_load(&self) -> Vec<usize> {
        let mut days: Vec<usize> = (0..MAX_DAYS).collect();
        days.sort_by_key(|&d| self.day_load(d));
        days
    }
}

/// Turns encoded vectors into [`ExamSchedule`]s for one instance.
#[derive(Debug, Clone, Copy)]
pub struct Decoder<'a> {
    instance: &'a Instance,
    encoding: Encoding,
}

impl<'a> Decoder<'a> {
    /// Decoder for an instance.
    pub fn new(instance: &'a Instance) -> Self {
        Self {
            instance,
            encoding: Encoding::for_instance(instance),
        }
    }

    /// The layout this decoder expects.
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Decodes with a freshly allocated grid.
    pub fn decode(&self, vector: &[i32]) -> ExamSchedule {
        let mut grid = OccupancyGrid::new(self.instance);
        self.decode_into(vector, &mut grid)
    }

    /// Decodes reusing a caller-owned scratch grid (cleared on entry).
    pub fn decode_into(&self, vector: &[i32], grid: &mut OccupancyGrid) -> ExamSchedule {
        self.encoding.check_vector(vector);
        grid.clear();

        let mut schedule = ExamSchedule::unassigned(self.instance.num_exams());

        for slot in 0..self.encoding.num_slots() {
            let Some(exam) = self.encoding.exam(vector, slot) else {
                continue;
            };
            // Duplicate exam in a later slot: repair normally prevents this,
            // but the decoder must tolerate it.
            if schedule.is_assigned(exam) {
                continue;
            }

            let mut rooms = dedup_preserving_order(self.encoding.rooms(vector, slot));
            if rooms.is_empty() {
                continue;
            }

            let duration = self.instance.duration_blocks(exam);
            let enrolled = self.instance.exam(exam).enrolled;
            let preferred_day =
                self.encoding.day(vector, slot).rem_euclid(MAX_DAYS as i32) as usize;

            let mut found = self.earliest_in_day(grid, &rooms, duration, preferred_day);

            if found.is_none() && rooms.len() > 1 {
                if let Some((subset, hit)) =
                    self.try_subsets(grid, &rooms, duration, enrolled, preferred_day)
                {
                    rooms = subset;
                    found = Some(hit);
                }
            }

            if found.is_none() {
                found = self.try_neighbor_days(grid, &rooms, duration, preferred_day);
            }

            if found.is_none() {
                if let Some((day_block, room)) = self.last_resort(grid, duration, enrolled) {
                    log::trace!(
                        "exam {exam}: last-resort placement in room {room} on day {}",
                        day_block.0
                    );
                    rooms = vec![room];
                    found = Some(day_block);
                }
            }

            match found {
                Some((day, start_block)) => {
                    for &room in &rooms {
                        grid.occupy(day, start_block, duration, room);
                    }
                    let total_capacity = self.instance.capacity_of(&rooms);
                    schedule.assign(
                        exam,
                        Placement {
                            day,
                            start_block,
                            rooms,
                            total_capacity,
                        },
                    );
                }
                None => {
                    log::debug!("exam {exam}: no placement found, left unassigned");
                }
            }
        }

        schedule
    }

    /// Earliest start block on `day` where every listed room is free for
    /// the whole duration. Multi-room synchronization holds by construction.
    fn earliest_in_day(
        &self,
        grid: &OccupancyGrid,
        rooms: &[usize],
        duration: usize,
        day: usize,
    ) -> Option<(usize, usize)> {
        if day >= MAX_DAYS || duration == 0 || duration > BLOCKS_PER_DAY {
            return None;
        }
        for start in 0..=(BLOCKS_PER_DAY - duration) {
            if rooms.iter().all(|&r| grid.range_free(day, start, duration, r)) {
                return Some((day, start));
            }
        }
        None
    }

    /// Shrinks the room list to capacity-sufficient subsets, largest rooms
    /// first, retrying the preferred day for each size from `n-1` down to 1.
    fn try_subsets(
        &self,
        grid: &OccupancyGrid,
        rooms: &[usize],
        duration: usize,
        enrolled: u32,
        day: usize,
    ) -> Option<(Vec<usize>, (usize, usize))> {
        if self.instance.capacity_of(rooms) < enrolled {
            return None;
        }

        let mut by_capacity = rooms.to_vec();
        by_capacity.sort_by_key(|&r| std::cmp::Reverse(self.instance.room(r).capacity));

        for size in (1..by_capacity.len()).rev() {
            let subset = &by_capacity[..size];
            if self.instance.capacity_of(subset) < enrolled {
                continue;
            }
            if let Some(hit) = self.earliest_in_day(grid, subset, duration, day) {
                return Some((subset.to_vec(), hit));
            }
        }
        None
    }

    /// Scans days outward from the preferred one: +1, -1, +2, ... wrapping
    /// around the horizon, with the full room list.
    fn try_neighbor_days(
        &self,
        grid: &OccupancyGrid,
        rooms: &[usize],
        duration: usize,
        preferred_day: usize,
    ) -> Option<(usize, usize)> {
        for offset in 1..MAX_DAYS {
            let after = (preferred_day + offset) % MAX_DAYS;
            if let Some(hit) = self.earliest_in_day(grid, rooms, duration, after) {
                return Some(hit);
            }
            let before =
                (preferred_day as i32 - offset as i32).rem_euclid(MAX_DAYS as i32) as usize;
            if let Some(hit) = self.earliest_in_day(grid, rooms, duration, before) {
                return Some(hit);
            }
        }
        None
    }

    /// Last resort: any single room whose capacity alone covers enrollment,
    /// searching days by ascending occupancy to spread the load.
    fn last_resort(
        &self,
        grid: &OccupancyGrid,
        duration: usize,
        enrolled: u32,
    ) -> Option<((usize, usize), usize)> {
        if duration == 0 || duration > BLOCKS_PER_DAY {
            return None;
        }
        for day in grid.days_by_load() {
            for start in 0..=(BLOCKS_PER_DAY - duration) {
                for room in 0..self.instance.num_rooms() {
                    if self.instance.room(room).capacity >= enrolled
                        && grid.range_free(day, start, duration, room)
                    {
                        return Some(((day, start), room));
                    }
                }
            }
        }
        None
    }
}

fn dedup_preserving_order(rooms: Vec<usize>) -> Vec<usize> {
    let mut seen = Vec::with_capacity(rooms.len());
    for room in rooms {
        if !seen.contains(&room) {
            seen.push(room);
        }
    }
    seen
}
