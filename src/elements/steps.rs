// Copyright (c) 2024 Mike Tsao

//! The step counters shared by patterns and arpeggios. Each walks a finite
//! number of steps and reports where it is; the pattern and arpeggio families
//! decide what that position means musically.

use serde::{Deserialize, Serialize};

fn to_steps(size: usize) -> i32 {
    i32::try_from(size).unwrap_or(i32::MAX)
}

/// Counts 0, 1, 2, ..., size - 1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Ascending {
    step: i32,
    size: i32,
}
impl Ascending {
    pub(crate) fn initialize(&mut self, size: usize) {
        self.size = to_steps(size);
        self.step = 0;
    }

    pub(crate) fn advance(&mut self) {
        self.step += 1;
    }

    /// The current position.
    pub fn position(&self) -> i32 {
        self.step
    }

    /// How many steps have been taken since initialization.
    pub fn count(&self) -> i32 {
        self.step
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.step == self.size
    }
}

/// Counts size - 1, size - 2, ..., 0, while also tracking how many steps have
/// been taken.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Descending {
    step: i32,
    count: i32,
}
impl Descending {
    pub(crate) fn initialize(&mut self, size: usize) {
        self.step = to_steps(size) - 1;
        self.count = 0;
    }

    pub(crate) fn advance(&mut self) {
        self.step -= 1;
        self.count += 1;
    }

    /// The current (descending) position.
    pub fn position(&self) -> i32 {
        self.step
    }

    /// How many steps have been taken since initialization.
    pub fn count(&self) -> i32 {
        self.count
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.step < 0
    }
}

/// Walks a triangle: up from 0 to `magnitude` and back down again. A
/// free-running triangle stops one step short of returning to 0, because the
/// next walk starts there anyway.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    step: i32,
    magnitude: i32,
    end: i32,
}
impl Triangle {
    pub(crate) fn initialize(&mut self, size: usize, is_free_running: bool) {
        let size = to_steps(size);
        self.magnitude = size - 1;
        let peak_and_back = size.saturating_mul(2);
        self.end = if is_free_running {
            peak_and_back.saturating_sub(2)
        } else {
            peak_and_back.saturating_sub(1)
        }
        .max(1);
        self.step = 0;
    }

    pub(crate) fn advance(&mut self) {
        self.step += 1;
    }

    /// The height of the triangle at the current step: 0, 1, ..., magnitude,
    /// ..., 1, 0.
    pub fn rising(&self) -> i32 {
        self.magnitude - (self.magnitude - self.step).abs()
    }

    /// The distance from the peak at the current step: magnitude, ..., 1, 0,
    /// 1, ..., magnitude.
    pub fn falling(&self) -> i32 {
        (self.magnitude - self.step).abs()
    }

    /// How many steps have been taken since initialization.
    pub fn count(&self) -> i32 {
        self.step
    }

    /// The number of steps in a full walk.
    pub fn end(&self) -> i32 {
        self.end
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.step == self.end
    }
}

/// Walks a fixed table of values, ignoring any requested size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Table {
    step: i32,
    values: &'static [i32],
}
impl Table {
    pub(crate) const fn new_with(values: &'static [i32]) -> Self {
        Self { step: 0, values }
    }

    pub(crate) fn initialize(&mut self) {
        self.step = 0;
    }

    pub(crate) fn advance(&mut self) {
        self.step += 1;
    }

    /// The table entry at the current step, or zero past the end.
    pub fn value(&self) -> i32 {
        usize::try_from(self.step)
            .ok()
            .and_then(|i| self.values.get(i))
            .copied()
            .unwrap_or_default()
    }

    /// How many steps have been taken since initialization.
    pub fn count(&self) -> i32 {
        self.step
    }

    /// The whole table.
    pub fn values(&self) -> &'static [i32] {
        self.values
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.step == self.values.len() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascending_walks_up() {
        let mut a = Ascending::default();
        a.initialize(3);
        let mut positions = Vec::default();
        while !a.is_finished() {
            positions.push(a.position());
            a.advance();
        }
        assert_eq!(positions, vec![0, 1, 2]);
        assert_eq!(a.count(), 3);
    }

    #[test]
    fn empty_walks_are_already_finished() {
        let mut a = Ascending::default();
        a.initialize(0);
        assert!(a.is_finished());

        let mut d = Descending::default();
        d.initialize(0);
        assert!(d.is_finished());
    }

    #[test]
    fn descending_walks_down_and_counts_up() {
        let mut d = Descending::default();
        d.initialize(4);
        let mut pairs = Vec::default();
        while !d.is_finished() {
            pairs.push((d.position(), d.count()));
            d.advance();
        }
        assert_eq!(pairs, vec![(3, 0), (2, 1), (1, 2), (0, 3)]);
    }

    #[test]
    fn triangle_shape() {
        let mut t = Triangle::default();
        t.initialize(4, false);
        assert_eq!(t.end(), 7);
        let mut rising = Vec::default();
        let mut falling = Vec::default();
        while !t.is_finished() {
            rising.push(t.rising());
            falling.push(t.falling());
            t.advance();
        }
        assert_eq!(rising, vec![0, 1, 2, 3, 2, 1, 0]);
        assert_eq!(falling, vec![3, 2, 1, 0, 1, 2, 3]);

        t.initialize(4, true);
        assert_eq!(t.end(), 6, "free-running walks skip the final repeat");
    }

    #[test]
    fn tiny_triangles_take_at_least_one_step() {
        let mut t = Triangle::default();
        for is_free_running in [false, true] {
            t.initialize(1, is_free_running);
            assert_eq!(t.end(), 1);
            assert_eq!(t.rising(), 0);
            assert_eq!(t.falling(), 0);
        }
    }

    #[test]
    fn enormous_sizes_saturate() {
        let mut t = Triangle::default();
        t.initialize(usize::MAX, false);
        assert_eq!(t.end(), i32::MAX - 1);
        assert_eq!(t.rising(), 0);
        t.initialize(i32::MAX as usize, true);
        assert_eq!(t.end(), i32::MAX - 2);

        let mut a = Ascending::default();
        a.initialize(usize::MAX);
        assert!(!a.is_finished());
        let mut d = Descending::default();
        d.initialize(usize::MAX);
        assert_eq!(d.position(), i32::MAX - 1);
    }

    #[test]
    fn table_ignores_requested_size() {
        const VALUES: [i32; 3] = [5, -1, 7];
        let mut t = Table::new_with(&VALUES);
        t.initialize();
        let mut values = Vec::default();
        while !t.is_finished() {
            values.push(t.value());
            t.advance();
        }
        assert_eq!(values, VALUES.to_vec());
        assert_eq!(t.value(), 0, "reading past the end is harmless");
    }
}
