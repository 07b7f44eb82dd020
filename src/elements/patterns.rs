// Copyright (c) 2024 Mike Tsao

use super::steps::{Ascending, Descending, Table, Triangle};
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter, FromRepr, IntoStaticStr};

/// Semitone offsets of the sixteen-step "Rez" riff.
pub const REZ_OFFSETS: [i32; 16] = [0, 12, 0, 0, 8, 0, 0, 3, 0, 0, 3, 0, 3, 0, 8, 0];

/// Semitone offsets of the eight-step "On The Run" riff.
pub const ON_THE_RUN_OFFSETS: [i32; 8] = [0, 4, 6, 4, 9, 11, 13, 11];

/// The kinds of [Pattern], in selector order.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    EnumCountMacro,
    EnumIter,
    Eq,
    FromRepr,
    Hash,
    IntoStaticStr,
    PartialEq,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum PatternKind {
    /// Offsets climb 0, 1, 2, ... for the requested length.
    #[default]
    Up,
    /// Offsets fall from length - 1 to 0.
    Down,
    /// Offsets climb to length - 1 and come back down.
    UpDown,
    /// Offsets fall to -(length - 1) and come back up.
    DownUp,
    /// A fixed sixteen-step riff.
    Rez,
    /// A fixed eight-step riff.
    #[strum(serialize = "On The Run")]
    OnTheRun,
}
impl PatternKind {
    /// Interprets a selector value. Anything that isn't a valid index falls
    /// back to the default kind.
    pub fn from_selector(selector: i32) -> Self {
        usize::try_from(selector)
            .ok()
            .and_then(Self::from_repr)
            .unwrap_or_default()
    }

    /// This kind's position in selector order.
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// A [Pattern] walks a sequence of steps. At each step it contributes a
/// semitone offset to the output pitch, and a counter that scales the
/// transposition distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Pattern {
    #[allow(missing_docs)]
    Up(Ascending),
    #[allow(missing_docs)]
    Down(Descending),
    #[allow(missing_docs)]
    UpDown(Triangle),
    #[allow(missing_docs)]
    DownUp(Triangle),
    #[allow(missing_docs)]
    Rez(Table),
    #[allow(missing_docs)]
    OnTheRun(Table),
}
impl From<PatternKind> for Pattern {
    fn from(kind: PatternKind) -> Self {
        match kind {
            PatternKind::Up => Self::Up(Default::default()),
            PatternKind::Down => Self::Down(Default::default()),
            PatternKind::UpDown => Self::UpDown(Default::default()),
            PatternKind::DownUp => Self::DownUp(Default::default()),
            PatternKind::Rez => Self::Rez(Table::new_with(&REZ_OFFSETS)),
            PatternKind::OnTheRun => Self::OnTheRun(Table::new_with(&ON_THE_RUN_OFFSETS)),
        }
    }
}
impl Default for Pattern {
    fn default() -> Self {
        Self::from(PatternKind::default())
    }
}
impl Sequences for Pattern {
    fn name(&self) -> &'static str {
        self.kind().into()
    }

    fn initialize(&mut self, size: usize, is_free_running: bool) {
        match self {
            Pattern::Up(s) => s.initialize(size),
            Pattern::Down(s) => s.initialize(size),
            Pattern::UpDown(s) | Pattern::DownUp(s) => s.initialize(size, is_free_running),
            Pattern::Rez(s) | Pattern::OnTheRun(s) => s.initialize(),
        }
    }

    fn advance(&mut self) {
        match self {
            Pattern::Up(s) => s.advance(),
            Pattern::Down(s) => s.advance(),
            Pattern::UpDown(s) | Pattern::DownUp(s) => s.advance(),
            Pattern::Rez(s) | Pattern::OnTheRun(s) => s.advance(),
        }
    }

    fn is_finished(&self) -> bool {
        match self {
            Pattern::Up(s) => s.is_finished(),
            Pattern::Down(s) => s.is_finished(),
            Pattern::UpDown(s) | Pattern::DownUp(s) => s.is_finished(),
            Pattern::Rez(s) | Pattern::OnTheRun(s) => s.is_finished(),
        }
    }
}
impl Pattern {
    /// Which kind of pattern this is.
    pub fn kind(&self) -> PatternKind {
        match self {
            Pattern::Up(_) => PatternKind::Up,
            Pattern::Down(_) => PatternKind::Down,
            Pattern::UpDown(_) => PatternKind::UpDown,
            Pattern::DownUp(_) => PatternKind::DownUp,
            Pattern::Rez(_) => PatternKind::Rez,
            Pattern::OnTheRun(_) => PatternKind::OnTheRun,
        }
    }

    /// The semitone multiplier at the current step.
    pub fn offset(&self) -> i32 {
        match self {
            Pattern::Up(s) => s.position(),
            Pattern::Down(s) => s.position(),
            Pattern::UpDown(s) => s.rising(),
            Pattern::DownUp(s) => -s.rising(),
            Pattern::Rez(s) | Pattern::OnTheRun(s) => s.value(),
        }
    }

    /// The number of steps taken so far in this walk.
    pub fn counter(&self) -> i32 {
        match self {
            Pattern::Up(s) => s.count(),
            Pattern::Down(s) => s.count(),
            Pattern::UpDown(s) | Pattern::DownUp(s) => s.count(),
            Pattern::Rez(s) | Pattern::OnTheRun(s) => s.count(),
        }
    }
}

/// Owns one [Pattern] of every [PatternKind] for the lifetime of its owner.
/// Selecting a pattern is a matter of picking a kind.
#[derive(Clone, Debug, PartialEq)]
pub struct PatternBank {
    patterns: [Pattern; PatternKind::COUNT],
}
impl Default for PatternBank {
    fn default() -> Self {
        let mut patterns = [Pattern::default(); PatternKind::COUNT];
        for kind in PatternKind::iter() {
            patterns[kind.index()] = Pattern::from(kind);
        }
        Self { patterns }
    }
}
impl PatternBank {
    #[allow(missing_docs)]
    pub fn get(&self, kind: PatternKind) -> &Pattern {
        &self.patterns[kind.index()]
    }

    #[allow(missing_docs)]
    pub fn get_mut(&mut self, kind: PatternKind) -> &mut Pattern {
        &mut self.patterns[kind.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offsets(kind: PatternKind, length: usize, is_free_running: bool) -> Vec<i32> {
        let mut p = Pattern::from(kind);
        p.initialize(length, is_free_running);
        let mut r = Vec::default();
        while !p.is_finished() {
            r.push(p.offset());
            p.advance();
        }
        r
    }

    fn counters(kind: PatternKind, length: usize, is_free_running: bool) -> Vec<i32> {
        let mut p = Pattern::from(kind);
        p.initialize(length, is_free_running);
        let mut r = Vec::default();
        while !p.is_finished() {
            r.push(p.counter());
            p.advance();
        }
        r
    }

    #[test]
    fn selector_falls_back_to_up() {
        assert_eq!(PatternKind::from_selector(0), PatternKind::Up);
        assert_eq!(PatternKind::from_selector(3), PatternKind::DownUp);
        assert_eq!(PatternKind::from_selector(5), PatternKind::OnTheRun);
        assert_eq!(PatternKind::from_selector(6), PatternKind::Up);
        assert_eq!(PatternKind::from_selector(-1), PatternKind::Up);
        assert_eq!(PatternKind::from_selector(i32::MAX), PatternKind::Up);
    }

    #[test]
    fn names() {
        let names: Vec<&'static str> = PatternKind::iter()
            .map(|k| Pattern::from(k).name())
            .collect();
        assert_eq!(
            names,
            vec!["Up", "Down", "UpDown", "DownUp", "Rez", "On The Run"]
        );
        assert_eq!(PatternKind::OnTheRun.to_string(), "On The Run");
    }

    #[test]
    fn up_and_down() {
        assert_eq!(offsets(PatternKind::Up, 4, false), vec![0, 1, 2, 3]);
        assert_eq!(counters(PatternKind::Up, 4, true), vec![0, 1, 2, 3]);
        assert_eq!(offsets(PatternKind::Down, 4, false), vec![3, 2, 1, 0]);
        assert_eq!(counters(PatternKind::Down, 4, false), vec![0, 1, 2, 3]);
    }

    #[test]
    fn up_down_and_down_up() {
        assert_eq!(
            offsets(PatternKind::UpDown, 3, false),
            vec![0, 1, 2, 1, 0]
        );
        assert_eq!(offsets(PatternKind::UpDown, 3, true), vec![0, 1, 2, 1]);
        assert_eq!(
            offsets(PatternKind::DownUp, 3, false),
            vec![0, -1, -2, -1, 0]
        );
        assert_eq!(offsets(PatternKind::DownUp, 3, true), vec![0, -1, -2, -1]);
        assert_eq!(counters(PatternKind::DownUp, 3, true), vec![0, 1, 2, 3]);
    }

    #[test]
    fn fixed_riffs() {
        for length in [1, 4, 16] {
            assert_eq!(offsets(PatternKind::Rez, length, false), REZ_OFFSETS.to_vec());
            assert_eq!(
                offsets(PatternKind::OnTheRun, length, true),
                ON_THE_RUN_OFFSETS.to_vec()
            );
        }
    }

    #[test]
    fn step_counts() {
        for length in 1..=16 {
            for is_free_running in [false, true] {
                let triangle = if is_free_running {
                    2 * length - 2
                } else {
                    2 * length - 1
                }
                .max(1);
                for (kind, expected) in [
                    (PatternKind::Up, length),
                    (PatternKind::Down, length),
                    (PatternKind::UpDown, triangle),
                    (PatternKind::DownUp, triangle),
                    (PatternKind::Rez, 16),
                    (PatternKind::OnTheRun, 8),
                ] {
                    let mut p = Pattern::from(kind);
                    p.initialize(length, is_free_running);
                    assert_eq!(
                        p.drain(),
                        expected,
                        "{kind} with length {length} (free-running {is_free_running}) took the wrong number of steps"
                    );
                }
            }
        }
    }

    #[test]
    fn is_finished_is_idempotent() {
        let mut p = Pattern::from(PatternKind::Up);
        p.initialize(1, false);
        let before = p;
        for _ in 0..5 {
            assert!(!p.is_finished());
        }
        assert_eq!(p, before);
        p.advance();
        for _ in 0..5 {
            assert!(p.is_finished());
        }
    }

    #[test]
    fn bank_holds_one_of_each() {
        let mut bank = PatternBank::default();
        for kind in PatternKind::iter() {
            assert_eq!(bank.get(kind).kind(), kind);
        }

        bank.get_mut(PatternKind::Down).initialize(3, false);
        bank.get_mut(PatternKind::Down).advance();
        assert_eq!(bank.get(PatternKind::Down).offset(), 1);
        assert_eq!(
            bank.get(PatternKind::Up),
            &Pattern::from(PatternKind::Up),
            "touching one pattern leaves the others alone"
        );
    }
}
