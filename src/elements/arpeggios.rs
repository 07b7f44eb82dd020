// Copyright (c) 2024 Mike Tsao

use super::steps::{Ascending, Descending, Triangle};
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter, FromRepr, IntoStaticStr};

/// The kinds of [Arpeggio], in selector order. Directions are as seen on a
/// row of pitch inputs, first input on the left.
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
pub enum ArpeggioKind {
    /// First pitch to last.
    #[default]
    Right,
    /// Last pitch to first.
    Left,
    /// First to last, then back to first.
    RightLeft,
    /// Last to first, then back to last.
    LeftRight,
}
impl ArpeggioKind {
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

/// An [Arpeggio] walks the set of active pitches, picking one per step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Arpeggio {
    #[allow(missing_docs)]
    Right(Ascending),
    #[allow(missing_docs)]
    Left(Descending),
    #[allow(missing_docs)]
    RightLeft(Triangle),
    #[allow(missing_docs)]
    LeftRight(Triangle),
}
impl From<ArpeggioKind> for Arpeggio {
    fn from(kind: ArpeggioKind) -> Self {
        match kind {
            ArpeggioKind::Right => Self::Right(Default::default()),
            ArpeggioKind::Left => Self::Left(Default::default()),
            ArpeggioKind::RightLeft => Self::RightLeft(Default::default()),
            ArpeggioKind::LeftRight => Self::LeftRight(Default::default()),
        }
    }
}
impl Default for Arpeggio {
    fn default() -> Self {
        Self::from(ArpeggioKind::default())
    }
}
impl Sequences for Arpeggio {
    fn name(&self) -> &'static str {
        self.kind().into()
    }

    fn initialize(&mut self, size: usize, is_free_running: bool) {
        match self {
            Arpeggio::Right(s) => s.initialize(size),
            Arpeggio::Left(s) => s.initialize(size),
            Arpeggio::RightLeft(s) | Arpeggio::LeftRight(s) => {
                s.initialize(size, is_free_running)
            }
        }
    }

    fn advance(&mut self) {
        match self {
            Arpeggio::Right(s) => s.advance(),
            Arpeggio::Left(s) => s.advance(),
            Arpeggio::RightLeft(s) | Arpeggio::LeftRight(s) => s.advance(),
        }
    }

    fn is_finished(&self) -> bool {
        match self {
            Arpeggio::Right(s) => s.is_finished(),
            Arpeggio::Left(s) => s.is_finished(),
            Arpeggio::RightLeft(s) | Arpeggio::LeftRight(s) => s.is_finished(),
        }
    }
}
impl Arpeggio {
    /// Which kind of arpeggio this is.
    pub fn kind(&self) -> ArpeggioKind {
        match self {
            Arpeggio::Right(_) => ArpeggioKind::Right,
            Arpeggio::Left(_) => ArpeggioKind::Left,
            Arpeggio::RightLeft(_) => ArpeggioKind::RightLeft,
            Arpeggio::LeftRight(_) => ArpeggioKind::LeftRight,
        }
    }

    /// The index of the pitch to sound at the current step. Only meaningful
    /// while [Sequences::is_finished()] is false; may be negative otherwise.
    pub fn pitch(&self) -> i32 {
        match self {
            Arpeggio::Right(s) => s.position(),
            Arpeggio::Left(s) => s.position(),
            Arpeggio::RightLeft(s) => s.rising(),
            Arpeggio::LeftRight(s) => s.falling(),
        }
    }
}

/// Owns one [Arpeggio] of every [ArpeggioKind] for the lifetime of its owner.
#[derive(Clone, Debug, PartialEq)]
pub struct ArpeggioBank {
    arpeggios: [Arpeggio; ArpeggioKind::COUNT],
}
impl Default for ArpeggioBank {
    fn default() -> Self {
        let mut arpeggios = [Arpeggio::default(); ArpeggioKind::COUNT];
        for kind in ArpeggioKind::iter() {
            arpeggios[kind.index()] = Arpeggio::from(kind);
        }
        Self { arpeggios }
    }
}
impl ArpeggioBank {
    #[allow(missing_docs)]
    pub fn get(&self, kind: ArpeggioKind) -> &Arpeggio {
        &self.arpeggios[kind.index()]
    }

    #[allow(missing_docs)]
    pub fn get_mut(&mut self, kind: ArpeggioKind) -> &mut Arpeggio {
        &mut self.arpeggios[kind.index()]
    }
}
