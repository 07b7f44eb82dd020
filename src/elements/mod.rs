// Copyright (c) 2024 Mike Tsao

//! Building blocks for other parts of the system, especially the sequencing
//! cores.

/// The most commonly used imports.
pub mod prelude {
    pub use super::{
        arpeggios::{Arpeggio, ArpeggioBank, ArpeggioKind},
        edge::{EdgeTrigger, EdgeTriggerBuilder},
        patterns::{Pattern, PatternBank, PatternKind},
        pulse::PulseGenerator,
    };
}

pub use arpeggios::{Arpeggio, ArpeggioBank, ArpeggioKind};
pub use edge::{EdgeTrigger, EdgeTriggerBuilder};
pub use patterns::{Pattern, PatternBank, PatternKind, ON_THE_RUN_OFFSETS, REZ_OFFSETS};
pub use pulse::PulseGenerator;
pub use steps::{Ascending, Descending, Table, Triangle};

mod arpeggios;
mod edge;
mod patterns;
mod pulse;
mod steps;
