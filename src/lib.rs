// Copyright (c) 2024 Mike Tsao

#![warn(missing_docs, unused_imports, unused_variables)]
#![allow(rustdoc::private_intra_doc_links)]

//! A clocked control-voltage arpeggiator and step sequencer.
//!
//! The host drives an [ArpeggiatorCore](cores::ArpeggiatorCore) one tick per
//! sample, handing it the levels on its clock, trigger, button, and pitch
//! inputs. Each tick it returns an output pitch voltage and three gates: one
//! per step, one at the end of each arpeggio cycle, and one at the end of each
//! pattern sequence.
//!
//! * Use [cores::ArpeggiatorCore] for the whole engine.
//! * Use the [Pattern](elements::Pattern) and [Arpeggio](elements::Arpeggio)
//! step generators directly if you're building your own sequencer.
//! * [ArpeggiatorSettings](util::ArpeggiatorSettings) holds the timing
//! constants, and can be loaded from JSON.

/// A collection of imports that are useful to users of this crate. `use
/// arpeggiator::prelude::*;` for easier onboarding.
pub mod prelude {
    pub use super::{
        cores::prelude::*, elements::prelude::*, traits::prelude::*, types::prelude::*,
        util::prelude::*,
    };
}

pub mod cores;
pub mod elements;
pub mod traits;
pub mod types;
pub mod util;
