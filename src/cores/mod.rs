// Copyright (c) 2024 Mike Tsao

//! Sequencing devices without any host plumbing. A core takes raw input levels
//! every tick and hands back raw output levels, so it can be dropped into any
//! runtime that can call it once per sample.

/// The most commonly used imports.
pub mod prelude {
    pub use super::controllers::{
        ArpeggiatorCore, ArpeggiatorCoreBuilder, ArpeggiatorInputs, ArpeggiatorOutputs,
        ArpeggiatorState, Port, Selector,
    };
}

pub use controllers::*;

mod controllers;
