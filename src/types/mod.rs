// Copyright (c) 2024 Mike Tsao

//! Common data types used throughout the system.

/// The most commonly used imports.
pub mod prelude {
    pub use super::{ParameterType, SampleRate, Seconds, Voltage};
}

pub use {
    numbers::{ParameterType, Voltage},
    time::{SampleRate, Seconds},
};

mod numbers;
mod time;
