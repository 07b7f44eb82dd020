// Copyright (c) 2024 Mike Tsao

//! System utilities.

/// Commonly used imports.
pub mod prelude {
    pub use super::settings::{ArpeggiatorSettings, SettingsError};
}

pub use settings::{ArpeggiatorSettings, SettingsError};

mod settings;
