// Copyright (c) 2024 Mike Tsao

//! Handles digital-audio and wall-clock time.

use core::ops::Mul;
use derivative::Derivative;
use serde::{Deserialize, Serialize};
use synonym::Synonym;

/// Represents the [seconds](https://en.wikipedia.org/wiki/Second) unit of time.
#[derive(Synonym, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Seconds(pub f64);
impl Seconds {
    /// Zero seconds.
    pub const fn zero() -> Seconds {
        Seconds(0.0)
    }

    /// Whether this is a usable, strictly positive duration.
    pub fn is_positive(&self) -> bool {
        self.0 > 0.0
    }
}
/// The duration of a single frame at the given [SampleRate].
impl From<SampleRate> for Seconds {
    fn from(value: SampleRate) -> Self {
        Self(1.0 / value.0 as f64)
    }
}

/// Samples per second. Always a positive integer; cannot be zero.
#[derive(Synonym, Serialize, Deserialize, Derivative)]
#[derivative(Default)]
#[synonym(skip(Default))]
#[serde(rename_all = "kebab-case")]
pub struct SampleRate(#[derivative(Default(value = "44100"))] pub usize);
#[allow(missing_docs)]
impl SampleRate {
    pub const DEFAULT_SAMPLE_RATE: usize = 44100;
    pub const DEFAULT: SampleRate = SampleRate::new(Self::DEFAULT_SAMPLE_RATE);

    pub const fn new(value: usize) -> Self {
        if value != 0 {
            Self(value)
        } else {
            Self(Self::DEFAULT_SAMPLE_RATE)
        }
    }

    /// The wall-clock length of one frame. The arpeggiator advances its pulse
    /// generators by this much on every tick.
    pub fn frame_duration(&self) -> Seconds {
        Seconds::from(*self)
    }
}
impl From<f64> for SampleRate {
    fn from(value: f64) -> Self {
        Self::new(value as usize)
    }
}
impl Mul<Seconds> for SampleRate {
    type Output = usize;

    /// How many frames fit in the given duration, rounded up. Handy for
    /// figuring out how many ticks a pulse stays high.
    fn mul(self, rhs: Seconds) -> Self::Output {
        (self.0 as f64 * rhs.0).ceil() as usize
    }
}
