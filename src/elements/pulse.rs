// Copyright (c) 2024 Mike Tsao

use crate::prelude::*;
use serde::{Deserialize, Serialize};

/// Produces a pulse of a given wall-clock length. Arm it with
/// [PulseGenerator::trigger()], then call [PulseGenerator::process()] once per
/// frame to learn whether the pulse is still high.
///
/// Re-triggering while a pulse is active overwrites the remaining time with
/// the new duration. It neither accumulates nor keeps the longer of the two.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PulseGenerator {
    remaining: Seconds,
}
impl PulseGenerator {
    /// (Re)arms the pulse for `duration`.
    pub fn trigger(&mut self, duration: Seconds) {
        self.remaining = Seconds(duration.0.max(0.0));
    }

    /// Consumes `delta` of the pulse. Returns true if the pulse was still
    /// high going into this frame.
    pub fn process(&mut self, delta: Seconds) -> bool {
        if self.remaining.0 > 0.0 {
            self.remaining = Seconds((self.remaining.0 - delta.0.max(0.0)).max(0.0));
            true
        } else {
            false
        }
    }

    /// How much of the current pulse is left. Zero once it has expired.
    pub fn remaining(&self) -> Seconds {
        self.remaining
    }

    /// Whether a call to [PulseGenerator::process()] would report high.
    pub fn is_high(&self) -> bool {
        self.remaining.0 > 0.0
    }
}
