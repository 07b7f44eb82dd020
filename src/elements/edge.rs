// Copyright (c) 2024 Mike Tsao

use crate::prelude::*;
use derivative::Derivative;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum EdgeState {
    /// Nothing observed yet, or the input is sitting between thresholds
    /// without ever having been clearly low or high.
    #[default]
    Unknown,
    Low,
    High,
}

/// Turns a noisy analog level into one-shot rising edges, like a Schmitt
/// trigger. An edge fires on the frame the input reaches `high` after having
/// been at or below `low`. Between the two thresholds, nothing changes.
#[derive(Clone, Builder, Debug, Derivative, PartialEq, Serialize, Deserialize)]
#[derivative(Default)]
#[serde(rename_all = "kebab-case")]
#[builder(default)]
pub struct EdgeTrigger {
    /// The level at or below which the input counts as released.
    #[derivative(Default(value = "Self::DEFAULT_LOW"))]
    low: ParameterType,

    /// The level at or above which the input counts as pressed.
    #[derivative(Default(value = "Self::DEFAULT_HIGH"))]
    high: ParameterType,

    #[serde(skip)]
    #[builder(setter(skip))]
    state: EdgeState,
}
impl EdgeTrigger {
    #[allow(missing_docs)]
    pub const DEFAULT_LOW: ParameterType = 0.1;
    #[allow(missing_docs)]
    pub const DEFAULT_HIGH: ParameterType = 1.0;

    /// Creates a trigger with the given thresholds.
    pub fn new_with(low: ParameterType, high: ParameterType) -> Self {
        Self {
            low,
            high,
            state: Default::default(),
        }
    }

    /// Feeds one frame of input. Returns true only on the frame where a rising
    /// edge is detected.
    pub fn process(&mut self, value: ParameterType) -> bool {
        match self.state {
            EdgeState::Low => {
                if value >= self.high {
                    self.state = EdgeState::High;
                    return true;
                }
            }
            EdgeState::High => {
                if value <= self.low {
                    self.state = EdgeState::Low;
                }
            }
            EdgeState::Unknown => {
                if value >= self.high {
                    self.state = EdgeState::High;
                } else if value <= self.low {
                    self.state = EdgeState::Low;
                }
            }
        }
        false
    }

    /// Whether the most recent input was considered pressed.
    pub fn is_high(&self) -> bool {
        matches!(self.state, EdgeState::High)
    }

    #[allow(missing_docs)]
    pub fn low(&self) -> ParameterType {
        self.low
    }

    #[allow(missing_docs)]
    pub fn high(&self) -> ParameterType {
        self.high
    }

    /// Changes the thresholds without disturbing the current state.
    pub fn set_thresholds(&mut self, low: ParameterType, high: ParameterType) {
        self.low = low;
        self.high = high;
    }

    /// Forgets everything observed so far.
    pub fn reset(&mut self) {
        self.state = EdgeState::Unknown;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_edges(trigger: &mut EdgeTrigger, values: &[ParameterType]) -> Vec<bool> {
        values.iter().map(|v| trigger.process(*v)).collect()
    }

    #[test]
    fn fires_once_per_rising_edge() {
        let mut t = EdgeTrigger::default();
        assert_eq!(
            count_edges(&mut t, &[0.0, 10.0, 10.0, 10.0, 0.0, 10.0, 0.0]),
            vec![false, true, false, false, false, true, false]
        );
    }

    #[test]
    fn high_on_first_frame_is_not_an_edge() {
        let mut t = EdgeTrigger::default();
        assert!(!t.process(5.0), "there's no prior low state to rise from");
        assert!(t.is_high());
        assert!(!t.process(0.0));
        assert!(t.process(5.0));
    }

    #[test]
    fn hysteresis_ignores_chatter() {
        let mut t = EdgeTrigger::default();
        // Dips that don't reach the low threshold don't re-arm.
        assert_eq!(
            count_edges(&mut t, &[0.0, 1.0, 0.5, 1.0, 0.2, 1.2, 0.1, 1.0]),
            vec![false, true, false, false, false, false, false, true]
        );
    }

    #[test]
    fn custom_thresholds() {
        let mut t = EdgeTriggerBuilder::default()
            .low(1.0)
            .high(2.5)
            .build()
            .unwrap();
        assert_eq!(t.low(), 1.0);
        assert_eq!(t.high(), 2.5);
        assert_eq!(
            count_edges(&mut t, &[0.0, 2.0, 2.5, 1.5, 3.0, 0.9, 3.0]),
            vec![false, false, true, false, false, false, true]
        );
    }

    #[test]
    fn reset_forgets_state() {
        let mut t = EdgeTrigger::new_with(0.1, 1.0);
        t.process(0.0);
        t.reset();
        assert!(
            !t.process(10.0),
            "after reset, a high input has nothing to rise from"
        );
    }
}
