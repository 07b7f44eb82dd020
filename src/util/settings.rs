// Copyright (c) 2024 Mike Tsao

//! Structs that hold configuration information about various parts of the
//! system. Intended to be serialized.

use crate::prelude::*;
use derivative::Derivative;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons an [ArpeggiatorSettings] can't be used.
#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    /// A pulse must last for some amount of time.
    #[error("{name} duration must be positive, but was {seconds} seconds")]
    NonPositiveDuration {
        #[allow(missing_docs)]
        name: &'static str,
        #[allow(missing_docs)]
        seconds: f64,
    },
    /// The edge detectors need a gap between their thresholds.
    #[error("edge low threshold ({low}) must be below high threshold ({high})")]
    ThresholdsInverted {
        #[allow(missing_docs)]
        low: ParameterType,
        #[allow(missing_docs)]
        high: ParameterType,
    },
}

/// Contains persistent arpeggiator settings. These are the timing constants
/// that a host normally never touches. The sample rate isn't here; hosts push
/// it through [Configurable::update_sample_rate()].
#[derive(Clone, Copy, Debug, Derivative, PartialEq, Serialize, Deserialize)]
#[derivative(Default)]
#[serde(rename_all = "kebab-case", default)]
pub struct ArpeggiatorSettings {
    /// How many ticks to ignore after construction or reset, giving the host a
    /// chance to deliver stable inputs. The tick after these is the first one
    /// processed.
    #[derivative(Default(value = "9"))]
    pub settle_ticks: usize,

    /// How long a trigger edge masks clock edges.
    #[derivative(Default(value = "Seconds(5e-5)"))]
    pub trigger_latch_duration: Seconds,

    /// Length of the per-step gate pulse.
    #[derivative(Default(value = "Seconds(5e-4)"))]
    pub gate_duration: Seconds,

    /// Length of the end-of-cycle pulse.
    #[derivative(Default(value = "Seconds(5e-3)"))]
    pub end_of_cycle_duration: Seconds,

    /// Length of the end-of-sequence pulse.
    #[derivative(Default(value = "Seconds(5e-3)"))]
    pub end_of_sequence_duration: Seconds,

    /// Level at or below which a gate or button counts as released.
    #[derivative(Default(value = "EdgeTrigger::DEFAULT_LOW"))]
    pub edge_low_threshold: ParameterType,

    /// Level at or above which a gate or button counts as pressed.
    #[derivative(Default(value = "EdgeTrigger::DEFAULT_HIGH"))]
    pub edge_high_threshold: ParameterType,
}
impl ArpeggiatorSettings {
    /// Checks that every field is usable.
    pub fn validate(&self) -> Result<(), SettingsError> {
        for (name, duration) in [
            ("trigger latch", self.trigger_latch_duration),
            ("gate", self.gate_duration),
            ("end-of-cycle", self.end_of_cycle_duration),
            ("end-of-sequence", self.end_of_sequence_duration),
        ] {
            if !duration.is_positive() {
                return Err(SettingsError::NonPositiveDuration {
                    name,
                    seconds: duration.0,
                });
            }
        }
        // Written this way so that NaN thresholds are rejected too.
        if !(self.edge_low_threshold < self.edge_high_threshold) {
            return Err(SettingsError::ThresholdsInverted {
                low: self.edge_low_threshold,
                high: self.edge_high_threshold,
            });
        }
        Ok(())
    }

    /// Parses settings from JSON, filling in defaults for anything missing,
    /// and validates the result.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serializes these settings to JSON.
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let s = ArpeggiatorSettings::default();
        assert!(s.validate().is_ok());
        assert_eq!(s.settle_ticks, 9);
        assert_eq!(s.trigger_latch_duration, Seconds(5e-5));
        assert_eq!(s.gate_duration, Seconds(5e-4));
        assert_eq!(s.end_of_cycle_duration, Seconds(5e-3));
        assert_eq!(s.end_of_sequence_duration, Seconds(5e-3));
    }

    #[test]
    fn json_round_trip_and_partial_documents() {
        let s = ArpeggiatorSettings {
            settle_ticks: 0,
            gate_duration: Seconds(0.01),
            ..Default::default()
        };
        let json = s.to_json().unwrap();
        assert!(json.contains("settle-ticks"), "fields should be kebab-case");
        assert_eq!(ArpeggiatorSettings::from_json(&json).unwrap(), s);

        let partial = ArpeggiatorSettings::from_json(r#"{ "settle-ticks": 3 }"#).unwrap();
        assert_eq!(partial.settle_ticks, 3);
        assert_eq!(partial.gate_duration, Seconds(5e-4));

        assert!(ArpeggiatorSettings::from_json("{ not json").is_err());
    }

    #[test]
    fn bad_settings_are_rejected() {
        let s = ArpeggiatorSettings {
            gate_duration: Seconds::zero(),
            ..Default::default()
        };
        assert_eq!(
            s.validate(),
            Err(SettingsError::NonPositiveDuration {
                name: "gate",
                seconds: 0.0
            })
        );

        let s = ArpeggiatorSettings {
            edge_low_threshold: 2.0,
            edge_high_threshold: 1.0,
            ..Default::default()
        };
        assert!(matches!(
            s.validate(),
            Err(SettingsError::ThresholdsInverted { .. })
        ));

        let s = ArpeggiatorSettings {
            edge_low_threshold: f64::NAN,
            ..Default::default()
        };
        assert!(s.validate().is_err());

        assert!(
            ArpeggiatorSettings::from_json(r#"{ "end-of-cycle-duration": -1.0 }"#).is_err(),
            "from_json() should validate"
        );
    }
}
