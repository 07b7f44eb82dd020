// Copyright (c) 2024 Mike Tsao

//! Numeric types used throughout the system.

use core::ops::{Add, Mul};
use serde::{Deserialize, Serialize};

/// The primitive Rust type of a knob position or a raw input level.
pub type ParameterType = f64;

/// A control voltage, in volts. Pitch voltages follow the one-volt-per-octave
/// convention, so a semitone is 1/12 V.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Voltage(pub ParameterType);
#[allow(missing_docs)]
impl Voltage {
    pub const MIN_VALUE: ParameterType = -10.0;
    pub const MAX_VALUE: ParameterType = 10.0;
    pub const MIN: Self = Self(Self::MIN_VALUE);
    pub const MAX: Self = Self(Self::MAX_VALUE);
    pub const ZERO: Self = Self(0.0);

    /// A gate output that is on.
    pub const GATE_HIGH: Self = Self(10.0);
    /// A gate output that is off.
    pub const GATE_LOW: Self = Self(0.0);

    /// One semitone, in volts.
    pub const SEMITONE: ParameterType = 1.0 / 12.0;

    /// Returns this voltage limited to [Voltage::MIN]..=[Voltage::MAX].
    pub fn clamped(self) -> Self {
        Self(self.0.clamp(Self::MIN_VALUE, Self::MAX_VALUE))
    }

    /// [Voltage::GATE_HIGH] if `is_high`, else [Voltage::GATE_LOW].
    pub const fn gate(is_high: bool) -> Self {
        if is_high {
            Self::GATE_HIGH
        } else {
            Self::GATE_LOW
        }
    }

}
impl From<ParameterType> for Voltage {
    fn from(value: ParameterType) -> Self {
        Self(value)
    }
}
impl From<Voltage> for ParameterType {
    fn from(value: Voltage) -> Self {
        value.0
    }
}
impl Add<Self> for Voltage {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}
impl Mul<ParameterType> for Voltage {
    type Output = Self;

    fn mul(self, rhs: ParameterType) -> Self::Output {
        Self(self.0 * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn clamping_keeps_voltage_in_range() {
        assert_eq!(Voltage(11.0).clamped(), Voltage::MAX);
        assert_eq!(Voltage(-200.0).clamped(), Voltage::MIN);
        assert_eq!(Voltage(3.5).clamped(), Voltage(3.5));
        assert_eq!(Voltage(f64::INFINITY).clamped(), Voltage::MAX);
    }

    #[test]
    fn gates_are_zero_or_ten_volts() {
        assert_eq!(Voltage::gate(true).0, 10.0);
        assert_eq!(Voltage::gate(false).0, 0.0);
    }

    #[test]
    fn semitones_shift_pitch() {
        let semitone = Voltage(Voltage::SEMITONE);
        assert!(approx_eq!(f64, (semitone * 12.0).0, 1.0, ulps = 2));
        assert_eq!(Voltage(2.0) + semitone * 0.0, Voltage(2.0));
        assert!(approx_eq!(
            f64,
            (Voltage(2.0) + semitone * -24.0).0,
            0.0,
            epsilon = 1e-12
        ));
    }
}
