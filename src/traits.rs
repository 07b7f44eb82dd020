// Copyright (c) 2024 Mike Tsao

//! The traits that define many characteristics and relationships among parts of
//! the system.

use crate::prelude::*;

/// Quick import of all important traits.
pub mod prelude {
    pub use super::{Configurable, Configurables, Sequences};
}

/// A convenience struct for the fields implied by [Configurable]. Note that
/// this struct is not serde-compliant, because these fields typically aren't
/// meant to be serialized.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Configurables {
    sample_rate: SampleRate,
}
impl Configurable for Configurables {
    fn sample_rate(&self) -> SampleRate {
        self.sample_rate
    }

    fn update_sample_rate(&mut self, sample_rate: SampleRate) {
        self.sample_rate = sample_rate
    }
}

/// Something that is [Configurable] is interested in staying in sync with
/// global configuration.
pub trait Configurable {
    /// Returns this item's sample rate.
    fn sample_rate(&self) -> SampleRate {
        // Implementers that care about time must override this. Asking an
        // item that doesn't is a bug worth hearing about.
        unimplemented!("Someone asked for a SampleRate but we provided default");
    }

    /// The sample rate changed.
    #[allow(unused_variables)]
    fn update_sample_rate(&mut self, sample_rate: SampleRate) {}

    /// Sent to indicate that it's time to reset internal state.
    fn reset(&mut self) {}
}

/// A finite step generator. Patterns and arpeggios both walk a fixed number
/// of steps after being initialized, then report that they're finished.
///
/// Calling [Sequences::advance()] after [Sequences::is_finished()] has become
/// true is allowed, but whatever the generator reports afterward is
/// meaningless. Callers check first.
pub trait Sequences {
    /// A short human-readable name for this kind of generator.
    fn name(&self) -> &'static str;

    /// Rewinds to the first step. `size` is the number of steps (for
    /// patterns) or pitches (for arpeggios) to walk. `is_free_running`
    /// indicates that the walk will loop seamlessly, so generators that bounce
    /// back to their starting point should skip the final repeat.
    fn initialize(&mut self, size: usize, is_free_running: bool);

    /// Moves exactly one step forward.
    fn advance(&mut self);

    /// Whether the walk has reached its end. Never mutates.
    fn is_finished(&self) -> bool;

    /// Convenience that counts the steps remaining before
    /// [Sequences::is_finished()] becomes true. Consumes the walk.
    fn drain(&mut self) -> usize {
        let mut count = 0;
        while !self.is_finished() {
            self.advance();
            count += 1;
        }
        count
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn test_trait_configurable(mut c: impl Configurable) {
        assert_ne!(
            c.sample_rate().0,
            0,
            "Default sample rate should be reasonable"
        );
        let new_sample_rate = SampleRate(3);
        c.update_sample_rate(new_sample_rate);
        assert_eq!(
            c.sample_rate(),
            new_sample_rate,
            "Sample rate should be settable"
        );
    }

    #[test]
    fn configurables_are_configurable() {
        test_trait_configurable(Configurables::default());
    }
}
