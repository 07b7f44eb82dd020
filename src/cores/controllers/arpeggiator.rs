// Copyright (c) 2024 Mike Tsao

use crate::prelude::*;
use delegate::delegate;
use derivative::Derivative;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// How many pitch inputs the arpeggiator has.
pub const PITCH_INPUT_COUNT: usize = 6;

/// The longest pattern length a sequence commits to. Longer requests are
/// capped.
pub const MAX_STEPS: usize = 16;

/// A trigger or manual press arms a launch this many ticks out.
pub const COUNTDOWN: u8 = 3;

/// A countdown holding this value launches on the current tick.
pub const LAUNCH: u8 = 1;

/// The number of semitones to add to a pitch at a given step of a pattern.
///
/// With `scale` zero, the distance grows linearly with the pattern's step
/// counter. Any other scale is a fixed distance of one.
//
// TODO: nonzero scales are supposed to quantize to a musical scale. Until
// that lands, they all behave the same.
pub fn transposition_distance(count: i32, transpose: i32, scale: i32) -> i32 {
    if scale == 0 {
        count.saturating_mul(transpose)
    } else {
        1
    }
}

/// One input jack: the level on it, and whether anything is plugged in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Port {
    #[allow(missing_docs)]
    pub value: ParameterType,
    #[allow(missing_docs)]
    pub is_connected: bool,
}
impl Port {
    /// A jack with nothing plugged in.
    pub const DISCONNECTED: Self = Self {
        value: 0.0,
        is_connected: false,
    };

    /// A jack with a cable carrying `value`.
    pub const fn connected(value: ParameterType) -> Self {
        Self {
            value,
            is_connected: true,
        }
    }
}

/// A front-panel knob with a jack next to it. A connected jack overrides the
/// knob.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Selector {
    #[allow(missing_docs)]
    pub input: Port,
    #[allow(missing_docs)]
    pub knob: ParameterType,
}
impl Selector {
    /// A selector set by its knob alone.
    pub const fn knob(knob: ParameterType) -> Self {
        Self {
            input: Port::DISCONNECTED,
            knob,
        }
    }

    /// The effective selector level.
    pub fn value(&self) -> ParameterType {
        if self.input.is_connected {
            self.input.value
        } else {
            self.knob
        }
    }

    /// The effective level as an integer, truncated toward zero.
    pub fn as_index(&self) -> i32 {
        self.value() as i32
    }
}

/// Everything the host supplies on a single tick.
#[derive(Clone, Copy, Debug, Derivative, PartialEq, Serialize, Deserialize)]
#[derivative(Default)]
#[serde(rename_all = "kebab-case")]
pub struct ArpeggiatorInputs {
    /// Clock gate level.
    pub clock: ParameterType,
    /// Trigger gate. Whether it's connected decides between triggered and
    /// free-running modes.
    pub trigger: Port,
    /// Lock button level.
    pub lock_button: ParameterType,
    /// Manual trigger button level.
    pub manual_button: ParameterType,
    /// Candidate pitch voltages. Only connected ones take part.
    pub pitches: [Port; PITCH_INPUT_COUNT],
    /// Selects the [PatternKind].
    pub pattern: Selector,
    /// Selects the [ArpeggioKind].
    pub arpeggio: Selector,
    /// Selects the pattern length, in steps.
    #[derivative(Default(value = "Selector::knob(1.0)"))]
    pub length: Selector,
    /// Semitones of transposition per pattern step.
    pub transpose: i32,
    /// Zero for linear transposition distance; anything else for a unit
    /// distance.
    pub scale: i32,
}
impl ArpeggiatorInputs {
    /// Connects the first `pitches.len()` pitch inputs to the given voltages
    /// and disconnects the rest.
    pub fn set_pitches(&mut self, pitches: &[ParameterType]) {
        for (i, port) in self.pitches.iter_mut().enumerate() {
            *port = pitches
                .get(i)
                .map_or(Port::DISCONNECTED, |v| Port::connected(*v));
        }
    }
}

/// Everything the arpeggiator produces on a single tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ArpeggiatorOutputs {
    /// The pitch of the current step. Holds between steps.
    pub voltage: Voltage,
    /// High briefly at each step.
    pub gate: Voltage,
    /// High briefly when an arpeggio cycle ends.
    pub end_of_cycle: Voltage,
    /// High briefly when a pattern sequence ends.
    pub end_of_sequence: Voltage,
    /// 1.0 while locked, else 0.0.
    pub lock_light: ParameterType,
}

/// The pitches the arpeggio walks, compacted from the connected inputs in
/// port order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivePitches {
    pitches: [Voltage; PITCH_INPUT_COUNT],
    count: usize,
}
impl From<&ArpeggiatorInputs> for ActivePitches {
    fn from(inputs: &ArpeggiatorInputs) -> Self {
        let mut r = Self::default();
        for port in inputs.pitches.iter().filter(|p| p.is_connected) {
            r.pitches[r.count] = Voltage(port.value);
            r.count += 1;
        }
        r
    }
}
impl ActivePitches {
    #[allow(missing_docs)]
    pub fn as_slice(&self) -> &[Voltage] {
        &self.pitches[..self.count]
    }

    #[allow(missing_docs)]
    pub fn len(&self) -> usize {
        self.count
    }

    #[allow(missing_docs)]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The pitch at an arpeggio index, if the index names one.
    pub fn get(&self, index: i32) -> Option<Voltage> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.as_slice().get(i))
            .copied()
    }
}

/// The sequencing state machine. Selections here are what was committed at
/// the last sequence or cycle launch, not what the inputs currently say.
#[derive(Clone, Debug, Derivative, PartialEq, Serialize, Deserialize)]
#[derivative(Default)]
#[serde(rename_all = "kebab-case")]
pub struct ArpeggiatorState {
    /// Whether launches keep the previous selections instead of reading
    /// inputs.
    pub is_locked: bool,
    /// Whether a sequence is in progress.
    pub is_running: bool,
    /// Whether sequences loop on their own because nothing drives the trigger.
    pub is_free_running: bool,
    /// Ticks until the next sequence launch, or zero if none is pending.
    pub sequence_countdown: u8,
    /// Ticks until the next cycle launch, or zero if none is pending.
    pub cycle_countdown: u8,
    /// The active pattern.
    pub pattern: PatternKind,
    /// The active arpeggio.
    pub arpeggio: ArpeggioKind,
    /// The pattern length committed at the last sequence launch.
    #[derivative(Default(value = "1"))]
    pub length: usize,
    /// The transposition committed at the last sequence launch.
    pub transpose: i32,
    /// The scale committed at the last sequence launch.
    pub scale: i32,
    /// The pitches committed at the last cycle launch.
    pub pitches: ActivePitches,
}

/// [ArpeggiatorCore] is a clocked step sequencer that turns a handful of
/// pitch voltages into a moving line. An [Arpeggio] walks the pitches once
/// per *cycle*; after each cycle a [Pattern] takes a step, shifting every
/// pitch of the next cycle. A full walk of the pattern is a *sequence*.
///
/// With nothing plugged into the trigger input, the first clock edge starts a
/// free-running loop. Otherwise each trigger (or press of the manual button)
/// plays exactly one sequence.
///
/// Call [ArpeggiatorCore::tick()] once per frame.
#[derive(Clone, Builder, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[builder(default)]
pub struct ArpeggiatorCore {
    #[allow(missing_docs)]
    settings: ArpeggiatorSettings,

    #[serde(skip)]
    #[builder(setter(skip))]
    e: ArpeggiatorEphemerals,
}
#[derive(Clone, Debug, Default)]
struct ArpeggiatorEphemerals {
    c: Configurables,
    is_configured: bool,
    delta: Seconds,
    ticks: usize,

    clock: EdgeTrigger,
    trigger: EdgeTrigger,
    lock: EdgeTrigger,
    button: EdgeTrigger,

    // Masks clock edges that arrive together with a trigger edge.
    trigger_latch: PulseGenerator,
    gate: PulseGenerator,
    end_of_cycle: PulseGenerator,
    end_of_sequence: PulseGenerator,

    patterns: PatternBank,
    arpeggios: ArpeggioBank,

    state: ArpeggiatorState,
    outputs: ArpeggiatorOutputs,
}
impl Configurable for ArpeggiatorCore {
    delegate! {
        to self.e.c {
            fn sample_rate(&self) -> SampleRate;
        }
    }

    fn update_sample_rate(&mut self, sample_rate: SampleRate) {
        self.e.c.update_sample_rate(sample_rate);
        self.e.is_configured = false;
    }

    fn reset(&mut self) {
        self.e = ArpeggiatorEphemerals {
            c: self.e.c,
            ..Default::default()
        };
    }
}
impl ArpeggiatorCore {
    /// Creates an arpeggiator with the given settings, provided they're
    /// valid.
    pub fn new_with(settings: ArpeggiatorSettings) -> anyhow::Result<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            e: Default::default(),
        })
    }

    #[allow(missing_docs)]
    pub fn settings(&self) -> &ArpeggiatorSettings {
        &self.settings
    }

    /// Replaces the settings. Takes effect on the next tick. Invalid settings
    /// are refused and the current ones kept.
    pub fn set_settings(&mut self, settings: ArpeggiatorSettings) -> Result<(), SettingsError> {
        settings.validate()?;
        self.settings = settings;
        self.e.is_configured = false;
        Ok(())
    }

    /// A snapshot of the sequencing state.
    pub fn state(&self) -> &ArpeggiatorState {
        &self.e.state
    }

    /// The outputs produced by the most recent tick.
    pub fn outputs(&self) -> &ArpeggiatorOutputs {
        &self.e.outputs
    }

    /// The pattern currently driving the sequence.
    pub fn current_pattern(&self) -> &Pattern {
        self.e.patterns.get(self.e.state.pattern)
    }

    /// The arpeggio currently driving the cycle.
    pub fn current_arpeggio(&self) -> &Arpeggio {
        self.e.arpeggios.get(self.e.state.arpeggio)
    }

    /// How many times [ArpeggiatorCore::tick()] has been called since
    /// construction or the last reset.
    pub fn ticks(&self) -> usize {
        self.e.ticks
    }

    /// Ticks once for each element of `inputs`, writing the results to the
    /// matching element of `outputs`. Stops at the shorter of the two.
    pub fn process_block(
        &mut self,
        inputs: &[ArpeggiatorInputs],
        outputs: &mut [ArpeggiatorOutputs],
    ) {
        for (input, output) in inputs.iter().zip(outputs.iter_mut()) {
            *output = self.tick(input);
        }
    }

    fn configure(&mut self) {
        self.e.delta = self.e.c.sample_rate().frame_duration();
        let (low, high) = (
            self.settings.edge_low_threshold,
            self.settings.edge_high_threshold,
        );
        for trigger in [
            &mut self.e.clock,
            &mut self.e.trigger,
            &mut self.e.lock,
            &mut self.e.button,
        ] {
            trigger.set_thresholds(low, high);
        }
        self.e.is_configured = true;
    }

    /// Advances the arpeggiator by one frame.
    ///
    /// If no pitch inputs are connected, or the requested length is less than
    /// one, nothing happens and the previous outputs are returned unchanged.
    pub fn tick(&mut self, inputs: &ArpeggiatorInputs) -> ArpeggiatorOutputs {
        self.e.ticks += 1;
        if self.e.ticks <= self.settings.settle_ticks {
            return self.e.outputs;
        }
        if !self.e.is_configured {
            self.configure();
        }
        let tick = self.e.ticks;

        let clock_fired = self.e.clock.process(inputs.clock);
        let trigger_fired = self.e.trigger.process(inputs.trigger.value);
        let lock_fired = self.e.lock.process(inputs.lock_button);
        let button_fired = self.e.button.process(inputs.manual_button);

        let pitches = ActivePitches::from(inputs);
        let length = inputs.length.as_index();
        if pitches.is_empty() || length < 1 {
            return self.e.outputs;
        }

        if trigger_fired {
            log::trace!("{tick}: triggered");
            self.e
                .trigger_latch
                .trigger(self.settings.trigger_latch_duration);
        }
        let is_latched = self.e.trigger_latch.process(self.e.delta);

        if lock_fired {
            self.e.state.is_locked = !self.e.state.is_locked;
            log::debug!("{tick}: locked is now {}", self.e.state.is_locked);
        }

        let state = &mut self.e.state;
        if state.sequence_countdown > 0 {
            state.sequence_countdown -= 1;
            log::trace!("{tick}: sequence countdown {}", state.sequence_countdown);
        }
        if state.cycle_countdown > 0 {
            state.cycle_countdown -= 1;
            log::trace!("{tick}: cycle countdown {}", state.cycle_countdown);
        }

        let is_clocked = clock_fired && !is_latched;
        if is_clocked {
            log::trace!("{tick}: clocked");
        }

        if trigger_fired || button_fired {
            state.sequence_countdown = COUNTDOWN;
            state.cycle_countdown = COUNTDOWN;
        }

        if is_clocked && !state.is_running {
            if !inputs.trigger.is_connected {
                log::debug!("{tick}: free-running sequence starting");
                state.is_free_running = true;
                state.sequence_countdown = COUNTDOWN;
                state.cycle_countdown = LAUNCH;
            } else {
                log::trace!("{tick}: triggered mode; waiting for trigger");
                state.is_free_running = false;
            }
        }

        if state.is_free_running && state.is_running && inputs.trigger.is_connected {
            log::debug!("{tick}: trigger connected; no longer free-running");
            state.is_free_running = false;
        }

        if self.e.state.is_running && is_clocked && self.current_arpeggio().is_finished() {
            self.end_cycle(tick);
        }

        if self.e.state.sequence_countdown == LAUNCH {
            self.launch_sequence(tick, inputs, length as usize);
        }

        let is_cycle_launch = self.e.state.cycle_countdown == LAUNCH;
        if is_cycle_launch {
            self.launch_cycle(tick, inputs, pitches);
        }

        if self.e.state.is_running && (is_clocked || is_cycle_launch) {
            self.play_step(tick);
        }

        let delta = self.e.delta;
        self.e.outputs = ArpeggiatorOutputs {
            voltage: self.e.outputs.voltage,
            gate: Voltage::gate(self.e.gate.process(delta)),
            end_of_cycle: Voltage::gate(self.e.end_of_cycle.process(delta)),
            end_of_sequence: Voltage::gate(self.e.end_of_sequence.process(delta)),
            lock_light: if self.e.state.is_locked { 1.0 } else { 0.0 },
        };
        self.e.outputs
    }

    fn end_cycle(&mut self, tick: usize) {
        self.e.patterns.get_mut(self.e.state.pattern).advance();
        self.e
            .end_of_cycle
            .trigger(self.settings.end_of_cycle_duration);
        log::trace!("{tick}: finished cycle");

        if self.current_pattern().is_finished() {
            let state = &mut self.e.state;
            if state.is_free_running {
                state.sequence_countdown = COUNTDOWN;
                state.cycle_countdown = COUNTDOWN;
            }
            state.is_running = false;
            self.e
                .end_of_sequence
                .trigger(self.settings.end_of_sequence_duration);
            log::debug!("{tick}: finished sequence");
        } else {
            self.e.state.cycle_countdown = LAUNCH;
        }
    }

    fn launch_sequence(&mut self, tick: usize, inputs: &ArpeggiatorInputs, length: usize) {
        let state = &mut self.e.state;
        if !state.is_locked {
            state.pattern = PatternKind::from_selector(inputs.pattern.as_index());
            state.length = length.min(MAX_STEPS);
            state.transpose = inputs.transpose;
            state.scale = inputs.scale;
        }
        self.e
            .patterns
            .get_mut(state.pattern)
            .initialize(state.length, state.is_free_running);
        state.is_running = true;
        log::debug!(
            "{tick}: new sequence: pattern {} length {} locked {}",
            state.pattern,
            state.length,
            state.is_locked
        );
    }

    fn launch_cycle(&mut self, tick: usize, inputs: &ArpeggiatorInputs, pitches: ActivePitches) {
        let state = &mut self.e.state;
        if !state.is_locked {
            state.arpeggio = ArpeggioKind::from_selector(inputs.arpeggio.as_index());
            state.pitches = pitches;
        }
        self.e
            .arpeggios
            .get_mut(state.arpeggio)
            .initialize(state.pitches.len(), state.is_free_running);
        log::debug!(
            "{tick}: new cycle: arpeggio {} over {} pitches",
            state.arpeggio,
            state.pitches.len()
        );
    }

    fn play_step(&mut self, tick: usize) {
        let state = &self.e.state;
        let pattern = self.e.patterns.get(state.pattern);
        let arpeggio = self.e.arpeggios.get(state.arpeggio);

        let distance = transposition_distance(pattern.counter(), state.transpose, state.scale);
        // An index outside the committed pitches can only happen when a lock
        // froze an empty pitch set; play 0V rather than fail.
        let pitch = state.pitches.get(arpeggio.pitch()).unwrap_or_default();
        let shift = Voltage(Voltage::SEMITONE * distance as ParameterType);
        let voltage = (pitch + shift * pattern.offset() as ParameterType).clamped();
        log::trace!(
            "{tick}: step pitch index {} offset {} distance {distance} -> {:.4}V",
            arpeggio.pitch(),
            pattern.offset(),
            voltage.0
        );

        self.e.outputs.voltage = voltage;
        self.e.arpeggios.get_mut(self.e.state.arpeggio).advance();
        self.e.gate.trigger(self.settings.gate_duration);
    }
}
