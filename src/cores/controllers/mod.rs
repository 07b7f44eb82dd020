// Copyright (c) 2024 Mike Tsao

pub use arpeggiator::{
    transposition_distance, ActivePitches, ArpeggiatorCore, ArpeggiatorCoreBuilder,
    ArpeggiatorInputs, ArpeggiatorOutputs, ArpeggiatorState, Port, Selector, COUNTDOWN, LAUNCH,
    MAX_STEPS, PITCH_INPUT_COUNT,
};

mod arpeggiator;
