mod cycle_delay;
mod engine;
pub(crate) mod enigo_synth;
mod synth;

pub use {
    cycle_delay::CycleDelay,
    engine::{ExitReason, PlaybackEngine, PlaybackExit},
    enigo_synth::EnigoSynth,
    synth::{InputSynth, SynthFactory},
};
