use macro_recorder_core::CycleDelay;
use serde::{Deserialize, Deserializer, Serialize};

/// Playback configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Pause between passes in seconds (1-60). Accepts any TOML scalar;
    /// non-numeric values fall back to 5, numbers are clamped.
    #[serde(default, deserialize_with = "deserialize_cycle_delay")]
    pub cycle_delay: CycleDelay,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCycleDelay {
    Integer(i64),
    Float(f64),
    Text(String),
}

fn deserialize_cycle_delay<'de, D>(deserializer: D) -> Result<CycleDelay, D::Error>
where
    D: Deserializer<'de>,
{
    let delay = match RawCycleDelay::deserialize(deserializer) {
        Ok(RawCycleDelay::Integer(secs)) => CycleDelay::from_secs(secs),
        Ok(RawCycleDelay::Float(secs)) => CycleDelay::from_f64(secs),
        Ok(RawCycleDelay::Text(text)) => CycleDelay::from_input(&text),
        Err(_) => CycleDelay::default(),
    };
    Ok(delay)
}
