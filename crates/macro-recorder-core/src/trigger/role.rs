use std::fmt;

/// Control operation a trigger key is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerRole {
    /// Toggle recording on and off.
    Start,
    /// Start looping playback.
    Play,
    /// Stop playback and recording, then clear the log.
    Stop,
}

impl TriggerRole {
    /// Every role, in configuration order.
    pub const ALL: [TriggerRole; 3] = [TriggerRole::Start, TriggerRole::Play, TriggerRole::Stop];

    /// Short identifier used in config keys and menu ids.
    pub fn id(self) -> &'static str {
        match self {
            TriggerRole::Start => "start",
            TriggerRole::Play => "play",
            TriggerRole::Stop => "stop",
        }
    }

    /// Parse the identifier produced by [`TriggerRole::id`].
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.id() == id)
    }
}

impl fmt::Display for TriggerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TriggerRole::Start => "Start recording",
            TriggerRole::Play => "Play",
            TriggerRole::Stop => "Stop",
        })
    }
}
