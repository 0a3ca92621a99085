use crate::{KeyCode, MacroError};

use std::{fmt, panic::Location, str::FromStr};

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Selectable trigger key.
///
/// The set is fixed: function keys, the three modifiers and the tilde key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TriggerKey {
    /// F1.
    F1,
    /// F2.
    F2,
    /// F3.
    F3,
    /// F4.
    F4,
    /// F5.
    F5,
    /// F6.
    F6,
    /// F7.
    F7,
    /// F8.
    F8,
    /// F9.
    F9,
    /// F10.
    F10,
    /// F11.
    F11,
    /// F12.
    F12,
    /// Control.
    Ctrl,
    /// Alt.
    Alt,
    /// Shift.
    Shift,
    /// The tilde / backquote key.
    Tilde,
}

impl TriggerKey {
    /// Every selectable key, in menu order.
    pub const ALL: [TriggerKey; 16] = [
        TriggerKey::F6,
        TriggerKey::F7,
        TriggerKey::F8,
        TriggerKey::Tilde,
        TriggerKey::F1,
        TriggerKey::F2,
        TriggerKey::F3,
        TriggerKey::F4,
        TriggerKey::F5,
        TriggerKey::F9,
        TriggerKey::F10,
        TriggerKey::F11,
        TriggerKey::F12,
        TriggerKey::Ctrl,
        TriggerKey::Alt,
        TriggerKey::Shift,
    ];

    /// Label shown to the user and stored in the config file.
    pub fn label(self) -> &'static str {
        match self {
            TriggerKey::F1 => "F1",
            TriggerKey::F2 => "F2",
            TriggerKey::F3 => "F3",
            TriggerKey::F4 => "F4",
            TriggerKey::F5 => "F5",
            TriggerKey::F6 => "F6",
            TriggerKey::F7 => "F7",
            TriggerKey::F8 => "F8",
            TriggerKey::F9 => "F9",
            TriggerKey::F10 => "F10",
            TriggerKey::F11 => "F11",
            TriggerKey::F12 => "F12",
            TriggerKey::Ctrl => "Ctrl",
            TriggerKey::Alt => "Alt",
            TriggerKey::Shift => "Shift",
            TriggerKey::Tilde => "~",
        }
    }

    /// The captured key this trigger corresponds to.
    pub fn key_code(self) -> KeyCode {
        match self {
            TriggerKey::F1 => KeyCode::Function(1),
            TriggerKey::F2 => KeyCode::Function(2),
            TriggerKey::F3 => KeyCode::Function(3),
            TriggerKey::F4 => KeyCode::Function(4),
            TriggerKey::F5 => KeyCode::Function(5),
            TriggerKey::F6 => KeyCode::Function(6),
            TriggerKey::F7 => KeyCode::Function(7),
            TriggerKey::F8 => KeyCode::Function(8),
            TriggerKey::F9 => KeyCode::Function(9),
            TriggerKey::F10 => KeyCode::Function(10),
            TriggerKey::F11 => KeyCode::Function(11),
            TriggerKey::F12 => KeyCode::Function(12),
            TriggerKey::Ctrl => KeyCode::Control,
            TriggerKey::Alt => KeyCode::Alt,
            TriggerKey::Shift => KeyCode::Shift,
            TriggerKey::Tilde => KeyCode::Char('`'),
        }
    }
}

impl fmt::Display for TriggerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TriggerKey {
    type Err = MacroError;

    #[track_caller]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();

        let found = match name {
            "~" | "`" => Some(TriggerKey::Tilde),
            _ => TriggerKey::ALL
                .into_iter()
                .find(|key| key.label().eq_ignore_ascii_case(name)),
        };

        found.ok_or_else(|| MacroError::UnknownTriggerKey {
            name: name.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

impl TryFrom<String> for TriggerKey {
    type Error = MacroError;

    #[track_caller]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TriggerKey> for String {
    fn from(key: TriggerKey) -> Self {
        key.label().to_string()
    }
}
