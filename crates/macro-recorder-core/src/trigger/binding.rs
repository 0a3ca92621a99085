use crate::{CoreResult, KeyCode, MacroError, TriggerKey, TriggerRole};

use std::panic::Location;

use error_location::ErrorLocation;
use tracing::info;

/// Role to key mapping for the three trigger keys.
///
/// The three keys are pairwise distinct: every constructor and mutator
/// rejects a key that is already bound to another role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerBindings {
    start: TriggerKey,
    play: TriggerKey,
    stop: TriggerKey,
}

impl Default for TriggerBindings {
    fn default() -> Self {
        Self {
            start: TriggerKey::F6,
            play: TriggerKey::F7,
            stop: TriggerKey::F8,
        }
    }
}

impl TriggerBindings {
    /// Build bindings from three keys.
    ///
    /// # Errors
    ///
    /// Returns [`MacroError::DuplicateTriggerKey`] if any two keys are equal.
    #[track_caller]
    pub fn new(start: TriggerKey, play: TriggerKey, stop: TriggerKey) -> CoreResult<Self> {
        let location = ErrorLocation::from(Location::caller());

        if play == start {
            return Err(MacroError::DuplicateTriggerKey {
                key: play,
                role: TriggerRole::Start,
                location,
            });
        }
        if stop == start || stop == play {
            let role = if stop == start {
                TriggerRole::Start
            } else {
                TriggerRole::Play
            };
            return Err(MacroError::DuplicateTriggerKey {
                key: stop,
                role,
                location,
            });
        }

        Ok(Self { start, play, stop })
    }

    /// Key bound to `role`.
    pub fn key(&self, role: TriggerRole) -> TriggerKey {
        match role {
            TriggerRole::Start => self.start,
            TriggerRole::Play => self.play,
            TriggerRole::Stop => self.stop,
        }
    }

    /// Role bound to `key`, if any.
    pub fn role_for(&self, key: TriggerKey) -> Option<TriggerRole> {
        TriggerRole::ALL
            .into_iter()
            .find(|role| self.key(*role) == key)
    }

    /// Bind `key` to `role`.
    ///
    /// Rebinding a role to its current key is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`MacroError::DuplicateTriggerKey`] if `key` belongs to another role.
    #[track_caller]
    pub fn rebind(&mut self, role: TriggerRole, key: TriggerKey) -> CoreResult<()> {
        match self.role_for(key) {
            Some(owner) if owner == role => return Ok(()),
            Some(owner) => {
                return Err(MacroError::DuplicateTriggerKey {
                    key,
                    role: owner,
                    location: ErrorLocation::from(Location::caller()),
                });
            }
            None => {}
        }

        match role {
            TriggerRole::Start => self.start = key,
            TriggerRole::Play => self.play = key,
            TriggerRole::Stop => self.stop = key,
        }

        info!(role = role.id(), key = %key, "Trigger key rebound");

        Ok(())
    }

    /// Keys selectable for `role`: everything not bound to another role.
    pub fn available_for(&self, role: TriggerRole) -> Vec<TriggerKey> {
        TriggerKey::ALL
            .into_iter()
            .filter(|key| self.role_for(*key).is_none_or(|owner| owner == role))
            .collect()
    }

    /// All `(role, key)` pairs in configuration order.
    pub fn pairs(&self) -> [(TriggerRole, TriggerKey); 3] {
        TriggerRole::ALL.map(|role| (role, self.key(role)))
    }

    /// Captured keys that belong to the trigger keys and must not be recorded.
    pub fn key_codes(&self) -> Vec<KeyCode> {
        self.pairs()
            .into_iter()
            .map(|(_, key)| key.key_code())
            .collect()
    }
}
