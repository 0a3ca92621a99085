//! Tray menu item identifiers.
//!
//! Every menu item id encodes the action it performs, so events can be
//! dispatched without keeping a table of item ids:
//! `bind:<role>:<key>`, `delay:<secs>` and `exit`.

use macro_recorder_core::{CycleDelay, TriggerKey, TriggerRole};

/// Preset cycle delays offered in the menu.
pub const CYCLE_DELAY_PRESETS: [u8; 10] = [1, 2, 3, 5, 10, 15, 20, 30, 45, 60];

/// Action behind a tray menu item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Assign a key to a trigger role.
    Bind {
        /// Role being rebound.
        role: TriggerRole,
        /// New key.
        key: TriggerKey,
    },
    /// Change the pause between passes.
    SetCycleDelay(CycleDelay),
    /// Quit the application.
    Exit,
}

impl MenuAction {
    /// Menu item id for this action.
    pub fn id(&self) -> String {
        match self {
            MenuAction::Bind { role, key } => format!("bind:{}:{}", role.id(), key.label()),
            MenuAction::SetCycleDelay(delay) => format!("delay:{}", delay.secs()),
            MenuAction::Exit => "exit".to_string(),
        }
    }

    /// Decode a menu item id. Unknown ids yield `None`.
    pub fn parse(id: &str) -> Option<Self> {
        let mut parts = id.splitn(3, ':');

        match (parts.next(), parts.next(), parts.next()) {
            (Some("bind"), Some(role), Some(key)) => Some(MenuAction::Bind {
                role: TriggerRole::from_id(role)?,
                key: key.parse().ok()?,
            }),
            (Some("delay"), Some(secs), None) => {
                let secs = secs.parse::<i64>().ok()?;
                Some(MenuAction::SetCycleDelay(CycleDelay::from_secs(secs)))
            }
            (Some("exit"), None, None) => Some(MenuAction::Exit),
            _ => None,
        }
    }
}

/// Cycle delays listed in the menu: the presets plus the current value.
pub fn cycle_delay_choices(current: CycleDelay) -> Vec<CycleDelay> {
    let mut choices: Vec<CycleDelay> = CYCLE_DELAY_PRESETS
        .iter()
        .map(|secs| CycleDelay::from(*secs))
        .collect();

    if !choices.contains(&current) {
        choices.push(current);
        choices.sort();
    }

    choices
}
