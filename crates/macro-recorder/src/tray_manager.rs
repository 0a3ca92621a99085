//! System tray icon with status and settings menu.
//!
//! The icon colour and tooltip follow the session status. The context menu
//! holds one key selector per trigger role, the cycle delay selector, the
//! latest recorded actions and Exit; it is rebuilt whenever one changes.

use crate::{AppError, AppResult, MenuAction, TrayIconState, cycle_delay_choices};

use std::panic::Location;

use error_location::ErrorLocation;
use macro_recorder_core::{CycleDelay, Status, TriggerBindings, TriggerKey, TriggerRole};
use tracing::{info, instrument};
use tray_icon::menu::{CheckMenuItem, Menu, MenuItem, PredefinedMenuItem, Submenu};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};

const ICON_SIZE: u32 = 32;
const TOOLTIP_PREFIX: &str = "Macro Recorder";

/// Number of recorded action lines listed in the menu.
pub const RECENT_ACTIONS: usize = 8;

/// System tray icon manager.
pub struct TrayManager {
    tray_icon: TrayIcon,
    bindings: TriggerBindings,
    cycle_delay: CycleDelay,
    recent: Vec<String>,
}

impl TrayManager {
    /// Create the tray icon in the idle state.
    #[track_caller]
    #[instrument]
    pub fn new(bindings: &TriggerBindings, cycle_delay: CycleDelay) -> AppResult<Self> {
        let menu = Self::build_menu(bindings, cycle_delay, &[])?;
        let icon = Self::load_icon(TrayIconState::Idle)?;
        let ready = Status::Ready {
            start_key: bindings.key(TriggerRole::Start),
        };

        let tray_icon = TrayIconBuilder::new()
            .with_tooltip(tooltip(&ready.to_string()))
            .with_menu(Box::new(menu))
            .with_icon(icon)
            .build()
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to create tray icon: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!("System tray icon initialized");

        Ok(Self {
            tray_icon,
            bindings: *bindings,
            cycle_delay,
            recent: Vec::new(),
        })
    }

    /// Update the icon and tooltip for a new status.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn update_status(&mut self, state: TrayIconState, text: &str) -> AppResult<()> {
        let icon = Self::load_icon(state)?;

        self.tray_icon
            .set_icon(Some(icon))
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to update icon: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        self.tray_icon
            .set_tooltip(Some(tooltip(text)))
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to update tooltip: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(())
    }

    /// Replace the context menu to reflect new settings.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn rebuild_menu(
        &mut self,
        bindings: &TriggerBindings,
        cycle_delay: CycleDelay,
    ) -> AppResult<()> {
        self.bindings = *bindings;
        self.cycle_delay = cycle_delay;
        self.refresh_menu()
    }

    /// Show the latest recorded actions in the menu.
    #[track_caller]
    #[instrument(skip(self, recent), fields(lines = recent.len()))]
    pub fn set_recent_actions(&mut self, recent: Vec<String>) -> AppResult<()> {
        if recent == self.recent {
            return Ok(());
        }
        self.recent = recent;
        self.refresh_menu()
    }

    #[track_caller]
    fn refresh_menu(&mut self) -> AppResult<()> {
        let menu = Self::build_menu(&self.bindings, self.cycle_delay, &self.recent)?;
        self.tray_icon.set_menu(Some(Box::new(menu)));
        Ok(())
    }

    #[track_caller]
    fn build_menu(
        bindings: &TriggerBindings,
        cycle_delay: CycleDelay,
        recent: &[String],
    ) -> AppResult<Menu> {
        let menu = Menu::new();

        for role in TriggerRole::ALL {
            let submenu = Self::key_submenu(bindings, role)?;
            menu.append(&submenu).map_err(|e| AppError::TrayError {
                reason: format!("Failed to add {} key menu: {}", role, e),
                location: ErrorLocation::from(Location::caller()),
            })?;
        }

        let delay_menu = Self::cycle_delay_submenu(cycle_delay)?;
        let recent_menu = Self::recent_submenu(recent)?;
        let separator = PredefinedMenuItem::separator();
        let exit_item = MenuItem::with_id(MenuAction::Exit.id(), "Exit", true, None);

        menu.append_items(&[&delay_menu, &recent_menu, &separator, &exit_item])
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to add menu items: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(menu)
    }

    /// Key selector for one role. Keys bound to the other roles are disabled.
    #[track_caller]
    fn key_submenu(bindings: &TriggerBindings, role: TriggerRole) -> AppResult<Submenu> {
        let current = bindings.key(role);
        let available = bindings.available_for(role);
        let submenu = Submenu::new(format!("{} key: {}", role_title(role), current), true);

        for key in TriggerKey::ALL {
            let item = CheckMenuItem::with_id(
                MenuAction::Bind { role, key }.id(),
                key.label(),
                available.contains(&key),
                key == current,
                None,
            );
            submenu.append(&item).map_err(|e| AppError::TrayError {
                reason: format!("Failed to add key {} to {} menu: {}", key, role, e),
                location: ErrorLocation::from(Location::caller()),
            })?;
        }

        Ok(submenu)
    }

    #[track_caller]
    fn cycle_delay_submenu(current: CycleDelay) -> AppResult<Submenu> {
        let submenu = Submenu::new(format!("Cycle delay: {}", current), true);

        for delay in cycle_delay_choices(current) {
            let item = CheckMenuItem::with_id(
                MenuAction::SetCycleDelay(delay).id(),
                delay.to_string(),
                true,
                delay == current,
                None,
            );
            submenu.append(&item).map_err(|e| AppError::TrayError {
                reason: format!("Failed to add cycle delay {}: {}", delay, e),
                location: ErrorLocation::from(Location::caller()),
            })?;
        }

        Ok(submenu)
    }

    /// Read-only list of the latest recorded actions.
    #[track_caller]
    fn recent_submenu(recent: &[String]) -> AppResult<Submenu> {
        let submenu = Submenu::new("Recent actions", true);

        for label in recent_action_labels(recent) {
            let item = MenuItem::new(label, false, None);
            submenu.append(&item).map_err(|e| AppError::TrayError {
                reason: format!("Failed to add recent action: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;
        }

        Ok(submenu)
    }

    #[track_caller]
    fn load_icon(state: TrayIconState) -> AppResult<Icon> {
        Icon::from_rgba(icon_rgba(state, ICON_SIZE), ICON_SIZE, ICON_SIZE).map_err(|e| {
            AppError::TrayError {
                reason: format!("Failed to create icon from RGBA: {}", e),
                location: ErrorLocation::from(Location::caller()),
            }
        })
    }
}

/// Filled circle in the state colour on a transparent square, as RGBA.
pub fn icon_rgba(state: TrayIconState, size: u32) -> Vec<u8> {
    let [r, g, b] = state.color();
    let center = (size as f32 - 1.0) / 2.0;
    let radius = size as f32 / 2.0 - 1.0;

    let mut rgba = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let dx = x as f32 - center;
            let dy = y as f32 - center;
            let alpha = if dx * dx + dy * dy <= radius * radius {
                0xff
            } else {
                0x00
            };
            rgba.extend_from_slice(&[r, g, b, alpha]);
        }
    }

    rgba
}

/// Menu labels for the recent action lines, newest last.
pub fn recent_action_labels(recent: &[String]) -> Vec<String> {
    if recent.is_empty() {
        return vec!["No actions recorded".to_string()];
    }

    let start = recent.len().saturating_sub(RECENT_ACTIONS);
    recent[start..].to_vec()
}

fn tooltip(text: &str) -> String {
    format!("{} - {}", TOOLTIP_PREFIX, text)
}

fn role_title(role: TriggerRole) -> &'static str {
    match role {
        TriggerRole::Start => "Start recording",
        TriggerRole::Play => "Play",
        TriggerRole::Stop => "Stop",
    }
}
