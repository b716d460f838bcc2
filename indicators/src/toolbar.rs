//! Whether the overlay should be drawn at all, as controlled by the toolbar button and the game UI.

use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::settings::{read_optional, write_file, SettingsError};

/// Name of the mutable state file inside the plugin data directory.
pub const STATE_FILE: &str = "state.toml";

/// Host events that change overlay visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityEvent {
    /// The toolbar button was clicked.
    ToolbarToggled,
    /// The application launcher button was switched on.
    LauncherOn,
    /// The application launcher button was switched off.
    LauncherOff,
    /// The game hid its UI (e.g. for screenshots).
    GameUiHidden,
    /// The game UI came back.
    GameUiShown,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StateFile {
    active: Option<bool>,
}

/// Two independent switches; the overlay draws only while both are on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolbarState {
    /// User switch, persisted across sessions.
    pub visible_by_toolbars: bool,
    /// Follows the game's own hide-UI key. Not persisted.
    pub visible_by_game_ui: bool,
}

impl Default for ToolbarState {
    fn default() -> Self {
        Self {
            visible_by_toolbars: true,
            visible_by_game_ui: true,
        }
    }
}

impl ToolbarState {
    /// Whether markers should be drawn.
    pub fn is_visible(&self) -> bool {
        self.visible_by_game_ui && self.visible_by_toolbars
    }

    /// Applies an event, returning whether overall visibility changed.
    pub fn apply(&mut self, event: VisibilityEvent) -> bool {
        let before = self.is_visible();
        match event {
            VisibilityEvent::ToolbarToggled => self.visible_by_toolbars = !self.visible_by_toolbars,
            VisibilityEvent::LauncherOn => self.visible_by_toolbars = true,
            VisibilityEvent::LauncherOff => self.visible_by_toolbars = false,
            VisibilityEvent::GameUiHidden => self.visible_by_game_ui = false,
            VisibilityEvent::GameUiShown => self.visible_by_game_ui = true,
        }
        let after = self.is_visible();
        if before != after {
            debug!("{event:?}: overlay visible = {after}");
        }
        before != after
    }

    /// Restores the toolbar switch from `path`. A missing file or key means visible.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let file: StateFile = match read_optional(path)? {
            Some(contents) => toml::from_str(&contents)?,
            None => StateFile::default(),
        };
        Ok(Self {
            visible_by_toolbars: file.active.unwrap_or(true),
            visible_by_game_ui: true,
        })
    }

    /// Persists the toolbar switch to `path`.
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let file = StateFile {
            active: Some(self.visible_by_toolbars),
        };
        write_file(path, &toml::to_string(&file)?)?;
        info!("saved overlay state to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn both_switches_must_be_on() {
        let mut state = ToolbarState::default();
        assert!(state.is_visible());

        assert!(state.apply(VisibilityEvent::GameUiHidden));
        assert!(!state.is_visible());
        // toggling the toolbar while the UI is hidden changes nothing visible.
        assert!(!state.apply(VisibilityEvent::ToolbarToggled));
        assert!(!state.apply(VisibilityEvent::GameUiShown));
        assert!(!state.is_visible());

        assert!(state.apply(VisibilityEvent::LauncherOn));
        assert!(state.is_visible());
        assert!(!state.apply(VisibilityEvent::LauncherOn));
        assert!(state.apply(VisibilityEvent::LauncherOff));
    }

    #[test]
    fn toolbar_switch_survives_a_restart() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(STATE_FILE);
        let state = ToolbarState {
            visible_by_toolbars: false,
            visible_by_game_ui: false,
        };
        state.save(&path).unwrap();

        let restored = ToolbarState::load(&path).unwrap();
        assert!(!restored.visible_by_toolbars);
        assert!(restored.visible_by_game_ui);
    }

    #[test]
    fn missing_state_means_visible() {
        let dir = tempdir().unwrap();
        assert_eq!(
            ToolbarState::load(&dir.path().join(STATE_FILE)).unwrap(),
            ToolbarState::default()
        );
        assert_eq!(toml::from_str::<StateFile>("").unwrap().active, None);
    }
}
