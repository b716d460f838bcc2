//! Appearance settings, read once from `settings.toml` at start-up.
//!
//! Every key is optional. A missing file or key falls back to the built-in default; a key that is
//! present but malformed is an error rather than being silently replaced.

use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
    str::FromStr,
};

use kfi_utils::{ParseError, RectOffset, Rgba};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::markers::{MarkerSlot, Palette};

/// Name of the appearance file inside the plugin data directory.
pub const SETTINGS_FILE: &str = "settings.toml";

const RECT_PREFIX: &str = "rect_";

/// Atlas source rectangles for the stock texture, in slot order.
pub const DEFAULT_RECTS: [RectOffset; MarkerSlot::COUNT] = [
    RectOffset::new(0, 64, 64, 128),
    RectOffset::new(64, 128, 64, 128),
    RectOffset::new(128, 192, 64, 128),
    RectOffset::new(192, 256, 64, 128),
    RectOffset::new(256, 384, 64, 128),
    RectOffset::new(412, 508, 28, 124),
    RectOffset::new(0, 512, 12, 20),
];

/// Errors from reading or writing the settings and state files.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Reading or writing a file failed.
    #[error("could not access {}: {source}", path.display())]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// Not valid toml, or a key of the wrong type.
    #[error("malformed toml: {0}")]
    Deserialize(#[from] toml::de::Error),

    /// Serialization failed.
    #[error("could not serialize: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A colour or rectangle string did not parse.
    #[error("bad value for `{key}`: {source}")]
    Value {
        /// Offending key.
        key: String,
        /// Parse failure.
        #[source]
        source: ParseError,
    },

    /// Unrecognised key.
    #[error("unknown setting `{0}`")]
    UnknownKey(String),

    /// Scale factor is not a positive finite number.
    #[error("display_scale_factor must be positive, got {0}")]
    ScaleFactor(f32),
}

/// On-disk layout. Rectangles are stored as flat `rect_<Slot>` keys.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SettingsFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    display_scale_factor: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    atlas_texture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    attitude_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    prograde_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    horizon_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    draw_in_front_of_cockpit: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    use_toolbar: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    use_app_launcher: Option<bool>,
    #[serde(flatten)]
    rects: BTreeMap<String, String>,
}

/// Resolved appearance settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Source rectangle of each marker in the atlas, in slot order.
    pub atlas_rects: [RectOffset; MarkerSlot::COUNT],
    /// Multiplies every marker's pixel size.
    pub display_scale_factor: f32,
    /// Atlas image, relative to the plugin data directory.
    pub atlas_texture: String,
    /// Marker colours.
    pub palette: Palette,
    /// Draw the overlay above the cockpit interior instead of behind it.
    pub draw_in_front_of_cockpit: bool,
    /// Register a toolbar button.
    pub use_toolbar: bool,
    /// Register an application launcher button.
    pub use_app_launcher: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            atlas_rects: DEFAULT_RECTS,
            display_scale_factor: 1.0,
            atlas_texture: "atlas.png".to_owned(),
            palette: Palette::default(),
            draw_in_front_of_cockpit: true,
            use_toolbar: true,
            use_app_launcher: true,
        }
    }
}

fn parse_value<T: FromStr<Err = ParseError>>(key: &str, value: &str) -> Result<T, SettingsError> {
    value.parse().map_err(|source| SettingsError::Value {
        key: key.to_owned(),
        source,
    })
}

fn parse_color(key: &str, value: Option<String>, default: Rgba) -> Result<Rgba, SettingsError> {
    value.map_or(Ok(default), |v| parse_value(key, &v))
}

/// Reads a file, mapping "not found" to `None`.
pub(crate) fn read_optional(path: &Path) -> Result<Option<String>, SettingsError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(SettingsError::Io {
            path: path.to_owned(),
            source,
        }),
    }
}

pub(crate) fn write_file(path: &Path, contents: &str) -> Result<(), SettingsError> {
    fs::write(path, contents).map_err(|source| SettingsError::Io {
        path: path.to_owned(),
        source,
    })
}

impl Settings {
    /// Loads `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        match read_optional(path)? {
            Some(contents) => {
                let settings = Self::from_toml_str(&contents)?;
                info!("loaded settings from {}", path.display());
                Ok(settings)
            }
            None => {
                info!("{} not found, using default settings", path.display());
                Ok(Self::default())
            }
        }
    }

    /// Parses settings from toml text, filling in defaults for absent keys.
    pub fn from_toml_str(contents: &str) -> Result<Self, SettingsError> {
        let file: SettingsFile = toml::from_str(contents)?;
        let defaults = Self::default();

        let mut atlas_rects = defaults.atlas_rects;
        for (key, value) in &file.rects {
            let slot = key
                .strip_prefix(RECT_PREFIX)
                .and_then(MarkerSlot::from_name)
                .ok_or_else(|| SettingsError::UnknownKey(key.clone()))?;
            let rect = parse_value(key, value)?;
            debug!("{} uses atlas rect {}", slot.name(), rect);
            if let Some(entry) = atlas_rects.get_mut(slot.index()) {
                *entry = rect;
            }
        }

        let display_scale_factor = file
            .display_scale_factor
            .unwrap_or(defaults.display_scale_factor);
        // also rejects NaN.
        if !(display_scale_factor > 0.0 && display_scale_factor.is_finite()) {
            return Err(SettingsError::ScaleFactor(display_scale_factor));
        }

        let palette = Palette {
            attitude: parse_color("attitude_color", file.attitude_color, defaults.palette.attitude)?,
            prograde: parse_color("prograde_color", file.prograde_color, defaults.palette.prograde)?,
            horizon: parse_color("horizon_color", file.horizon_color, defaults.palette.horizon)?,
        };

        Ok(Self {
            atlas_rects,
            display_scale_factor,
            atlas_texture: file.atlas_texture.unwrap_or(defaults.atlas_texture),
            palette,
            draw_in_front_of_cockpit: file
                .draw_in_front_of_cockpit
                .unwrap_or(defaults.draw_in_front_of_cockpit),
            use_toolbar: file.use_toolbar.unwrap_or(defaults.use_toolbar),
            use_app_launcher: file.use_app_launcher.unwrap_or(defaults.use_app_launcher),
        })
    }

    /// Writes every key out explicitly, e.g. to seed a user-editable file.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        let rects = MarkerSlot::ALL
            .into_iter()
            .map(|slot| (format!("{RECT_PREFIX}{}", slot.name()), self.rect(slot).to_string()))
            .collect();
        let file = SettingsFile {
            display_scale_factor: Some(self.display_scale_factor),
            atlas_texture: Some(self.atlas_texture.clone()),
            attitude_color: Some(self.palette.attitude.to_string()),
            prograde_color: Some(self.palette.prograde.to_string()),
            horizon_color: Some(self.palette.horizon.to_string()),
            draw_in_front_of_cockpit: Some(self.draw_in_front_of_cockpit),
            use_toolbar: Some(self.use_toolbar),
            use_app_launcher: Some(self.use_app_launcher),
            rects,
        };
        Ok(toml::to_string(&file)?)
    }

    /// Atlas rectangle for one slot.
    #[allow(clippy::indexing_slicing)] // index() is bounded by COUNT, the array length.
    pub fn rect(&self, slot: MarkerSlot) -> RectOffset {
        self.atlas_rects[slot.index()]
    }

    /// Depth of the overlay camera in the host's camera stack.
    pub fn overlay_camera_depth(&self) -> f32 {
        if self.draw_in_front_of_cockpit {
            10.0
        } else {
            1.0
        }
    }
}
