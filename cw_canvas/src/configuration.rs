use std::path::Path;

use cw_core::{ErrorMsg, OwnerId};
use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Everything about how commands look that is a matter of taste rather than
/// of board state. Loaded from TOML, any field left out keeps its default.
#[derive(Clone, Debug, Deserialize, Getters, PartialEq, Serialize)]
#[serde(default)]
pub struct DrawConfiguration {
    #[get = "pub"]
    palette: Palette,
    #[get = "pub"]
    unclaimed_field: FillStyle,
    #[get = "pub"]
    claimed_field: FillStyle,
    #[get = "pub"]
    trail: FillStyle,
    #[get = "pub"]
    guide: GuideStyle,
}

/// Color names indexed by [OwnerId]. Slot 0 is what unclaimed cells are
/// painted with.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Palette(Vec<String>);

#[derive(Clone, CopyGetters, Debug, Deserialize, Getters, PartialEq, Serialize)]
pub struct FillStyle {
    #[getset(get_copy = "pub")]
    opacity: f32,
    #[getset(get_copy = "pub")]
    shadow_blur: f32,
    #[getset(get = "pub")]
    shadow_color: String,
}

#[derive(Clone, CopyGetters, Debug, Deserialize, Getters, PartialEq, Serialize)]
pub struct GuideStyle {
    #[getset(get = "pub")]
    stroke: String,
    #[getset(get_copy = "pub")]
    opacity: f32,
    #[getset(get_copy = "pub")]
    arrow_length: f32,
}

impl DrawConfiguration {
    pub fn from_toml_str(toml_def: &str) -> Result<Self> {
        Ok(toml::from_str(toml_def)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let toml_def = std::fs::read_to_string(path)?;
        Self::from_toml_str(toml_def.as_str())
    }

    /// Style for a field batch of this owner.
    pub fn field_style(&self, owner: OwnerId) -> &FillStyle {
        if owner.is_unclaimed() {
            &self.unclaimed_field
        } else {
            &self.claimed_field
        }
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }
}

impl Palette {
    pub fn new<S: Into<String>, I: IntoIterator<Item = S>>(colors: I) -> Self {
        Palette(colors.into_iter().map(Into::into).collect())
    }

    pub fn get(&self, owner: OwnerId) -> Option<&str> {
        self.0.get(owner.index()).map(String::as_str)
    }

    /// Color name for `owner`. Owners outside the palette are not valid
    /// board state.
    pub fn color_of(&self, owner: OwnerId) -> cw_core::Result<&str> {
        self.get(owner).ok_or_else(|| {
            format!(
                "owner {} has no color, palette only has {} entries",
                owner.0,
                self.0.len()
            )
            .violation_msg()
        })
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub fn fill(opacity: f32, shadow_blur: f32, shadow_color: &str) -> FillStyle {
    FillStyle {
        opacity,
        shadow_blur,
        shadow_color: shadow_color.to_string(),
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::new([
            "White", "Red", "Blue", "Green", "Yellow", "Purple", "Orange", "Cyan", "Pink",
            "Brown", "Lime", "Navy",
        ])
    }
}

impl Default for GuideStyle {
    fn default() -> Self {
        GuideStyle {
            stroke: "black".to_string(),
            opacity: 0.2,
            arrow_length: 20.0,
        }
    }
}

impl Default for DrawConfiguration {
    fn default() -> Self {
        DrawConfiguration {
            palette: Palette::default(),
            unclaimed_field: fill(1.0, 0.0, "Grey"),
            claimed_field: fill(0.7, 2.0, "Grey"),
            trail: fill(0.25, 3.0, "Black"),
            guide: GuideStyle::default(),
        }
    }
}
