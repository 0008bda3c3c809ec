//! Colour value stored alongside each tracker.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{error::TrackerError, marshal};

/// An sRGB colour with 8-bit channels.
///
/// Serialized as its hex string (see [`marshal::color_to_hex`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Color {
    /// Opaque colour from its three channels.
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::rgba(red, green, blue, u8::MAX)
    }

    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    pub fn is_opaque(&self) -> bool {
        self.alpha == u8::MAX
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&marshal::color_to_hex(self))
    }
}

impl FromStr for Color {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        marshal::hex_to_color(s)
    }
}

impl TryFrom<String> for Color {
    type Error = TrackerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        marshal::color_to_hex(&color)
    }
}
