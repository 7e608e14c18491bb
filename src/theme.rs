//! Notification colours.
//!
//! Themes only affect how the CLI paints its messages. A theme is one of the
//! named presets or `custom`, which reads colour names from
//! `[theme.custom]` in the settings file.

use confique::Config;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    Dark,
    Light,
    Custom,
    /// No colour at all.
    Plain,
}

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ThemeSettings {
    /// Colour preset: dark, light, custom, or plain.
    #[config(default = "dark")]
    pub name: ThemeName,

    /// Colours used when `name = "custom"`.
    #[config(nested)]
    pub custom: CustomColors,
}

/// Colour names for the custom theme.
///
/// Supported values: black, red, green, yellow, blue, magenta, cyan, white,
/// and their `bright-` variants (e.g. `bright-green`).
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CustomColors {
    /// Successful operations.
    #[config(default = "green")]
    pub success: String,

    /// Warnings such as a reset file.
    #[config(default = "yellow")]
    pub warning: String,

    /// Failed operations.
    #[config(default = "red")]
    pub error: String,

    /// Notification titles.
    #[config(default = "cyan")]
    pub accent: String,
}

/// Resolved ANSI escape sequences for one theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub success: &'static str,
    pub warning: &'static str,
    pub error: &'static str,
    pub accent: &'static str,
    pub reset: &'static str,
}

const RESET: &str = "\x1b[0m";

impl Palette {
    pub fn from_settings(theme: &ThemeSettings) -> Self {
        match theme.name {
            ThemeName::Dark => Palette {
                success: "\x1b[92m",
                warning: "\x1b[93m",
                error: "\x1b[91m",
                accent: "\x1b[96m",
                reset: RESET,
            },
            ThemeName::Light => Palette {
                success: "\x1b[32m",
                warning: "\x1b[33m",
                error: "\x1b[31m",
                accent: "\x1b[34m",
                reset: RESET,
            },
            ThemeName::Custom => Palette {
                success: ansi_color_code(&theme.custom.success),
                warning: ansi_color_code(&theme.custom.warning),
                error: ansi_color_code(&theme.custom.error),
                accent: ansi_color_code(&theme.custom.accent),
                reset: RESET,
            },
            ThemeName::Plain => Palette::plain(),
        }
    }

    pub fn plain() -> Self {
        Palette {
            success: "",
            warning: "",
            error: "",
            accent: "",
            reset: "",
        }
    }

    pub fn paint(&self, color: &str, text: &str) -> String {
        if color.is_empty() {
            return text.to_string();
        }
        format!("{color}{text}{}", self.reset)
    }
}

/// Unknown names fall back to the terminal's default colour.
fn ansi_color_code(name: &str) -> &'static str {
    match name.trim().to_ascii_lowercase().as_str() {
        "black" => "\x1b[30m",
        "red" => "\x1b[31m",
        "green" => "\x1b[32m",
        "yellow" => "\x1b[33m",
        "blue" => "\x1b[34m",
        "magenta" => "\x1b[35m",
        "cyan" => "\x1b[36m",
        "white" => "\x1b[37m",
        "bright-black" | "gray" | "grey" => "\x1b[90m",
        "bright-red" => "\x1b[91m",
        "bright-green" => "\x1b[92m",
        "bright-yellow" => "\x1b[93m",
        "bright-blue" => "\x1b[94m",
        "bright-magenta" => "\x1b[95m",
        "bright-cyan" => "\x1b[96m",
        "bright-white" => "\x1b[97m",
        _ => RESET,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn theme(name: ThemeName) -> ThemeSettings {
        let mut theme = ThemeSettings::builder().load().unwrap();
        theme.name = name;
        theme
    }

    #[test]
    fn defaults_to_dark() {
        let theme = ThemeSettings::builder().load().unwrap();
        assert_eq!(theme.name, ThemeName::Dark);
        assert_eq!(theme.custom.success, "green");
    }

    #[test]
    fn plain_paints_nothing() {
        let palette = Palette::from_settings(&theme(ThemeName::Plain));
        assert_eq!(palette.paint(palette.error, "boom"), "boom");
    }

    #[test]
    fn custom_reads_colour_names() {
        let mut t = theme(ThemeName::Custom);
        t.custom.success = "Bright-Green".into();
        t.custom.error = "magenta".into();
        let palette = Palette::from_settings(&t);
        assert_eq!(palette.success, "\x1b[92m");
        assert_eq!(palette.error, "\x1b[35m");
        assert_eq!(palette.paint(palette.error, "x"), "\x1b[35mx\x1b[0m");
    }

    #[test]
    fn unknown_colour_falls_back_to_reset() {
        assert_eq!(ansi_color_code("chartreuse"), RESET);
    }

    #[test]
    fn dark_and_light_differ() {
        assert_ne!(
            Palette::from_settings(&theme(ThemeName::Dark)),
            Palette::from_settings(&theme(ThemeName::Light))
        );
    }
}
