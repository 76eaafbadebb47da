//! Per-severity presentation profiles.
//!
//! The console never draws anything itself; it hands these profiles to the
//! rendering layer looked up by severity.

use serde::{Deserialize, Serialize};

use myconsole_core::{Severity, SeverityGroup};

/// Font bundled with the host editor used by default profiles
pub const DEFAULT_FONT: &str = "Fonts/RobotoMono/RobotoMono-Regular.ttf";

/// RGBA colour, components in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Light grey used for log text
    pub const LIGHT_GREY: Color = Color::rgba(0.78, 0.78, 0.78, 1.0);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FontStyle {
    #[default]
    Normal,
    Bold,
    Italic,
    BoldAndItalic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAnchor {
    UpperLeft,
    UpperCenter,
    UpperRight,
    #[default]
    MiddleLeft,
    MiddleCenter,
    MiddleRight,
    LowerLeft,
    LowerCenter,
    LowerRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImagePosition {
    #[default]
    ImageLeft,
    ImageAbove,
    ImageOnly,
    TextOnly,
}

/// Padding around row content, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct RectOffset {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

/// How rows of one severity are presented
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LogStyle {
    /// Row height in pixels
    pub height: f32,
    /// Host icon name
    pub icon: String,
    /// Host texture used as the row background
    pub background: Option<String>,
    pub color: Color,
    pub font: String,
    pub font_size: u32,
    pub font_style: FontStyle,
    pub alignment: TextAnchor,
    pub image_position: ImagePosition,
    pub padding: RectOffset,
}

impl Default for LogStyle {
    fn default() -> Self {
        Self {
            height: 22.0,
            icon: String::new(),
            background: None,
            color: Color::LIGHT_GREY,
            font: DEFAULT_FONT.to_string(),
            font_size: 12,
            font_style: FontStyle::Normal,
            alignment: TextAnchor::MiddleLeft,
            image_position: ImagePosition::ImageLeft,
            padding: RectOffset {
                left: 5,
                ..Default::default()
            },
        }
    }
}

impl LogStyle {
    /// Default profile for a severity; only the icon differs between groups
    pub fn default_for(severity: Severity) -> Self {
        Self {
            icon: icon_for(severity.group()).to_string(),
            ..Self::default()
        }
    }
}

/// Host icon name for a toolbar group
pub fn icon_for(group: SeverityGroup) -> &'static str {
    match group {
        SeverityGroup::Info => "console.infoicon.sml",
        SeverityGroup::Warning => "console.warnicon.sml",
        SeverityGroup::Error => "console.erroricon.sml",
    }
}

/// Style section of the settings file
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StyleSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<LogStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<LogStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<LogStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assert: Option<LogStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exception: Option<LogStyle>,

    /// Host style names for alternating row backgrounds
    #[serde(default = "default_even_row")]
    pub log_even_style: String,
    #[serde(default = "default_odd_row")]
    pub log_odd_style: String,

    #[serde(default = "default_stack_trace_style")]
    pub stack_trace_style: String,

    #[serde(default = "default_collapse_count_style")]
    pub collapse_count_style: String,
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            info: None,
            warning: None,
            error: None,
            assert: None,
            exception: None,
            log_even_style: default_even_row(),
            log_odd_style: default_odd_row(),
            stack_trace_style: default_stack_trace_style(),
            collapse_count_style: default_collapse_count_style(),
        }
    }
}

impl StyleSettings {
    /// Profile for `severity`, creating the default one if none is configured
    pub fn style_for(&mut self, severity: Severity) -> &LogStyle {
        let slot = match severity {
            Severity::Info => &mut self.info,
            Severity::Warning => &mut self.warning,
            Severity::Error => &mut self.error,
            Severity::Assert => &mut self.assert,
            Severity::Exception => &mut self.exception,
        };
        slot.get_or_insert_with(|| LogStyle::default_for(severity))
    }

    /// Row background style for the `index`-th visible row
    pub fn row_style(&self, index: usize) -> &str {
        if index % 2 == 0 {
            &self.log_even_style
        } else {
            &self.log_odd_style
        }
    }
}

fn default_even_row() -> String {
    "CN EntryBackEven".to_string()
}

fn default_odd_row() -> String {
    "CN EntryBackodd".to_string()
}

fn default_stack_trace_style() -> String {
    "CN Message".to_string()
}

fn default_collapse_count_style() -> String {
    "CN CountBadge".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_values() {
        let style = LogStyle::default_for(Severity::Info);
        assert_eq!(style.height, 22.0);
        assert_eq!(style.font_size, 12);
        assert_eq!(style.padding.left, 5);
        assert_eq!(style.color, Color::LIGHT_GREY);
        assert_eq!(style.icon, "console.infoicon.sml");
    }

    #[test]
    fn test_error_class_shares_error_icon() {
        for severity in [Severity::Error, Severity::Assert, Severity::Exception] {
            assert_eq!(LogStyle::default_for(severity).icon, "console.erroricon.sml");
        }
        assert_eq!(
            LogStyle::default_for(Severity::Warning).icon,
            "console.warnicon.sml"
        );
    }

    #[test]
    fn test_missing_profile_is_created_lazily() {
        let mut styles = StyleSettings::default();
        assert!(styles.warning.is_none());

        let icon = styles.style_for(Severity::Warning).icon.clone();
        assert_eq!(icon, "console.warnicon.sml");
        assert!(styles.warning.is_some());
    }

    #[test]
    fn test_configured_profile_is_kept() {
        let mut styles = StyleSettings {
            error: Some(LogStyle {
                font_size: 18,
                ..LogStyle::default()
            }),
            ..StyleSettings::default()
        };
        assert_eq!(styles.style_for(Severity::Error).font_size, 18);
    }

    #[test]
    fn test_partial_profile_from_toml() {
        let style: LogStyle = toml::from_str("font_size = 14\nfont_style = \"bold\"").unwrap();
        assert_eq!(style.font_size, 14);
        assert_eq!(style.font_style, FontStyle::Bold);
        assert_eq!(style.height, 22.0);
    }

    #[test]
    fn test_row_style_alternates() {
        let styles = StyleSettings::default();
        assert_eq!(styles.row_style(0), "CN EntryBackEven");
        assert_eq!(styles.row_style(1), "CN EntryBackodd");
        assert_eq!(styles.row_style(2), "CN EntryBackEven");
    }
}
