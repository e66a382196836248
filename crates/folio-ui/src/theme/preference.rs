use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// User-selected color scheme.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    /// Follow the platform color scheme.
    #[default]
    System,
    Light,
    Dark,
}

impl ThemePreference {
    /// Toggle order: system, light, dark.
    pub const ALL: [ThemePreference; 3] =
        [ThemePreference::System, ThemePreference::Light, ThemePreference::Dark];

    pub fn as_str(self) -> &'static str {
        match self {
            ThemePreference::System => "system",
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }

    /// Concrete scheme, using `platform` for `System`. Unknown platform
    /// schemes resolve to dark.
    pub fn resolve(self, platform: Option<ResolvedTheme>) -> ResolvedTheme {
        match self {
            ThemePreference::Light => ResolvedTheme::Light,
            ThemePreference::Dark => ResolvedTheme::Dark,
            ThemePreference::System => platform.unwrap_or(ResolvedTheme::Dark),
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of `system`, `light`, `dark`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ParseThemeError(pub String);

impl fmt::Display for ParseThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown theme `{}` (expected system, light or dark)", self.0)
    }
}

impl std::error::Error for ParseThemeError {}

impl FromStr for ThemePreference {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "system" => Ok(ThemePreference::System),
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            _ => Err(ParseThemeError(s.to_string())),
        }
    }
}

/// Scheme actually used for painting.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ResolvedTheme {
    Light,
    Dark,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively_and_prints_lowercase() {
        for pref in ThemePreference::ALL {
            let upper = pref.as_str().to_uppercase();
            assert_eq!(upper.parse::<ThemePreference>(), Ok(pref));
            assert_eq!(pref.to_string(), pref.as_str());
        }
        assert!("sepia".parse::<ThemePreference>().is_err());
    }

    #[test]
    fn system_follows_platform_and_defaults_dark() {
        let sys = ThemePreference::System;
        assert_eq!(sys.resolve(Some(ResolvedTheme::Light)), ResolvedTheme::Light);
        assert_eq!(sys.resolve(None), ResolvedTheme::Dark);
        assert_eq!(ThemePreference::Light.resolve(Some(ResolvedTheme::Dark)), ResolvedTheme::Light);
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&ThemePreference::Dark).unwrap();
        assert_eq!(json, "\"dark\"");
        let back: ThemePreference = serde_json::from_str("\"system\"").unwrap();
        assert_eq!(back, ThemePreference::System);
    }
}
