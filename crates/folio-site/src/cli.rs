//! Command-line and environment configuration for the `folio` binary.
//!
//! Environment variables override defaults; explicit flags override both.

use std::fmt;
use std::path::PathBuf;

use folio_ui::theme::ThemePreference;

use crate::router::Route;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const HELP_TEXT: &str = "\
folio: portfolio landing page and resume hero

USAGE:
    folio [OPTIONS]

OPTIONS:
    --route=PATH         Page to open: '/' or '/resume' (default: /)
    --theme=PREF         Theme preference: 'system', 'light' or 'dark'
    --theme-file=PATH    Read and persist the theme preference in this JSON file
    --log=FILTER         Log filter, env_logger syntax (default: RUST_LOG or info)
    --width=N            Initial window width in logical pixels (default: 1280)
    --height=N           Initial window height in logical pixels (default: 800)
    --help, -h           Show this help message
    --version, -V        Show version

ENVIRONMENT VARIABLES:
    FOLIO_ROUTE          Override --route
    FOLIO_THEME          Override --theme
    FOLIO_THEME_FILE     Override --theme-file
    RUST_LOG             Log filter when --log is not given";

/// Resolved startup configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    pub route: Route,
    /// Explicit preference; `None` defers to the theme file, then `system`.
    pub theme: Option<ThemePreference>,
    pub theme_file: Option<PathBuf>,
    pub log_filter: Option<String>,
    pub width: f64,
    pub height: f64,
    /// Ignored environment values, reported once logging is up.
    pub warnings: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            route: Route::Landing,
            theme: None,
            theme_file: None,
            log_filter: None,
            width: 1280.0,
            height: 800.0,
            warnings: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Help,
    Version,
    InvalidValue { flag: &'static str, value: String },
    MissingValue(&'static str),
    UnknownArg(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Help => f.write_str("help requested"),
            ConfigError::Version => f.write_str("version requested"),
            ConfigError::InvalidValue { flag, value } => write!(f, "invalid {flag} value: {value}"),
            ConfigError::MissingValue(flag) => write!(f, "{flag} needs a value"),
            ConfigError::UnknownArg(arg) => {
                write!(f, "unknown argument: {arg}\nrun with --help for usage information")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

const FLAGS_WITH_VALUES: [&str; 6] =
    ["--route", "--theme", "--theme-file", "--log", "--width", "--height"];

impl SiteConfig {
    /// Parses the process arguments and environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::parse_from_env_and_args(std::env::args().skip(1), |key| std::env::var(key).ok())
    }

    pub fn parse_from_env_and_args<I, S, F>(args: I, get_env: F) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(val) = get_env("FOLIO_ROUTE") {
            match val.parse() {
                Ok(route) => cfg.route = route,
                Err(err) => cfg.warnings.push(format!("FOLIO_ROUTE ignored: {err}")),
            }
        }
        if let Some(val) = get_env("FOLIO_THEME") {
            match val.parse() {
                Ok(pref) => cfg.theme = Some(pref),
                Err(err) => cfg.warnings.push(format!("FOLIO_THEME ignored: {err}")),
            }
        }
        if let Some(val) = get_env("FOLIO_THEME_FILE")
            && !val.trim().is_empty()
        {
            cfg.theme_file = Some(PathBuf::from(val));
        }

        let args: Vec<String> = args.into_iter().map(|a| a.as_ref().to_string()).collect();
        let mut i = 0;
        while i < args.len() {
            let arg = args[i].as_str();
            match arg {
                "--help" | "-h" => return Err(ConfigError::Help),
                "--version" | "-V" => return Err(ConfigError::Version),
                _ => {}
            }

            let (flag, value) = match arg.split_once('=') {
                Some((flag, value)) => (flag, value.to_string()),
                None if FLAGS_WITH_VALUES.contains(&arg) => {
                    i += 1;
                    let Some(value) = args.get(i) else {
                        let flag = FLAGS_WITH_VALUES
                            .iter()
                            .find(|f| **f == arg)
                            .copied()
                            .unwrap_or("--");
                        return Err(ConfigError::MissingValue(flag));
                    };
                    (arg, value.clone())
                }
                None => return Err(ConfigError::UnknownArg(arg.to_string())),
            };

            match flag {
                "--route" => {
                    cfg.route = value
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue { flag: "--route", value })?;
                }
                "--theme" => {
                    cfg.theme = Some(
                        value
                            .parse()
                            .map_err(|_| ConfigError::InvalidValue { flag: "--theme", value })?,
                    );
                }
                "--theme-file" => cfg.theme_file = Some(PathBuf::from(value)),
                "--log" => cfg.log_filter = Some(value),
                "--width" => cfg.width = parse_dimension("--width", value)?,
                "--height" => cfg.height = parse_dimension("--height", value)?,
                _ => return Err(ConfigError::UnknownArg(arg.to_string())),
            }
            i += 1;
        }

        Ok(cfg)
    }
}

fn parse_dimension(flag: &'static str, value: String) -> Result<f64, ConfigError> {
    match value.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n as f64),
        _ => Err(ConfigError::InvalidValue { flag, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn parse_with_env<I, S>(
        args: I,
        env_pairs: &[(&'static str, &'static str)],
    ) -> Result<SiteConfig, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let map: HashMap<&str, &str> = env_pairs.iter().copied().collect();
        SiteConfig::parse_from_env_and_args(args, |key| map.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn defaults() {
        let cfg = parse_with_env(Vec::<String>::new(), &[]).expect("parse");
        assert_eq!(cfg, SiteConfig::default());
        assert_eq!(cfg.route, Route::Landing);
        assert_eq!(cfg.theme, None);
        assert_eq!((cfg.width, cfg.height), (1280.0, 800.0));
    }

    #[test]
    fn env_overrides_apply() {
        let env = [
            ("FOLIO_ROUTE", "/resume"),
            ("FOLIO_THEME", "light"),
            ("FOLIO_THEME_FILE", "/tmp/folio-theme.json"),
        ];
        let cfg = parse_with_env(Vec::<String>::new(), &env).expect("parse");
        assert_eq!(cfg.route, Route::Resume);
        assert_eq!(cfg.theme, Some(ThemePreference::Light));
        assert_eq!(cfg.theme_file, Some(PathBuf::from("/tmp/folio-theme.json")));
        assert!(cfg.warnings.is_empty());
    }

    #[test]
    fn args_override_env() {
        let env = [("FOLIO_ROUTE", "/resume"), ("FOLIO_THEME", "light")];
        let cfg = parse_with_env(["--route=/", "--theme", "dark"], &env).expect("parse");
        assert_eq!(cfg.route, Route::Landing);
        assert_eq!(cfg.theme, Some(ThemePreference::Dark));
    }

    #[test]
    fn bad_env_value_is_ignored_with_warning() {
        let cfg = parse_with_env(Vec::<String>::new(), &[("FOLIO_THEME", "sepia")]).expect("parse");
        assert_eq!(cfg.theme, None);
        assert_eq!(cfg.warnings.len(), 1);
        assert!(cfg.warnings[0].starts_with("FOLIO_THEME"));
    }

    #[test]
    fn size_and_log_flags() {
        let cfg = parse_with_env(["--width=640", "--height", "480", "--log=folio=debug"], &[])
            .expect("parse");
        assert_eq!((cfg.width, cfg.height), (640.0, 480.0));
        assert_eq!(cfg.log_filter.as_deref(), Some("folio=debug"));
    }

    #[test]
    fn invalid_value_reports_flag() {
        let err = parse_with_env(["--width=0"], &[]);
        assert!(matches!(err, Err(ConfigError::InvalidValue { flag: "--width", .. })), "{err:?}");
        let err = parse_with_env(["--theme=sepia"], &[]);
        assert!(matches!(err, Err(ConfigError::InvalidValue { flag: "--theme", .. })), "{err:?}");
    }

    #[test]
    fn missing_value_reports_flag() {
        let err = parse_with_env(["--route"], &[]);
        assert_eq!(err, Err(ConfigError::MissingValue("--route")));
    }

    #[test]
    fn unknown_arg_reports_error() {
        let err = parse_with_env(["--mystery"], &[]);
        assert_eq!(err, Err(ConfigError::UnknownArg("--mystery".into())));
        let err = parse_with_env(["--mystery=1"], &[]);
        assert_eq!(err, Err(ConfigError::UnknownArg("--mystery=1".into())));
    }

    #[test]
    fn help_and_version_short_circuit() {
        assert_eq!(parse_with_env(["--theme=dark", "-h"], &[]), Err(ConfigError::Help));
        assert_eq!(parse_with_env(["--version"], &[]), Err(ConfigError::Version));
    }

    #[test]
    fn help_text_lists_every_flag_and_env_var() {
        for flag in FLAGS_WITH_VALUES {
            assert!(HELP_TEXT.contains(flag), "missing {flag}");
        }
        for var in ["FOLIO_ROUTE", "FOLIO_THEME", "FOLIO_THEME_FILE"] {
            assert!(HELP_TEXT.contains(var), "missing {var}");
        }
    }
}
