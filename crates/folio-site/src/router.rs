use std::fmt;
use std::str::FromStr;

/// Pages the site can show, keyed by path.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum Route {
    #[default]
    Landing,
    Resume,
}

impl Route {
    pub const ALL: [Route; 2] = [Route::Landing, Route::Resume];

    pub fn path(self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Resume => "/resume",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Landing => "folio",
            Route::Resume => "folio · resume",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Path that matches no route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRoute(pub String);

impl fmt::Display for UnknownRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown route `{}` (expected `/` or `/resume`)", self.0)
    }
}

impl std::error::Error for UnknownRoute {}

impl FromStr for Route {
    type Err = UnknownRoute;

    /// Accepts the path with or without its leading slash and one trailing slash.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let path = trimmed.strip_suffix('/').filter(|p| !p.is_empty()).unwrap_or(trimmed);
        match path.trim_start_matches('/') {
            "" => Ok(Route::Landing),
            p if p.eq_ignore_ascii_case("resume") => Ok(Route::Resume),
            _ => Err(UnknownRoute(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_round_trip() {
        for route in Route::ALL {
            assert_eq!(route.path().parse::<Route>(), Ok(route));
        }
    }

    #[test]
    fn lenient_spellings() {
        assert_eq!("resume".parse::<Route>(), Ok(Route::Resume));
        assert_eq!("/resume/".parse::<Route>(), Ok(Route::Resume));
        assert_eq!("/Resume".parse::<Route>(), Ok(Route::Resume));
        assert_eq!("".parse::<Route>(), Ok(Route::Landing));
    }

    #[test]
    fn unknown_path_is_an_error() {
        assert_eq!("/blog".parse::<Route>(), Err(UnknownRoute("/blog".into())));
    }
}
