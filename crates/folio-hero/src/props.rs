/// Text shown over the hero mesh. Any field left `None` uses its default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeroProps {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
}

pub const DEFAULT_TITLE: &str = "Energy dances along unseen frontiers.";
pub const DEFAULT_SUBTITLE: &str = "LAUNCH SEQUENCE · ANOMALY 1.2";
pub const DEFAULT_DESCRIPTION: &str = "This hero blends a generative 3D wireframe form with a cinematic dark layout – ideal for a striking resume or portfolio intro.";

impl HeroProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn title_text(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    pub fn subtitle_text(&self) -> &str {
        self.subtitle.as_deref().unwrap_or(DEFAULT_SUBTITLE)
    }

    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or(DEFAULT_DESCRIPTION)
    }
}
