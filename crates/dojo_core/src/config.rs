use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::quiz::DEFAULT_PASS_SCORE;

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub links: LinksConfig,
    pub html: HtmlConfig,
    pub quiz: QuizConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LinksConfig {
    /// `target` attribute for links leaving the app
    pub external_target: String,
    /// `rel` attribute for links leaving the app
    pub external_rel: String,
    /// Class added to every link
    pub class: Option<String>,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            external_target: "_blank".to_string(),
            external_rel: "noreferrer".to_string(),
            class: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HtmlConfig {
    pub wrapper_class: String,
    pub list_class: Option<String>,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            wrapper_class: "space-y-3".to_string(),
            list_class: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct QuizConfig {
    /// Pass threshold for quizzes that do not set their own
    pub default_pass_score: u32,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            default_pass_score: DEFAULT_PASS_SCORE,
        }
    }
}

impl Config {
    /// The defaults bundled with the library.
    pub fn compiled_default() -> Self {
        // Validated by build.rs
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Load config from a TOML file, or return the compiled defaults if it
    /// does not exist. Keys missing from the file keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::compiled_default());
        }

        let content = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let config = toml::from_str(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn compiled_default_matches_struct_defaults() {
        // Commented-out keys in default_config.toml stay unset
        assert_eq!(Config::compiled_default(), Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config: Config = toml::from_str("[quiz]\ndefault_pass_score = 50\n").unwrap();
        assert_eq!(config.quiz.default_pass_score, 50);
        assert_eq!(config.links, LinksConfig::default());
        assert_eq!(config.html.wrapper_class, "space-y-3");
    }

    #[test]
    fn link_class_is_optional() {
        let config: Config =
            toml::from_str("[links]\nclass = \"underline\"\nexternal_rel = \"noopener noreferrer\"\n")
                .unwrap();
        assert_eq!(config.links.class.as_deref(), Some("underline"));
        assert_eq!(config.links.external_rel, "noopener noreferrer");
        assert_eq!(config.links.external_target, "_blank");
    }
}
