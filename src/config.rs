use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_CSV_URL: &str =
    "https://docs.google.com/spreadsheets/d/1xJm8JnKXbzGdFalzKBzHjvN8cou-4fIa5jH7IbC1dWE/pub?output=csv";
const DEFAULT_SUBMISSION_FORM_URL: &str =
    "https://docs.google.com/forms/d/1ujCN1QEKRu64f9Sub2ZzqoUWXPf0B33N8Nop0PnjvTE/viewform?edit_requested=true&fbzx=-1925584451870821221";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub links: LinksConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_description")]
    pub description: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            description: default_description(),
        }
    }
}

fn default_title() -> String {
    "UCEK Project Hub".to_string()
}
fn default_description() -> String {
    "Explore and showcase projects from UCEK students.".to_string()
}

/// Where the project spreadsheet is read from.
///
/// `csv_path` wins over `csv_url` when both are set.
#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    #[serde(default = "default_csv_url")]
    pub csv_url: Option<String>,
    #[serde(default)]
    pub csv_path: Option<PathBuf>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            csv_url: default_csv_url(),
            csv_path: None,
        }
    }
}

fn default_csv_url() -> Option<String> {
    Some(DEFAULT_CSV_URL.to_string())
}

#[derive(Debug, Deserialize, Clone)]
pub struct LinksConfig {
    #[serde(default = "default_submission_form_url")]
    pub submission_form_url: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            submission_form_url: default_submission_form_url(),
        }
    }
}

fn default_submission_form_url() -> String {
    DEFAULT_SUBMISSION_FORM_URL.to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

/// Loads the configuration file at `path`.
///
/// A missing file is not an error: the built-in defaults point at the
/// published project spreadsheet and submission form. A file that exists
/// but fails to parse or validate is.
pub fn load_config(path: &Path) -> Result<Config> {
    let config = if path.exists() {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        parse_config(&content)?
    } else {
        log::debug!(
            "config file {} not found, using defaults",
            path.display()
        );
        Config::default()
    };

    validate(&config)?;
    Ok(config)
}

pub fn parse_config(content: &str) -> Result<Config> {
    toml::from_str(content).with_context(|| "Failed to parse config file")
}

fn validate(config: &Config) -> Result<()> {
    if config.server.bind.trim().is_empty() {
        anyhow::bail!("server.bind must not be empty");
    }

    if config.links.submission_form_url.trim().is_empty() {
        anyhow::bail!("links.submission_form_url must not be empty");
    }

    match (&config.source.csv_path, &config.source.csv_url) {
        (Some(_), _) => {}
        (None, Some(url)) => {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                anyhow::bail!(
                    "source.csv_url must be an http(s) URL, got '{}'",
                    url
                );
            }
        }
        (None, None) => anyhow::bail!("one of source.csv_url or source.csv_path must be set"),
    }

    Ok(())
}
