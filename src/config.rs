// src/config.rs

use serde::Deserialize;
use std::{env, fs, path::PathBuf, time::Duration};
use url::Url;

use crate::error::ScrapeError;

pub const DEFAULT_URL: &str = "https://www.the-numbers.com/movies/release-schedule";
pub const DEFAULT_OUTPUT: &str = "movies.ics";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const DEFAULT_SOURCE_LABEL: &str = "The Numbers";
pub const DEFAULT_CALENDAR_NAME: &str = "Movie Releases";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// YAML file to read settings from.
pub const CONFIG_ENV: &str = "MOVIE_CALENDAR_CONFIG";
pub const URL_ENV: &str = "MOVIE_CALENDAR_URL";
pub const OUTPUT_ENV: &str = "MOVIE_CALENDAR_OUTPUT";

pub const USAGE: &str = "\
Usage: movie_calendar [-o|--out <file.ics>]

Scrapes the release schedule and writes it as an iCalendar file.

Environment:
  MOVIE_CALENDAR_CONFIG   YAML settings file
  MOVIE_CALENDAR_URL      schedule page URL
  MOVIE_CALENDAR_OUTPUT   output path
  RUST_LOG                log filter (default: info)";

/// Run settings. Every field has a default, so an empty YAML file is valid.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub url: Url,
    pub output: PathBuf,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub source_label: String,
    pub calendar_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: Url::parse(DEFAULT_URL).expect("default URL should parse"),
            output: PathBuf::from(DEFAULT_OUTPUT),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            source_label: DEFAULT_SOURCE_LABEL.to_string(),
            calendar_name: DEFAULT_CALENDAR_NAME.to_string(),
        }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run { output: Option<PathBuf> },
    Help,
}

impl Config {
    pub fn from_yaml(text: &str) -> Result<Self, ScrapeError> {
        serde_yaml::from_str::<Option<Self>>(text)
            .map(Option::unwrap_or_default)
            .map_err(|e| ScrapeError::Config(e.to_string()))
    }

    /// Defaults, then the YAML file named by `MOVIE_CALENDAR_CONFIG`, then
    /// the URL/output environment overrides.
    pub fn load() -> Result<Self, ScrapeError> {
        let mut cfg = match env::var_os(CONFIG_ENV) {
            Some(path) => {
                let path = PathBuf::from(path);
                let text = fs::read_to_string(&path).map_err(|e| {
                    ScrapeError::Config(format!("reading {}: {}", path.display(), e))
                })?;
                Self::from_yaml(&text)?
            }
            None => Self::default(),
        };
        cfg.apply_overrides(env::var(URL_ENV).ok(), env::var(OUTPUT_ENV).ok())?;
        Ok(cfg)
    }

    pub fn apply_overrides(
        &mut self,
        url: Option<String>,
        output: Option<String>,
    ) -> Result<(), ScrapeError> {
        if let Some(raw) = url.filter(|u| !u.trim().is_empty()) {
            self.url = Url::parse(raw.trim())
                .map_err(|e| ScrapeError::Config(format!("bad URL {:?}: {}", raw, e)))?;
        }
        if let Some(out) = output.filter(|o| !o.trim().is_empty()) {
            self.output = PathBuf::from(out);
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Parse arguments (without the program name).
pub fn parse_args<I>(args: I) -> Result<Command, ScrapeError>
where
    I: IntoIterator<Item = String>,
{
    let mut output = None;
    let mut args = args.into_iter();
    while let Some(a) = args.next() {
        match a.as_str() {
            "-o" | "--out" => {
                let v = args
                    .next()
                    .ok_or_else(|| ScrapeError::Config("missing value for --out".into()))?;
                output = Some(PathBuf::from(v));
            }
            "-h" | "--help" => return Ok(Command::Help),
            other => return Err(ScrapeError::Config(format!("unknown argument: {}", other))),
        }
    }
    Ok(Command::Run { output })
}
