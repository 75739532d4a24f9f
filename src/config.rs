// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs::read_to_string;
use std::path::Path;

use serde::Deserialize;

use crate::error::Fallible;

pub const CONFIG_FILE: &str = "poolcards.toml";

/// Settings read from `poolcards.toml`. Every field is optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Shown above the title.
    pub greeting: String,
    pub title: String,
    /// Port for `serve`.
    pub port: u16,
    /// Whether `serve` opens a browser tab.
    pub open_browser: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            greeting: "وقتت بخیر مهر 😎".to_string(),
            title: "کارت‌های استخر".to_string(),
            port: 8000,
            open_browser: true,
        }
    }
}

impl Config {
    /// Load the config file from `directory`, falling back to the defaults
    /// when there is none.
    pub fn load(directory: &Path) -> Fallible<Self> {
        let path = directory.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        log::debug!("Reading config from {}", path.display());
        let content = read_to_string(path)?;
        Self::parse(&content)
    }

    fn parse(content: &str) -> Fallible<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() -> Fallible<()> {
        let dir = tempdir()?;
        assert_eq!(Config::load(dir.path())?, Config::default());
        Ok(())
    }

    #[test]
    fn test_partial_file() -> Fallible<()> {
        let dir = tempdir()?;
        write(dir.path().join(CONFIG_FILE), "port = 9123\nopen_browser = false\n")?;
        let config = Config::load(dir.path())?;
        assert_eq!(config.port, 9123);
        assert!(!config.open_browser);
        assert_eq!(config.title, Config::default().title);
        Ok(())
    }

    #[test]
    fn test_unknown_field() {
        assert!(Config::parse("colour = \"red\"").is_err());
    }

    #[test]
    fn test_wrong_type() {
        let result = Config::parse("port = \"eight thousand\"");
        assert!(result.is_err());
        let message = result.err().unwrap().to_string();
        assert!(message.starts_with("error: invalid config"));
    }
}
