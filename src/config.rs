//! Landing settings, read from an optional TOML file and overridden from the
//! command line.
//!
//! ```toml
//! image = "assets/ImgWithBgStroke.png"
//! logo = "assets/FitLogo.png"
//! link = "https://www.instagram.com/fitness_club1608/"
//! window_width = 1280
//! window_height = 720
//! fps = 60
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::constants::*;
use crate::error::{LandingError, Result};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub image: PathBuf,
    pub logo: PathBuf,
    pub link: String,
    pub title: String,
    pub window_width: i32,
    pub window_height: i32,
    pub fps: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image: PathBuf::from(DEFAULT_IMAGE),
            logo: PathBuf::from(DEFAULT_LOGO),
            link: DEFAULT_LINK.to_string(),
            title: "Fitness Club".to_string(),
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            fps: FPS,
        }
    }
}

/// Values given on the command line; `None` keeps the file or default value.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub image: Option<PathBuf>,
    pub logo: Option<PathBuf>,
    pub link: Option<String>,
}

impl Config {
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(image) = overrides.image {
            self.image = image;
        }
        if let Some(logo) = overrides.logo {
            self.logo = logo;
        }
        if let Some(link) = overrides.link {
            self.link = link;
        }
        self
    }
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|source| LandingError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| LandingError::Config {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads `path` when given and present, defaults otherwise.
pub fn load(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) if path.exists() => load_from_path(path),
        _ => Ok(Config::default()),
    }
}
