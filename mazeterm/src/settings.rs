use std::{fs, path::PathBuf, time::Duration};

use log::LevelFilter;
use mazecore::{MazeParams, Point};
use ron::{extensions::Extensions, ser::PrettyConfig};
use serde::{Deserialize, Serialize};

use crate::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub rows: usize,
    pub cols: usize,
    /// Cell size in terminal columns.
    pub cell_width: u16,
    /// Cell size in terminal rows.
    pub cell_height: u16,
    pub origin_x: u16,
    pub origin_y: u16,
    pub seed: Option<u64>,
    pub frame_delay_ms: u64,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            rows: 10,
            cols: 20,
            cell_width: 4,
            cell_height: 2,
            origin_x: 1,
            origin_y: 1,
            seed: None,
            frame_delay_ms: 15,
            log_level: "warn".to_string(),
        }
    }
}

impl Settings {
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mazeterm")
            .join("settings.ron")
    }

    /// Reads the settings file, a missing file gives the defaults.
    pub fn load(path: PathBuf) -> Result<Self, AppError> {
        let settings_string = match fs::read_to_string(&path) {
            Ok(settings_string) => settings_string,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Settings::default())
            }
            Err(err) => return Err(err.into()),
        };

        let options = ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME);
        Ok(options.from_str(&settings_string)?)
    }

    /// Overwrites the settings file with the defaults.
    pub fn reset_config(path: PathBuf) -> Result<(), AppError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let settings_string =
            ron::ser::to_string_pretty(&Settings::default(), PrettyConfig::default())?;
        fs::write(&path, settings_string)?;

        Ok(())
    }

    /// Unknown level names fall back to `warn`.
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Warn)
    }

    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }

    pub fn maze_params(&self) -> MazeParams {
        MazeParams {
            origin: Point::new(self.origin_x as f64, self.origin_y as f64),
            rows: self.rows,
            cols: self.cols,
            cell_size: Point::new(self.cell_width as f64, self.cell_height as f64),
            seed: self.seed,
        }
    }
}
