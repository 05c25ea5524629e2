use std::fs;
use std::path::{Path, PathBuf};

use blog_core::Preferences;
use blog_engine::AtomicFileWriter;
use engine_logging::{engine_error, engine_info, engine_warn};

const PREFS_FILENAME: &str = ".blog_prefs.ron";

/// Saved preferences, or defaults when none are saved or the file is unreadable.
pub(crate) fn load_preferences(config_dir: &Path) -> Preferences {
    let path = config_dir.join(PREFS_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Preferences::default();
        }
        Err(err) => {
            engine_warn!("Failed to read preferences from {:?}: {}", path, err);
            return Preferences::default();
        }
    };

    match ron::from_str(&content) {
        Ok(preferences) => {
            engine_info!("Loaded preferences from {:?}", path);
            preferences
        }
        Err(err) => {
            engine_warn!("Failed to parse preferences from {:?}: {}", path, err);
            Preferences::default()
        }
    }
}

pub(crate) fn save_preferences(config_dir: &Path, preferences: &Preferences) {
    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(preferences, pretty) {
        Ok(text) => text,
        Err(err) => {
            engine_error!("Failed to serialize preferences: {}", err);
            return;
        }
    };

    let writer = AtomicFileWriter::new(PathBuf::from(config_dir));
    if let Err(err) = writer.write(PREFS_FILENAME, &content) {
        engine_error!("Failed to write preferences to {:?}: {}", config_dir, err);
    }
}
