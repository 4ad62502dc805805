use std::{
    path::Path,
    fs::File,
    io::{
        BufReader,
        BufWriter,
    },
};
use serde::{Serialize, Deserialize};
use anyhow::Result;


pub const SETTINGS_FILE_NAME: &'static str = "settings.json";


/// Persisted client configuration. A client-side global resource.
///
/// The settings menu edits a transient mirror of these fields and commits
/// them here (and to disk) on apply; everything else reads them live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Index into the display-mode list enumerated at startup.
    pub video_mode_index: usize,
    pub fullscreen: bool,
    /// Invert the direction of drag-scrolling the battlefield view.
    pub reverse_drag: bool,
    /// Scale factor for scrolling when the cursor rests at a window edge.
    pub border_scroll_speed: f32,
    /// Scale factor for scrolling from the arrow/WASD keys.
    pub keyboard_scroll_speed: f32,
    /// Scale factor for mouse-wheel zooming.
    pub zoom_speed: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            video_mode_index: 0,
            fullscreen: false,
            reverse_drag: false,
            border_scroll_speed: 1.0,
            keyboard_scroll_speed: 1.0,
            zoom_speed: 1.0,
        }
    }
}

impl Settings {
    /// Read settings, falling back to defaults if the file is absent or
    /// unreadable.
    pub fn read(path: impl AsRef<Path>) -> Self {
        Self::try_read(path).unwrap_or_default()
    }

    pub fn try_read(path: impl AsRef<Path>) -> Result<Self> {
        Ok(serde_json::from_reader(BufReader::new(File::open(path)?))?)
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        serde_json::to_writer_pretty(BufWriter::new(File::create(path)?), self)?;
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_through_file() {
        let path = std::env::temp_dir().join("outpost-settings-round-trip.json");
        let settings = Settings {
            video_mode_index: 2,
            fullscreen: true,
            reverse_drag: true,
            border_scroll_speed: 0.5,
            keyboard_scroll_speed: 2.0,
            zoom_speed: 1.5,
        };
        settings.write(&path).unwrap();
        assert_eq!(Settings::try_read(&path).unwrap(), settings);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("outpost-settings-does-not-exist.json");
        assert_eq!(Settings::read(&path), Settings::default());
    }
}
