use std::fmt;
use std::path::{Path, PathBuf};
use serde::{Serialize, Deserialize};

/// Icon attached to a notification: an image on disk or a themed icon name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconArtifact {
    /// Path to an image file
    File(PathBuf),
    /// Name of an icon from the desktop icon theme
    Named(String),
}

impl IconArtifact {
    /// Interpret a configured icon value.
    ///
    /// Anything that looks like a path is a file, everything else an icon name.
    pub fn from_config(value: &str) -> Self {
        if value.contains(std::path::MAIN_SEPARATOR) || value.contains('/') {
            IconArtifact::File(PathBuf::from(value))
        } else {
            IconArtifact::Named(value.to_string())
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            IconArtifact::File(path) => Some(path),
            IconArtifact::Named(_) => None,
        }
    }

    /// Value for the `app_icon` argument of the notification server
    pub fn as_icon_string(&self) -> String {
        match self {
            IconArtifact::File(path) => path.to_string_lossy().into_owned(),
            IconArtifact::Named(name) => name.clone(),
        }
    }
}

impl fmt::Display for IconArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_icon_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config() {
        assert_eq!(IconArtifact::from_config("emblem-music"), IconArtifact::Named("emblem-music".to_string()));
        assert_eq!(
            IconArtifact::from_config("/usr/share/mpdnotify/music-note.svg"),
            IconArtifact::File(PathBuf::from("/usr/share/mpdnotify/music-note.svg"))
        );
    }

    #[test]
    fn test_icon_string() {
        let icon = IconArtifact::File(PathBuf::from("/tmp/mpdnotify.abc.jpg"));
        assert_eq!(icon.as_icon_string(), "/tmp/mpdnotify.abc.jpg");
        assert_eq!(icon.path(), Some(Path::new("/tmp/mpdnotify.abc.jpg")));
        assert_eq!(IconArtifact::Named("audio-x-generic".into()).path(), None);
    }
}
