use std::path::{Path, PathBuf};
use log::debug;

use crate::config::NotifierConfig;
use crate::data::IconArtifact;
use crate::helpers::artwork::extract_embedded_artwork;
use crate::helpers::icon_cache::IconCache;

/// One way of finding an icon for a song file.
///
/// Strategies never fail: anything that goes wrong means "not found".
pub trait IconStrategy: Send + Sync {
    /// Short name used in log messages
    fn name(&self) -> &'static str;

    /// Look for an icon for the song at `song_path` (absolute)
    fn find(&self, song_path: &Path) -> Option<PathBuf>;
}

/// Extracts embedded cover art and stores it in the icon cache
pub struct EmbeddedArtwork {
    cache: IconCache,
}

impl EmbeddedArtwork {
    pub fn new(cache: IconCache) -> Self {
        Self { cache }
    }
}

impl IconStrategy for EmbeddedArtwork {
    fn name(&self) -> &'static str {
        "embedded"
    }

    fn find(&self, song_path: &Path) -> Option<PathBuf> {
        let artwork = extract_embedded_artwork(song_path)?;
        match self.cache.store(&artwork.data, artwork.extension) {
            Ok(cached) => Some(cached.path),
            Err(e) => {
                debug!("Failed to cache artwork in {}: {}", self.cache.dir().display(), e);
                None
            }
        }
    }
}

/// Looks for conventional cover image files next to the song
pub struct SiblingCoverArt {
    file_names: Vec<String>,
}

impl SiblingCoverArt {
    pub fn new(file_names: Vec<String>) -> Self {
        Self { file_names }
    }
}

impl IconStrategy for SiblingCoverArt {
    fn name(&self) -> &'static str {
        "sibling"
    }

    fn find(&self, song_path: &Path) -> Option<PathBuf> {
        let dir = song_path.parent()?;
        self.file_names
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    }
}

/// Picks the best icon for a song: the first strategy that finds one, else the default
pub struct IconResolver {
    music_directory: PathBuf,
    strategies: Vec<Box<dyn IconStrategy>>,
    default_icon: IconArtifact,
}

impl IconResolver {
    pub fn new(music_directory: impl Into<PathBuf>, default_icon: IconArtifact) -> Self {
        Self {
            music_directory: music_directory.into(),
            strategies: Vec::new(),
            default_icon,
        }
    }

    /// Resolver with the standard chain: embedded artwork, then sibling cover files
    pub fn from_config(config: &NotifierConfig) -> Self {
        let cache = IconCache::new(&config.icon_cache_dir, config.icon_cache_prefix.clone());
        Self::new(&config.music_directory, IconArtifact::from_config(&config.default_icon))
            .with_strategy(EmbeddedArtwork::new(cache))
            .with_strategy(SiblingCoverArt::new(config.cover_files.clone()))
    }

    /// Append a strategy; strategies are tried in insertion order
    pub fn with_strategy(mut self, strategy: impl IconStrategy + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    pub fn default_icon(&self) -> &IconArtifact {
        &self.default_icon
    }

    /// Resolve an icon for `song_file`, given relative to the music directory
    pub fn resolve(&self, song_file: Option<&str>) -> IconArtifact {
        let song_file = match song_file {
            Some(file) if !file.is_empty() && !is_remote(file) => file,
            _ => {
                debug!("No local song file, using default icon");
                return self.default_icon.clone();
            }
        };

        let song_path = self.music_directory.join(song_file);
        for strategy in &self.strategies {
            if let Some(icon) = strategy.find(&song_path) {
                debug!("Icon for {} found by {} strategy: {}", song_file, strategy.name(), icon.display());
                return IconArtifact::File(icon);
            }
        }

        debug!("No artwork for {}, using default icon", song_file);
        self.default_icon.clone()
    }
}

/// Stream URLs have no file on disk
fn is_remote(song_file: &str) -> bool {
    song_file.contains("://")
}
