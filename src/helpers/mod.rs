pub mod artwork;
pub mod icon_cache;
pub mod icon_resolver;
#[cfg(unix)]
pub mod desktop_notify;

pub use icon_cache::IconCache;
pub use icon_resolver::{IconResolver, IconStrategy, EmbeddedArtwork, SiblingCoverArt};
