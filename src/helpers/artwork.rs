use std::path::Path;
use log::debug;
use lofty::{MimeType, Probe, TaggedFileExt};

/// Cover art embedded in an audio file's tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artwork {
    /// Raw image bytes as stored in the tag
    pub data: Vec<u8>,
    /// File extension matching the image encoding
    pub extension: &'static str,
}

/// Read the first embedded picture of an audio file.
///
/// Returns None when the file cannot be opened or parsed, or carries no picture.
pub fn extract_embedded_artwork(path: &Path) -> Option<Artwork> {
    let tagged_file = match Probe::open(path).and_then(|probe| probe.read()) {
        Ok(file) => file,
        Err(e) => {
            debug!("Failed to read tags from file {}: {}", path.display(), e);
            return None;
        }
    };

    let tag = tagged_file.primary_tag().or_else(|| tagged_file.first_tag())?;
    let picture = tag.pictures().first()?;
    let data = picture.data().to_vec();
    if data.is_empty() {
        debug!("Ignoring empty embedded picture in {}", path.display());
        return None;
    }

    let extension = match picture.mime_type() {
        Some(mime) => extension_for_mime(mime).unwrap_or_else(|| sniff_extension(&data)),
        None => sniff_extension(&data),
    };

    debug!("Found embedded cover art in {}: {} bytes, .{}", path.display(), data.len(), extension);
    Some(Artwork { data, extension })
}

/// File extension for a known image MIME type
pub fn extension_for_mime(mime: &MimeType) -> Option<&'static str> {
    match mime {
        MimeType::Jpeg => Some("jpg"),
        MimeType::Png => Some("png"),
        MimeType::Gif => Some("gif"),
        MimeType::Tiff => Some("tiff"),
        MimeType::Bmp => Some("bmp"),
        _ => None,
    }
}

/// Guess the extension from the image's magic bytes
pub fn sniff_extension(data: &[u8]) -> &'static str {
    if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "jpg"
    } else if data.starts_with(b"\x89PNG\r\n\x1a\n") {
        "png"
    } else if data.starts_with(b"GIF8") {
        "gif"
    } else if data.starts_with(b"BM") {
        "bmp"
    } else if data.starts_with(b"II*\0") || data.starts_with(b"MM\0*") {
        "tiff"
    } else {
        "img"
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::fs;

    /// Bytes standing in for a JPEG image
    pub(crate) const FAKE_JPEG: &[u8] = b"\xFF\xD8\xFF\xE0fake jpeg payload for cover art";

    /// Build an ID3v2.3 tag carrying a single APIC frame
    fn id3v2_with_picture(mime: &str, picture: &[u8]) -> Vec<u8> {
        let mut frame_body = vec![0x00];
        frame_body.extend_from_slice(mime.as_bytes());
        frame_body.push(0x00);
        frame_body.push(0x03);
        frame_body.push(0x00);
        frame_body.extend_from_slice(picture);

        let mut frame = b"APIC".to_vec();
        frame.extend_from_slice(&(frame_body.len() as u32).to_be_bytes());
        frame.extend_from_slice(&[0x00, 0x00]);
        frame.extend_from_slice(&frame_body);

        let size = frame.len() as u32;
        let mut tag = b"ID3".to_vec();
        tag.extend_from_slice(&[0x03, 0x00, 0x00]);
        tag.extend_from_slice(&[
            ((size >> 21) & 0x7F) as u8,
            ((size >> 14) & 0x7F) as u8,
            ((size >> 7) & 0x7F) as u8,
            (size & 0x7F) as u8,
        ]);
        tag.extend_from_slice(&frame);
        tag
    }

    /// A few silent MPEG-1 Layer III frames (128 kbit/s, 44.1 kHz)
    fn mpeg_frames() -> Vec<u8> {
        let mut audio = Vec::new();
        for _ in 0..8 {
            let mut frame = vec![0u8; 417];
            frame[..4].copy_from_slice(&[0xFF, 0xFB, 0x90, 0x00]);
            audio.extend_from_slice(&frame);
        }
        audio
    }

    /// Write an MP3 file with `picture` embedded as front cover
    pub(crate) fn write_mp3_with_picture(path: &Path, picture: &[u8]) {
        let mut bytes = id3v2_with_picture("image/jpeg", picture);
        bytes.extend_from_slice(&mpeg_frames());
        fs::write(path, bytes).unwrap();
    }

    #[test]
    fn test_extract_embedded_artwork() {
        let dir = tempfile::tempdir().unwrap();
        let song = dir.path().join("track.mp3");
        write_mp3_with_picture(&song, FAKE_JPEG);

        let artwork = extract_embedded_artwork(&song).expect("embedded artwork");
        assert_eq!(artwork.data, FAKE_JPEG);
        assert_eq!(artwork.extension, "jpg");
    }

    #[test]
    fn test_no_artwork_in_untagged_file() {
        let dir = tempfile::tempdir().unwrap();
        let song = dir.path().join("plain.mp3");
        fs::write(&song, mpeg_frames()).unwrap();

        assert_eq!(extract_embedded_artwork(&song), None);
    }

    #[test]
    fn test_unreadable_files_yield_none() {
        let dir = tempfile::tempdir().unwrap();
        let garbage = dir.path().join("garbage.flac");
        fs::write(&garbage, b"definitely not flac").unwrap();

        assert_eq!(extract_embedded_artwork(&garbage), None);
        assert_eq!(extract_embedded_artwork(&dir.path().join("missing.mp3")), None);
    }

    #[test]
    fn test_extension_for_mime() {
        assert_eq!(extension_for_mime(&MimeType::Jpeg), Some("jpg"));
        assert_eq!(extension_for_mime(&MimeType::Png), Some("png"));
        assert_eq!(extension_for_mime(&MimeType::Unknown("image/webp".to_string())), None);
    }

    #[test]
    fn test_sniff_extension() {
        assert_eq!(sniff_extension(FAKE_JPEG), "jpg");
        assert_eq!(sniff_extension(b"\x89PNG\r\n\x1a\n...."), "png");
        assert_eq!(sniff_extension(b"GIF89a"), "gif");
        assert_eq!(sniff_extension(b"RIFF....WEBP"), "img");
    }
}
