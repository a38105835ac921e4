use serde::{Deserialize, Serialize};

/// Recognized raster image formats, identified by magic-byte headers.
/// The closed set of formats the picker can display and ingest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    Bmp,
    Webp,
    Ico,
    Tiff,
}

/// Every file extension accepted as an image without byte inspection
/// (lower-case, no dot). Includes aliases (`jpeg`, `tiff`).
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "webp", "ico", "tif", "tiff",
];

/// Extension the upstream chat app's exporter writes on files it failed to
/// name properly. Such files carry real image bytes under a bogus suffix and
/// are always byte-sniffed.
pub const PLACEHOLDER_EXTENSION: &str = "dat";

/// Recognized non-image extensions. Files carrying one of these are skipped
/// without reading their bytes, so the scan doesn't pay an open+read for
/// every stray document in a pack folder.
pub const DENYLIST_EXTENSIONS: &[&str] = &[
    // documents
    "txt", "md", "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "rtf", "csv",
    // archives
    "zip", "rar", "7z", "tar", "gz", "bz2", "xz",
    // executables / system
    "exe", "dll", "msi", "bat", "cmd", "sh", "sys", "lnk",
    // audio / video
    "mp3", "wav", "flac", "ogg", "mp4", "mkv", "avi", "mov", "wmv", "webm",
    // code / config
    "js", "ts", "css", "html", "htm", "json", "xml", "yml", "yaml", "toml", "ini",
    "py", "rs", "c", "cpp", "h", "java", "log",
    // misc
    "db", "sqlite", "tmp", "bak",
];

impl ImageFormat {
    /// Canonical file extension for this format (lower-case, no dot).
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Png => "png",
            ImageFormat::Gif => "gif",
            ImageFormat::Bmp => "bmp",
            ImageFormat::Webp => "webp",
            ImageFormat::Ico => "ico",
            ImageFormat::Tiff => "tif",
        }
    }

    /// True if `ext` (case-insensitive, no dot) already names this format,
    /// including aliases: `jpeg` for JPEG, `tiff` for TIFF.
    pub fn matches_extension(&self, ext: &str) -> bool {
        let ext = ext.to_lowercase();
        match self {
            ImageFormat::Jpeg => ext == "jpg" || ext == "jpeg",
            ImageFormat::Tiff => ext == "tif" || ext == "tiff",
            other => ext == other.extension(),
        }
    }
}

/// Detect the image format from raw file bytes by matching magic-byte
/// signatures in a fixed priority order. Extension-agnostic: this is the
/// single source of truth every other component consults.
///
/// Returns `None` for empty, truncated, or unrecognized buffers — never an
/// error.
pub fn detect_format(bytes: &[u8]) -> Option<ImageFormat> {
    if bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
        return Some(ImageFormat::Png);
    }
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some(ImageFormat::Jpeg);
    }
    if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        return Some(ImageFormat::Gif);
    }
    // WEBP lives in a RIFF container: "RIFF" at 0..4, "WEBP" at 8..12
    // (bytes 4..8 are the chunk size and carry no signal).
    if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        return Some(ImageFormat::Webp);
    }
    if bytes.starts_with(b"BM") {
        return Some(ImageFormat::Bmp);
    }
    if bytes.starts_with(&[0x00, 0x00, 0x01, 0x00]) {
        return Some(ImageFormat::Ico);
    }
    if bytes.starts_with(&[0x49, 0x49, 0x2A, 0x00]) || bytes.starts_with(&[0x4D, 0x4D, 0x00, 0x2A])
    {
        return Some(ImageFormat::Tiff);
    }
    None
}

/// The closed set of extensions the scanner accepts without byte inspection.
pub fn supported_extensions() -> &'static [&'static str] {
    SUPPORTED_EXTENSIONS
}

/// True if `ext` (case-insensitive, no dot) is a recognized image extension.
pub fn is_image_extension(ext: &str) -> bool {
    let ext = ext.to_lowercase();
    SUPPORTED_EXTENSIONS.contains(&ext.as_str())
}

/// True if `ext` (case-insensitive, no dot) is a recognized *non-image*
/// extension that the scanner skips unread.
pub fn is_denylisted_extension(ext: &str) -> bool {
    let ext = ext.to_lowercase();
    DENYLIST_EXTENSIONS.contains(&ext.as_str())
}
