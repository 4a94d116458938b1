/// Shared secret expected in the `auth` field of `/add` requests.
pub const AUTH_TOKEN: &str = "mak";

/// Default directory downloaded media is written to and served from.
pub const MEDIA_DIR: &str = "./files";

/// Only entries with this suffix show up as feed items.
pub const MEDIA_SUFFIX: &str = ".mp4";

/// Suffix of the optional per-file description sidecar.
pub const SIDECAR_SUFFIX: &str = ".description";

/// MIME type reported in feed enclosures.
pub const MEDIA_MIME_TYPE: &str = "video/mp4";

/// External downloader binary, invoked once per queued URL.
pub const DOWNLOADER_BIN: &str = "youtube-dl";

/// Default HTTP listen address.
pub const LISTEN_ADDR: &str = "0.0.0.0:8080";
