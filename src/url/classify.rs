use crate::registry::ResourceKind;

/// Extensions that mark a URL as a terminal static asset.
///
/// Case-sensitive variants are listed explicitly; anything else, including
/// extensionless directory-style paths, is treated as a crawlable page.
const ASSET_EXTENSIONS: &[&str] = &[
    "jpg", "JPG", "gif", "GIF", "doc", "DOC", "pdf", "PDF", "zip", "png", "svg", "css", "js",
    "eps",
];

/// Classifies a URL as a traversable page or a terminal asset
///
/// The decision is made purely from the final dot-delimited extension of the
/// URL string; assets are never fetched or expanded.
pub fn classify(url: &str) -> ResourceKind {
    match url.rsplit_once('.') {
        Some((_, extension)) if ASSET_EXTENSIONS.contains(&extension) => ResourceKind::Asset,
        _ => ResourceKind::Page,
    }
}
