use url::Url;

/// Resolves a raw hyperlink string into a canonical in-scope absolute URL
///
/// # Normalization Rules
///
/// 1. Strip the query string (split on the first `?`, keep the left part);
///    query parameters never affect identity
/// 2. Reject protocol-relative links (`//...`) as out of scope
/// 3. Rewrite root-relative links (`/...`) to `http://{base_domain}{link}`
/// 4. Accept an absolute link only if it contains `base_domain`
/// 5. Reject results that fail URL parsing or use a non-http(s) scheme
/// 6. Reject a result equal to the URL currently being processed, so a
///    page linking to itself does not produce new work
///
/// Pure function: no network or registry access.
///
/// # Arguments
///
/// * `raw` - The raw hyperlink string as found in the page markup
/// * `base_domain` - The logical base domain defining crawl scope
/// * `current_url` - The canonical URL of the page being processed
///
/// # Returns
///
/// * `Some(String)` - Canonical in-scope absolute URL
/// * `None` - Out of scope, malformed, or self-referential
pub fn normalize_link(raw: &str, base_domain: &str, current_url: &str) -> Option<String> {
    let link = raw.split_once('?').map(|(left, _)| left).unwrap_or(raw);

    if link.is_empty() {
        return None;
    }

    // Protocol-relative links are how off-domain trackers and CDNs usually
    // appear; they are never in scope.
    if link.starts_with("//") {
        return None;
    }

    let resolved = if link.starts_with('/') {
        format!("http://{}{}", base_domain, link)
    } else {
        if !link.contains(base_domain) {
            return None;
        }
        link.to_string()
    };

    // Well-formedness gate; drops javascript:, mailto: and similar schemes
    // that happen to mention the base domain.
    let parsed = Url::parse(&resolved).ok()?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return None;
    }

    if resolved == current_url {
        return None;
    }

    Some(resolved)
}
