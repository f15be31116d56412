use std::fmt;

/// Whether a discovered URL is expanded further or is a terminal asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// An HTML page: fetched, and its in-scope links become children
    Page,
    /// A static asset (image, script, stylesheet, ...): recorded, never fetched
    Asset,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Page => write!(f, "page"),
            Self::Asset => write!(f, "asset"),
        }
    }
}

/// One discovered URL and its outbound in-scope links
///
/// A `Resource` is created exactly once, when its URL is first claimed, and
/// finalized exactly once. After finalization it is immutable; `children`
/// holds the canonical child URLs in the order they were discovered on the
/// page (always empty for assets). Children may refer to URLs owned by other
/// branches of the crawl; no back-pointers are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// Canonical absolute URL (identity key in the registry)
    pub url: String,

    /// Page or asset
    pub kind: ResourceKind,

    /// Ordered, per-page-deduplicated child URLs
    pub children: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_display() {
        assert_eq!(ResourceKind::Page.to_string(), "page");
        assert_eq!(ResourceKind::Asset.to_string(), "asset");
    }

    #[test]
    fn test_resource_equality() {
        let a = Resource {
            url: "http://example.com/a".to_string(),
            kind: ResourceKind::Page,
            children: vec!["http://example.com/b".to_string()],
        };
        assert_eq!(a, a.clone());
    }
}
