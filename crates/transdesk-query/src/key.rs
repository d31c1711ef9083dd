//! Query keys.

use std::fmt;

/// Identifies a cached read: a resource tag plus optional scoping segments.
///
/// Keys compare segment by segment, so `["locales"]` is a prefix of
/// `["locales", "p1"]` but `["loc"]` is not.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    /// Create a key with the given resource tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self(vec![tag.into()])
    }

    /// Add a scoping segment.
    pub fn with(mut self, segment: impl ToString) -> Self {
        self.0.push(segment.to_string());
        self
    }

    /// Add a segment only when present.
    pub fn with_opt(mut self, segment: Option<impl ToString>) -> Self {
        if let Some(s) = segment {
            self.0.push(s.to_string());
        }
        self
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// The resource tag.
    pub fn tag(&self) -> &str {
        self.0.first().map(String::as_str).unwrap_or_default()
    }

    /// True when `prefix` matches this key's leading segments.
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// Every project read: the list and each project by id.
    pub fn projects() -> Self {
        Self::new("projects")
    }

    /// One project by id.
    pub fn project(id: &str) -> Self {
        Self::projects().with(id)
    }

    /// The locales of one project.
    pub fn locales(project_id: &str) -> Self {
        Self::new("locales").with(project_id)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(":"))
    }
}

impl<S: Into<String>> FromIterator<S> for QueryKey {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_builder() {
        let key = QueryKey::new("locales").with("p1").with_opt(None::<&str>);
        assert_eq!(key.segments(), ["locales", "p1"]);
        assert_eq!(key.tag(), "locales");
        assert_eq!(key.to_string(), "locales:p1");
    }

    #[test]
    fn test_prefix_matching_is_per_segment() {
        let locales = QueryKey::locales("p1");
        assert!(locales.starts_with(&QueryKey::new("locales")));
        assert!(locales.starts_with(&locales));
        assert!(!locales.starts_with(&QueryKey::new("loc")));
        assert!(!locales.starts_with(&QueryKey::locales("p")));
        assert!(!QueryKey::locales("p10").starts_with(&QueryKey::locales("p1")));
    }

    #[test]
    fn test_project_keys_share_prefix() {
        assert!(QueryKey::project("7").starts_with(&QueryKey::projects()));
        assert!(!QueryKey::locales("7").starts_with(&QueryKey::projects()));
    }

    #[test]
    fn test_from_iter() {
        let key: QueryKey = ["projects", "1"].into_iter().collect();
        assert_eq!(key, QueryKey::project("1"));
    }
}
