use std::collections::BTreeMap;

use url::Url;

/// One logical entry of a lazily-rendered list.
///
/// The identity key is the only thing the collector looks at; fields ride
/// along untouched and are whatever the list reader captured on the poll
/// where the key was first seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    key: String,
    fields: BTreeMap<String, String>,
}

impl ListItem {
    /// Creates an item with an identity key taken as-is.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Creates an item keyed by the canonical form of a profile URL.
    pub fn from_profile_url(url: &str) -> Self {
        Self::new(normalize_identity_key(url))
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }
}

/// Canonical identity key for a profile URL.
///
/// Query string and fragment are dropped (list markup appends tracking
/// parameters that differ between renders), scheme and host are lower-cased
/// by the URL parser, and trailing slashes are removed. Input that does not
/// parse as a URL is only trimmed and stripped of trailing slashes.
pub fn normalize_identity_key(raw: &str) -> String {
    let trimmed = raw.trim();
    let canonical = match Url::parse(trimmed) {
        Ok(mut url) => {
            url.set_query(None);
            url.set_fragment(None);
            url.to_string()
        }
        Err(_) => trimmed.to_string(),
    };
    canonical.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::{normalize_identity_key, ListItem};

    #[test]
    fn strips_trailing_slash_and_tracking_params() {
        assert_eq!(
            normalize_identity_key(" https://www.linkedin.com/in/jane-doe/?miniProfileUrn=abc#top "),
            "https://www.linkedin.com/in/jane-doe"
        );
    }

    #[test]
    fn host_case_is_folded() {
        assert_eq!(
            normalize_identity_key("HTTPS://WWW.LinkedIn.com/in/jane-doe"),
            "https://www.linkedin.com/in/jane-doe"
        );
    }

    #[test]
    fn non_url_keys_are_trimmed_only() {
        assert_eq!(normalize_identity_key("  member-42// "), "member-42");
    }

    #[test]
    fn fields_are_kept_by_name() {
        let item = ListItem::from_profile_url("https://www.linkedin.com/in/a/")
            .with_field("message", "hi")
            .with_field("sent time", "1 week ago");
        assert_eq!(item.key(), "https://www.linkedin.com/in/a");
        assert_eq!(item.field("message"), Some("hi"));
        assert_eq!(item.field("missing"), None);
        assert_eq!(item.fields().len(), 2);
    }
}
