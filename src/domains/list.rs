use serde::{Deserialize, Serialize};

/// Entry meaning "every domain is trusted"
pub const WILDCARD: &str = "*";

/// Ordered list of trusted origin/URL prefixes
///
/// Non-wildcard entries are kept even while the wildcard is present so they
/// come back when it is removed. Duplicates are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrustedDomainList(Vec<String>);

impl TrustedDomainList {
    /// Parse the persisted JSON array form
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Persisted JSON array form
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn entries(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has_wildcard(&self) -> bool {
        self.0.iter().any(|entry| entry == WILDCARD)
    }

    /// Entries other than the wildcard, in order
    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .map(String::as_str)
            .filter(|entry| *entry != WILDCARD)
    }

    /// Copy with the wildcard appended
    pub fn with_wildcard(&self) -> Self {
        self.appended(WILDCARD)
    }

    /// Copy with every wildcard removed
    pub fn without_wildcard(&self) -> Self {
        Self(self.domains().map(str::to_string).collect())
    }

    /// Copy with `entry` appended
    pub fn appended(&self, entry: &str) -> Self {
        let mut entries = self.0.clone();
        entries.push(entry.to_string());
        Self(entries)
    }

    /// Copy keeping the non-wildcard entries at `kept` positions of
    /// [`Self::domains`]; wildcard entries stay where they are
    pub fn retain_domains(&self, kept: &[usize]) -> Self {
        let mut position = 0;
        let entries = self
            .0
            .iter()
            .filter(|entry| {
                if *entry == WILDCARD {
                    return true;
                }
                position += 1;
                kept.contains(&(position - 1))
            })
            .cloned()
            .collect();
        Self(entries)
    }

    /// Whether opening `url` may skip the confirmation prompt
    pub fn is_trusted(&self, url: &str) -> bool {
        if self.has_wildcard() {
            return true;
        }

        let url = normalize(url);
        self.domains().any(|entry| {
            let entry = normalize(entry);
            !entry.is_empty()
                && url.starts_with(&entry)
                && matches!(url[entry.len()..].chars().next(), None | Some('/' | '?' | '#'))
        })
    }
}

/// Lowercase the scheme and authority, drop a trailing slash
fn normalize(text: &str) -> String {
    let text = text.trim().trim_end_matches('/');
    let authority_end = text
        .find("://")
        .map(|scheme_end| {
            let rest = scheme_end + 3;
            text[rest..].find('/').map_or(text.len(), |i| rest + i)
        })
        .unwrap_or(text.len());

    let mut normalized = text[..authority_end].to_ascii_lowercase();
    normalized.push_str(&text[authority_end..]);
    normalized
}

impl From<Vec<String>> for TrustedDomainList {
    fn from(entries: Vec<String>) -> Self {
        Self(entries)
    }
}

impl From<&[&str]> for TrustedDomainList {
    fn from(entries: &[&str]) -> Self {
        Self(entries.iter().map(|e| e.to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(entries: &[&str]) -> TrustedDomainList {
        TrustedDomainList::from(entries)
    }

    #[test]
    fn test_wildcard_toggle_keeps_domains() {
        let original = list(&["https://a.com", "https://b.com"]);
        let all = original.with_wildcard();

        assert!(all.has_wildcard());
        assert_eq!(all.len(), 3);
        assert_eq!(all.without_wildcard(), original);
    }

    #[test]
    fn test_without_wildcard_removes_every_copy() {
        let damaged = list(&["*", "https://a.com", "*"]);
        assert_eq!(damaged.without_wildcard(), list(&["https://a.com"]));
    }

    #[test]
    fn test_retain_domains_preserves_wildcard() {
        let current = list(&["https://a.com", "*", "https://b.com", "https://c.com"]);
        assert_eq!(
            current.retain_domains(&[0, 2]),
            list(&["https://a.com", "*", "https://c.com"])
        );
        assert_eq!(
            list(&["*", "https://a.com"]).retain_domains(&[0]),
            list(&["*", "https://a.com"])
        );
        assert_eq!(list(&["*", "https://a.com"]).retain_domains(&[]), list(&["*"]));
    }

    #[test]
    fn test_json_form_is_plain_array() {
        let current = list(&["https://a.com", "*"]);
        assert_eq!(current.to_json().unwrap(), r#"["https://a.com","*"]"#);
        assert_eq!(
            TrustedDomainList::from_json(r#"["https://a.com","*"]"#).unwrap(),
            current
        );
        assert!(TrustedDomainList::from_json(r#"{"a":1}"#).is_err());
    }

    #[test]
    fn test_is_trusted_prefix_match() {
        let current = list(&["https://github.com/microsoft", "https://Example.com/"]);

        assert!(current.is_trusted("https://github.com/microsoft"));
        assert!(current.is_trusted("https://github.com/microsoft/vscode"));
        assert!(current.is_trusted("https://example.COM/path?q=1"));
        assert!(!current.is_trusted("https://github.com/microsoftfake"));
        assert!(!current.is_trusted("https://github.com/"));
        assert!(!current.is_trusted("http://example.com"));
    }

    #[test]
    fn test_wildcard_trusts_everything() {
        assert!(list(&["*"]).is_trusted("ftp://anything"));
        assert!(!list(&[]).is_trusted("https://a.com"));
    }
}
