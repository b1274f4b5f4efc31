use crate::config::GoverConfig;
use crate::download::{self, AttohttpcClient};
use crate::error::Result;
use crate::platform::Platform;
use crate::releases::filter::{ReleaseFilter, platform_filter};
use crate::releases::model::ReleaseEntry;
use crate::releases::parser::parse_listing;
use crate::user_agent;
use std::cmp::Ordering;

/// Injected network collaborator for the listing page.
pub trait ListingFetcher {
    fn fetch_listing(&self) -> Result<Vec<u8>>;
}

pub struct HttpListingFetcher {
    url: String,
    client: AttohttpcClient,
}

impl HttpListingFetcher {
    pub fn new(config: &GoverConfig) -> Self {
        Self {
            url: config.listing_url.clone(),
            client: AttohttpcClient::new(config.timeout, user_agent::listing_client()),
        }
    }
}

impl ListingFetcher for HttpListingFetcher {
    fn fetch_listing(&self) -> Result<Vec<u8>> {
        download::fetch(&self.client, &self.url)
    }
}

/// Shown when discovery comes back empty, spanning the known major release
/// line.
const FALLBACK_VERSIONS: &[&str] = &[
    "1.3", "1.4", "1.5", "1.6", "1.7", "1.8", "1.9", "1.10", "1.11", "1.12", "1.13", "1.14",
    "1.15", "1.16", "1.17", "1.18", "1.19", "1.20", "1.21", "1.22",
];

pub struct VersionLister<F> {
    fetcher: F,
    platform: Platform,
}

impl<F: ListingFetcher> VersionLister<F> {
    pub fn new(fetcher: F, platform: Platform) -> Self {
        Self { fetcher, platform }
    }

    /// Fetch and parse the listing, keeping entries that pass every filter.
    ///
    /// Fetch and parse failures degrade to an empty result: discovery is
    /// never fatal, since the caller falls back to the static list anyway.
    pub fn discover(&self, filters: &[&ReleaseFilter]) -> Vec<ReleaseEntry> {
        let html = match self.fetcher.fetch_listing() {
            Ok(html) => html,
            Err(err) => {
                log::warn!("listing fetch failed: {err}");
                return Vec::new();
            }
        };

        let entries = match parse_listing(&html) {
            Ok(entries) => entries,
            Err(err) => {
                log::warn!("listing parse failed: {err}");
                return Vec::new();
            }
        };

        entries
            .into_iter()
            .filter(|entry| filters.iter().all(|filter| filter(entry)))
            .collect()
    }

    /// Canonical version strings installable on the running platform:
    /// deduplicated keeping first-seen order, sorted oldest-first, with the
    /// static fallback when discovery yields nothing.
    pub fn list_versions(&self) -> Vec<String> {
        let filter = platform_filter(self.platform);
        collect_versions(self.discover(&[&filter]))
    }
}

fn collect_versions(entries: Vec<ReleaseEntry>) -> Vec<String> {
    let mut versions: Vec<String> = Vec::new();
    for entry in entries {
        if !versions.contains(&entry.version) {
            versions.push(entry.version);
        }
    }

    if versions.is_empty() {
        versions = FALLBACK_VERSIONS.iter().map(|v| (*v).to_string()).collect();
    }

    versions.sort_by(|a, b| compare_versions(a, b));
    versions
}

/// Dotted-segment version ordering.
///
/// Segments are compared pairwise up to the shorter version's length. A
/// pair of segments with different lengths orders by length alone; equal
/// lengths fall back to lexical comparison. When every compared pair is
/// equal, the version with fewer segments sorts first. Length is compared
/// before content; that is what puts "1.9" before "1.10".
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let left: Vec<&str> = a.split('.').collect();
    let right: Vec<&str> = b.split('.').collect();

    for (x, y) in left.iter().zip(right.iter()) {
        if x.len() != y.len() {
            return x.len().cmp(&y.len());
        }
        if x != y {
            return x.cmp(y);
        }
    }

    left.len().cmp(&right.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GoverError;
    use crate::releases::model::ARCHIVE_KIND;

    struct StaticFetcher(Vec<u8>);

    impl ListingFetcher for StaticFetcher {
        fn fetch_listing(&self) -> Result<Vec<u8>> {
            Ok(self.0.clone())
        }
    }

    struct FailingFetcher;

    impl ListingFetcher for FailingFetcher {
        fn fetch_listing(&self) -> Result<Vec<u8>> {
            Err(GoverError::Fetch("503 Service Unavailable".to_string()))
        }
    }

    fn entry(name: &str, version: &str, kind: &str) -> ReleaseEntry {
        ReleaseEntry {
            name: name.to_string(),
            version: version.to_string(),
            url: format!("/dl/{name}"),
            kind: kind.to_string(),
            os: "Linux".to_string(),
            arch: "x86-64".to_string(),
            size: "1MB".to_string(),
            checksum: "aa".to_string(),
        }
    }

    fn host_platform() -> Platform {
        Platform::current().unwrap()
    }

    #[test]
    fn test_compare_versions_length_before_value() {
        assert_eq!(compare_versions("1.9", "1.10"), Ordering::Less);
        assert_eq!(compare_versions("1.2", "1.9"), Ordering::Less);
        assert_eq!(compare_versions("1.10", "1.2"), Ordering::Greater);
    }

    #[test]
    fn test_compare_versions_prefix_sorts_first() {
        assert_eq!(compare_versions("1.9", "1.9.2"), Ordering::Less);
        assert_eq!(compare_versions("1.9.2", "1.9"), Ordering::Greater);
        assert_eq!(compare_versions("1.9.2", "1.9.2"), Ordering::Equal);
    }

    #[test]
    fn test_sort_adversarial_case() {
        // Single-digit second segments all come before double-digit ones,
        // regardless of numeric value.
        let mut versions = vec!["1.9", "1.10", "1.2", "1.21", "1.3"];
        versions.sort_by(|a, b| compare_versions(a, b));
        assert_eq!(versions, vec!["1.2", "1.3", "1.9", "1.10", "1.21"]);
    }

    #[test]
    fn test_collect_versions_dedup_keeps_first_seen_order() {
        let entries = vec![
            entry("go1.9.2.linux-amd64.tar.gz", "1.9.2", ARCHIVE_KIND),
            entry("go1.9.2.windows-amd64.zip", "1.9.2", ARCHIVE_KIND),
            entry("go1.4.linux-amd64.tar.gz", "1.4", ARCHIVE_KIND),
        ];
        let versions = collect_versions(entries);
        assert_eq!(versions, vec!["1.4", "1.9.2"]);
    }

    #[test]
    fn test_fallback_on_fetch_error() {
        let lister = VersionLister::new(FailingFetcher, host_platform());
        let versions = lister.list_versions();

        let mut expected: Vec<String> =
            FALLBACK_VERSIONS.iter().map(|v| (*v).to_string()).collect();
        expected.sort_by(|a, b| compare_versions(a, b));
        assert_eq!(versions, expected);
    }

    #[test]
    fn test_fallback_on_empty_listing() {
        let lister = VersionLister::new(
            StaticFetcher(b"<html><body><p>maintenance</p></body></html>".to_vec()),
            host_platform(),
        );
        let versions = lister.list_versions();
        assert_eq!(versions.len(), FALLBACK_VERSIONS.len());
        assert_eq!(versions[0], "1.3");
    }

    #[test]
    fn test_discover_applies_all_filters() {
        let listing = r#"<div class="expanded"><table><tbody>
<tr><td><a href="/dl/go1.17.linux-amd64.tar.gz">go1.17.linux-amd64.tar.gz</a></td><td>Archive</td><td>Linux</td><td>x86-64</td><td>1MB</td><td>aa</td></tr>
<tr><td><a href="/dl/go1.17.src.tar.gz">go1.17.src.tar.gz</a></td><td>Source</td><td></td><td></td><td>1MB</td><td>bb</td></tr>
</tbody></table></div>"#;
        let lister = VersionLister::new(
            StaticFetcher(listing.as_bytes().to_vec()),
            host_platform(),
        );

        let accept_all: &ReleaseFilter = &|_: &ReleaseEntry| true;
        let archives_only: &ReleaseFilter = &|entry: &ReleaseEntry| entry.kind == ARCHIVE_KIND;
        let reject_all: &ReleaseFilter = &|_: &ReleaseEntry| false;

        // Every filter must pass, not just the last one supplied.
        let discovered = lister.discover(&[accept_all, archives_only]);
        assert_eq!(discovered.len(), 1);
        assert_eq!(discovered[0].kind, ARCHIVE_KIND);

        let discovered = lister.discover(&[archives_only, reject_all]);
        assert!(discovered.is_empty());
    }

    #[test]
    fn test_discover_without_filters_keeps_document_order() {
        let listing = r#"<div class="expanded"><table><tbody>
<tr><td><a href="/dl/go1.10.linux-amd64.tar.gz">go1.10.linux-amd64.tar.gz</a></td><td>Archive</td><td>Linux</td><td>x86-64</td><td>1MB</td><td>aa</td></tr>
<tr><td><a href="/dl/go1.9.linux-amd64.tar.gz">go1.9.linux-amd64.tar.gz</a></td><td>Archive</td><td>Linux</td><td>x86-64</td><td>1MB</td><td>bb</td></tr>
</tbody></table></div>"#;
        let lister = VersionLister::new(
            StaticFetcher(listing.as_bytes().to_vec()),
            host_platform(),
        );

        let discovered = lister.discover(&[]);
        assert_eq!(discovered.len(), 2);
        assert_eq!(discovered[0].version, "1.10");
        assert_eq!(discovered[1].version, "1.9");
    }
}
