/// Published `kind` label of a compiled release archive, as opposed to an
/// installer or a source package.
pub const ARCHIVE_KIND: &str = "Archive";

/// One release artifact row from the downloads page.
///
/// Immutable once produced by the parser. `os` and `arch` carry the
/// human-readable labels exactly as published; `crate::platform` owns the
/// mapping to machine identifiers. `version` is the canonical dotted form
/// ("1.9.2", "1.17rc1") used for dedup, sorting, and install directory
/// naming. `size` and `checksum` are opaque display strings.
///
/// Entries are transient results of a single discovery call; which versions
/// are actually present is derived from the filesystem, never from these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseEntry {
    pub name: String,
    pub version: String,
    pub url: String,
    pub kind: String,
    pub os: String,
    pub arch: String,
    pub size: String,
    pub checksum: String,
}
