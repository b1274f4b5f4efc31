use crate::platform::{self, Platform};
use crate::releases::model::{ARCHIVE_KIND, ReleaseEntry};

/// Predicate over release entries. Discovery applies every supplied filter;
/// an entry survives only if all of them accept it.
pub type ReleaseFilter = dyn Fn(&ReleaseEntry) -> bool;

/// Default discovery filter: compiled archives whose published OS and
/// architecture labels map to the running platform and process architecture.
pub fn platform_filter(target: Platform) -> impl Fn(&ReleaseEntry) -> bool {
    move |entry: &ReleaseEntry| {
        entry.kind == ARCHIVE_KIND
            && platform::os_id_for_label(&entry.os) == Some(target.os_id())
            && platform::arch_id_for_label(&entry.arch) == Some(platform::current_arch_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(kind: &str, os: &str, arch: &str) -> ReleaseEntry {
        ReleaseEntry {
            name: "go1.17.test.tar.gz".to_string(),
            version: "1.17".to_string(),
            url: "/dl/go1.17.test.tar.gz".to_string(),
            kind: kind.to_string(),
            os: os.to_string(),
            arch: arch.to_string(),
            size: "1MB".to_string(),
            checksum: "aa".to_string(),
        }
    }

    fn current_os_label() -> &'static str {
        match std::env::consts::OS {
            "macos" => "macOS",
            "windows" => "Windows",
            _ => "Linux",
        }
    }

    fn current_arch_label() -> &'static str {
        match platform::current_arch_id() {
            "amd64" => "x86-64",
            "arm64" => "ARMv8",
            "386" => "x86",
            "arm" => "ARMv6",
            other => other,
        }
    }

    #[test]
    fn test_platform_filter_accepts_matching_archive() {
        let target = Platform::current().unwrap();
        let filter = platform_filter(target);
        assert!(filter(&entry(
            ARCHIVE_KIND,
            current_os_label(),
            current_arch_label()
        )));
    }

    #[test]
    fn test_platform_filter_rejects_other_kinds() {
        let target = Platform::current().unwrap();
        let filter = platform_filter(target);
        assert!(!filter(&entry(
            "Installer",
            current_os_label(),
            current_arch_label()
        )));
        assert!(!filter(&entry(
            "Source",
            current_os_label(),
            current_arch_label()
        )));
    }

    #[test]
    fn test_platform_filter_rejects_unknown_labels() {
        let target = Platform::current().unwrap();
        let filter = platform_filter(target);
        assert!(!filter(&entry(ARCHIVE_KIND, "Plan 9", current_arch_label())));
        assert!(!filter(&entry(ARCHIVE_KIND, current_os_label(), "mips")));
    }
}
