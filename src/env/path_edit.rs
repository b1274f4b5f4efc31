/// PATH splicing shared by both store backends.
///
/// Returns the updated value, or `None` when `entry` is already present
/// verbatim and nothing needs writing. Components under `home` that end
/// with the platform `bin` suffix are the previously-active toolchain's;
/// they are replaced in place rather than accumulated.
pub fn merge_path(current: &str, entry: &str, home: &str, separator: char) -> Option<String> {
    let bin_suffix = if separator == ';' { "\\bin" } else { "/bin" };

    let mut components: Vec<String> = if current.is_empty() {
        Vec::new()
    } else {
        current.split(separator).map(str::to_string).collect()
    };

    let mut replaced = false;
    for component in &mut components {
        if component == entry {
            return None;
        }
        if component.starts_with(home) && component.ends_with(bin_suffix) {
            *component = entry.to_string();
            replaced = true;
        }
    }

    if !replaced {
        components.insert(0, entry.to_string());
    }

    Some(components.join(&separator.to_string()))
}
