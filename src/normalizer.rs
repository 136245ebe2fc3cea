/// Slugs with at least this many hyphen parts end in a meeting-type suffix
/// (`jane-doe-demo`), which is dropped from the name.
pub const SUFFIX_MIN_PARTS: usize = 3;

/// Turn a scheduling slug into a display name: `john-q-public-demo` becomes
/// `John Q Public`.
pub fn name_from_slug(slug: &str) -> String {
    let parts: Vec<&str> = slug.split('-').collect();
    let keep = if parts.len() >= SUFFIX_MIN_PARTS {
        &parts[..parts.len() - 1]
    } else {
        &parts[..]
    };
    keep.iter()
        .map(|p| capitalize_first(p))
        .collect::<Vec<_>>()
        .join(" ")
}

// Only the first character changes case.
fn capitalize_first(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
