//! Version string resolution.

/// Pick the version string to display.
///
/// A non-empty embedded override (injected at build time) wins. Otherwise
/// the build-provided package version is used, with the `""` / `"(devel)"`
/// markers of an unversioned build collapsed to `"devel"`. When neither is
/// available the result is `"unknown"`.
pub fn resolve(embedded: Option<&str>, build: Option<&str>) -> String {
    match embedded {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => match build {
            Some("") | Some("(devel)") => "devel".to_string(),
            Some(v) => v.to_string(),
            None => "unknown".to_string(),
        },
    }
}
