use crate::degraded::Degraded;
use std::fs;
use std::path::Path;

/// Placeholder replaced with the shared guide contents
pub const GUIDE_PLACEHOLDER: &str = "{guide}";

/// Read the shared guide verbatim. A missing or unreadable guide yields an
/// error string in its place.
pub fn load_guide(path: &Path) -> Degraded<String> {
    match fs::read_to_string(path) {
        Ok(content) => Degraded::ok(content),
        Err(e) => Degraded::fallback(
            format!("Error loading parallel guide: {}", e),
            format!("Failed to read guide {}: {}", path.display(), e),
        ),
    }
}

/// Substitute the guide into a template. The guide is only read when the
/// template asks for it.
pub fn interpolate(template: &str, guide_path: &Path) -> Degraded<String> {
    if !template.contains(GUIDE_PLACEHOLDER) {
        return Degraded::ok(template.to_string());
    }

    let guide = load_guide(guide_path);
    Degraded {
        value: template.replace(GUIDE_PLACEHOLDER, &guide.value),
        warning: guide.warning,
    }
}
