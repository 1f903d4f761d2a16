use std::path::{Path, PathBuf, MAIN_SEPARATOR_STR};

/// Reserved substring recording original segment boundaries in flattened
/// file names. Must never occur in a legitimate path segment, which makes
/// the flattening lossless and the reverse transform unambiguous.
pub const FLATTEN_TOKEN: &str = "-slash-";

/// Reversible rewrite of nested paths under one designated top-level source
/// area into a flat namespace.
///
/// The downstream compiler scopes its visibility-restriction check per
/// directory; the designated area must instead be treated as a single flat
/// scope, so `core/a/b.js` becomes `core/a-slash-b.js` before compilation
/// and is restored when debug-map references are rewritten afterwards.
#[derive(Debug, Clone)]
pub struct PathFlattenTransform {
    area: String,
}

impl PathFlattenTransform {
    pub fn new(area: impl Into<String>) -> Self {
        Self { area: area.into() }
    }

    /// Flatten a path under the reserved area; any other path is returned
    /// unchanged. The basename keeps its original form as a suffix, so two
    /// distinct nested paths can never collide after the rewrite.
    pub fn forward(&self, path: &Path) -> PathBuf {
        let segments: Vec<&str> = path
            .iter()
            .map(|s| s.to_str().unwrap_or_default())
            .collect();

        match segments.split_first() {
            Some((&first, rest)) if first == self.area && rest.len() > 1 => {
                PathBuf::from(first).join(rest.join(FLATTEN_TOKEN))
            }
            _ => path.to_path_buf(),
        }
    }

    /// Restore every recorded segment boundary to a path separator. A no-op
    /// on any string `forward` would not have touched.
    pub fn reverse(&self, flat: &str) -> String {
        flat.replace(FLATTEN_TOKEN, MAIN_SEPARATOR_STR)
    }
}
