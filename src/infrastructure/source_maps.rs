use crate::infrastructure::processors::PathFlattenTransform;
use crate::utils::Result;
use serde::{Deserialize, Serialize};

/// Source map format (v3), as emitted by the external compiler
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugMap {
    pub version: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_root: Option<String>,
    pub sources: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources_content: Option<Vec<String>>,
    #[serde(default)]
    pub names: Vec<String>,
    pub mappings: String,
}

/// Rewrites the "sources" references of an emitted debug map through the
/// reverse path transform, so tooling shows true nested locations instead
/// of the flattened names the compiler saw.
pub fn restore_map_sources(map_text: &str, flatten: &PathFlattenTransform) -> Result<String> {
    let mut map: DebugMap = serde_json::from_str(map_text)?;
    for source in &mut map.sources {
        *source = flatten.reverse(source);
    }
    Ok(serde_json::to_string(&map)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_with_sources(sources: &[&str]) -> String {
        serde_json::to_string(&DebugMap {
            version: 3,
            file: Some("lib_compressed.js".to_string()),
            source_root: None,
            sources: sources.iter().map(|s| s.to_string()).collect(),
            sources_content: None,
            names: vec![],
            mappings: "AAAA".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_restores_flattened_sources() {
        let flatten = PathFlattenTransform::new("core");
        let input = map_with_sources(&["core/utils-slash-dom.js", "blocks/math.js"]);

        let output = restore_map_sources(&input, &flatten).unwrap();
        let map: DebugMap = serde_json::from_str(&output).unwrap();

        assert_eq!(map.sources, vec!["core/utils/dom.js", "blocks/math.js"]);
    }

    #[test]
    fn test_untouched_sources_survive_round_trip() {
        let flatten = PathFlattenTransform::new("core");
        let input = map_with_sources(&["blocks/math.js"]);

        let output = restore_map_sources(&input, &flatten).unwrap();
        let map: DebugMap = serde_json::from_str(&output).unwrap();

        assert_eq!(map.sources, vec!["blocks/math.js"]);
        assert_eq!(map.mappings, "AAAA");
        assert_eq!(map.file.as_deref(), Some("lib_compressed.js"));
    }

    #[test]
    fn test_unparsable_map_is_parse_error() {
        let flatten = PathFlattenTransform::new("core");
        let err = restore_map_sources("not a map", &flatten).unwrap_err();
        assert!(matches!(err, crate::utils::StratumError::Parse(_)));
    }
}
