use crate::core::models::{ChunkGraph, ChunkNode};

/// Placeholder the external compiler substitutes with the compiled chunk
/// body. Exactly one occurrence per wrapper.
pub const OUTPUT_PLACEHOLDER: &str = "%output%";

/// Variable holding the shared namespace object inside every factory. The
/// compiler renames top-level bindings into properties of this object so
/// separately-compiled chunks can still reference each other's symbols.
pub const NAMESPACE_VARIABLE: &str = "$";

/// Property under which the root chunk publishes the shared namespace
/// object on its own export, so dependent chunks retrieve the same object
/// instead of creating their own.
pub const NAMESPACE_PROPERTY: &str = "__namespace__";

/// Emits the universal loader wrapper for one resolved chunk.
///
/// The wrapper offers three interchangeable loading strategies for the same
/// compiled body: AMD module definition, synchronous CommonJS requires, and
/// browser globals read off a shared root object.
pub struct WrapperGenerator;

impl WrapperGenerator {
    /// Pure function of the resolved graph and the chunk's position in it.
    /// Graph invariants (root first, dependencies declared earlier) are the
    /// caller's precondition, not re-checked here.
    pub fn generate(graph: &ChunkGraph, index: usize) -> String {
        let node = &graph.nodes[index];
        let deps: Vec<&ChunkNode> = graph.dependencies_of(index).collect();

        let amd_deps = deps
            .iter()
            .map(|dep| format!("'./{}'", dep.definition.name))
            .collect::<Vec<_>>()
            .join(", ");
        let cjs_deps = deps
            .iter()
            .map(|dep| format!("require('./{}')", dep.definition.name))
            .collect::<Vec<_>>()
            .join(", ");
        let browser_deps = deps
            .iter()
            .map(|dep| format!("root.{}", dep.definition.exports_path))
            .collect::<Vec<_>>()
            .join(", ");
        let factory_args = deps
            .iter()
            .map(|dep| dep.definition.import_alias.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        let preamble = Self::factory_preamble(node, &deps);
        let postamble = Self::factory_postamble(node);

        format!(
            r#"// Do not edit this file; automatically generated.
'use strict';
(function(root, factory) {{
  if (typeof define === 'function' && define.amd) {{ // AMD
    define([{amd_deps}], factory);
  }} else if (typeof exports === 'object') {{ // Node.js
    module.exports = factory({cjs_deps});
  }} else {{ // Browser
    root.{exports_path} = factory({browser_deps});
  }}
}}(this, function({factory_args}) {{
{preamble}
{placeholder}
{postamble}return {ns}.{exports_path};
}}));
"#,
            amd_deps = amd_deps,
            cjs_deps = cjs_deps,
            browser_deps = browser_deps,
            factory_args = factory_args,
            exports_path = node.definition.exports_path,
            preamble = preamble,
            placeholder = OUTPUT_PLACEHOLDER,
            postamble = postamble,
            ns = NAMESPACE_VARIABLE,
        )
    }

    /// Root chunks create the shared namespace object fresh; every other
    /// chunk retrieves the handle its first dependency's export carries.
    /// An explicit override in the definition replaces the default verbatim.
    fn factory_preamble(node: &ChunkNode, deps: &[&ChunkNode]) -> String {
        if let Some(ref preamble) = node.definition.factory_preamble {
            return preamble.clone();
        }
        match deps.first() {
            None => format!("var {} = {{}};", NAMESPACE_VARIABLE),
            Some(first) => format!(
                "var {} = {}.{};",
                NAMESPACE_VARIABLE, first.definition.import_alias, NAMESPACE_PROPERTY
            ),
        }
    }

    /// The root chunk publishes the namespace handle on its export after
    /// its factory body has run; other chunks add nothing.
    fn factory_postamble(node: &ChunkNode) -> String {
        if let Some(ref postamble) = node.definition.factory_postamble {
            return postamble.clone();
        }
        if node.dependencies.is_empty() {
            format!(
                "{ns}.{exports}.{prop} = {ns};\n",
                ns = NAMESPACE_VARIABLE,
                exports = node.definition.exports_path,
                prop = NAMESPACE_PROPERTY,
            )
        } else {
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ChunkDefinition;
    use std::path::PathBuf;

    fn definition(name: &str, exports: &str, alias: &str) -> ChunkDefinition {
        ChunkDefinition {
            name: name.to_string(),
            entry_point: PathBuf::from(format!("{}/main.js", name)),
            exports_path: exports.to_string(),
            import_alias: alias.to_string(),
            factory_preamble: None,
            factory_postamble: None,
        }
    }

    fn two_chunk_graph() -> ChunkGraph {
        ChunkGraph {
            nodes: vec![
                ChunkNode {
                    definition: definition("lib", "Lib", "Lib"),
                    file_count: 5,
                    dependencies: vec![],
                },
                ChunkNode {
                    definition: definition("blocks", "Lib.Blocks", "libBlocks"),
                    file_count: 3,
                    dependencies: vec![0],
                },
            ],
            files: vec![],
        }
    }

    #[test]
    fn test_root_wrapper_creates_namespace() {
        let wrapper = WrapperGenerator::generate(&two_chunk_graph(), 0);

        assert!(wrapper.contains("var $ = {};"));
        assert!(wrapper.contains("$.Lib.__namespace__ = $;"));
        assert!(!wrapper.contains(".__namespace__;"));
    }

    #[test]
    fn test_dependent_wrapper_references_namespace() {
        let wrapper = WrapperGenerator::generate(&two_chunk_graph(), 1);

        // Retrieves the published handle, never recreates the object
        assert!(wrapper.contains("var $ = Lib.__namespace__;"));
        assert!(!wrapper.contains("var $ = {};"));
        assert!(wrapper.contains("function(Lib)"));
        assert!(wrapper.contains("return $.Lib.Blocks;"));
    }

    #[test]
    fn test_wrapper_contains_single_placeholder() {
        for index in 0..2 {
            let wrapper = WrapperGenerator::generate(&two_chunk_graph(), index);
            assert_eq!(wrapper.matches(OUTPUT_PLACEHOLDER).count(), 1);
        }
    }

    #[test]
    fn test_wrapper_offers_all_three_strategies() {
        let wrapper = WrapperGenerator::generate(&two_chunk_graph(), 1);

        assert!(wrapper.contains("define(['./lib'], factory);"));
        assert!(wrapper.contains("module.exports = factory(require('./lib'));"));
        assert!(wrapper.contains("root.Lib.Blocks = factory(root.Lib);"));
    }

    #[test]
    fn test_root_wrapper_has_no_dependency_imports() {
        let wrapper = WrapperGenerator::generate(&two_chunk_graph(), 0);

        assert!(wrapper.contains("define([], factory);"));
        assert!(wrapper.contains("module.exports = factory();"));
        assert!(wrapper.contains("function()"));
    }

    #[test]
    fn test_multiple_dependencies_in_resolved_order() {
        let mut graph = two_chunk_graph();
        graph.nodes.push(ChunkNode {
            definition: definition("generators", "Lib.Gen", "libGen"),
            file_count: 2,
            dependencies: vec![0, 1],
        });

        let wrapper = WrapperGenerator::generate(&graph, 2);
        assert!(wrapper.contains("define(['./lib', './blocks'], factory);"));
        assert!(wrapper.contains("factory(require('./lib'), require('./blocks'))"));
        assert!(wrapper.contains("function(Lib, libBlocks)"));
        // Handle comes from the first listed dependency
        assert!(wrapper.contains("var $ = Lib.__namespace__;"));
    }

    #[test]
    fn test_overrides_replace_defaults_verbatim() {
        let mut graph = two_chunk_graph();
        graph.nodes[1].definition.factory_preamble =
            Some("var $ = globalThis.__shared__;".to_string());
        graph.nodes[1].definition.factory_postamble = Some("/* custom */".to_string());

        let wrapper = WrapperGenerator::generate(&graph, 1);
        assert!(wrapper.contains("var $ = globalThis.__shared__;"));
        assert!(wrapper.contains("/* custom */"));
        assert!(!wrapper.contains("var $ = Lib.__namespace__;"));
    }
}
