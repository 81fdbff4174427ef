//! Core domain types for symbol graph documents.
//!
//! A symbol graph describes the symbols a module declares and the directed
//! relationships between them. Fields these types don't model are kept in
//! `extra` maps so a graph passes through a transform unmodified.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Symbols keyed by their precise identifier.
pub type SymbolMap = HashMap<String, Symbol>;

// ── Graph ─────────────────────────────────────────────────────────

/// A decoded symbol graph document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolGraph {
    pub metadata: Metadata,
    pub module: Module,
    /// Serialized as a list; keyed by `identifier.precise` in memory.
    #[serde(default, with = "symbol_list")]
    pub symbols: SymbolMap,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

impl SymbolGraph {
    /// Create an empty graph for the given module.
    pub fn new(metadata: Metadata, module: Module) -> Self {
        Self {
            metadata,
            module,
            symbols: SymbolMap::new(),
            relationships: Vec::new(),
        }
    }

    /// Insert a symbol under its own precise identifier, replacing any
    /// symbol previously stored there.
    pub fn insert_symbol(&mut self, symbol: Symbol) -> Option<Symbol> {
        self.symbols.insert(symbol.identifier.precise.clone(), symbol)
    }

    /// Relationships whose source or target is not a key of `symbols`.
    pub fn dangling_relationships(&self) -> Vec<&Relationship> {
        self.relationships
            .iter()
            .filter(|r| {
                !self.symbols.contains_key(&r.source) || !self.symbols.contains_key(&r.target)
            })
            .collect()
    }

    /// Sorted precise identifiers of all symbols.
    pub fn precise_identifiers(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.symbols.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

/// Document metadata: format version and the tool that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub format_version: SemanticVersion,
    pub generator: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Metadata {
    pub fn new(generator: impl Into<String>) -> Self {
        Self {
            format_version: SemanticVersion::new(0, 6, 0),
            generator: generator.into(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prerelease: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_metadata: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SemanticVersion {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            prerelease: None,
            build_metadata: None,
            extra: Map::new(),
        }
    }
}

impl std::fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(prerelease) = &self.prerelease {
            write!(f, "-{prerelease}")?;
        }
        if let Some(build) = &self.build_metadata {
            write!(f, "+{build}")?;
        }
        Ok(())
    }
}

/// The module a symbol graph was extracted from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub name: String,
    #[serde(default)]
    pub platform: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            platform: Value::Object(Map::new()),
            extra: Map::new(),
        }
    }
}

// ── Symbols ───────────────────────────────────────────────────────

/// A program entity (function, type, property, ...) in the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Symbol {
    pub identifier: SymbolIdentifier,
    pub kind: SymbolKind,
    /// `None` when the document omits the field, so it stays omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_components: Option<Vec<String>>,
    pub names: Names,
    pub access_level: AccessLevel,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Symbol {
    /// Create a symbol titled after its precise identifier.
    pub fn new(
        identifier: SymbolIdentifier,
        kind: SymbolKind,
        access_level: AccessLevel,
    ) -> Self {
        let title = identifier.precise.clone();
        Self {
            identifier,
            kind,
            path_components: Some(vec![title.clone()]),
            names: Names {
                title,
                extra: Map::new(),
            },
            access_level,
            extra: Map::new(),
        }
    }

    pub fn precise_identifier(&self) -> &str {
        &self.identifier.precise
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolIdentifier {
    /// Unique key of the symbol within a graph.
    pub precise: String,
    pub interface_language: String,
}

impl SymbolIdentifier {
    pub fn new(precise: impl Into<String>, interface_language: impl Into<String>) -> Self {
        Self {
            precise: precise.into(),
            interface_language: interface_language.into(),
        }
    }
}

/// Kind of a symbol, e.g. `swift.func` / "Function".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolKind {
    pub identifier: String,
    pub display_name: String,
}

impl SymbolKind {
    pub fn new(identifier: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            display_name: display_name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Names {
    pub title: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Access level of a symbol as written in the document.
///
/// Kept as the raw string so unknown levels survive a round trip;
/// [`AccessLevel::rank`] gives the ordering of the known ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessLevel(String);

impl AccessLevel {
    pub const PRIVATE: &'static str = "private";
    pub const FILE_PRIVATE: &'static str = "fileprivate";
    pub const INTERNAL: &'static str = "internal";
    pub const PACKAGE: &'static str = "package";
    pub const PUBLIC: &'static str = "public";
    pub const OPEN: &'static str = "open";

    pub fn new(level: impl Into<String>) -> Self {
        Self(level.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Position in `private < fileprivate < internal < package < public < open`,
    /// or `None` for a level outside that list.
    pub fn rank(&self) -> Option<u8> {
        match self.0.to_lowercase().as_str() {
            Self::PRIVATE => Some(0),
            Self::FILE_PRIVATE => Some(1),
            Self::INTERNAL => Some(2),
            Self::PACKAGE => Some(3),
            Self::PUBLIC => Some(4),
            Self::OPEN => Some(5),
            _ => None,
        }
    }
}

impl std::fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Relationships ─────────────────────────────────────────────────

/// A directed edge between two symbols, by precise identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub kind: RelationshipKind,
    pub source: String,
    pub target: String,
    /// Display name of the target when it lives outside this graph.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_fallback: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Relationship {
    pub fn new(
        kind: impl Into<RelationshipKind>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            source: source.into(),
            target: target.into(),
            target_fallback: None,
            extra: Map::new(),
        }
    }
}

/// Relationship kind tag, e.g. `memberOf`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationshipKind(String);

impl RelationshipKind {
    pub const MEMBER_OF: &'static str = "memberOf";
    pub const CONFORMS_TO: &'static str = "conformsTo";
    pub const INHERITS_FROM: &'static str = "inheritsFrom";
    pub const DEFAULT_IMPLEMENTATION_OF: &'static str = "defaultImplementationOf";
    pub const OVERRIDES: &'static str = "overrides";
    pub const REQUIREMENT_OF: &'static str = "requirementOf";
    pub const OPTIONAL_REQUIREMENT_OF: &'static str = "optionalRequirementOf";
    pub const EXTENSION_TO: &'static str = "extensionTo";

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RelationshipKind {
    fn from(kind: &str) -> Self {
        Self(kind.to_owned())
    }
}

impl From<String> for RelationshipKind {
    fn from(kind: String) -> Self {
        Self(kind)
    }
}

impl std::fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

mod symbol_list {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{Symbol, SymbolMap};

    pub fn serialize<S: Serializer>(symbols: &SymbolMap, serializer: S) -> Result<S::Ok, S::Error> {
        // Sorted so the output is stable across runs.
        let mut sorted: Vec<&Symbol> = symbols.values().collect();
        sorted.sort_by(|a, b| a.identifier.precise.cmp(&b.identifier.precise));
        serializer.collect_seq(sorted)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SymbolMap, D::Error> {
        let symbols = Vec::<Symbol>::deserialize(deserializer)?;
        Ok(symbols
            .into_iter()
            .map(|symbol| (symbol.identifier.precise.clone(), symbol))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn func(precise: &str) -> Symbol {
        Symbol::new(
            SymbolIdentifier::new(precise, "swift"),
            SymbolKind::new("swift.func", "Function"),
            AccessLevel::new(AccessLevel::PUBLIC),
        )
    }

    #[test]
    fn test_symbols_are_keyed_by_precise_identifier() {
        let json = r#"{
            "metadata": {"generator": "unit-test", "formatVersion": {"major": 1, "minor": 0, "patch": 0}},
            "module": {"name": "ModuleName", "platform": {}},
            "symbols": [
                {
                    "kind": {"identifier": "swift.func", "displayName": "Function"},
                    "identifier": {"precise": "s:4Test3fooyyF", "interfaceLanguage": "swift"},
                    "pathComponents": ["foo()"],
                    "names": {"title": "foo()"},
                    "accessLevel": "public"
                }
            ],
            "relationships": []
        }"#;

        let graph: SymbolGraph = serde_json::from_str(json).unwrap();
        assert_eq!(graph.precise_identifiers(), vec!["s:4Test3fooyyF"]);
        assert_eq!(graph.metadata.format_version.to_string(), "1.0.0");
        assert_eq!(graph.module.name, "ModuleName");
    }

    #[test]
    fn test_unknown_fields_pass_through() {
        let json = r#"{
            "kind": {"identifier": "swift.struct", "displayName": "Structure"},
            "identifier": {"precise": "s:4Test3BarV", "interfaceLanguage": "swift"},
            "names": {"title": "Bar", "subHeading": [{"kind": "identifier", "spelling": "Bar"}]},
            "accessLevel": "public",
            "docComment": {"lines": [{"text": "A bar."}]}
        }"#;

        let symbol: Symbol = serde_json::from_str(json).unwrap();
        assert!(symbol.extra.contains_key("docComment"));
        assert!(symbol.names.extra.contains_key("subHeading"));

        let reencoded = serde_json::to_value(&symbol).unwrap();
        assert_eq!(reencoded["docComment"]["lines"][0]["text"], "A bar.");
        assert_eq!(reencoded["names"]["subHeading"][0]["spelling"], "Bar");
    }

    #[test]
    fn test_symbols_serialize_as_sorted_list() {
        let mut graph = SymbolGraph::new(Metadata::new("unit-test"), Module::new("M"));
        graph.insert_symbol(func("c"));
        graph.insert_symbol(func("a"));
        graph.insert_symbol(func("b"));

        let value = serde_json::to_value(&graph).unwrap();
        let ids: Vec<&str> = value["symbols"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["identifier"]["precise"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_relationship_kind_serializes_as_plain_string() {
        let rel = Relationship::new(RelationshipKind::MEMBER_OF, "a", "b");
        let json = serde_json::to_value(&rel).unwrap();
        assert_eq!(json["kind"], "memberOf");
        assert!(json.get("targetFallback").is_none());
    }

    #[test]
    fn test_dangling_relationships_reference_missing_symbols() {
        let mut graph = SymbolGraph::new(Metadata::new("unit-test"), Module::new("M"));
        graph.insert_symbol(func("a"));
        graph.insert_symbol(func("b"));
        graph.relationships = vec![
            Relationship::new(RelationshipKind::MEMBER_OF, "a", "b"),
            Relationship::new(RelationshipKind::CONFORMS_TO, "b", "P"),
        ];

        let dangling = graph.dangling_relationships();
        assert_eq!(dangling.len(), 1);
        assert_eq!(dangling[0].target, "P");
    }

    #[test]
    fn test_access_level_ordering() {
        let rank = |s: &str| AccessLevel::new(s).rank();
        assert!(rank("private") < rank("fileprivate"));
        assert!(rank("internal") < rank("public"));
        assert!(rank("public") < rank("open"));
        assert_eq!(rank("filePrivate"), Some(1));
        assert_eq!(rank("spi"), None);
    }

    #[test]
    fn test_format_version_pre_release_round_trip() {
        let json = r#"{
            "formatVersion": {
                "major": 0,
                "minor": 6,
                "patch": 0,
                "prerelease": "beta.1",
                "buildMetadata": "x"
            },
            "generator": "unit-test",
            "toolchain": "6.0"
        }"#;

        let metadata: Metadata = serde_json::from_str(json).unwrap();
        assert_eq!(metadata.format_version.prerelease.as_deref(), Some("beta.1"));
        assert_eq!(metadata.format_version.build_metadata.as_deref(), Some("x"));
        assert_eq!(metadata.format_version.to_string(), "0.6.0-beta.1+x");

        let reencoded = serde_json::to_value(&metadata).unwrap();
        assert_eq!(reencoded["formatVersion"]["prerelease"], "beta.1");
        assert_eq!(reencoded["formatVersion"]["buildMetadata"], "x");
        assert_eq!(reencoded["toolchain"], "6.0");
    }

    #[test]
    fn test_plain_format_version_omits_optional_parts() {
        let reencoded = serde_json::to_value(SemanticVersion::new(1, 0, 0)).unwrap();
        assert_eq!(reencoded, serde_json::json!({"major": 1, "minor": 0, "patch": 0}));
    }

    #[test]
    fn test_path_components_presence_round_trips() {
        let without = r#"{
            "kind": {"identifier": "swift.func", "displayName": "Function"},
            "identifier": {"precise": "a", "interfaceLanguage": "swift"},
            "names": {"title": "a"},
            "accessLevel": "public"
        }"#;
        let symbol: Symbol = serde_json::from_str(without).unwrap();
        assert!(symbol.path_components.is_none());
        assert!(serde_json::to_value(&symbol).unwrap().get("pathComponents").is_none());

        let with_empty = without.replace(
            r#""accessLevel": "public""#,
            r#""accessLevel": "public", "pathComponents": []"#,
        );
        let symbol: Symbol = serde_json::from_str(&with_empty).unwrap();
        assert_eq!(symbol.path_components, Some(vec![]));
        assert_eq!(
            serde_json::to_value(&symbol).unwrap()["pathComponents"],
            serde_json::json!([])
        );
    }
}
