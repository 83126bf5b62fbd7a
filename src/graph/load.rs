use super::{DeclarationSet, GraphDocument};
use anyhow::Context;
use std::path::Path;

/// Load a declaration graph snapshot from a YAML (`.yaml`/`.yml`) or JSON file.
///
/// YAML is read into a `serde_json::Value` first so both formats share one
/// externally-tagged representation of enums.
pub fn load_graph(path: &Path) -> anyhow::Result<DeclarationSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read declaration graph: {}", path.display()))?;
    let is_yaml = path
        .extension()
        .map(|ext| ext == "yaml" || ext == "yml")
        .unwrap_or(false);
    parse_graph(&content, is_yaml)
        .with_context(|| format!("Failed to parse declaration graph: {}", path.display()))
}

/// Parse a graph snapshot from text.
pub fn parse_graph(content: &str, is_yaml: bool) -> anyhow::Result<DeclarationSet> {
    let value: serde_json::Value = if is_yaml {
        serde_yaml::from_str(content)?
    } else {
        serde_json::from_str(content)?
    };
    let doc: GraphDocument = serde_json::from_value(value)?;
    let set = DeclarationSet::from(doc);
    tracing::debug!(declarations = set.len(), "loaded declaration graph");
    Ok(set)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::graph::{AnnotationValue, DeclarationGraph, DeclarationKind, MemberKind};

    const YAML: &str = r#"
declarations:
  - identity: Shop.Models.Order
    kind: class
    namespace: Shop.Models
    members:
      - kind: property
        name: Lines
        type:
          container:
            name: System.Collections.Generic.List
            args:
              - named: Shop.Models.OrderLine
        initializer: "[]"
  - identity: Shop.Models.OrderDto
    kind: class
    namespace: Shop.Models
    partial: true
    annotations:
      - kind: Facadegen.DtoAttribute
        args:
          - type:
              named: Shop.Models.Order
        named:
          - name: IgnoredProperties
            value:
              array:
                - string: Id
"#;

    #[test]
    fn test_parse_yaml_graph() {
        let graph = parse_graph(YAML, true).unwrap();
        assert_eq!(graph.len(), 2);
        let order = graph.find("Shop.Models.Order").unwrap();
        assert_eq!(order.kind, DeclarationKind::Class);
        assert_eq!(order.members[0].kind, MemberKind::Property);
        assert_eq!(
            order.members[0].ty.render(),
            "System.Collections.Generic.List<Shop.Models.OrderLine>"
        );
        assert_eq!(order.members[0].initializer.as_deref(), Some("[]"));

        let dto = graph.find("Shop.Models.OrderDto").unwrap();
        assert!(dto.partial);
        assert_eq!(dto.annotations[0].named[0].name, "IgnoredProperties");
        assert_eq!(
            dto.annotations[0].named[0].value,
            AnnotationValue::Array(vec![AnnotationValue::String("Id".to_string())])
        );
    }

    #[test]
    fn test_parse_json_graph() {
        let json = r#"{"declarations":[{"identity":"A.B","kind":"interface","namespace":"A"}]}"#;
        let graph = parse_graph(json, false).unwrap();
        assert!(graph.find("A.B").unwrap().is_interface());
    }

    #[test]
    fn test_parse_rejects_unknown_kind() {
        let json = r#"{"declarations":[{"identity":"A.B","kind":"struct","namespace":"A"}]}"#;
        assert!(parse_graph(json, false).is_err());
    }
}
