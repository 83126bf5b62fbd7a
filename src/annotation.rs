//! # Annotation Resolver
//!
//! Typed access to annotation configuration and the reverse direction:
//! rendering annotation values back into source literals.
//!
//! ## Extraction
//!
//! - [`Annotation::positional`] / [`Annotation::named_value`] return raw values;
//!   a `Null` value reads as absent.
//! - [`AnnotationValue::as_array`] treats an empty array as absent.
//! - [`string_set`] / [`type_set`] collect array configuration into sets.
//!
//! ## Formatting
//!
//! | Value       | Rendered as                          |
//! |-------------|--------------------------------------|
//! | `Null`      | `null`                               |
//! | `String`    | `"text"` with `"` escaped            |
//! | `Bool`      | `true` / `false`                     |
//! | `Char`      | `'c'`                                |
//! | `TypeRef`   | `typeof(Fully.Qualified.Name)`       |
//! | `Array`     | `new[] {a, b}`, or empty when empty  |
//! | other       | literal text                         |
//!
//! An empty string from [`format_value`] means "omit this argument".

use crate::graph::{Annotation, AnnotationValue, TypeDescriptor};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

static MARKER_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[A-Za-z0-9_]+\.)*(?P<name>[A-Za-z_][A-Za-z0-9_]*)(?:`\d+|<.*>)?$")
        .expect("marker name regex should be valid")
});

const ATTRIBUTE_SUFFIX: &str = "Attribute";

/// Simple name of an annotation kind: namespace, generic arity/arguments and
/// a trailing `Attribute` removed.
///
/// `Facadegen.DtoAttribute`, ``Facadegen.DtoAttribute`1``, `Dto<Order>` and
/// `Dto` all yield `Dto`.
pub fn marker_name(kind: &str) -> Option<&str> {
    let caps = MARKER_NAME_REGEX.captures(kind)?;
    let name = caps.name("name")?.as_str();
    match name.strip_suffix(ATTRIBUTE_SUFFIX) {
        Some(stripped) if !stripped.is_empty() => Some(stripped),
        _ => Some(name),
    }
}

/// Annotation kind with any generic arity (`` `1 ``) or type-argument list
/// (`<...>`) suffix removed: ``Acme.PiiAttribute`1`` and
/// `Acme.PiiAttribute<string>` both yield `Acme.PiiAttribute`.
pub fn type_identity(kind: &str) -> &str {
    let end = kind.find(['`', '<']).unwrap_or(kind.len());
    &kind[..end]
}

/// True when an annotation kind names `marker`, in plain or generic form.
pub fn is_marker(kind: &str, marker: &str) -> bool {
    marker_name(kind) == Some(marker)
}

impl Annotation {
    /// The `index`-th positional value; `Null` reads as absent.
    pub fn positional(&self, index: usize) -> Option<&AnnotationValue> {
        self.args.get(index).filter(|v| !v.is_null())
    }

    /// A named value by key; `Null` reads as absent.
    pub fn named_value(&self, key: &str) -> Option<&AnnotationValue> {
        self.named
            .iter()
            .find(|arg| arg.name == key)
            .map(|arg| &arg.value)
            .filter(|v| !v.is_null())
    }

    /// Non-empty string stored at a positional slot.
    pub fn positional_str(&self, index: usize) -> Option<&str> {
        self.positional(index)
            .and_then(AnnotationValue::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Non-empty string stored under a named key.
    pub fn named_str(&self, key: &str) -> Option<&str> {
        self.named_value(key)
            .and_then(AnnotationValue::as_str)
            .filter(|s| !s.is_empty())
    }

    /// First generic type argument, when applied in generic form.
    pub fn generic_argument(&self) -> Option<&TypeDescriptor> {
        self.type_args.first()
    }
}

impl AnnotationValue {
    pub fn is_null(&self) -> bool {
        matches!(self, AnnotationValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AnnotationValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_type(&self) -> Option<&TypeDescriptor> {
        match self {
            AnnotationValue::TypeRef(ty) => Some(ty),
            _ => None,
        }
    }

    /// Array elements; an empty array is treated as absent.
    pub fn as_array(&self) -> Option<&[AnnotationValue]> {
        match self {
            AnnotationValue::Array(items) if !items.is_empty() => Some(items),
            _ => None,
        }
    }
}

/// Non-empty strings of an array value, as a set.
pub fn string_set(value: Option<&AnnotationValue>) -> BTreeSet<String> {
    value
        .and_then(AnnotationValue::as_array)
        .unwrap_or_default()
        .iter()
        .filter_map(AnnotationValue::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Type references of an array value, as a set.
pub fn type_set(value: Option<&AnnotationValue>) -> BTreeSet<TypeDescriptor> {
    value
        .and_then(AnnotationValue::as_array)
        .unwrap_or_default()
        .iter()
        .filter_map(AnnotationValue::as_type)
        .cloned()
        .collect()
}

/// Render a value as a source literal. Empty output means "omit the argument".
pub fn format_value(value: &AnnotationValue) -> String {
    match value {
        AnnotationValue::Null => "null".to_string(),
        AnnotationValue::String(s) => format!("\"{}\"", s.replace('"', "\\\"")),
        AnnotationValue::Bool(b) => b.to_string(),
        AnnotationValue::Char(c) => format!("'{c}'"),
        AnnotationValue::TypeRef(ty) => format!("typeof({})", ty.render()),
        AnnotationValue::Array(items) if items.is_empty() => String::new(),
        AnnotationValue::Array(items) => {
            let rendered: Vec<String> = items.iter().map(format_value).collect();
            format!("new[] {{{}}}", rendered.join(", "))
        }
        AnnotationValue::Primitive(text) | AnnotationValue::EnumLiteral(text) => text.clone(),
    }
}

/// Name used when re-stating an annotation: arity marker and `Attribute` suffix removed.
fn display_kind(annotation: &Annotation) -> String {
    let base = annotation
        .kind
        .split('`')
        .next()
        .unwrap_or(&annotation.kind);
    let base = base
        .strip_suffix(ATTRIBUTE_SUFFIX)
        .filter(|b| !b.is_empty() && !b.ends_with('.'))
        .unwrap_or(base);
    if annotation.type_args.is_empty() {
        base.to_string()
    } else {
        let args: Vec<String> = annotation.type_args.iter().map(|t| t.render()).collect();
        format!("{}<{}>", base, args.join(", "))
    }
}

/// Render an annotation as `[Kind(positional, Named = value)]`.
///
/// Arguments whose value formats to empty text are dropped; parentheses are
/// written only when at least one argument remains.
pub fn render_annotation(annotation: &Annotation) -> String {
    let mut args: Vec<String> = annotation
        .args
        .iter()
        .map(format_value)
        .filter(|arg| !arg.is_empty())
        .collect();
    args.extend(annotation.named.iter().filter_map(|arg| {
        let value = format_value(&arg.value);
        (!value.is_empty()).then(|| format!("{} = {}", arg.name, value))
    }));

    let name = display_kind(annotation);
    if args.is_empty() {
        format!("[{name}]")
    } else {
        format!("[{}({})]", name, args.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_name_variants() {
        assert_eq!(marker_name("Facadegen.DtoAttribute"), Some("Dto"));
        assert_eq!(marker_name("Facadegen.DtoAttribute`1"), Some("Dto"));
        assert_eq!(marker_name("Dto<Shop.Models.Order>"), Some("Dto"));
        assert_eq!(marker_name("Dto"), Some("Dto"));
        assert_eq!(marker_name("Attribute"), Some("Attribute"));
        assert_eq!(marker_name("not a name"), None);
        assert_eq!(type_identity("Acme.PiiAttribute`1"), "Acme.PiiAttribute");
        assert_eq!(type_identity("Acme.PiiAttribute<System.String>"), "Acme.PiiAttribute");
        assert_eq!(type_identity("Acme.PiiAttribute"), "Acme.PiiAttribute");
        assert!(is_marker("HttpFacade", "HttpFacade"));
        assert!(!is_marker("HttpFacadeExtra", "HttpFacade"));
    }

    #[test]
    fn test_format_value_rules() {
        assert_eq!(format_value(&AnnotationValue::Null), "null");
        assert_eq!(
            format_value(&AnnotationValue::String("say \"hi\"".into())),
            "\"say \\\"hi\\\"\""
        );
        assert_eq!(format_value(&AnnotationValue::Bool(false)), "false");
        assert_eq!(format_value(&AnnotationValue::Char('x')), "'x'");
        assert_eq!(
            format_value(&AnnotationValue::TypeRef(TypeDescriptor::named("A.B"))),
            "typeof(A.B)"
        );
        assert_eq!(format_value(&AnnotationValue::Primitive("42".into())), "42");
        assert_eq!(
            format_value(&AnnotationValue::EnumLiteral("System.AttributeTargets.Class".into())),
            "System.AttributeTargets.Class"
        );
        assert_eq!(format_value(&AnnotationValue::Array(vec![])), "");
        assert_eq!(
            format_value(&AnnotationValue::Array(vec![
                AnnotationValue::Primitive("1".into()),
                AnnotationValue::String("a".into()),
            ])),
            "new[] {1, \"a\"}"
        );
    }

    #[test]
    fn test_render_annotation_positional_and_named() {
        let annotation = Annotation::new("System.ComponentModel.DataAnnotations.RangeAttribute")
            .with_arg(AnnotationValue::Primitive("0".into()))
            .with_arg(AnnotationValue::Primitive("60".into()))
            .with_named("ErrorMessage", AnnotationValue::String("Wrong Age".into()));
        assert_eq!(
            render_annotation(&annotation),
            "[System.ComponentModel.DataAnnotations.Range(0, 60, ErrorMessage = \"Wrong Age\")]"
        );
    }

    #[test]
    fn test_render_annotation_drops_empty_arrays() {
        let annotation = Annotation::new("Acme.TagsAttribute")
            .with_arg(AnnotationValue::Array(vec![]))
            .with_named("Extra", AnnotationValue::Array(vec![]));
        assert_eq!(render_annotation(&annotation), "[Acme.Tags]");

        let only_named = Annotation::new("Acme.TagsAttribute")
            .with_arg(AnnotationValue::Array(vec![]))
            .with_named("Order", AnnotationValue::Primitive("2".into()));
        assert_eq!(render_annotation(&only_named), "[Acme.Tags(Order = 2)]");
    }

    #[test]
    fn test_render_generic_annotation() {
        let annotation = Annotation::new("Acme.ValidatorAttribute`1")
            .with_type_arg(TypeDescriptor::named("Acme.Rules"));
        assert_eq!(render_annotation(&annotation), "[Acme.Validator<Acme.Rules>]");
    }

    #[test]
    fn test_null_and_empty_read_as_absent() {
        let annotation = Annotation::new("Facadegen.HttpFacadeAttribute")
            .with_arg(AnnotationValue::String(String::new()))
            .with_named("Service", AnnotationValue::Null)
            .with_named("Tags", AnnotationValue::Array(vec![]));
        assert!(annotation.positional(0).is_some());
        assert_eq!(annotation.positional_str(0), None);
        assert_eq!(annotation.named_value("Service"), None);
        assert_eq!(annotation.named_value("Tags").and_then(AnnotationValue::as_array), None);
    }

    #[test]
    fn test_collect_sets() {
        let names = AnnotationValue::Array(vec![
            AnnotationValue::String("Id".into()),
            AnnotationValue::String(String::new()),
            AnnotationValue::Primitive("3".into()),
            AnnotationValue::String("Id".into()),
        ]);
        assert_eq!(
            string_set(Some(&names)).into_iter().collect::<Vec<_>>(),
            vec!["Id".to_string()]
        );
        let types = AnnotationValue::Array(vec![AnnotationValue::TypeRef(
            TypeDescriptor::named("A.B"),
        )]);
        assert_eq!(type_set(Some(&types)).len(), 1);
        assert!(string_set(None).is_empty());
    }
}
