use serde::{Deserialize, Serialize};
use std::fmt;

/// Recursive description of a type as it appears in the declaration graph.
///
/// Rendering is a pure function of the tree: `Nullable` is a wrapper that
/// survives substitution inside container arguments, so
/// `Container("List", [Nullable(Primitive("int"))])` always renders as
/// `List<int?>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeDescriptor {
    /// Built-in keyword type (`int`, `string`, `bool`, `void`, ...)
    Primitive(String),
    /// Fully-qualified reference to a declaration
    Named(String),
    /// Nullable wrapper around another descriptor
    Nullable(Box<TypeDescriptor>),
    /// Generic container with ordered type arguments
    Container {
        name: String,
        args: Vec<TypeDescriptor>,
    },
}

impl TypeDescriptor {
    pub fn primitive(name: impl Into<String>) -> Self {
        TypeDescriptor::Primitive(name.into())
    }

    pub fn named(name: impl Into<String>) -> Self {
        TypeDescriptor::Named(name.into())
    }

    pub fn container(name: impl Into<String>, args: Vec<TypeDescriptor>) -> Self {
        TypeDescriptor::Container {
            name: name.into(),
            args,
        }
    }

    /// Wrap in `Nullable`. Already-nullable descriptors are returned unchanged.
    pub fn nullable(self) -> Self {
        match self {
            TypeDescriptor::Nullable(_) => self,
            other => TypeDescriptor::Nullable(Box::new(other)),
        }
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self, TypeDescriptor::Nullable(_))
    }

    /// The descriptor with any outer nullable wrappers removed.
    pub fn strip_nullable(&self) -> &TypeDescriptor {
        match self {
            TypeDescriptor::Nullable(inner) => inner.strip_nullable(),
            other => other,
        }
    }

    /// Fully-qualified name when the descriptor (ignoring nullability) names a declaration.
    pub fn named_identity(&self) -> Option<&str> {
        match self.strip_nullable() {
            TypeDescriptor::Named(name) => Some(name),
            _ => None,
        }
    }

    /// Render the descriptor as source text.
    pub fn render(&self) -> String {
        match self {
            TypeDescriptor::Primitive(name) | TypeDescriptor::Named(name) => name.clone(),
            TypeDescriptor::Nullable(inner) => format!("{}?", inner.render()),
            TypeDescriptor::Container { name, args } => {
                let rendered: Vec<String> = args.iter().map(TypeDescriptor::render).collect();
                format!("{}<{}>", name, rendered.join(", "))
            }
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
