use super::TypeDescriptor;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    Class,
    Interface,
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclarationKind::Class => write!(f, "class"),
            DeclarationKind::Interface => write!(f, "interface"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Method,
    Property,
}

/// A configuration value attached to an annotation, positional or named.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationValue {
    Null,
    String(String),
    Bool(bool),
    Char(char),
    /// Numeric or other primitive literal, kept as its source text
    Primitive(String),
    #[serde(rename = "type")]
    TypeRef(TypeDescriptor),
    /// Enum member literal, e.g. `System.AttributeTargets.Class`
    #[serde(rename = "enum")]
    EnumLiteral(String),
    Array(Vec<AnnotationValue>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedArgument {
    pub name: String,
    pub value: AnnotationValue,
}

/// An annotation instance on a declaration or member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Identifier of the annotation type, normally fully qualified
    pub kind: String,
    /// Type arguments when the annotation was applied in generic form
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_args: Vec<TypeDescriptor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<AnnotationValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub named: Vec<NamedArgument>,
}

impl Annotation {
    pub fn new(kind: impl Into<String>) -> Self {
        Annotation {
            kind: kind.into(),
            type_args: Vec::new(),
            args: Vec::new(),
            named: Vec::new(),
        }
    }

    pub fn with_type_arg(mut self, ty: TypeDescriptor) -> Self {
        self.type_args.push(ty);
        self
    }

    pub fn with_arg(mut self, value: AnnotationValue) -> Self {
        self.args.push(value);
        self
    }

    pub fn with_named(mut self, name: impl Into<String>, value: AnnotationValue) -> Self {
        self.named.push(NamedArgument {
            name: name.into(),
            value,
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeDescriptor,
}

/// A method or property on a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub kind: MemberKind,
    pub name: String,
    /// Return type for methods, value type for properties
    #[serde(rename = "type")]
    pub ty: TypeDescriptor,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
    /// Literal initializer text as written in source (`string.Empty`, `[]`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initializer: Option<String>,
    /// Compiler-generated member (record equality machinery and the like)
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub synthetic: bool,
}

impl Member {
    pub fn method(name: impl Into<String>, returns: TypeDescriptor) -> Self {
        Member::new(MemberKind::Method, name, returns)
    }

    pub fn property(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Member::new(MemberKind::Property, name, ty)
    }

    fn new(kind: MemberKind, name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Member {
            kind,
            name: name.into(),
            ty,
            parameters: Vec::new(),
            annotations: Vec::new(),
            initializer: None,
            synthetic: false,
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, ty: TypeDescriptor) -> Self {
        self.parameters.push(Parameter {
            name: name.into(),
            ty,
        });
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_initializer(mut self, text: impl Into<String>) -> Self {
        self.initializer = Some(text.into());
        self
    }

    pub fn synthetic(mut self) -> Self {
        self.synthetic = true;
        self
    }

    pub fn is_method(&self) -> bool {
        self.kind == MemberKind::Method
    }

    pub fn is_property(&self) -> bool {
        self.kind == MemberKind::Property
    }

    /// Record equality machinery the host may report as an ordinary property.
    pub fn is_equality_machinery(&self) -> bool {
        self.synthetic || self.name == "EqualityContract"
    }
}

/// A type declaration in the graph. `identity` is the stable key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub identity: String,
    pub kind: DeclarationKind,
    pub namespace: String,
    #[serde(default)]
    pub partial: bool,
    /// Single parent in the base-type chain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_type: Option<String>,
    /// Implemented interfaces in declared order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<TypeDescriptor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<Member>,
}

impl Declaration {
    pub fn class(identity: impl Into<String>, namespace: impl Into<String>) -> Self {
        Declaration::new(DeclarationKind::Class, identity, namespace)
    }

    pub fn interface(identity: impl Into<String>, namespace: impl Into<String>) -> Self {
        Declaration::new(DeclarationKind::Interface, identity, namespace)
    }

    fn new(kind: DeclarationKind, identity: impl Into<String>, namespace: impl Into<String>) -> Self {
        Declaration {
            identity: identity.into(),
            kind,
            namespace: namespace.into(),
            partial: false,
            base_type: None,
            interfaces: Vec::new(),
            annotations: Vec::new(),
            members: Vec::new(),
        }
    }

    pub fn partial(mut self) -> Self {
        self.partial = true;
        self
    }

    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base_type = Some(base.into());
        self
    }

    pub fn with_interface(mut self, ty: TypeDescriptor) -> Self {
        self.interfaces.push(ty);
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    pub fn is_interface(&self) -> bool {
        self.kind == DeclarationKind::Interface
    }

    /// Name without its namespace.
    pub fn simple_name(&self) -> &str {
        simple_name(&self.identity)
    }

    pub fn methods(&self) -> impl Iterator<Item = &Member> {
        self.members.iter().filter(|m| m.is_method())
    }

    pub fn properties(&self) -> impl Iterator<Item = &Member> {
        self.members.iter().filter(|m| m.is_property())
    }
}

/// Last dotted segment of a qualified name.
pub fn simple_name(qualified: &str) -> &str {
    qualified.rsplit('.').next().unwrap_or(qualified)
}
