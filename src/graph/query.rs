use super::{Declaration, TypeDescriptor};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Upper bound on base-type chain walks; a cyclic chain in malformed input stops here.
const MAX_BASE_CHAIN: usize = 64;

/// Read-only query surface the synthesizers need from the host.
///
/// All queries are synchronous and side-effect free. A declaration may be
/// reported more than once (one entry per source fragment of a partial
/// type); `find` answers with the first fragment, `fragments` with all of them.
pub trait DeclarationGraph {
    /// Every declaration fragment, in host order.
    fn declarations(&self) -> &[Declaration];

    /// First fragment with the given identity.
    fn find(&self, identity: &str) -> Option<&Declaration> {
        self.declarations().iter().find(|d| d.identity == identity)
    }

    /// All fragments sharing an identity, in host order.
    fn fragments<'a>(&'a self, identity: &str) -> Vec<&'a Declaration> {
        self.declarations()
            .iter()
            .filter(|d| d.identity == identity)
            .collect()
    }

    /// Direct parent of a type in the single-parent base chain.
    fn base_type_of(&self, identity: &str) -> Option<&str> {
        self.find(identity).and_then(|d| d.base_type.as_deref())
    }

    /// Declaration referenced by a type descriptor, seeing through `Nullable`.
    fn resolve(&self, ty: &TypeDescriptor) -> Option<&Declaration> {
        ty.named_identity().and_then(|name| self.find(name))
    }

    /// True when `identity` is `ancestor` or derives from it by walking base types upward.
    fn is_or_derives_from(&self, identity: &str, ancestor: &str) -> bool {
        let mut current = Some(identity);
        let mut steps = 0;
        while let Some(name) = current {
            if name == ancestor {
                return true;
            }
            steps += 1;
            if steps > MAX_BASE_CHAIN {
                tracing::warn!(identity, "base-type chain exceeds {MAX_BASE_CHAIN} steps");
                return false;
            }
            current = self.base_type_of(name);
        }
        false
    }
}

/// In-memory declaration graph, typically loaded from a snapshot file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "GraphDocument", into = "GraphDocument")]
pub struct DeclarationSet {
    declarations: Vec<Declaration>,
    index: HashMap<String, usize>,
}

/// Serialized form of a [`DeclarationSet`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub declarations: Vec<Declaration>,
}

impl From<GraphDocument> for DeclarationSet {
    fn from(doc: GraphDocument) -> Self {
        DeclarationSet::new(doc.declarations)
    }
}

impl From<DeclarationSet> for GraphDocument {
    fn from(set: DeclarationSet) -> Self {
        GraphDocument {
            declarations: set.declarations,
        }
    }
}

impl DeclarationSet {
    pub fn new(declarations: Vec<Declaration>) -> Self {
        let mut index = HashMap::new();
        for (i, decl) in declarations.iter().enumerate() {
            index.entry(decl.identity.clone()).or_insert(i);
        }
        DeclarationSet {
            declarations,
            index,
        }
    }

    pub fn push(&mut self, declaration: Declaration) {
        self.index
            .entry(declaration.identity.clone())
            .or_insert(self.declarations.len());
        self.declarations.push(declaration);
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

impl FromIterator<Declaration> for DeclarationSet {
    fn from_iter<T: IntoIterator<Item = Declaration>>(iter: T) -> Self {
        DeclarationSet::new(iter.into_iter().collect())
    }
}

impl DeclarationGraph for DeclarationSet {
    fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    fn find(&self, identity: &str) -> Option<&Declaration> {
        self.index
            .get(identity)
            .and_then(|&i| self.declarations.get(i))
    }
}
