use serde::{Deserialize, Serialize};

/// Visibility class of a declaration.
///
/// `Package` means none of the three explicit keywords is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    Protected,
    Private,
    Package,
}

impl Visibility {
    /// Keyword lookup priority when a declaration (erroneously) carries more than one.
    pub const PRIORITY: [Visibility; 3] = [Visibility::Public, Visibility::Protected, Visibility::Private];

    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
            Visibility::Package => "package",
        }
    }

    /// Parse a signature segment. Accepts the `package` placeholder.
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "public" => Some(Visibility::Public),
            "protected" => Some(Visibility::Protected),
            "private" => Some(Visibility::Private),
            "package" => Some(Visibility::Package),
            _ => None,
        }
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Syntactic kind of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclKind {
    Field,
    Method,
    Constructor,
    NestedType,
    Enum,
    Initializer,
    Unknown,
}

impl DeclKind {
    /// The kind segment used in signatures, `None` for unrecognized declarations.
    pub fn segment(self) -> Option<&'static str> {
        match self {
            DeclKind::Field => Some("variable"),
            DeclKind::Method => Some("method"),
            DeclKind::Constructor => Some("constructor"),
            DeclKind::NestedType => Some("class"),
            DeclKind::Enum => Some("enum"),
            DeclKind::Initializer => Some("init"),
            DeclKind::Unknown => None,
        }
    }
}

/// One body declaration of a scope, as supplied by the declaration source.
///
/// `modifiers` holds the raw keywords in source order (visibility keywords included).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Declaration {
    Field {
        /// Declared variable names; `int a, b;` has two fragments.
        #[serde(default)]
        fragments: Vec<String>,
        #[serde(default)]
        modifiers: Vec<String>,
    },
    Method {
        name: String,
        #[serde(default)]
        modifiers: Vec<String>,
    },
    Constructor {
        name: String,
        #[serde(default)]
        modifiers: Vec<String>,
    },
    NestedType {
        name: String,
        #[serde(default)]
        modifiers: Vec<String>,
    },
    Enum {
        name: String,
        #[serde(default)]
        modifiers: Vec<String>,
    },
    Initializer {
        #[serde(default)]
        modifiers: Vec<String>,
    },
    /// Any declaration kind the source reports but membersort does not model.
    #[serde(other)]
    Unknown,
}

impl Declaration {
    pub fn field(name: &str, modifiers: &[&str]) -> Self {
        Declaration::Field {
            fragments: vec![name.to_string()],
            modifiers: owned(modifiers),
        }
    }

    pub fn method(name: &str, modifiers: &[&str]) -> Self {
        Declaration::Method {
            name: name.to_string(),
            modifiers: owned(modifiers),
        }
    }

    pub fn constructor(name: &str, modifiers: &[&str]) -> Self {
        Declaration::Constructor {
            name: name.to_string(),
            modifiers: owned(modifiers),
        }
    }

    pub fn nested_type(name: &str, modifiers: &[&str]) -> Self {
        Declaration::NestedType {
            name: name.to_string(),
            modifiers: owned(modifiers),
        }
    }

    pub fn enumeration(name: &str, modifiers: &[&str]) -> Self {
        Declaration::Enum {
            name: name.to_string(),
            modifiers: owned(modifiers),
        }
    }

    pub fn initializer(modifiers: &[&str]) -> Self {
        Declaration::Initializer {
            modifiers: owned(modifiers),
        }
    }

    pub fn kind(&self) -> DeclKind {
        match self {
            Declaration::Field { .. } => DeclKind::Field,
            Declaration::Method { .. } => DeclKind::Method,
            Declaration::Constructor { .. } => DeclKind::Constructor,
            Declaration::NestedType { .. } => DeclKind::NestedType,
            Declaration::Enum { .. } => DeclKind::Enum,
            Declaration::Initializer { .. } => DeclKind::Initializer,
            Declaration::Unknown => DeclKind::Unknown,
        }
    }

    pub fn modifiers(&self) -> &[String] {
        match self {
            Declaration::Field { modifiers, .. }
            | Declaration::Method { modifiers, .. }
            | Declaration::Constructor { modifiers, .. }
            | Declaration::NestedType { modifiers, .. }
            | Declaration::Enum { modifiers, .. }
            | Declaration::Initializer { modifiers } => modifiers,
            Declaration::Unknown => &[],
        }
    }

    pub fn has_modifier(&self, modifier: &str) -> bool {
        self.modifiers().iter().any(|m| m == modifier)
    }

    /// Display name: the first fragment of a field, the identifier of a named declaration,
    /// empty for initializers and unknown declarations.
    pub fn name(&self) -> &str {
        match self {
            Declaration::Field { fragments, .. } => {
                fragments.first().map(String::as_str).unwrap_or_default()
            }
            Declaration::Method { name, .. }
            | Declaration::Constructor { name, .. }
            | Declaration::NestedType { name, .. }
            | Declaration::Enum { name, .. } => name,
            Declaration::Initializer { .. } | Declaration::Unknown => "",
        }
    }
}

fn owned(modifiers: &[&str]) -> Vec<String> {
    modifiers.iter().map(|m| m.to_string()).collect()
}

/// A declaration reduced to its ranking key and its display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    pub signature: String,
}

impl Member {
    pub fn new(name: impl Into<String>, signature: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            signature: signature.into(),
        }
    }

    /// The `("-nodata", "-nodata")` pair used for unrecognized declarations.
    pub fn no_data() -> Self {
        Self::new(crate::vocab::NO_DATA, crate::vocab::NO_DATA)
    }

    pub fn is_no_data(&self) -> bool {
        self.signature == crate::vocab::NO_DATA
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_name_is_first_fragment() {
        let decl = Declaration::Field {
            fragments: vec!["a".to_string(), "b".to_string()],
            modifiers: vec![],
        };
        assert_eq!(decl.name(), "a");

        let empty = Declaration::Field {
            fragments: vec![],
            modifiers: vec![],
        };
        assert_eq!(empty.name(), "");
    }

    #[test]
    fn initializer_and_unknown_have_no_name() {
        assert_eq!(Declaration::initializer(&["static"]).name(), "");
        assert_eq!(Declaration::Unknown.name(), "");
        assert!(Declaration::Unknown.modifiers().is_empty());
    }

    #[test]
    fn kind_segments_cover_every_known_kind() {
        assert_eq!(DeclKind::Field.segment(), Some("variable"));
        assert_eq!(DeclKind::NestedType.segment(), Some("class"));
        assert_eq!(DeclKind::Initializer.segment(), Some("init"));
        assert_eq!(DeclKind::Unknown.segment(), None);
    }

    #[test]
    fn visibility_segment_round_trips() {
        for v in [
            Visibility::Public,
            Visibility::Protected,
            Visibility::Private,
            Visibility::Package,
        ] {
            assert_eq!(Visibility::from_segment(v.as_str()), Some(v));
        }
        assert_eq!(Visibility::from_segment("static"), None);
    }
}
