use crate::decl::Declaration;
use serde::{Deserialize, Serialize};

/// The sibling declarations of one nesting level, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeInput {
    /// Stable scope path, e.g. `com.acme.Widget` or `com.acme.Widget.Builder`.
    pub scope: String,

    #[serde(default)]
    pub declarations: Vec<Declaration>,
}

impl ScopeInput {
    pub fn new(scope: impl Into<String>, declarations: Vec<Declaration>) -> Self {
        Self {
            scope: scope.into(),
            declarations,
        }
    }
}

/// A declaration source document: every scope extracted from one or more source files.
///
/// Tolerant on read: `schema` and `source` may be absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopesDocument {
    #[serde(default = "default_scopes_schema")]
    pub schema: String,

    /// Source file the scopes were extracted from (informational).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(default)]
    pub scopes: Vec<ScopeInput>,
}

impl ScopesDocument {
    pub fn new(scopes: Vec<ScopeInput>) -> Self {
        Self {
            schema: default_scopes_schema(),
            source: None,
            scopes,
        }
    }
}

fn default_scopes_schema() -> String {
    crate::schema::MEMBERSORT_SCOPES_V1.to_string()
}
