use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable diagnostic codes carried by [`Diagnostic::code`].
pub mod diagnostic_codes {
    pub const UNRANKED_SIGNATURE: &str = "unranked_signature";
    pub const UNKNOWN_DECLARATION: &str = "unknown_declaration";
    pub const MALFORMED_ORDER: &str = "malformed_order";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
}

/// Where the order list used for a pass came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderSource {
    /// The persisted preference.
    Stored,
    /// No preference was stored; the built-in order applies.
    #[default]
    Default,
    /// The stored preference was malformed and the built-in order replaced it.
    Fallback,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanPolicy {
    pub order_by_name: bool,

    #[serde(default)]
    pub order: Vec<String>,

    #[serde(default)]
    pub order_source: OrderSource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanInput {
    pub path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
}

/// A sort plan: the target order of every scope of a pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortPlan {
    pub schema: String,

    /// Deterministic id derived from the policy and the scope fingerprints.
    #[serde(default)]
    pub plan_id: String,

    pub tool: ToolInfo,

    #[serde(default)]
    pub run: RunInfo,

    pub policy: PlanPolicy,

    #[serde(default)]
    pub inputs: Vec<PlanInput>,

    #[serde(default)]
    pub scopes: Vec<ScopePlan>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,

    #[serde(default)]
    pub summary: PlanSummary,
}

impl SortPlan {
    pub fn new(tool: ToolInfo, policy: PlanPolicy) -> Self {
        Self {
            schema: crate::schema::MEMBERSORT_PLAN_V1.to_string(),
            plan_id: String::new(),
            tool,
            run: RunInfo::default(),
            policy,
            inputs: vec![],
            scopes: vec![],
            diagnostics: vec![],
            summary: PlanSummary::default(),
        }
    }

    /// True when at least one scope is out of order.
    pub fn needs_reorder(&self) -> bool {
        self.scopes.iter().any(|s| s.changed)
    }
}

/// Target order of one scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopePlan {
    pub scope: String,

    /// sha256 of the canonical JSON of the scope's declarations, so the rewriting step can
    /// check it is editing the scope this plan was computed for.
    pub input_sha256: String,

    /// Members in source order.
    #[serde(default)]
    pub members: Vec<PlannedMember>,

    /// `permutation[target] = source index`.
    #[serde(default)]
    pub permutation: Vec<usize>,

    /// The smallest set of members that must move to reach the target order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub moves: Vec<MemberMove>,

    pub changed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedMember {
    /// Position in source order.
    pub index: usize,
    pub name: String,
    pub signature: String,

    /// Position of `signature` in the order list; absent when the signature is unranked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberMove {
    pub name: String,
    pub signature: String,
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: String,
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub scopes_total: u64,
    pub scopes_changed: u64,
    pub members_total: u64,
    pub members_moved: u64,
    pub unranked_total: u64,
}
