use crate::comparator::{MemberComparator, RankedMember};
use crate::moves::stable_members;
use crate::policy::OrderPolicy;
use membersort_types::plan::{
    Diagnostic, MemberMove, PlanInput, PlanSummary, PlannedMember, ScopePlan, SortPlan, ToolInfo,
    diagnostic_codes,
};
use membersort_types::decl::{DeclKind, Declaration};
use membersort_types::scope::ScopeInput;
use sha2::{Digest, Sha256};
use std::collections::{BTreeSet, HashSet};
use tracing::debug;
use uuid::Uuid;

/// Plans the target order of scopes against one policy snapshot.
pub struct Planner {
    policy: OrderPolicy,
}

impl Planner {
    pub fn new(policy: OrderPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &OrderPolicy {
        &self.policy
    }

    pub fn comparator(&self) -> MemberComparator<'_> {
        MemberComparator::new(&self.policy)
    }

    /// Plan every scope. Scopes keep their input order; each is ordered independently.
    pub fn plan(&self, scopes: &[ScopeInput], inputs: Vec<PlanInput>, tool: ToolInfo) -> SortPlan {
        let mut plan = SortPlan::new(tool, self.policy.to_plan_policy());
        plan.inputs = inputs;

        let mut seen_scopes = HashSet::new();
        for scope in scopes {
            if !seen_scopes.insert(scope.scope.as_str()) {
                debug!(scope = %scope.scope, "scope listed more than once");
            }
            let (scope_plan, mut diagnostics) = self.plan_scope(scope);
            plan.scopes.push(scope_plan);
            plan.diagnostics.append(&mut diagnostics);
        }

        plan.summary = summarize(&plan.scopes);
        plan.plan_id = deterministic_plan_id(&self.policy, &plan.scopes).to_string();
        plan
    }

    /// Order one scope's siblings.
    pub fn plan_scope(&self, scope: &ScopeInput) -> (ScopePlan, Vec<Diagnostic>) {
        let cmp = self.comparator();
        let ranked: Vec<RankedMember> = scope
            .declarations
            .iter()
            .map(|d| cmp.rank_member(d))
            .collect();

        let diagnostics = scope_diagnostics(&scope.scope, &ranked);

        // `sort_by` is stable: members the comparator calls equal keep their source order.
        let mut permutation: Vec<usize> = (0..ranked.len()).collect();
        permutation.sort_by(|&a, &b| cmp.compare_members(&ranked[a], &ranked[b]));

        let changed = permutation.iter().enumerate().any(|(to, &from)| to != from);
        let moves = if changed {
            plan_moves(&ranked, &permutation)
        } else {
            vec![]
        };

        let members = ranked
            .into_iter()
            .enumerate()
            .map(|(index, r)| PlannedMember {
                index,
                name: r.member.name,
                signature: r.member.signature,
                rank: r.rank,
            })
            .collect();

        let scope_plan = ScopePlan {
            scope: scope.scope.clone(),
            input_sha256: scope_fingerprint(scope),
            members,
            permutation,
            moves,
            changed,
        };
        (scope_plan, diagnostics)
    }
}

fn scope_diagnostics(scope: &str, ranked: &[RankedMember]) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    let mut reported = BTreeSet::new();

    for r in ranked {
        if r.member.is_no_data() {
            out.push(Diagnostic {
                code: diagnostic_codes::UNKNOWN_DECLARATION.to_string(),
                message: "declaration kind is not recognized; it sorts with other unknown declarations"
                    .to_string(),
                scope: Some(scope.to_string()),
                signature: Some(r.member.signature.clone()),
            });
            continue;
        }

        if r.rank.is_none() && reported.insert(r.member.signature.as_str()) {
            debug!(scope, signature = %r.member.signature, "signature not found in order list");
            out.push(Diagnostic {
                code: diagnostic_codes::UNRANKED_SIGNATURE.to_string(),
                message: format!(
                    "signature {:?} is not in the order list; it sorts first",
                    r.member.signature
                ),
                scope: Some(scope.to_string()),
                signature: Some(r.member.signature.clone()),
            });
        }
    }

    out
}

fn plan_moves(ranked: &[RankedMember], permutation: &[usize]) -> Vec<MemberMove> {
    let stable: HashSet<usize> = stable_members(permutation).into_iter().collect();

    permutation
        .iter()
        .enumerate()
        .filter(|(_, from)| !stable.contains(from))
        .map(|(to, &from)| MemberMove {
            name: ranked[from].member.name.clone(),
            signature: ranked[from].member.signature.clone(),
            from,
            to,
        })
        .collect()
}

fn summarize(scopes: &[ScopePlan]) -> PlanSummary {
    let mut summary = PlanSummary {
        scopes_total: scopes.len() as u64,
        ..Default::default()
    };

    for s in scopes {
        if s.changed {
            summary.scopes_changed += 1;
        }
        summary.members_total += s.members.len() as u64;
        summary.members_moved += s.moves.len() as u64;
        summary.unranked_total += s.members.iter().filter(|m| m.rank.is_none()).count() as u64;
    }

    summary
}

/// sha256 over a length-prefixed encoding of the scope name and every declaration.
fn scope_fingerprint(scope: &ScopeInput) -> String {
    let mut hasher = Sha256::new();
    hash_field(&mut hasher, scope.scope.as_bytes());
    hasher.update((scope.declarations.len() as u64).to_le_bytes());

    for decl in &scope.declarations {
        hasher.update([kind_tag(decl.kind())]);
        let names: Vec<&str> = match decl {
            Declaration::Field { fragments, .. } => fragments.iter().map(String::as_str).collect(),
            _ => vec![decl.name()],
        };
        hasher.update((names.len() as u64).to_le_bytes());
        for name in names {
            hash_field(&mut hasher, name.as_bytes());
        }
        hasher.update((decl.modifiers().len() as u64).to_le_bytes());
        for m in decl.modifiers() {
            hash_field(&mut hasher, m.as_bytes());
        }
    }

    hex::encode(hasher.finalize())
}

fn hash_field(hasher: &mut Sha256, bytes: &[u8]) {
    hasher.update((bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}

fn kind_tag(kind: DeclKind) -> u8 {
    match kind {
        DeclKind::Field => 1,
        DeclKind::Method => 2,
        DeclKind::Constructor => 3,
        DeclKind::NestedType => 4,
        DeclKind::Enum => 5,
        DeclKind::Initializer => 6,
        DeclKind::Unknown => 0,
    }
}

fn deterministic_plan_id(policy: &OrderPolicy, scopes: &[ScopePlan]) -> Uuid {
    // Deterministic ID: v5(namespace, stable_key_bytes)
    const NAMESPACE: Uuid = Uuid::from_bytes([
        0x8f, 0x1c, 0x52, 0x9e, 0x3a, 0x07, 0x4d, 0x61, 0x9b, 0x2e, 0x5c, 0x44, 0xd0, 0x17, 0x6a,
        0xf3,
    ]);

    let mut stable_key = format!("{}|{}", policy.order().join(","), policy.order_by_name());
    for s in scopes {
        stable_key.push('|');
        stable_key.push_str(&s.input_sha256);
    }
    Uuid::new_v5(&NAMESPACE, stable_key.as_bytes())
}
