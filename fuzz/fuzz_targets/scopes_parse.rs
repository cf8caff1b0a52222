#![no_main]

//! Fuzz target for scope document parsing and planning.
//!
//! Whatever deserializes must plan without panicking, and the permutation must cover every
//! declaration exactly once.

use libfuzzer_sys::fuzz_target;
use membersort_domain::{OrderPolicy, Planner};
use membersort_types::plan::ToolInfo;
use membersort_types::scope::ScopesDocument;

fuzz_target!(|data: &[u8]| {
    let Ok(doc) = serde_json::from_slice::<ScopesDocument>(data) else {
        return;
    };

    let planner = Planner::new(OrderPolicy::builtin());
    let tool = ToolInfo {
        name: "membersort-fuzz".to_string(),
        version: None,
    };
    let plan = planner.plan(&doc.scopes, vec![], tool);

    for (scope, input) in plan.scopes.iter().zip(&doc.scopes) {
        let mut seen = scope.permutation.clone();
        seen.sort_unstable();
        assert!(seen.iter().copied().eq(0..input.declarations.len()));
    }

    let _ = serde_json::to_string(&plan);
});
