//! Rendering helpers (markdown, plain text, unified diff) for human-readable artifacts.

use diffy::PatchFormatter;
use membersort_types::plan::{OrderSource, ScopePlan, SortPlan};

pub fn render_plan_md(plan: &SortPlan) -> String {
    let mut out = String::new();
    out.push_str("# membersort plan\n\n");
    out.push_str(&format!(
        "- Scopes: {} (changed {})\n",
        plan.summary.scopes_total, plan.summary.scopes_changed
    ));
    out.push_str(&format!(
        "- Members: {} (moved {}, unranked {})\n",
        plan.summary.members_total, plan.summary.members_moved, plan.summary.unranked_total
    ));
    out.push_str(&format!(
        "- Order: {} entries ({}), order by name `{}`\n",
        plan.policy.order.len(),
        source_label(plan.policy.order_source),
        plan.policy.order_by_name
    ));
    out.push_str(&format!("- Inputs: {}\n\n", plan.inputs.len()));

    out.push_str("## Scopes\n\n");
    if plan.scopes.is_empty() {
        out.push_str("_No scopes planned._\n");
    }

    for (i, scope) in plan.scopes.iter().enumerate() {
        out.push_str(&format!("### {}. {}\n\n", i + 1, scope.scope));
        if !scope.changed {
            out.push_str("_Already in order._\n\n");
            continue;
        }

        out.push_str("| # | name | signature | rank |\n|---|---|---|---|\n");
        for (to, &from) in scope.permutation.iter().enumerate() {
            let m = &scope.members[from];
            let rank = m
                .rank
                .map(|r| r.to_string())
                .unwrap_or_else(|| "-".to_string());
            out.push_str(&format!(
                "| {} | `{}` | `{}` | {} |\n",
                to,
                display_name(&m.name),
                m.signature,
                rank
            ));
        }

        if !scope.moves.is_empty() {
            out.push_str("\n**Moves**\n\n");
            for mv in &scope.moves {
                out.push_str(&format!(
                    "- `{}` ({}) {} → {}\n",
                    display_name(&mv.name),
                    mv.signature,
                    mv.from,
                    mv.to
                ));
            }
        }
        out.push('\n');
    }

    if !plan.diagnostics.is_empty() {
        out.push_str("## Diagnostics\n\n");
        for d in &plan.diagnostics {
            let scope = d.scope.as_deref().unwrap_or("-");
            out.push_str(&format!("- `{}` in `{}`: {}\n", d.code, scope, d.message));
        }
    }

    out
}

/// One line per scope, then one line per move. Used for terminal output.
pub fn render_plan_text(plan: &SortPlan) -> String {
    let mut out = String::new();
    for scope in &plan.scopes {
        if scope.changed {
            out.push_str(&format!(
                "{}: {} of {} members move\n",
                scope.scope,
                scope.moves.len(),
                scope.members.len()
            ));
            for mv in &scope.moves {
                out.push_str(&format!(
                    "  {} [{}] {} -> {}\n",
                    display_name(&mv.name),
                    mv.signature,
                    mv.from,
                    mv.to
                ));
            }
        } else {
            out.push_str(&format!("{}: in order\n", scope.scope));
        }
    }
    for d in &plan.diagnostics {
        out.push_str(&format!("{}: {}\n", d.code, d.message));
    }
    out.push_str(&format!(
        "{} of {} scopes need reordering\n",
        plan.summary.scopes_changed, plan.summary.scopes_total
    ));
    out
}

/// Numbered order list, as shown by the list editor.
pub fn render_order_list(entries: &[String], selection: Option<usize>, order_by_name: bool) -> String {
    let mut out = String::new();
    for (i, entry) in entries.iter().enumerate() {
        let marker = if selection == Some(i) { '>' } else { ' ' };
        out.push_str(&format!("{marker}{i:>3}  {entry}\n"));
    }
    out.push_str(&format!("order by name: {order_by_name}\n"));
    out
}

/// Unified diff of every changed scope's member listing, before and after reordering.
pub fn render_preview(plan: &SortPlan) -> String {
    let mut out = String::new();
    let mut formatter = PatchFormatter::new();

    for scope in plan.scopes.iter().filter(|s| s.changed) {
        let (old, new) = listings(scope);

        out.push_str(&format!("--- a/{0}\n+++ b/{0}\n", scope.scope));
        let patch = diffy::create_patch(&old, &new);
        let formatted = formatter.fmt_patch(&patch).to_string();
        // Drop diffy's own `---`/`+++` header; the scope header above replaces it.
        for line in formatted.lines().skip_while(|l| !l.starts_with("@@")) {
            out.push_str(line);
            out.push('\n');
        }
    }

    out
}

fn listings(scope: &ScopePlan) -> (String, String) {
    let line = |i: usize| {
        let m = &scope.members[i];
        format!("{} {}\n", m.signature, display_name(&m.name))
    };
    let old = (0..scope.members.len()).map(line).collect();
    let new = scope.permutation.iter().map(|&i| line(i)).collect();
    (old, new)
}

fn display_name(name: &str) -> &str {
    if name.is_empty() { "(anonymous)" } else { name }
}

fn source_label(s: OrderSource) -> &'static str {
    match s {
        OrderSource::Stored => "stored",
        OrderSource::Default => "built-in",
        OrderSource::Fallback => "built-in, stored order malformed",
    }
}
