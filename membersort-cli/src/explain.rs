//! Signature explanation for the `membersort explain` command.
//!
//! Shows how one declaration is classified: the signature it gets, its display name, and where
//! that signature ranks under the active order policy.

use membersort_domain::{OrderPolicy, build_signature};
use membersort_types::decl::Declaration;
use membersort_types::plan::OrderSource;

/// Declaration kinds accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum KindArg {
    Field,
    Method,
    Constructor,
    NestedType,
    Enum,
    Initializer,
}

/// Build the declaration described by command-line arguments.
pub fn declaration(kind: KindArg, name: &str, modifiers: &[String]) -> Declaration {
    let modifiers = modifiers.to_vec();
    let name = name.to_string();
    match kind {
        KindArg::Field => Declaration::Field {
            fragments: if name.is_empty() { vec![] } else { vec![name] },
            modifiers,
        },
        KindArg::Method => Declaration::Method { name, modifiers },
        KindArg::Constructor => Declaration::Constructor { name, modifiers },
        KindArg::NestedType => Declaration::NestedType { name, modifiers },
        KindArg::Enum => Declaration::Enum { name, modifiers },
        KindArg::Initializer => Declaration::Initializer { modifiers },
    }
}

/// How one declaration ranks under a policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Explanation {
    pub name: String,
    pub signature: String,
    pub rank: Option<usize>,
    pub order_len: usize,
    pub order_source: OrderSource,
    pub order_by_name: bool,
}

pub fn explain(decl: &Declaration, policy: &OrderPolicy) -> Explanation {
    let member = build_signature(decl);
    Explanation {
        rank: policy.rank(&member.signature),
        name: member.name,
        signature: member.signature,
        order_len: policy.order().len(),
        order_source: policy.source(),
        order_by_name: policy.order_by_name(),
    }
}

pub fn render(explanation: &Explanation) -> String {
    let source = match explanation.order_source {
        OrderSource::Stored => "stored order",
        OrderSource::Default => "built-in order",
        OrderSource::Fallback => "built-in order, stored order is malformed",
    };
    let rank = match explanation.rank {
        Some(r) => format!("{} of {} ({})", r, explanation.order_len, source),
        None => format!("unranked, sorts before every ranked member ({})", source),
    };
    let name = if explanation.name.is_empty() {
        "(anonymous)"
    } else {
        explanation.name.as_str()
    };
    let tie_break = if explanation.order_by_name {
        "by name"
    } else {
        "source order"
    };

    let mut out = String::new();
    out.push_str(&format!("Signature: {}\n", explanation.signature));
    out.push_str(&format!("Name:      {}\n", name));
    out.push_str(&format!("Rank:      {}\n", rank));
    out.push_str(&format!("Ties:      {}\n", tie_break));
    out
}
