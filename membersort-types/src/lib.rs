//! Shared DTOs (schemas-as-code) for the membersort workspace.
//!
//! # Design constraints
//! - Scope documents come from an external declaration source; plans go to an external
//!   text-rewriting step. Both are serialized to disk.
//! - Be conservative with breaking changes.
//! - Prefer adding optional fields over changing semantics.

pub mod decl;
pub mod plan;
pub mod scope;

/// Schema identifiers.
pub mod schema {
    pub const MEMBERSORT_SCOPES_V1: &str = "membersort.scopes.v1";
    pub const MEMBERSORT_PLAN_V1: &str = "membersort.plan.v1";
}

/// Separators and keyword vocabularies shared by the signature builder and the order list editor.
///
/// Neither separator may appear inside a signature segment.
pub mod vocab {
    /// Joins the segments of one signature (`public static method`).
    pub const SEGMENT_SEPARATOR: char = ' ';

    /// Joins whole signatures in the persisted order list.
    pub const LIST_SEPARATOR: char = ',';

    /// Canonical modifier order. Only these modifiers take part in a signature.
    pub const MODIFIERS: [&str; 6] = [
        "static",
        "final",
        "abstract",
        "synchronized",
        "transient",
        "volatile",
    ];

    /// Kind segments in the order the entry editor offers them.
    pub const KINDS: [&str; 6] = ["constructor", "method", "variable", "class", "enum", "init"];

    /// Visibility segments in the order the entry editor offers them.
    pub const VISIBILITIES: [&str; 4] = ["public", "private", "protected", "package"];

    /// Sentinel name and signature for declarations of an unrecognized kind.
    pub const NO_DATA: &str = "-nodata";

    /// Index of a modifier in [`MODIFIERS`], if it is one of the canonical modifiers.
    pub fn modifier_position(modifier: &str) -> Option<usize> {
        MODIFIERS.iter().position(|m| *m == modifier)
    }
}
