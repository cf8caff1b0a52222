//! Domain logic: turn the declarations of a scope into a deterministic target order.
//!
//! This crate owns *what* order members should be in and why. It does not own how the source
//! text is rewritten; that is the job of whichever tool consumes the plan.

mod comparator;
mod moves;
mod order_list;
mod planner;
mod policy;
mod signature;

pub use comparator::{MemberComparator, RankedMember};
pub use moves::stable_members;
pub use order_list::{
    DEFAULT_ORDER, DEFAULT_ORDER_BY_NAME, OrderListError, default_order, join_order_list,
    parse_order_list,
};
pub use planner::Planner;
pub use policy::{LoadedPolicy, OrderPolicy, rank};
pub use signature::{build_signature, canonical_modifiers, join_segments, visibility_of};
