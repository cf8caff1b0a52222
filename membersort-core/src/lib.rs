//! Embeddable core library for membersort.
//!
//! Provides a clap-free, I/O-abstracted entry point for sorting passes and order-list edit
//! sessions.
//!
//! # Port traits
//!
//! All I/O is abstracted behind port traits in [`ports`]:
//! - [`DeclarationSource`](ports::DeclarationSource): load scope documents
//! - [`PreferenceStore`](ports::PreferenceStore): read and persist the order preference
//! - [`WritePort`](ports::WritePort): write files and create directories
//!
//! The [`adapters`] module provides filesystem-backed and in-memory implementations.
//!
//! # Entry points
//!
//! - [`run_sort`](pipeline::run_sort): plan every scope against the stored policy
//! - [`open_order_session`](pipeline::open_order_session) /
//!   [`commit_order_session`](pipeline::commit_order_session): edit the stored order

pub mod adapters;
pub mod pipeline;
pub mod ports;
pub mod settings;

// Re-exported so embedders don't need the domain and edit crates directly.
pub use membersort_domain::{LoadedPolicy, OrderPolicy};
pub use membersort_edit::{EntryDraft, EntryPrompt, OrderListEditor};
