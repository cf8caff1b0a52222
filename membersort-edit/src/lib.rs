//! Order list editing for membersort.
//!
//! Responsibilities:
//! - Take order-list entries apart into `{visibility, modifiers, kind}` and put them back
//!   together ([`EntryDraft`]).
//! - Hold the list of one edit session with its selection and apply list edits
//!   ([`OrderListEditor`]).
//! - Load from and commit to the persisted comma-joined form.
//!
//! Rendering the editor is left to the caller through [`EntryPrompt`].

mod editor;
mod entry;
pub mod error;

pub use editor::{EntryPrompt, OrderListEditor};
pub use entry::EntryDraft;
pub use error::{EditorError, EditorResult};
