#![no_main]

//! Fuzz target for the structured entry editor.
//!
//! Parsing is total; composing either fails cleanly or yields an entry that parses back to
//! an equivalent draft.

use libfuzzer_sys::fuzz_target;
use membersort_edit::EntryDraft;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    let draft = EntryDraft::parse(s);
    if let Ok(entry) = draft.compose() {
        assert!(!entry.contains(','));
        let again = EntryDraft::parse(&entry);
        assert_eq!(again.compose().as_deref(), Ok(entry.as_str()));
    }
});
