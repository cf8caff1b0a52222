#![no_main]

//! Fuzz target for the persisted order list codec.
//!
//! Anything `parse_order_list` accepts must join back to the same string.

use libfuzzer_sys::fuzz_target;
use membersort_domain::{OrderPolicy, join_order_list, parse_order_list};

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(entries) = parse_order_list(s) {
        let joined = join_order_list(&entries).expect("parsed lists always join");
        assert_eq!(joined, s);
    }

    // Loading never fails, whatever is stored.
    let loaded = OrderPolicy::load(Some(s), None);
    assert!(!loaded.policy.order().is_empty());
});
