#![no_main]

//! Fuzz target for order list edit sessions.
//!
//! Drives arbitrary operation sequences and checks the selection never leaves the list.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use membersort_edit::{EntryDraft, OrderListEditor};

#[derive(Debug, Arbitrary)]
enum Op {
    Select(Option<u8>),
    Add,
    Remove(u8),
    Up(u8),
    Down(u8),
    RemoveSelected,
    UpSelected,
    DownSelected,
    Reset,
}

#[derive(Debug, Arbitrary)]
struct Input {
    entries: Vec<String>,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let mut ed = OrderListEditor::from_entries(input.entries);
    for op in input.ops {
        match op {
            Op::Select(i) => {
                ed.select(i.map(usize::from));
            }
            Op::Add => {
                let _ = ed.add(&EntryDraft::default());
            }
            Op::Remove(i) => {
                ed.remove(usize::from(i));
            }
            Op::Up(i) => {
                ed.move_up(usize::from(i));
            }
            Op::Down(i) => {
                ed.move_down(usize::from(i));
            }
            Op::RemoveSelected => {
                ed.remove_selected();
            }
            Op::UpSelected => {
                ed.move_selected_up();
            }
            Op::DownSelected => {
                ed.move_selected_down();
            }
            Op::Reset => ed.reset_to_default(),
        }
        if let Some(sel) = ed.selection() {
            assert!(sel < ed.len());
        }
    }
    let _ = ed.commit();
});
