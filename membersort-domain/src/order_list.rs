//! Flat persisted form of an order list: signatures joined by [`LIST_SEPARATOR`], no escaping.

use membersort_types::vocab::LIST_SEPARATOR;
use thiserror::Error;

/// Built-in order used when no preference is stored or the stored one is malformed.
pub const DEFAULT_ORDER: [&str; 39] = [
    // public
    "public static final variable",
    "public static variable",
    "public static method",
    "public constructor",
    "public method",
    // package
    "package static method",
    "package constructor",
    "package method",
    "package static final variable",
    "package static variable",
    "package variable",
    "package final variable",
    // protected
    "protected static method",
    "protected constructor",
    "protected method",
    "protected static final variable",
    "protected static variable",
    "protected variable",
    "protected final variable",
    // private
    "private static method",
    "private constructor",
    "private method",
    "public variable",
    "public final variable",
    "private static final variable",
    "private static variable",
    "private variable",
    "private final variable",
    "static init",
    // nested types
    "public static class",
    "public class",
    "protected static class",
    "protected class",
    "private static class",
    "private class",
    // enums
    "public enum",
    "package enum",
    "protected enum",
    "private enum",
];

pub const DEFAULT_ORDER_BY_NAME: bool = true;

pub fn default_order() -> Vec<String> {
    DEFAULT_ORDER.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderListError {
    #[error("order list is empty")]
    Empty,

    #[error("order list entry {index} is empty")]
    EmptyEntry { index: usize },

    #[error("order list entry {index} contains the list separator: {entry:?}")]
    ContainsSeparator { index: usize, entry: String },
}

/// Split a persisted order list. An empty string or an empty entry is malformed.
pub fn parse_order_list(persisted: &str) -> Result<Vec<String>, OrderListError> {
    if persisted.is_empty() {
        return Err(OrderListError::Empty);
    }

    persisted
        .split(LIST_SEPARATOR)
        .enumerate()
        .map(|(index, entry)| {
            if entry.is_empty() {
                Err(OrderListError::EmptyEntry { index })
            } else {
                Ok(entry.to_string())
            }
        })
        .collect()
}

/// Join an order list for persistence. Rejects anything [`parse_order_list`] could not read back.
pub fn join_order_list(entries: &[String]) -> Result<String, OrderListError> {
    if entries.is_empty() {
        return Err(OrderListError::Empty);
    }

    for (index, entry) in entries.iter().enumerate() {
        if entry.is_empty() {
            return Err(OrderListError::EmptyEntry { index });
        }
        if entry.contains(LIST_SEPARATOR) {
            return Err(OrderListError::ContainsSeparator {
                index,
                entry: entry.clone(),
            });
        }
    }

    Ok(entries.join(&LIST_SEPARATOR.to_string()))
}
