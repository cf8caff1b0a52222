use crate::error::{EditorError, EditorResult};
use membersort_domain::join_segments;
use membersort_types::decl::Visibility;
use membersort_types::vocab::{LIST_SEPARATOR, SEGMENT_SEPARATOR, modifier_position};

/// One order-list entry taken apart into the fields of the structured entry editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft {
    /// `None` for entries without a visibility segment (`static init`, `-nodata`).
    pub visibility: Option<Visibility>,
    /// Modifier tokens. Unknown tokens are kept so that editing never loses text.
    pub modifiers: Vec<String>,
    pub kind: String,
}

impl Default for EntryDraft {
    fn default() -> Self {
        Self {
            visibility: Some(Visibility::Public),
            modifiers: vec![],
            kind: "constructor".to_string(),
        }
    }
}

impl EntryDraft {
    pub fn new(visibility: Option<Visibility>, modifiers: &[&str], kind: &str) -> Self {
        Self {
            visibility,
            modifiers: modifiers.iter().map(|m| m.to_string()).collect(),
            kind: kind.to_string(),
        }
    }

    /// Split an entry into its fields.
    ///
    /// The last token is the kind; the first is the visibility only when it is a visibility
    /// keyword; everything in between is a modifier. An empty entry parses to the default draft.
    pub fn parse(entry: &str) -> Self {
        let tokens: Vec<&str> = entry
            .split(SEGMENT_SEPARATOR)
            .filter(|t| !t.is_empty())
            .collect();

        let Some((kind, rest)) = tokens.split_last() else {
            return Self::default();
        };

        let (visibility, modifiers) = match rest.split_first() {
            Some((first, tail)) => match Visibility::from_segment(first) {
                Some(v) => (Some(v), tail),
                None => (None, rest),
            },
            None => (None, rest),
        };

        Self {
            visibility,
            modifiers: modifiers.iter().map(|m| m.to_string()).collect(),
            kind: kind.to_string(),
        }
    }

    /// Join the fields back into an entry.
    ///
    /// Known modifiers are emitted in canonical order, unknown ones after them in the order
    /// given. Duplicates collapse.
    pub fn compose(&self) -> EditorResult<String> {
        if self.kind.is_empty() {
            return Err(EditorError::MissingKind);
        }
        check_token(&self.kind)?;
        for m in &self.modifiers {
            check_token(m)?;
        }

        let mut known: Vec<&str> = Vec::new();
        let mut unknown: Vec<&str> = Vec::new();
        for m in &self.modifiers {
            let bucket = if modifier_position(m).is_some() {
                &mut known
            } else {
                &mut unknown
            };
            if !bucket.contains(&m.as_str()) {
                bucket.push(m);
            }
        }
        known.sort_by_key(|m| modifier_position(m));

        Ok(join_segments(
            self.visibility
                .map(Visibility::as_str)
                .into_iter()
                .chain(known)
                .chain(unknown)
                .chain(std::iter::once(self.kind.as_str())),
        ))
    }

    pub fn has_modifier(&self, modifier: &str) -> bool {
        self.modifiers.iter().any(|m| m == modifier)
    }

    /// Check or uncheck a modifier box.
    pub fn set_modifier(&mut self, modifier: &str, enabled: bool) {
        if enabled {
            if !self.has_modifier(modifier) {
                self.modifiers.push(modifier.to_string());
            }
        } else {
            self.modifiers.retain(|m| m != modifier);
        }
    }
}

fn check_token(token: &str) -> EditorResult<()> {
    if token.is_empty() || token.contains(SEGMENT_SEPARATOR) || token.contains(LIST_SEPARATOR) {
        return Err(EditorError::InvalidToken {
            token: token.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_draft_is_public_constructor() {
        assert_eq!(
            EntryDraft::default().compose().expect("compose"),
            "public constructor"
        );
    }

    #[test]
    fn parse_splits_visibility_modifiers_and_kind() {
        let draft = EntryDraft::parse("private static final variable");
        assert_eq!(draft.visibility, Some(Visibility::Private));
        assert_eq!(draft.modifiers, vec!["static", "final"]);
        assert_eq!(draft.kind, "variable");
    }

    #[test]
    fn parse_without_visibility() {
        let draft = EntryDraft::parse("static init");
        assert_eq!(draft.visibility, None);
        assert_eq!(draft.modifiers, vec!["static"]);
        assert_eq!(draft.kind, "init");

        let single = EntryDraft::parse("-nodata");
        assert_eq!(single, EntryDraft::new(None, &[], "-nodata"));
    }

    #[test]
    fn parse_keeps_unknown_tokens_as_modifiers() {
        let draft = EntryDraft::parse("public native method");
        assert_eq!(draft.modifiers, vec!["native"]);
        assert_eq!(draft.compose().expect("compose"), "public native method");
    }

    #[test]
    fn compose_orders_known_modifiers_canonically() {
        let draft = EntryDraft::new(
            Some(Visibility::Protected),
            &["volatile", "native", "static", "static"],
            "variable",
        );
        assert_eq!(
            draft.compose().expect("compose"),
            "protected static volatile native variable"
        );
    }

    #[test]
    fn compose_rejects_separators_and_empty_tokens() {
        let bad_kind = EntryDraft::new(Some(Visibility::Public), &[], "a,b");
        assert_eq!(
            bad_kind.compose(),
            Err(EditorError::InvalidToken {
                token: "a,b".to_string()
            })
        );

        let bad_mod = EntryDraft::new(None, &["static final"], "method");
        assert!(matches!(bad_mod.compose(), Err(EditorError::InvalidToken { .. })));

        let empty_mod = EntryDraft::new(None, &[""], "method");
        assert!(matches!(empty_mod.compose(), Err(EditorError::InvalidToken { .. })));

        let no_kind = EntryDraft::new(None, &[], "");
        assert_eq!(no_kind.compose(), Err(EditorError::MissingKind));
    }

    #[test]
    fn set_modifier_toggles() {
        let mut draft = EntryDraft::default();
        draft.set_modifier("static", true);
        draft.set_modifier("static", true);
        assert_eq!(draft.modifiers, vec!["static"]);
        draft.set_modifier("static", false);
        assert!(draft.modifiers.is_empty());
    }
}
