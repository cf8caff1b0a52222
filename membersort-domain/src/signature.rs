use membersort_types::decl::{DeclKind, Declaration, Member, Visibility};
use membersort_types::vocab::{MODIFIERS, NO_DATA, SEGMENT_SEPARATOR};
use std::iter;
use tracing::warn;

/// Visibility class from raw modifier keywords, by fixed priority `public`, `protected`,
/// `private`. No keyword means package visibility.
pub fn visibility_of(modifiers: &[String]) -> Visibility {
    Visibility::PRIORITY
        .into_iter()
        .find(|v| modifiers.iter().any(|m| m == v.as_str()))
        .unwrap_or(Visibility::Package)
}

/// The canonical modifiers present in `modifiers`, in canonical order.
///
/// Anything outside [`MODIFIERS`] is ignored, so source order never leaks into a signature.
pub fn canonical_modifiers(modifiers: &[String]) -> Vec<&'static str> {
    MODIFIERS
        .into_iter()
        .filter(|canonical| modifiers.iter().any(|m| m == canonical))
        .collect()
}

pub fn join_segments<'a>(segments: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::new();
    for segment in segments {
        if !out.is_empty() {
            out.push(SEGMENT_SEPARATOR);
        }
        out.push_str(segment);
    }
    out
}

/// Compute the ranking signature and display name of one declaration.
///
/// Unrecognized declarations collapse to the `-nodata` sentinel so they still sort together,
/// deterministically.
pub fn build_signature(decl: &Declaration) -> Member {
    let Some(kind) = decl.kind().segment() else {
        warn!("unrecognized declaration kind, ranking it as {}", NO_DATA);
        return Member::no_data();
    };

    let modifiers = decl.modifiers();
    let visibility = visibility_of(modifiers);

    // Initializers cannot declare a visibility; drop the placeholder, keep a real keyword.
    let leading = match (decl.kind(), visibility) {
        (DeclKind::Initializer, Visibility::Package) => None,
        _ => Some(visibility.as_str()),
    };

    let signature = join_segments(
        leading
            .into_iter()
            .chain(canonical_modifiers(modifiers))
            .chain(iter::once(kind)),
    );

    Member::new(decl.name(), signature)
}
