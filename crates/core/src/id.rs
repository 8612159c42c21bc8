/// Identifier helpers.
///
/// Pages carry caller-supplied ids. Feed items always get a server id,
/// users get one unless the caller supplied a usable id at signup.
use uuid::Uuid;

/// Generate a fresh server-side identifier.
///
/// UUIDv7 keeps ids roughly time ordered, which gives stable tie-breaks
/// when two rows share a creation timestamp.
pub fn generate() -> String {
    Uuid::now_v7().to_string()
}

/// Keep a caller-supplied id only if it has visible content.
pub fn non_blank(id: Option<String>) -> Option<String> {
    id.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
