//! Markdown fence normalization for text produced by a language model.

/// A recognized markdown fence wrapping a TOON or JSON blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fence {
    /// ` ```toon `
    Toon,
    /// ` ```json `
    Json,
    /// ` ``` ` with no language hint.
    Bare,
}

impl Fence {
    /// The opening marker for this fence.
    pub fn opener(self) -> &'static str {
        match self {
            Fence::Toon => "```toon",
            Fence::Json => "```json",
            Fence::Bare => "```",
        }
    }
}

/// Closing marker shared by every fence.
const CLOSER: &str = "```";

/// Candidate openers, tagged fences before the bare one so that a language
/// hint is never left behind as a stray first line.
const CANDIDATES: [Fence; 3] = [Fence::Toon, Fence::Json, Fence::Bare];

/// Trim `text` and strip a wrapping fence if one is present at BOTH ends.
///
/// Returns the inner text (trimmed) and the fence that was removed. A fence
/// that only opens, or only closes, leaves the text untouched. When opener
/// and closer overlap (e.g. the text is just ` ``` `) the inner text is empty.
///
/// ```
/// use persona_toon::{strip_fence, Fence};
///
/// assert_eq!(strip_fence("```toon\nname=Alice\n```"), ("name=Alice", Some(Fence::Toon)));
/// assert_eq!(strip_fence("```toon\nname=Alice"), ("```toon\nname=Alice", None));
/// ```
pub fn strip_fence(text: &str) -> (&str, Option<Fence>) {
    let text = text.trim();
    if !text.ends_with(CLOSER) {
        return (text, None);
    }
    for fence in CANDIDATES {
        let opener = fence.opener();
        if !text.starts_with(opener) {
            continue;
        }
        let inner = if text.len() >= opener.len() + CLOSER.len() {
            &text[opener.len()..text.len() - CLOSER.len()]
        } else {
            ""
        };
        return (inner.trim(), Some(fence));
    }
    (text, None)
}
