//! Positional-context harvesting
//!
//! A document link usually sits inside a table row or list item whose other
//! text nodes (date, category, institution) are weak but useful metadata.
//! The heuristic for picking those snippets is fragile by nature, so it
//! lives behind [`ContextStrategy`] and can be swapped without touching the
//! extractor's control flow.

use scraper::ElementRef;

/// Strategy for collecting up to three ordered text snippets around a link
pub trait ContextStrategy: Send + Sync {
    /// Harvests `[first, second, third]` snippets for the given anchor.
    ///
    /// Slots that cannot be filled stay `None`; a failed harvest must never
    /// prevent the link itself from being extracted.
    fn harvest(&self, link: ElementRef<'_>) -> [Option<String>; 3];
}

/// Default strategy: the nearest enclosing element's text nodes
///
/// Walks to the link's parent element and collects its non-empty, trimmed
/// text nodes in document order; the first three fill the slots.
pub struct ParentTextContext;

impl ContextStrategy for ParentTextContext {
    fn harvest(&self, link: ElementRef<'_>) -> [Option<String>; 3] {
        let mut slots: [Option<String>; 3] = [None, None, None];

        let Some(parent) = link.parent().and_then(ElementRef::wrap) else {
            return slots;
        };

        let mut snippets = parent
            .text()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        for slot in slots.iter_mut() {
            match snippets.next() {
                Some(snippet) => *slot = Some(snippet.to_string()),
                None => break,
            }
        }

        slots
    }
}
