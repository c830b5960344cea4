//! Emphasis delimiters
//!
//!     The scanner does not decide emphasis on the spot. It emits the inline nodes it is
//!     sure about and, for every run of `*` or `_`, a delimiter run recording its length
//!     and whether it can open and/or close emphasis. When the scan is done,
//!     [process_emphasis] pairs closers with openers and wraps everything between them in
//!     emphasis or strong nodes.
//!
//!     Wrapping removes pieces from the middle of the sequence and inserts new ones, while
//!     the resolution still holds on to the delimiters it has not looked at yet. The pieces
//!     therefore live in an [Arena]: a vector of entries threaded as a doubly linked list.
//!     A handle is an index into the vector and stays valid no matter what is inserted or
//!     unlinked around it.
//!
//! Matching rules
//!
//!     Closers are visited left to right. For each one, the nearest active opener of the
//!     same character is taken, except when both sides could open and close and the
//!     original lengths add up to a multiple of three (unless both are multiples of three).
//!     Two characters are consumed from each side when both have at least two left,
//!     producing strong emphasis; otherwise one, producing emphasis. Delimiters between a
//!     matched pair can no longer match anything.
//!
//!     Nesting is capped at [MAX_EMPHASIS_DEPTH] levels of inline nodes. A closer that
//!     would wrap content already that deep does not match and stays literal text.

use crate::markdown::ast::{Emphasis, Inline, Position, RawSpan, Strong};
use std::collections::HashMap;

pub(super) type Handle = usize;

/// Deepest inline nesting that emphasis may build.
pub(super) const MAX_EMPHASIS_DEPTH: usize = 64;

/// A run of `*` or `_` awaiting resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct DelimiterRun {
    pub ch: char,
    /// Byte range of the characters not consumed yet.
    pub start: usize,
    pub end: usize,
    pub original: usize,
    pub can_open: bool,
    pub can_close: bool,
    pub active: bool,
}

impl DelimiterRun {
    fn remaining(&self) -> usize {
        self.end - self.start
    }
}

#[derive(Debug)]
pub(super) enum Piece {
    Node(Inline),
    Delimiters(DelimiterRun),
    Removed,
}

#[derive(Debug)]
struct Entry {
    piece: Piece,
    /// Inline nesting depth of the piece; zero for delimiter runs.
    depth: usize,
    prev: Option<Handle>,
    next: Option<Handle>,
}

/// Inline pieces in document order with stable handles.
#[derive(Debug, Default)]
pub(super) struct Arena {
    entries: Vec<Entry>,
    head: Option<Handle>,
    tail: Option<Handle>,
}

impl Arena {
    pub fn push(&mut self, piece: Piece) -> Handle {
        let handle = self.entries.len();
        let depth = piece_depth(&piece);
        self.entries.push(Entry {
            piece,
            depth,
            prev: self.tail,
            next: None,
        });
        match self.tail {
            Some(tail) => self.entries[tail].next = Some(handle),
            None => self.head = Some(handle),
        }
        self.tail = Some(handle);
        handle
    }

    fn insert_after(&mut self, at: Handle, piece: Piece) -> Handle {
        let handle = self.entries.len();
        let next = self.entries[at].next;
        let depth = piece_depth(&piece);
        self.entries.push(Entry {
            piece,
            depth,
            prev: Some(at),
            next,
        });
        self.entries[at].next = Some(handle);
        match next {
            Some(next) => self.entries[next].prev = Some(handle),
            None => self.tail = Some(handle),
        }
        handle
    }

    /// Unlink an entry and take its piece.
    fn take(&mut self, handle: Handle) -> Piece {
        let Entry { prev, next, .. } = self.entries[handle];
        match prev {
            Some(prev) => self.entries[prev].next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.entries[next].prev = prev,
            None => self.tail = prev,
        }
        self.entries[handle].prev = None;
        self.entries[handle].next = None;
        std::mem::replace(&mut self.entries[handle].piece, Piece::Removed)
    }

    fn next(&self, handle: Handle) -> Option<Handle> {
        self.entries[handle].next
    }

    fn run(&self, handle: Handle) -> Option<&DelimiterRun> {
        match &self.entries[handle].piece {
            Piece::Delimiters(run) => Some(run),
            _ => None,
        }
    }

    fn run_mut(&mut self, handle: Handle) -> Option<&mut DelimiterRun> {
        match &mut self.entries[handle].piece {
            Piece::Delimiters(run) => Some(run),
            _ => None,
        }
    }

    /// Deepest piece strictly between two entries.
    fn depth_between(&self, from: Handle, to: Handle) -> usize {
        let mut depth = 0;
        let mut cursor = self.next(from);
        while let Some(handle) = cursor {
            if handle == to {
                break;
            }
            depth = depth.max(self.entries[handle].depth);
            cursor = self.next(handle);
        }
        depth
    }

    /// Take every piece strictly between two entries, in order.
    fn take_between(&mut self, from: Handle, to: Handle, span: &RawSpan) -> Vec<Inline> {
        let mut inlines = Vec::new();
        let mut cursor = self.next(from);
        while let Some(handle) = cursor {
            if handle == to {
                break;
            }
            cursor = self.next(handle);
            inlines.extend(into_inline(self.take(handle), span));
        }
        inlines
    }

    /// Consume the arena, turning leftover delimiters into literal text.
    pub fn into_inlines(mut self, span: &RawSpan) -> Vec<Inline> {
        let mut inlines = Vec::new();
        let mut cursor = self.head;
        while let Some(handle) = cursor {
            cursor = self.next(handle);
            inlines.extend(into_inline(self.take(handle), span));
        }
        inlines
    }
}

fn piece_depth(piece: &Piece) -> usize {
    match piece {
        Piece::Node(inline) => inline_depth(inline),
        Piece::Delimiters(_) | Piece::Removed => 0,
    }
}

/// Levels of inline nodes from `inline` down to its deepest leaf.
///
/// Only called on nodes whose children were built under the same cap.
fn inline_depth(inline: &Inline) -> usize {
    1 + inline
        .children()
        .iter()
        .map(inline_depth)
        .max()
        .unwrap_or(0)
}

fn into_inline(piece: Piece, span: &RawSpan) -> Option<Inline> {
    match piece {
        Piece::Node(inline) => Some(inline),
        Piece::Delimiters(run) => Some(Inline::text(
            &span.text()[run.start..run.end],
            span.position(run.start, run.end),
        )),
        Piece::Removed => None,
    }
}

/// Pair delimiter runs and wrap what lies between them.
///
/// `delimiters` holds the handles of all delimiter runs in document order.
pub(super) fn process_emphasis(arena: &mut Arena, delimiters: &[Handle], span: &RawSpan) {
    // Lowest delimiter index worth searching for an opener, per closer kind.
    let mut openers_bottom: HashMap<(char, bool, usize), usize> = HashMap::new();
    let mut closer_index = 0;

    while closer_index < delimiters.len() {
        let closer = delimiters[closer_index];
        let Some(closer_run) = arena.run(closer).cloned() else {
            closer_index += 1;
            continue;
        };
        if !closer_run.active || !closer_run.can_close {
            closer_index += 1;
            continue;
        }

        let key = (
            closer_run.ch,
            closer_run.can_open,
            closer_run.original % 3,
        );
        let bottom = openers_bottom.get(&key).copied().unwrap_or(0);
        let opener_index = (bottom..closer_index).rev().find(|&index| {
            arena
                .run(delimiters[index])
                .is_some_and(|opener| pairs_with(opener, &closer_run))
        });

        let Some(opener_index) = opener_index else {
            openers_bottom.insert(key, closer_index);
            if !closer_run.can_open {
                if let Some(run) = arena.run_mut(closer) {
                    run.active = false;
                }
            }
            closer_index += 1;
            continue;
        };

        let opener = delimiters[opener_index];
        if arena.depth_between(opener, closer) >= MAX_EMPHASIS_DEPTH {
            if let Some(run) = arena.run_mut(closer) {
                run.active = false;
            }
            closer_index += 1;
            continue;
        }
        for &between in &delimiters[opener_index + 1..closer_index] {
            if let Some(run) = arena.run_mut(between) {
                run.active = false;
            }
        }
        wrap(arena, opener, closer, span);

        // A closer with characters left may close again.
        if arena.run(closer).map_or(true, |run| !run.active) {
            closer_index += 1;
        }
    }
}

fn pairs_with(opener: &DelimiterRun, closer: &DelimiterRun) -> bool {
    if !opener.active || !opener.can_open || opener.ch != closer.ch {
        return false;
    }
    let both_sides_ambiguous = opener.can_close && closer.can_open;
    let sum_multiple_of_three = (opener.original + closer.original) % 3 == 0;
    let both_multiples_of_three = opener.original % 3 == 0 && closer.original % 3 == 0;
    !(both_sides_ambiguous && sum_multiple_of_three && !both_multiples_of_three)
}

/// Consume characters from a matched pair and wrap the pieces between them.
fn wrap(arena: &mut Arena, opener: Handle, closer: Handle, span: &RawSpan) {
    let (Some(opener_run), Some(closer_run)) = (arena.run(opener), arena.run(closer)) else {
        return;
    };
    let used = if opener_run.remaining() >= 2 && closer_run.remaining() >= 2 {
        2
    } else {
        1
    };

    let mut start = 0;
    if let Some(run) = arena.run_mut(opener) {
        run.end -= used;
        start = run.end;
        run.active = run.remaining() > 0;
    }
    let mut end = 0;
    if let Some(run) = arena.run_mut(closer) {
        run.start += used;
        end = run.start;
        run.active = run.remaining() > 0;
    }

    let children = arena.take_between(opener, closer, span);
    let position: Option<Position> = span.position(start, end);
    let node = if used == 2 {
        Inline::Strong(Strong { children, position })
    } else {
        Inline::Emphasis(Emphasis { children, position })
    };
    arena.insert_after(opener, Piece::Node(node));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(ch: char, start: usize, len: usize, can_open: bool, can_close: bool) -> Piece {
        Piece::Delimiters(DelimiterRun {
            ch,
            start,
            end: start + len,
            original: len,
            can_open,
            can_close,
            active: true,
        })
    }

    #[test]
    fn test_arena_insert_and_take_keep_handles() {
        let mut arena = Arena::default();
        let a = arena.push(Piece::Node(Inline::text("a", None)));
        let c = arena.push(Piece::Node(Inline::text("c", None)));
        let b = arena.insert_after(a, Piece::Node(Inline::text("b", None)));

        assert_eq!(arena.next(a), Some(b));
        assert_eq!(arena.next(b), Some(c));

        arena.take(b);
        assert_eq!(arena.next(a), Some(c));

        let span = RawSpan::new();
        let texts: Vec<_> = arena
            .into_inlines(&span)
            .iter()
            .map(Inline::plain_text)
            .collect();
        assert_eq!(texts, vec!["a", "c"]);
    }

    #[test]
    fn test_emphasis_wraps_between() {
        let span = RawSpan::from_text("*x*", None);
        let mut arena = Arena::default();
        let open = arena.push(run('*', 0, 1, true, false));
        arena.push(Piece::Node(Inline::text("x", None)));
        let close = arena.push(run('*', 2, 1, false, true));

        process_emphasis(&mut arena, &[open, close], &span);
        let inlines = arena.into_inlines(&span);
        let emphasis = inlines
            .iter()
            .find(|inline| matches!(inline, Inline::Emphasis(_)))
            .unwrap();
        assert_eq!(emphasis.plain_text(), "x");
    }

    #[test]
    fn test_multiple_of_three_guard() {
        let opener = DelimiterRun {
            ch: '*',
            start: 0,
            end: 1,
            original: 1,
            can_open: true,
            can_close: true,
            active: true,
        };
        let closer = DelimiterRun {
            ch: '*',
            start: 4,
            end: 6,
            original: 2,
            can_open: true,
            can_close: true,
            active: true,
        };
        assert!(!pairs_with(&opener, &closer));

        let plain_opener = DelimiterRun {
            can_close: false,
            ..opener.clone()
        };
        assert!(pairs_with(&plain_opener, &closer));

        let plain_closer = DelimiterRun {
            can_open: false,
            ..closer.clone()
        };
        assert!(pairs_with(&opener, &plain_closer));

        let triple = DelimiterRun {
            original: 3,
            end: 3,
            ..opener
        };
        let triple_closer = DelimiterRun {
            original: 3,
            ..closer
        };
        assert!(pairs_with(&triple, &triple_closer));
    }
}
