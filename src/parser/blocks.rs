//! Doc-comment block extraction.
//!
//! A block starts at a line holding only `###*` and ends at the next line
//! holding only `###`. Everything outside such a pair is ignored.

use crate::unindent::unindent;
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

static RE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?m)^[ \t]*###\*[ \t]*\n", // begin marker
        r"((?s:.*?))",               // block content (non-greedy)
        r"^[ \t]*###[ \t]*(?:\n|\z)", // end marker
    ))
    .unwrap()
});

/// Doc-comment blocks of one source text.
///
/// Iteration is lazy and can be restarted by calling [`Blocks::iter`] again.
#[derive(Debug, Clone)]
pub struct Blocks<'a> {
    source: Cow<'a, str>,
}

impl<'a> Blocks<'a> {
    pub fn new(source: &'a str) -> Self {
        let source = if source.contains('\r') {
            Cow::Owned(source.replace("\r\n", "\n"))
        } else {
            Cow::Borrowed(source)
        };
        Blocks { source }
    }

    /// Unindented block contents in source order.
    pub fn iter(&self) -> impl Iterator<Item = String> + '_ {
        RE_BLOCK
            .captures_iter(&self.source)
            .map(|caps| unindent(&caps[1]))
    }
}

impl<'b> IntoIterator for &'b Blocks<'_> {
    type Item = String;
    type IntoIter = Box<dyn Iterator<Item = String> + 'b>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// Shorthand for [`Blocks::new`].
pub fn find_blocks(source: &str) -> Blocks<'_> {
    Blocks::new(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_single_block() {
        let source = "foo = 1\n###*\n  @class up.link\n  Links.\n###\nbar = 2\n";
        let blocks: Vec<_> = find_blocks(source).iter().collect();
        assert_eq!(blocks, vec!["@class up.link\nLinks.".to_string()]);
    }

    #[test]
    fn sequential_blocks_are_not_merged() {
        let source = "###*\nfirst\n###\ncode()\n###*\nsecond\n###\n";
        let blocks: Vec<_> = find_blocks(source).iter().collect();
        assert_eq!(blocks, vec!["first", "second"]);
    }

    #[test]
    fn indented_delimiters() {
        let source = "class Foo\n  ###*\n    @method up.foo\n    Does foo.\n  ###\n  foo: ->\n";
        let blocks: Vec<_> = find_blocks(source).iter().collect();
        assert_eq!(blocks, vec!["@method up.foo\nDoes foo."]);
    }

    #[test]
    fn empty_block() {
        let blocks: Vec<_> = find_blocks("###*\n###\n").iter().collect();
        assert_eq!(blocks, vec![""]);
    }

    #[test]
    fn plain_block_comments_are_ignored() {
        let source = "###\nnot a doc comment\n###\n# @class nope\n";
        assert_eq!(find_blocks(source).iter().count(), 0);
    }

    #[test]
    fn end_marker_at_eof_without_newline() {
        let blocks: Vec<_> = find_blocks("###*\ntext\n###").iter().collect();
        assert_eq!(blocks, vec!["text"]);
    }

    #[test]
    fn crlf_is_normalized() {
        let blocks: Vec<_> = find_blocks("###*\r\n  a\r\n  b\r\n###\r\n").iter().collect();
        assert_eq!(blocks, vec!["a\nb"]);
    }

    #[test]
    fn iteration_restarts() {
        let blocks = find_blocks("###*\na\n###\n###*\nb\n###\n");
        assert_eq!(blocks.iter().count(), 2);
        let again: Vec<_> = (&blocks).into_iter().collect();
        assert_eq!(again, vec!["a", "b"]);
    }
}
