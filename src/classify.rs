//! Line-level classification for Ruby source.
//!
//! Everything downstream works from the two facts this module produces per
//! line: its kind (blank, comment, code) and a structural tag derived from
//! the leading token of the trimmed text. Lines are judged in isolation;
//! there is no grammar and no lookahead.

/// Line kind for LOC accounting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    Comment,
    Code,
}

/// Structural marker inferred from the leading token of a code line.
///
/// `MethodOpen` and `ClassOpen` are more specific forms of `BlockOpen`: a
/// declaration line increments nesting depth exactly once, never twice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StructuralTag {
    None,
    BlockOpen,
    BlockClose,
    MethodOpen,
    ClassOpen,
}

impl StructuralTag {
    /// Whether this tag opens a block for depth-tracking purposes.
    pub fn opens_block(self) -> bool {
        matches!(
            self,
            StructuralTag::BlockOpen | StructuralTag::MethodOpen | StructuralTag::ClassOpen
        )
    }
}

/// One classified line. Borrows from the scanned content and only lives for
/// the duration of a single file pass.
#[derive(Clone, Copy, Debug)]
pub struct ClassifiedLine<'a> {
    pub raw: &'a str,
    pub trimmed: &'a str,
    pub kind: LineKind,
    pub tag: StructuralTag,
}

const COMMENT_MARKER: char = '#';

/// Keywords that open a block when they lead the line. `do` is deliberately
/// absent: iterator blocks close with the same `end` but their opener almost
/// never leads the line, so counting them would only skew depth.
const BLOCK_KEYWORDS: &[&str] = &[
    "class", "module", "def", "if", "unless", "while", "until", "for", "case", "begin",
];

/// Classify a single line of text.
pub fn classify_line(raw: &str) -> ClassifiedLine<'_> {
    let trimmed = raw.trim();
    let kind = if trimmed.is_empty() {
        LineKind::Blank
    } else if trimmed.starts_with(COMMENT_MARKER) {
        LineKind::Comment
    } else {
        LineKind::Code
    };
    let tag = match kind {
        LineKind::Code => structural_tag(trimmed),
        _ => StructuralTag::None,
    };
    ClassifiedLine {
        raw,
        trimmed,
        kind,
        tag,
    }
}

/// Tag a trimmed code line.
///
/// Declarations need a name after the keyword; a bare `class`/`module`/`def`
/// degrades to a generic opener. `end` must stand alone on the line, so
/// `end # done` stays plain code. Modifier forms (`do_x if y`) carry no tag
/// because the keyword is not the leading token.
fn structural_tag(trimmed: &str) -> StructuralTag {
    if trimmed == "end" {
        return StructuralTag::BlockClose;
    }

    let (word, rest) = leading_word(trimmed);
    if !BLOCK_KEYWORDS.contains(&word) || !word_boundary(rest) {
        return StructuralTag::None;
    }

    let has_name = !rest.trim_start().is_empty();
    match word {
        "class" | "module" if has_name => StructuralTag::ClassOpen,
        "def" if has_name => StructuralTag::MethodOpen,
        _ => StructuralTag::BlockOpen,
    }
}

/// Split off the leading run of lowercase letters. All block keywords are
/// plain lowercase, so this is enough to isolate a candidate token.
fn leading_word(trimmed: &str) -> (&str, &str) {
    let end = trimmed
        .find(|c: char| !c.is_ascii_lowercase())
        .unwrap_or(trimmed.len());
    trimmed.split_at(end)
}

/// A keyword only counts as a whole word. Ruby identifiers may continue with
/// digits, `_`, `?`, or `!`, so `if9` or `begin!` are method names, not
/// openers.
fn word_boundary(rest: &str) -> bool {
    rest.chars()
        .next()
        .map_or(true, |c| !c.is_ascii_alphanumeric() && c != '_' && c != '?' && c != '!')
}
