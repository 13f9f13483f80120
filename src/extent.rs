//! Method and class extent reconstruction.
//!
//! A depth counter pairs openers with the `end` that returns depth to the
//! level a tracked construct was opened at. A generic `end` closes whatever
//! opened most recently, so an extent is only emitted when the top of the
//! construct stack sits at the current depth; closes of plain `if`/`while`
//! blocks fall through without emitting anything.
//!
//! There is no grammar behind this. Single-line definitions, modifier
//! conditionals, and string literals containing the word `end` will shift
//! the numbers; the output is a structural estimate, not an exact parse.

use crate::classify::StructuralTag;
use serde::{Deserialize, Serialize};

/// Which kind of construct an extent covers. Modules count as classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstructKind {
    Method,
    Class,
}

/// Closed span of a method or class body. Lines are 1-based and inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockExtent {
    pub kind: ConstructKind,
    pub start_line: usize,
    pub end_line: usize,
}

impl BlockExtent {
    /// Number of lines the extent spans, declaration and closer included.
    pub fn line_count(&self) -> usize {
        self.end_line - self.start_line + 1
    }
}

#[derive(Clone, Debug)]
struct OpenConstruct {
    kind: ConstructKind,
    start_line: usize,
    depth: u32,
}

/// Per-file output of the tracker.
#[derive(Clone, Debug, Default)]
pub struct FileStructure {
    /// Deepest nesting observed anywhere in the file.
    pub max_depth: u32,
    /// Closed method extents, in closing order.
    pub methods: Vec<BlockExtent>,
    /// Closed class/module extents, in closing order.
    pub classes: Vec<BlockExtent>,
    /// MethodOpen lines seen, whether or not a matching close was found.
    pub method_declarations: usize,
    /// ClassOpen lines seen, whether or not a matching close was found.
    pub class_declarations: usize,
}

/// Depth-counting state machine over one file's classified lines.
#[derive(Debug, Default)]
pub struct BlockTracker {
    depth: u32,
    open: Vec<OpenConstruct>,
    structure: FileStructure,
}

impl BlockTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one classified line; `line` is 1-based.
    pub fn observe(&mut self, line: usize, tag: StructuralTag) {
        if tag.opens_block() {
            // Declarations are openers too; depth moves exactly once.
            self.depth += 1;
            self.structure.max_depth = self.structure.max_depth.max(self.depth);
            match tag {
                StructuralTag::MethodOpen => {
                    self.structure.method_declarations += 1;
                    self.open.push(OpenConstruct {
                        kind: ConstructKind::Method,
                        start_line: line,
                        depth: self.depth,
                    });
                }
                StructuralTag::ClassOpen => {
                    self.structure.class_declarations += 1;
                    self.open.push(OpenConstruct {
                        kind: ConstructKind::Class,
                        start_line: line,
                        depth: self.depth,
                    });
                }
                _ => {}
            }
            return;
        }

        if tag == StructuralTag::BlockClose {
            let closes_tracked = self
                .open
                .last()
                .map_or(false, |construct| construct.depth == self.depth);
            if closes_tracked {
                if let Some(construct) = self.open.pop() {
                    let extent = BlockExtent {
                        kind: construct.kind,
                        start_line: construct.start_line,
                        end_line: line,
                    };
                    match construct.kind {
                        ConstructKind::Method => self.structure.methods.push(extent),
                        ConstructKind::Class => self.structure.classes.push(extent),
                    }
                }
            }
            self.depth = self.depth.saturating_sub(1);
        }
    }

    /// End of file. Constructs still open have no closer and emit nothing;
    /// their declaration counts remain.
    pub fn finish(self) -> FileStructure {
        self.structure
    }
}
