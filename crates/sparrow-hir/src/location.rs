//! Line and column lookup for syntax nodes.

use parking_lot::Mutex;
use rowan::GreenNode;
use sparrow_syntax::{SyntaxNode, SyntaxNodeExt};
use text_size::TextSize;

/// Start and end position of a node, 0-based.
///
/// A field is `None` when the position cannot be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SourceLocation {
    /// Line of the first significant token.
    pub start_line: Option<usize>,
    /// Byte column of the first significant token.
    pub start_column: Option<usize>,
    /// Byte offset of the first significant token.
    pub start_offset: Option<usize>,
    /// Line of the end of the last significant token.
    pub end_line: Option<usize>,
    /// Byte column of the end of the last significant token.
    pub end_column: Option<usize>,
    /// Byte offset of the end of the last significant token.
    pub end_offset: Option<usize>,
}

impl SourceLocation {
    /// A location where nothing could be resolved.
    #[must_use]
    pub fn unresolved() -> Self {
        Self::default()
    }

    /// Returns `true` if every field resolved.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.start_line.is_some()
            && self.start_column.is_some()
            && self.start_offset.is_some()
            && self.end_line.is_some()
            && self.end_column.is_some()
            && self.end_offset.is_some()
    }
}

/// Line starts of one tree, tagged with the green root they came from.
#[derive(Debug)]
struct LineIndex {
    /// Held so the root's address stays unique while the index lives.
    root: GreenNode,
    len: TextSize,
    line_starts: Vec<TextSize>,
}

impl LineIndex {
    fn new(root: &SyntaxNode) -> Self {
        let text = root.text().to_string();
        let mut line_starts = vec![TextSize::from(0)];
        for (offset, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(TextSize::try_from(offset + 1).unwrap_or(TextSize::from(u32::MAX)));
            }
        }
        Self {
            root: root.green().into_owned(),
            len: root.text_range().len(),
            line_starts,
        }
    }

    /// Identity check only; two parses of the same text are different roots.
    fn is_built_for(&self, root: &SyntaxNode) -> bool {
        std::ptr::eq(&*self.root, &*root.green())
    }

    fn line_col(&self, offset: TextSize) -> Option<(usize, usize)> {
        if offset > self.len {
            return None;
        }
        let line = self
            .line_starts
            .partition_point(|start| *start <= offset)
            .saturating_sub(1);
        let start = self.line_starts.get(line)?;
        Some((line, usize::from(offset.checked_sub(*start)?)))
    }
}

/// Converts node ranges to line/column positions.
///
/// The index is built lazily from the root of the first node located and
/// rebuilt when a node from a different tree comes in. Building happens
/// under the lock, so concurrent callers never build twice.
#[derive(Debug, Default)]
pub struct LocationService {
    index: Mutex<Option<LineIndex>>,
}

impl LocationService {
    /// Creates an empty service.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Locates `node` from its first to its last significant token.
    #[must_use]
    pub fn locate(&self, node: &SyntaxNode) -> SourceLocation {
        let Some(root) = node.ancestors().last() else {
            return SourceLocation::unresolved();
        };
        let range = node.trimmed_range();

        let mut index = self.index.lock();
        if !index
            .as_ref()
            .is_some_and(|existing| existing.is_built_for(&root))
        {
            *index = Some(LineIndex::new(&root));
        }
        let Some(index) = index.as_ref() else {
            return SourceLocation::unresolved();
        };

        let start = index.line_col(range.start());
        let end = index.line_col(range.end());
        SourceLocation {
            start_line: start.map(|(line, _)| line),
            start_column: start.map(|(_, column)| column),
            start_offset: start.map(|_| usize::from(range.start())),
            end_line: end.map(|(line, _)| line),
            end_column: end.map(|(_, column)| column),
            end_offset: end.map(|_| usize::from(range.end())),
        }
    }

    /// Drops the cached index.
    pub fn reset(&self) {
        *self.index.lock() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sparrow_syntax::{parse, SyntaxKind};

    fn find(root: &SyntaxNode, kind: SyntaxKind) -> SyntaxNode {
        root.descendants()
            .find(|node| node.kind() == kind)
            .expect("node of kind")
    }

    #[test]
    fn test_locate_multiline_node() {
        let root = parse("import Foundation\n\nstruct S {\n    let a = 1\n}\n").syntax();
        let location = LocationService::new().locate(&find(&root, SyntaxKind::StructDecl));
        assert_eq!(
            location,
            SourceLocation {
                start_line: Some(2),
                start_column: Some(0),
                start_offset: Some(19),
                end_line: Some(4),
                end_column: Some(1),
                end_offset: Some(45),
            }
        );
        assert!(location.is_resolved());
    }

    #[test]
    fn test_locate_skips_leading_trivia() {
        let root = parse("  // note\n  func f() {}").syntax();
        let location = LocationService::new().locate(&find(&root, SyntaxKind::FunctionDecl));
        assert_eq!(location.start_line, Some(1));
        assert_eq!(location.start_column, Some(2));
    }

    #[test]
    fn test_rebuilds_for_another_tree() {
        let service = LocationService::new();
        let first = parse("let a = 1").syntax();
        let second = parse("\n\nlet b = 2").syntax();
        assert_eq!(
            service.locate(&find(&first, SyntaxKind::VariableDecl)).start_line,
            Some(0)
        );
        assert_eq!(
            service.locate(&find(&second, SyntaxKind::VariableDecl)).start_line,
            Some(2)
        );
    }

    #[test]
    fn test_index_matches_root_by_identity() {
        let source = "struct A {}\nstruct B {}";
        let first = parse(source).syntax();
        let again = parse(source).syntax();
        let index = LineIndex::new(&first);

        let reached = find(&first, SyntaxKind::StructDecl)
            .ancestors()
            .last()
            .expect("root");
        assert!(index.is_built_for(&first));
        assert!(index.is_built_for(&reached));
        assert!(!index.is_built_for(&again));
    }

    #[test]
    fn test_reuses_index_for_same_tree() {
        let service = LocationService::new();
        let root = parse("let a = 1\nlet b = 2\nlet c = 3").syntax();
        let lines: Vec<_> = root
            .descendants()
            .filter(|node| node.kind() == SyntaxKind::VariableDecl)
            .map(|node| {
                let location = service.locate(&node);
                let guard = service.index.lock();
                let built_for_root = guard
                    .as_ref()
                    .is_some_and(|index| index.is_built_for(&root));
                (location.start_line, built_for_root)
            })
            .collect();
        assert_eq!(lines, [(Some(0), true), (Some(1), true), (Some(2), true)]);
    }

    #[test]
    fn test_concurrent_locate() {
        let service = std::sync::Arc::new(LocationService::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let service = std::sync::Arc::clone(&service);
                std::thread::spawn(move || {
                    let root = parse("struct A {}\nstruct B {}").syntax();
                    let last = root
                        .descendants()
                        .filter(|node| node.kind() == SyntaxKind::StructDecl)
                        .last()
                        .expect("struct");
                    service.locate(&last).start_line
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().expect("thread"), Some(1));
        }
    }
}
