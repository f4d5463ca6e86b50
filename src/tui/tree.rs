//! Turns bookmark nodes into display rows with expand/collapse state.
//!
//! Every node becomes one [`TreeRow`], stored in pre-order so a folder's
//! descendants are the contiguous range right after it. Expansion lives in a
//! map from folder id to flag owned by the [`TreeView`] and is rebuilt from
//! scratch on every render; nothing carries over between renders.

use crate::bookmarks::{BookmarkNode, Segment, highlight};
use std::collections::HashMap;

pub use crate::bookmarks::UNTITLED_FOLDER;
pub const EXPANDED_GLYPH: &str = "▼";
pub const COLLAPSED_GLYPH: &str = "▶";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind {
    Bookmark { url: String },
    /// `container` is false when the folder had no children field
    Folder { container: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub id: String,
    pub depth: usize,
    pub kind: RowKind,
    /// Title (or fallback) split for search highlighting
    pub label: Vec<Segment>,
    /// Index of the enclosing folder row
    pub parent: Option<usize>,
    /// Rows `index + 1 .. subtree_end` are this row's descendants
    pub subtree_end: usize,
}

impl TreeRow {
    pub fn is_folder(&self) -> bool {
        matches!(self.kind, RowKind::Folder { .. })
    }

    pub fn url(&self) -> Option<&str> {
        match &self.kind {
            RowKind::Bookmark { url } => Some(url),
            RowKind::Folder { .. } => None,
        }
    }

    pub fn label_text(&self) -> String {
        self.label.iter().map(|s| s.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeView {
    rows: Vec<TreeRow>,
    expanded: HashMap<String, bool>,
}

impl TreeView {
    /// Render `nodes` as depth-0 entries.
    ///
    /// Folders start expanded at depth 0, or everywhere when `force_expand`
    /// is set (search results). Labels are highlighted against `query`.
    pub fn render(nodes: &[BookmarkNode], force_expand: bool, query: &str) -> Self {
        let mut view = TreeView::default();
        for node in nodes {
            view.render_node(node, 0, None, force_expand, query);
        }
        view
    }

    fn render_node(
        &mut self,
        node: &BookmarkNode,
        depth: usize,
        parent: Option<usize>,
        force_expand: bool,
        query: &str,
    ) {
        let index = self.rows.len();

        match node {
            BookmarkNode::Bookmark { id, title, url } => {
                let label = title.as_deref().unwrap_or(url);
                self.rows.push(TreeRow {
                    id: id.clone(),
                    depth,
                    kind: RowKind::Bookmark { url: url.clone() },
                    label: highlight(label, query),
                    parent,
                    subtree_end: index + 1,
                });
            }
            BookmarkNode::Folder {
                id,
                title,
                children,
            } => {
                let label = title.as_deref().unwrap_or(UNTITLED_FOLDER);
                self.rows.push(TreeRow {
                    id: id.clone(),
                    depth,
                    kind: RowKind::Folder {
                        container: children.is_some(),
                    },
                    label: highlight(label, query),
                    parent,
                    subtree_end: index + 1,
                });

                if let Some(children) = children {
                    self.expanded.insert(id.clone(), force_expand || depth == 0);
                    for child in children {
                        self.render_node(child, depth + 1, Some(index), force_expand, query);
                    }
                }
                self.rows[index].subtree_end = self.rows.len();
            }
        }
    }

    pub fn rows(&self) -> &[TreeRow] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&TreeRow> {
        self.rows.get(index)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.rows.iter().position(|row| row.id == id)
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.get(id).copied().unwrap_or(false)
    }

    /// Expand/collapse glyph for a row, `None` for bookmarks and non-container folders.
    pub fn indicator(&self, row: &TreeRow) -> Option<&'static str> {
        match row.kind {
            RowKind::Folder { container: true } => Some(if self.is_expanded(&row.id) {
                EXPANDED_GLYPH
            } else {
                COLLAPSED_GLYPH
            }),
            _ => None,
        }
    }

    /// Indices of rows whose ancestors are all expanded, in display order.
    pub fn visible_rows(&self) -> Vec<usize> {
        let mut visible = Vec::with_capacity(self.rows.len());
        let mut index = 0;
        while index < self.rows.len() {
            let row = &self.rows[index];
            visible.push(index);
            index = if row.is_folder() && !self.is_expanded(&row.id) {
                row.subtree_end
            } else {
                index + 1
            };
        }
        visible
    }

    /// Toggle a folder. Collapsing also collapses every folder below it;
    /// expanding opens only this folder. Returns false when `id` is not a
    /// container folder.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.is_expanded(id) {
            self.collapse(id)
        } else {
            self.expand(id)
        }
    }

    pub fn expand(&mut self, id: &str) -> bool {
        match self.expanded.get_mut(id) {
            Some(flag) => {
                *flag = true;
                true
            }
            None => false,
        }
    }

    pub fn collapse(&mut self, id: &str) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        if !self.expanded.contains_key(id) {
            return false;
        }

        let end = self.rows[index].subtree_end;
        for row in &self.rows[index..end] {
            if let Some(flag) = self.expanded.get_mut(&row.id) {
                *flag = false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Bar > [Work > [Projects > [Roadmap], Email], News]
    fn nodes() -> Vec<BookmarkNode> {
        vec![BookmarkNode::folder(
            "1",
            "Bar",
            vec![
                BookmarkNode::folder(
                    "2",
                    "Work",
                    vec![
                        BookmarkNode::folder(
                            "3",
                            "Projects",
                            vec![BookmarkNode::bookmark("4", "Roadmap", "https://roadmap.example.com")],
                        ),
                        BookmarkNode::bookmark("5", "Email", "https://mail.example.com"),
                    ],
                ),
                BookmarkNode::bookmark("6", "News", "https://news.example.com"),
            ],
        )]
    }

    fn visible_ids(view: &TreeView) -> Vec<&str> {
        view.visible_rows()
            .into_iter()
            .map(|i| view.rows()[i].id.as_str())
            .collect()
    }

    #[test]
    fn test_rows_are_preorder_with_depths() {
        let view = TreeView::render(&nodes(), false, "");
        let shape: Vec<_> = view.rows().iter().map(|r| (r.id.as_str(), r.depth)).collect();
        assert_eq!(
            shape,
            vec![("1", 0), ("2", 1), ("3", 2), ("4", 3), ("5", 2), ("6", 1)]
        );
        assert_eq!(view.rows()[1].subtree_end, 5);
        assert_eq!(view.rows()[3].parent, Some(2));
    }

    #[test]
    fn test_only_top_level_starts_expanded() {
        let view = TreeView::render(&nodes(), false, "");
        assert!(view.is_expanded("1"));
        assert!(!view.is_expanded("2"));
        assert!(!view.is_expanded("3"));
        assert_eq!(visible_ids(&view), vec!["1", "2", "6"]);
        assert_eq!(view.indicator(&view.rows()[0]), Some(EXPANDED_GLYPH));
        assert_eq!(view.indicator(&view.rows()[1]), Some(COLLAPSED_GLYPH));
    }

    #[test]
    fn test_force_expand_opens_everything() {
        let view = TreeView::render(&nodes(), true, "");
        assert_eq!(visible_ids(&view), vec!["1", "2", "3", "4", "5", "6"]);
    }

    #[test]
    fn test_collapse_resets_descendants() {
        let mut view = TreeView::render(&nodes(), false, "");
        assert!(view.toggle("2"));
        assert!(view.toggle("3"));
        assert_eq!(visible_ids(&view), vec!["1", "2", "3", "4", "5", "6"]);

        // Collapse Work: Projects was never clicked but must close too
        assert!(view.toggle("2"));
        assert!(!view.is_expanded("3"));
        assert_eq!(view.indicator(&view.rows()[2]), Some(COLLAPSED_GLYPH));
        assert_eq!(visible_ids(&view), vec!["1", "2", "6"]);

        // Re-expanding Work opens only Work
        assert!(view.toggle("2"));
        assert_eq!(visible_ids(&view), vec!["1", "2", "3", "5", "6"]);
    }

    #[test]
    fn test_expand_keeps_children_state() {
        let mut view = TreeView::render(&nodes(), true, "");
        view.collapse("1");
        view.expand("1");
        // Collapsing the root cascaded; expanding did not force children open
        assert_eq!(visible_ids(&view), vec!["1", "2", "6"]);
    }

    #[test]
    fn test_labels_and_fallbacks() {
        let nodes = vec![
            BookmarkNode::Folder {
                id: "1".to_string(),
                title: None,
                children: Some(vec![BookmarkNode::bookmark("2", "", "https://x.example.com")]),
            },
        ];
        let view = TreeView::render(&nodes, false, "");
        assert_eq!(view.rows()[0].label_text(), UNTITLED_FOLDER);
        assert_eq!(view.rows()[1].label_text(), "https://x.example.com");
        assert_eq!(view.rows()[1].url(), Some("https://x.example.com"));
    }

    #[test]
    fn test_folder_without_children_field_is_inert() {
        let nodes = vec![BookmarkNode::Folder {
            id: "1".to_string(),
            title: Some("Empty".to_string()),
            children: None,
        }];
        let mut view = TreeView::render(&nodes, true, "");
        let row = view.rows()[0].clone();
        assert!(row.is_folder());
        assert_eq!(view.indicator(&row), None);
        assert!(!view.toggle("1"));
        assert_eq!(visible_ids(&view), vec!["1"]);
    }

    #[test]
    fn test_empty_folder_has_indicator() {
        let nodes = vec![BookmarkNode::folder("1", "Empty", vec![])];
        let view = TreeView::render(&nodes, false, "");
        assert_eq!(view.indicator(&view.rows()[0]), Some(EXPANDED_GLYPH));
    }

    #[test]
    fn test_labels_are_highlighted() {
        let view = TreeView::render(&nodes(), true, "work");
        let work = &view.rows()[1];
        assert_eq!(work.label.len(), 1);
        assert!(work.label[0].is_match());
        assert_eq!(work.label[0].text, "Work");
    }

    #[test]
    fn test_render_is_deterministic() {
        assert_eq!(
            TreeView::render(&nodes(), false, "e"),
            TreeView::render(&nodes(), false, "e")
        );
    }
}
