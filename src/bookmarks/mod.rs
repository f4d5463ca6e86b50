//! Bookmark tree model and the boundary to the host bookmark store.
//!
//! The host store owns the bookmarks. This module only describes the shape of
//! a fetched tree, how to search it, and how to talk to the store without
//! blocking the UI loop.

mod chromium;
pub mod client;
pub mod filter;
pub mod highlight;
pub mod locate;
pub mod output;
pub mod store;

pub use client::{StoreClient, StoreEvent};
pub use filter::{filter_tree, normalize_query};
pub use highlight::{Segment, SegmentKind, highlight};
pub use store::{BookmarkStore, JsonFileStore, MemoryStore, StoreError};

use serde::Serialize;

/// Label shown for folders without a title.
pub const UNTITLED_FOLDER: &str = "Untitled folder";

/// A node in the bookmark hierarchy.
///
/// A node carrying a URL is a bookmark; anything else is a folder. Folders
/// keep their children in display order. `children: None` means the host
/// reported no children field at all, which is different from an empty folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BookmarkNode {
    Bookmark {
        id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        url: String,
    },
    Folder {
        id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        children: Option<Vec<BookmarkNode>>,
    },
}

impl BookmarkNode {
    pub fn bookmark(id: impl Into<String>, title: impl Into<String>, url: impl Into<String>) -> Self {
        BookmarkNode::Bookmark {
            id: id.into(),
            title: non_empty(title.into()),
            url: url.into(),
        }
    }

    pub fn folder(id: impl Into<String>, title: impl Into<String>, children: Vec<BookmarkNode>) -> Self {
        BookmarkNode::Folder {
            id: id.into(),
            title: non_empty(title.into()),
            children: Some(children),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            BookmarkNode::Bookmark { id, .. } | BookmarkNode::Folder { id, .. } => id,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            BookmarkNode::Bookmark { title, .. } | BookmarkNode::Folder { title, .. } => {
                title.as_deref()
            }
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            BookmarkNode::Bookmark { url, .. } => Some(url),
            BookmarkNode::Folder { .. } => None,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, BookmarkNode::Folder { .. })
    }

    /// Children of a folder, empty for bookmarks and childless folders.
    pub fn children(&self) -> &[BookmarkNode] {
        match self {
            BookmarkNode::Folder {
                children: Some(children),
                ..
            } => children,
            _ => &[],
        }
    }

    /// Depth-first search for a node by id, including `self`.
    pub fn find(&self, id: &str) -> Option<&BookmarkNode> {
        if self.id() == id {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(id))
    }

    /// Number of bookmarks (leaves) in this subtree.
    pub fn bookmark_count(&self) -> usize {
        match self {
            BookmarkNode::Bookmark { .. } => 1,
            BookmarkNode::Folder { .. } => self.children().iter().map(Self::bookmark_count).sum(),
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

/// A full bookmark hierarchy as returned by the host store.
///
/// The root is never displayed; its children are the top-level folders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkTree {
    root: BookmarkNode,
}

impl BookmarkTree {
    pub fn new(root: BookmarkNode) -> Self {
        Self { root }
    }

    /// Build a tree from top-level nodes under an invisible root.
    pub fn from_top_level(children: Vec<BookmarkNode>) -> Self {
        Self::new(BookmarkNode::Folder {
            id: "0".to_string(),
            title: None,
            children: Some(children),
        })
    }

    pub fn root(&self) -> &BookmarkNode {
        &self.root
    }

    pub fn top_level(&self) -> &[BookmarkNode] {
        self.root.children()
    }

    pub fn find(&self, id: &str) -> Option<&BookmarkNode> {
        self.root.find(id)
    }

    pub fn bookmark_count(&self) -> usize {
        self.root.bookmark_count()
    }

    pub(crate) fn root_mut(&mut self) -> &mut BookmarkNode {
        &mut self.root
    }
}
