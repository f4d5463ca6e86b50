//! Chromium `Bookmarks` file format.
//!
//! ```json
//! { "checksum": "...", "version": 1,
//!   "roots": { "bookmark_bar": { "type": "folder", "id": "1", "name": "Bookmarks bar", "children": [...] },
//!              "other": {...}, "synced": {...} } }
//! ```
//!
//! Reading goes through typed structs. Removal edits the raw JSON value so
//! fields this crate does not model (dates, GUIDs, meta info) survive the
//! rewrite.

use super::store::StoreError;
use super::{BookmarkNode, BookmarkTree};
use serde::Deserialize;
use serde_json::Value;

/// Display order of the well-known roots.
const ROOT_KEYS: [&str; 3] = ["bookmark_bar", "other", "synced"];

#[derive(Debug, Deserialize)]
struct RawFile {
    roots: serde_json::Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RawNode {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    children: Option<Vec<RawNode>>,
}

impl From<RawNode> for BookmarkNode {
    fn from(raw: RawNode) -> Self {
        let title = if raw.name.is_empty() {
            None
        } else {
            Some(raw.name)
        };

        match raw.url {
            Some(url) => BookmarkNode::Bookmark {
                id: raw.id,
                title,
                url,
            },
            None => BookmarkNode::Folder {
                id: raw.id,
                title,
                children: raw
                    .children
                    .map(|children| children.into_iter().map(BookmarkNode::from).collect()),
            },
        }
    }
}

/// Parse a Chromium bookmarks document into a tree.
pub fn parse(contents: &str) -> Result<BookmarkTree, StoreError> {
    let file: RawFile = serde_json::from_str(contents)?;

    let mut top_level = Vec::new();
    for key in ROOT_KEYS {
        if let Some(value) = file.roots.get(key) {
            let raw = RawNode::deserialize(value)?;
            top_level.push(BookmarkNode::from(raw));
        }
    }

    if top_level.is_empty() {
        return Err(StoreError::InvalidFormat(
            "no bookmark roots found".to_string(),
        ));
    }

    Ok(BookmarkTree::from_top_level(top_level))
}

/// Remove the node `id` from a raw bookmarks document.
///
/// Root folders cannot be removed and folders must be empty, matching what
/// the browser itself allows. The stale `checksum` is dropped so the browser
/// recomputes it on next start instead of rejecting the file.
pub fn remove(document: &mut Value, id: &str) -> Result<(), StoreError> {
    let roots = document
        .get_mut("roots")
        .and_then(Value::as_object_mut)
        .ok_or_else(|| StoreError::InvalidFormat("missing \"roots\" object".to_string()))?;

    if roots.values().any(|root| node_id(root) == Some(id)) {
        return Err(StoreError::RootFolder(id.to_string()));
    }

    let mut outcome = Err(StoreError::NotFound(id.to_string()));
    for root in roots.values_mut() {
        if let Some(result) = remove_child(root, id) {
            outcome = result;
            break;
        }
    }
    outcome?;

    if let Some(object) = document.as_object_mut() {
        object.remove("checksum");
    }
    Ok(())
}

fn node_id(node: &Value) -> Option<&str> {
    node.get("id").and_then(Value::as_str)
}

/// `None` when `id` is not below `node`, otherwise the removal outcome.
fn remove_child(node: &mut Value, id: &str) -> Option<Result<(), StoreError>> {
    let children = node.get_mut("children")?.as_array_mut()?;

    if let Some(pos) = children.iter().position(|child| node_id(child) == Some(id)) {
        let non_empty_folder = children[pos]
            .get("children")
            .and_then(Value::as_array)
            .is_some_and(|grandchildren| !grandchildren.is_empty());
        if non_empty_folder {
            return Some(Err(StoreError::NonEmptyFolder(id.to_string())));
        }
        children.remove(pos);
        return Some(Ok(()));
    }

    children
        .iter_mut()
        .find_map(|child| remove_child(child, id))
}
