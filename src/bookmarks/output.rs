//! Plain-text renderings of a bookmark tree for the non-interactive CLI.

use super::{BookmarkNode, UNTITLED_FOLDER};

fn label(node: &BookmarkNode) -> &str {
    match node {
        BookmarkNode::Bookmark { title, url, .. } => title.as_deref().unwrap_or(url),
        BookmarkNode::Folder { title, .. } => title.as_deref().unwrap_or(UNTITLED_FOLDER),
    }
}

/// Render nodes as a box-drawing tree.
///
/// ```text
/// ├── Work/
/// │   └── Email <https://mail.example.com>
/// └── News <https://news.example.com>
/// ```
pub fn render_box_tree(nodes: &[BookmarkNode]) -> String {
    let mut out = String::new();
    for (i, node) in nodes.iter().enumerate() {
        render_box_node(node, "", i + 1 == nodes.len(), &mut out);
    }
    out
}

fn render_box_node(node: &BookmarkNode, prefix: &str, is_last: bool, out: &mut String) {
    let connector = if is_last { "└── " } else { "├── " };
    out.push_str(prefix);
    out.push_str(connector);

    match node {
        BookmarkNode::Bookmark { url, .. } => {
            out.push_str(&format!("{} <{}>\n", label(node), url));
        }
        BookmarkNode::Folder { .. } => {
            out.push_str(&format!("{}/\n", label(node)));

            let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
            let children = node.children();
            for (i, child) in children.iter().enumerate() {
                render_box_node(child, &child_prefix, i + 1 == children.len(), out);
            }
        }
    }
}

/// One line per bookmark: `Folder / Sub folder / Title<TAB>url`.
pub fn list_lines(nodes: &[BookmarkNode]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut path = Vec::new();
    collect_lines(nodes, &mut path, &mut lines);
    lines
}

fn collect_lines<'a>(nodes: &'a [BookmarkNode], path: &mut Vec<&'a str>, lines: &mut Vec<String>) {
    for node in nodes {
        match node {
            BookmarkNode::Bookmark { url, .. } => {
                path.push(label(node));
                lines.push(format!("{}\t{}", path.join(" / "), url));
                path.pop();
            }
            BookmarkNode::Folder { .. } => {
                path.push(label(node));
                collect_lines(node.children(), path, lines);
                path.pop();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nodes() -> Vec<BookmarkNode> {
        vec![
            BookmarkNode::folder(
                "1",
                "Work",
                vec![
                    BookmarkNode::bookmark("2", "Email", "https://mail.example.com"),
                    BookmarkNode::bookmark("3", "", "https://wiki.example.com"),
                ],
            ),
            BookmarkNode::bookmark("4", "News", "https://news.example.com"),
        ]
    }

    #[test]
    fn test_box_tree() {
        let expected = "\
├── Work/
│   ├── Email <https://mail.example.com>
│   └── https://wiki.example.com <https://wiki.example.com>
└── News <https://news.example.com>
";
        assert_eq!(render_box_tree(&nodes()), expected);
    }

    #[test]
    fn test_list_lines() {
        assert_eq!(
            list_lines(&nodes()),
            vec![
                "Work / Email\thttps://mail.example.com",
                "Work / https://wiki.example.com\thttps://wiki.example.com",
                "News\thttps://news.example.com",
            ]
        );
    }

    #[test]
    fn test_untitled_folder_label() {
        let nodes = vec![BookmarkNode::folder(
            "1",
            "",
            vec![BookmarkNode::bookmark("2", "Email", "https://mail.example.com")],
        )];
        assert_eq!(
            list_lines(&nodes),
            vec![format!("{} / Email\thttps://mail.example.com", UNTITLED_FOLDER)]
        );
    }
}
