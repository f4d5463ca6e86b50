//! Substring search over the bookmark tree.

use super::BookmarkNode;

/// Normalize raw search input: trim surrounding whitespace and lower-case.
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Prune `nodes` down to the bookmarks matching `query` and their ancestors.
///
/// `query` must already be normalized and non-empty. A bookmark matches when
/// its title, its URL, or the title of any enclosing folder (`path_names`)
/// contains the query. Folders survive only when at least one descendant
/// survives. Sibling order is preserved and the input is never modified.
pub fn filter_tree(nodes: &[BookmarkNode], query: &str, path_names: &[String]) -> Vec<BookmarkNode> {
    let mut results = Vec::new();

    for node in nodes {
        match node {
            BookmarkNode::Bookmark { id, title, url } => {
                if matches_bookmark(title.as_deref(), url, path_names, query) {
                    results.push(BookmarkNode::Bookmark {
                        id: id.clone(),
                        title: title.clone(),
                        url: url.clone(),
                    });
                }
            }
            BookmarkNode::Folder {
                id,
                title,
                children,
            } => {
                let mut next_path = path_names.to_vec();
                next_path.push(title.clone().unwrap_or_default());

                let kept = filter_tree(children.as_deref().unwrap_or_default(), query, &next_path);
                if !kept.is_empty() {
                    results.push(BookmarkNode::Folder {
                        id: id.clone(),
                        title: title.clone(),
                        children: Some(kept),
                    });
                }
            }
        }
    }

    results
}

fn matches_bookmark(title: Option<&str>, url: &str, path_names: &[String], query: &str) -> bool {
    title
        .into_iter()
        .chain(std::iter::once(url))
        .chain(path_names.iter().map(String::as_str))
        .any(|field| field.to_lowercase().contains(query))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn work_and_news() -> Vec<BookmarkNode> {
        vec![
            BookmarkNode::folder(
                "1",
                "Work",
                vec![BookmarkNode::bookmark("2", "Email", "https://mail.example.com")],
            ),
            BookmarkNode::bookmark("3", "News", "https://news.example.com"),
        ]
    }

    fn ids(nodes: &[BookmarkNode]) -> Vec<&str> {
        nodes.iter().map(BookmarkNode::id).collect()
    }

    /// True when every retained folder holds at least one bookmark.
    fn no_empty_folders(nodes: &[BookmarkNode]) -> bool {
        nodes.iter().all(|node| match node {
            BookmarkNode::Bookmark { .. } => true,
            BookmarkNode::Folder { .. } => {
                node.bookmark_count() > 0 && no_empty_folders(node.children())
            }
        })
    }

    #[test]
    fn test_folder_name_matches_descendants() {
        let result = filter_tree(&work_and_news(), "wo", &[]);
        assert_eq!(ids(&result), vec!["1"]);
        assert_eq!(ids(result[0].children()), vec!["2"]);
    }

    #[test]
    fn test_url_substring_match() {
        let result = filter_tree(&work_and_news(), "mail", &[]);
        assert_eq!(ids(&result), vec!["1"]);
        assert_eq!(ids(result[0].children()), vec!["2"]);
    }

    #[test]
    fn test_title_match_at_top_level() {
        let result = filter_tree(&work_and_news(), "news", &[]);
        assert_eq!(ids(&result), vec!["3"]);
    }

    #[test]
    fn test_no_match_is_empty() {
        assert!(filter_tree(&work_and_news(), "zzz", &[]).is_empty());
    }

    #[test]
    fn test_matching_is_case_insensitive_on_source() {
        let nodes = vec![BookmarkNode::bookmark("1", "RUST Blog", "https://BLOG.rust-lang.org")];
        assert_eq!(filter_tree(&nodes, "rust", &[]).len(), 1);
        assert_eq!(filter_tree(&nodes, "blog.rust", &[]).len(), 1);
    }

    #[test]
    fn test_empty_folders_are_dropped() {
        let nodes = vec![
            BookmarkNode::folder("1", "Work", vec![]),
            BookmarkNode::folder(
                "2",
                "Misc",
                vec![BookmarkNode::folder("3", "Work stuff", vec![])],
            ),
        ];
        assert!(filter_tree(&nodes, "work", &[]).is_empty());
    }

    #[test]
    fn test_folder_without_children_field_never_survives() {
        let nodes = vec![BookmarkNode::Folder {
            id: "1".to_string(),
            title: Some("Work".to_string()),
            children: None,
        }];
        assert!(filter_tree(&nodes, "work", &[]).is_empty());
    }

    #[test]
    fn test_sibling_order_is_preserved() {
        let nodes = vec![
            BookmarkNode::bookmark("1", "zeta docs", "https://z.example.com"),
            BookmarkNode::bookmark("2", "alpha docs", "https://a.example.com"),
            BookmarkNode::bookmark("3", "unrelated", "https://u.example.com"),
            BookmarkNode::bookmark("4", "beta docs", "https://b.example.com"),
        ];
        assert_eq!(ids(&filter_tree(&nodes, "docs", &[])), vec!["1", "2", "4"]);
    }

    #[test]
    fn test_untitled_folder_contributes_empty_path_name() {
        let nodes = vec![BookmarkNode::Folder {
            id: "1".to_string(),
            title: None,
            children: Some(vec![BookmarkNode::bookmark("2", "Docs", "https://docs.example.com")]),
        }];
        let result = filter_tree(&nodes, "docs", &[]);
        assert_eq!(result[0].title(), None);
        assert_eq!(ids(result[0].children()), vec!["2"]);
    }

    #[test]
    fn test_input_is_untouched() {
        let nodes = work_and_news();
        let before = nodes.clone();
        let _ = filter_tree(&nodes, "mail", &[]);
        assert_eq!(nodes, before);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let nodes = vec![
            BookmarkNode::folder(
                "1",
                "Work",
                vec![
                    BookmarkNode::bookmark("2", "Email", "https://mail.example.com"),
                    BookmarkNode::folder(
                        "3",
                        "Archive",
                        vec![BookmarkNode::bookmark("4", "Old mail", "https://old.example.com")],
                    ),
                ],
            ),
            BookmarkNode::bookmark("5", "Webmail", "https://webmail.example.com"),
            BookmarkNode::bookmark("6", "News", "https://news.example.com"),
        ];

        for query in ["mail", "work", "archive", "example", "nothing"] {
            let once = filter_tree(&nodes, query, &[]);
            let twice = filter_tree(&once, query, &[]);
            assert_eq!(once, twice, "query {:?}", query);
            assert!(no_empty_folders(&once), "query {:?}", query);
        }
    }

    #[test]
    fn test_normalize_query() {
        assert_eq!(normalize_query("  Work \t"), "work");
        assert_eq!(normalize_query("   "), "");
    }
}
