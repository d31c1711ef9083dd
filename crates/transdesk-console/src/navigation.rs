//! Top navigation items.

use serde::Serialize;

/// A link in the top navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
}

pub const NAV_ITEMS: [NavItem; 3] = [
    NavItem {
        label: "Home",
        path: "/",
    },
    NavItem {
        label: "About",
        path: "/about",
    },
    NavItem {
        label: "Projects",
        path: "/projects",
    },
];

/// `/` is active only on an exact match; other items on a path prefix.
pub fn is_active(item_path: &str, current: &str) -> bool {
    if item_path == "/" {
        current == "/"
    } else {
        current.starts_with(item_path)
    }
}

/// Navigation items with their active flag for `current`.
pub fn nav_links(current: &str) -> Vec<(NavItem, bool)> {
    NAV_ITEMS
        .iter()
        .map(|item| (*item, is_active(item.path, current)))
        .collect()
}

/// One-line rendering, the active item in brackets.
pub fn render_nav(current: &str) -> String {
    nav_links(current)
        .into_iter()
        .map(|(item, active)| {
            if active {
                format!("[{}]", item.label)
            } else {
                item.label.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_matches_exactly() {
        assert!(is_active("/", "/"));
        assert!(!is_active("/", "/projects"));
    }

    #[test]
    fn test_prefix_match() {
        assert!(is_active("/projects", "/projects"));
        assert!(is_active("/projects", "/projects/p1"));
        assert!(!is_active("/projects", "/translations/p1"));
    }

    #[test]
    fn test_render_nav() {
        assert_eq!(render_nav("/projects/1"), "Home  About  [Projects]");
        assert_eq!(render_nav("/"), "[Home]  About  Projects");
    }
}
