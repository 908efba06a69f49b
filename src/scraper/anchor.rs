use ::scraper::ElementRef;

use crate::error::{Result, XbshlError};

/// Maximum number of parent hops taken while looking for a player link.
pub(crate) const MAX_ASCENT_STEPS: usize = 15;

/// The minimal tree navigation needed to locate a roster entry's player link.
pub(crate) trait TreeNode: Clone {
    /// The enclosing element, if any.
    fn parent_node(&self) -> Option<Self>;

    /// The closest preceding sibling element, if any.
    fn previous_element(&self) -> Option<Self>;

    /// Hyperlinks below this node, in document order.
    fn links(&self) -> Vec<Self>;
}

impl<'a> TreeNode for ElementRef<'a> {
    fn parent_node(&self) -> Option<Self> {
        self.parent().and_then(ElementRef::wrap)
    }

    fn previous_element(&self) -> Option<Self> {
        self.prev_siblings().find_map(ElementRef::wrap)
    }

    fn links(&self) -> Vec<Self> {
        self.descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .filter(|e| e.value().name() == "a")
            .collect()
    }
}

/// Find the one hyperlink that belongs to `entry`.
///
/// Walks up from `entry` until some ancestor contains a link. A single link
/// is the answer. Several links mean the walk overshot into a container
/// holding other entries, so the search drops back to the node visited just
/// before the last hop and takes the first link of the element preceding it.
pub(crate) fn find_unique_anchor<N: TreeNode>(entry: &N) -> Result<N> {
    let mut previous = entry.clone();
    let mut current = entry.clone();
    let mut links = current.links();
    let mut steps = 0;

    while links.is_empty() {
        steps += 1;
        if steps > MAX_ASCENT_STEPS {
            return Err(XbshlError::structure(format!(
                "no player link within {MAX_ASCENT_STEPS} levels of roster entry"
            )));
        }
        let parent = current
            .parent_node()
            .ok_or_else(|| XbshlError::structure("reached document root without a player link"))?;
        previous = std::mem::replace(&mut current, parent);
        links = current.links();
    }

    if links.len() == 1 {
        return Ok(links.remove(0));
    }

    previous
        .previous_element()
        .and_then(|sibling| sibling.links().into_iter().next())
        .ok_or_else(|| {
            XbshlError::structure(format!(
                "{} links above roster entry and none in the preceding element",
                links.len()
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::scraper::{Html, Selector};

    /// An arena-backed tree, to exercise the search without any HTML.
    #[derive(Debug)]
    struct Arena {
        parents: Vec<Option<usize>>,
        previous: Vec<Option<usize>>,
        links: Vec<Vec<usize>>,
    }

    #[derive(Debug, Clone)]
    struct ArenaNode<'a> {
        arena: &'a Arena,
        index: usize,
    }

    impl<'a> ArenaNode<'a> {
        fn at(&self, index: usize) -> Self {
            ArenaNode {
                arena: self.arena,
                index,
            }
        }
    }

    impl<'a> TreeNode for ArenaNode<'a> {
        fn parent_node(&self) -> Option<Self> {
            self.arena.parents[self.index].map(|i| self.at(i))
        }

        fn previous_element(&self) -> Option<Self> {
            self.arena.previous[self.index].map(|i| self.at(i))
        }

        fn links(&self) -> Vec<Self> {
            self.arena.links[self.index]
                .iter()
                .map(|&i| self.at(i))
                .collect()
        }
    }

    /// A chain of `depth` nodes where only the root (index 0) has a link (index `depth`).
    fn chain(depth: usize) -> Arena {
        let mut parents = vec![None];
        parents.extend((0..depth - 1).map(Some));
        parents.push(Some(0));
        let mut links = vec![Vec::new(); depth + 1];
        links[0] = vec![depth];
        Arena {
            parents,
            previous: vec![None; depth + 1],
            links,
        }
    }

    #[test]
    fn test_ascent_within_bound_finds_link() {
        let arena = chain(MAX_ASCENT_STEPS + 1);
        let leaf = ArenaNode {
            arena: &arena,
            index: MAX_ASCENT_STEPS,
        };
        let anchor = find_unique_anchor(&leaf).unwrap();
        assert_eq!(anchor.index, MAX_ASCENT_STEPS + 1);
    }

    #[test]
    fn test_ascent_past_bound_is_structure_mismatch() {
        let arena = chain(MAX_ASCENT_STEPS + 2);
        let leaf = ArenaNode {
            arena: &arena,
            index: MAX_ASCENT_STEPS + 1,
        };
        let err = find_unique_anchor(&leaf).unwrap_err();
        assert!(matches!(err, XbshlError::StructureMismatch { .. }));
    }

    #[test]
    fn test_over_ascent_steps_back_to_previous_element() {
        // 0: container with links 4 and 5
        // 1: row holding link 4, 2: row holding the entry 3
        let arena = Arena {
            parents: vec![None, Some(0), Some(0), Some(2), Some(1), Some(0)],
            previous: vec![None, None, Some(1), None, None, None],
            links: vec![vec![4, 5], vec![4], vec![], vec![], vec![], vec![]],
        };
        let entry = ArenaNode {
            arena: &arena,
            index: 3,
        };
        assert_eq!(find_unique_anchor(&entry).unwrap().index, 4);
    }

    #[test]
    fn test_over_ascent_without_previous_element_fails() {
        let arena = Arena {
            parents: vec![None, Some(0)],
            previous: vec![None, None],
            links: vec![vec![0, 0], vec![]],
        };
        let entry = ArenaNode {
            arena: &arena,
            index: 1,
        };
        assert!(find_unique_anchor(&entry).is_err());
    }

    #[test]
    fn test_html_link_in_same_row() {
        let document = Html::parse_document(
            r#"<table><tr>
                <td><a href="?mode=player&player_id=7">Skater</a></td>
                <td id="entry">details</td>
            </tr></table>"#,
        );
        let selector = Selector::parse("td#entry").unwrap();
        let entry = document.select(&selector).next().unwrap();
        let anchor = find_unique_anchor(&entry).unwrap();
        assert_eq!(anchor.text().collect::<String>(), "Skater");
    }

    #[test]
    fn test_html_link_in_previous_row() {
        let document = Html::parse_document(
            r#"<table>
                <tr><td><a href="?a=1">First</a></td></tr>
                <tr><td id="first">details</td></tr>
                <tr><td><a href="?a=2">Second</a></td></tr>
                <tr><td id="second">details</td></tr>
            </table>"#,
        );
        let selector = Selector::parse("td#second").unwrap();
        let entry = document.select(&selector).next().unwrap();
        let anchor = find_unique_anchor(&entry).unwrap();
        assert_eq!(anchor.text().collect::<String>(), "Second");

        let selector = Selector::parse("td#first").unwrap();
        let entry = document.select(&selector).next().unwrap();
        let anchor = find_unique_anchor(&entry).unwrap();
        assert_eq!(anchor.text().collect::<String>(), "First");
    }
}
