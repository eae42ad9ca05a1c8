/// View-model for the popup list panel
use crate::blocklist::BlockList;
use crate::entity::Entity;

/// Entries shown in the default (unsearched) view.
pub const RECENT_LIMIT: usize = 3;

/// What the popup should render for a given list and search term.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewPlan<E> {
    /// Nothing blocked yet.
    Empty,
    /// Default view: the newest entries, capped at [`RECENT_LIMIT`], with the
    /// full count attached when the cap truncated the list.
    Recent {
        entries: Vec<E>,
        total: Option<usize>,
    },
    /// Search hits, newest first, uncapped.
    Matches(Vec<E>),
    /// A search term that matched nothing.
    NoMatches,
}

/// Compute the popup view for `search` over `list`. Matching is a
/// case-insensitive substring test against the display label.
pub fn plan<E: Entity>(list: &BlockList<E>, search: &str) -> ViewPlan<E> {
    if list.is_empty() {
        return ViewPlan::Empty;
    }

    let newest_first = list.newest_first();
    let term = search.trim();

    if term.is_empty() {
        let total = (newest_first.len() > RECENT_LIMIT).then_some(newest_first.len());
        return ViewPlan::Recent {
            entries: newest_first.into_iter().take(RECENT_LIMIT).collect(),
            total,
        };
    }

    let needle = term.to_lowercase();
    let matches: Vec<E> = newest_first
        .into_iter()
        .filter(|entry| entry.label().to_lowercase().contains(&needle))
        .collect();

    if matches.is_empty() {
        ViewPlan::NoMatches
    } else {
        ViewPlan::Matches(matches)
    }
}
