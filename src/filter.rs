// src/filter.rs
// Client-side filtering and pagination over the fetched problem collection.
// Pure view-model logic: every function here recomputes from its inputs, so
// it is safe to call on every keystroke and every redraw.

use std::collections::BTreeSet;

use crate::models::{Difficulty, Problem, User};

/// Fixed page size of the problem table.
pub const ITEMS_PER_PAGE: usize = 10;

/// Difficulty predicate. `All` applies no constraint on this dimension; a
/// concrete value demands an exact match. Being an enum variant, the
/// no-constraint sentinel can never collide with a real difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DifficultyFilter {
    #[default]
    All,
    Only(Difficulty),
}

impl DifficultyFilter {
    /// Steps All -> Easy -> Medium -> Hard -> All, for the cycling affordance.
    pub fn cycle(&self) -> Self {
        match self {
            DifficultyFilter::All => DifficultyFilter::Only(Difficulty::Easy),
            DifficultyFilter::Only(Difficulty::Easy) => DifficultyFilter::Only(Difficulty::Medium),
            DifficultyFilter::Only(Difficulty::Medium) => DifficultyFilter::Only(Difficulty::Hard),
            DifficultyFilter::Only(Difficulty::Hard) => DifficultyFilter::All,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DifficultyFilter::All => "All",
            DifficultyFilter::Only(difficulty) => difficulty.label(),
        }
    }
}

/// Tag predicate. `All` applies no constraint; `Tag` demands membership in
/// the problem's tag list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TagFilter {
    #[default]
    All,
    Tag(String),
}

impl TagFilter {
    /// Steps All -> first tag -> ... -> last tag -> All over the tag
    /// universe. A selected tag that vanished from the universe (the last
    /// problem carrying it was deleted) steps back to All.
    pub fn cycle(&self, universe: &[String]) -> Self {
        match self {
            TagFilter::All => match universe.first() {
                Some(tag) => TagFilter::Tag(tag.clone()),
                None => TagFilter::All,
            },
            TagFilter::Tag(current) => match universe.iter().position(|tag| tag == current) {
                Some(index) => match universe.get(index + 1) {
                    Some(next) => TagFilter::Tag(next.clone()),
                    None => TagFilter::All,
                },
                None => TagFilter::All,
            },
        }
    }

    pub fn label(&self) -> &str {
        match self {
            TagFilter::All => "All",
            TagFilter::Tag(tag) => tag,
        }
    }
}

/// The three independent predicates the table is filtered by.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    pub search: String,
    pub difficulty: DifficultyFilter,
    pub tag: TagFilter,
}

impl FilterCriteria {
    fn matches(&self, problem: &Problem, search_lower: &str) -> bool {
        if !search_lower.is_empty() && !problem.title.to_lowercase().contains(search_lower) {
            return false;
        }
        if let DifficultyFilter::Only(difficulty) = self.difficulty {
            if problem.difficulty != difficulty {
                return false;
            }
        }
        if let TagFilter::Tag(tag) = &self.tag {
            if !problem.tags.iter().any(|t| t == tag) {
                return false;
            }
        }
        true
    }
}

/// All distinct tags across the collection, duplicates collapsed. Sorted so
/// the cycling affordance walks a stable order.
pub fn tag_universe(problems: &[Problem]) -> Vec<String> {
    let set: BTreeSet<&String> = problems.iter().flat_map(|p| p.tags.iter()).collect();
    set.into_iter().cloned().collect()
}

/// Applies all three predicates, preserving the input order. Never allocates
/// more than the input holds and never fails: a malformed (empty) collection
/// degrades to an empty result.
pub fn filter_problems<'a>(problems: &'a [Problem], criteria: &FilterCriteria) -> Vec<&'a Problem> {
    let search_lower = criteria.search.to_lowercase();
    problems
        .iter()
        .filter(|problem| criteria.matches(problem, &search_lower))
        .collect()
}

/// Whether the given user has solved this problem. Anonymous visitors have
/// solved nothing.
pub fn is_solved(problem: &Problem, user: Option<&User>) -> bool {
    match user {
        Some(user) => problem.solved_by.iter().any(|r| r.user_id == user.id),
        None => false,
    }
}

/// 1-based page cursor over a filtered sequence. The cursor itself holds no
/// reference to the data; callers re-derive the slice after every filter or
/// collection change and re-clamp via [`PageState::clamp_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    current: usize,
}

impl Default for PageState {
    fn default() -> Self {
        PageState { current: 1 }
    }
}

impl PageState {
    pub fn current(&self) -> usize {
        self.current
    }

    /// Zero items means zero pages; the cursor is still displayed as page 1.
    pub fn total_pages(filtered_len: usize) -> usize {
        filtered_len.div_ceil(ITEMS_PER_PAGE)
    }

    /// The visible window of the filtered sequence. A cursor beyond the last
    /// page yields an empty slice rather than an error.
    pub fn page_slice<'a, T>(&self, filtered: &'a [T]) -> &'a [T] {
        let start = (self.current - 1) * ITEMS_PER_PAGE;
        if start >= filtered.len() {
            return &[];
        }
        let end = (start + ITEMS_PER_PAGE).min(filtered.len());
        &filtered[start..end]
    }

    pub fn can_prev(&self) -> bool {
        self.current > 1
    }

    pub fn can_next(&self, total_pages: usize) -> bool {
        self.current < total_pages
    }

    /// Steps back one page. No-op at the lower bound; returns whether the
    /// cursor moved so the caller can reset its row selection.
    pub fn prev(&mut self) -> bool {
        if self.can_prev() {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    /// Steps forward one page. No-op at the upper bound.
    pub fn next(&mut self, total_pages: usize) -> bool {
        if self.can_next(total_pages) {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Pulls the cursor back into `1..=max(total_pages, 1)`. Runs after every
    /// criteria change and every refresh so the cursor stays valid while the
    /// data shifts underneath it.
    pub fn clamp_to(&mut self, total_pages: usize) {
        self.current = self.current.min(total_pages.max(1));
    }

    /// Jumps straight to a page, clamped into range. Used by the headless CLI.
    pub fn jump_to(&mut self, page: usize, total_pages: usize) {
        self.current = page.max(1);
        self.clamp_to(total_pages);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, SolvedRecord};
    use uuid::Uuid;

    fn problem(title: &str, difficulty: Difficulty, tags: &[&str]) -> Problem {
        serde_json::from_value(serde_json::json!({
            "id": Uuid::new_v4(),
            "title": title,
            "difficulty": difficulty.as_key(),
            "tags": tags,
        }))
        .unwrap()
    }

    fn collection() -> Vec<Problem> {
        vec![
            problem("Two Sum", Difficulty::Easy, &["array", "hash-table"]),
            problem("Edit Distance", Difficulty::Hard, &["dp", "string"]),
            problem("Course Schedule", Difficulty::Medium, &["graph", "dfs"]),
            problem("Coin Change", Difficulty::Medium, &["dp", "array"]),
        ]
    }

    #[test]
    fn default_criteria_pass_everything_through() {
        let problems = collection();
        let filtered = filter_problems(&problems, &FilterCriteria::default());
        assert_eq!(filtered.len(), problems.len());
        // Input order is preserved.
        assert_eq!(filtered[0].title, "Two Sum");
        assert_eq!(filtered[3].title, "Coin Change");
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let problems = collection();
        let criteria = FilterCriteria {
            search: "eDiT".to_string(),
            ..Default::default()
        };
        let filtered = filter_problems(&problems, &criteria);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "Edit Distance");
    }

    #[test]
    fn predicates_conjoin_and_never_grow_the_result() {
        let problems = collection();
        let criteria = FilterCriteria {
            search: "c".to_string(),
            difficulty: DifficultyFilter::Only(Difficulty::Medium),
            tag: TagFilter::Tag("dp".to_string()),
        };
        let filtered = filter_problems(&problems, &criteria);
        assert!(filtered.len() <= problems.len());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "Coin Change");
        for p in &filtered {
            assert!(p.title.to_lowercase().contains('c'));
            assert_eq!(p.difficulty, Difficulty::Medium);
            assert!(p.tags.iter().any(|t| t == "dp"));
        }
    }

    #[test]
    fn all_sentinel_is_a_strict_noop_on_its_dimension() {
        let problems = collection();
        let unconstrained = filter_problems(&problems, &FilterCriteria::default());
        let with_all = filter_problems(
            &problems,
            &FilterCriteria {
                difficulty: DifficultyFilter::All,
                tag: TagFilter::All,
                ..Default::default()
            },
        );
        assert_eq!(unconstrained.len(), with_all.len());
        // Any concrete difficulty narrows or keeps the result.
        for difficulty in Difficulty::ALL {
            let narrowed = filter_problems(
                &problems,
                &FilterCriteria {
                    difficulty: DifficultyFilter::Only(difficulty),
                    ..Default::default()
                },
            );
            assert!(narrowed.len() <= unconstrained.len());
        }
    }

    #[test]
    fn tag_universe_collapses_duplicates_sorted() {
        let problems = collection();
        let universe = tag_universe(&problems);
        assert_eq!(
            universe,
            vec!["array", "dfs", "dp", "graph", "hash-table", "string"]
        );
    }

    #[test]
    fn tag_filter_cycles_through_the_universe_and_back() {
        let universe = vec!["array".to_string(), "dp".to_string()];
        let mut filter = TagFilter::All;
        filter = filter.cycle(&universe);
        assert_eq!(filter, TagFilter::Tag("array".to_string()));
        filter = filter.cycle(&universe);
        assert_eq!(filter, TagFilter::Tag("dp".to_string()));
        filter = filter.cycle(&universe);
        assert_eq!(filter, TagFilter::All);
        // A vanished tag steps back to All instead of sticking.
        let stale = TagFilter::Tag("gone".to_string());
        assert_eq!(stale.cycle(&universe), TagFilter::All);
    }

    #[test]
    fn pagination_slices_and_clamps() {
        let items: Vec<u32> = (0..23).collect();
        let mut page = PageState::default();
        assert_eq!(PageState::total_pages(23), 3);
        assert_eq!(page.page_slice(&items), &items[0..10]);

        assert!(page.next(3));
        assert_eq!(page.page_slice(&items), &items[10..20]);
        assert!(page.next(3));
        assert_eq!(page.page_slice(&items), &items[20..23]);

        // Out-of-range cursor yields an empty slice, never a panic.
        let mut far = PageState::default();
        far.jump_to(9, PageState::total_pages(3));
        assert_eq!(far.current(), 1);
        let beyond = PageState { current: 9 };
        assert!(beyond.page_slice(&items).is_empty());
    }

    #[test]
    fn page_changes_are_noops_at_both_bounds() {
        let mut page = PageState::default();
        assert!(!page.prev());
        assert_eq!(page.current(), 1);

        page.jump_to(3, 3);
        assert!(!page.next(3));
        assert_eq!(page.current(), 3);
        assert!(!page.can_next(3));
        assert!(page.can_prev());
    }

    #[test]
    fn empty_collection_has_zero_pages_but_displays_page_one() {
        let items: Vec<u32> = Vec::new();
        let mut page = PageState::default();
        assert_eq!(PageState::total_pages(0), 0);
        page.clamp_to(0);
        assert_eq!(page.current(), 1);
        assert!(page.page_slice(&items).is_empty());
        assert!(!page.can_next(0));
        assert!(!page.can_prev());
    }

    #[test]
    fn solved_status_requires_a_matching_user() {
        let solver = Uuid::new_v4();
        let mut p = problem("Two Sum", Difficulty::Easy, &["array"]);
        p.solved_by = vec![SolvedRecord { user_id: solver }];

        let user = User {
            id: solver,
            name: None,
            email: None,
            role: Role::User,
        };
        let stranger = User {
            id: Uuid::new_v4(),
            ..user.clone()
        };
        assert!(is_solved(&p, Some(&user)));
        assert!(!is_solved(&p, Some(&stranger)));
        assert!(!is_solved(&p, None));
    }

    #[test]
    fn twenty_three_problems_end_to_end() {
        // 23 problems, 4 of them hard: page 1 of 3 unfiltered, then a HARD
        // filter collapses to a single auto-valid page.
        let mut problems = Vec::new();
        for i in 0..23 {
            let difficulty = if i < 4 {
                Difficulty::Hard
            } else {
                Difficulty::Easy
            };
            problems.push(problem(&format!("Problem {i}"), difficulty, &["misc"]));
        }

        let mut page = PageState::default();
        let criteria = FilterCriteria::default();
        let filtered = filter_problems(&problems, &criteria);
        let total = PageState::total_pages(filtered.len());
        assert_eq!(total, 3);
        assert_eq!(page.page_slice(&filtered).len(), 10);

        page.jump_to(3, total);
        let criteria = FilterCriteria {
            difficulty: DifficultyFilter::Only(Difficulty::Hard),
            ..Default::default()
        };
        let filtered = filter_problems(&problems, &criteria);
        let total = PageState::total_pages(filtered.len());
        assert_eq!(total, 1);
        page.clamp_to(total);
        assert_eq!(page.current(), 1);
        assert_eq!(page.page_slice(&filtered).len(), 4);
        assert!(!page.can_next(total));
    }
}
