use nucleo_matcher::{
    pattern::{CaseMatching, Normalization, Pattern},
    Matcher,
};

use crate::data::PullRequest;

/// Narrow an already-filtered index set with fuzzy matching.
/// Returns a subset of `indices`, sorted by match score (best first).
pub fn search_prs(prs: &[PullRequest], indices: &[usize], query: &str) -> Vec<usize> {
    if query.is_empty() {
        return indices.to_vec();
    }

    let mut matcher = Matcher::new(nucleo_matcher::Config::DEFAULT);
    let pattern = Pattern::parse(query, CaseMatching::Ignore, Normalization::Smart);

    // Build (index, haystack) pairs for the visible subset only, so search
    // can never resurface an excluded author's PR.
    let haystacks: Vec<(usize, String)> = indices
        .iter()
        .filter_map(|&idx| prs.get(idx).map(|pr| (idx, pr)))
        .map(|(idx, pr)| {
            (
                idx,
                format!("#{} {} {}", pr.number, pr.author.login, pr.title),
            )
        })
        .collect();

    let haystack_refs: Vec<&str> = haystacks.iter().map(|(_, s)| s.as_str()).collect();
    let matches = pattern.match_list(&haystack_refs, &mut matcher);

    matches
        .into_iter()
        .filter_map(|(haystack, _score)| {
            haystacks
                .iter()
                .find(|(_, s)| s.as_str() == *haystack)
                .map(|&(idx, _)| idx)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Account, PrState};

    fn pr(number: u64, login: &str, title: &str) -> PullRequest {
        PullRequest {
            id: number,
            number,
            title: title.to_string(),
            author: Account {
                login: login.to_string(),
                avatar_url: None,
            },
            html_url: format!("https://github.com/o/r/pull/{}", number),
            created_at: "2025-01-01T00:00:00Z".to_string(),
            updated_at: "2025-01-02T00:00:00Z".to_string(),
            state: PrState::Open,
            labels: Vec::new(),
            assignees: Vec::new(),
            requested_reviewers: Vec::new(),
        }
    }

    #[test]
    fn empty_query_returns_input_unchanged() {
        let prs = vec![pr(1, "alice", "Fix parser"), pr(2, "bob", "Add docs")];
        assert_eq!(search_prs(&prs, &[1], ""), vec![1]);
    }

    #[test]
    fn narrows_by_title() {
        let prs = vec![
            pr(1, "alice", "Fix parser crash"),
            pr(2, "bob", "Add documentation"),
            pr(3, "carol", "Parser cleanup"),
        ];
        let hits = search_prs(&prs, &[0, 1, 2], "parser");
        assert_eq!(hits.len(), 2);
        assert!(hits.contains(&0));
        assert!(hits.contains(&2));
    }

    #[test]
    fn never_returns_indices_outside_the_visible_subset() {
        let prs = vec![
            pr(1, "alice", "Fix parser crash"),
            pr(2, "bob", "Parser rewrite"),
        ];
        // index 1 is hidden (excluded author); "parser" must not revive it
        let hits = search_prs(&prs, &[0], "parser");
        assert_eq!(hits, vec![0]);
    }
}
