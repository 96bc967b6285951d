use crate::data::{ExcludedAuthors, PullRequest};

/// Filter pull requests by author exclusion.
/// Returns the indices of retained PRs in their original order.
pub fn filter_prs(prs: &[PullRequest], excluded: &ExcludedAuthors) -> Vec<usize> {
    prs.iter()
        .enumerate()
        .filter(|(_, pr)| !excluded.contains(&pr.author.login))
        .map(|(idx, _)| idx)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Account, PrState};

    fn pr(number: u64, login: &str) -> PullRequest {
        PullRequest {
            id: number,
            number,
            title: format!("PR {}", number),
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
    fn excludes_by_author_login() {
        let prs = vec![pr(1, "alice"), pr(2, "bob"), pr(3, "carol")];
        let excluded = ExcludedAuthors::from_logins(["bob"]);
        let kept = filter_prs(&prs, &excluded);
        assert_eq!(kept, vec![0, 2]);
    }

    #[test]
    fn preserves_relative_order() {
        let prs = vec![pr(5, "eve"), pr(2, "alice"), pr(9, "eve"), pr(1, "bob")];
        let excluded = ExcludedAuthors::from_logins(["alice"]);
        let kept = filter_prs(&prs, &excluded);
        assert_eq!(kept, vec![0, 2, 3]);
    }

    #[test]
    fn empty_exclusion_keeps_everything() {
        let prs = vec![pr(1, "alice"), pr(2, "bob")];
        let kept = filter_prs(&prs, &ExcludedAuthors::default());
        assert_eq!(kept, vec![0, 1]);
    }

    #[test]
    fn is_idempotent_under_reapplication() {
        let prs = vec![pr(1, "alice"), pr(2, "bob"), pr(3, "alice")];
        let excluded = ExcludedAuthors::from_logins(["alice"]);
        let once = filter_prs(&prs, &excluded);
        let kept: Vec<PullRequest> = once.iter().map(|&i| prs[i].clone()).collect();
        let twice = filter_prs(&kept, &excluded);
        assert_eq!(twice, (0..kept.len()).collect::<Vec<_>>());
    }

    #[test]
    fn matching_is_exact_and_case_sensitive() {
        let prs = vec![pr(1, "Alice"), pr(2, "alice")];
        let excluded = ExcludedAuthors::from_logins(["alice"]);
        let kept = filter_prs(&prs, &excluded);
        assert_eq!(kept, vec![0]);
    }
}
