use std::process::Command;

/// Repository fallback when neither the CLI nor the config file names one:
/// the owner/name parsed from the `origin` remote of the current directory.
pub fn get_current_repo() -> Option<(String, String)> {
    let output = Command::new("git")
        .args(["remote", "get-url", "origin"])
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let url = String::from_utf8_lossy(&output.stdout).trim().to_string();
    parse_github_url(&url)
}

pub fn parse_github_url(url: &str) -> Option<(String, String)> {
    // Handle SSH: git@github.com:owner/repo.git
    if url.starts_with("git@github.com:") {
        let path = url.strip_prefix("git@github.com:")?;
        let path = path.strip_suffix(".git").unwrap_or(path);
        let parts: Vec<&str> = path.split('/').collect();
        if parts.len() >= 2 {
            return Some((parts[0].to_string(), parts[1].to_string()));
        }
    }

    // Handle HTTPS: https://github.com/owner/repo.git
    if url.contains("github.com") {
        let path = url.split("github.com").nth(1)?;
        let path = path.trim_start_matches('/').trim_start_matches(':');
        let path = path.strip_suffix(".git").unwrap_or(path);
        let parts: Vec<&str> = path.split('/').collect();
        if parts.len() >= 2 {
            return Some((parts[0].to_string(), parts[1].to_string()));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::parse_github_url;

    #[test]
    fn parses_ssh_remote() {
        assert_eq!(
            parse_github_url("git@github.com:octo-org/widgets.git"),
            Some(("octo-org".to_string(), "widgets".to_string()))
        );
    }

    #[test]
    fn parses_https_remote_with_and_without_suffix() {
        assert_eq!(
            parse_github_url("https://github.com/octo-org/widgets.git"),
            Some(("octo-org".to_string(), "widgets".to_string()))
        );
        assert_eq!(
            parse_github_url("https://github.com/octo-org/widgets"),
            Some(("octo-org".to_string(), "widgets".to_string()))
        );
    }

    #[test]
    fn rejects_non_github_remote() {
        assert_eq!(parse_github_url("https://gitlab.com/octo-org/widgets"), None);
        assert_eq!(parse_github_url("git@github.com:widgets.git"), None);
    }
}
