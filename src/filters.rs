//! Relevance predicates applied to findings before they are kept.
//!
//! Both predicates are pure functions over a [`Finding`]: lowercase the
//! title + description and test for substring containment against fixed
//! keyword sets. No stemming or tokenization — matching stays deterministic
//! and reproducible across runs.

use crate::models::Finding;

/// Keywords that make a repository relevant.
const REPO_KEYWORDS: &[&str] = &[
    "agent",
    "autonomous",
    "llm",
    "language model",
    "assistant",
    "chatbot",
    "ai agent",
    "multi-agent",
];

/// Minimum stargazer count for a repository to be considered at all.
const MIN_STARS: u64 = 5;

/// A paper must mention agents prominently.
const PAPER_AGENT_TERMS: &[&str] = &["agent", "autonomous", "multi-agent", "agent-based"];

/// Pure-theory markers; papers containing any of these are rejected even
/// when they also match an agent term.
const PAPER_EXCLUDE_TERMS: &[&str] = &["theorem", "proof", "mathematical", "theoretical analysis"];

fn contains_any(text: &str, terms: &[&str]) -> bool {
    terms.iter().any(|term| text.contains(term))
}

/// Accept a repository finding iff it has at least [`MIN_STARS`] stars and
/// its title or description mentions an agent-related keyword.
pub fn is_relevant_repo(finding: &Finding) -> bool {
    if finding.stars.unwrap_or(0) < MIN_STARS {
        return false;
    }
    contains_any(&finding.haystack(), REPO_KEYWORDS)
}

/// Accept a paper finding iff it mentions agents and is not a pure-theory
/// paper. The exclusion check is a hard reject regardless of how strongly
/// the inclusion terms match.
pub fn is_relevant_paper(finding: &Finding) -> bool {
    let text = finding.haystack();

    if !contains_any(&text, PAPER_AGENT_TERMS) {
        return false;
    }
    if contains_any(&text, PAPER_EXCLUDE_TERMS) {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tests::{paper_finding, repo_finding};

    #[test]
    fn low_star_repos_are_rejected_regardless_of_keywords() {
        for stars in 0..MIN_STARS {
            let finding = repo_finding("autonomous-agent-toolkit", stars);
            assert!(!is_relevant_repo(&finding), "stars={stars}");
        }
    }

    #[test]
    fn starred_agent_repos_are_accepted() {
        let finding = repo_finding("agent-kit", 5);
        assert!(is_relevant_repo(&finding));
    }

    #[test]
    fn starred_repo_without_keywords_is_rejected() {
        let mut finding = repo_finding("dotfiles", 5000);
        finding.description = "my shell configuration".to_string();
        assert!(!is_relevant_repo(&finding));
    }

    #[test]
    fn keyword_match_is_case_insensitive() {
        let mut finding = repo_finding("toolkit", 100);
        finding.description = "An AUTONOMOUS assistant".to_string();
        assert!(is_relevant_repo(&finding));
    }

    #[test]
    fn papers_without_agent_terms_are_rejected() {
        let mut finding = paper_finding("On gradient descent");
        finding.description = "convergence rates for stochastic optimization".to_string();
        assert!(!is_relevant_paper(&finding));
    }

    #[test]
    fn agent_papers_are_accepted() {
        let finding = paper_finding("Multi-agent coordination in the wild");
        assert!(is_relevant_paper(&finding));
    }

    #[test]
    fn exclusion_dominates_inclusion() {
        let mut finding = paper_finding("A theorem about agent convergence");
        finding.description = "we prove a theorem about multi-agent systems".to_string();
        assert!(!is_relevant_paper(&finding));
    }
}
