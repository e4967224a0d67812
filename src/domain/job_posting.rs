/// One search hit. `title` is `None` for records from the link scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobPosting {
    pub title: Option<String>,
    pub snippet: String,
    pub link: String,
    pub experience_match: bool,
}

impl JobPosting {
    pub fn new(title: String, snippet: String, link: String) -> Self {
        JobPosting {
            title: Some(title),
            snippet,
            link,
            experience_match: false,
        }
    }

    pub fn link_only(link: String) -> Self {
        JobPosting {
            title: None,
            snippet: String::new(),
            link,
            experience_match: false,
        }
    }
}

/// Flags postings whose title or snippet mentions one of `keywords`, ignoring case.
pub fn annotate_experience(postings: &mut [JobPosting], keywords: &[String]) {
    let keywords: Vec<String> = keywords
        .iter()
        .map(|kw| kw.to_lowercase())
        .filter(|kw| !kw.is_empty())
        .collect();

    for posting in postings.iter_mut() {
        let text = format!(
            "{} {}",
            posting.title.as_deref().unwrap_or_default(),
            posting.snippet
        )
        .to_lowercase();

        posting.experience_match = keywords.iter().any(|kw| text.contains(kw.as_str()));
    }
}

#[cfg(test)]
mod tests {
    use super::{annotate_experience, JobPosting};

    fn keywords() -> Vec<String> {
        vec!["3 years".into(), "3 yrs".into(), "3+ years".into()]
    }

    #[test]
    fn keyword_match_ignores_case() {
        let mut postings = vec![
            JobPosting::new(
                "Senior Angular Engineer".into(),
                "Needs 3+ Years Experience".into(),
                "https://example.com/1".into(),
            ),
            JobPosting::new(
                "ANGULAR DEV - 3 YRS".into(),
                String::new(),
                "https://example.com/2".into(),
            ),
            JobPosting::new(
                "Angular Developer".into(),
                "5 years of experience".into(),
                "https://example.com/3".into(),
            ),
        ];

        annotate_experience(&mut postings, &keywords());

        let flags: Vec<bool> = postings.iter().map(|p| p.experience_match).collect();
        assert_eq!(flags, vec![true, true, false]);
    }

    #[test]
    fn title_and_snippet_are_joined_with_a_space() {
        let mut postings = vec![JobPosting::new(
            "Lead with 3".into(),
            "years in Angular".into(),
            "https://example.com".into(),
        )];

        annotate_experience(&mut postings, &keywords());

        assert!(postings[0].experience_match);
    }

    #[test]
    fn link_only_postings_never_match() {
        let mut postings = vec![JobPosting::link_only(
            "https://example.com/3-years".into(),
        )];

        annotate_experience(&mut postings, &keywords());

        assert!(!postings[0].experience_match);
    }
}
