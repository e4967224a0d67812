use itertools::Itertools;

use crate::configuration::SearchSettings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// `<role> <experience> <geography> (site:a OR site:b ...)`
pub fn build_job_search_query(settings: &SearchSettings) -> SearchQuery {
    let site_clause = settings
        .sites
        .iter()
        .map(|site| site.trim())
        .filter(|site| !site.is_empty())
        .map(|site| format!("site:{}", site))
        .join(" OR ");

    let query = [
        settings.role_keyword.trim(),
        settings.experience.trim(),
        settings.geography.trim(),
    ]
    .into_iter()
    .filter(|part| !part.is_empty())
    .join(" ");

    match site_clause.is_empty() {
        true => SearchQuery(query),
        false => SearchQuery(format!("{} ({})", query, site_clause)),
    }
}
