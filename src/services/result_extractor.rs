use itertools::Itertools;
use scraper::{ElementRef, Html, Selector};

use crate::{
    configuration::{ExtractionStrategy, SearchSettings},
    domain::job_posting::JobPosting,
    error::ScoutError,
};

/// Turns a search result page into at most `max_results` postings, in page order.
pub trait ExtractResultCandidates {
    fn extract(&self, page_source: &str, max_results: usize)
        -> Result<Vec<JobPosting>, ScoutError>;
}

pub fn extractor_for(
    settings: &SearchSettings,
) -> Result<Box<dyn ExtractResultCandidates>, ScoutError> {
    match settings.extraction_strategy {
        ExtractionStrategy::Structured => Ok(Box::new(StructuredExtractor::new(
            &settings.selectors.container,
            &settings.selectors.title_link,
            &settings.selectors.snippet,
        )?)),
        ExtractionStrategy::LinkScan => {
            Ok(Box::new(LinkScanExtractor::new(settings.engine_domain())))
        }
    }
}

pub struct StructuredExtractor {
    container: Selector,
    title_link: Selector,
    snippet: Selector,
}

impl StructuredExtractor {
    pub fn new(container: &str, title_link: &str, snippet: &str) -> Result<Self, ScoutError> {
        Ok(StructuredExtractor {
            container: parse_selector(container)?,
            title_link: parse_selector(title_link)?,
            snippet: parse_selector(snippet)?,
        })
    }

    fn posting_from_container(&self, container: ElementRef) -> Option<JobPosting> {
        let title_link = container.select(&self.title_link).next()?;
        let link = title_link.value().attr("href")?;

        let snippet = container
            .select(&self.snippet)
            .next()
            .map(collapsed_text)
            .unwrap_or_default();

        Some(JobPosting::new(
            collapsed_text(title_link),
            snippet,
            link.to_string(),
        ))
    }
}

impl ExtractResultCandidates for StructuredExtractor {
    fn extract(
        &self,
        page_source: &str,
        max_results: usize,
    ) -> Result<Vec<JobPosting>, ScoutError> {
        let html_document = Html::parse_document(page_source);

        let postings: Vec<JobPosting> = html_document
            .select(&self.container)
            .filter_map(|container| self.posting_from_container(container))
            .take(max_results)
            .collect();

        log::info!("Extracted {} result containers", postings.len());

        Ok(postings)
    }
}

/// Legacy scan over raw `href="` attributes. Sensitive to markup order,
/// keeps absolute links that do not point back at the engine itself.
pub struct LinkScanExtractor {
    engine_domain: String,
}

impl LinkScanExtractor {
    pub fn new(engine_domain: String) -> Self {
        LinkScanExtractor { engine_domain }
    }
}

impl ExtractResultCandidates for LinkScanExtractor {
    fn extract(
        &self,
        page_source: &str,
        max_results: usize,
    ) -> Result<Vec<JobPosting>, ScoutError> {
        let postings: Vec<JobPosting> = page_source
            .split("href=\"")
            .skip(1)
            .filter_map(|token| token.split('"').next())
            .filter(|link| link.starts_with("http"))
            .filter(|link| self.engine_domain.is_empty() || !link.contains(&self.engine_domain))
            .take(max_results)
            .map(|link| JobPosting::link_only(link.to_string()))
            .collect();

        log::info!("Scanned {} links from raw markup", postings.len());

        Ok(postings)
    }
}

fn parse_selector(selector: &str) -> Result<Selector, ScoutError> {
    Selector::parse(selector)
        .map_err(|e| ScoutError::Parse(format!("invalid selector {}: {:?}", selector, e)))
}

fn collapsed_text(element: ElementRef) -> String {
    element
        .text()
        .flat_map(|chunk| chunk.split_whitespace())
        .join(" ")
}
