use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::{
    configuration::Settings,
    dal::job_results_csv::{results_file_path, save_job_results},
    domain::{
        job_posting::{annotate_experience, JobPosting},
        report::format_report,
        search_query::build_job_search_query,
    },
    error::ScoutError,
    services::{extractor_for, Mailer, SearchClient},
};

/// Everything a run produces before the email goes out.
#[derive(Debug)]
pub struct Digest {
    pub postings: Vec<JobPosting>,
    pub body: String,
    pub attachment: Option<PathBuf>,
}

pub async fn collect_digest(settings: &Settings, run_date: NaiveDate) -> Result<Digest, ScoutError> {
    let query = build_job_search_query(&settings.search);
    let client = SearchClient::new(&settings.search)?;
    let page_source = client.fetch(&query).await?;

    let extracted = extractor_for(&settings.search)
        .and_then(|extractor| extractor.extract(&page_source, settings.search.max_results));
    let mut postings = match extracted {
        Ok(postings) => postings,
        Err(ScoutError::Parse(reason)) => {
            log::warn!("Treating unparseable results page as empty: {}", reason);
            vec![]
        }
        Err(e) => return Err(e),
    };
    annotate_experience(&mut postings, &settings.search.experience_keywords);

    log::info!(
        "Found {} postings, {} mention the targeted experience",
        postings.len(),
        postings.iter().filter(|p| p.experience_match).count()
    );

    let body = format_report(&postings);

    let attachment = match postings.is_empty() {
        true => None,
        false => {
            let path = results_file_path(Path::new(&settings.search.output_dir), run_date);
            save_job_results(&postings, settings.search.extraction_strategy, &path)?;
            Some(path)
        }
    };

    Ok(Digest {
        postings,
        body,
        attachment,
    })
}

/// search -> extract -> annotate -> report -> csv -> email
pub async fn run(settings: &Settings, run_date: NaiveDate) -> Result<Digest, ScoutError> {
    let digest = collect_digest(settings, run_date).await?;

    Mailer::new(&settings.email)
        .send(
            &settings.email.subject,
            &digest.body,
            digest.attachment.as_deref(),
        )
        .await?;

    Ok(digest)
}
