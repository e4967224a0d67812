use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;

use crate::{configuration::ExtractionStrategy, domain::job_posting::JobPosting, error::ScoutError};

#[derive(Serialize)]
struct PostingRow<'a> {
    title: &'a str,
    snippet: &'a str,
    link: &'a str,
    experience_match: bool,
}

#[derive(Serialize)]
struct LinkRow<'a> {
    link: &'a str,
}

/// `job_results_<YYYYMMDD>.csv`. Same-day runs share a name and overwrite.
pub fn results_file_name(run_date: NaiveDate) -> String {
    format!("job_results_{}.csv", run_date.format("%Y%m%d"))
}

pub fn results_file_path(output_dir: &Path, run_date: NaiveDate) -> PathBuf {
    output_dir.join(results_file_name(run_date))
}

pub fn save_job_results(
    postings: &[JobPosting],
    strategy: ExtractionStrategy,
    path: &Path,
) -> Result<(), ScoutError> {
    let mut writer = csv::Writer::from_path(path)?;

    for posting in postings {
        match strategy {
            ExtractionStrategy::Structured => writer.serialize(PostingRow {
                title: posting.title.as_deref().unwrap_or_default(),
                snippet: &posting.snippet,
                link: &posting.link,
                experience_match: posting.experience_match,
            })?,
            ExtractionStrategy::LinkScan => writer.serialize(LinkRow {
                link: &posting.link,
            })?,
        }
    }

    // Headers are only emitted with the first row.
    if postings.is_empty() {
        match strategy {
            ExtractionStrategy::Structured => {
                writer.write_record(["title", "snippet", "link", "experience_match"])?
            }
            ExtractionStrategy::LinkScan => writer.write_record(["link"])?,
        }
    }

    writer.flush()?;
    log::info!("Wrote {} rows to {}", postings.len(), path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        title: String,
        snippet: String,
        link: String,
        experience_match: bool,
    }

    fn postings() -> Vec<JobPosting> {
        vec![
            JobPosting {
                title: Some("Angular Developer, Pune".into()),
                snippet: "Needs \"3 years\"\nof Angular".into(),
                link: "https://www.naukri.com/job-1".into(),
                experience_match: true,
            },
            JobPosting {
                title: Some("Frontend Engineer".into()),
                snippet: String::new(),
                link: "https://in.indeed.com/job-2?a=1,b=2".into(),
                experience_match: false,
            },
        ]
    }

    #[test]
    fn file_name_uses_run_date() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 7).unwrap();

        assert_eq!(results_file_name(date), "job_results_20261007.csv");
    }

    #[test]
    fn structured_rows_read_back_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");

        save_job_results(&postings(), ExtractionStrategy::Structured, &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(
            reader.headers().unwrap().iter().collect::<Vec<_>>(),
            vec!["title", "snippet", "link", "experience_match"]
        );
        let rows: Vec<Row> = reader.deserialize().map(|r| r.unwrap()).collect();
        let expected: Vec<Row> = postings()
            .into_iter()
            .map(|p| Row {
                title: p.title.unwrap(),
                snippet: p.snippet,
                link: p.link,
                experience_match: p.experience_match,
            })
            .collect();
        assert_eq!(rows, expected);
    }

    #[test]
    fn link_scan_rows_only_carry_links() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        let postings = vec![
            JobPosting::link_only("https://www.linkedin.com/jobs/1".into()),
            JobPosting::link_only("https://www.naukri.com/job-2".into()),
        ];

        save_job_results(&postings, ExtractionStrategy::LinkScan, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "link\nhttps://www.linkedin.com/jobs/1\nhttps://www.naukri.com/job-2\n"
        );
    }

    #[test]
    fn existing_file_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        std::fs::write(&path, "stale content that is much longer than the new file\n").unwrap();

        save_job_results(
            &[JobPosting::link_only("https://x.io".into())],
            ExtractionStrategy::LinkScan,
            &path,
        )
        .unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "link\nhttps://x.io\n");
    }

    #[test]
    fn unwritable_destination_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("results.csv");

        let result = save_job_results(&postings(), ExtractionStrategy::Structured, &path);

        assert!(matches!(result, Err(ScoutError::Csv(_)) | Err(ScoutError::Io(_))));
    }
}
