use super::job_posting::JobPosting;

pub const NO_RESULTS_MESSAGE: &str = "No job results found today.";
pub const REPORT_HEADER: &str = "Today's job search results:";

pub fn format_report(postings: &[JobPosting]) -> String {
    if postings.is_empty() {
        return NO_RESULTS_MESSAGE.to_string();
    }

    let blocks: Vec<String> = postings
        .iter()
        .enumerate()
        .map(|(i, posting)| format_posting(i + 1, posting))
        .collect();

    format!("{}\n\n{}", REPORT_HEADER, blocks.join("\n\n"))
}

fn format_posting(index: usize, posting: &JobPosting) -> String {
    let Some(title) = posting.title.as_deref() else {
        return format!("{}. {}", index, posting.link);
    };

    let mut lines = vec![
        format!("{}. {}", index, title),
        format!(
            "   Experience match: {}",
            match posting.experience_match {
                true => "Yes",
                false => "No",
            }
        ),
    ];
    if !posting.snippet.is_empty() {
        lines.push(format!("   {}", posting.snippet));
    }
    lines.push(format!("   {}", posting.link));

    lines.join("\n")
}
