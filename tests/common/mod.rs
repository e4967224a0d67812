use std::{collections::HashMap, path::Path};

use config::{Config, File, FileFormat};
use job_scout::configuration::{build_settings, Settings};
use mockito::{Matcher, Mock, ServerGuard};

/// Settings pointing the search at `endpoint` and the CSV at `output_dir`.
pub fn settings_for(endpoint: &str, output_dir: &Path, max_results: usize) -> Settings {
    let yaml = format!(
        r#"
search:
  role_keyword: "Angular developer"
  experience: "3.5 years"
  geography: "India"
  sites: ["naukri.com", "linkedin.com", "indeed.com"]
  endpoint: "{endpoint}"
  user_agent: "Mozilla/5.0"
  timeout_seconds: 15
  max_results: {max_results}
  extraction_strategy: "structured"
  experience_keywords: ["3 years", "3 yrs", "3+ years"]
  output_dir: "{output_dir}"
email:
  smtp_host: "127.0.0.1"
  smtp_port: 1
  timeout_seconds: 5
  subject: "Daily Angular Job Search Results"
"#,
        output_dir = output_dir.display()
    );

    let vars = HashMap::from([
        ("SMTP_USER", "me@example.com".to_string()),
        ("SMTP_PASS", "app-password".to_string()),
        ("EMAIL_TO", "you@example.com".to_string()),
    ]);

    build_settings(
        Config::builder().add_source(File::from_str(&yaml, FileFormat::Yaml)),
        |key| vars.get(key).cloned(),
    )
    .expect("Failed to build test settings")
}

pub fn result_container(title: &str, snippet: &str, link: &str) -> String {
    format!(
        r#"<div class="result results_links results_links_deep web-result">
  <div class="links_main links_deep result__body">
    <h2 class="result__title"><a rel="nofollow" class="result__a" href="{link}">{title}</a></h2>
    <div class="result__extras"><a class="result__url" href="{link}">{link}</a></div>
    <a class="result__snippet" href="{link}">{snippet}</a>
  </div>
</div>"#
    )
}

pub fn results_page(containers: &[String]) -> String {
    format!(
        r#"<!DOCTYPE html>
<html><head><title>Angular developer at DuckDuckGo</title></head>
<body>
<div class="serp__results"><div id="links" class="results">
{}
</div></div>
<div class="nav-link"><a href="https://duckduckgo.com/html/?q=next">Next</a></div>
</body></html>"#,
        containers.join("\n")
    )
}

pub async fn mock_results(server: &mut ServerGuard, status: usize, body: &str) -> Mock {
    server
        .mock("GET", "/html/")
        .match_query(Matcher::Any)
        .with_status(status)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(body)
        .create_async()
        .await
}
