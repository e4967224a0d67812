pub mod email;
pub mod job_posting;
pub mod report;
pub mod search_query;
