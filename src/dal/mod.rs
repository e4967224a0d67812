pub mod job_results_csv;
