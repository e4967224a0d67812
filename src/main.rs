use anyhow::Context;
use chrono::Local;
use env_logger::Env;
use job_scout::{configuration::get_configuration, startup::run};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let started_at = Local::now();
    println!(
        "Running search at {}",
        started_at.format("%Y-%m-%dT%H:%M:%S%.6f")
    );

    let configuration = get_configuration().context("Failed to read configuration.")?;

    let digest = run(&configuration, started_at.date_naive()).await?;
    if let Some(path) = &digest.attachment {
        log::info!("Results saved to {}", path.display());
    }

    println!("Email sent!");
    Ok(())
}
