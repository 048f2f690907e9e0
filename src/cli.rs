// src/cli.rs
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};

use crate::config::ConfigOverrides;
use crate::core::JobOutcome;
use crate::provider::{HrRelatedJobPositionsProvider, PUBLISHED_FILE_NAME};
use crate::service::HrRelatedJobPositionsService;
use crate::types::SharpApiJob;

#[derive(Parser)]
#[command(name = "sharpapi-hr-related-job-positions")]
#[command(about = "Find job positions related to a given one using SharpAPI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub settings: SettingsArgs,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,
}

#[derive(Args, Default)]
pub struct SettingsArgs {
    /// YAML settings file; defaults to config/sharpapi-hr-related-job-positions.yaml when present
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true)]
    pub api_key: Option<String>,

    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Seconds between job status checks
    #[arg(long, global = true)]
    pub polling_interval: Option<u64>,

    /// Seconds to keep polling before giving up
    #[arg(long, global = true)]
    pub polling_wait: Option<u64>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Write the default settings file
    PublishConfig {
        #[arg(long, default_value = "config")]
        dir: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Submit a job and print its status URL
    Submit(JobArgs),
    /// Poll a status URL until the job resolves
    Fetch { status_url: String },
    /// Submit a job and wait for its result
    Related(JobArgs),
}

#[derive(Args)]
pub struct JobArgs {
    /// Job position name, e.g. "Software Engineer"
    pub job_position_name: String,

    #[arg(long)]
    pub language: Option<String>,

    #[arg(long)]
    pub max_quantity: Option<u32>,
}

impl SettingsArgs {
    /// Defaults < settings file < SHARP_API_* variables < command line
    pub fn overrides(&self) -> Result<ConfigOverrides> {
        let env = ConfigOverrides::from_env().context("Invalid SHARP_API_* environment")?;
        self.overrides_with_env(env)
    }

    /// Same layering with the environment layer supplied by the caller
    pub fn overrides_with_env(&self, env: ConfigOverrides) -> Result<ConfigOverrides> {
        let file = match &self.config {
            Some(path) => ConfigOverrides::from_yaml_file(path)
                .with_context(|| format!("Failed to load settings from {}", path.display()))?,
            None => {
                let default_path = PathBuf::from("config").join(PUBLISHED_FILE_NAME);
                if default_path.exists() {
                    ConfigOverrides::from_yaml_file(&default_path).with_context(|| {
                        format!("Failed to load settings from {}", default_path.display())
                    })?
                } else {
                    ConfigOverrides::default()
                }
            }
        };

        let flags = ConfigOverrides {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            polling_interval_secs: self.polling_interval,
            polling_wait_secs: self.polling_wait,
            ..ConfigOverrides::default()
        };

        Ok(ConfigOverrides::defaults().layer(file).layer(env).layer(flags))
    }

    fn service(&self) -> Result<HrRelatedJobPositionsService> {
        let config = self
            .overrides()?
            .resolve()
            .context("Cannot build SharpAPI client")?;
        info!("Using SharpAPI at {}", config.base_url());
        HrRelatedJobPositionsService::new(config).context("Failed to create HTTP client")
    }
}

pub async fn handle_command(cli: Cli) -> Result<()> {
    match cli.command {
        Command::PublishConfig { dir, force } => {
            match HrRelatedJobPositionsProvider::new().publish(&dir, force)? {
                Some(path) => println!("Published {}", path.display()),
                None => println!(
                    "{} already exists, use --force to overwrite",
                    dir.join(PUBLISHED_FILE_NAME).display()
                ),
            }
        }

        Command::Submit(job) => {
            let service = cli.settings.service()?;
            let status_url = service
                .related_job_positions(
                    &job.job_position_name,
                    job.language.as_deref(),
                    job.max_quantity,
                )
                .await?;
            println!("{}", status_url);
        }

        Command::Fetch { status_url } => {
            let service = cli.settings.service()?;
            let outcome = service.fetch_results(&status_url).await?;
            print_outcome(outcome)?;
        }

        Command::Related(job) => {
            let service = cli.settings.service()?;
            let status_url = service
                .related_job_positions(
                    &job.job_position_name,
                    job.language.as_deref(),
                    job.max_quantity,
                )
                .await?;
            info!("Job submitted: {}", status_url);
            let outcome = service.fetch_results(&status_url).await?;
            print_outcome(outcome)?;
        }
    }

    Ok(())
}

fn print_outcome(outcome: JobOutcome) -> Result<()> {
    if let JobOutcome::Failed(job) | JobOutcome::Succeeded(job) = &outcome {
        print_job(job)?;
    }
    if let Err(e) = outcome.into_result() {
        error!("{}", e);
        return Err(e.into());
    }
    Ok(())
}

fn print_job(job: &SharpApiJob) -> Result<()> {
    let rendered = serde_json::to_string_pretty(&job.result).context("Failed to render result")?;
    println!("{}", rendered);
    Ok(())
}
