use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncWriteExt, BufReader};

use casewright::{
    AppConfig, ChatExit, ConfigArgs, GENERATED_NOTICE, PipelineError, RefinementSession,
    RuntimeBundle, SessionState, build_runtime, extract_file, init_tracing, run_chat,
};

const GENERATING_NOTICE: &str = "Generating test cases from the provided documents...\n";

#[derive(Debug, Parser)]
#[command(name = "casewright", version, about)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a traceable test case table from user stories and specifications
    Generate {
        #[arg(long, value_name = "FILE")]
        user_stories: PathBuf,
        #[arg(long, value_name = "FILE")]
        spec: PathBuf,
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
        /// Reject step outputs that are not well-formed markdown tables
        #[arg(long)]
        strict: bool,
    },
    /// Revise an existing test case table according to a request
    Refine {
        #[arg(long, value_name = "FILE")]
        tests: PathBuf,
        #[arg(long)]
        request: String,
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
        /// Reject step outputs that are not well-formed markdown tables
        #[arg(long)]
        strict: bool,
    },
    /// Generate, then refine interactively from stdin until `/quit`
    Chat {
        #[arg(long, value_name = "FILE")]
        user_stories: PathBuf,
        #[arg(long, value_name = "FILE")]
        spec: PathBuf,
        /// Reject step outputs that are not well-formed markdown tables
        #[arg(long)]
        strict: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = AppConfig::from_args(cli.config, |name| std::env::var(name).ok())
        .context("invalid configuration")?;
    tracing::debug!(?config, "configuration resolved");

    match cli.command {
        Command::Generate {
            user_stories,
            spec,
            out,
            strict,
        } => {
            let runtime = build_runtime(&config, strict).context("failed to build provider")?;
            let mut state =
                SessionState::generate(read_document(&user_stories)?, read_document(&spec)?);
            run_pipeline(&runtime, &mut state).await?;
            write_table(out.as_deref(), &state.final_tests).await
        }
        Command::Refine {
            tests,
            request,
            out,
            strict,
        } => {
            let runtime = build_runtime(&config, strict).context("failed to build provider")?;
            let mut state = SessionState::refine(read_document(&tests)?, request);
            run_pipeline(&runtime, &mut state).await?;
            write_table(out.as_deref(), &state.final_tests).await
        }
        Command::Chat {
            user_stories,
            spec,
            strict,
        } => {
            let runtime = build_runtime(&config, strict).context("failed to build provider")?;
            chat(&runtime, read_document(&user_stories)?, read_document(&spec)?).await
        }
    }
}

async fn chat(runtime: &RuntimeBundle, user_stories: String, spec: String) -> Result<()> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(GENERATING_NOTICE.as_bytes()).await?;
    stdout.flush().await?;

    let mut session = RefinementSession::new(runtime.pipeline.clone());
    let generated = session.generate(user_stories, spec).await;
    let table = match generated {
        Ok(table) => table.to_string(),
        Err(error) => return Err(report_failure(runtime, error)),
    };
    stdout
        .write_all(format!("{GENERATED_NOTICE}\n\n{table}\n").as_bytes())
        .await?;

    let stdin = BufReader::new(tokio::io::stdin());
    match run_chat(&mut session, runtime, stdin, stdout).await? {
        ChatExit::CredentialRejected => {
            anyhow::bail!("API key rejected by {}", runtime.provider_id())
        }
        ChatExit::Quit | ChatExit::EndOfInput => Ok(()),
    }
}

async fn run_pipeline(runtime: &RuntimeBundle, state: &mut SessionState) -> Result<()> {
    match runtime.pipeline.run(state).await {
        Ok(report) => {
            tracing::info!(
                run_id = %report.run_id,
                route = %report.route,
                steps = report.visited.len(),
                elapsed_ms = report.elapsed.as_millis() as u64,
                "pipeline run complete"
            );
            Ok(())
        }
        Err(error) => Err(report_failure(runtime, error)),
    }
}

fn report_failure(runtime: &RuntimeBundle, error: PipelineError) -> anyhow::Error {
    if runtime.handle_failure(&error) {
        anyhow::Error::new(error).context("API key rejected; stored key cleared")
    } else {
        anyhow::Error::new(error).context("test case pipeline failed")
    }
}

fn read_document(path: &Path) -> Result<String> {
    extract_file(path).with_context(|| format!("failed to read {}", path.display()))
}

async fn write_table(out: Option<&Path>, table: &str) -> Result<()> {
    match out {
        Some(path) => tokio::fs::write(path, format!("{table}\n"))
            .await
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(format!("{table}\n").as_bytes()).await?;
            stdout.flush().await?;
            Ok(())
        }
    }
}
