//! Asks the weather agent one question and prints what happened.

#[macro_use]
extern crate tracing;

use std::process::ExitCode;
use std::time::Duration;

use deep_agent::core::render::ReportLine;
use deep_agent::core::{Error as AgentError, Report};
use deep_agent::{AppConfig, SessionBuilder};
use deep_agent_model::ErrorKind as ModelErrorKind;
use deep_agent_openai_model::OpenAIProvider;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

const QUESTION: &str = "What's the weather in Seoul?";
const BAR_CHAR: &str = "▎";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = dotenvy::dotenv() {
        if err.not_found() {
            debug!("no .env file found");
        } else {
            warn!("failed to load .env: {err}");
        }
    }

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{} {err}", "error:".bright_red().bold());
            return ExitCode::FAILURE;
        }
    };
    debug!("resolved config: {config:?}");

    let model_provider = OpenAIProvider::new(config.openai_config());
    let session = SessionBuilder::with_model_provider(model_provider)
        .with_minimal(config.minimal)
        .build();

    println!("{}🙋 {}", BAR_CHAR.bright_green(), QUESTION.bright_white());

    let progress_bar = thinking_spinner();
    let result = session.send_message(QUESTION).await;
    progress_bar.finish_and_clear();

    match result {
        Ok(transcript) => {
            print_report(&Report::from_transcript(&transcript));
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{} {err}", "error:".bright_red().bold());
            if err.model_error_kind() == Some(ModelErrorKind::Unauthorized) {
                eprintln!("hint: check OPENAI_API_KEY and OPENAI_API_BASE");
            }
            if let AgentError::TurnLimitExceeded(_) = err {
                eprintln!("hint: the model kept calling tools without answering");
            }
            ExitCode::FAILURE
        }
    }
}

fn thinking_spinner() -> ProgressBar {
    let progress_bar = ProgressBar::new_spinner();
    match ProgressStyle::with_template("{spinner} {wide_msg}") {
        Ok(style) => {
            progress_bar.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"))
        }
        Err(err) => warn!("invalid spinner template: {err}"),
    }
    progress_bar.set_message("🤔 Thinking...");
    progress_bar.enable_steady_tick(Duration::from_millis(100));
    progress_bar
}

fn print_report(report: &Report) {
    let mut section = None;
    for line in report.lines() {
        match line {
            ReportLine::ToolCall(call) => {
                if section != Some("calls") {
                    println!("{}", "Tool calls:".bright_black());
                    section = Some("calls");
                }
                println!(
                    "{}🔧 {}{}",
                    BAR_CHAR.bright_yellow(),
                    call.name.bright_white().bold(),
                    format!("({})", call.arguments).bright_black()
                );
            }
            ReportLine::ToolResponse(content) => {
                if section != Some("responses") {
                    println!("{}", "Tool responses:".bright_black());
                    section = Some("responses");
                }
                println!("{}📎 {}", BAR_CHAR.bright_magenta(), content);
            }
            ReportLine::FinalReply(content) => {
                println!("{}🤖 {}", BAR_CHAR.bright_cyan(), content.bright_white());
            }
        }
    }
}
