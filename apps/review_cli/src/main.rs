mod render;

use std::{path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use client_core::{
    load_settings,
    presenter::{health_badge, submit_button_label, theme_toggle_hint},
    DocumentUpload, Endpoints, HealthProbe, HttpReviewBackend, JsonThemeStore, PresentedReview,
    ReviewController, ScenarioCatalog, SessionEvent, Settings, ThemePersistence,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "task-review", about = "Submit tasks to the review service")]
struct Cli {
    /// Backend base address; a bare hostname expands onto the hosting domain.
    #[arg(long, global = true)]
    backend_url: Option<String>,
    /// Directory holding persisted client settings.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the built-in scenarios.
    Scenarios,
    /// Probe backend availability once.
    Health,
    /// Show or toggle the persisted theme.
    Theme {
        #[arg(long)]
        toggle: bool,
    },
    /// Submit a task for review and print the verdict.
    Submit {
        #[arg(long)]
        scenario: Option<String>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        github_url: Option<String>,
        #[arg(long)]
        document: Option<PathBuf>,
        #[arg(long)]
        submitted_by: Option<String>,
    },
}

struct SubmitArgs {
    scenario: Option<String>,
    title: Option<String>,
    description: Option<String>,
    github_url: Option<String>,
    document: Option<PathBuf>,
    submitted_by: Option<String>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings();
    if let Some(backend_url) = cli.backend_url {
        settings.backend_url = backend_url;
    }
    if cli.data_dir.is_some() {
        settings.data_dir = cli.data_dir;
    }

    match cli.command {
        Command::Scenarios => {
            let catalog = ScenarioCatalog::builtin();
            print!(
                "{}",
                render::render_scenarios(catalog.iter(), catalog.default_scenario().name)
            );
            Ok(ExitCode::SUCCESS)
        }
        Command::Health => health(&settings).await,
        Command::Theme { toggle } => theme(&settings, toggle),
        Command::Submit {
            scenario,
            title,
            description,
            github_url,
            document,
            submitted_by,
        } => {
            submit(
                &settings,
                SubmitArgs {
                    scenario,
                    title,
                    description,
                    github_url,
                    document,
                    submitted_by,
                },
            )
            .await
        }
    }
}

fn theme_persistence(settings: &Settings) -> Result<ThemePersistence> {
    let data_dir = settings.resolve_data_dir()?;
    Ok(ThemePersistence::new(JsonThemeStore::in_dir(&data_dir)))
}

async fn health(settings: &Settings) -> Result<ExitCode> {
    let endpoints = Endpoints::from_raw(&settings.backend_url)?;
    let probe = HealthProbe::new(reqwest::Client::new(), endpoints.health)
        .with_timeout(settings.health_timeout);
    let reading = probe.check_report().await;
    println!("{}", health_badge(reading.status, reading.version.as_deref()));
    Ok(ExitCode::SUCCESS)
}

fn theme(settings: &Settings, toggle: bool) -> Result<ExitCode> {
    let persistence = theme_persistence(settings)?;
    let mut current = persistence.load();
    if toggle {
        current = persistence.toggle(current);
    }
    println!("Theme: {current}");
    println!("{}", theme_toggle_hint(current));
    Ok(ExitCode::SUCCESS)
}

async fn submit(settings: &Settings, args: SubmitArgs) -> Result<ExitCode> {
    let catalog = ScenarioCatalog::builtin();
    if let Some(name) = &args.scenario {
        if catalog.get(name).is_none() {
            bail!(
                "unknown scenario '{name}'; expected one of: {}",
                catalog.names().join(", ")
            );
        }
    }
    let document = match &args.document {
        Some(path) => Some(DocumentUpload::from_path(path).await?),
        None => None,
    };

    let endpoints = Endpoints::from_raw(&settings.backend_url)?;
    let backend = HttpReviewBackend::from_endpoints(reqwest::Client::new(), &endpoints)
        .with_health_timeout(settings.health_timeout);
    let mut controller =
        ReviewController::start(catalog, Arc::new(backend), theme_persistence(settings)?);

    if let Some(name) = args.scenario {
        controller.dispatch(SessionEvent::ScenarioSelected(name));
    }
    let has_edits = args.title.is_some()
        || args.description.is_some()
        || args.github_url.is_some()
        || document.is_some();
    if has_edits && controller.session().form().is_locked() {
        warn!(
            scenario = controller.session().form().scenario(),
            "scenario is locked; field overrides are ignored"
        );
    }
    if let Some(title) = args.title {
        controller.dispatch(SessionEvent::TitleEdited(title));
    }
    if let Some(description) = args.description {
        controller.dispatch(SessionEvent::DescriptionEdited(description));
    }
    if let Some(github_url) = args.github_url {
        controller.dispatch(SessionEvent::GithubUrlEdited(github_url));
    }
    if let Some(document) = document {
        controller.dispatch(SessionEvent::DocumentSelected(vec![document]));
    }
    let submitted_by = args
        .submitted_by
        .unwrap_or_else(|| settings.submitted_by.clone());
    controller.dispatch(SessionEvent::SubmittedByEdited(submitted_by));

    controller.dispatch(SessionEvent::SubmitRequested);
    info!(
        scenario = controller.session().form().scenario(),
        "{}",
        submit_button_label(controller.session().is_in_flight())
    );
    controller.settle().await;

    let session = controller.session();
    eprintln!(
        "{}",
        health_badge(session.health(), session.backend_version())
    );
    if let Some(error) = session.error() {
        eprintln!("Error: {error}");
        return Ok(ExitCode::FAILURE);
    }
    match session.result() {
        Some(outcome) => {
            print!(
                "{}",
                render::render_review(&PresentedReview::from_outcome(outcome))
            );
            Ok(ExitCode::SUCCESS)
        }
        None => bail!("review finished without a result"),
    }
}
