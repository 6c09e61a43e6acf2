use std::{path::PathBuf, process::ExitCode, sync::Arc, time::Duration};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use sync_client::{
    run_scheduled, ActionRegistry, FormState, HttpRpcTransport, SyncTriggerHandler,
    TracingEffects, Tz, UiEffects, FROM_DATE_FIELD, SYNC_ORDERS_ACTION, TO_DATE_FIELD,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod terminal;

use config::{load_settings, Settings, DEFAULT_CONFIG_PATH};
use terminal::TerminalEffects;

#[derive(Parser, Debug)]
#[command(name = "order-sync", about = "Trigger marketplace order sync on the backend")]
struct Cli {
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    #[arg(long)]
    base_url: Option<String>,
    #[arg(long)]
    method: Option<String>,
    /// IANA time zone for dates without an offset, e.g. `Europe/Berlin`.
    #[arg(long)]
    time_zone: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one sync for the given creation window.
    Sync {
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },
    /// Run an unbounded sync periodically until interrupted.
    Schedule {
        #[arg(long)]
        interval_secs: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings(&cli.config)?;
    if let Some(base_url) = cli.base_url {
        settings.base_url = base_url;
    }
    if let Some(method) = cli.method {
        settings.method = method;
    }
    if let Some(time_zone) = cli.time_zone {
        settings.time_zone = Some(time_zone);
    }

    match cli.command {
        Command::Sync { from, to } => {
            let registry = build_registry(&settings, Arc::new(TerminalEffects))?;
            let mut form = FormState::new();
            form.set(FROM_DATE_FIELD, from);
            form.set(TO_DATE_FIELD, to);

            let result = registry.dispatch(SYNC_ORDERS_ACTION, &form).await?;
            Ok(if result.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Schedule { interval_secs } => {
            let period = Duration::from_secs(
                interval_secs
                    .filter(|secs| *secs > 0)
                    .unwrap_or(settings.schedule_interval_secs),
            );
            let handler = build_handler(&settings, Arc::new(TracingEffects))?;
            info!(
                base_url = %settings.base_url,
                period_secs = period.as_secs(),
                "starting scheduled order sync"
            );

            run_scheduled(&handler, period, async {
                if let Err(err) = tokio::signal::ctrl_c().await {
                    tracing::error!(error = %err, "failed to listen for ctrl-c");
                }
            })
            .await;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn build_handler(settings: &Settings, effects: Arc<dyn UiEffects>) -> Result<SyncTriggerHandler> {
    let mut transport = HttpRpcTransport::new(&settings.base_url)
        .with_context(|| format!("cannot use backend url '{}'", settings.base_url))?;
    if let Some((key, secret)) = settings.api_token() {
        transport = transport.with_api_token(key, secret);
    }

    let mut handler =
        SyncTriggerHandler::new(Arc::new(transport), effects).with_method(settings.method.clone());
    if let Some(name) = settings.time_zone.as_deref() {
        let tz: Tz = name
            .parse()
            .map_err(|err| anyhow!("unknown time zone '{name}': {err}"))?;
        handler = handler.with_time_zone(tz);
    }
    Ok(handler)
}

fn build_registry(settings: &Settings, effects: Arc<dyn UiEffects>) -> Result<ActionRegistry> {
    let mut registry = ActionRegistry::new();
    registry.register(SYNC_ORDERS_ACTION, Arc::new(build_handler(settings, effects)?))?;
    Ok(registry)
}
