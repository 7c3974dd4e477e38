use clap::Parser;
use miette::{IntoDiagnostic, Result};
use paybutton::application::state::AttemptOutcome;
use paybutton::application::workflow::{PaymentWorkflow, Ports};
use paybutton::config::{self, CheckoutConfig};
use paybutton::domain::ports::{OrderBackendRef, ScriptSourceRef};
use paybutton::infrastructure::http::{HttpOrderBackend, HttpScriptSource};
use paybutton::infrastructure::in_memory::{InMemoryOrderBackend, StaticScriptSource};
use paybutton::infrastructure::terminal::{TerminalNotifier, TerminalWidgetFactory};
use std::io;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Amount to pay, in major currency units (e.g. rupees)
    amount: String,

    /// Base URL of the backend serving /create-order and /verify-payment
    #[arg(long)]
    backend_url: Option<String>,

    /// Checkout key id passed to the widget
    #[arg(long)]
    key_id: Option<String>,

    /// URL of the checkout script to load
    #[arg(long)]
    script_url: Option<String>,

    /// Run against an in-memory backend without touching the network
    #[arg(long)]
    sandbox: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "paybutton=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = CheckoutConfig::from_env().into_diagnostic()?;
    if let Some(raw) = &cli.backend_url {
        config.backend_url = config::parse_base_url("--backend-url", raw).into_diagnostic()?;
    }
    if let Some(raw) = &cli.script_url {
        config.script_url = config::parse_url("--script-url", raw).into_diagnostic()?;
    }
    if let Some(key_id) = cli.key_id {
        config.key_id = key_id;
    }

    let script_source: ScriptSourceRef;
    let backend: OrderBackendRef;
    if cli.sandbox {
        info!("sandbox mode: using in-memory backend");
        script_source = Arc::new(StaticScriptSource::available());
        backend = Arc::new(InMemoryOrderBackend::new());
    } else {
        let client = reqwest::Client::new();
        script_source = Arc::new(HttpScriptSource::new(client.clone(), config.script_url.clone()));
        backend = Arc::new(HttpOrderBackend::new(client, &config).into_diagnostic()?);
    }

    let workflow = PaymentWorkflow::new(
        config,
        Ports {
            script_source,
            backend,
            widget_factory: Arc::new(TerminalWidgetFactory::new(io::stdin())),
            notifier: Arc::new(TerminalNotifier),
        },
    );

    workflow.mount().await;
    eprintln!("[{}]", workflow.button_label(&cli.amount));

    // Rejections and failures were already shown as notifications.
    let Ok(submission) = workflow.submit(&cli.amount).await else {
        return Ok(());
    };

    let outcome = submission.outcome().await;
    if outcome == AttemptOutcome::Abandoned {
        eprintln!("Checkout closed without payment.");
    }
    info!(?outcome, "payment attempt finished");

    Ok(())
}
