use std::sync::Arc;

use welfare_assist::config::AppConfig;
use welfare_assist::eligibility::EligibilityEvaluator;
use welfare_assist::http::{AppState, app_router};
use welfare_assist::intake::{IntakeController, InMemorySessionStore, SessionStore};
use welfare_assist::llm::create_provider;
use welfare_assist::notify::{EmailNotifier, NotificationSink};
use welfare_assist::persist::{LogOnlySink, RecordSink, RestRecordSink};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Install rustls crypto provider before any TLS usage
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env()?;

    eprintln!("🏛  Welfare Assist v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Chat API: http://{}/chat", config.server.socket_addr());
    eprintln!("   Health:   http://{}/health", config.server.socket_addr());

    // Eligibility service — optional; without it the deterministic
    // fallback rules answer every evaluation.
    let llm = match &config.llm {
        Some(llm_config) => {
            eprintln!("   Eligibility service: {}", llm_config.model);
            Some(create_provider(llm_config)?)
        }
        None => {
            eprintln!("   Warning: OPENAI_API_KEY not set; using fallback rules only");
            None
        }
    };

    // Persistence sink — degrades to log-only without credentials.
    let records: Arc<dyn RecordSink> = match config.persist {
        Some(persist_config) => {
            eprintln!("   Persistence: {}", persist_config.base_url);
            Arc::new(RestRecordSink::new(persist_config))
        }
        None => {
            eprintln!("   Persistence: disabled (records logged only)");
            Arc::new(LogOnlySink)
        }
    };

    // Notification sink — optional.
    let notifier: Option<Arc<dyn NotificationSink>> = match config.email {
        Some(email_config) => {
            eprintln!(
                "   Email: enabled (SMTP: {}:{})",
                email_config.smtp_host, email_config.smtp_port
            );
            Some(Arc::new(EmailNotifier::new(email_config)))
        }
        None => {
            eprintln!("   Email: disabled");
            None
        }
    };

    let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
    let evaluator = EligibilityEvaluator::new(llm);
    let controller = Arc::new(IntakeController::new(store, evaluator, records, notifier));

    let app = app_router(AppState { controller });
    let listener = tokio::net::TcpListener::bind(config.server.socket_addr()).await?;
    tracing::info!(addr = %config.server.socket_addr(), "Welfare Assist listening");
    axum::serve(listener, app).await?;

    Ok(())
}
