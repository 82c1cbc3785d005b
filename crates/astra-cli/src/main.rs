use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use astra_application::{
    DashboardState, DeleteOutcome, DocumentService, HistoryService, QueryService, SessionService,
};
use astra_core::document::DocumentBackend;
use astra_core::error::AstraError;
use astra_core::exchange::{AnalysisBackend, ChatHistoryBackend, QueryMode};
use astra_core::router::{Screen, resolve};
use astra_core::session::AuthBackend;
use astra_infrastructure::{ConfigStorage, FileSessionStorage};
use astra_interaction::HttpBackendClient;

mod render;
mod shell;

#[derive(Parser)]
#[command(name = "astra")]
#[command(about = "Astra - Market & Competitive Intelligence Client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    Register {
        username: String,
        email: String,
        password: String,
    },
    /// Sign in and persist the session
    Login { email: String, password: String },
    /// Sign out and clear the persisted session
    Logout,
    /// Show the signed-in identity
    Whoami,
    /// Submit a query and render the result
    Query {
        /// Analysis mode: standard (live market analysis) or rag
        /// (answer from your uploaded documents)
        #[arg(long, default_value_t = QueryMode::Standard)]
        mode: QueryMode,
        /// The query text
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Exchange history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
    /// RAG document management
    Docs {
        #[command(subcommand)]
        action: DocsAction,
    },
    /// Interactive dashboard shell (the default)
    Shell,
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List past exchanges
    List,
    /// Replay a past exchange by its position in the listing (1-based)
    Show { index: usize },
    /// Delete an exchange by id
    Delete {
        chat_id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum DocsAction {
    /// List your indexed documents
    List,
    /// Upload a file for indexing
    Upload { path: PathBuf },
    /// Remove a document from your index
    Delete { doc_id: String },
}

/// The wired service graph every command runs against.
pub struct App {
    pub session: Arc<SessionService>,
    pub queries: Arc<QueryService>,
    pub history: Arc<HistoryService>,
    pub documents: Arc<DocumentService>,
    pub dashboard: Arc<DashboardState>,
}

impl App {
    /// Builds the full service graph from config + persisted session.
    fn bootstrap() -> Result<Self> {
        let config = ConfigStorage::new()?.load()?;
        let backend = Arc::new(HttpBackendClient::new(&config.backend));

        let auth_backend: Arc<dyn AuthBackend> = backend.clone();
        let analysis_backend: Arc<dyn AnalysisBackend> = backend.clone();
        let history_backend: Arc<dyn ChatHistoryBackend> = backend.clone();
        let document_backend: Arc<dyn DocumentBackend> = backend;

        let session = Arc::new(SessionService::new(
            Arc::new(FileSessionStorage::new()?),
            auth_backend,
        ));
        let queries = Arc::new(QueryService::new(
            analysis_backend,
            history_backend.clone(),
            session.clone(),
        ));
        let history = Arc::new(HistoryService::new(history_backend));
        let documents = Arc::new(DocumentService::new(document_backend));

        Ok(Self {
            session,
            queries,
            history,
            documents,
            dashboard: Arc::new(DashboardState::new()),
        })
    }

    /// Router gate for protected one-shot commands: resolves the requested
    /// screen against session presence and yields the user id when the
    /// screen is reachable.
    fn require_screen(&self, requested: Screen) -> Result<String, AstraError> {
        match resolve(requested, self.session.session_state()) {
            Screen::Login => Err(AstraError::NotAuthenticated),
            _ => self.session.require_user_id(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("ASTRA_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let app = App::bootstrap()?;

    let outcome = match cli.command {
        None | Some(Commands::Shell) => return shell::run(app).await,
        Some(command) => run_command(&app, command).await,
    };

    if let Err(err) = outcome {
        render::notify_error(&err);
        std::process::exit(1);
    }
    Ok(())
}

async fn run_command(app: &App, command: Commands) -> Result<(), AstraError> {
    match command {
        Commands::Register {
            username,
            email,
            password,
        } => {
            let message = app.session.register(&username, &email, &password).await?;
            render::notify_info(&message);
        }
        Commands::Login { email, password } => {
            let session = app.session.login(&email, &password).await?;
            render::notify_info(&format!("signed in as {}", session.username));
        }
        Commands::Logout => {
            app.session.logout()?;
            render::notify_info("signed out");
        }
        Commands::Whoami => match app.session.username() {
            Some(username) => {
                let user_id = app.session.user_id().unwrap_or_else(|| "?".to_string());
                render::notify_info(&format!("{username} ({user_id})"));
            }
            None => render::notify_info("not signed in"),
        },
        Commands::Query { mode, text } => {
            app.require_screen(Screen::Dashboard)?;
            let query = text.join(" ");
            let payload = app.queries.submit(&query, mode).await?;
            render::result(&payload);
            // Give the best-effort history save a moment before the
            // runtime shuts down.
            tokio::time::sleep(Duration::from_millis(500)).await;
        }
        Commands::History { action } => {
            let user_id = app.require_screen(Screen::Dashboard)?;
            match action {
                HistoryAction::List => {
                    app.history.refresh(&user_id).await?;
                    render::history_list(&app.history.entries().await);
                }
                HistoryAction::Show { index } => {
                    app.history.refresh(&user_id).await?;
                    match app.history.select(index.saturating_sub(1)).await {
                        Some(exchange) => {
                            app.dashboard.show_stored(exchange.response.clone()).await;
                            render::exchange(&exchange);
                        }
                        None => render::notify_info("no such history entry"),
                    }
                }
                HistoryAction::Delete { chat_id, yes } => {
                    let confirmed = yes || render::confirm_on_stdin(&chat_id)?;
                    match app.history.delete(&chat_id, confirmed).await? {
                        DeleteOutcome::Deleted => render::notify_info("exchange deleted"),
                        DeleteOutcome::Declined => render::notify_info("cancelled"),
                    }
                }
            }
        }
        Commands::Docs { action } => {
            let user_id = app.require_screen(Screen::Documents)?;
            match action {
                DocsAction::List => {
                    app.documents.refresh(&user_id).await?;
                    render::document_list(&app.documents.documents().await);
                }
                DocsAction::Upload { path } => {
                    app.documents.upload(&user_id, &path).await?;
                    render::notify_info("document uploaded");
                    render::document_list(&app.documents.documents().await);
                }
                DocsAction::Delete { doc_id } => {
                    app.documents.delete(&user_id, &doc_id).await?;
                    render::notify_info("document deleted");
                    render::document_list(&app.documents.documents().await);
                }
            }
        }
        Commands::Shell => unreachable!("handled in main"),
    }
    Ok(())
}
