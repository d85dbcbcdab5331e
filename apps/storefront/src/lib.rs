//! # ShopToShop Storefront Library
//!
//! Shopper-side state for the ShopToShop mobile-parts storefront: cart,
//! wishlist, catalog browsing and language switching, driven from a line
//! shell.
//!
//! ## Module Organization
//! ```text
//! shoptoshop_storefront/
//! ├── lib.rs          ◄─── You are here (startup & run loop)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── store.rs    ◄─── Cart + wishlist store, snapshot publishing
//! │   ├── catalog.rs  ◄─── Read-only product catalog
//! │   ├── locale.rs   ◄─── Active language
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── product.rs  ◄─── Shop, product, category and brand pages
//! │   ├── cart.rs     ◄─── Cart page and "Add to Cart" buttons
//! │   ├── wishlist.rs ◄─── Heart icon and wishlist page
//! │   └── config.rs   ◄─── Store config, language picker
//! ├── autosave.rs     ◄─── Background session saving
//! ├── shell.rs        ◄─── Line-oriented front end
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   stdin ──► shell::dispatch ──► commands::* ──► StoreState::commit      │
//! │                                                      │                  │
//! │                                   watch::Sender<StoreSnapshot>          │
//! │                                      │                 │                │
//! │                                      ▼                 ▼                │
//! │                              page subscribers     autosave task         │
//! │                                                        │                │
//! │                                                        ▼                │
//! │                                            SessionStorage (file/memory) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod autosave;
pub mod commands;
pub mod error;
pub mod shell;
pub mod state;

use std::sync::Arc;

use shoptoshop_session::{FileStorage, MemoryStorage, SessionStorage};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use shell::Reply;
use state::{CatalogState, ConfigState, LocaleState, StoreState};

/// Everything a command can ask for.
#[derive(Debug, Clone)]
pub struct App {
    pub config: ConfigState,
    pub catalog: CatalogState,
    pub store: StoreState,
    pub locale: LocaleState,
}

impl App {
    /// Fresh app with an empty session, in the configured default language.
    pub fn new(config: ConfigState, catalog: CatalogState) -> Self {
        let locale = LocaleState::new(config.default_language);
        App {
            config,
            catalog,
            store: StoreState::new(),
            locale,
        }
    }
}

/// Runs the storefront shell until stdin closes or the shopper quits.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Initialize Logging      tracing-subscriber, RUST_LOG overrides      │
/// │  2. Load Configuration      defaults ◄ SHOPTOSHOP_CONFIG ◄ env vars     │
/// │  3. Load Catalog            catalog_path, or the bundled sample         │
/// │  4. Open Session Storage    file when session_path is set, else memory  │
/// │  5. Restore Saved Session   unknown products are dropped with a warning │
/// │  6. Start Autosave          when enabled                                │
/// │  7. Read Commands           one line, one reply                         │
/// │  8. Final Save              after the autosave task has drained         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = ConfigState::from_env();
    info!(store = %config.store_name, language = %config.default_language, "Starting storefront");

    let catalog = match &config.catalog_path {
        Some(path) => CatalogState::from_file(path)?,
        None => CatalogState::builtin()?,
    };

    let storage: Arc<dyn SessionStorage> = match &config.session_path {
        Some(path) => {
            info!(?path, "Session file");
            Arc::new(FileStorage::new(path.clone()))
        }
        None => {
            info!("No session path configured, session kept in memory");
            Arc::new(MemoryStorage::new())
        }
    };

    let app = App::new(config, catalog);

    match storage.load() {
        Ok(Some(blob)) => {
            app.store.restore(&blob, app.catalog.inner());
        }
        Ok(None) => debug!("Starting with an empty session"),
        Err(e) => warn!(error = %e, "Saved session unreadable, starting empty"),
    }

    let autosave = app
        .config
        .autosave
        .then(|| autosave::spawn_autosave(app.store.subscribe(), Arc::clone(&storage)));

    println!("{} ({}). Type 'help'.", app.config.store_name, app.locale.language().name());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match shell::dispatch(&app, &line) {
            Reply::Output(text) if text.is_empty() => {}
            Reply::Output(text) => println!("{}", text),
            Reply::Quit => break,
        }
    }

    shutdown(app, autosave, storage).await?;

    info!("Storefront stopped");
    Ok(())
}

/// Stops autosave and writes the final session.
///
/// Dropping the app closes the snapshot channel. The autosave task must
/// finish before the final save so the two never write the file at once.
pub async fn shutdown(
    app: App,
    autosave: Option<JoinHandle<()>>,
    storage: Arc<dyn SessionStorage>,
) -> Result<(), tokio::task::JoinError> {
    let blob = app.store.export_blob();
    drop(app);
    if let Some(handle) = autosave {
        handle.await?;
    }

    match tokio::task::spawn_blocking(move || storage.persist(&blob)).await {
        Ok(Ok(())) => debug!("Final session save complete"),
        Ok(Err(e)) => warn!(error = %e, "Final session save failed"),
        Err(e) => warn!(error = %e, "Final session save panicked"),
    }
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=shoptoshop=trace` - Trace for shoptoshop crates only
/// - Default: INFO, DEBUG for shoptoshop crates
///
/// Logs go to stderr so they never interleave with shell replies.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shoptoshop=debug"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
