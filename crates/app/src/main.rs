mod cli;
mod seed;

use std::sync::Arc;

use clap::Parser;
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{
    AppServices, AssessmentService, AuthService, CatalogService, Clock, ProfileService,
    ProgressService,
};
use storage::repository::Storage;
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

use crate::cli::{Cli, Command, prepare_sqlite_file};

struct DesktopApp {
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn auth(&self) -> Arc<AuthService> {
        self.services.auth()
    }

    fn catalog(&self) -> Arc<CatalogService> {
        self.services.catalog()
    }

    fn progress(&self) -> Arc<ProgressService> {
        self.services.progress()
    }

    fn assessment(&self) -> Arc<AssessmentService> {
        self.services.assessment()
    }

    fn profiles(&self) -> Arc<ProfileService> {
        self.services.profiles()
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing();

    let db_url = cli.database_url()?;
    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&db_url)?;
    let storage = Storage::sqlite(&db_url).await?;

    match cli.command() {
        Command::Ui => {
            let backend = cli.auth_backend()?;
            let services = AppServices::from_storage(&storage, Clock::system(), backend);
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
            let context = build_app_context(&app);
            info!(db = %db_url, auth = ?cli.auth, "launching desktop client");

            // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Skill Lab")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Seed => {
            let courses = seed::seed_demo_catalog(storage.catalog.as_ref()).await?;
            info!(db = %db_url, courses, "demo catalog written");
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
