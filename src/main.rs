use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};

use vidcat::{
    api::{AuthClient, CatalogApi, CatalogClient},
    config::Config,
    controller::{Controller, Event, NoticeKind, Services, SystemNavigator},
    i18n::Locale,
    session::{SessionStore, SqliteStore},
    tui::{ui::truncate_to_width, App},
};

mod cli;

use cli::{format_created, locale_from_env, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "vidcat=info");
    }

    let config = Config::from_env()?;
    config.validate()?;

    let command = cli.command.unwrap_or(Commands::Tui { lang: None });
    let tui_mode = matches!(command, Commands::Tui { .. });
    init_logging(&config, tui_mode);

    let services = build_services(&config, cli.ephemeral).await?;

    match command {
        Commands::Tui { lang } => run_tui(services, &config, lang.unwrap_or_else(locale_from_env)).await,
        command => handle_cli_command(command, services, &config).await,
    }
}

/// TUI mode writes only to the log file so the terminal stays clean.
fn init_logging(config: &Config, tui_mode: bool) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    let directory = config
        .log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| ".".into());
    let file_name = config
        .log_file
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "vidcat.log".into());
    let file_appender = tracing_appender::rolling::never(directory, file_name);

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_filter(EnvFilter::from_default_env());

    let stderr_layer = (!tui_mode).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(EnvFilter::from_default_env())
    });

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .init();
}

async fn build_services(config: &Config, ephemeral: bool) -> Result<Services> {
    let session = if ephemeral {
        info!("Using in-memory session storage");
        SessionStore::in_memory()
    } else {
        config.ensure_session_dir()?;
        let backend = SqliteStore::new(config.session_db_path_str())
            .await
            .with_context(|| format!("Failed to open session store at {}", config.session_db_path.display()))?;
        SessionStore::new(Box::new(backend))
    };

    Ok(Services {
        auth: Arc::new(AuthClient::new(&config.endpoints.auth_url, &config.http.user_agent)?),
        catalog: Arc::new(CatalogClient::new(&config.endpoints.catalog_url, &config.http.user_agent)?),
        session: Arc::new(session),
        navigator: Arc::new(SystemNavigator),
    })
}

async fn run_tui(services: Services, config: &Config, locale: Locale) -> Result<()> {
    info!("Starting vidcat TUI ({})", locale.code());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(services, config.response_ordering, locale);
    let result = app.run(&mut terminal).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    match result {
        Ok(()) => {
            info!("vidcat TUI exited successfully");
            Ok(())
        }
        Err(e) => {
            error!("vidcat TUI encountered an error: {}", e);
            Err(e)
        }
    }
}

/// Handle one-shot commands - print output and exit
async fn handle_cli_command(command: Commands, services: Services, config: &Config) -> Result<()> {
    let mut controller = Controller::new(services.clone(), config.response_ordering);

    match command {
        Commands::Tui { .. } => anyhow::bail!("tui is not a one-shot command"),

        Commands::List { page, search, tag } => {
            let query = Commands::list_query(page, &search, &tag);
            let results = services
                .catalog
                .list(&query)
                .await
                .context("Failed to load catalog page")?;

            if results.entries.is_empty() {
                println!("No videos found");
                return Ok(());
            }

            println!("{:<6} {:<40} {:<30} {:<10}", "ID", "Title", "Tags", "Added");
            println!("{}", "-".repeat(90));
            for entry in &results.entries {
                println!(
                    "{:<6} {:<40} {:<30} {:<10}",
                    entry.id,
                    truncate_to_width(&entry.title, 38),
                    truncate_to_width(&entry.tags.join(", "), 28),
                    format_created(&entry.created_at),
                );
            }
            println!();
            println!(
                "Page {} of {} ({} videos)",
                results.page, results.total_pages, results.total
            );
        }

        Commands::Login(credentials) => {
            controller
                .dispatch(Event::LoginSubmitted {
                    username: credentials.username,
                    password: credentials.password,
                })
                .await;
            report(&controller)?;
        }

        Commands::Register(credentials) => {
            controller.dispatch(Event::AuthModeToggled).await;
            controller
                .dispatch(Event::LoginSubmitted {
                    username: credentials.username,
                    password: credentials.password,
                })
                .await;
            report(&controller)?;
        }

        Commands::Logout => {
            restore_session(&mut controller).await;
            controller.dispatch(Event::LoggedOut).await;
            report(&controller)?;
        }

        Commands::Whoami => match services.session.load().await {
            Some(session) => println!(
                "{}{}",
                session.user.username,
                if session.user.is_admin { " (admin)" } else { "" }
            ),
            None => println!("Not logged in"),
        },

        Commands::Add { title, tags, url, image1, image2, image3 } => {
            restore_session(&mut controller).await;
            let entry = Commands::new_entry(&title, &tags, &url, [&image1, &image2, &image3]);
            controller.dispatch(Event::AddEntrySubmitted(entry)).await;
            report(&controller)?;
        }

        Commands::Delete { id } => {
            restore_session(&mut controller).await;
            controller.dispatch(Event::DeleteRequested(id)).await;
            report(&controller)?;
        }
    }

    Ok(())
}

async fn restore_session(controller: &mut Controller) {
    let session = controller.services().session.load().await;
    controller.dispatch(Event::SessionRestored(session)).await;
}

/// Print the controller's last notice; an error notice fails the command.
fn report(controller: &Controller) -> Result<()> {
    match &controller.state.notice {
        Some(notice) if notice.kind == NoticeKind::Error => {
            anyhow::bail!("{}", notice.message)
        }
        Some(notice) => {
            println!("{}", notice.message);
            Ok(())
        }
        None => Ok(()),
    }
}
