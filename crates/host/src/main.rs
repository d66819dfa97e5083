use std::future::IntoFuture;
use std::net::TcpListener;
use std::sync::Arc;

use peerchat_web_host::bridge;
use peerchat_web_host::config::Config;
use peerchat_web_host::http::{self, AppState};
use peerchat_web_host::settings::SettingsStore;
use tokio::signal;
use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_banner() {
    eprintln!();
    eprintln!("  \x1b[1;36m╔══════════════════════════════════════╗\x1b[0m");
    eprintln!("  \x1b[1;36m║\x1b[0m  \x1b[1;96mpeerchat-web\x1b[0m  \x1b[2;37mtalk peer to peer,\x1b[0m      \x1b[1;36m║\x1b[0m");
    eprintln!("  \x1b[1;36m║\x1b[0m                \x1b[2;37mstraight from a tab\x1b[0m     \x1b[1;36m║\x1b[0m");
    eprintln!("  \x1b[1;36m║\x1b[0m  \x1b[2;35mv{VERSION:<10}\x1b[0m                          \x1b[1;36m║\x1b[0m");
    eprintln!("  \x1b[1;36m╚══════════════════════════════════════╝\x1b[0m");
    eprintln!();
}

fn print_connection_info(http_port: u16, ws_port: u16, bind: &str) {
    eprintln!("  \x1b[1;32m[http]\x1b[0m   UI served on port \x1b[1;96m{http_port}\x1b[0m");
    eprintln!("  \x1b[1;32m[ws]\x1b[0m     Bridge on port \x1b[1;96m{ws_port}\x1b[0m");
    eprintln!();
    eprintln!("  \x1b[1;37m>\x1b[0m Open: \x1b[4;96mhttp://{bind}:{http_port}\x1b[0m");
    eprintln!();
    eprintln!("  \x1b[2mPress Ctrl+C to stop\x1b[0m");
    eprintln!();
}

/// Graceful start: Check if port is available
fn check_port_available(bind: &str, port: u16) -> bool {
    TcpListener::bind(format!("{bind}:{port}")).is_ok()
}

/// Graceful start: Find available port starting from default
fn find_available_port(bind: &str, start: u16) -> Option<u16> {
    (start..start + 10).find(|&port| check_port_available(bind, port))
}

/// Resolve a usable port, falling back to a nearby one when the configured
/// port is taken.
fn resolve_port(bind: &str, configured: u16, label: &str) -> u16 {
    if check_port_available(bind, configured) {
        return configured;
    }
    eprintln!(
        "  \x1b[1;33m[warn]\x1b[0m   {label} port {configured} in use, finding alternative..."
    );
    if let Some(port) = find_available_port(bind, configured + 1) {
        eprintln!("  \x1b[1;32m[check]\x1b[0m  Using {label} port {port}");
        port
    } else {
        eprintln!(
            "  \x1b[1;31m[error]\x1b[0m  No available {label} ports in range {}-{}",
            configured,
            configured + 10
        );
        std::process::exit(1);
    }
}

fn print_help() {
    println!("peerchat-web-host - P2P messenger shell in the browser");
    println!();
    println!("USAGE:");
    println!("    peerchat-web-host [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --http-port PORT   Override the HTTP port");
    println!("    --ws-port PORT     Override the bridge port");
    println!("    --bind ADDR        Override the bind address");
    println!("    -h, --help         Print help information");
    println!("    -v, --version      Print version");
    println!();
    println!("CONFIG:");
    println!("    ~/.config/peerchat-web/config.toml");
    println!("    ~/.config/peerchat-web/settings.json");
}

/// Apply command line overrides on top of the loaded config
fn apply_arg_overrides(config: &mut Config, args: &[String]) {
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--http-port" => {
                if let Some(port) = iter.next().and_then(|v| v.parse().ok()) {
                    config.server.http_port = port;
                }
            }
            "--ws-port" => {
                if let Some(port) = iter.next().and_then(|v| v.parse().ok()) {
                    config.server.ws_port = port;
                }
            }
            "--bind" => {
                if let Some(bind) = iter.next() {
                    config.server.bind.clone_from(bind);
                }
            }
            _ => {}
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging (tracing)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_level(true)
        .init();

    // Handle --version and --help
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 {
        match args[1].as_str() {
            "--version" | "-v" => {
                println!("peerchat-web {VERSION}");
                return Ok(());
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            _ => {}
        }
    }

    print_banner();

    // === LOAD CONFIGURATION ===
    Config::create_default_if_missing();
    let mut config = Config::load()?;
    apply_arg_overrides(&mut config, &args);
    eprintln!(
        "  \x1b[1;32m[config]\x1b[0m Loaded from {}",
        Config::default_config_path().display()
    );

    // === GRACEFUL START ===
    eprintln!("  \x1b[1;33m[init]\x1b[0m   Running startup checks...");

    let http_port = resolve_port(&config.server.bind, config.server.http_port, "HTTP");
    let ws_port = resolve_port(&config.server.bind, config.server.ws_port, "WS");

    // Open the settings store before binding anything: a broken settings
    // file should stop the host, not surface as a blank panel.
    let settings_path = match &config.settings_path {
        Some(path) => path.clone(),
        None => SettingsStore::default_path()?,
    };
    let store = SettingsStore::open(settings_path.clone())?;
    eprintln!(
        "  \x1b[1;32m[store]\x1b[0m  Settings at {}",
        settings_path.display()
    );
    let store = Arc::new(Mutex::new(store));

    print_connection_info(http_port, ws_port, &config.server.bind);

    // === START EMBEDDED HTTP SERVER (axum) ===
    let app = http::router(AppState { ws_port });
    let http_addr = format!("{}:{}", config.server.bind, http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_addr).await?;
    let http_server = axum::serve(http_listener, app).into_future();

    // === START SETTINGS BRIDGE (WebSocket) ===
    let ws_addr = format!("{}:{}", config.server.bind, ws_port);
    let ws_listener = tokio::net::TcpListener::bind(&ws_addr).await?;

    // === GRACEFUL SHUTDOWN HANDLER ===
    let shutdown_signal = async {
        let ctrl_c = async {
            signal::ctrl_c()
                .await
                .expect("Failed to install Ctrl+C handler");
        };

        #[cfg(unix)]
        let terminate = async {
            signal::unix::signal(signal::unix::SignalKind::terminate())
                .expect("Failed to install SIGTERM handler")
                .recv()
                .await;
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            () = ctrl_c => {},
            () = terminate => {},
        }

        eprintln!();
        eprintln!("  \x1b[1;33m[bye]\x1b[0m    Graceful shutdown initiated...");
    };

    // Run both servers concurrently with the shutdown handler
    tokio::select! {
        result = bridge::serve(ws_listener, store, config.peer.clone()) => {
            result?;
        }
        result = http_server => {
            if let Err(e) = result {
                eprintln!("  \x1b[1;31m[error]\x1b[0m  HTTP server error: {e}");
            }
        }
        () = shutdown_signal => {}
    }

    Ok(())
}
