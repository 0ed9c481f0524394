use std::fs::File;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use simplelog::{ConfigBuilder, WriteLogger};

use netbridge::core::action::{format_outcome, prepare_request};
use netbridge::core::config::{self, CliOverrides};
use netbridge::core::state::App;
use netbridge::network::{HttpClient, NativeHttpClient, RequestKind};
use netbridge::service::RequestService;
use netbridge::tui;

#[derive(Parser)]
#[command(name = "netbridge", about = "HTTP request bridge demo")]
struct Args {
    /// URL to prefill in the URL field
    #[arg(short, long)]
    url: Option<String>,

    /// Parameters to prefill, as a flat JSON object, e.g. '{"userId": 1}'
    #[arg(short, long)]
    params: Option<String>,

    /// Log level: off, error, warn, info, debug, trace
    #[arg(long)]
    log_level: Option<String>,

    /// Run one request, print the result and exit instead of opening the TUI
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// GET the URL
    Get { url: String },
    /// GET the URL with the parameters appended as a query string
    GetWithParams { url: String, params: String },
    /// POST to the URL with an empty body
    Post { url: String },
    /// POST the parameters to the URL as a JSON body
    PostWithParams { url: String, params: String },
}

impl Command {
    fn into_parts(self) -> (RequestKind, String, String) {
        match self {
            Command::Get { url } => (RequestKind::Get, url, String::new()),
            Command::GetWithParams { url, params } => (RequestKind::GetWithParams, url, params),
            Command::Post { url } => (RequestKind::Post, url, String::new()),
            Command::PostWithParams { url, params } => (RequestKind::PostWithParams, url, params),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let loaded = config::load_config();
    let default_config = config::NetbridgeConfig::default();
    let file_config = loaded.as_ref().map_or(&default_config, |l| &l.config);
    let resolved = config::resolve(
        file_config,
        &CliOverrides {
            url: args.url,
            params: args.params,
            log_level: args.log_level,
        },
    );

    // File logger so log lines never land on the TUI
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    // Config was read before the logger existed; report it now
    match &loaded {
        Ok(loaded) => loaded.log_source(),
        Err(e) => {
            eprintln!("Warning: {e}. Using defaults.");
            log::warn!("{e}; using default config");
        }
    }

    let client: Arc<dyn HttpClient> = Arc::new(NativeHttpClient::new());
    let service = RequestService::new(client);
    log::info!("netbridge starting up with adapter {}", service.client_name());

    match args.command {
        Some(command) => {
            let (kind, url, params) = command.into_parts();
            run_once(&service, &url, &params, kind).await
        }
        None => match tui::run(App::from_config(service, &resolved)) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Terminal error: {e}");
                ExitCode::FAILURE
            }
        },
    }
}

/// One request without the TUI. The result goes to stdout, errors to stderr.
async fn run_once(
    service: &RequestService,
    url: &str,
    params_text: &str,
    kind: RequestKind,
) -> ExitCode {
    let descriptor = match prepare_request(url, params_text, kind) {
        Ok(descriptor) => descriptor,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };

    let outcome = service.send(&descriptor).await;
    let text = format_outcome(&outcome);
    if outcome.is_ok() {
        println!("{text}");
        ExitCode::SUCCESS
    } else {
        eprintln!("{text}");
        ExitCode::FAILURE
    }
}
