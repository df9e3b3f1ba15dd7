//! daytimed binary: CLI glue around the core library.
//!
//! The core never exits the process; this entry point is the only place a
//! `NetError` becomes a diagnostic plus a non-zero status.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use daytimed::{fetch, DaytimeServer, DAYTIME_PORT};

#[derive(Parser)]
#[command(name = "daytimed", about = "TCP time-protocol server and client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Bind, listen, and serve timestamps until killed.
    Serve {
        /// IP address to bind; read from stdin when omitted.
        address: Option<String>,
        /// Port to listen on.
        #[arg(long, default_value_t = DAYTIME_PORT)]
        port: u16,
    },
    /// Connect, print the server's reply, exit.
    Fetch {
        /// IP address to connect to; read from stdin when omitted.
        address: Option<String>,
        /// Port to connect to.
        #[arg(long, default_value_t = DAYTIME_PORT)]
        port: u16,
    },
}

/// Resolve the address argument, falling back to one line from stdin.
fn resolve_address(arg: Option<String>) -> io::Result<String> {
    match arg {
        Some(address) => Ok(address),
        None => {
            print!("address: ");
            io::stdout().flush()?;
            let mut line = String::new();
            io::stdin().lock().read_line(&mut line)?;
            Ok(line.trim().to_owned())
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "daytimed=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Serve { address, port } => resolve_address(address)
            .map_err(|e| e.to_string())
            .and_then(|address| {
                let server = DaytimeServer::bind(&address, port).map_err(|e| e.to_string())?;
                // Runs until the process is killed.
                server.run()
            }),
        Command::Fetch { address, port } => resolve_address(address)
            .map_err(|e| e.to_string())
            .and_then(|address| fetch(&address, port).map_err(|e| e.to_string()))
            .map(|reply| print!("{reply}")),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "fatal");
            ExitCode::FAILURE
        }
    }
}
