use anyhow::Context;
use clap::Parser;
use colored::*;
use forkscount::cli::{Cli, Command};
use forkscount::client::{timeout_from_multiplier, ForksClient};
use forkscount::config::{setup_tracing, ServiceConfig};
use forkscount::service::ForksService;
use std::process::ExitCode;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    setup_tracing(cli.service.log_file.as_deref()).context("failed to set up logging")?;

    let config = ServiceConfig::resolve(cli.service.clone());

    match cli.command {
        Some(Command::Serve) => serve(config).await,
        None => run_once(config, cli.count, cli.timeout).await,
    }
}

/// Run the service in the foreground until Ctrl+C.
async fn serve(config: ServiceConfig) -> anyhow::Result<ExitCode> {
    let service = ForksService::new(config.project_source()?)
        .with_request_timeout(config.request_timeout);

    let listener = TcpListener::bind(&config.service_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.service_addr))?;

    println!("{}", "Forkscount Service".bold().green());
    println!("{}\n", "=".repeat(50).dimmed());
    println!("📡 Listening on http://{}", listener.local_addr()?);
    println!("\nPress Ctrl+C to stop the server\n");

    service.serve(listener, shutdown_signal()).await?;

    println!("✅ Server stopped");
    Ok(ExitCode::SUCCESS)
}

/// Start the service in-process, query it once and print the summary.
async fn run_once(config: ServiceConfig, count: i64, timeout: i64) -> anyhow::Result<ExitCode> {
    let service = ForksService::new(config.project_source()?)
        .with_request_timeout(config.request_timeout);

    let listener = TcpListener::bind(&config.service_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.service_addr))?;
    let addr = listener.local_addr()?;

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server = tokio::spawn(service.serve(listener, async move {
        let _ = stop_rx.await;
    }));

    let client = ForksClient::new(&format!("http://{}", addr))?;
    let outcome = client
        .fetch_latest(count, timeout_from_multiplier(timeout))
        .await;
    drop(client);

    let _ = stop_tx.send(());
    match server.await {
        Ok(Ok(())) => info!("service successfully shutdown"),
        Ok(Err(e)) => error!(error = %e, "service stopped with an error"),
        Err(e) => error!(error = %e, "service task failed"),
    }

    match outcome {
        Ok(summary) => {
            println!("{}", summary);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            error!(error = %e, "an error occurred while performing the request");
            eprintln!(
                "{}",
                "error while performing the request. See logs for more details".red()
            );
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for ctrl+c");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
