use std::{future::IntoFuture, process, sync::Arc, time::Duration};

use ephemeral_todo::{
    application::{backup::BackupService, error::AppError, store::TodoStore},
    cache::ListRegistry,
    config,
    infra::{
        backup::FsBackupSink,
        cache as cache_engine,
        error::InfraError,
        http::{self, ApiState},
        telemetry,
    },
};
use tokio::{net::TcpListener, sync::watch};
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| InfraError::configuration(err.to_string()))?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let cache = cache_engine::open(&settings.cache)?;
    let store = Arc::new(TodoStore::new(cache, Arc::new(ListRegistry::new())));
    let sink = Arc::new(FsBackupSink::new(settings.backup.directory.clone()));
    let backup = Arc::new(BackupService::new(store.clone(), sink));

    let router = http::build_router(ApiState { store, backup });

    let listener = TcpListener::bind(settings.server.addr)
        .await
        .map_err(InfraError::from)?;
    info!(
        target = "todo::serve",
        addr = %settings.server.addr,
        backup_dir = %settings.backup.directory.display(),
        "HTTP server listening"
    );

    let (stopping_tx, stopping_rx) = watch::channel(false);
    let server = axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            let _ = stopping_tx.send(true);
        })
        .into_future();

    tokio::select! {
        result = server => result.map_err(InfraError::from)?,
        () = drain_deadline(stopping_rx, settings.server.graceful_shutdown) => {
            warn!(
                target = "todo::serve",
                timeout_secs = settings.server.graceful_shutdown.as_secs(),
                "Graceful shutdown timed out; dropping open connections"
            );
        }
    }

    info!(target = "todo::serve", "HTTP server stopped");
    Ok(())
}

/// Resolves `grace` after shutdown begins; pending forever otherwise.
async fn drain_deadline(mut stopping: watch::Receiver<bool>, grace: Duration) {
    if stopping.wait_for(|stopping| *stopping).await.is_err() {
        std::future::pending::<()>().await;
    }
    tokio::time::sleep(grace).await;
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(target = "todo::serve", error = %err, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                warn!(target = "todo::serve", error = %err, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!(target = "todo::serve", "Shutdown signal received");
}
