use todo_board_lib::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env()?;

    // Initialize logging; the guard flushes the file writer on exit
    let _log_guard = rolling_logger::init_logger(&config.log_dir, "todo-board")?;

    tracing::info!(
        store = ?config.store,
        static_dir = ?config.static_dir,
        "Starting todo board server"
    );

    todo_board_lib::run(config).await
}
