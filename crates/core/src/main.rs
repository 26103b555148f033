use std::sync::Arc;

use anyhow::Context;
use promptbase_core::{
    config::Config,
    db::{Db, PgPromptStore},
    web,
};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        },
    };

    config.logging.init();
    info!(addr = %config.addr, "promptbase starting");

    // Without a database there is nothing to serve
    let pool = Db::connect(&config.database_url, config.max_connections)
        .await
        .context("failed to open database and create the prompts table")?;

    let store = Arc::new(PgPromptStore::new(pool.clone()));
    let served = web::serve(config.addr, store).await;

    pool.close().await;
    served.context("server error")?;
    Ok(())
}
