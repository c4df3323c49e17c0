use forumbot::{config::Config, logging, run};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenvy::dotenv().ok();
    logging::init()?;

    let config = Config::from_env()?;
    run(config).await?;

    Ok(())
}
