use game_grid::config::Config;
use game_grid::error::Result;
use game_grid::services::game_service::{GameService, Outcome};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::new();

    tracing_subscriber::fmt()
        .with_max_level(config.log_level())
        .with_writer(std::io::stderr)
        .init();

    match GameService::new(config).run().await {
        Ok(Outcome::Built(report)) => {
            info!("Done: {} games in {:?}", report.games, report.manifest_path);
            Ok(())
        }
        Ok(Outcome::Rendered(state)) => {
            info!("Rendered {} cards", state.cards().len());
            Ok(())
        }
        Err(e) => {
            error!("{}", e);
            Err(e)
        }
    }
}
