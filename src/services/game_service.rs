use crate::config::cli::{BuildArgs, Commands, RenderArgs};
use crate::config::Config;
use crate::error::Result;
use crate::infrastructure::{FileSystemStore, ManifestClient, ManifestSource};
use crate::services::catalog::{BuildOptions, BuildReport, CatalogService};
use crate::services::grid::{self, AppState};
use tracing::info;

/// Entry point that turns the parsed command line into a build or a render.
pub struct GameService {
    config: Config,
}

pub enum Outcome {
    Built(BuildReport),
    Rendered(AppState),
}

impl GameService {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub async fn run(&self) -> Result<Outcome> {
        match self.config.command() {
            Commands::Build(args) => self.build(&args).await.map(Outcome::Built),
            Commands::Render(args) => self.render(&args).await.map(Outcome::Rendered),
        }
    }

    async fn build(&self, args: &BuildArgs) -> Result<BuildReport> {
        info!("Building manifest under {:?}", self.config.paths.root);

        let options = BuildOptions::new(
            &args.placeholder_pattern,
            args.prune_thumbnails,
            !self.config.args.quiet,
        )?;
        let store = FileSystemStore::new(self.config.paths.clone());
        let report = CatalogService::new(store, options).build().await?;

        info!(
            "Build finished: {} games, {} without meta.json, {} thumbnails generated, {} pruned",
            report.games,
            report.fallbacks,
            report.generated_thumbnails,
            report.pruned_thumbnails.len()
        );
        Ok(report)
    }

    async fn render(&self, args: &RenderArgs) -> Result<AppState> {
        let client = ManifestClient::new(self.config.fetch_timeout())?;
        let source = ManifestSource::parse(&args.manifest, &self.config.paths);
        let out = self.config.paths.resolve(&args.out);

        grid::render_to_file(&client, &source, args.query.as_deref(), &out).await
    }
}
