use clap::Parser;

use gitflow_release::config::Config;
use gitflow_release::git::Git2Repository;
use gitflow_release::orchestrator::Orchestrator;
use gitflow_release::publish::{GitHubPublisher, ReleasePublisher};
use gitflow_release::ui::{Reporter, Verbosity};

#[derive(clap::Parser)]
#[command(
    name = "gitflow-release",
    about = "Compute and apply semantic release versions from git-flow branches"
)]
struct Args {
    #[arg(short, long, help = "Custom override file path")]
    config: Option<String>,

    #[arg(short, long, help = "Repository path (defaults to the current directory)")]
    repo: Option<String>,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,

    #[arg(short, long, help = "Print version information")]
    version: bool,
}

fn main() {
    let args = Args::parse();

    if args.version {
        println!("gitflow-release {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    let config = match Config::resolve(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            Reporter::new(Verbosity::Error).error(&e.to_string());
            std::process::exit(1);
        }
    };

    let reporter = Reporter::new(config.verbosity);

    let repo = match Git2Repository::open(args.repo.as_deref().unwrap_or(".")) {
        Ok(repo) => repo,
        Err(e) => {
            reporter.error(&format!("Cannot open repository: {}", e));
            std::process::exit(1);
        }
    };

    // Validation guarantees token and repository are present when
    // publishing is enabled.
    let publisher = match (
        config.publish_enabled,
        &config.github.token,
        &config.github.repository,
    ) {
        (true, Some(token), Some(repository)) => Some(GitHubPublisher::new(
            config.github.api_url.as_str(),
            repository.as_str(),
            token.as_str(),
        )),
        _ => None,
    };
    let publisher_ref = publisher.as_ref().map(|p| p as &dyn ReleasePublisher);

    let orchestrator = Orchestrator::new(&config, &repo, publisher_ref, &reporter);
    if let Err(e) = orchestrator.run(args.dry_run) {
        reporter.error(&e.to_string());
        std::process::exit(1);
    }
}
