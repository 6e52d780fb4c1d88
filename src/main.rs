use clap::{Parser, Subcommand};
use log::{error, info};
use recipe_pages::manifest::unix_now;
use recipe_pages::{PageOutcome, Site, SiteConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "recipe-pages")]
#[command(about = "Static recipe site generated from a Contentful space")]
#[command(long_about = "\
Static recipe site generated from a Contentful space

Credentials are read from recipes.toml, RECIPES__* variables, or
CONTENTFUL_SPACE_ID / CONTENTFUL_ACCESS_KEY.

Routes:
  /                  every recipe entry
  /recipes/{slug}    one recipe; unknown slugs redirect to /")]
#[command(version)]
struct Cli {
    /// Output directory (overrides config)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the index and every recipe page
    Build,
    /// Regenerate existing pages whose revalidation interval has elapsed
    Revalidate,
    /// Generate a single recipe page on demand
    Page {
        /// Slug of the recipe
        slug: String,
    },
    /// Print the recipe paths that would be pre-built
    Paths,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = SiteConfig::load()?;
    if let Some(output) = cli.output {
        config.output_dir = output;
    }

    let site = Site::from_config(&config).inspect_err(|e| error!("{}", e))?;

    match cli.command {
        Command::Build => {
            let report = site.build(unix_now()).await?;
            for (route, reason) in &report.skipped {
                error!("{}: {}", route, reason);
            }
        }
        Command::Revalidate => {
            let report = site.revalidate(unix_now()).await?;
            if report.written.is_empty() && report.redirected.is_empty() {
                info!("nothing to revalidate");
            }
            for route in &report.written {
                info!("regenerated {}", route);
            }
        }
        Command::Page { slug } => match site.request_page(&slug, unix_now()).await? {
            PageOutcome::Fresh(path) => println!("{} (fresh)", path.display()),
            PageOutcome::Generated(path) => println!("{}", path.display()),
            PageOutcome::Redirected(redirect) => {
                let body = serde_json::json!({ "redirect": redirect });
                println!("{}", serde_json::to_string_pretty(&body)?);
            }
        },
        Command::Paths => {
            let paths = site.paths().await?;
            println!("{}", serde_json::to_string_pretty(&paths)?);
        }
    }

    Ok(())
}
