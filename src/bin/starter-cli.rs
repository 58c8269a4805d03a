use clap::{Parser, Subcommand};
use serde_json::Value;

use web_starter::demo::get_random_count;
use web_starter::routing::{is_active, MatchMode, Route};
use web_starter::ui::NavLink;

#[derive(Parser)]
#[command(name = "starter-cli")]
#[command(about = "Inspect navigation matching and query a running site", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a nav target is active at a location
    Match {
        #[arg(short, long)]
        location: Route,
        #[arg(short, long)]
        target: Route,
        #[arg(long)]
        exact: bool,
    },
    /// Render a nav link as HTML
    NavLink {
        #[arg(short, long)]
        location: Route,
        #[arg(short, long)]
        target: Route,
        #[arg(long)]
        exact: bool,
        #[arg(long)]
        disabled: bool,
        #[arg(long)]
        class: Option<String>,
        #[arg(long)]
        active_class: Option<String>,
        #[arg(long)]
        inactive_class: Option<String>,
        #[arg(long)]
        disabled_class: Option<String>,
        #[arg(long)]
        label: Option<String>,
    },
    /// Draw a random count
    Count {
        #[arg(long, default_value_t = 1)]
        min: u32,
        #[arg(long, default_value_t = 10)]
        max: u32,
    },
    /// Check site health
    Status {
        #[arg(short, long, default_value = "http://localhost:3000")]
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Match { location, target, exact } => {
            let active = is_active(&location, &target, MatchMode::from_exact(exact));
            println!("{}", if active { "active" } else { "inactive" });
        }
        Commands::NavLink {
            location,
            target,
            exact,
            disabled,
            class,
            active_class,
            inactive_class,
            disabled_class,
            label,
        } => {
            let mut link = NavLink::new(target).exact(exact).disabled(disabled);
            if let Some(label) = label {
                link = link.label(label);
            }
            if let Some(class) = &class {
                link = link.class(class);
            }
            if let Some(class) = &active_class {
                link = link.active_class(class);
            }
            if let Some(class) = &inactive_class {
                link = link.inactive_class(class);
            }
            if let Some(class) = &disabled_class {
                link = link.disabled_class(class);
            }
            println!("{}", link.render(&location));
        }
        Commands::Count { min, max } => {
            println!("{}", get_random_count(min, max));
        }
        Commands::Status { url } => {
            let res = reqwest::get(format!("{}/health", url.trim_end_matches('/'))).await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: site returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
