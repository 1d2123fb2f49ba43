use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "hitokoto-cli")]
#[command(about = "Command line client for the Hitokoto API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    /// Route prefix of the server ("/api" for per-request deployments).
    #[arg(short, long, default_value = "")]
    prefix: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a random sentence
    Quote {
        /// Category id
        #[arg(short)]
        c: Option<String>,
        /// Minimum sentence length
        #[arg(long)]
        min: Option<i64>,
        /// Maximum sentence length
        #[arg(long)]
        max: Option<i64>,
    },
    /// Show per-category sentence counts
    Status,
    /// Check the server is alive
    Ping,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = format!("{}{}", cli.url.trim_end_matches('/'), cli.prefix);

    let res = match cli.command {
        Commands::Quote { c, min, max } => {
            let mut query: Vec<(&str, String)> = Vec::new();
            if let Some(c) = c {
                query.push(("c", c));
            }
            if let Some(min) = min {
                query.push(("min", min.to_string()));
            }
            if let Some(max) = max {
                query.push(("max", max.to_string()));
            }
            client.get(format!("{}/", base)).query(&query).send().await?
        }
        Commands::Status => client.get(format!("{}/status", base)).send().await?,
        Commands::Ping => client.get(format!("{}/ping", base)).send().await?,
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let json: Value = res.json().await?;
    if status.is_success() {
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        eprintln!("Error: server returned status {}", status);
        eprintln!("{}", serde_json::to_string_pretty(&json)?);
    }
    Ok(())
}
