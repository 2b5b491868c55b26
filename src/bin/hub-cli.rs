use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "hub-cli")]
#[command(about = "Management CLI for the proxy hub admin API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8081")]
    url: String,

    #[arg(short, long, default_value = "CHANGE_ME_IN_PRODUCTION")]
    key: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the proxy's current routing table
    Routes,
    /// Run a reconciliation pass and print the report
    Check,
    /// Point the hub at a new proxy instance
    Relocate {
        /// New proxy admin API URL
        #[arg(long)]
        api_url: Option<String>,
        /// New proxy auth token
        #[arg(long)]
        auth_token: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", cli.key))?,
    );

    match cli.command {
        Commands::Routes => {
            let res = client
                .get(format!("{}/api/proxy", cli.url))
                .headers(headers)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Check => {
            let res = client
                .post(format!("{}/api/proxy", cli.url))
                .headers(headers)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Relocate { api_url, auth_token } => {
            let mut body = serde_json::Map::new();
            if let Some(api_url) = api_url {
                body.insert("api_url".to_string(), Value::String(api_url));
            }
            if let Some(auth_token) = auth_token {
                body.insert("auth_token".to_string(), Value::String(auth_token));
            }
            let res = client
                .patch(format!("{}/api/proxy", cli.url))
                .headers(headers)
                .json(&body)
                .send()
                .await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: Admin API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
