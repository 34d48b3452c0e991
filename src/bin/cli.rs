//! Climate CLI
//!
//! Command-line client for the Climate API:
//! - Precipitation over the trailing year
//! - Station inventory
//! - Most active station's temperatures
//! - Temperature statistics for a date range
//! - Server status and default config generation

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "climate")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Query daily precipitation and temperature observations")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL
    #[arg(long, default_value = "http://localhost:5000", global = true)]
    pub api_url: String,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Precipitation by date over the last year of data
    Precipitation,

    /// List all stations
    Stations,

    /// Temperatures at the most active station over the last year of data
    Tobs,

    /// Temperature min/avg/max from START (through END, if given)
    Stats {
        /// Start date (YYYY-MM-DD)
        start: String,
        /// End date (YYYY-MM-DD), inclusive
        end: Option<String>,
    },

    /// Show server status
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let json = cli.format == "json";

    match cli.command {
        Commands::Precipitation => {
            let data = fetch_json(&client, &cli.api_url, "/api/v1.0/precipitation").await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&data)?);
            } else {
                print_precipitation(&data);
            }
        }

        Commands::Stations => {
            let data = fetch_json(&client, &cli.api_url, "/api/v1.0/stations").await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&data)?);
            } else {
                let stations = data.as_array().cloned().unwrap_or_default();
                println!("{} stations", stations.len());
                println!("{}", "-".repeat(20));
                for station in stations {
                    println!("{}", station.as_str().unwrap_or("-"));
                }
            }
        }

        Commands::Tobs => {
            let data = fetch_json(&client, &cli.api_url, "/api/v1.0/tobs").await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&data)?);
            } else {
                let values: Vec<f64> = data
                    .as_array()
                    .map(|a| a.iter().filter_map(Value::as_f64).collect())
                    .unwrap_or_default();
                println!("{} observations", values.len());
                for chunk in values.chunks(10) {
                    let line: Vec<String> = chunk.iter().map(|v| format!("{:>5.1}", v)).collect();
                    println!("{}", line.join(" "));
                }
            }
        }

        Commands::Stats { start, end } => {
            let path = match end {
                Some(ref end) => format!("/api/v1.0/{}/{}", start, end),
                None => format!("/api/v1.0/{}", start),
            };
            let data = fetch_json(&client, &cli.api_url, &path).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&data)?);
            } else {
                print_stats(&data);
            }
        }

        Commands::Status => {
            let data = fetch_json(&client, &cli.api_url, "/health").await.with_context(|| {
                format!(
                    "cannot reach Climate API at {} (is `cargo run --bin climate-api` running?)",
                    cli.api_url
                )
            })?;

            println!("Climate v{}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("API Status: {}", data["status"].as_str().unwrap_or("unknown"));
            println!("Store: {}", data["store"].as_str().unwrap_or("unknown"));
            if let Some(uptime) = data["uptime_seconds"].as_u64() {
                println!("Uptime: {}", format_duration(uptime));
            }
        }

        Commands::Config { output } => {
            let content = climate::config::generate_default_config();

            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("failed to write {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

/// GET a JSON document, turning API error bodies into errors
async fn fetch_json(client: &reqwest::Client, base: &str, path: &str) -> anyhow::Result<Value> {
    let response = client.get(format!("{}{}", base, path)).send().await?;
    let status = response.status();
    let body: Value = response.json().await?;

    if !status.is_success() {
        let message = body["error"]["message"].as_str().unwrap_or("unknown error");
        bail!("request failed ({}): {}", status, message);
    }

    Ok(body)
}

fn print_precipitation(data: &Value) {
    let entries = match data.as_object() {
        Some(e) if !e.is_empty() => e,
        _ => {
            println!("No precipitation data");
            return;
        }
    };

    println!("{:<12} | {:>6}", "Date", "Prcp");
    println!("{}", "-".repeat(21));
    for (date, prcp) in entries {
        let value = prcp
            .as_f64()
            .map(|v| format!("{:.2}", v))
            .unwrap_or_else(|| "-".to_string());
        println!("{:<12} | {:>6}", date, value);
    }
}

fn print_stats(data: &Value) {
    let format_temp = |key: &str| {
        data[key]
            .as_f64()
            .map(|v| format!("{:.1}", v))
            .unwrap_or_else(|| "-".to_string())
    };

    print!("{}", data["Start Date"].as_str().unwrap_or("-"));
    match data["End Date"].as_str() {
        Some(end) => println!(" to {}", end),
        None => println!(" onward"),
    }
    println!("  TMIN: {}", format_temp("TMIN"));
    println!("  TAVG: {}", format_temp("TAVG"));
    println!("  TMAX: {}", format_temp("TMAX"));
}

fn format_duration(seconds: u64) -> String {
    let days = seconds / 86400;
    let hours = (seconds % 86400) / 3600;
    let minutes = (seconds % 3600) / 60;

    if days > 0 {
        format!("{}d {}h {}m", days, hours, minutes)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}
