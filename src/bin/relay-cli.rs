use clap::{Parser, Subcommand};
use url::Url;

use path_relay::codec::EscapeScheme;

#[derive(Parser)]
#[command(name = "relay-cli")]
#[command(about = "Diagnostics for the path-escaping relay", long_about = None)]
struct Cli {
    /// Reserved namespace prefix.
    #[arg(long, default_value = "workflows/")]
    namespace: String,

    /// Marker substituted for the protected separator.
    #[arg(long, default_value = "__SLASH__")]
    marker: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Escape a path the way the client layer would
    Encode { path: String },
    /// Restore a marker-bearing path the way the backend does
    Decode { path: String },
    /// Report whether a target would be rewritten, and to what
    Check {
        path: String,

        /// Substring identifying the namespaced API (repeatable).
        #[arg(
            long = "api-marker",
            value_name = "INFIX",
            default_values_t = ["/api/userdata/".to_string(), "/userdata/".to_string()]
        )]
        api_markers: Vec<String>,
    },
    /// Send the escaped form of a URL and report the response
    Probe { url: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let scheme = EscapeScheme::new(&cli.namespace, &cli.marker);

    match cli.command {
        Commands::Encode { path } => {
            println!("{}", scheme.encode(&path));
        }
        Commands::Decode { path } => {
            println!("{}", scheme.decode(&path));
        }
        Commands::Check { path, api_markers } => {
            let eligible = api_markers.iter().any(|m| path.contains(m.as_str()));
            let rewritten = scheme.encode(&path);
            if !eligible {
                println!("not eligible: target does not address the namespaced API");
            } else if rewritten == path {
                println!("eligible, nothing to rewrite");
            } else {
                println!("eligible, would rewrite:");
                println!("  original:  {path}");
                println!("  rewritten: {rewritten}");
            }
        }
        Commands::Probe { url } => {
            let escaped = scheme.encode(&url);
            if escaped != url {
                println!("escaped target: {escaped}");
            }
            let target = Url::parse(&escaped)?;
            let res = reqwest::Client::new().get(target).send().await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    println!("status: {}", status);

    let text = res.text().await?;
    if text.is_empty() {
        return Ok(());
    }
    match serde_json::from_str::<serde_json::Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{text}"),
    }
    Ok(())
}
