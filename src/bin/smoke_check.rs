use anyhow::ensure;
use clap::Parser;
use group_provisioner::utils::logger;
use std::time::Duration;

/// Response headers a hardened deployment is expected to send. Missing ones
/// are warned about but do not fail the check.
const SECURITY_HEADERS: &[&str] = &[
    "X-Content-Type-Options",
    "X-Frame-Options",
    "X-XSS-Protection",
];

#[derive(Parser)]
#[command(name = "smoke-check")]
#[command(about = "Post-deploy smoke check against a freshly deployed app")]
struct Args {
    /// URL to probe
    #[arg(long, default_value = "http://app:8080/")]
    url: String,

    /// Seconds to wait before probing so the app can come up
    #[arg(long, default_value = "5")]
    wait_seconds: u64,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout_seconds: u64,

    #[arg(long, help = "Enable verbose output")]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    if let Err(e) = probe(&args).await {
        tracing::error!("❌ Smoke check failed: {:#}", e);
        eprintln!("❌ Smoke check failed: {:#}", e);
        std::process::exit(1);
    }

    println!("✅ Smoke check completed successfully");
}

async fn probe(args: &Args) -> anyhow::Result<()> {
    if args.wait_seconds > 0 {
        tracing::info!("⏳ Waiting {}s for the app to come up", args.wait_seconds);
        tokio::time::sleep(Duration::from_secs(args.wait_seconds)).await;
    }

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(args.timeout_seconds))
        .build()?;

    tracing::info!("🔍 Probing {}", args.url);
    let response = client.get(&args.url).send().await?;
    ensure!(
        response.status().is_success(),
        "unexpected status {}",
        response.status()
    );

    for header in SECURITY_HEADERS {
        if !response.headers().contains_key(*header) {
            tracing::warn!("⚠️ Missing security header {}", header);
        }
    }

    Ok(())
}
