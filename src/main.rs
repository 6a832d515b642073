use clap::Parser;
use group_provisioner::utils::{logger, validation::Validate};
use group_provisioner::{CliConfig, GroupPipeline, LocalStorage, ProvisionEngine, ProvisionOutcome};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("🚀 Starting group-provisioner CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    // The source flag is a plain file path, so the storage root is the
    // current directory; absolute paths pass through the join untouched.
    let storage = LocalStorage::new(".".to_string());
    let pipeline = match GroupPipeline::new(storage, config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            tracing::error!("❌ Failed to build the pipeline: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let engine = ProvisionEngine::new(pipeline);

    match engine.run().await {
        Ok(report) => {
            println!(
                "✅ Batch finished: {} created, {} failed ({} rows in {} ms)",
                report.created_count(),
                report.failed_count(),
                report.len(),
                report.elapsed_ms
            );
            for row in &report.rows {
                if let ProvisionOutcome::Failed { reason } = &row.outcome {
                    println!("⚠️ Row {} ('{}'): {}", row.row, row.group_name, reason);
                }
            }
            // Row failures never fail the invocation; the report carries them.
        }
        Err(e) => {
            tracing::error!("❌ Provisioning failed: {}", e);
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    }

    Ok(())
}
