//! Manifest Example
//!
//! Loads the client configuration (`.env`, `config/featurebox.*`,
//! `FEATUREBOX_*`), registers every resource declared in
//! `demos/resources.yaml` and prints the first rows of the training set.
//!
//! Run from the workspace root: `cargo run --example manifest`

use featurebox_sdk::{ClientBuilder, ClientConfig};

fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let mut config = ClientConfig::load()?;
    if config.data_dir.is_none() {
        config.data_dir = Some("demos/data".into());
    }
    let client = ClientBuilder::new().with_config(config).build();

    let ids = client.register_manifest_file("demos/resources.yaml")?;
    println!("Registered {} resources from manifest", ids.len());

    let report = client.apply()?;
    for id in &report.created {
        println!("  + {}", id);
    }

    let dataset = client.training_set("fraud_training", "quickstart")?;
    println!();
    println!("fraud_training.quickstart: {} rows", dataset.len());
    for row in dataset.iter().take(10) {
        println!("  features={:?} label={}", row.features(), row.label());
    }

    Ok(())
}

/// Initialize tracing subscriber
fn init_tracing() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "featurebox_sdk=info,featurebox_runtime=info,featurebox_registry=info".into()
            }),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}
