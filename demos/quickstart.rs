//! Quickstart Example
//!
//! Registers the fraud-detection resources against `demos/data/transactions.csv`,
//! applies them, then reads the training set and serves a feature:
//! - `transactions`: the CSV file source
//! - `average_user_transaction`: mean transaction amount per customer
//! - `avg_transactions` feature and `fraudulent` label keyed by `user`
//! - `fraud_training`: the label joined with the feature
//!
//! Run from the workspace root: `cargo run --example quickstart`

use featurebox_sdk::{
    AggregateFunction, Client, DataFrameTransformation, FeatureColumn, FileSource, LabelColumn,
    ResourceRegistration, TrainingSetRegistration, TransformationSource, ValueType,
};

fn main() -> anyhow::Result<()> {
    init_tracing()?;

    println!("{}", "=".repeat(80));
    println!("featurebox quickstart - local mode");
    println!("{}", "=".repeat(80));

    let client = Client::builder().with_data_dir("demos/data").build();

    client.register_user("featureformer")?.make_default_owner()?;
    let local = client.register_local()?;

    let transactions = local.register_file(
        FileSource::new("transactions", "transactions.csv")
            .with_variant("quickstart")
            .with_description("A dataset of fraudulent transactions"),
    )?;

    let average_user_transaction = local.df_transformation(
        TransformationSource::new(
            "average_user_transaction",
            DataFrameTransformation::new(transactions.name_variant().clone()).aggregate(
                "CustomerID",
                "TransactionAmount",
                AggregateFunction::Mean,
            ),
        )
        .with_variant("quickstart")
        .with_description("the average transaction amount for a user"),
    )?;

    let user = client.register_entity("user")?;

    average_user_transaction.register_resources(
        ResourceRegistration::new(&user, "CustomerID")
            .with_inference_store(&local)
            .feature(
                FeatureColumn::new("avg_transactions", "TransactionAmount", ValueType::Float32)
                    .with_variant("quickstart"),
            ),
    )?;

    transactions.register_resources(
        ResourceRegistration::new(&user, "CustomerID").label(
            LabelColumn::new("fraudulent", "IsFraud", ValueType::Bool).with_variant("quickstart"),
        ),
    )?;

    client.register_training_set(
        TrainingSetRegistration::new("fraud_training", ("fraudulent", "quickstart"))
            .with_variant("quickstart")
            .feature(("avg_transactions", "quickstart")),
    )?;

    let report = client.apply()?;
    println!("✓ Applied {} resources", report.created.len());
    println!();

    // Training set, shuffled and batched
    let dataset = client.training_set("fraud_training", "quickstart")?;
    println!("Training set: {} rows", dataset.len());

    let batches = dataset.shuffle(1).batch(8)?;
    for (i, batch) in batches.iter().enumerate().take(2) {
        println!("{}", "-".repeat(80));
        println!("Batch {} ({} rows)", i, batch.len());
        for row in &batch {
            println!("  features={:?} label={}", row.features(), row.label());
        }
    }
    println!("{}", "-".repeat(80));

    // Online serving
    let values = client.features(
        &[("avg_transactions", "quickstart")],
        ("CustomerID", "C1410926"),
    )?;
    println!("avg_transactions for C1410926: {:?}", values);

    let stats = client.cache_stats();
    println!(
        "Source cache: {} hits, {} misses ({:.1}% hit rate)",
        stats.hits,
        stats.misses,
        stats.hit_rate()
    );

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
