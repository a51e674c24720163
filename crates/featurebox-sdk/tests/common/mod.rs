//! Common test utilities for SDK integration tests

#![allow(dead_code)]

use featurebox_sdk::{
    AggregateFunction, Client, DataFrameTransformation, FeatureColumn, FileSource, LabelColumn,
    ResourceRegistration, TrainingSetRegistration, TransformationSource, Value, ValueType,
};
use std::collections::HashMap;
use tempfile::TempDir;

pub const TRANSACTIONS: &str = "\
TransactionID,CustomerID,TransactionAmount,IsFraud
T1,C5841053,25.0,False
T2,C2142763,27999.0,False
T3,C4417068,459.0,False
T4,C5342380,2060.0,True
T5,C9031234,1762.5,False
T6,C1410926,4000.0,False
T7,C5841053,75.0,True
T8,C1410926,6000.0,True
T9,C4417068,541.0,False
T10,C7126560,676.0,False
T11,C2142763,1.0,True
T12,C1410926,5000.0,False
T13,C5342380,40.0,False
";

/// A temporary data directory holding `transactions.csv`
pub struct Quickstart {
    pub dir: TempDir,
}

impl Quickstart {
    pub fn new() -> anyhow::Result<Self> {
        let dir = tempfile::tempdir()?;
        std::fs::write(dir.path().join("transactions.csv"), TRANSACTIONS)?;
        Ok(Self { dir })
    }

    pub fn client(&self) -> Client {
        Client::builder().with_data_dir(self.dir.path()).build()
    }
}

/// Register the quickstart resources. With `twice`, every call is repeated.
pub fn register_quickstart(client: &Client, twice: bool) -> anyhow::Result<()> {
    let rounds = if twice { 2 } else { 1 };
    for _ in 0..rounds {
        client.register_user("featureformer")?.make_default_owner()?;

        let local = client.register_local()?;
        let transactions = local.register_file(
            FileSource::new("transactions", "transactions.csv")
                .with_variant("quickstart")
                .with_description("A dataset of fraudulent transactions"),
        )?;
        let user = client.register_entity("user")?;

        let average = local.df_transformation(
            TransformationSource::new("average_user_transaction", average_transaction())
                .with_variant("quickstart")
                .with_description("the average transaction amount for a user"),
        )?;

        average.register_resources(
            ResourceRegistration::new(&user, "CustomerID")
                .with_inference_store(&local)
                .feature(avg_transactions(ValueType::Float32)),
        )?;
        transactions.register_resources(
            ResourceRegistration::new(&user, "CustomerID").label(fraudulent(ValueType::Bool)),
        )?;

        client.register_training_set(fraud_training("quickstart", "quickstart"))?;
    }
    Ok(())
}

pub fn average_transaction() -> DataFrameTransformation {
    DataFrameTransformation::new(("transactions", "quickstart").into()).aggregate(
        "CustomerID",
        "TransactionAmount",
        AggregateFunction::Mean,
    )
}

pub fn avg_transactions(value_type: ValueType) -> FeatureColumn {
    FeatureColumn::new("avg_transactions", "TransactionAmount", value_type).with_variant("quickstart")
}

pub fn fraudulent(value_type: ValueType) -> LabelColumn {
    LabelColumn::new("fraudulent", "IsFraud", value_type).with_variant("quickstart")
}

pub fn fraud_training(label_variant: &str, feature_variant: &str) -> TrainingSetRegistration {
    TrainingSetRegistration::new("fraud_training", ("fraudulent", label_variant))
        .with_variant("quickstart")
        .feature(("avg_transactions", feature_variant))
}

/// The fraud training set computed directly from the CSV text:
/// per-customer mean amount joined onto every row's fraud flag
pub fn expected_training_set() -> Vec<(f64, bool)> {
    let rows: Vec<(String, f64, bool)> = TRANSACTIONS
        .lines()
        .skip(1)
        .map(|line| {
            let cells: Vec<&str> = line.split(',').collect();
            (
                cells[1].to_string(),
                cells[2].parse().unwrap(),
                cells[3] == "True",
            )
        })
        .collect();

    let mut totals: HashMap<&str, (f64, usize)> = HashMap::new();
    for (customer, amount, _) in &rows {
        let entry = totals.entry(customer.as_str()).or_insert((0.0, 0));
        entry.0 += amount;
        entry.1 += 1;
    }

    rows.iter()
        .map(|(customer, _, fraud)| {
            let (sum, count) = totals[customer.as_str()];
            (sum / count as f64, *fraud)
        })
        .collect()
}

/// A training row as (feature, label) for comparisons
pub fn as_pair(features: &[Value], label: &Value) -> (f64, bool) {
    let feature = match features[0] {
        Value::Float(f) => f,
        ref other => panic!("expected float feature, got {:?}", other),
    };
    let label = match label {
        Value::Bool(b) => *b,
        other => panic!("expected bool label, got {:?}", other),
    };
    (feature, label)
}
