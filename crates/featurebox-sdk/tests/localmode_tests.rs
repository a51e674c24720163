//! Integration tests for local mode
//!
//! Registers the quickstart fraud resources over a temporary
//! `transactions.csv`, then checks training sets, serving and
//! redefinition handling through the public client API.

mod common;

use common::{
    as_pair, avg_transactions, expected_training_set, fraud_training, fraudulent,
    register_quickstart, Quickstart,
};
use featurebox_sdk::{
    Client, FileSource, RegistryError, ResourceId, ResourceRegistration, RuntimeError, SdkError,
    TransformationSource, Value, ValueType,
};

fn applied() -> (Quickstart, Client) {
    let quickstart = Quickstart::new().unwrap();
    let client = quickstart.client();
    register_quickstart(&client, false).unwrap();
    client.apply().unwrap();
    (quickstart, client)
}

// ============================================================================
// Registration
// ============================================================================

#[test]
fn test_duplicate_resources() {
    let quickstart = Quickstart::new().unwrap();
    let client = quickstart.client();
    register_quickstart(&client, true).unwrap();

    let report = client.apply().unwrap();

    // user, provider, file, entity, transformation, feature, label, training set
    assert_eq!(report.created.len(), 8);
    assert_eq!(client.len().unwrap(), 8);
    assert_eq!(client.pending_len().unwrap(), 0);
}

#[test]
fn test_reapply_is_unchanged() {
    let (_quickstart, client) = applied();
    register_quickstart(&client, false).unwrap();

    let report = client.apply().unwrap();
    assert!(report.is_noop());
    assert_eq!(report.unchanged.len(), 8);
}

#[test]
fn test_resource_redefined_feature_type() {
    let (_quickstart, client) = applied();
    let local = client.register_local().unwrap();
    let user = client.register_entity("user").unwrap();
    let average = local
        .df_transformation(
            TransformationSource::new(
                "average_user_transaction",
                common::average_transaction(),
            )
            .with_variant("quickstart")
            .with_description("the average transaction amount for a user"),
        )
        .unwrap();
    average
        .register_resources(
            ResourceRegistration::new(&user, "CustomerID")
                .with_inference_store(&local)
                .feature(avg_transactions(ValueType::Float64)),
        )
        .unwrap();

    let err = client.apply().unwrap_err();
    assert!(err.is_redefinition());

    // The committed feature keeps its original type
    let dataset = client.training_set("fraud_training", "quickstart").unwrap();
    assert_eq!(dataset.len(), expected_training_set().len());
}

#[test]
fn test_resource_redefined_label_type() {
    let (_quickstart, client) = applied();
    let local = client.register_local().unwrap();
    let user = client.register_entity("user").unwrap();
    let transactions = local
        .register_file(
            FileSource::new("transactions", "transactions.csv")
                .with_variant("quickstart")
                .with_description("A dataset of fraudulent transactions"),
        )
        .unwrap();
    transactions
        .register_resources(
            ResourceRegistration::new(&user, "CustomerID").label(fraudulent(ValueType::String)),
        )
        .unwrap();

    assert!(client.apply().unwrap_err().is_redefinition());
}

#[test]
fn test_resource_redefined_label_bool_as_boolean() {
    let (_quickstart, client) = applied();
    let local = client.register_local().unwrap();
    let user = client.register_entity("user").unwrap();
    let transactions = local
        .register_file(
            FileSource::new("transactions", "transactions.csv")
                .with_variant("quickstart")
                .with_description("A dataset of fraudulent transactions"),
        )
        .unwrap();
    transactions
        .register_resources(
            ResourceRegistration::new(&user, "CustomerID").label(fraudulent(ValueType::Boolean)),
        )
        .unwrap();

    match client.apply().unwrap_err() {
        SdkError::Registry(RegistryError::ResourceRedefined { id, changed }) => {
            assert_eq!(id, ResourceId::label(&("fraudulent", "quickstart").into()));
            assert_eq!(changed, vec!["type".to_string()]);
        }
        other => panic!("Expected ResourceRedefined, got {:?}", other),
    }
}

#[test]
fn test_resource_redefined_training_set() {
    let (_quickstart, client) = applied();
    client
        .register_training_set(fraud_training("qwickstart", "quickstart"))
        .unwrap();

    match client.apply().unwrap_err() {
        SdkError::Registry(RegistryError::ResourceRedefined {
            id,
            changed,
        }) => {
            assert_eq!(
                id,
                ResourceId::training_set(&("fraud_training", "quickstart").into())
            );
            assert_eq!(changed, vec!["label.variant".to_string()]);
        }
        other => panic!("Expected ResourceRedefined, got {:?}", other),
    }
}

#[test]
fn test_resource_redefined_file_description() {
    let (_quickstart, client) = applied();
    client
        .register_local()
        .unwrap()
        .register_file(
            FileSource::new("transactions", "transactions.csv")
                .with_variant("quickstart")
                .with_description("Something else"),
        )
        .unwrap();

    assert!(client.apply().unwrap_err().is_redefinition());
    assert_eq!(client.pending_len().unwrap(), 0);
}

#[test]
fn test_new_variant_is_not_a_redefinition() {
    let (_quickstart, client) = applied();
    let local = client.register_local().unwrap();
    let user = client.register_entity("user").unwrap();
    let average = local
        .df_transformation(
            TransformationSource::new(
                "average_user_transaction",
                common::average_transaction(),
            )
            .with_variant("quickstart")
            .with_description("the average transaction amount for a user"),
        )
        .unwrap();
    average
        .register_resources(
            ResourceRegistration::new(&user, "CustomerID")
                .with_inference_store(&local)
                .feature(avg_transactions(ValueType::Float64).with_variant("v2")),
        )
        .unwrap();

    let report = client.apply().unwrap();
    assert_eq!(report.created.len(), 1);
}

// ============================================================================
// Training sets
// ============================================================================

#[test]
fn test_training_set() {
    let (_quickstart, client) = applied();
    let expected = expected_training_set();

    let dataset = client.training_set("fraud_training", "quickstart").unwrap();
    let rows: Vec<(f64, bool)> = dataset
        .iter()
        .map(|row| as_pair(row.features(), row.label()))
        .collect();

    assert_eq!(rows, expected);
}

#[test]
fn test_training_set_repeat() {
    let (_quickstart, client) = applied();
    let half = expected_training_set();
    let expected: Vec<_> = half.iter().chain(half.iter()).copied().collect();

    let dataset = client
        .training_set("fraud_training", "quickstart")
        .unwrap()
        .repeat(1);
    let rows: Vec<(f64, bool)> = dataset
        .iter()
        .map(|row| as_pair(row.features(), row.label()))
        .collect();

    assert_eq!(rows, expected);
}

#[test]
fn test_training_set_shuffle() {
    let (_quickstart, client) = applied();
    let expected = expected_training_set();

    let dataset = client
        .training_set("fraud_training", "quickstart")
        .unwrap()
        .shuffle(1);

    assert_eq!(dataset.iter().count(), expected.len());

    let key = |pair: &(f64, bool)| (pair.0.to_bits(), pair.1);
    let mut rows: Vec<_> = dataset
        .iter()
        .map(|row| key(&as_pair(row.features(), row.label())))
        .collect();
    let mut want: Vec<_> = expected.iter().map(key).collect();
    rows.sort();
    want.sort();
    assert_eq!(rows, want);
}

#[test]
fn test_training_set_batch() {
    let (_quickstart, client) = applied();
    let expected = expected_training_set();

    let batched = client
        .training_set("fraud_training", "quickstart")
        .unwrap()
        .batch(5)
        .unwrap();

    assert_eq!(batched.len(), 3);
    for (i, batch) in batched.iter().enumerate() {
        for (j, row) in batch.into_iter().enumerate() {
            assert_eq!(as_pair(row.features(), row.label()), expected[j + i * 5]);
        }
    }
}

#[test]
fn test_training_set_batch_zero() {
    let (_quickstart, client) = applied();
    let err = client
        .training_set("fraud_training", "quickstart")
        .unwrap()
        .batch(0)
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid batch size: 0");
}

#[test]
fn test_training_set_is_replayable() {
    let (_quickstart, client) = applied();
    let dataset = client
        .training_set("fraud_training", "quickstart")
        .unwrap()
        .shuffle(9);

    let first: Vec<_> = dataset.iter().cloned().collect();
    let second: Vec<_> = dataset.iter().cloned().collect();
    assert_eq!(first, second);
}

#[test]
fn test_source_cache_reused() {
    let (_quickstart, client) = applied();
    client.training_set("fraud_training", "quickstart").unwrap();
    client.training_set("fraud_training", "quickstart").unwrap();

    assert!(client.cache_stats().hits > 0);
}

// ============================================================================
// Serving
// ============================================================================

#[test]
fn test_feature() {
    let (_quickstart, client) = applied();
    let values = client
        .features(&[("avg_transactions", "quickstart")], ("CustomerID", "C1410926"))
        .unwrap();
    assert_eq!(values, vec![Value::Float(5000.0)]);
}

#[test]
fn test_feature_by_entity_name() {
    let (_quickstart, client) = applied();
    let values = client
        .features(&[("avg_transactions", "quickstart")], ("user", "C5841053"))
        .unwrap();
    assert_eq!(values, vec![Value::Float(50.0)]);
}

#[test]
fn test_feature_unknown_entity() {
    let (_quickstart, client) = applied();
    let err = client
        .features(&[("avg_transactions", "quickstart")], ("user", "C0000000"))
        .unwrap_err();
    assert!(matches!(
        err,
        SdkError::Runtime(RuntimeError::EntityNotFound { .. })
    ));
}

// ============================================================================
// Manifests
// ============================================================================

const MANIFEST: &str = r#"
users:
  - name: featureformer
    default_owner: true
providers:
  - name: local-mode
    description: This is local mode
    provider_type: local
entities:
  - name: user
sources:
  - name: transactions
    variant: quickstart
    description: A dataset of fraudulent transactions
    definition:
      type: primary_file
      path: transactions.csv
  - name: average_user_transaction
    variant: quickstart
    description: the average transaction amount for a user
    definition:
      type: transformation
      inputs:
        - name: transactions
          variant: quickstart
      steps:
        - op: aggregate
          group_by: CustomerID
          column: TransactionAmount
          function: mean
features:
  - name: avg_transactions
    variant: quickstart
    source:
      name: average_user_transaction
      variant: quickstart
    entity: user
    columns:
      entity: CustomerID
      value: TransactionAmount
    type: float32
    inference_store: local-mode
labels:
  - name: fraudulent
    variant: quickstart
    source:
      name: transactions
      variant: quickstart
    entity: user
    columns:
      entity: CustomerID
      value: IsFraud
    type: bool
training_sets:
  - name: fraud_training
    variant: quickstart
    label:
      name: fraudulent
      variant: quickstart
    features:
      - name: avg_transactions
        variant: quickstart
"#;

#[test]
fn test_manifest_matches_programmatic_registration() {
    let quickstart = Quickstart::new().unwrap();
    let client = quickstart.client();

    let ids = client.register_manifest_str(MANIFEST).unwrap();
    assert_eq!(ids.len(), 8);
    client.apply().unwrap();

    // Same definitions through the handles: nothing new, nothing redefined
    register_quickstart(&client, false).unwrap();
    let report = client.apply().unwrap();
    assert!(report.is_noop());

    let rows: Vec<(f64, bool)> = client
        .training_set("fraud_training", "quickstart")
        .unwrap()
        .iter()
        .map(|row| as_pair(row.features(), row.label()))
        .collect();
    assert_eq!(rows, expected_training_set());
}

#[test]
fn test_manifest_label_redeclared_as_boolean() {
    let quickstart = Quickstart::new().unwrap();
    let client = quickstart.client();
    client.register_manifest_str(MANIFEST).unwrap();
    client.apply().unwrap();

    client
        .register_manifest_str(&MANIFEST.replace("type: bool", "type: boolean"))
        .unwrap();
    let err = client.apply().unwrap_err();
    assert!(err.is_redefinition());
    assert_eq!(client.len().unwrap(), 8);
}

#[test]
fn test_manifest_owner_does_not_leak() {
    let quickstart = Quickstart::new().unwrap();
    let client = quickstart.client();
    client.register_manifest_str(MANIFEST).unwrap();

    let refunds = client
        .register_local()
        .unwrap()
        .register_file(FileSource::new("refunds", "transactions.csv"))
        .unwrap();
    client.apply().unwrap();

    let committed = client
        .resource(&ResourceId::source(refunds.name_variant()))
        .unwrap()
        .unwrap();
    assert_eq!(committed.owner(), None);
}

#[test]
fn test_manifest_file() {
    let quickstart = Quickstart::new().unwrap();
    let path = quickstart.dir.path().join("resources.yaml");
    std::fs::write(&path, MANIFEST).unwrap();

    let client = quickstart.client();
    client.register_manifest_file(&path).unwrap();
    client.apply().unwrap();
    assert_eq!(client.len().unwrap(), 8);
}
