use anyhow::Result;
use tempfile::TempDir;

use higgs_dnn::data::loader::load_csv;
use higgs_dnn::data::split::{carve_validation, train_test_split};
use higgs_dnn::loss::LossType;
use higgs_dnn::network::spec::NetworkSpec;
use higgs_dnn::train::trainer::{evaluate, train_loop};
use higgs_dnn::{Network, Sgd, StandardScaler, TrainConfig};

/// Two well-separated blobs with deterministic pseudo-random spread, written
/// as HIGGS-format CSV rows (`label, f1, f2`). Class 1 ("signal") sits at
/// (3, 3), class 0 ("background") at (-3, -3) — easy enough that a small
/// network must learn it in a handful of epochs.
fn write_blob_csv(path: &std::path::Path, n: usize) -> Result<()> {
    use std::io::Write;
    let mut file = std::fs::File::create(path)?;
    for i in 0..n {
        let class = i % 2;
        let center = if class == 1 { 3.0 } else { -3.0 };
        let angle = i as f64 * 2.399;
        let r = (i as f64 * 0.31).sin().abs();
        let x = center + r * angle.cos();
        let y = center + r * angle.sin();
        writeln!(file, "{}.0,{:.6},{:.6}", class, x, y)?;
    }
    Ok(())
}

#[test]
fn full_pipeline_trains_and_persists_both_models() -> Result<()> {
    let dir = TempDir::new()?;
    let csv_path = dir.path().join("events.csv");
    write_blob_csv(&csv_path, 400)?;

    // Load, split, carve validation.
    let dataset = load_csv(&csv_path, None)?;
    assert_eq!(dataset.n_features(), 2);
    let (train, test) = train_test_split(dataset, 0.8)?;
    let (train, val) = carve_validation(train, 0.2)?;
    assert_eq!(train.len() + val.len(), 320);
    assert_eq!(test.len(), 80);

    // Fit the scaler on training data only, persist and reload it.
    let scaler = StandardScaler::fit(&train.features)?;
    let scaler_path = dir.path().join("scaler.json");
    scaler.save_json(&scaler_path)?;
    let scaler = StandardScaler::load_json(&scaler_path)?;

    let train_features = scaler.transform(&train.features)?;
    let val_features = scaler.transform(&val.features)?;
    let test_features = scaler.transform(&test.features)?;

    let config = TrainConfig::new(15, 16, LossType::BinaryCrossEntropy);
    let optimizer = Sgd::new(0.3);

    for spec in [NetworkSpec::shallow(2, 8), NetworkSpec::deep(2, 8)] {
        let mut network = Network::from_spec(&spec);
        let history = train_loop(
            &mut network,
            &train_features,
            &train.labels,
            Some(&val_features),
            Some(&val.labels),
            &optimizer,
            &config,
        );

        assert_eq!(history.len(), 15);
        let first = history.first().unwrap().train_loss;
        let last = history.last().unwrap().train_loss;
        assert!(last < first, "{}: loss went {} -> {}", spec.name, first, last);

        let (test_loss, test_accuracy) =
            evaluate(&mut network, &test_features, &test.labels, config.loss_type);
        assert!(test_loss.is_finite());
        assert!(
            test_accuracy > 0.9,
            "{}: test accuracy {} too low for separable blobs",
            spec.name,
            test_accuracy
        );

        // Persist weights and reload; predictions must survive the roundtrip.
        let model_path = dir.path().join(format!("{}.json", spec.name));
        network.save_json(&model_path)?;
        let mut reloaded = Network::load_json(&model_path)?;
        for row in test_features.iter().take(10) {
            let a = network.forward(row)[0];
            let b = reloaded.forward(row)[0];
            assert!((a - b).abs() < 1e-12, "{}: prediction drifted after reload", spec.name);
        }
    }

    Ok(())
}

#[test]
fn spec_json_roundtrip_preserves_architecture() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("deep.spec.json");

    let spec = NetworkSpec::deep(28, 300);
    spec.save_json(&path)?;
    let loaded = NetworkSpec::load_json(&path)?;

    assert_eq!(loaded.name, "deep");
    assert_eq!(loaded.layers.len(), spec.layers.len());
    assert_eq!(loaded.layers[0].fan_in, 28);
    assert_eq!(loaded.layers[5].size, 1);
    Ok(())
}

#[test]
fn scaler_is_fit_on_train_only() -> Result<()> {
    // The held-out rows must not influence the fitted statistics: shifting
    // the test side of the split leaves the scaler unchanged.
    let train_rows = vec![vec![1.0], vec![2.0], vec![3.0]];
    let scaler_a = StandardScaler::fit(&train_rows)?;

    let mut shifted = train_rows.clone();
    shifted.push(vec![100.0]); // would move the mean if included
    let scaler_b = StandardScaler::fit(&shifted[..3])?;

    assert_eq!(scaler_a.mean, scaler_b.mean);
    assert_eq!(scaler_a.std, scaler_b.std);
    Ok(())
}
