use std::path::PathBuf;

use clap::Parser;

use higgs_dnn::data::fetch::{ensure_dataset, HIGGS_URL};
use higgs_dnn::data::loader::load_csv;
use higgs_dnn::data::split::{carve_validation, train_test_split};
use higgs_dnn::logging;
use higgs_dnn::network::spec::NetworkSpec;
use higgs_dnn::train::trainer::{evaluate, train_loop};
use higgs_dnn::{HiggsError, Network, Result, Sgd, StandardScaler, TrainConfig};

/// Trains the shallow and deep HIGGS benchmark classifiers and persists the
/// fitted scaler and both models to the output directory.
#[derive(Debug, Parser)]
#[command(name = "higgs-dnn", version, about)]
struct Cli {
    /// Where the decompressed CSV lives (downloaded here if missing).
    #[arg(long, default_value = "data/HIGGS.csv")]
    data_path: PathBuf,

    /// Dataset URL; a .gz URL is decompressed during download.
    #[arg(long, default_value = HIGGS_URL)]
    url: String,

    /// Directory for scaler.json, shallow.json and deep.json.
    #[arg(long, default_value = "models")]
    out_dir: PathBuf,

    /// Cap on CSV rows read (the full dataset has 11M).
    #[arg(long, default_value_t = 100_000)]
    max_rows: usize,

    /// Fraction of loaded rows used for training; the rest is held out.
    #[arg(long, default_value_t = 0.8)]
    train_fraction: f64,

    /// Fraction of the training subset carved off for validation.
    #[arg(long, default_value_t = 0.2)]
    val_fraction: f64,

    /// Hidden layer width for both architectures.
    #[arg(long, default_value_t = 300)]
    hidden: usize,

    #[arg(long, default_value_t = 10)]
    epochs: usize,

    #[arg(long, default_value_t = 128)]
    batch_size: usize,

    #[arg(long, default_value_t = 0.05)]
    learning_rate: f64,

    /// Enable debug logging.
    #[arg(long, short)]
    verbose: bool,
}

impl Cli {
    fn validate(&self) -> Result<()> {
        if self.epochs == 0 {
            return Err(HiggsError::config("epochs must be at least 1"));
        }
        if self.batch_size == 0 {
            return Err(HiggsError::config("batch_size must be at least 1"));
        }
        if self.learning_rate <= 0.0 {
            return Err(HiggsError::config("learning_rate must be positive"));
        }
        if self.hidden == 0 {
            return Err(HiggsError::config("hidden width must be at least 1"));
        }
        Ok(())
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    if let Err(e) = run(&cli) {
        tracing::error!("run failed: {}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    cli.validate()?;

    // 1. Dataset acquisition.
    ensure_dataset(&cli.url, &cli.data_path)?;
    let dataset = load_csv(&cli.data_path, Some(cli.max_rows))?;
    let n_features = dataset.n_features();

    // 2. Train / held-out split, then the validation carve-out.
    let (train, test) = train_test_split(dataset, cli.train_fraction)?;
    let (train, val) = carve_validation(train, cli.val_fraction)?;
    tracing::info!(
        train = train.len(),
        val = val.len(),
        test = test.len(),
        "split complete"
    );

    // 3. Standardize: fit on the training subset only, persist, then apply
    //    everywhere.
    std::fs::create_dir_all(&cli.out_dir)?;
    let scaler = StandardScaler::fit(&train.features)?;
    let scaler_path = cli.out_dir.join("scaler.json");
    scaler.save_json(&scaler_path)?;
    tracing::info!(path = %scaler_path.display(), "scaler fitted and saved");

    let train_features = scaler.transform(&train.features)?;
    let val_features = scaler.transform(&val.features)?;
    let test_features = scaler.transform(&test.features)?;

    // 4–6. Build, train and persist each classifier independently.
    let config = TrainConfig::new(
        cli.epochs,
        cli.batch_size,
        higgs_dnn::loss::LossType::BinaryCrossEntropy,
    );
    let optimizer = Sgd::new(cli.learning_rate);

    for spec in [
        NetworkSpec::shallow(n_features, cli.hidden),
        NetworkSpec::deep(n_features, cli.hidden),
    ] {
        tracing::info!(model = %spec.name, layers = spec.layers.len(), "training classifier");
        let mut network = Network::from_spec(&spec);

        let val_refs = if val.is_empty() {
            (None, None)
        } else {
            (Some(val_features.as_slice()), Some(val.labels.as_slice()))
        };

        train_loop(
            &mut network,
            &train_features,
            &train.labels,
            val_refs.0,
            val_refs.1,
            &optimizer,
            &config,
        );

        let spec_path = cli.out_dir.join(format!("{}.spec.json", spec.name));
        spec.save_json(&spec_path)?;
        let model_path = cli.out_dir.join(format!("{}.json", spec.name));
        network.save_json(&model_path)?;
        tracing::info!(path = %model_path.display(), "model saved");

        let (test_loss, test_accuracy) =
            evaluate(&mut network, &test_features, &test.labels, config.loss_type);
        tracing::info!(
            model = %spec.name,
            test_loss,
            test_accuracy,
            "held-out evaluation"
        );
        println!(
            "{:>8}  test loss {:.4}  test accuracy {:.2}%",
            spec.name,
            test_loss,
            test_accuracy * 100.0
        );
    }

    Ok(())
}
