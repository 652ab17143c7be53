use crate::data::loader::Dataset;
use crate::error::{HiggsError, Result};

/// Deterministic head/tail split: the first `train_fraction` of rows become
/// the training subset, the remainder the held-out test subset. The dataset
/// rows arrive in no meaningful order, so a positional split is as good as a
/// shuffled one and keeps runs reproducible.
pub fn train_test_split(dataset: Dataset, train_fraction: f64) -> Result<(Dataset, Dataset)> {
    if !(0.0..1.0).contains(&train_fraction) || train_fraction == 0.0 {
        return Err(HiggsError::config(format!(
            "train_fraction must be in (0, 1), got {}",
            train_fraction
        )));
    }

    let n = dataset.len();
    let n_train = ((n as f64) * train_fraction).round() as usize;
    if n_train == 0 || n_train == n {
        return Err(HiggsError::data(format!(
            "split of {} rows at fraction {} leaves one side empty",
            n, train_fraction
        )));
    }

    let Dataset { mut features, mut labels } = dataset;
    let test_features = features.split_off(n_train);
    let test_labels = labels.split_off(n_train);

    Ok((
        Dataset { features, labels },
        Dataset { features: test_features, labels: test_labels },
    ))
}

/// Carves a validation subset off the tail of the training data, mirroring
/// the framework convention of reserving the last fraction of the training
/// rows. A fraction of 0 returns an empty validation set.
pub fn carve_validation(train: Dataset, val_fraction: f64) -> Result<(Dataset, Dataset)> {
    if !(0.0..1.0).contains(&val_fraction) {
        return Err(HiggsError::config(format!(
            "val_fraction must be in [0, 1), got {}",
            val_fraction
        )));
    }
    if val_fraction == 0.0 {
        return Ok((train, Dataset::default()));
    }

    let n = train.len();
    let n_val = ((n as f64) * val_fraction).round() as usize;
    if n_val == 0 || n_val == n {
        return Err(HiggsError::data(format!(
            "validation carve of {} rows at fraction {} leaves one side empty",
            n, val_fraction
        )));
    }

    let Dataset { mut features, mut labels } = train;
    let val_features = features.split_off(n - n_val);
    let val_labels = labels.split_off(n - n_val);

    Ok((
        Dataset { features, labels },
        Dataset { features: val_features, labels: val_labels },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(n: usize) -> Dataset {
        Dataset {
            features: (0..n).map(|i| vec![i as f64]).collect(),
            labels: (0..n).map(|i| (i % 2) as f64).collect(),
        }
    }

    #[test]
    fn split_is_positional_and_exhaustive() {
        let (train, test) = train_test_split(dataset(10), 0.8).unwrap();
        assert_eq!(train.len(), 8);
        assert_eq!(test.len(), 2);
        assert_eq!(test.features[0], vec![8.0]);
    }

    #[test]
    fn validation_comes_from_the_tail() {
        let (train, val) = carve_validation(dataset(10), 0.2).unwrap();
        assert_eq!(train.len(), 8);
        assert_eq!(val.len(), 2);
        assert_eq!(val.features[0], vec![8.0]);
    }

    #[test]
    fn zero_val_fraction_means_no_validation() {
        let (train, val) = carve_validation(dataset(10), 0.0).unwrap();
        assert_eq!(train.len(), 10);
        assert!(val.is_empty());
    }

    #[test]
    fn out_of_range_fraction_is_rejected() {
        assert!(train_test_split(dataset(10), 0.0).is_err());
        assert!(train_test_split(dataset(10), 1.0).is_err());
        assert!(carve_validation(dataset(10), 1.0).is_err());
    }

    #[test]
    fn degenerate_split_is_rejected() {
        // 2 rows at 0.9 would round to an empty test side.
        assert!(train_test_split(dataset(2), 0.9).is_err());
    }
}
