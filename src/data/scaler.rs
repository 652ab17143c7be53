use crate::error::{HiggsError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Per-column standardizer: subtract the mean, divide by the standard
/// deviation, both estimated from the training subset only. Persisted to
/// JSON beside the model weights so inference can reproduce the exact
/// preprocessing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
}

impl StandardScaler {
    /// Fits column means and standard deviations. Columns with zero variance
    /// get a divisor of 1 so constant features pass through centered but
    /// unscaled instead of producing NaN.
    pub fn fit(features: &[Vec<f64>]) -> Result<StandardScaler> {
        let n = features.len();
        if n == 0 {
            return Err(HiggsError::data("cannot fit scaler on an empty dataset"));
        }
        let width = features[0].len();

        let mut mean = vec![0.0; width];
        for row in features {
            if row.len() != width {
                return Err(HiggsError::data("cannot fit scaler on ragged rows"));
            }
            for (m, &v) in mean.iter_mut().zip(row.iter()) {
                *m += v;
            }
        }
        for m in &mut mean {
            *m /= n as f64;
        }

        let mut var = vec![0.0; width];
        for row in features {
            for ((s, &v), &m) in var.iter_mut().zip(row.iter()).zip(mean.iter()) {
                let d = v - m;
                *s += d * d;
            }
        }
        let std = var
            .into_iter()
            .map(|s| {
                let sd = (s / n as f64).sqrt();
                if sd == 0.0 {
                    1.0
                } else {
                    sd
                }
            })
            .collect();

        Ok(StandardScaler { mean, std })
    }

    /// Returns a standardized copy of the rows. Errors if a row's width
    /// disagrees with the fitted columns.
    pub fn transform(&self, features: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        features
            .iter()
            .map(|row| {
                if row.len() != self.mean.len() {
                    return Err(HiggsError::data(format!(
                        "scaler fitted on {} columns, row has {}",
                        self.mean.len(),
                        row.len()
                    )));
                }
                Ok(row
                    .iter()
                    .zip(self.mean.iter().zip(self.std.iter()))
                    .map(|(&v, (&m, &s))| (v - m) / s)
                    .collect())
            })
            .collect()
    }

    /// Serializes the fitted scaler to a pretty-printed JSON file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a scaler previously written by `save_json`.
    pub fn load_json(path: &Path) -> Result<StandardScaler> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transformed_columns_have_zero_mean_unit_variance() {
        let features = vec![
            vec![1.0, 10.0],
            vec![2.0, 20.0],
            vec![3.0, 30.0],
            vec![4.0, 40.0],
        ];
        let scaler = StandardScaler::fit(&features).unwrap();
        let scaled = scaler.transform(&features).unwrap();

        for col in 0..2 {
            let n = scaled.len() as f64;
            let mean: f64 = scaled.iter().map(|r| r[col]).sum::<f64>() / n;
            let var: f64 = scaled.iter().map(|r| (r[col] - mean).powi(2)).sum::<f64>() / n;
            assert!(mean.abs() < 1e-12, "column {} mean {}", col, mean);
            assert!((var - 1.0).abs() < 1e-9, "column {} var {}", col, var);
        }
    }

    #[test]
    fn constant_column_does_not_divide_by_zero() {
        let features = vec![vec![5.0], vec![5.0], vec![5.0]];
        let scaler = StandardScaler::fit(&features).unwrap();
        let scaled = scaler.transform(&features).unwrap();
        assert!(scaled.iter().all(|r| r[0] == 0.0));
    }

    #[test]
    fn width_mismatch_is_rejected() {
        let scaler = StandardScaler::fit(&[vec![1.0, 2.0]]).unwrap();
        assert!(scaler.transform(&[vec![1.0]]).is_err());
    }

    #[test]
    fn empty_fit_is_rejected() {
        assert!(StandardScaler::fit(&[]).is_err());
    }

    #[test]
    fn json_roundtrip_preserves_parameters() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scaler.json");
        let scaler = StandardScaler::fit(&[vec![1.0, -2.0], vec![3.0, 4.0]]).unwrap();
        scaler.save_json(&path).unwrap();
        let loaded = StandardScaler::load_json(&path).unwrap();
        assert_eq!(scaler.mean, loaded.mean);
        assert_eq!(scaler.std, loaded.std);
    }
}
