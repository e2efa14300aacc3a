use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::WindowConfig;
use crate::error::PipelineError;

/// One supervised pair: `window_size` normalized inputs followed immediately
/// by `horizon` normalized targets. Input and target never overlap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowedSample {
    pub input: Vec<f64>,
    pub target: Vec<f64>,
}

/// Chronologically split windowed dataset: training prefix, test suffix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowedDataset {
    pub train: Vec<WindowedSample>,
    pub test: Vec<WindowedSample>,
    /// Index of the first test sample in the original sample ordering.
    pub split_index: usize,
    pub window_size: usize,
    pub horizon: usize,
}

impl WindowedDataset {
    pub fn total_samples(&self) -> usize {
        self.train.len() + self.test.len()
    }
}

/// Slice a normalized series into stride-1 sliding windows and split them
/// chronologically.
///
/// Sample `i` reads `series[i..i+w]` as input and `series[i+w..i+w+h]` as
/// target. The split point is `floor(total * (1 - test_split))`; samples are
/// never shuffled, so every test sample starts strictly after every training
/// sample and the back-test never trains on the future.
pub fn build(series: &[f64], config: &WindowConfig) -> Result<WindowedDataset, PipelineError> {
    let w = config.window_size;
    let h = config.horizon;
    let needed = w + h;

    if w == 0 || h == 0 || series.len() < needed {
        return Err(PipelineError::InsufficientData {
            needed,
            got: series.len(),
        });
    }

    let total = series.len() - w - h + 1;
    let mut samples: Vec<WindowedSample> = (0..total)
        .into_par_iter()
        .map(|i| WindowedSample {
            input: series[i..i + w].to_vec(),
            target: series[i + w..i + w + h].to_vec(),
        })
        .collect();

    let split_index = (total as f64 * (1.0 - config.test_split.value())).floor() as usize;
    let test = samples.split_off(split_index);

    log::info!(
        "[windows] {total} samples: {} train, {} test (w={w}, h={h})",
        split_index,
        test.len(),
    );

    Ok(WindowedDataset {
        train: samples,
        test,
        split_index,
        window_size: w,
        horizon: h,
    })
}
