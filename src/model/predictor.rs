use anyhow::Result;
use async_trait::async_trait;

use crate::model::WindowedSample;

/// Per-epoch progress callback: 0-based epoch index and that epoch's actual
/// training loss. Hosts drive progress bars off this; the loss must be the
/// real number from the epoch, not a placeholder.
pub type EpochCallback<'a> = &'a mut (dyn FnMut(usize, f64) + Send);

/// Abstract interface for the external sequence model.
///
/// The pipeline treats the model as a black box: it hands over normalized
/// windowed samples, waits on training, and asks for horizon-length
/// forecasts. Heavy buffers stay on the caller's side of this boundary, so
/// dropping the implementor releases everything it allocated.
#[async_trait]
pub trait SequencePredictor: Send {
    /// Train on the chronological training prefix. Invokes `on_epoch_end`
    /// once per completed epoch.
    async fn fit(
        &mut self,
        train: &[WindowedSample],
        epochs: usize,
        on_epoch_end: EpochCallback<'_>,
    ) -> Result<()>;

    /// Forecast `horizon` normalized values for one input window.
    async fn predict(&self, input: &[f64]) -> Result<Vec<f64>>;

    fn is_trained(&self) -> bool;

    /// Loss of the most recent training epoch, if any training happened.
    fn last_loss(&self) -> Option<f64>;
}
