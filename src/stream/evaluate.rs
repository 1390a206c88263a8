use super::StreamStats;
use crate::error::{AppResult, QuantileError};
use crate::histogram::CumulativeBuckets;
use crate::quantile::{QuantileLevel, RawSampleBuffer, estimate};
use crate::report::{QuantileErrorReport, WindowReport, WindowSink, WindowSpan};

pub(super) fn compare_levels<B>(
    levels: &[QuantileLevel],
    raw: &mut RawSampleBuffer,
    buckets: &B,
) -> Result<Vec<QuantileErrorReport>, QuantileError>
where
    B: CumulativeBuckets + ?Sized,
{
    levels
        .iter()
        .map(|level| {
            let actual = raw.quantile(*level)?;
            let estimated = estimate(*level, buckets)?;
            Ok(QuantileErrorReport::new(*level, actual, estimated))
        })
        .collect()
}

/// Hands a finished window to the sink, or counts it as skipped when it had
/// nothing to compare.
pub(super) fn emit(
    outcome: Result<Vec<QuantileErrorReport>, QuantileError>,
    span: WindowSpan,
    samples: usize,
    stats: &mut StreamStats,
    sink: &mut dyn WindowSink,
) -> AppResult<()> {
    let index = stats.next_window_index();
    match outcome {
        Ok(reports) => {
            stats.windows_processed = stats.windows_processed.saturating_add(1);
            tracing::debug!(window = index, %span, samples, "Window evaluated");
            sink.accept(WindowReport {
                index,
                span,
                samples,
                reports,
            })
        }
        Err(QuantileError::EmptyPopulation) => {
            stats.windows_skipped = stats.windows_skipped.saturating_add(1);
            tracing::debug!(window = index, %span, "Window skipped: empty population");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}
