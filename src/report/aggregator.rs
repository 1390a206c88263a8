use serde::Serialize;

use super::{ErrorRatio, QuantileErrorReport, WindowReport, WindowSink};
use crate::error::AppResult;
use crate::quantile::QuantileLevel;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stats {
    pub min: f64,
    pub max: f64,
    pub average: f64,
}

#[derive(Debug, Clone, Copy, Default)]
struct StatsAccumulator {
    min: f64,
    max: f64,
    sum: f64,
    count: usize,
}

impl StatsAccumulator {
    fn push(&mut self, value: f64) {
        if self.count == 0 {
            self.min = value;
            self.max = value;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
        self.sum += value;
        self.count = self.count.saturating_add(1);
    }

    fn finish(self) -> Option<Stats> {
        if self.count == 0 {
            return None;
        }
        Some(Stats {
            min: self.min,
            max: self.max,
            average: self.sum / self.count as f64,
        })
    }
}

/// Reduction of every report logged for one quantile level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuantileSummary {
    pub quantile: QuantileLevel,
    pub reports: usize,
    /// Reports whose error ratio was undefined; left out of `error`.
    pub degenerate: usize,
    pub error: Option<Stats>,
    pub actual: Option<Stats>,
    pub estimated: Option<Stats>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateSummary {
    pub quantiles: Vec<QuantileSummary>,
}

impl AggregateSummary {
    #[must_use]
    pub fn get(&self, quantile: QuantileLevel) -> Option<&QuantileSummary> {
        self.quantiles
            .iter()
            .find(|summary| summary.quantile == quantile)
    }
}

/// Append-only log of reports, grouped by quantile level in the order the
/// levels were configured (or first seen).
#[derive(Debug, Default, Clone)]
pub struct ErrorAggregator {
    log: Vec<(QuantileLevel, Vec<QuantileErrorReport>)>,
}

impl ErrorAggregator {
    /// Repeated levels share one entry.
    #[must_use]
    pub fn new(levels: &[QuantileLevel]) -> Self {
        let mut log: Vec<(QuantileLevel, Vec<QuantileErrorReport>)> =
            Vec::with_capacity(levels.len());
        for level in levels {
            if !log.iter().any(|(known, _)| known == level) {
                log.push((*level, Vec::new()));
            }
        }
        Self { log }
    }

    pub fn record(&mut self, report: QuantileErrorReport) {
        if let Some((_, reports)) = self
            .log
            .iter_mut()
            .find(|(level, _)| *level == report.quantile)
        {
            reports.push(report);
            return;
        }
        self.log.push((report.quantile, vec![report]));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.log.iter().map(|(_, reports)| reports.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reduces the whole log; does not modify it.
    #[must_use]
    pub fn summarize(&self) -> AggregateSummary {
        let quantiles = self
            .log
            .iter()
            .map(|(level, reports)| {
                let mut error = StatsAccumulator::default();
                let mut actual = StatsAccumulator::default();
                let mut estimated = StatsAccumulator::default();
                let mut degenerate = 0usize;
                for report in reports {
                    actual.push(report.actual);
                    estimated.push(report.estimated);
                    match report.error {
                        ErrorRatio::Percent(percent) => error.push(percent),
                        ErrorRatio::Degenerate => degenerate = degenerate.saturating_add(1),
                    }
                }
                QuantileSummary {
                    quantile: *level,
                    reports: reports.len(),
                    degenerate,
                    error: error.finish(),
                    actual: actual.finish(),
                    estimated: estimated.finish(),
                }
            })
            .collect();
        AggregateSummary { quantiles }
    }
}

impl WindowSink for ErrorAggregator {
    fn accept(&mut self, window: WindowReport) -> AppResult<()> {
        for report in window.reports {
            self.record(report);
        }
        Ok(())
    }
}
