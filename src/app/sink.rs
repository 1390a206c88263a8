use std::io::Write;

use crate::error::AppResult;
use crate::report::{ErrorAggregator, WindowReport, WindowSink, render_window_lines};

/// Records every window in the aggregator and, when requested, streams its
/// lines to the output or keeps it for the JSON document.
pub(super) struct RunSink<'out, W: Write> {
    pub(super) aggregator: ErrorAggregator,
    lines: Option<&'out mut W>,
    retained: Option<Vec<WindowReport>>,
}

impl<'out, W: Write> RunSink<'out, W> {
    pub(super) fn new(
        aggregator: ErrorAggregator,
        lines: Option<&'out mut W>,
        retain: bool,
    ) -> Self {
        Self {
            aggregator,
            lines,
            retained: retain.then(Vec::new),
        }
    }

    pub(super) fn into_parts(self) -> (ErrorAggregator, Option<Vec<WindowReport>>) {
        (self.aggregator, self.retained)
    }
}

impl<W: Write> WindowSink for RunSink<'_, W> {
    fn accept(&mut self, window: WindowReport) -> AppResult<()> {
        if let Some(out) = self.lines.as_mut() {
            for line in render_window_lines(&window) {
                writeln!(out, "{}", line)?;
            }
        }
        if let Some(retained) = self.retained.as_mut() {
            for report in &window.reports {
                self.aggregator.record(*report);
            }
            retained.push(window);
            return Ok(());
        }
        self.aggregator.accept(window)
    }
}
