// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Byte-level progress reporting shared by downloads and archive extraction.
//!
//! Operations report through the [`ProgressReporter`] trait; the CLI picks an
//! indicatif-backed implementation or a silent one (`--no-progress`).

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub trait ProgressReporter {
    /// Begin an operation. A `total_bytes` of zero means the total is
    /// unknown and an indeterminate indicator is shown.
    fn on_start(&mut self, total_bytes: u64);

    /// Report cumulative bytes processed so far.
    fn on_progress(&mut self, bytes_processed: u64);

    fn on_complete(&mut self);
}

pub struct IndicatifReporter {
    operation: String,
    bar: Option<ProgressBar>,
}

impl IndicatifReporter {
    pub fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
            bar: None,
        }
    }
}

impl ProgressReporter for IndicatifReporter {
    fn on_start(&mut self, total_bytes: u64) {
        let pb = if total_bytes > 0 {
            let pb = ProgressBar::new(total_bytes);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template(
                        "{prefix} [{bar:40.cyan/blue}] {bytes}/{total_bytes} \
                         ({bytes_per_sec}, {eta})",
                    )
                    .unwrap()
                    .progress_chars("█▓░"),
            );
            pb
        } else {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{prefix} {spinner:.green} {bytes}")
                    .unwrap(),
            );
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        };

        pb.set_prefix(self.operation.clone());
        self.bar = Some(pb);
    }

    fn on_progress(&mut self, bytes_processed: u64) {
        if let Some(pb) = &self.bar {
            pb.set_position(bytes_processed);
        }
    }

    fn on_complete(&mut self) {
        if let Some(pb) = self.bar.take() {
            pb.finish();
        }
    }
}

/// Null Object implementation for `--no-progress` and non-interactive runs.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn on_start(&mut self, _total_bytes: u64) {}

    fn on_progress(&mut self, _bytes_processed: u64) {}

    fn on_complete(&mut self) {}
}

pub fn reporter(no_progress: bool, operation: &str) -> Box<dyn ProgressReporter> {
    if no_progress {
        Box::new(SilentReporter)
    } else {
        Box::new(IndicatifReporter::new(operation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_with_total() {
        let mut reporter = IndicatifReporter::new("Downloading");

        reporter.on_start(1024 * 1024);
        reporter.on_progress(512 * 1024);
        reporter.on_progress(1024 * 1024);
        reporter.on_complete();
    }

    #[test]
    fn test_progress_without_total() {
        let mut reporter = IndicatifReporter::new("Unpacking");

        reporter.on_start(0);
        reporter.on_progress(256 * 1024);
        reporter.on_complete();
    }

    #[test]
    fn test_silent_reporter() {
        let mut reporter = SilentReporter;

        reporter.on_start(2048);
        reporter.on_progress(1024);
        reporter.on_complete();
    }

    #[test]
    fn test_reporter_factory() {
        // Both variants must satisfy the trait object.
        let mut silent = reporter(true, "Downloading");
        silent.on_start(10);
        silent.on_complete();

        let mut live = reporter(false, "Downloading");
        live.on_start(0);
        live.on_complete();
    }
}
