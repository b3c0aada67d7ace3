//! Progress sinks for tests

use rastedge_core::{AbortFlag, Progress, ReportingLevel};

/// One recorded progress report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressReport {
    pub text: String,
    pub percent: u32,
    pub level: ReportingLevel,
}

/// Progress sink that keeps every report
#[derive(Debug, Default)]
pub struct ProgressRecorder {
    reports: Vec<ProgressReport>,
}

impl ProgressRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// All reports in arrival order
    pub fn reports(&self) -> &[ProgressReport] {
        &self.reports
    }

    /// Last report received
    pub fn last(&self) -> Option<&ProgressReport> {
        self.reports.last()
    }

    /// Percentages of the reports with `Normal` level
    pub fn normal_percents(&self) -> Vec<u32> {
        self.reports
            .iter()
            .filter(|r| r.level == ReportingLevel::Normal)
            .map(|r| r.percent)
            .collect()
    }

    /// Number of reports with the given level
    pub fn count(&self, level: ReportingLevel) -> usize {
        self.reports.iter().filter(|r| r.level == level).count()
    }
}

impl Progress for ProgressRecorder {
    fn update_progress(&mut self, text: &str, percent: u32, level: ReportingLevel) {
        self.reports.push(ProgressReport {
            text: text.to_string(),
            percent,
            level,
        });
    }
}

/// Recording sink that requests an abort when a given report arrives
///
/// With `trigger = k`, the flag is set while the `k`-th `Normal` report
/// (0-based) is being delivered.
#[derive(Debug)]
pub struct AbortingProgress {
    recorder: ProgressRecorder,
    flag: AbortFlag,
    trigger: usize,
    normal_seen: usize,
}

impl AbortingProgress {
    pub fn new(flag: AbortFlag, trigger: usize) -> Self {
        Self {
            recorder: ProgressRecorder::new(),
            flag,
            trigger,
            normal_seen: 0,
        }
    }

    /// Reports received so far
    pub fn recorder(&self) -> &ProgressRecorder {
        &self.recorder
    }
}

impl Progress for AbortingProgress {
    fn update_progress(&mut self, text: &str, percent: u32, level: ReportingLevel) {
        if level == ReportingLevel::Normal {
            if self.normal_seen == self.trigger {
                self.flag.abort();
            }
            self.normal_seen += 1;
        }
        self.recorder.update_progress(text, percent, level);
    }
}
