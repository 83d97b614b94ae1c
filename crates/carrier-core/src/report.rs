/// One recipient the batch could not reach, with the flattened reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendFailure {
    pub recipient: String,
    pub reason: String,
}

/// Tagged outcome accounting for one batch run.
///
/// Every attempt lands here as either delivered or failed; the controller
/// decides continue-vs-abort from the outcome kind instead of relying on
/// what happens to propagate.
#[derive(Debug, Default)]
pub struct RunReport {
    delivered: usize,
    failures: Vec<SendFailure>,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_delivered(&mut self) {
        self.delivered += 1;
    }

    pub fn record_failure(&mut self, recipient: impl Into<String>, reason: impl Into<String>) {
        self.failures.push(SendFailure {
            recipient: recipient.into(),
            reason: reason.into(),
        });
    }

    pub fn delivered(&self) -> usize {
        self.delivered
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn attempted(&self) -> usize {
        self.delivered + self.failures.len()
    }

    pub fn failures(&self) -> &[SendFailure] {
        &self.failures
    }
}
