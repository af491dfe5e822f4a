/// Captured result of one evaluator process.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessOutcome {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
}

impl ProcessOutcome {
    pub fn succeeded(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            success: true,
        }
    }

    pub fn failed(stderr: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.into(),
            success: false,
        }
    }
}

/// Caller-facing result: stdout on success, stderr or a diagnostic on failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEnvelope {
    pub success: bool,
    pub text: String,
}

impl ResponseEnvelope {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            success: true,
            text: text.into(),
        }
    }

    pub fn failure(text: impl Into<String>) -> Self {
        Self {
            success: false,
            text: text.into(),
        }
    }

    pub fn from_outcome(outcome: ProcessOutcome) -> Self {
        if outcome.success {
            Self::success(outcome.stdout)
        } else {
            Self::failure(outcome.stderr)
        }
    }
}

impl From<ProcessOutcome> for ResponseEnvelope {
    fn from(outcome: ProcessOutcome) -> Self {
        Self::from_outcome(outcome)
    }
}
