use tracing::warn;

/// A value that is always usable, plus a warning when it is a fallback.
#[derive(Debug)]
pub struct Degraded<T> {
    pub value: T,
    pub warning: Option<String>,
}

impl<T> Degraded<T> {
    pub fn ok(value: T) -> Self {
        Self {
            value,
            warning: None,
        }
    }

    pub fn fallback(value: T, warning: impl Into<String>) -> Self {
        Self {
            value,
            warning: Some(warning.into()),
        }
    }

    #[cfg(test)]
    pub fn is_degraded(&self) -> bool {
        self.warning.is_some()
    }

    /// Log the warning, if any, and unwrap the value.
    pub fn log(self) -> T {
        if let Some(warning) = &self.warning {
            warn!("{}", warning);
        }
        self.value
    }
}
