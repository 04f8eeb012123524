use std::time::Duration;

use typed_builder::TypedBuilder;

/// Run-time options of a [`Cpu`](super::Cpu).
///
/// ```
/// use std::time::Duration;
/// use retroboy_i8080::CpuConfig;
///
/// let config = CpuConfig::builder()
///     .cycle_delay(Some(Duration::from_millis(1)))
///     .trace_instructions(true)
///     .build();
/// assert_eq!(config.cycle_delay, Some(Duration::from_millis(1)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, TypedBuilder)]
pub struct CpuConfig {
    /// Pause inserted by [`Cpu::run`](super::Cpu::run) after every
    /// instruction. `None` runs at full speed.
    #[builder(default)]
    pub cycle_delay: Option<Duration>,

    /// Log every dispatched instruction at debug level instead of trace.
    #[builder(default = false)]
    pub trace_instructions: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_match_default() {
        assert_eq!(CpuConfig::builder().build(), CpuConfig::default());
        assert_eq!(CpuConfig::default().cycle_delay, None);
        assert!(!CpuConfig::default().trace_instructions);
    }
}
