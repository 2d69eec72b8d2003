//! Timing instrumentation for the dispatch path.
//!
//! Signal dispatch and pointer moves are wrapped in `profile_scope!`. Without
//! the `profiling` feature the macro expands to nothing.
//!
//! ```ignore
//! fn pointer_move(&mut self, event: &PointerEvent) {
//!     profile_scope!("pointer_move");
//!     // ...
//! }
//! ```

use std::collections::VecDeque;
use std::time::Instant;
use tracing::warn;

// ============================================================================
// Constants
// ============================================================================

/// Threshold used by `ScopedTimer::for_profiling`
pub const PROFILING_THRESHOLD_MS: f64 = 1.0;

/// Samples kept by `TimingStats`
const STATS_SAMPLE_COUNT: usize = 100;

// ============================================================================
// Profiling Macro
// ============================================================================

/// Time the enclosing scope. Zero-cost when profiling is disabled.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::for_profiling($name);
        #[cfg(not(feature = "profiling"))]
        let _ = $name;
    };
    ($name:expr, $threshold_ms:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::new($name, $threshold_ms);
        #[cfg(not(feature = "profiling"))]
        let _ = ($name, $threshold_ms);
    };
}

pub use profile_scope;

// ============================================================================
// Scoped Timer
// ============================================================================

/// Logs how long a scope took when it exceeds the threshold
pub struct ScopedTimer {
    name: &'static str,
    start: Instant,
    threshold_ms: f64,
}

impl ScopedTimer {
    pub fn new(name: &'static str, threshold_ms: f64) -> Self {
        Self {
            name,
            start: Instant::now(),
            threshold_ms,
        }
    }

    pub fn for_profiling(name: &'static str) -> Self {
        Self::new(name, PROFILING_THRESHOLD_MS)
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed_ms();
        if elapsed_ms <= self.threshold_ms {
            return;
        }

        warn!(
            operation = self.name,
            elapsed_ms = format!("{:.2}", elapsed_ms),
            threshold_ms = format!("{:.2}", self.threshold_ms),
            "Slow operation"
        );
    }
}

// ============================================================================
// Aggregated Timings
// ============================================================================

/// Rolling statistics over the most recent timing samples
#[derive(Debug, Clone)]
pub struct TimingStats {
    samples: VecDeque<f64>,
    count: u64,
    min_ms: f64,
    max_ms: f64,
    sum_ms: f64,
}

impl Default for TimingStats {
    fn default() -> Self {
        Self {
            samples: VecDeque::with_capacity(STATS_SAMPLE_COUNT),
            count: 0,
            min_ms: f64::MAX,
            max_ms: 0.0,
            sum_ms: 0.0,
        }
    }
}

impl TimingStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, ms: f64) {
        if self.samples.len() >= STATS_SAMPLE_COUNT {
            if let Some(old) = self.samples.pop_front() {
                self.sum_ms -= old;
            }
        }
        self.samples.push_back(ms);
        self.sum_ms += ms;
        self.count += 1;
        self.min_ms = self.min_ms.min(ms);
        self.max_ms = self.max_ms.max(ms);
    }

    /// Total samples ever recorded, including ones rolled out
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Average over the retained samples
    pub fn average(&self) -> f64 {
        if self.samples.is_empty() {
            0.0
        } else {
            self.sum_ms / self.samples.len() as f64
        }
    }

    pub fn max(&self) -> f64 {
        self.max_ms
    }

    pub fn min(&self) -> Option<f64> {
        (self.count > 0).then_some(self.min_ms)
    }

    /// 95th percentile of the retained samples
    pub fn p95(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let mut sorted: Vec<f64> = self.samples.iter().copied().collect();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let idx = ((sorted.len() as f64) * 0.95).floor() as usize;
        sorted.get(idx.min(sorted.len() - 1)).copied().unwrap_or(0.0)
    }
}

// ============================================================================
// Timing Utilities
// ============================================================================

/// Run `f` and return its result with the elapsed milliseconds
#[inline]
pub fn measure<T, F: FnOnce() -> T>(f: F) -> (T, f64) {
    let start = Instant::now();
    let result = f();
    (result, start.elapsed().as_secs_f64() * 1000.0)
}
