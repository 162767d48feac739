//! Search policy: the timeout/interval/assert/instance configuration that
//! bounds a search.
//!
//! A [`SearchPolicy`] is an immutable value; the chainable setters consume
//! and return it (copy-with), so a policy stored in a variable is never
//! mutated behind the caller's back. [`SearchPolicy::resolve`] normalizes it
//! against explicit [`SearchDefaults`]: any knob the caller left unset takes
//! the default, and after resolution exactly one of each complementary pair
//! (timeout/no-timeout, interval/no-interval, assert/no-assert) holds.

use std::time::Duration;

/// Tri-state setting: not mentioned by the caller, explicitly disabled, or
/// enabled with a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Knob<T> {
    #[default]
    Unset,
    Off,
    On(T),
}

/// Per-search configuration bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchPolicy {
    timeout: Knob<Duration>,
    interval: Knob<Duration>,
    assert_found: Option<bool>,
    instance: Knob<u32>,
}

impl SearchPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep retrying for up to `ms` milliseconds. `timeout(0)` is the same
    /// as [`no_timeout`](Self::no_timeout).
    pub fn timeout(mut self, ms: u64) -> Self {
        self.timeout = if ms == 0 {
            Knob::Off
        } else {
            Knob::On(Duration::from_millis(ms))
        };
        self
    }

    /// Single attempt, no retrying.
    pub fn no_timeout(mut self) -> Self {
        self.timeout = Knob::Off;
        self
    }

    /// Sleep `ms` milliseconds between attempts. `interval(0)` is the same
    /// as [`no_interval`](Self::no_interval).
    pub fn interval(mut self, ms: u64) -> Self {
        self.interval = if ms == 0 {
            Knob::Off
        } else {
            Knob::On(Duration::from_millis(ms))
        };
        self
    }

    /// Retry back-to-back with no sleep between attempts.
    pub fn no_interval(mut self) -> Self {
        self.interval = Knob::Off;
        self
    }

    /// Raise a not-found error when the search exhausts its budget.
    pub fn assert_found(mut self) -> Self {
        self.assert_found = Some(true);
        self
    }

    /// Return an empty result instead of raising when nothing matched.
    pub fn no_assert(mut self) -> Self {
        self.assert_found = Some(false);
        self
    }

    /// Select the `n`-th match (1-based) among otherwise-equal candidates.
    /// `instance(0)` removes the filter.
    pub fn instance(mut self, n: u32) -> Self {
        self.instance = if n == 0 { Knob::Off } else { Knob::On(n) };
        self
    }

    /// Normalize against the engine defaults. Pure; resolving the same
    /// policy twice yields the same result.
    pub fn resolve(&self, defaults: &SearchDefaults) -> ResolvedPolicy {
        ResolvedPolicy {
            timeout: match self.timeout {
                Knob::Unset => defaults.timeout,
                Knob::Off => None,
                Knob::On(d) => Some(d),
            },
            interval: match self.interval {
                Knob::Unset => defaults.interval,
                Knob::Off => None,
                Knob::On(d) => Some(d),
            },
            assert_found: self.assert_found.unwrap_or(defaults.assert_found),
            instance: match self.instance {
                Knob::On(n) => Some(n),
                Knob::Unset | Knob::Off => None,
            },
        }
    }
}

/// Engine-wide defaults, injected into the [`Desktop`](crate::Desktop) at
/// construction and read-only afterwards. There is no process-global
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchDefaults {
    pub timeout: Option<Duration>,
    pub interval: Option<Duration>,
    pub assert_found: bool,
}

impl Default for SearchDefaults {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(10)),
            interval: Some(Duration::from_millis(100)),
            assert_found: true,
        }
    }
}

/// The fully-normalized form a search actually runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPolicy {
    /// `None` means a single attempt with no retrying.
    pub timeout: Option<Duration>,
    /// `None` means back-to-back attempts, bounded only by the timeout.
    pub interval: Option<Duration>,
    pub assert_found: bool,
    /// 1-based positional filter over the match order.
    pub instance: Option<u32>,
}

impl ResolvedPolicy {
    /// Rendered into not-found diagnostics; built lazily at throw time.
    pub(crate) fn describe(&self) -> String {
        let timeout = match self.timeout {
            Some(t) => format!("timeout: {t:?}"),
            None => "timeout: none".to_string(),
        };
        let interval = match self.interval {
            Some(i) => format!("interval: {i:?}"),
            None => "interval: none".to_string(),
        };
        match self.instance {
            Some(n) => format!("{timeout}, {interval}, instance: {n}"),
            None => format!("{timeout}, {interval}"),
        }
    }
}
