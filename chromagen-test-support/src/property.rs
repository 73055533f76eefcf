//! Environment-driven sizing for property suites.
//!
//! Every proptest block in the workspace derives its configuration from a
//! [`ProptestRunProfile`] so CI can scale all suites with one variable.

use std::env;

/// Overrides the number of cases per property.
pub const CASES_ENV: &str = "CHROMAGEN_PROPTEST_CASES";
/// Runs each case in a forked subprocess when truthy.
pub const FORK_ENV: &str = "CHROMAGEN_PBT_FORK";

/// Case count and fork flag for one property suite.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
}

impl ProptestRunProfile {
    /// Reads the overrides, falling back to the suite's defaults when a
    /// variable is unset or unparsable.
    ///
    /// # Examples
    /// ```
    /// use chromagen_test_support::property::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(32, false);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self {
            cases: override_or(CASES_ENV, default_cases, parse_cases),
            fork: override_or(FORK_ENV, default_fork, parse_flag),
        }
    }

    /// Cases to run per property.
    #[rustfmt::skip]
    #[must_use]
    pub const fn cases(&self) -> u32 { self.cases }

    /// Whether proptest forks per case.
    #[rustfmt::skip]
    #[must_use]
    pub const fn fork(&self) -> bool { self.fork }
}

fn override_or<T: Copy>(key: &'static str, default: T, parse: fn(&str) -> Option<T>) -> T {
    let Ok(raw) = env::var(key) else {
        return default;
    };
    parse(&raw).unwrap_or_else(|| {
        tracing::warn!(env = key, raw = %raw, "ignoring invalid property-test override");
        default
    })
}

fn parse_cases(raw: &str) -> Option<u32> {
    raw.trim().parse().ok().filter(|cases| *cases > 0)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use rstest::rstest;

    use super::*;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Sets or clears both variables and restores them on drop.
    struct ScopedEnv {
        saved: Vec<(&'static str, Option<String>)>,
    }

    impl ScopedEnv {
        fn new(cases: Option<&str>, fork: Option<&str>) -> Self {
            let mut saved = Vec::new();
            for (key, value) in [(CASES_ENV, cases), (FORK_ENV, fork)] {
                saved.push((key, env::var(key).ok()));
                // SAFETY: tests serialise environment access with ENV_LOCK.
                unsafe {
                    match value {
                        Some(value) => env::set_var(key, value),
                        None => env::remove_var(key),
                    }
                }
            }
            Self { saved }
        }
    }

    impl Drop for ScopedEnv {
        fn drop(&mut self) {
            for (key, value) in self.saved.drain(..) {
                // SAFETY: tests serialise environment access with ENV_LOCK.
                unsafe {
                    match value {
                        Some(value) => env::set_var(key, value),
                        None => env::remove_var(key),
                    }
                }
            }
        }
    }

    #[test]
    fn defaults_apply_without_overrides() {
        let _lock = ENV_LOCK.lock().expect("env lock");
        let _env = ScopedEnv::new(None, None);
        assert_eq!(
            ProptestRunProfile::load(48, false),
            ProptestRunProfile { cases: 48, fork: false }
        );
    }

    #[rstest]
    #[case::valid("250", 250)]
    #[case::padded(" 7 ", 7)]
    #[case::zero("0", 48)]
    #[case::negative("-3", 48)]
    #[case::text("many", 48)]
    fn case_overrides(#[case] raw: &str, #[case] expected: u32) {
        let _lock = ENV_LOCK.lock().expect("env lock");
        let _env = ScopedEnv::new(Some(raw), None);
        assert_eq!(ProptestRunProfile::load(48, false).cases(), expected);
    }

    #[rstest]
    #[case::on("on", false, true)]
    #[case::upper("TRUE", false, true)]
    #[case::off("0", true, false)]
    #[case::invalid("maybe", true, true)]
    #[case::empty("", true, true)]
    fn fork_overrides(#[case] raw: &str, #[case] default: bool, #[case] expected: bool) {
        let _lock = ENV_LOCK.lock().expect("env lock");
        let _env = ScopedEnv::new(None, Some(raw));
        assert_eq!(ProptestRunProfile::load(48, default).fork(), expected);
    }
}
