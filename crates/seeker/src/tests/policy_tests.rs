use std::time::Duration;

use crate::policy::{SearchDefaults, SearchPolicy};

fn defaults() -> SearchDefaults {
    SearchDefaults {
        timeout: Some(Duration::from_secs(10)),
        interval: Some(Duration::from_millis(100)),
        assert_found: true,
    }
}

#[test]
fn unset_knobs_take_the_defaults() {
    let resolved = SearchPolicy::new().resolve(&defaults());
    assert_eq!(resolved.timeout, Some(Duration::from_secs(10)));
    assert_eq!(resolved.interval, Some(Duration::from_millis(100)));
    assert!(resolved.assert_found);
    assert_eq!(resolved.instance, None);
}

#[test]
fn explicit_knobs_override_the_defaults() {
    let resolved = SearchPolicy::new()
        .timeout(5_000)
        .interval(200)
        .no_assert()
        .instance(3)
        .resolve(&defaults());
    assert_eq!(resolved.timeout, Some(Duration::from_millis(5_000)));
    assert_eq!(resolved.interval, Some(Duration::from_millis(200)));
    assert!(!resolved.assert_found);
    assert_eq!(resolved.instance, Some(3));
}

#[test]
fn timeout_zero_is_no_timeout() {
    let zero = SearchPolicy::new().timeout(0).resolve(&defaults());
    let none = SearchPolicy::new().no_timeout().resolve(&defaults());
    assert_eq!(zero, none);
    assert_eq!(zero.timeout, None);
}

#[test]
fn interval_zero_is_no_interval() {
    let zero = SearchPolicy::new().interval(0).resolve(&defaults());
    let none = SearchPolicy::new().no_interval().resolve(&defaults());
    assert_eq!(zero, none);
    assert_eq!(zero.interval, None);
}

#[test]
fn instance_zero_removes_the_filter() {
    let resolved = SearchPolicy::new().instance(2).instance(0).resolve(&defaults());
    assert_eq!(resolved.instance, None);
}

#[test]
fn resolution_is_idempotent() {
    let policy = SearchPolicy::new().timeout(5_000).assert_found().interval(200);
    let first = policy.resolve(&defaults());
    let second = policy.resolve(&defaults());
    assert_eq!(first, second);
}

#[test]
fn later_setters_win_over_earlier_ones() {
    let resolved = SearchPolicy::new()
        .timeout(5_000)
        .no_timeout()
        .resolve(&defaults());
    assert_eq!(resolved.timeout, None);

    let resolved = SearchPolicy::new()
        .no_assert()
        .assert_found()
        .resolve(&defaults());
    assert!(resolved.assert_found);
}

#[test]
fn copy_with_leaves_the_original_untouched() {
    let base = SearchPolicy::new().timeout(5_000);
    let _tightened = base.timeout(1_000);
    assert_eq!(
        base.resolve(&defaults()).timeout,
        Some(Duration::from_millis(5_000))
    );
}
