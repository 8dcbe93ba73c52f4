// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn system_clock_moves_forward() {
    let clock = SystemClock;
    let t1 = clock.now();
    std::thread::sleep(Duration::from_millis(1));
    assert!(clock.now() > t1);
}

#[test]
fn fake_clock_only_moves_when_advanced() {
    let clock = FakeClock::new();
    let t1 = clock.now();
    assert_eq!(clock.now(), t1);
    clock.advance(Duration::from_secs(45));
    assert_eq!(clock.now().duration_since(t1), Duration::from_secs(45));
}

#[test]
fn fake_clock_clones_share_their_time() {
    let clock = FakeClock::new();
    let other = clock.clone();
    let t1 = clock.now();
    other.advance(Duration::from_secs(90));
    assert_eq!(clock.now().duration_since(t1), Duration::from_secs(90));
}

#[tokio::test]
async fn fake_clock_sleep_advances_without_blocking() {
    let clock = FakeClock::new();
    let before = clock.now();
    clock.sleep(Duration::from_secs(3600)).await;
    assert_eq!(clock.now().duration_since(before), Duration::from_secs(3600));
}

#[tokio::test]
async fn fake_clock_records_sleeps_in_order() {
    let clock = FakeClock::new();
    clock.sleep(Duration::from_secs(5)).await;
    clock.sleep(Duration::from_secs(2)).await;
    assert_eq!(
        clock.sleeps(),
        vec![Duration::from_secs(5), Duration::from_secs(2)]
    );
}
