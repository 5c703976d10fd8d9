//! Live queries against the machine running the tests.

use machinfo::{Config, UNDETERMINED};
use std::num::NonZeroU32;

fn quick() -> Config {
    Config::default().reduction_factor(NonZeroU32::new(20).unwrap())
}

#[cfg(any(windows, target_os = "linux"))]
#[test]
fn memory_amount_is_positive() {
    let mb = machinfo::get_memory_amount_with(&Config::default());
    assert_ne!(mb, UNDETERMINED);
    assert!(mb > 0);
}

#[cfg(any(windows, target_os = "linux"))]
#[test]
fn memory_amount_is_stable() {
    let config = Config::default();
    assert_eq!(
        machinfo::memory_amount(&config).unwrap(),
        machinfo::memory_amount(&config).unwrap()
    );
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
#[test]
fn clock_frequency_is_positive() {
    let mhz = machinfo::get_clock_frequency_with(&quick());
    assert_ne!(mhz, UNDETERMINED);
    assert!(mhz > 0);
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
#[test]
fn calibration_against_the_real_timer() {
    use machinfo::ClockCalibrator;

    #[cfg(windows)]
    let clock = machinfo::time::PerfCounter;
    #[cfg(not(windows))]
    let clock = machinfo::time::MonotonicClock::new();

    let calibrator =
        ClockCalibrator::with_reduction(clock, machinfo::tsc::Tsc, NonZeroU32::new(20).unwrap());
    let mhz = calibrator.calibrate().unwrap();
    // Anything between a throttled embedded part and a heavily overclocked
    // desktop.
    assert!((100..10_000).contains(&mhz), "{} MHz", mhz);
}

#[test]
fn overrides_are_returned_verbatim() {
    let config = quick().clock_override(Some(1234)).memory_override(Some(567));
    assert_eq!(machinfo::get_clock_frequency_with(&config), 1234);
    assert_eq!(machinfo::get_memory_amount_with(&config), 567);
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
#[test]
fn concurrent_callers_each_get_an_answer() {
    let config = quick().cpuinfo_path("/nonexistent/cpuinfo").registry(
        r"HARDWARE\DESCRIPTION\System\NoSuchProcessor\0",
        "~MHz",
    );
    let results: Vec<i32> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| machinfo::get_clock_frequency_with(&config)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert!(results.iter().all(|&mhz| mhz > 0), "{:?}", results);
}
