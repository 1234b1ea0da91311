/*!
 * Tests for cost accumulation and usage reporting
 */

use docxlate::errors::AppError;
use docxlate::translation::{CostLedger, UsageReport};

#[test]
fn test_ledger_new_shouldStartAtZero() {
    let ledger = CostLedger::new();
    assert_eq!(ledger.total(), 0.0);
}

#[test]
fn test_ledger_add_shouldAccumulate() {
    let ledger = CostLedger::new();

    ledger.add(0.001);
    ledger.add(0.002);

    assert!((ledger.total() - 0.003).abs() < 1e-12);
}

#[test]
fn test_ledger_add_withZero_shouldKeepTotal() {
    let ledger = CostLedger::new();

    ledger.add(0.5);
    ledger.add(0.0);

    assert!((ledger.total() - 0.5).abs() < 1e-12);
}

#[test]
#[should_panic(expected = "non-negative")]
fn test_ledger_add_withNegativeCost_shouldPanic() {
    let ledger = CostLedger::new();
    ledger.add(-0.01);
}

#[test]
fn test_ledger_clone_shouldShareTotal() {
    let ledger1 = CostLedger::new();
    let ledger2 = ledger1.clone();

    ledger1.add(0.25);

    assert!((ledger2.total() - 0.25).abs() < 1e-12);
}

#[test]
fn test_ledger_concurrentAdds_shouldCountAll() {
    use std::thread;

    let ledger = CostLedger::new();
    let mut handles = Vec::new();

    for _ in 0..8 {
        let ledger = ledger.clone();
        handles.push(thread::spawn(move || {
            for _ in 0..100 {
                ledger.add(0.01);
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    assert!((ledger.total() - 8.0).abs() < 1e-9);
}

#[test]
fn test_usageReport_fromPairs_shouldKeepOrder() {
    let report = UsageReport::from_pairs(&["words", "cost"], &[120.0, 0.5]).unwrap();

    let pairs = report.pairs();
    assert_eq!(pairs[0].0, "words");
    assert_eq!(pairs[1].0, "cost");
    assert_eq!(pairs[1].1, 0.5);
}

#[test]
fn test_usageReport_fromPairs_withMismatchedLengths_shouldFail() {
    let result = UsageReport::from_pairs(&["words", "cost"], &[120.0]);

    assert!(matches!(result, Err(AppError::InvalidArgument(_))));
}

#[test]
fn test_usageReport_summary_shouldListAllMetrics() {
    let report = UsageReport::from_pairs(&["words", "cost"], &[120.0, 0.5]).unwrap();
    let summary = report.summary();

    assert!(summary.contains("words"));
    assert!(summary.contains("cost"));
}
