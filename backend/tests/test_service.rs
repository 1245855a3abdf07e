//! DemoService tests
//!
//! The service adds an audit log; results must match the free functions.

use bbs_demo_core_rs::{
    decrypt, encrypt, sample, shuffle, BbsParams, DemoService, Event, OperationKind,
    SamplingStrategy,
};

fn blum() -> BbsParams {
    BbsParams::new(10007u32, 10039u32, 42u32)
}

#[test]
fn test_service_matches_free_functions() {
    let mut service = DemoService::new();

    assert_eq!(service.encrypt("hi", &blum()).unwrap(), encrypt("hi", &blum()).unwrap());
    assert_eq!(
        service.decrypt("ABCD", &blum()).unwrap(),
        decrypt("ABCD", &blum()).unwrap()
    );
    assert_eq!(
        service.spin(&blum(), 20, SamplingStrategy::Modulo).unwrap(),
        sample(&blum(), 20).unwrap()
    );
    assert_eq!(
        service.shuffle(&blum(), vec![1, 2, 3, 4]).unwrap(),
        shuffle(&blum(), vec![1, 2, 3, 4]).unwrap()
    );
    assert_eq!(service.operation_count(), 4);
}

#[test]
fn test_operations_are_independent() {
    // Earlier calls must not advance any state used by later calls
    let mut service = DemoService::new();
    let first = service.encrypt("same", &blum()).unwrap();
    service.spin(&blum(), 37, SamplingStrategy::Rejection).unwrap();
    let second = service.encrypt("same", &blum()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_completed_event_counts_bits() {
    let mut service = DemoService::new();
    service.spin(&blum(), 8, SamplingStrategy::Modulo).unwrap();

    let events = service.event_log().events_for_operation(1);
    assert_eq!(
        events.last().copied(),
        Some(&Event::OperationCompleted {
            operation: 1,
            kind: OperationKind::Spin,
            steps: 3,
            bits_drawn: 6,
        })
    );
}

#[test]
fn test_generator_created_event() {
    let mut service = DemoService::new();
    service.encrypt("x", &blum()).unwrap();

    // 10007 * 10039 = 100460273, a 27-bit number
    assert_eq!(
        service.event_log().events()[0],
        Event::GeneratorCreated {
            operation: 1,
            kind: OperationKind::Encrypt,
            modulus_bits: 27,
        }
    );
}

#[test]
fn test_non_blum_parameters_warn_but_succeed() {
    let mut service = DemoService::new();
    let spin = service.spin(&BbsParams::default(), 20, SamplingStrategy::Modulo);
    assert!(spin.is_ok());

    let warnings = service.event_log().events_of_type("NonBlumParameter");
    assert_eq!(warnings.len(), 2);
    assert_eq!(
        warnings[0],
        &Event::NonBlumParameter {
            operation: 1,
            name: "p".to_string(),
            residue: 1,
        }
    );
}

#[test]
fn test_shuffle_rejections_logged() {
    let mut service = DemoService::new();
    let outcome = service.shuffle(&blum(), (0..8).collect::<Vec<u32>>()).unwrap();
    assert_eq!(outcome.rejected_draws, 2);

    let rejections = service.event_log().events_of_type("ShuffleRejections");
    assert_eq!(
        rejections,
        vec![&Event::ShuffleRejections {
            operation: 1,
            rejected: 2
        }]
    );
}

#[test]
fn test_failed_operation_logged_and_counted() {
    let mut service = DemoService::new();
    assert!(service.spin(&blum(), 0, SamplingStrategy::Modulo).is_err());
    assert!(service.shuffle_deck(&BbsParams::default()).is_err());

    let failures = service.event_log().events_of_type("OperationFailed");
    assert_eq!(failures.len(), 2);
    assert_eq!(failures[0].operation(), 1);
    assert_eq!(failures[1].operation(), 2);
    assert_eq!(failures[1].kind(), Some(OperationKind::Shuffle));
}

#[test]
fn test_generators_per_thread() {
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| encrypt("concurrent", &blum()).unwrap()))
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(results.windows(2).all(|w| w[0] == w[1]));
}
