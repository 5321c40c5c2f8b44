use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{Duration, Instant};

use appdock::AppdockError;
use appdock::retry::{self, RetryPolicy};

fn transient_err(message: &str) -> AppdockError {
    AppdockError::UnexpectedError(message.to_string())
}

#[tokio::test]
async fn exhausted_budget_surfaces_the_last_failure() {
    let attempts = AtomicU32::new(0);

    let result: Result<(), AppdockError> = retry::execute(
        RetryPolicy::new(3, Duration::from_millis(10)),
        "always timeout",
        || {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { Err(transient_err("statement timeout")) }
        },
    )
    .await;

    assert_eq!(attempts.load(Ordering::SeqCst), 3, "budget is 3 attempts");
    let err = result.unwrap_err();
    assert_eq!(err.to_string(), "Unexpected error: statement timeout");
}

#[tokio::test]
async fn transient_failure_then_success_returns_the_value() {
    let attempts = AtomicU32::new(0);

    let result = retry::execute(
        RetryPolicy::new(3, Duration::from_millis(10)),
        "flaky once",
        || {
            let attempt = attempts.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                if attempt == 1 {
                    Err(transient_err("connection reset by peer"))
                } else {
                    Ok("created")
                }
            }
        },
    )
    .await;

    assert_eq!(result.expect("second attempt succeeds"), "created");
    assert_eq!(attempts.load(Ordering::SeqCst), 2, "exactly two attempts");
}

#[tokio::test]
async fn permanent_failure_is_not_retried() {
    let attempts = AtomicU32::new(0);

    let result: Result<(), AppdockError> = retry::execute(
        RetryPolicy::new(5, Duration::from_millis(10)),
        "permission denied",
        || {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { Err(transient_err("permission denied")) }
        },
    )
    .await;

    assert_eq!(
        attempts.load(Ordering::SeqCst),
        1,
        "permanent failures propagate on the first attempt"
    );
    assert_eq!(
        result.unwrap_err().to_string(),
        "Unexpected error: permission denied"
    );
}

#[tokio::test]
async fn budget_of_one_never_waits() {
    let attempts = AtomicU32::new(0);
    let started = Instant::now();

    let result: Result<(), AppdockError> = retry::execute(
        RetryPolicy::new(1, Duration::from_secs(60)),
        "single attempt",
        || {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { Err(transient_err("network unreachable")) }
        },
    )
    .await;

    assert!(result.is_err());
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
    // A 60s base delay would be unmissable if any sleep happened.
    assert!(
        started.elapsed() < Duration::from_secs(5),
        "no backoff sleep on the final attempt"
    );
}

#[tokio::test]
async fn backoff_grows_linearly_with_the_attempt_ordinal() {
    let attempt_times: Mutex<Vec<Instant>> = Mutex::new(Vec::new());

    let result: Result<(), AppdockError> = retry::execute(
        RetryPolicy::new(3, Duration::from_millis(50)),
        "linear backoff",
        || {
            attempt_times.lock().unwrap().push(Instant::now());
            async { Err(transient_err("statement timeout")) }
        },
    )
    .await;
    assert!(result.is_err());

    let times = attempt_times.lock().unwrap();
    assert_eq!(times.len(), 3);
    let first_gap = times[1] - times[0];
    let second_gap = times[2] - times[1];
    assert!(
        first_gap >= Duration::from_millis(50),
        "delay before attempt 2 is base * 1, got {first_gap:?}"
    );
    assert!(
        second_gap >= Duration::from_millis(100),
        "delay before attempt 3 is base * 2, got {second_gap:?}"
    );
    assert!(second_gap > first_gap, "delays are non-decreasing");
}

#[tokio::test]
async fn socket_hangup_twice_then_success() {
    #[derive(Debug, PartialEq)]
    struct Created {
        id: u64,
    }

    let attempts = AtomicU32::new(0);
    let started = Instant::now();

    let result = retry::execute(
        RetryPolicy::new(3, Duration::from_millis(100)),
        "socket hangup",
        || {
            let attempt = attempts.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                if attempt <= 2 {
                    Err(transient_err("ECONNRESET: socket hang up"))
                } else {
                    Ok(Created { id: 42 })
                }
            }
        },
    )
    .await;

    assert_eq!(result.expect("third attempt succeeds"), Created { id: 42 });
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
    assert!(
        started.elapsed() >= Duration::from_millis(300),
        "waited 100ms then 200ms between attempts"
    );
}
