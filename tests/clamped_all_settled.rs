mod common;

use common::{Gauge, all_fulfilled, some_rejected};
use futures::FutureExt;
use taskclamp::{Settled, SyncFn, TaskError, TaskFn, TaskRef, clamped_all_settled};

fn expected_mixed() -> Vec<Settled<&'static str, TaskError>> {
    vec![
        Settled::Fulfilled("zero"),
        Settled::Fulfilled("one"),
        Settled::Rejected(TaskError::fail("two")),
        Settled::Fulfilled("three"),
        Settled::Fulfilled("four"),
        Settled::Rejected(TaskError::fail("five")),
    ]
}

#[tokio::test(start_paused = true)]
async fn executes_with_max_parallel_executions() {
    let gauge = Gauge::new();
    let outcomes = clamped_all_settled(some_rejected(&gauge), 2).await;

    assert_eq!(outcomes, expected_mixed());
    assert_eq!(gauge.peak(), 2);
    assert_eq!(gauge.started(), 6);
}

#[tokio::test(start_paused = true)]
async fn all_fulfilled_batch() {
    let gauge = Gauge::new();
    let outcomes = clamped_all_settled(all_fulfilled(&gauge), 2).await;

    let values: Vec<_> = outcomes.into_iter().map(Settled::into_result).collect();
    assert_eq!(values, [Ok("zero"), Ok("one"), Ok("two"), Ok("three")]);
    assert_eq!(gauge.peak(), 2);
}

#[tokio::test(start_paused = true)]
async fn clamp_larger_than_batch() {
    let gauge = Gauge::new();
    let outcomes = clamped_all_settled(some_rejected(&gauge), 7).await;

    assert_eq!(outcomes, expected_mixed());
    assert_eq!(gauge.peak(), 6);
}

#[tokio::test(start_paused = true)]
async fn clamp_equal_to_batch() {
    let gauge = Gauge::new();
    let outcomes = clamped_all_settled(some_rejected(&gauge), 6).await;

    assert_eq!(outcomes, expected_mixed());
    assert_eq!(gauge.peak(), 6);
}

#[tokio::test(start_paused = true)]
async fn clamp_of_zero_runs_nothing() {
    let gauge = Gauge::new();
    let outcomes = clamped_all_settled(some_rejected(&gauge), 0).await;

    assert!(outcomes.is_empty());
    assert_eq!(gauge.started(), 0);
}

#[tokio::test(start_paused = true)]
async fn empty_batch() {
    let tasks: Vec<TaskRef<u8, TaskError>> = Vec::new();
    assert!(clamped_all_settled(tasks, 3).await.is_empty());
}

#[test]
fn degenerate_runs_resolve_on_first_poll() {
    let gauge = Gauge::new();

    let zero_clamp = clamped_all_settled(some_rejected(&gauge), 0).now_or_never();
    assert_eq!(zero_clamp.map(|v| v.len()), Some(0));

    let tasks: Vec<TaskRef<u8, TaskError>> = Vec::new();
    let empty = clamped_all_settled(tasks, 3).now_or_never();
    assert_eq!(empty.map(|v| v.len()), Some(0));

    assert_eq!(gauge.started(), 0);
}

#[test]
fn settles_outside_tokio() {
    let tasks: Vec<TaskRef<u32, TaskError>> = vec![
        TaskFn::boxed(|| async { Ok(1) }),
        SyncFn::boxed(|| Err(TaskError::fail("two"))),
    ];

    let outcomes = futures::executor::block_on(clamped_all_settled(tasks, 2));

    assert_eq!(
        outcomes,
        [Settled::Fulfilled(1), Settled::Rejected(TaskError::fail("two"))]
    );
}

#[tokio::test(start_paused = true)]
async fn single_task() {
    let gauge = Gauge::new();
    let mut tasks = some_rejected(&gauge);
    tasks.truncate(1);
    let outcomes = clamped_all_settled(tasks, 2).await;

    assert_eq!(outcomes, [Settled::Fulfilled("zero")]);
    assert_eq!(gauge.peak(), 1);
}

#[tokio::test(start_paused = true)]
async fn single_failing_task() {
    let gauge = Gauge::new();
    let tasks: Vec<TaskRef<(), TaskError>> = vec![gauge.rejected("only", 50)];
    let outcomes = clamped_all_settled(tasks, 4).await;

    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].as_label(), "rejected");
    assert_eq!(outcomes[0].reason().map(TaskError::as_message), Some("only"));
}

#[tokio::test]
async fn mixes_immediate_and_async_tasks() {
    let tasks: Vec<TaskRef<u32, TaskError>> = vec![
        SyncFn::boxed(|| Ok(1)),
        TaskFn::boxed(|| async { Err(TaskError::fail("two")) }),
        SyncFn::boxed(|| Err(TaskError::fail("three"))),
        TaskFn::boxed(|| async { Ok(4) }),
    ];
    let outcomes = clamped_all_settled(tasks, 1).await;

    assert_eq!(
        outcomes,
        [
            Settled::Fulfilled(1),
            Settled::Rejected(TaskError::fail("two")),
            Settled::Rejected(TaskError::fail("three")),
            Settled::Fulfilled(4),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn failures_do_not_stop_claims() {
    let gauge = Gauge::new();
    let tasks: Vec<TaskRef<usize, TaskError>> = (0..10)
        .map(|i| {
            if i % 2 == 0 {
                gauge.rejected("even", 10)
            } else {
                gauge.fulfilled(i, 10)
            }
        })
        .collect();

    let outcomes = clamped_all_settled(tasks, 3).await;

    assert_eq!(outcomes.len(), 10);
    assert_eq!(gauge.started(), 10);
    assert_eq!(gauge.peak(), 3);
    for (i, outcome) in outcomes.iter().enumerate() {
        assert_eq!(outcome.is_fulfilled(), i % 2 == 1, "index {i}");
    }
}
