//! A panicking user function must not leave downstream stages waiting
//! forever: the stage's outputs close while its task unwinds.

use futures_flows::{collect, generate, map, partition};
use std::time::Duration;
use tokio::time::timeout;

const LIMIT: Duration = Duration::from_secs(5);

#[tokio::test]
async fn panicking_map_closes_output() {
    let out = map(generate(1..=5), |n: u32| {
        if n == 3 {
            panic!("I don't like the number 3");
        }
        n * 10
    });
    let seen = timeout(LIMIT, collect(out)).await.unwrap();
    assert_eq!(seen, [10, 20]);
}

#[tokio::test]
async fn panicking_predicate_closes_both_sides() {
    let (yes, no) = partition(generate(1..=5), |n: &u32| {
        assert!(*n < 2, "predicate rejects {n}");
        true
    });
    let (yes, no) = timeout(LIMIT, async { tokio::join!(collect(yes), collect(no)) })
        .await
        .unwrap();
    assert_eq!(yes, [1]);
    assert!(no.is_empty());
}
