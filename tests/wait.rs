#![cfg(feature = "tokio")]

use std::time::Duration;

use statecell::Observable;

#[tokio::test]
async fn wait_value_sees_an_already_matching_value() {
    let o = Observable::new(3);
    o.wait_value(3).await;
}

#[tokio::test]
async fn wait_for_resolves_on_a_later_set() {
    let o = Observable::new(0);
    let waiter = tokio::spawn({
        let o = o.clone();
        async move { o.wait_for(|pair| pair.value >= 2).await }
    });
    tokio::task::yield_now().await; // let the waiter subscribe

    o.set(1);
    o.set(2);

    tokio::time::timeout(Duration::from_secs(5), waiter).await.expect("timed out").unwrap();
}

#[tokio::test]
async fn wait_for_extracts_a_result() {
    let o = Observable::new("starting".to_string());
    let waiter = tokio::spawn({
        let o = o.clone();
        async move { o.wait_for(|pair| if pair.value == "ready" { Some(pair.value.len()) } else { None }).await }
    });
    tokio::task::yield_now().await;

    o.set("ready".to_string());

    let len = tokio::time::timeout(Duration::from_secs(5), waiter).await.expect("timed out").unwrap();
    assert_eq!(len, 5);
}
