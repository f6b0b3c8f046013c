//! Integration tests for sharing a hook between threads
//!
//! These tests verify:
//! - One configured hook serves concurrent deliveries
//! - Clones share configuration and give identical results

mod common;

use common::{fixture, Delivery};
use forge_hooks_core::{
    providers::github::{self, GitHubWebhook},
    ParseError, WebhookOption,
};

const SECRET: &str = "s3cr3t";
const THREADS: usize = 8;
const DELIVERIES_PER_THREAD: usize = 25;

/// Verify that concurrent parse calls on one hook are independent
#[test]
fn test_shared_hook_across_threads() {
    // Arrange
    let hook = GitHubWebhook::new([WebhookOption::secret(SECRET)]).unwrap();
    let good = Delivery::post(fixture("github_push.json"))
        .header(github::EVENT_HEADER, "push")
        .signed(github::SIGNATURE_HEADER, "sha256=", SECRET);
    let bad = good.clone().signed(github::SIGNATURE_HEADER, "sha256=", "other");

    // Act
    let results: Vec<(usize, usize)> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let hook = &hook;
                let good = &good;
                let bad = &bad;
                scope.spawn(move || {
                    let mut accepted = 0;
                    let mut rejected = 0;
                    for i in 0..DELIVERIES_PER_THREAD {
                        let delivery = if i % 2 == 0 { good } else { bad };
                        match hook.parse(delivery.request(), &[github::PUSH]) {
                            Ok(_) => accepted += 1,
                            Err(ParseError::AuthVerificationFailed { .. }) => rejected += 1,
                            Err(other) => panic!("unexpected error: {other:?}"),
                        }
                    }
                    (accepted, rejected)
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    // Assert
    let expected_accepted = DELIVERIES_PER_THREAD.div_ceil(2);
    for (accepted, rejected) in results {
        assert_eq!(accepted, expected_accepted);
        assert_eq!(rejected, DELIVERIES_PER_THREAD - expected_accepted);
    }
}

/// Verify that clones moved to other threads decode identically
#[test]
fn test_clones_on_other_threads() {
    // Arrange
    let hook = GitHubWebhook::new([WebhookOption::secret(SECRET)]).unwrap();
    let delivery = Delivery::post(fixture("github_push.json"))
        .header(github::EVENT_HEADER, "push")
        .signed(github::SIGNATURE_HEADER, "sha256=", SECRET);
    let expected = hook.parse(delivery.request(), &[github::PUSH]).unwrap();

    // Act
    let payloads: Vec<_> = (0..THREADS)
        .map(|_| {
            let hook = hook.clone();
            let delivery = delivery.clone();
            std::thread::spawn(move || hook.parse(delivery.request(), &[github::PUSH]).unwrap())
        })
        .collect::<Vec<_>>()
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    // Assert
    assert!(payloads.iter().all(|payload| *payload == expected));
}
