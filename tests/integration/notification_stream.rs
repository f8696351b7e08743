//! Property-based tests for notification dispatch guarantees

use std::sync::Arc;

use parking_lot::Mutex;
use proptest::prelude::*;

use gantry::progress::{
    ListenerRegistry, NotificationListener, ProgressBus, ProgressNotification,
};

#[derive(Default)]
struct Recorder {
    seen: Mutex<Vec<String>>,
}

impl NotificationListener for Recorder {
    fn started(&self, description: &str) {
        self.seen.lock().push(format!("started:{description}"));
    }

    fn progress(&self, status: Option<&str>) {
        self.seen
            .lock()
            .push(format!("progress:{}", status.unwrap_or("-")));
    }

    fn completed(&self) {
        self.seen.lock().push("completed".to_string());
    }
}

fn arbitrary_notification() -> impl Strategy<Value = ProgressNotification> {
    prop_oneof![
        "[a-z ]{0,24}".prop_map(|description| ProgressNotification::started(description)),
        proptest::option::of("[0-9]{1,3}%").prop_map(|status| ProgressNotification::Tick { status }),
        Just(ProgressNotification::Completed),
    ]
}

/// Every registered listener observes the same stream in the same order.
#[test]
fn test_all_listeners_see_identical_streams() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(
                proptest::collection::vec(arbitrary_notification(), 0..32),
                1usize..5,
            ),
            |(notifications, listener_count)| {
                let bus = ProgressBus::new();
                let recorders: Vec<Arc<Recorder>> = (0..listener_count)
                    .map(|_| Arc::new(Recorder::default()))
                    .collect();
                for recorder in &recorders {
                    bus.add_listener(recorder.clone()).unwrap();
                }

                for notification in &notifications {
                    bus.broadcast(notification);
                }

                let reference = recorders[0].seen.lock().clone();
                assert_eq!(reference.len(), notifications.len());
                for recorder in &recorders[1..] {
                    assert_eq!(*recorder.seen.lock(), reference);
                }
                Ok(())
            },
        )
        .unwrap();
}

/// Matched add/remove pairs always drain the registry back to empty, no
/// matter how registrations interleave with broadcasts.
#[test]
fn test_matched_registrations_never_leak() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &proptest::collection::vec(any::<bool>(), 0..24),
            |broadcast_between| {
                let bus = ProgressBus::new();
                let mut registered: Vec<Arc<dyn NotificationListener>> = Vec::new();

                for broadcast in broadcast_between {
                    let listener: Arc<dyn NotificationListener> = Arc::new(Recorder::default());
                    bus.add_listener(listener.clone()).unwrap();
                    registered.push(listener);
                    if broadcast {
                        bus.broadcast(&ProgressNotification::tick("tick"));
                    }
                }

                assert_eq!(bus.listener_count(), registered.len());
                for listener in &registered {
                    bus.remove_listener(listener).unwrap();
                }
                assert_eq!(bus.listener_count(), 0);
                Ok(())
            },
        )
        .unwrap();
}

/// A second registration of the same allocation is always rejected and
/// leaves the original registration intact.
#[test]
fn test_duplicate_registration_is_always_rejected() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(1usize..4), |attempts| {
            let bus = ProgressBus::new();
            let listener: Arc<dyn NotificationListener> = Arc::new(Recorder::default());
            bus.add_listener(listener.clone()).unwrap();

            for _ in 0..attempts {
                assert!(bus.add_listener(listener.clone()).is_err());
            }

            assert_eq!(bus.listener_count(), 1);
            bus.remove_listener(&listener).unwrap();
            assert_eq!(bus.listener_count(), 0);
            Ok(())
        })
        .unwrap();
}
