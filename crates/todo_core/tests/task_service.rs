use std::cell::RefCell;
use std::sync::{Arc, Mutex};
use todo_core::{
    CompletionObserver, EpochMillis, LocalNotificationCenter, MemoryTaskStore, ReminderScheduler,
    StoreError, TaskId, TaskService,
};

#[derive(Default)]
struct RecordingScheduler {
    calls: RefCell<Vec<(String, EpochMillis)>>,
}

impl ReminderScheduler for RecordingScheduler {
    fn schedule(&self, description: &str, time: EpochMillis) {
        self.calls.borrow_mut().push((description.to_string(), time));
    }
}

#[derive(Clone, Default)]
struct RecordingObserver {
    changes: Arc<Mutex<Vec<(TaskId, bool)>>>,
}

impl CompletionObserver for RecordingObserver {
    fn completion_changed(&self, id: TaskId, is_done: bool) {
        self.changes.lock().unwrap().push((id, is_done));
    }
}

fn new_service() -> TaskService<MemoryTaskStore, RecordingScheduler> {
    TaskService::new(MemoryTaskStore::new(), RecordingScheduler::default())
}

#[test]
fn add_with_reminder_schedules_once() {
    let mut service = new_service();

    let id = service
        .add_task("Buy milk", Some(1_700_000_000_000))
        .unwrap();

    assert_eq!(id, 0);
    assert_eq!(
        *service.scheduler().calls.borrow(),
        vec![("Buy milk".to_string(), 1_700_000_000_000)]
    );
}

#[test]
fn add_without_reminder_schedules_nothing() {
    let mut service = new_service();

    service.add_task("no alarm", None).unwrap();

    assert_eq!(service.len(), 1);
    assert!(service.scheduler().calls.borrow().is_empty());
}

#[test]
fn add_empty_description_is_rejected_without_scheduling() {
    let mut service = new_service();
    service.add_task("first", None).unwrap();

    let err = service.add_task("", Some(1_700_000_000_000)).unwrap_err();

    assert!(matches!(err, StoreError::InvalidInput(_)));
    assert_eq!(service.len(), 1);
    assert!(service.scheduler().calls.borrow().is_empty());
}

#[test]
fn remove_keeps_scheduled_reminders() {
    let mut service = new_service();
    service.add_task("A", Some(60_000)).unwrap();
    service.add_task("B", None).unwrap();

    let removed = service.remove_task(0).unwrap();

    assert_eq!(removed.description, "A");
    assert_eq!(service.get(0).unwrap().description, "B");
    assert_eq!(service.scheduler().calls.borrow().len(), 1);
}

#[test]
fn toggle_notifies_observer_on_success_only() {
    let mut service = new_service();
    let observer = RecordingObserver::default();
    service.set_observer(Box::new(observer.clone()));
    service.add_task("A", None).unwrap();

    assert!(service.toggle_task(0).unwrap());
    assert!(!service.toggle_task(0).unwrap());
    let err = service.toggle_task(5).unwrap_err();

    assert_eq!(err, StoreError::NotFound { id: 5, len: 1 });
    assert_eq!(*observer.changes.lock().unwrap(), vec![(0, true), (0, false)]);
}

#[test]
fn service_scenario_matches_store_semantics() {
    let mut service = new_service();

    service.add_task("Buy milk", None).unwrap();
    service.toggle_task(0).unwrap();
    assert!(service.tasks()[0].is_done);

    service.remove_task(0).unwrap();
    assert!(service.is_empty());
}

#[test]
fn shared_notification_center_receives_requests_from_service() {
    fn clock() -> EpochMillis {
        1_699_999_980_000
    }
    let center = Arc::new(LocalNotificationCenter::with_clock(clock));
    let mut service = TaskService::new(MemoryTaskStore::new(), Arc::clone(&center));

    service
        .add_task("stand-up", Some(1_699_999_980_000 + 90_500))
        .unwrap();

    let due = center.take_due(1_700_000_100_000);
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].body, "stand-up");
    assert_eq!(due[0].fire_at, 1_699_999_980_000 + 60_000);
}
