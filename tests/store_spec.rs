use chrono::NaiveDate;
use clinic_compliance::aggregate::{self, FilterMode};
use clinic_compliance::clock::FixedClock;
use clinic_compliance::db::{KeyValueStore, MemoryStore, Persistence, StorageError, STORAGE_KEY};
use clinic_compliance::models::*;
use clinic_compliance::store::{self, Action, EmployeeStore};
use speculate2::speculate;
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn input(name: &str, employment_type: EmploymentType, role: Role) -> CreateEmployeeInput {
    CreateEmployeeInput {
        name: name.to_string(),
        start_date: date(2024, 1, 1),
        employment_type,
        role,
    }
}

/// A backend whose writes always fail, like a full or missing disk.
struct BrokenStore;

impl KeyValueStore for BrokenStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("quota exceeded".to_string()))
    }
}

/// Roster with a mix of types, roles and completion states.
fn sample_collection() -> EmployeeCollection {
    let today = date(2024, 2, 1);
    let doctor = Uuid::new_v4();
    let nurse = Uuid::new_v4();
    let clerk = Uuid::new_v4();

    let c = EmployeeCollection::new();
    let c = store::add(&c, input("林醫師", EmploymentType::FullTime, Role::Doctor), doctor);
    let c = store::add(&c, input("陳護理師", EmploymentType::PartTime, Role::Nurse), nurse);
    let c = store::add(
        &c,
        input("張小姐", EmploymentType::PartTime, Role::Other("櫃台".into())),
        clerk,
    );

    // Clear every critical item for the clerk, and one for the doctor.
    let clerk_tasks: Vec<String> = c
        .get(clerk)
        .expect("clerk exists")
        .pending_critical()
        .map(|t| t.id.clone())
        .collect();
    let c = clerk_tasks
        .iter()
        .fold(c, |c, task_id| store::toggle_task(&c, clerk, task_id, today));
    store::toggle_task(&c, doctor, "ob-3", today)
}

speculate! {
    describe "pure operations" {
        before {
            let today = date(2024, 1, 15);
            let id = Uuid::new_v4();
        }

        it "adds a full-time doctor with six tasks, five of them critical" {
            let before = EmployeeCollection::new();
            let after = store::add(&before, input("林醫師", EmploymentType::FullTime, Role::Doctor), id);

            let employee = after.get(id).expect("employee added");
            assert_eq!(employee.tasks.len(), 6);
            let non_critical: Vec<_> = employee.tasks.iter().filter(|t| !t.critical).map(|t| t.id.as_str()).collect();
            assert_eq!(non_critical, vec!["ob-1"]);
            assert_eq!(
                aggregate::stats(&after).pending_critical_count,
                aggregate::stats(&before).pending_critical_count + 5
            );
        }

        it "derives the display role from the role note" {
            let c = store::add(
                &EmployeeCollection::new(),
                input("張小姐", EmploymentType::FullTime, Role::Other("清潔人員".into())),
                id,
            );
            assert_eq!(c.get(id).expect("added").display_role(), "清潔人員");
        }

        it "appends in insertion order and allows duplicate names" {
            let second = Uuid::new_v4();
            let c = store::add(&EmployeeCollection::new(), input("王", EmploymentType::FullTime, Role::Nurse), id);
            let c = store::add(&c, input("王", EmploymentType::FullTime, Role::Nurse), second);
            let order: Vec<Uuid> = c.iter().map(|e| e.id).collect();
            assert_eq!(order, vec![id, second]);
        }

        it "completes a part-time nurse's wage task with today's date" {
            let c = store::add(&EmployeeCollection::new(), input("陳護理師", EmploymentType::PartTime, Role::Nurse), id);
            let employee = c.get(id).expect("added");
            assert_eq!(employee.tasks.len(), 6);

            let before = aggregate::stats(&c).pending_critical_count;
            let c = store::toggle_task(&c, id, "pt-1", today);

            let task = c.get(id).and_then(|e| e.task("pt-1")).expect("task exists");
            assert_eq!(task.status, TaskStatus::Completed);
            assert_eq!(task.completed_date, Some(today));
            assert_eq!(aggregate::stats(&c).pending_critical_count, before - 1);
        }

        it "restores the original task when toggled twice" {
            let original = store::add(&EmployeeCollection::new(), input("A", EmploymentType::FullTime, Role::Therapist), id);
            let once = store::toggle_task(&original, id, "ob-5", today);
            let twice = store::toggle_task(&once, id, "ob-5", date(2024, 1, 16));

            assert_ne!(once, original);
            assert_eq!(twice, original);
            let task = twice.get(id).and_then(|e| e.task("ob-5")).expect("task exists");
            assert_eq!(task.status, TaskStatus::Pending);
            assert!(task.completed_date.is_none());
        }

        it "leaves the input collection untouched" {
            let original = store::add(&EmployeeCollection::new(), input("A", EmploymentType::FullTime, Role::Nurse), id);
            let snapshot = original.clone();
            let _ = store::toggle_task(&original, id, "ob-3", today);
            let _ = store::remove(&original, id);
            let _ = store::set_status(&original, id, EmployeeStatus::Resigned);
            assert_eq!(original, snapshot);
        }

        it "treats removing an unknown id as a no-op" {
            let c = sample_collection();
            assert_eq!(store::remove(&c, Uuid::new_v4()), c);
        }

        it "drops exactly the removed employee's pending critical tasks" {
            let c = sample_collection();
            let at_risk = aggregate::filter(&c, FilterMode::AtRisk);
            let victim = at_risk[0];
            let victim_pending = victim.pending_critical_count();
            assert!(victim_pending > 0);

            let after = store::remove(&c, victim.id);
            assert_eq!(
                aggregate::stats(&after).pending_critical_count,
                aggregate::stats(&c).pending_critical_count - victim_pending
            );
            assert_eq!(after.len(), c.len() - 1);
        }
    }

    describe "aggregation" {
        before {
            let c = sample_collection();
        }

        it "counts pending critical tasks the same way as the feed" {
            assert_eq!(
                aggregate::stats(&c).pending_critical_count,
                aggregate::pending_critical_feed(&c).len()
            );
        }

        it "counts part-timers and active employees" {
            let stats = aggregate::stats(&c);
            assert_eq!(stats.part_time_count, 2);
            assert_eq!(stats.total_active, 3);

            let first = c.iter().next().expect("non-empty").id;
            let resigned = store::set_status(&c, first, EmployeeStatus::Resigned);
            assert_eq!(aggregate::stats(&resigned).total_active, 2);
        }

        it "splits at-risk employees cleanly from the rest" {
            let at_risk = aggregate::filter(&c, FilterMode::AtRisk);
            assert_eq!(at_risk.len(), 2);
            assert!(at_risk.iter().all(|e| e.pending_critical_count() > 0));

            let at_risk_ids: Vec<Uuid> = at_risk.iter().map(|e| e.id).collect();
            let rest: Vec<&Employee> = c.iter().filter(|e| !at_risk_ids.contains(&e.id)).collect();
            assert_eq!(rest.len(), 1);
            assert!(rest.iter().all(|e| e.pending_critical_count() == 0));
        }

        it "keeps roster order in filtered views" {
            let all: Vec<Uuid> = aggregate::filter(&c, FilterMode::All).iter().map(|e| e.id).collect();
            let expected: Vec<Uuid> = c.iter().map(|e| e.id).collect();
            assert_eq!(all, expected);

            let part_time: Vec<&str> = aggregate::filter(&c, FilterMode::PartTime)
                .iter()
                .map(|e| e.name.as_str())
                .collect();
            assert_eq!(part_time, vec!["陳護理師", "張小姐"]);
        }

        it "orders the feed by employee then checklist position" {
            let feed = aggregate::pending_critical_feed(&c);
            let pairs: Vec<(&str, &str)> = feed.iter().map(|(e, t)| (e.name.as_str(), t.id.as_str())).collect();
            assert_eq!(
                pairs,
                vec![
                    ("林醫師", "ob-5"),
                    ("林醫師", "ft-1"),
                    ("林醫師", "doc-1"),
                    ("林醫師", "doc-2"),
                    ("陳護理師", "ob-3"),
                    ("陳護理師", "ob-5"),
                    ("陳護理師", "pt-1"),
                    ("陳護理師", "med-1"),
                ]
            );
        }

        it "summarizes progress per employee" {
            let rows = aggregate::summaries(&c, FilterMode::All);
            let clerk = rows.iter().find(|r| r.name == "張小姐").expect("clerk row");
            assert_eq!(clerk.display_role, "櫃台");
            assert_eq!(clerk.pending_critical_count, 0);
            assert_eq!(clerk.completed_count, 4);
            assert_eq!(clerk.task_count, 6);
        }
    }

    describe "persistence format" {
        it "round-trips a roster through JSON" {
            let c = sample_collection();
            let json = serde_json::to_string(&c).expect("serialize");
            let back: EmployeeCollection = serde_json::from_str(&json).expect("deserialize");
            assert_eq!(back, c);
        }

        it "does not store the derived display role" {
            let c = sample_collection();
            let value = serde_json::to_value(&c).expect("serialize");
            let first = &value.as_array().expect("array")[0];
            assert!(first.get("display_role").is_none());
            assert_eq!(first["role"], serde_json::json!({ "id": "doctor" }));
        }
    }

    describe "employee store" {
        before {
            let today = date(2024, 5, 20);
            let backend = MemoryStore::new();
            let mut employees = EmployeeStore::open(Persistence::new(backend.clone()), FixedClock(today));
        }

        it "starts empty with nothing stored" {
            assert!(employees.snapshot().is_empty());
        }

        it "persists after every dispatch" {
            let dispatch = employees.dispatch(Action::Add(input("林醫師", EmploymentType::FullTime, Role::Doctor)));
            assert!(dispatch.persisted);
            let id = dispatch.created.expect("id assigned");

            let reloaded = Persistence::new(backend.clone()).load();
            assert_eq!(&reloaded, employees.snapshot());

            employees.dispatch(Action::Remove(id));
            assert!(Persistence::new(backend.clone()).load().is_empty());
        }

        it "stamps completions with the injected clock" {
            let id = employees
                .dispatch(Action::Add(input("A", EmploymentType::PartTime, Role::Psychologist)))
                .created
                .expect("id assigned");
            employees.dispatch(Action::ToggleTask { employee_id: id, task_id: "pt-1".to_string() });

            let task = employees.snapshot().get(id).and_then(|e| e.task("pt-1")).expect("task exists");
            assert_eq!(task.completed_date, Some(today));
        }

        it "assigns distinct ids" {
            let a = employees.dispatch(Action::Add(input("A", EmploymentType::FullTime, Role::Nurse))).created;
            let b = employees.dispatch(Action::Add(input("A", EmploymentType::FullTime, Role::Nurse))).created;
            assert!(a.is_some());
            assert_ne!(a, b);
        }

        it "reloads the stored roster when reopened" {
            employees.dispatch(Action::Add(input("A", EmploymentType::FullTime, Role::Nurse)));
            let reopened = EmployeeStore::open(Persistence::new(backend.clone()), FixedClock(today));
            assert_eq!(reopened.snapshot(), employees.snapshot());
        }

        it "opens empty when the stored value is corrupt" {
            backend.set(STORAGE_KEY, "not json").expect("write");
            let reopened = EmployeeStore::open(Persistence::new(backend.clone()), FixedClock(today));
            assert!(reopened.snapshot().is_empty());
        }

        it "keeps in-memory state when saving fails" {
            let mut broken = EmployeeStore::open(Persistence::new(BrokenStore), FixedClock(today));
            let dispatch = broken.dispatch(Action::Add(input("A", EmploymentType::FullTime, Role::Nurse)));
            assert!(!dispatch.persisted);
            let id = dispatch.created.expect("id assigned");
            assert!(broken.snapshot().contains(id));

            broken.dispatch(Action::ToggleTask { employee_id: id, task_id: "ob-1".to_string() });
            let task = broken.snapshot().get(id).and_then(|e| e.task("ob-1")).expect("task exists");
            assert_eq!(task.status, TaskStatus::Completed);
        }
    }
}
