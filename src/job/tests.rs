use std::collections::BTreeSet;

use crate::job::{JobId, JobSetError, JobTable};
use crate::tests::{iv, job};
use crate::time::INFINITY;

fn three_jobs() -> JobTable {
    JobTable::new(vec![
        job("J1", (0, 2), (1, 3), 1),
        job("J2", (4, 4), (2, 2), 3),
        job("J3", (0, 10), (0, 5), 2),
    ])
    .unwrap()
}

#[test]
fn lookups() {
    let jobs = three_jobs();
    assert_eq!(jobs.len(), 3);
    let j3 = jobs.lookup("J3").unwrap();
    assert_eq!(j3, JobId::from(2));
    assert_eq!(jobs.name(j3), "J3");
    assert_eq!(jobs.release(j3), iv(0, 10));
    assert_eq!(jobs.cost(j3), iv(0, 5));
    assert_eq!(jobs.priority(j3), 2);
    assert!(jobs.predecessors(j3).is_empty());
    assert!(jobs.lookup("J4").is_none());
    assert_eq!(jobs.ids().count(), 3);
}

#[test]
fn priority_order() {
    let jobs = three_jobs();
    let (j1, j2, j3) = (JobId::from(0), JobId::from(1), JobId::from(2));
    assert!(jobs.has_higher_priority(j1, j3));
    assert!(jobs.has_higher_priority(j3, j2));
    assert!(!jobs.has_higher_priority(j2, j1));
    assert!(!jobs.has_higher_priority(j1, j1));
}

#[test]
fn inverted_release_rejected() {
    let result = JobTable::new(vec![job("J1", (5, 4), (1, 1), 1)]);
    assert_eq!(
        result.unwrap_err(),
        JobSetError::InvertedRelease {
            job: "J1".to_string(),
            release: iv(5, 4)
        }
    );
}

#[test]
fn inverted_cost_rejected() {
    let result = JobTable::new(vec![
        job("J1", (0, 0), (1, 1), 1),
        job("J2", (0, 0), (3, 2), 2),
    ]);
    assert!(matches!(result, Err(JobSetError::InvertedCost { job, .. }) if job == "J2"));
}

#[test]
fn negative_values_rejected() {
    let result = JobTable::new(vec![job("J1", (-1, 0), (1, 1), 1)]);
    assert!(matches!(result, Err(JobSetError::NegativeTime { .. })));
    let result = JobTable::new(vec![job("J1", (0, 0), (-1, 1), 1)]);
    assert!(matches!(result, Err(JobSetError::NegativeTime { .. })));
}

#[test]
fn duplicate_priority_rejected() {
    let result = JobTable::new(vec![
        job("J1", (0, 0), (1, 1), 7),
        job("J2", (0, 0), (1, 1), 3),
        job("J3", (0, 0), (1, 1), 7),
    ]);
    assert_eq!(
        result.unwrap_err(),
        JobSetError::DuplicatePriority {
            first: "J1".to_string(),
            second: "J3".to_string(),
            priority: 7
        }
    );
}

#[test]
fn duplicate_name_rejected() {
    let result = JobTable::new(vec![
        job("J1", (0, 0), (1, 1), 1),
        job("J1", (0, 0), (1, 1), 2),
    ]);
    assert!(matches!(result, Err(JobSetError::DuplicateName { .. })));
}

#[test]
fn precedence() {
    let jobs = three_jobs()
        .with_predecessors("J2", ["J1", "J3"])
        .unwrap();
    let (j1, j2, j3) = (JobId::from(0), JobId::from(1), JobId::from(2));
    assert_eq!(
        jobs.predecessors(j2).iter().copied().collect::<Vec<_>>(),
        vec![j1, j3]
    );

    let mut dispatched = BTreeSet::new();
    assert!(jobs.is_ready(j1, &dispatched));
    assert!(!jobs.is_ready(j2, &dispatched));
    dispatched.insert(j1);
    assert!(!jobs.is_ready(j1, &dispatched));
    assert!(!jobs.is_ready(j2, &dispatched));
    dispatched.insert(j3);
    assert!(jobs.is_ready(j2, &dispatched));
}

#[test]
fn unknown_predecessor_rejected() {
    let result = three_jobs().with_predecessors("J2", ["J9"]);
    assert_eq!(
        result.unwrap_err(),
        JobSetError::UnknownJob {
            job: "J9".to_string()
        }
    );
    assert!(three_jobs().with_predecessors("J0", ["J1"]).is_err());
}

#[test]
fn error_messages() {
    let err = JobTable::new(vec![job("J7", (3, 1), (1, 1), 1)]).unwrap_err();
    assert_eq!(err.to_string(), "job J7 has an inverted release window [3, 1]");
}

#[test]
fn horizon_reaching_infinity_rejected() {
    // released after the time limit
    assert_eq!(
        JobTable::new(vec![job("J1", (200000, 200000), (1, 1), 1)]).unwrap_err(),
        JobSetError::HorizonTooLong {
            horizon: 200001,
            limit: INFINITY
        }
    );
    // total workload runs past the time limit
    assert_eq!(
        JobTable::new(vec![
            job("J1", (0, 0), (150000, 150000), 1),
            job("J2", (0, 0), (1, 1), 2),
        ])
        .unwrap_err(),
        JobSetError::HorizonTooLong {
            horizon: 150001,
            limit: INFINITY
        }
    );
    assert!(JobTable::new(vec![job("J1", (50000, 50000), (50000, 50000), 1)]).is_err());
    assert!(JobTable::new(vec![job("J1", (50000, 50000), (49999, 49999), 1)]).is_ok());

    let err = JobTable::new(vec![job("J1", (0, 0), (INFINITY, INFINITY), 1)]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "job set may be busy until 100000, which reaches the time limit 100000"
    );
}
