//! Groups tasks by date, in the order they are displayed

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::task::Task;

/// The tasks that share a calendar date
#[derive(Clone, Debug, PartialEq)]
pub struct Bucket<'a> {
    date: NaiveDate,
    tasks: Vec<&'a Task>,
}

impl<'a> Bucket<'a> {
    pub fn date(&self) -> NaiveDate      { self.date        }
    pub fn tasks(&self) -> &[&'a Task]   { &self.tasks      }
    pub fn len(&self) -> usize           { self.tasks.len() }
    pub fn is_empty(&self) -> bool       { self.tasks.is_empty() }
}

/// Partition tasks into buckets, one per date.
///
/// Buckets are sorted chronologically. Within a bucket, incomplete tasks come first, then higher priorities first.
/// Remaining ties keep the order in which tasks were given.
pub fn group_by_date<'a, I>(tasks: I) -> Vec<Bucket<'a>>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut by_date: BTreeMap<NaiveDate, Vec<&'a Task>> = BTreeMap::new();
    for task in tasks {
        by_date.entry(task.date()).or_default().push(task);
    }

    by_date.into_iter()
        .map(|(date, mut tasks)| {
            // `sort_by` is stable
            tasks.sort_by(|l, r| compare_within_bucket(l, r));
            Bucket { date, tasks }
        })
        .collect()
}

/// Display order of two tasks of the same bucket
pub fn compare_within_bucket(left: &Task, right: &Task) -> Ordering {
    left.completed().cmp(&right.completed())
        .then_with(|| right.priority().cmp(&left.priority()))
}
