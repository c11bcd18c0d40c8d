//! Dashboard grouping.
//!
//! [`partition`] is a pure function of the todo list: it is recomputed on
//! every read and never stored. Order inside each group follows the input
//! order (newest first, as listed by the server).

use crate::todo::{Priority, TodoWithProject};

/// Todos split into the dashboard groups.
///
/// Only `high_priority` and `other` are rendered; `completed` is kept so the
/// three groups together always cover the input.
#[derive(Debug, Default, PartialEq)]
pub struct Partition<'a> {
    /// Incomplete todos with `priority = high`.
    pub high_priority: Vec<&'a TodoWithProject>,
    /// Incomplete todos with any other priority.
    pub other: Vec<&'a TodoWithProject>,
    pub completed: Vec<&'a TodoWithProject>,
}

impl Partition<'_> {
    /// Number of todos still to do.
    pub fn incomplete_count(&self) -> usize {
        self.high_priority.len() + self.other.len()
    }
}

/// Split todos into high-priority, other, and completed groups.
pub fn partition<'a, I>(todos: I) -> Partition<'a>
where
    I: IntoIterator<Item = &'a TodoWithProject>,
{
    let mut groups = Partition::default();
    for entry in todos {
        if entry.todo.completed {
            groups.completed.push(entry);
        } else if entry.todo.priority == Priority::High {
            groups.high_priority.push(entry);
        } else {
            groups.other.push(entry);
        }
    }
    groups
}
