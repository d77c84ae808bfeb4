use crate::model::Task;

/// View-level selection over the collection; not stored per task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    All,
    Pending,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskCounts {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
}

/// Tasks matching `filter`, in stored order.
pub fn filtered(tasks: &[Task], filter: FilterKind) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| match filter {
            FilterKind::All => true,
            FilterKind::Pending => !task.completed,
            FilterKind::Completed => task.completed,
        })
        .cloned()
        .collect()
}

pub fn counts(tasks: &[Task]) -> TaskCounts {
    let completed = tasks.iter().filter(|task| task.completed).count();
    TaskCounts {
        total: tasks.len(),
        pending: tasks.len() - completed,
        completed,
    }
}
