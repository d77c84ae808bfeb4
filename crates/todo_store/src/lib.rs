pub mod error;
pub mod model;
pub mod projection;
pub mod storage;
pub mod store;

#[cfg(test)]
mod tests {
    use crate::error::StoreError;
    use crate::model::{Priority, Task};

    #[test]
    fn task_has_required_fields() {
        let task = Task {
            id: 1,
            text: "demo".to_string(),
            completed: false,
            created_at: "2026-08-25T00:00:00Z".to_string(),
            priority: Priority::Medium,
        };

        assert_eq!(task.id, 1);
        assert_eq!(task.text, "demo");
        assert!(!task.completed);
        assert_eq!(task.created_at, "2026-08-25T00:00:00Z");
        assert_eq!(task.priority, Priority::Medium);
    }

    #[test]
    fn store_error_exposes_code() {
        let err = StoreError::EmptyText;
        assert_eq!(err.code(), "empty_text");
        assert_eq!(err.to_string(), "empty_text - text must not be empty");
    }
}
