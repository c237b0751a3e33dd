use chrono::NaiveDate;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::calendar::FarmTask;

/// Farm calendar tasks. Kept sorted by date, oldest first.
pub struct CalendarService;

impl CalendarService {
    pub fn new() -> Self {
        Self
    }

    pub fn add_task(&self, tasks: &mut Vec<FarmTask>, task: FarmTask) -> Result<Uuid, CoreError> {
        if task.title.trim().is_empty() {
            return Err(CoreError::invalid_field("title", "is required"));
        }
        let id = task.id;
        // Same-day tasks keep insertion order
        let pos = tasks.partition_point(|t| t.date <= task.date);
        tasks.insert(pos, task);
        Ok(id)
    }

    pub fn remove_task(&self, tasks: &mut Vec<FarmTask>, id: Uuid) -> Result<FarmTask, CoreError> {
        let idx = tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| CoreError::not_found("Task", id))?;
        Ok(tasks.remove(idx))
    }

    pub fn set_completed(&self, tasks: &mut [FarmTask], id: Uuid, completed: bool) -> Result<(), CoreError> {
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| CoreError::not_found("Task", id))?;
        task.completed = completed;
        Ok(())
    }

    /// Tasks dated within `from..=to`, oldest first.
    pub fn tasks_in_range<'a>(
        &self,
        tasks: &'a [FarmTask],
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<&'a FarmTask>, CoreError> {
        if from > to {
            return Err(CoreError::ValidationError(format!(
                "'from' date ({from}) must not be after 'to' date ({to})"
            )));
        }
        Ok(tasks.iter().filter(|t| t.date >= from && t.date <= to).collect())
    }

    /// Incomplete tasks on or after `from`, at most `limit`.
    pub fn upcoming<'a>(&self, tasks: &'a [FarmTask], from: NaiveDate, limit: usize) -> Vec<&'a FarmTask> {
        tasks
            .iter()
            .filter(|t| !t.completed && t.date >= from)
            .take(limit)
            .collect()
    }
}

impl Default for CalendarService {
    fn default() -> Self {
        Self::new()
    }
}
