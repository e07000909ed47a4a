//! Function-call dispatch against the task backend.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use task_client::{ClientError, TaskBackend, TaskFilter};
use task_core::{Task, TaskCreate, TaskPriority, TaskUpdate};

use crate::api_types::FunctionCall;

/// Outcome of an executed function, sent back to the model as the content
/// of a "function" turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskActionResult {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<Task>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<Task>>,
}

impl TaskActionResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            task: None,
            tasks: None,
        }
    }

    pub fn ok_with_task(message: impl Into<String>, task: Task) -> Self {
        Self {
            task: Some(task),
            ..Self::ok(message)
        }
    }

    pub fn ok_with_tasks(message: impl Into<String>, tasks: Vec<Task>) -> Self {
        Self {
            tasks: Some(tasks),
            ..Self::ok(message)
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            task: None,
            tasks: None,
        }
    }
}

/// Task id as the model sends it; tolerates numeric ids.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum TaskId {
    Text(String),
    Number(i64),
}

impl TaskId {
    fn into_string(self) -> String {
        match self {
            TaskId::Text(s) => s,
            TaskId::Number(n) => n.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct AddTaskArgs {
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    priority: Option<String>,
    #[serde(default)]
    due_date: Option<String>,
}

#[derive(Deserialize)]
struct ListTasksArgs {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    priority: Option<String>,
}

#[derive(Deserialize)]
struct UpdateTaskArgs {
    task_id: TaskId,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    completed: Option<bool>,
    #[serde(default)]
    priority: Option<String>,
    #[serde(default)]
    due_date: Option<String>,
}

#[derive(Deserialize)]
struct TaskIdArgs {
    task_id: TaskId,
}

/// Dispatches a model-selected function call to the task backend.
///
/// Bound to one user and one bearer token (via the backend's session
/// store), for the duration of a single chat request. Backend and network
/// failures are swallowed into a failed [`TaskActionResult`], never
/// propagated; the conversation continues with a failure explanation.
pub struct TaskAgent {
    backend: Arc<dyn TaskBackend>,
    user_id: String,
}

impl TaskAgent {
    pub fn new(backend: Arc<dyn TaskBackend>, user_id: impl Into<String>) -> Self {
        Self {
            backend,
            user_id: user_id.into(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Execute the selected function and package the outcome.
    pub async fn dispatch(&self, call: &FunctionCall) -> TaskActionResult {
        info!(function = %call.name, user_id = %self.user_id, "Dispatching function call");

        match call.name.as_str() {
            "add_task" => match parse_args::<AddTaskArgs>(call) {
                Ok(args) => self.add_task(args).await,
                Err(failure) => failure,
            },
            "list_tasks" => match parse_args::<ListTasksArgs>(call) {
                Ok(args) => self.list_tasks(args).await,
                Err(failure) => failure,
            },
            "update_task" => match parse_args::<UpdateTaskArgs>(call) {
                Ok(args) => self.update_task(args).await,
                Err(failure) => failure,
            },
            "delete_task" => match parse_args::<TaskIdArgs>(call) {
                Ok(args) => self.delete_task(args.task_id.into_string()).await,
                Err(failure) => failure,
            },
            "complete_task" => match parse_args::<TaskIdArgs>(call) {
                Ok(args) => self.complete_task(args.task_id.into_string()).await,
                Err(failure) => failure,
            },
            other => {
                warn!(function = other, "Unknown function requested");
                TaskActionResult::fail(format!("Unknown function: {}", other))
            }
        }
    }

    async fn add_task(&self, args: AddTaskArgs) -> TaskActionResult {
        let title = args.title.clone();
        let payload = TaskCreate {
            title: args.title,
            description: args.description.filter(|s| !s.is_empty()),
            priority: args
                .priority
                .as_deref()
                .and_then(TaskPriority::parse)
                .unwrap_or_default(),
            tags: None,
            due_date: args.due_date.as_deref().and_then(parse_due_date),
            notification_time_before: None,
        };

        match self.backend.create_task(&self.user_id, &payload).await {
            Ok(task) => TaskActionResult::ok_with_task(
                format!("Task \"{}\" has been added successfully!", title),
                task,
            ),
            Err(err) => TaskActionResult::fail(describe(&err, "Failed to add task")),
        }
    }

    async fn list_tasks(&self, args: ListTasksArgs) -> TaskActionResult {
        // "all" means no filter at the REST level.
        let filter = TaskFilter {
            status: args.status.filter(|s| s != "all"),
            priority: args.priority.filter(|p| p != "all"),
        };

        match self.backend.list_tasks(&self.user_id, &filter).await {
            Ok(tasks) if tasks.is_empty() => {
                TaskActionResult::ok("You don't have any tasks at the moment.")
            }
            Ok(tasks) => {
                let mut message = format!("You have {} task(s):\n", tasks.len());
                for task in &tasks {
                    let status = if task.completed { "completed" } else { "pending" };
                    message.push_str(&format!(
                        "- [{}] {} (ID: {})\n",
                        status, task.title, task.id
                    ));
                }
                TaskActionResult::ok_with_tasks(message, tasks)
            }
            Err(err) => TaskActionResult::fail(describe(&err, "Failed to list tasks")),
        }
    }

    async fn update_task(&self, args: UpdateTaskArgs) -> TaskActionResult {
        let task_id = args.task_id.into_string();
        // Only the provided fields go into the update payload.
        let payload = TaskUpdate {
            title: args.title,
            description: args.description,
            completed: args.completed,
            priority: args.priority.as_deref().and_then(TaskPriority::parse),
            tags: None,
            due_date: args.due_date.as_deref().and_then(parse_due_date),
            notification_time_before: None,
        };

        self.apply_update(&task_id, &payload).await
    }

    async fn delete_task(&self, task_id: String) -> TaskActionResult {
        // Fetch the title first for a friendlier confirmation; tolerate
        // failure by falling back to a generic label.
        let title = match self.backend.get_task(&self.user_id, &task_id).await {
            Ok(task) => task.title,
            Err(err) => {
                warn!(task_id = %task_id, error = %err, "Pre-delete fetch failed, using fallback label");
                format!("Task {}", task_id)
            }
        };

        match self.backend.delete_task(&self.user_id, &task_id).await {
            Ok(()) => TaskActionResult::ok(format!(
                "Task \"{}\" has been deleted successfully!",
                title
            )),
            Err(err) => TaskActionResult::fail(describe(&err, "Failed to delete task")),
        }
    }

    async fn complete_task(&self, task_id: String) -> TaskActionResult {
        self.apply_update(&task_id, &TaskUpdate::completed(true)).await
    }

    async fn apply_update(&self, task_id: &str, payload: &TaskUpdate) -> TaskActionResult {
        match self.backend.update_task(&self.user_id, task_id, payload).await {
            Ok(task) => TaskActionResult::ok_with_task(
                format!("Task \"{}\" has been updated successfully!", task.title),
                task,
            ),
            Err(err) => TaskActionResult::fail(describe(&err, "Failed to update task")),
        }
    }
}

fn parse_args<T: for<'de> Deserialize<'de>>(
    call: &FunctionCall,
) -> Result<T, TaskActionResult> {
    serde_json::from_str(&call.arguments).map_err(|err| {
        warn!(function = %call.name, error = %err, "Invalid function arguments");
        TaskActionResult::fail(format!("Invalid arguments for {}: {}", call.name, err))
    })
}

fn describe(err: &ClientError, prefix: &str) -> String {
    format!("{}: {}", prefix, err.detail())
}

/// Parse a model-provided due date: RFC 3339 or bare `YYYY-MM-DD`
/// (interpreted as midnight UTC). Anything else is dropped.
fn parse_due_date(value: &str) -> Option<DateTime<Utc>> {
    if value.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
