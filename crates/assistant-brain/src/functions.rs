//! Declared functions the model may call.
//!
//! The parameter documents are JSON Schema; the model picks a function and
//! returns a JSON arguments string which [`crate::TaskAgent`] dispatches.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A declared function definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDefinition {
    /// Name of the function.
    pub name: String,
    /// Description of what the function does.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON Schema for the function parameters.
    pub parameters: Value,
}

impl FunctionDefinition {
    fn new(name: &str, description: &str, parameters: Value) -> Self {
        Self {
            name: name.to_string(),
            description: Some(description.to_string()),
            parameters,
        }
    }

    /// `add_task` - create a new task.
    pub fn add_task() -> Self {
        Self::new(
            "add_task",
            "Add a new task with title, description, priority, and due date",
            serde_json::json!({
                "type": "object",
                "properties": {
                    "title": { "type": "string", "description": "The title of the task" },
                    "description": { "type": "string", "description": "The description of the task" },
                    "priority": {
                        "type": "string",
                        "description": "Priority of the task (high, medium, low)",
                        "default": "medium"
                    },
                    "due_date": {
                        "type": "string",
                        "description": "Due date for the task in YYYY-MM-DD format",
                        "default": ""
                    }
                },
                "required": ["title"]
            }),
        )
    }

    /// `list_tasks` - list tasks with optional filters.
    pub fn list_tasks() -> Self {
        Self::new(
            "list_tasks",
            "List all tasks with optional filtering by status and priority",
            serde_json::json!({
                "type": "object",
                "properties": {
                    "status": {
                        "type": "string",
                        "description": "Filter by status (all, completed, pending)",
                        "default": "all"
                    },
                    "priority": {
                        "type": "string",
                        "description": "Filter by priority (all, high, medium, low)",
                        "default": "all"
                    }
                }
            }),
        )
    }

    /// `update_task` - update an existing task by ID.
    pub fn update_task() -> Self {
        Self::new(
            "update_task",
            "Update an existing task by ID",
            serde_json::json!({
                "type": "object",
                "properties": {
                    "task_id": { "type": "string", "description": "The ID of the task to update" },
                    "title": { "type": "string", "description": "New title for the task" },
                    "description": { "type": "string", "description": "New description for the task" },
                    "completed": { "type": "boolean", "description": "Whether the task is completed" },
                    "priority": { "type": "string", "description": "New priority for the task (high, medium, low)" },
                    "due_date": { "type": "string", "description": "New due date for the task in YYYY-MM-DD format" }
                },
                "required": ["task_id"]
            }),
        )
    }

    /// `delete_task` - delete a task by ID.
    pub fn delete_task() -> Self {
        Self::new(
            "delete_task",
            "Delete a task by ID",
            serde_json::json!({
                "type": "object",
                "properties": {
                    "task_id": { "type": "string", "description": "The ID of the task to delete" }
                },
                "required": ["task_id"]
            }),
        )
    }

    /// `complete_task` - mark a task as completed by ID.
    pub fn complete_task() -> Self {
        Self::new(
            "complete_task",
            "Mark a task as completed by ID",
            serde_json::json!({
                "type": "object",
                "properties": {
                    "task_id": { "type": "string", "description": "The ID of the task to mark as completed" }
                },
                "required": ["task_id"]
            }),
        )
    }
}

/// The full set declared on every first-pass completion request.
pub fn task_functions() -> Vec<FunctionDefinition> {
    vec![
        FunctionDefinition::add_task(),
        FunctionDefinition::list_tasks(),
        FunctionDefinition::update_task(),
        FunctionDefinition::delete_task(),
        FunctionDefinition::complete_task(),
    ]
}
