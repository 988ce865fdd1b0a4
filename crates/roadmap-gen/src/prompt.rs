//! Instructions and response schema sent to the model

use serde_json::{json, Value};

/// System instruction for the planner role
#[must_use]
pub fn system_instruction(language: &str) -> String {
    format!(
        "Role: you are a senior technical project manager.\n\
         Goal: turn the user's abstract idea into a detailed, professional action plan.\n\
         \n\
         Principles:\n\
         1. Decomposition: break every task into 3-6 concrete subtasks. Subtasks are \
         atomic actions such as \"Download the installer\", \"Run the script\", \
         \"Check the logs\".\n\
         2. Structure: group tasks into logical stages. Priorities follow the critical path.\n\
         3. Reasoning: briefly explain why each task matters right now.\n\
         \n\
         Response format: JSON.\n\
         - Language: {language}.\n\
         - Follow the schema strictly.\n"
    )
}

/// JSON schema the model's answer must follow
#[must_use]
pub fn response_schema() -> Value {
    let subtask = json!({
        "type": "OBJECT",
        "properties": {
            "id": { "type": "STRING" },
            "title": { "type": "STRING" },
            "status": { "type": "STRING", "enum": ["Todo", "Done"] }
        },
        "required": ["title", "status"]
    });

    let task = json!({
        "type": "OBJECT",
        "properties": {
            "id": { "type": "INTEGER" },
            "title": { "type": "STRING" },
            "description": { "type": "STRING" },
            "reasoning": { "type": "STRING" },
            "priority": { "type": "STRING", "enum": ["High", "Medium", "Low"] },
            "status": { "type": "STRING", "enum": ["Todo", "In Progress", "Done"] },
            "tags": { "type": "ARRAY", "items": { "type": "STRING" } },
            "subtasks": { "type": "ARRAY", "items": subtask }
        },
        "required": [
            "id", "title", "description", "reasoning",
            "priority", "status", "tags", "subtasks"
        ]
    });

    json!({
        "type": "OBJECT",
        "properties": {
            "project_summary": {
                "type": "STRING",
                "description": "Short professional summary of the plan"
            },
            "stages": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "stage_name": { "type": "STRING" },
                        "tasks": { "type": "ARRAY", "items": task }
                    },
                    "required": ["stage_name", "tasks"]
                }
            }
        },
        "required": ["project_summary", "stages"]
    })
}
