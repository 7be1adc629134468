//! Tool catalog — typed metadata and JSON Schema generation.
//!
//! The catalog is built once at startup and never mutated. Entry order is
//! fixed, so `tools/list` is byte-identical across calls.

use serde_json::{json, Map, Value};

// =============================================================================
// Tool names
// =============================================================================

/// Every tool the server exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    GetBookshelves,
    GetBookshelfBooks,
    AddBookshelf,
    RenameBookshelf,
    AddBook,
    MoveBook,
    RemoveBook,
    ChangeBookCover,
    GetReadingGoals,
    GetGoalProgress,
    UpdateReadingGoal,
}

impl ToolName {
    /// All tools, in catalog order.
    pub const ALL: [ToolName; 11] = [
        ToolName::GetBookshelves,
        ToolName::GetBookshelfBooks,
        ToolName::AddBookshelf,
        ToolName::RenameBookshelf,
        ToolName::AddBook,
        ToolName::MoveBook,
        ToolName::RemoveBook,
        ToolName::ChangeBookCover,
        ToolName::GetReadingGoals,
        ToolName::GetGoalProgress,
        ToolName::UpdateReadingGoal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ToolName::GetBookshelves => "get_bookshelves",
            ToolName::GetBookshelfBooks => "get_bookshelf_books",
            ToolName::AddBookshelf => "add_bookshelf",
            ToolName::RenameBookshelf => "rename_bookshelf",
            ToolName::AddBook => "add_book",
            ToolName::MoveBook => "move_book",
            ToolName::RemoveBook => "remove_book",
            ToolName::ChangeBookCover => "change_book_cover",
            ToolName::GetReadingGoals => "get_reading_goals",
            ToolName::GetGoalProgress => "get_goal_progress",
            ToolName::UpdateReadingGoal => "update_reading_goal",
        }
    }

    /// Look up a tool by its wire name.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.as_str() == name)
    }
}

impl std::fmt::Display for ToolName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Parameter definition
// =============================================================================

/// Parameter type for tool inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    /// Whole number with an inclusive lower bound.
    Integer { minimum: u64 },
    /// Text, trimmed before use.
    String,
}

impl ParamType {
    /// Human-readable type name for error messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            ParamType::Integer { minimum: 0 } => "non-negative integer",
            ParamType::Integer { .. } => "positive integer",
            ParamType::String => "non-empty string",
        }
    }
}

/// A single parameter definition for a tool.
#[derive(Debug, Clone)]
pub struct ParamDef {
    pub name: &'static str,
    pub param_type: ParamType,
    pub description: &'static str,
    pub required: bool,
}

impl ParamDef {
    fn required(name: &'static str, param_type: ParamType, description: &'static str) -> Self {
        Self {
            name,
            param_type,
            description,
            required: true,
        }
    }

    fn optional(name: &'static str, param_type: ParamType, description: &'static str) -> Self {
        Self {
            name,
            param_type,
            description,
            required: false,
        }
    }

    fn schema(&self) -> Value {
        match self.param_type {
            ParamType::Integer { minimum } => json!({
                "type": "integer",
                "description": self.description,
                "minimum": minimum,
            }),
            ParamType::String if self.required => json!({
                "type": "string",
                "description": self.description,
                "minLength": 1,
                "pattern": "\\S",
            }),
            ParamType::String => json!({
                "type": "string",
                "description": self.description,
            }),
        }
    }
}

const POSITIVE: ParamType = ParamType::Integer { minimum: 1 };
const NON_NEGATIVE: ParamType = ParamType::Integer { minimum: 0 };

// =============================================================================
// Tool definition
// =============================================================================

/// Complete tool metadata entry.
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    pub name: ToolName,
    pub description: &'static str,
    pub parameters: Vec<ParamDef>,
}

impl ToolDefinition {
    /// JSON Schema for the tool's arguments, parameters in declaration order.
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for param in &self.parameters {
            properties.insert(param.name.to_string(), param.schema());
            if param.required {
                required.push(Value::String(param.name.to_string()));
            }
        }

        let mut schema = Map::new();
        schema.insert("type".to_string(), json!("object"));
        schema.insert("properties".to_string(), Value::Object(properties));
        if !required.is_empty() {
            schema.insert("required".to_string(), Value::Array(required));
        }
        Value::Object(schema)
    }

    /// Entry shape used by `tools/list`.
    pub fn to_value(&self) -> Value {
        json!({
            "name": self.name.as_str(),
            "description": self.description,
            "inputSchema": self.input_schema(),
        })
    }
}

// =============================================================================
// Tool catalog
// =============================================================================

/// Immutable, ordered tool registry.
#[derive(Debug, Clone)]
pub struct ToolCatalog {
    entries: Vec<ToolDefinition>,
}

impl ToolCatalog {
    /// Catalog of all Micro.blog Books tools.
    pub fn new() -> Self {
        let entries = ToolName::ALL.into_iter().map(definition_for).collect();
        Self { entries }
    }

    /// Get a tool definition by wire name.
    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.entries.iter().find(|entry| entry.name.as_str() == name)
    }

    /// All tool definitions, in catalog order.
    pub fn list(&self) -> &[ToolDefinition] {
        &self.entries
    }

    /// `tools/list` result payload.
    pub fn list_payload(&self) -> Value {
        let tools: Vec<Value> = self.entries.iter().map(ToolDefinition::to_value).collect();
        json!({ "tools": tools })
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ToolCatalog {
    fn default() -> Self {
        Self::new()
    }
}

fn definition_for(name: ToolName) -> ToolDefinition {
    let (description, parameters) = match name {
        ToolName::GetBookshelves => ("Get all bookshelves from Micro.blog", vec![]),
        ToolName::GetBookshelfBooks => (
            "Get books in a specific bookshelf",
            vec![ParamDef::required(
                "bookshelf_id",
                POSITIVE,
                "The ID of the bookshelf to get books from",
            )],
        ),
        ToolName::AddBookshelf => (
            "Create a new bookshelf",
            vec![ParamDef::required(
                "name",
                ParamType::String,
                "The name of the new bookshelf",
            )],
        ),
        ToolName::RenameBookshelf => (
            "Rename an existing bookshelf",
            vec![
                ParamDef::required("bookshelf_id", POSITIVE, "The ID of the bookshelf to rename"),
                ParamDef::required("name", ParamType::String, "The new name for the bookshelf"),
            ],
        ),
        ToolName::AddBook => (
            "Add a new book to a bookshelf",
            vec![
                ParamDef::required("title", ParamType::String, "The title of the book"),
                ParamDef::required("author", ParamType::String, "The author of the book"),
                ParamDef::required(
                    "bookshelf_id",
                    POSITIVE,
                    "The ID of the bookshelf to add the book to",
                ),
                ParamDef::optional("isbn", ParamType::String, "The ISBN of the book (optional)"),
                ParamDef::optional(
                    "cover_url",
                    ParamType::String,
                    "URL to the book cover image (optional)",
                ),
            ],
        ),
        ToolName::MoveBook => (
            "Move a book to a different bookshelf",
            vec![
                ParamDef::required("book_id", POSITIVE, "The ID of the book to move"),
                ParamDef::required("bookshelf_id", POSITIVE, "The ID of the target bookshelf"),
            ],
        ),
        ToolName::RemoveBook => (
            "Remove a book from a bookshelf",
            vec![
                ParamDef::required("bookshelf_id", POSITIVE, "The ID of the bookshelf"),
                ParamDef::required("book_id", POSITIVE, "The ID of the book to remove"),
            ],
        ),
        ToolName::ChangeBookCover => (
            "Change the cover image for a book",
            vec![
                ParamDef::required("bookshelf_id", POSITIVE, "The ID of the bookshelf"),
                ParamDef::required("book_id", POSITIVE, "The ID of the book"),
                ParamDef::required("cover_url", ParamType::String, "URL to the new cover image"),
            ],
        ),
        ToolName::GetReadingGoals => ("Get all reading goals", vec![]),
        ToolName::GetGoalProgress => (
            "Get progress toward a specific reading goal",
            vec![ParamDef::required("goal_id", POSITIVE, "The ID of the reading goal")],
        ),
        ToolName::UpdateReadingGoal => (
            "Update a reading goal's target or progress",
            vec![
                ParamDef::required("goal_id", POSITIVE, "The ID of the reading goal"),
                ParamDef::required(
                    "value",
                    POSITIVE,
                    "The target number of books for the goal",
                ),
                ParamDef::optional(
                    "progress",
                    NON_NEGATIVE,
                    "The current progress (number of books read, optional)",
                ),
            ],
        ),
    };

    ToolDefinition {
        name,
        description,
        parameters,
    }
}

// =============================================================================
// Tests
// =============================================================================
