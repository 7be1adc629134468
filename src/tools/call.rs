//! Typed tool invocations.
//!
//! A [`ToolCall`] is what the dispatch router hands to the remote client:
//! every identifier is a validated newtype and every optional field is
//! `None` unless it carried non-blank content.

use crate::tools::catalog::ToolName;
use crate::tools::validation::ValidatedArgs;
use crate::types::{BookId, BookshelfId, Error, GoalId, GoalProgress, GoalTarget, Result};

/// Fields for `add_book`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub bookshelf_id: BookshelfId,
    pub isbn: Option<String>,
    pub cover_url: Option<String>,
}

/// Fields for `update_reading_goal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalUpdate {
    pub goal_id: GoalId,
    pub value: GoalTarget,
    pub progress: Option<GoalProgress>,
}

/// One fully-typed tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCall {
    GetBookshelves,
    GetBookshelfBooks {
        bookshelf_id: BookshelfId,
    },
    AddBookshelf {
        name: String,
    },
    RenameBookshelf {
        bookshelf_id: BookshelfId,
        name: String,
    },
    AddBook(NewBook),
    MoveBook {
        book_id: BookId,
        bookshelf_id: BookshelfId,
    },
    RemoveBook {
        bookshelf_id: BookshelfId,
        book_id: BookId,
    },
    ChangeBookCover {
        bookshelf_id: BookshelfId,
        book_id: BookId,
        cover_url: String,
    },
    GetReadingGoals,
    GetGoalProgress {
        goal_id: GoalId,
    },
    UpdateReadingGoal(GoalUpdate),
}

impl ToolCall {
    /// Build a typed call from validated arguments.
    pub fn from_args(args: &ValidatedArgs) -> Result<Self> {
        let call = match args.tool() {
            ToolName::GetBookshelves => ToolCall::GetBookshelves,
            ToolName::GetBookshelfBooks => ToolCall::GetBookshelfBooks {
                bookshelf_id: typed(args, "bookshelf_id", BookshelfId::new)?,
            },
            ToolName::AddBookshelf => ToolCall::AddBookshelf {
                name: args.text("name")?.to_string(),
            },
            ToolName::RenameBookshelf => ToolCall::RenameBookshelf {
                bookshelf_id: typed(args, "bookshelf_id", BookshelfId::new)?,
                name: args.text("name")?.to_string(),
            },
            ToolName::AddBook => ToolCall::AddBook(NewBook {
                title: args.text("title")?.to_string(),
                author: args.text("author")?.to_string(),
                bookshelf_id: typed(args, "bookshelf_id", BookshelfId::new)?,
                isbn: args.optional_text("isbn").map(str::to_string),
                cover_url: args.optional_text("cover_url").map(str::to_string),
            }),
            ToolName::MoveBook => ToolCall::MoveBook {
                book_id: typed(args, "book_id", BookId::new)?,
                bookshelf_id: typed(args, "bookshelf_id", BookshelfId::new)?,
            },
            ToolName::RemoveBook => ToolCall::RemoveBook {
                bookshelf_id: typed(args, "bookshelf_id", BookshelfId::new)?,
                book_id: typed(args, "book_id", BookId::new)?,
            },
            ToolName::ChangeBookCover => ToolCall::ChangeBookCover {
                bookshelf_id: typed(args, "bookshelf_id", BookshelfId::new)?,
                book_id: typed(args, "book_id", BookId::new)?,
                cover_url: args.text("cover_url")?.to_string(),
            },
            ToolName::GetReadingGoals => ToolCall::GetReadingGoals,
            ToolName::GetGoalProgress => ToolCall::GetGoalProgress {
                goal_id: typed(args, "goal_id", GoalId::new)?,
            },
            ToolName::UpdateReadingGoal => ToolCall::UpdateReadingGoal(GoalUpdate {
                goal_id: typed(args, "goal_id", GoalId::new)?,
                value: typed(args, "value", GoalTarget::new)?,
                progress: args
                    .optional_integer("progress")
                    .map(GoalProgress::new)
                    .transpose()
                    .map_err(Error::validation)?,
            }),
        };
        Ok(call)
    }

    pub fn tool(&self) -> ToolName {
        match self {
            ToolCall::GetBookshelves => ToolName::GetBookshelves,
            ToolCall::GetBookshelfBooks { .. } => ToolName::GetBookshelfBooks,
            ToolCall::AddBookshelf { .. } => ToolName::AddBookshelf,
            ToolCall::RenameBookshelf { .. } => ToolName::RenameBookshelf,
            ToolCall::AddBook(_) => ToolName::AddBook,
            ToolCall::MoveBook { .. } => ToolName::MoveBook,
            ToolCall::RemoveBook { .. } => ToolName::RemoveBook,
            ToolCall::ChangeBookCover { .. } => ToolName::ChangeBookCover,
            ToolCall::GetReadingGoals => ToolName::GetReadingGoals,
            ToolCall::GetGoalProgress { .. } => ToolName::GetGoalProgress,
            ToolCall::UpdateReadingGoal(_) => ToolName::UpdateReadingGoal,
        }
    }
}

fn typed<T>(
    args: &ValidatedArgs,
    name: &str,
    ctor: impl FnOnce(u64) -> std::result::Result<T, &'static str>,
) -> Result<T> {
    ctor(args.integer(name)?).map_err(Error::validation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::catalog::ToolCatalog;
    use crate::tools::validation::validate_arguments;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn call(tool: &str, args: Value) -> ToolCall {
        let catalog = ToolCatalog::new();
        let validated = validate_arguments(catalog.get(tool).unwrap(), args.as_object().unwrap()).unwrap();
        ToolCall::from_args(&validated).unwrap()
    }

    #[test]
    fn test_add_book_call() {
        let built = call(
            "add_book",
            json!({"title": "Dune", "author": "Herbert", "bookshelf_id": 3, "cover_url": " https://x/c.jpg "}),
        );
        assert_eq!(
            built,
            ToolCall::AddBook(NewBook {
                title: "Dune".to_string(),
                author: "Herbert".to_string(),
                bookshelf_id: BookshelfId::new(3).unwrap(),
                isbn: None,
                cover_url: Some("https://x/c.jpg".to_string()),
            })
        );
        assert_eq!(built.tool(), ToolName::AddBook);
    }

    #[test]
    fn test_update_goal_without_progress() {
        let built = call("update_reading_goal", json!({"goal_id": 4, "value": 20}));
        let ToolCall::UpdateReadingGoal(update) = built else {
            panic!("wrong variant");
        };
        assert_eq!(update.goal_id.get(), 4);
        assert_eq!(update.value.get(), 20);
        assert_eq!(update.progress, None);
    }

    #[test]
    fn test_every_tool_maps_to_its_own_variant() {
        let catalog = ToolCatalog::new();
        let args = json!({
            "bookshelf_id": 1, "book_id": 2, "goal_id": 3, "value": 4,
            "name": "n", "title": "t", "author": "a", "cover_url": "c",
        });
        for definition in catalog.list() {
            let validated = validate_arguments(definition, args.as_object().unwrap()).unwrap();
            let built = ToolCall::from_args(&validated).unwrap();
            assert_eq!(built.tool(), definition.name);
        }
    }
}
