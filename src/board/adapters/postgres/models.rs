//! Diesel row models for board persistence.

use super::schema::{board_lists, boards, cards};
use diesel::prelude::*;

/// Board header row.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = boards)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BoardRow {
    /// Board identifier.
    pub id: uuid::Uuid,
    /// Owning team.
    pub team_id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Background descriptor.
    pub background: String,
}

/// List row.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = board_lists)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ListRow {
    /// List identifier.
    pub id: uuid::Uuid,
    /// Owning board.
    pub board_id: uuid::Uuid,
    /// List title.
    pub title: String,
    /// Position within the board.
    pub position: i32,
}

/// Card row.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = cards)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CardRow {
    /// Card identifier.
    pub id: uuid::Uuid,
    /// Owning list.
    pub list_id: uuid::Uuid,
    /// Card title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Position within the list.
    pub position: i32,
}

/// Partial card update; `None` columns are skipped.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = cards)]
pub struct CardChangeset {
    /// New title.
    pub title: Option<String>,
    /// New description; `Some(None)` clears it.
    pub description: Option<Option<String>>,
}
