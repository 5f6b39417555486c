//! `PostgreSQL` remote store implementation.

use super::{
    models::{BoardRow, CardChangeset, CardRow, ListRow},
    schema::{board_lists, boards, cards},
};
use crate::board::{
    domain::{
        Background, BoardId, BoardSnapshot, BoardSummary, CardId, CardRecord, ListId, ListRecord,
        TeamId, Title,
    },
    ports::{CardPatch, RemoteBoardStore, RemoteStoreError, RemoteStoreResult},
};
use async_trait::async_trait;
use diesel::dsl::max;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::Error as DieselError;

/// `PostgreSQL` connection pool type used by board adapters.
pub type BoardPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed remote board store.
#[derive(Debug, Clone)]
pub struct PostgresRemoteStore {
    pool: BoardPgPool,
}

impl PostgresRemoteStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: BoardPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> RemoteStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> RemoteStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(RemoteStoreError::unavailable)?;
            f(&mut connection)
        })
        .await
        .map_err(RemoteStoreError::unavailable)?
    }

    /// Inserts a board header. Boards are created outside the engine; this
    /// exists for provisioning and tests.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteStoreError::Unavailable`] when the insert fails.
    pub async fn create_board(&self, summary: &BoardSummary) -> RemoteStoreResult<()> {
        let row = BoardRow {
            id: summary.id.into_inner(),
            team_id: summary.team_id.into_inner(),
            name: summary.name.as_str().to_owned(),
            background: summary.background.as_str().to_owned(),
        };
        self.run_blocking(move |connection| {
            diesel::insert_into(boards::table)
                .values(&row)
                .execute(connection)
                .map(|_| ())
                .map_err(RemoteStoreError::unavailable)
        })
        .await
    }
}

#[async_trait]
impl RemoteBoardStore for PostgresRemoteStore {
    async fn fetch_board(&self, board_id: BoardId) -> RemoteStoreResult<BoardSnapshot> {
        let rows = self
            .run_blocking(move |connection| {
                connection
                    .transaction(|tx| load_board_rows(tx, board_id.into_inner()))
                    .map_err(RemoteStoreError::unavailable)
            })
            .await?;
        let (board, lists, card_rows) = rows.ok_or(RemoteStoreError::BoardNotFound(board_id))?;
        snapshot_from_rows(board, lists, card_rows)
    }

    async fn create_list(&self, board_id: BoardId, title: &Title) -> RemoteStoreResult<ListRecord> {
        let list_title = title.clone();
        let inserted = self
            .run_blocking(move |connection| {
                connection
                    .transaction(|tx| insert_list(tx, board_id.into_inner(), &list_title))
                    .map_err(RemoteStoreError::unavailable)
            })
            .await?;
        let row = inserted.ok_or(RemoteStoreError::BoardNotFound(board_id))?;
        list_record(row)
    }

    async fn rename_list(&self, list_id: ListId, title: &Title) -> RemoteStoreResult<()> {
        let new_title = title.as_str().to_owned();
        let updated = self
            .run_blocking(move |connection| {
                diesel::update(board_lists::table.find(list_id.into_inner()))
                    .set(board_lists::title.eq(new_title))
                    .execute(connection)
                    .map_err(RemoteStoreError::unavailable)
            })
            .await?;
        require_row(updated, RemoteStoreError::ListNotFound(list_id))
    }

    async fn delete_list(&self, list_id: ListId) -> RemoteStoreResult<()> {
        let deleted = self
            .run_blocking(move |connection| {
                diesel::delete(board_lists::table.find(list_id.into_inner()))
                    .execute(connection)
                    .map_err(RemoteStoreError::unavailable)
            })
            .await?;
        require_row(deleted, RemoteStoreError::ListNotFound(list_id))
    }

    async fn create_card(&self, list_id: ListId, title: &Title) -> RemoteStoreResult<CardRecord> {
        let card_title = title.clone();
        let inserted = self
            .run_blocking(move |connection| {
                connection
                    .transaction(|tx| insert_card(tx, list_id.into_inner(), &card_title))
                    .map_err(RemoteStoreError::unavailable)
            })
            .await?;
        let row = inserted.ok_or(RemoteStoreError::ListNotFound(list_id))?;
        card_record(row)
    }

    async fn update_card(&self, card_id: CardId, patch: &CardPatch) -> RemoteStoreResult<()> {
        let changeset = CardChangeset {
            title: patch.title.as_ref().map(|title| title.as_str().to_owned()),
            description: patch
                .description
                .clone()
                .map(|text| Some(text).filter(|value| !value.trim().is_empty())),
        };
        let is_empty = patch.is_empty();
        let touched = self
            .run_blocking(move |connection| {
                let target = cards::table.find(card_id.into_inner());
                let result = if is_empty {
                    diesel::select(diesel::dsl::exists(target))
                        .get_result::<bool>(connection)
                        .map(usize::from)
                } else {
                    diesel::update(target).set(&changeset).execute(connection)
                };
                result.map_err(RemoteStoreError::unavailable)
            })
            .await?;
        require_row(touched, RemoteStoreError::CardNotFound(card_id))
    }

    async fn delete_card(&self, card_id: CardId) -> RemoteStoreResult<()> {
        let deleted = self
            .run_blocking(move |connection| {
                diesel::delete(cards::table.find(card_id.into_inner()))
                    .execute(connection)
                    .map_err(RemoteStoreError::unavailable)
            })
            .await?;
        require_row(deleted, RemoteStoreError::CardNotFound(card_id))
    }

    async fn move_card(&self, card_id: CardId, destination: ListId) -> RemoteStoreResult<()> {
        let outcome = self
            .run_blocking(move |connection| {
                connection
                    .transaction(|tx| {
                        relocate_card(tx, card_id.into_inner(), destination.into_inner())
                    })
                    .map_err(RemoteStoreError::unavailable)
            })
            .await?;
        match outcome {
            MoveOutcome::Moved => Ok(()),
            MoveOutcome::MissingList => Err(RemoteStoreError::ListNotFound(destination)),
            MoveOutcome::MissingCard => Err(RemoteStoreError::CardNotFound(card_id)),
        }
    }
}

enum MoveOutcome {
    Moved,
    MissingList,
    MissingCard,
}

type BoardRows = (BoardRow, Vec<ListRow>, Vec<CardRow>);

fn load_board_rows(
    connection: &mut PgConnection,
    board_id: uuid::Uuid,
) -> Result<Option<BoardRows>, DieselError> {
    let Some(board) = boards::table
        .find(board_id)
        .select(BoardRow::as_select())
        .first::<BoardRow>(connection)
        .optional()?
    else {
        return Ok(None);
    };
    let lists = board_lists::table
        .filter(board_lists::board_id.eq(board_id))
        .order((board_lists::position.asc(), board_lists::id.asc()))
        .select(ListRow::as_select())
        .load::<ListRow>(connection)?;
    let card_rows = cards::table
        .inner_join(board_lists::table)
        .filter(board_lists::board_id.eq(board_id))
        .order((
            board_lists::position.asc(),
            board_lists::id.asc(),
            cards::position.asc(),
            cards::id.asc(),
        ))
        .select(CardRow::as_select())
        .load::<CardRow>(connection)?;
    Ok(Some((board, lists, card_rows)))
}

fn insert_list(
    connection: &mut PgConnection,
    board_id: uuid::Uuid,
    title: &Title,
) -> Result<Option<ListRow>, DieselError> {
    let board_exists: bool =
        diesel::select(diesel::dsl::exists(boards::table.find(board_id))).get_result(connection)?;
    if !board_exists {
        return Ok(None);
    }
    let current: Option<i32> = board_lists::table
        .filter(board_lists::board_id.eq(board_id))
        .select(max(board_lists::position))
        .first(connection)?;
    let row = ListRow {
        id: ListId::new().into_inner(),
        board_id,
        title: title.as_str().to_owned(),
        position: next_position(current),
    };
    diesel::insert_into(board_lists::table)
        .values(&row)
        .execute(connection)?;
    Ok(Some(row))
}

fn insert_card(
    connection: &mut PgConnection,
    list_id: uuid::Uuid,
    title: &Title,
) -> Result<Option<CardRow>, DieselError> {
    let list_exists: bool = diesel::select(diesel::dsl::exists(board_lists::table.find(list_id)))
        .get_result(connection)?;
    if !list_exists {
        return Ok(None);
    }
    let row = CardRow {
        id: CardId::new().into_inner(),
        list_id,
        title: title.as_str().to_owned(),
        description: None,
        position: next_card_position(connection, list_id)?,
    };
    diesel::insert_into(cards::table)
        .values(&row)
        .execute(connection)?;
    Ok(Some(row))
}

fn relocate_card(
    connection: &mut PgConnection,
    card_id: uuid::Uuid,
    destination: uuid::Uuid,
) -> Result<MoveOutcome, DieselError> {
    let list_exists: bool = diesel::select(diesel::dsl::exists(board_lists::table.find(destination)))
        .get_result(connection)?;
    if !list_exists {
        return Ok(MoveOutcome::MissingList);
    }
    let current: Option<uuid::Uuid> = cards::table
        .find(card_id)
        .select(cards::list_id)
        .first(connection)
        .optional()?;
    match current {
        None => return Ok(MoveOutcome::MissingCard),
        Some(list_id) if list_id == destination => return Ok(MoveOutcome::Moved),
        Some(_) => {}
    }
    let position = next_card_position(connection, destination)?;
    diesel::update(cards::table.find(card_id))
        .set((cards::list_id.eq(destination), cards::position.eq(position)))
        .execute(connection)?;
    Ok(MoveOutcome::Moved)
}

fn next_card_position(
    connection: &mut PgConnection,
    list_id: uuid::Uuid,
) -> Result<i32, DieselError> {
    let current: Option<i32> = cards::table
        .filter(cards::list_id.eq(list_id))
        .select(max(cards::position))
        .first(connection)?;
    Ok(next_position(current))
}

fn next_position(current: Option<i32>) -> i32 {
    current.map_or(0, |position| position.saturating_add(1))
}

fn require_row(affected: usize, missing: RemoteStoreError) -> RemoteStoreResult<()> {
    if affected == 0 { Err(missing) } else { Ok(()) }
}

fn snapshot_from_rows(
    board: BoardRow,
    lists: Vec<ListRow>,
    card_rows: Vec<CardRow>,
) -> RemoteStoreResult<BoardSnapshot> {
    let summary = BoardSummary {
        id: BoardId::from_uuid(board.id),
        name: Title::new(board.name).map_err(RemoteStoreError::unavailable)?,
        background: Background::parse(&board.background),
        team_id: TeamId::from_uuid(board.team_id),
    };
    let list_records = lists
        .into_iter()
        .map(list_record)
        .collect::<RemoteStoreResult<Vec<_>>>()?;
    let card_records = card_rows
        .into_iter()
        .map(card_record)
        .collect::<RemoteStoreResult<Vec<_>>>()?;
    Ok(BoardSnapshot {
        board: summary,
        lists: list_records,
        cards: card_records,
    })
}

fn list_record(row: ListRow) -> RemoteStoreResult<ListRecord> {
    Ok(ListRecord {
        id: ListId::from_uuid(row.id),
        title: Title::new(row.title).map_err(RemoteStoreError::unavailable)?,
    })
}

fn card_record(row: CardRow) -> RemoteStoreResult<CardRecord> {
    Ok(CardRecord {
        id: CardId::from_uuid(row.id),
        list_id: ListId::from_uuid(row.list_id),
        title: Title::new(row.title).map_err(RemoteStoreError::unavailable)?,
        description: row.description,
    })
}
