//! `PostgreSQL` integration tests for the remote board store.
//!
//! Each test provisions a private schema in the database named by
//! `CORKBOARD_TEST_DATABASE_URL` and drops it afterwards. Tests return early
//! when the variable is unset.

use corkboard::board::{
    adapters::postgres::{BoardPgPool, PostgresRemoteStore},
    domain::{Background, BoardId, BoardSummary, CardId, ListId, TeamId, Title},
    ports::{CardPatch, RemoteBoardStore, RemoteStoreError},
};
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

const DATABASE_URL_VAR: &str = "CORKBOARD_TEST_DATABASE_URL";

const CREATE_SCHEMA_SQL: &str =
    include_str!("../migrations/2026-10-01-000000_create_board_tables/up.sql");

#[derive(Debug)]
struct SearchPath(String);

impl CustomizeConnection<PgConnection, diesel::r2d2::Error> for SearchPath {
    fn on_acquire(&self, connection: &mut PgConnection) -> Result<(), diesel::r2d2::Error> {
        connection
            .batch_execute(&format!("SET search_path TO {}", self.0))
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

struct PgContext {
    url: String,
    schema: String,
    store: PostgresRemoteStore,
    rt: Runtime,
}

impl PgContext {
    fn connect() -> Result<Option<Self>, BoxError> {
        let Ok(url) = std::env::var(DATABASE_URL_VAR) else {
            return Ok(None);
        };
        let schema = format!("corkboard_test_{}", uuid::Uuid::new_v4().simple());
        let mut connection = PgConnection::establish(&url)?;
        connection.batch_execute(&format!(
            "CREATE SCHEMA {schema}; SET search_path TO {schema};"
        ))?;
        connection.batch_execute(CREATE_SCHEMA_SQL)?;
        let pool: BoardPgPool = Pool::builder()
            .max_size(2)
            .connection_customizer(Box::new(SearchPath(schema.clone())))
            .build(ConnectionManager::<PgConnection>::new(url.as_str()))?;
        let rt = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        Ok(Some(Self {
            url,
            schema,
            store: PostgresRemoteStore::new(pool),
            rt,
        }))
    }
}

impl Drop for PgContext {
    fn drop(&mut self) {
        if let Ok(mut connection) = PgConnection::establish(&self.url) {
            let _ignored =
                connection.batch_execute(&format!("DROP SCHEMA IF EXISTS {} CASCADE", self.schema));
        }
    }
}

#[fixture]
fn context() -> Option<PgContext> {
    PgContext::connect().expect("provision test schema")
}

fn title(value: &str) -> Title {
    Title::new(value).expect("valid title")
}

fn summary() -> BoardSummary {
    BoardSummary {
        id: BoardId::new(),
        name: title("Roadmap"),
        background: Background::parse("#519839"),
        team_id: TeamId::new(),
    }
}

#[rstest]
fn fetch_returns_lists_and_cards_in_position_order(context: Option<PgContext>) {
    let Some(ctx) = context else {
        return;
    };
    let board = summary();
    ctx.rt.block_on(async {
        ctx.store.create_board(&board).await.expect("create board");
        let todo = ctx
            .store
            .create_list(board.id, &title("To Do"))
            .await
            .expect("create list");
        let doing = ctx
            .store
            .create_list(board.id, &title("Doing"))
            .await
            .expect("create list");
        for name in ["A", "B"] {
            ctx.store
                .create_card(todo.id, &title(name))
                .await
                .expect("create card");
        }

        let snapshot = ctx.store.fetch_board(board.id).await.expect("fetch board");

        assert_eq!(snapshot.board, board);
        let list_ids: Vec<ListId> = snapshot.lists.iter().map(|list| list.id).collect();
        assert_eq!(list_ids, vec![todo.id, doing.id]);
        let titles: Vec<&str> = snapshot.cards.iter().map(|card| card.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B"]);
    });
}

#[rstest]
fn move_appends_card_to_destination(context: Option<PgContext>) {
    let Some(ctx) = context else {
        return;
    };
    let board = summary();
    ctx.rt.block_on(async {
        ctx.store.create_board(&board).await.expect("create board");
        let todo = ctx.store.create_list(board.id, &title("To Do")).await.expect("list");
        let done = ctx.store.create_list(board.id, &title("Done")).await.expect("list");
        let moved = ctx.store.create_card(todo.id, &title("A")).await.expect("card");
        ctx.store.create_card(done.id, &title("Z")).await.expect("card");

        ctx.store.move_card(moved.id, done.id).await.expect("move card");

        let snapshot = ctx.store.fetch_board(board.id).await.expect("fetch board");
        let done_titles: Vec<&str> = snapshot
            .cards
            .iter()
            .filter(|card| card.list_id == done.id)
            .map(|card| card.title.as_str())
            .collect();
        assert_eq!(done_titles, vec!["Z", "A"]);
    });
}

#[rstest]
fn move_into_current_list_keeps_position(context: Option<PgContext>) {
    let Some(ctx) = context else {
        return;
    };
    let board = summary();
    ctx.rt.block_on(async {
        ctx.store.create_board(&board).await.expect("create board");
        let todo = ctx.store.create_list(board.id, &title("To Do")).await.expect("list");
        let first = ctx.store.create_card(todo.id, &title("A")).await.expect("card");
        ctx.store.create_card(todo.id, &title("B")).await.expect("card");

        ctx.store.move_card(first.id, todo.id).await.expect("move card");

        let snapshot = ctx.store.fetch_board(board.id).await.expect("fetch board");
        let titles: Vec<&str> = snapshot.cards.iter().map(|card| card.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B"]);
    });
}

#[rstest]
fn update_and_delete_card(context: Option<PgContext>) {
    let Some(ctx) = context else {
        return;
    };
    let board = summary();
    ctx.rt.block_on(async {
        ctx.store.create_board(&board).await.expect("create board");
        let todo = ctx.store.create_list(board.id, &title("To Do")).await.expect("list");
        let card = ctx.store.create_card(todo.id, &title("A")).await.expect("card");

        ctx.store
            .update_card(card.id, &CardPatch::description("notes".to_owned()))
            .await
            .expect("update card");
        let snapshot = ctx.store.fetch_board(board.id).await.expect("fetch board");
        assert_eq!(
            snapshot.cards.first().and_then(|stored| stored.description.as_deref()),
            Some("notes")
        );

        ctx.store.delete_card(card.id).await.expect("delete card");
        let emptied = ctx.store.fetch_board(board.id).await.expect("fetch board");
        assert!(emptied.cards.is_empty());
    });
}

#[rstest]
fn missing_rows_map_to_not_found_errors(context: Option<PgContext>) {
    let Some(ctx) = context else {
        return;
    };
    ctx.rt.block_on(async {
        let board_id = BoardId::new();
        let card_id = CardId::new();
        assert!(matches!(
            ctx.store.fetch_board(board_id).await,
            Err(RemoteStoreError::BoardNotFound(id)) if id == board_id
        ));
        assert!(matches!(
            ctx.store.delete_card(card_id).await,
            Err(RemoteStoreError::CardNotFound(id)) if id == card_id
        ));
    });
}

#[rstest]
fn deleting_a_list_cascades_to_cards(context: Option<PgContext>) {
    let Some(ctx) = context else {
        return;
    };
    let board = summary();
    ctx.rt.block_on(async {
        ctx.store.create_board(&board).await.expect("create board");
        let todo = ctx.store.create_list(board.id, &title("To Do")).await.expect("list");
        ctx.store.create_card(todo.id, &title("A")).await.expect("card");

        ctx.store.delete_list(todo.id).await.expect("delete list");

        let snapshot = ctx.store.fetch_board(board.id).await.expect("fetch board");
        assert!(snapshot.lists.is_empty());
        assert!(snapshot.cards.is_empty());
    });
}
