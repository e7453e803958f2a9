//! SeaORM adapter for game sessions - generic over ConnectionTrait.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    NotSet, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::debug;

use crate::domain::session::{GameSession, NewSession, PendingGuess};
use crate::entities::{games, guesses, GameStatus, Role};
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::infra::db_errors::OPTIMISTIC_LOCK_PREFIX;
use crate::repos::games::GameStore;

pub mod dto;

pub use dto::{GameCreate, GameUpdate, GuessCreate};

// Adapter functions return DbErr; the store impl maps to DomainError via From<DbErr>.

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<games::Model>, sea_orm::DbErr> {
    games::Entity::find_by_id(game_id).one(conn).await
}

/// Guesses of one game in submission order.
pub async fn find_guesses<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<guesses::Model>, sea_orm::DbErr> {
    guesses::Entity::find()
        .filter(guesses::Column::GameId.eq(game_id))
        .order_by_asc(guesses::Column::Id)
        .all(conn)
        .await
}

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameCreate,
) -> Result<games::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let game_active = games::ActiveModel {
        id: NotSet,
        game_type: Set(dto.game_type),
        status: Set(GameStatus::Waiting),
        turn: Set(Role::Mastermind),
        guesser_id: Set(dto.guesser_id),
        mastermind_id: Set(dto.mastermind_id),
        code: Set(None),
        version: Set(1),
        created_at: Set(now),
        updated_at: Set(now),
    };

    game_active.insert(conn).await
}

/// Write all mutable columns if the stored version still equals
/// `expected_version`, bumping it by one.
///
/// `rows_affected == 0` means either the game is gone or the version moved;
/// a follow-up read tells the two apart.
pub async fn update_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameUpdate,
) -> Result<(), sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();

    let result = games::Entity::update_many()
        .col_expr(games::Column::Status, Expr::val(dto.status.to_value()).into())
        .col_expr(games::Column::Turn, Expr::val(dto.turn.to_value()).into())
        .col_expr(games::Column::GuesserId, Expr::val(dto.guesser_id).into())
        .col_expr(games::Column::MastermindId, Expr::val(dto.mastermind_id).into())
        .col_expr(games::Column::Code, Expr::val(dto.code).into())
        .col_expr(games::Column::UpdatedAt, Expr::val(now).into())
        .col_expr(
            games::Column::Version,
            Expr::col(games::Column::Version).add(1),
        )
        .filter(games::Column::Id.eq(dto.id))
        .filter(games::Column::Version.eq(dto.expected_version))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return match find_by_id(conn, dto.id).await? {
            Some(game) => Err(sea_orm::DbErr::Custom(format!(
                "{OPTIMISTIC_LOCK_PREFIX}{{\"expected\":{},\"actual\":{}}}",
                dto.expected_version, game.version
            ))),
            None => Err(sea_orm::DbErr::RecordNotFound(format!(
                "game {}",
                dto.id
            ))),
        };
    }
    Ok(())
}

pub async fn insert_guess<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GuessCreate,
) -> Result<guesses::Model, sea_orm::DbErr> {
    let guess_active = guesses::ActiveModel {
        id: NotSet,
        game_id: Set(dto.game_id),
        guess: Set(dto.guess),
        cows: Set(dto.cows),
        bulls: Set(dto.bulls),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };

    guess_active.insert(conn).await
}

pub async fn load_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<GameSession>, DomainError> {
    let Some(game) = find_by_id(conn, game_id).await? else {
        return Ok(None);
    };
    let rows = find_guesses(conn, game_id).await?;
    dto::to_session(game, rows).map(Some)
}

/// `GameStore` backed by a SeaORM connection (Postgres or SQLite).
#[derive(Debug, Clone)]
pub struct GamesSea {
    db: DatabaseConnection,
}

impl GamesSea {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl GameStore for GamesSea {
    async fn create_session(&self, new: NewSession) -> Result<GameSession, DomainError> {
        let game = create_game(&self.db, GameCreate::from(new)).await?;
        dto::to_session(game, Vec::new())
    }

    async fn find_session(&self, game_id: i64) -> Result<Option<GameSession>, DomainError> {
        load_session(&self.db, game_id).await
    }

    async fn save_session(
        &self,
        session: &GameSession,
        expected_version: i32,
        appended: Option<PendingGuess>,
    ) -> Result<GameSession, DomainError> {
        let txn = self.db.begin().await?;

        let written = async {
            update_game(&txn, GameUpdate::from_session(session, expected_version)).await?;
            if let Some(pending) = appended {
                insert_guess(&txn, GuessCreate::new(session.id, pending)).await?;
            }
            Ok::<(), sea_orm::DbErr>(())
        }
        .await;

        match written {
            Ok(()) => txn.commit().await?,
            Err(err) => {
                // Best-effort rollback; preserve original error
                let _ = txn.rollback().await;
                return Err(err.into());
            }
        }
        debug!(game_id = session.id, expected_version, "game saved");

        load_session(&self.db, session.id).await?.ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Game, format!("Game {} not found", session.id))
        })
    }
}
