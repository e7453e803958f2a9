//! SeaORM adapter for the user directory.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, NotSet,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::{users, UserRole};
use crate::errors::domain::DomainError;
use crate::repos::users::{UserRecord, UserStore};

pub mod dto;

pub use dto::UserCreate;

// Adapter functions return DbErr; the store impl maps to DomainError via From<DbErr>.

pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UserCreate,
) -> Result<users::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let user_active = users::ActiveModel {
        id: NotSet,
        username: Set(dto.username),
        password_hash: Set(dto.password_hash),
        role: Set(dto.role),
        created_at: Set(now),
        updated_at: Set(now),
    };

    user_active.insert(conn).await
}

pub async fn find_user_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find_by_id(user_id).one(conn).await
}

pub async fn find_user_by_username<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .filter(users::Column::Username.eq(username))
        .one(conn)
        .await
}

pub async fn list_users<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .order_by_asc(users::Column::Id)
        .all(conn)
        .await
}

pub async fn update_password_hash<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    password_hash: &str,
) -> Result<u64, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let result = users::Entity::update_many()
        .col_expr(users::Column::PasswordHash, Expr::val(password_hash).into())
        .col_expr(users::Column::UpdatedAt, Expr::val(now).into())
        .filter(users::Column::Id.eq(user_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

/// Games referencing the user keep running with the slot set to NULL.
pub async fn delete_user_by_username<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
) -> Result<u64, sea_orm::DbErr> {
    let result = users::Entity::delete_many()
        .filter(users::Column::Username.eq(username))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

/// `UserStore` backed by a SeaORM connection.
#[derive(Debug, Clone)]
pub struct UsersSea {
    db: DatabaseConnection,
}

impl UsersSea {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for UsersSea {
    async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        role: UserRole,
    ) -> Result<UserRecord, DomainError> {
        let dto = UserCreate::new(username, password_hash).with_role(role);
        Ok(create_user(&self.db, dto).await?.into())
    }

    async fn find_by_id(&self, user_id: i64) -> Result<Option<UserRecord>, DomainError> {
        Ok(find_user_by_id(&self.db, user_id).await?.map(UserRecord::from))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, DomainError> {
        Ok(find_user_by_username(&self.db, username)
            .await?
            .map(UserRecord::from))
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>, DomainError> {
        Ok(list_users(&self.db)
            .await?
            .into_iter()
            .map(UserRecord::from)
            .collect())
    }

    async fn update_password_hash(
        &self,
        user_id: i64,
        password_hash: &str,
    ) -> Result<bool, DomainError> {
        Ok(update_password_hash(&self.db, user_id, password_hash).await? > 0)
    }

    async fn delete_by_username(&self, username: &str) -> Result<bool, DomainError> {
        Ok(delete_user_by_username(&self.db, username).await? > 0)
    }
}
