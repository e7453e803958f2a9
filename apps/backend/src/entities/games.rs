use std::str::FromStr;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::errors::domain::{DomainError, ValidationKind};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameType {
    #[sea_orm(string_value = "SINGLE")]
    Single,
    #[sea_orm(string_value = "MULTIPLAYER")]
    Multiplayer,
    /// Only present on legacy rows; new sessions cannot use it.
    #[sea_orm(string_value = "VS_COMPUTER")]
    VsComputer,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    #[sea_orm(string_value = "WAITING")]
    Waiting,
    #[sea_orm(string_value = "STARTED")]
    Started,
    #[sea_orm(string_value = "FINISHED")]
    Finished,
}

/// Participant role; doubles as the `turn` marker.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[sea_orm(string_value = "GUESSER")]
    Guesser,
    #[sea_orm(string_value = "MASTERMIND")]
    Mastermind,
}

impl GameStatus {
    /// Position in the forward-only WAITING -> STARTED -> FINISHED order.
    pub fn rank(self) -> u8 {
        match self {
            GameStatus::Waiting => 0,
            GameStatus::Started => 1,
            GameStatus::Finished => 2,
        }
    }
}

impl FromStr for GameType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SINGLE" => Ok(GameType::Single),
            "MULTIPLAYER" => Ok(GameType::Multiplayer),
            "VS_COMPUTER" => Ok(GameType::VsComputer),
            _ => Err(DomainError::invalid(
                ValidationKind::GameType,
                format!("Unknown game type '{s}'"),
            )),
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GUESSER" => Ok(Role::Guesser),
            "MASTERMIND" => Ok(Role::Mastermind),
            _ => Err(DomainError::invalid(
                ValidationKind::Role,
                format!("Unknown role '{s}'"),
            )),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "game_type")]
    pub game_type: GameType,
    pub status: GameStatus,
    pub turn: Role,
    #[sea_orm(column_name = "guesser_id")]
    pub guesser_id: Option<i64>,
    #[sea_orm(column_name = "mastermind_id")]
    pub mastermind_id: Option<i64>,
    pub code: Option<String>,
    pub version: i32,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::GuesserId",
        to = "super::users::Column::Id",
        on_delete = "SetNull"
    )]
    Guesser,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::MastermindId",
        to = "super::users::Column::Id",
        on_delete = "SetNull"
    )]
    Mastermind,
    #[sea_orm(has_many = "super::guesses::Entity")]
    Guesses,
}

impl Related<super::guesses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Guesses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
