use std::error::Error;

use backend::adapters::games_sea::{self, GameUpdate, GamesSea};
use backend::adapters::users_sea::{self, UserCreate};
use backend::config::db::DbProfile;
use backend::domain::code::FourDigits;
use backend::domain::session::NewSession;
use backend::entities::{GameStatus, GameType, Role};
use backend::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use backend::infra::db::bootstrap_db;
use backend::repos::games::GameStore;
use sea_orm::DatabaseConnection;

async fn db_with_users() -> Result<(DatabaseConnection, i64, i64), Box<dyn Error>> {
    let db = bootstrap_db(DbProfile::InMemory).await?;
    let mm = users_sea::create_user(&db, UserCreate::new("mastermind", "h")).await?;
    let g = users_sea::create_user(&db, UserCreate::new("guesser", "h")).await?;
    Ok((db, mm.id, g.id))
}

#[tokio::test]
async fn create_and_find_session() -> Result<(), Box<dyn Error>> {
    let (db, mm, _) = db_with_users().await?;
    let store = GamesSea::new(db);

    let created = store
        .create_session(NewSession {
            game_type: GameType::Multiplayer,
            creator_id: mm,
            role: Role::Mastermind,
        })
        .await?;
    assert_eq!(created.status, GameStatus::Waiting);
    assert_eq!(created.turn, Role::Mastermind);
    assert_eq!(created.mastermind_id, Some(mm));
    assert_eq!(created.guesser_id, None);
    assert_eq!(created.version, 1);

    let found = store.find_session(created.id).await?.expect("game exists");
    assert_eq!(found.id, created.id);
    assert_eq!(found.game_type, GameType::Multiplayer);
    assert_eq!(found.mastermind_id, Some(mm));
    assert!(found.code.is_none());
    assert!(found.guesses.is_empty());
    assert!(store.find_session(created.id + 100).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn save_session_persists_code_and_guesses_in_order() -> Result<(), Box<dyn Error>> {
    let (db, mm, g) = db_with_users().await?;
    let store = GamesSea::new(db);

    let mut session = store
        .create_session(NewSession {
            game_type: GameType::Multiplayer,
            creator_id: mm,
            role: Role::Mastermind,
        })
        .await?;

    session.bind(g, Role::Guesser)?;
    session.set_code(FourDigits::parse_code("1234")?)?;
    let session = store.save_session(&session, 1, None).await?;
    assert_eq!(session.version, 2);
    assert_eq!(session.status, GameStatus::Started);
    assert_eq!(session.code.map(|c| c.to_string()), Some("1234".to_string()));

    let mut working = session.clone();
    let first = working.record_guess(FourDigits::parse_guess("4321")?)?;
    let session = store.save_session(&working, 2, Some(first)).await?;

    let mut working = session.clone();
    let second = working.record_guess(FourDigits::parse_guess("1234")?)?;
    let session = store.save_session(&working, 3, Some(second)).await?;

    assert_eq!(session.version, 4);
    assert_eq!(session.status, GameStatus::Finished);
    let guesses: Vec<String> = session.guesses.iter().map(|g| g.guess.to_string()).collect();
    assert_eq!(guesses, vec!["4321", "1234"]);
    assert_eq!(session.guesses[0].score.cows, 4);
    assert_eq!(session.guesses[1].score.bulls, 4);
    Ok(())
}

#[tokio::test]
async fn stale_version_is_an_optimistic_lock_conflict() -> Result<(), Box<dyn Error>> {
    let (db, mm, g) = db_with_users().await?;
    let store = GamesSea::new(db);

    let mut session = store
        .create_session(NewSession {
            game_type: GameType::Multiplayer,
            creator_id: mm,
            role: Role::Mastermind,
        })
        .await?;
    session.bind(g, Role::Guesser)?;
    store.save_session(&session, 1, None).await?;

    // Second writer still believes version 1
    let err = store.save_session(&session, 1, None).await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict(ConflictKind::OptimisticLock, _)));
    assert!(err.is_optimistic_lock());
    Ok(())
}

#[tokio::test]
async fn update_of_missing_game_is_not_found() -> Result<(), Box<dyn Error>> {
    let (db, mm, _) = db_with_users().await?;
    let store = GamesSea::new(db.clone());
    let mut session = store
        .create_session(NewSession {
            game_type: GameType::Single,
            creator_id: mm,
            role: Role::Guesser,
        })
        .await?;
    session.id += 1000;

    let err = games_sea::update_game(&db, GameUpdate::from_session(&session, 1))
        .await
        .unwrap_err();
    let err = DomainError::from(err);
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Game, _)));
    Ok(())
}

#[tokio::test]
async fn deleting_a_user_clears_their_slot() -> Result<(), Box<dyn Error>> {
    let (db, mm, g) = db_with_users().await?;
    let store = GamesSea::new(db.clone());

    let mut session = store
        .create_session(NewSession {
            game_type: GameType::Multiplayer,
            creator_id: mm,
            role: Role::Mastermind,
        })
        .await?;
    session.bind(g, Role::Guesser)?;
    store.save_session(&session, 1, None).await?;

    assert_eq!(users_sea::delete_user_by_username(&db, "guesser").await?, 1);

    let reloaded = store.find_session(session.id).await?.expect("game kept");
    assert_eq!(reloaded.guesser_id, None);
    assert_eq!(reloaded.mastermind_id, Some(mm));
    Ok(())
}
