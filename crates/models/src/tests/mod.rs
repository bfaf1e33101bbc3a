//! Round trips through a real SeaORM connection (in-memory SQLite).

use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};

use crate::player::{self, Draft, Profession, Race};

async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

fn draft(name: &str, experience: i32) -> Draft {
    let mut d = Draft {
        id: None,
        name: name.to_string(),
        title: "Wanderer".to_string(),
        race: Race::Dwarf,
        profession: Profession::Cleric,
        birthday: player::validate_birthday(1_262_304_000_000).expect("birthday"),
        experience: 0,
        level: 0,
        until_next_level: 0,
        banned: false,
    };
    d.set_experience(experience);
    d
}

#[tokio::test]
async fn test_player_crud() -> Result<()> {
    let db = setup_test_db().await?;

    let created = player::save(&db, draft("Gimli", 1000)).await?;
    assert!(created.id > 0);
    assert_eq!(created.level, 4);
    assert_eq!(created.race, Race::Dwarf);

    let found = player::find_by_id(&db, created.id).await?.expect("stored row");
    assert_eq!(found, created);

    let mut changed: Draft = found.into();
    changed.title = "Lord of the Glittering Caves".into();
    changed.set_experience(300);
    let updated = player::save(&db, changed).await?;
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "Lord of the Glittering Caves");
    assert_eq!(updated.level, 2);

    assert!(player::delete(&db, created.id).await?);
    assert!(!player::delete(&db, created.id).await?);
    assert!(player::find_by_id(&db, created.id).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_ids_are_assigned_in_order() -> Result<()> {
    let db = setup_test_db().await?;
    let a = player::save(&db, draft("A", 0)).await?;
    let b = player::save(&db, draft("B", 0)).await?;
    assert!(b.id > a.id);
    let all = player::find_all(&db).await?;
    assert_eq!(all.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_enum_and_timestamp_survive_storage() -> Result<()> {
    let db = setup_test_db().await?;
    let mut d = draft("Nazgul", 10);
    d.race = Race::Hobbit;
    d.profession = Profession::Nazgul;
    d.banned = true;
    let created = player::save(&db, d.clone()).await?;
    let found = player::find_by_id(&db, created.id).await?.expect("stored row");
    assert_eq!(found.race, Race::Hobbit);
    assert_eq!(found.profession, Profession::Nazgul);
    assert_eq!(found.birthday.timestamp_millis(), d.birthday.timestamp_millis());
    assert!(found.banned);
    Ok(())
}
