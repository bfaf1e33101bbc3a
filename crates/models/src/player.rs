use sea_orm::{entity::prelude::*, DatabaseConnection, NotSet, Set, Unchanged};
use sea_orm::sea_query::StringLen;
use serde::{Deserialize, Serialize};

use crate::errors;

pub const NAME_MAX_CHARS: usize = 12;
pub const TITLE_MAX_CHARS: usize = 30;
pub const EXPERIENCE_MAX: i32 = 10_000_000;
/// 2000-01-01T00:00:00Z
pub const BIRTHDAY_MIN_MS: i64 = 946_684_800_000;
/// 3000-01-01T00:00:00Z, exclusive
pub const BIRTHDAY_END_MS: i64 = 32_503_680_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Race {
    #[sea_orm(string_value = "HUMAN")]
    Human,
    #[sea_orm(string_value = "DWARF")]
    Dwarf,
    #[sea_orm(string_value = "ELF")]
    Elf,
    #[sea_orm(string_value = "GIANT")]
    Giant,
    #[sea_orm(string_value = "ORC")]
    Orc,
    #[sea_orm(string_value = "TROLL")]
    Troll,
    #[sea_orm(string_value = "HOBBIT")]
    Hobbit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Profession {
    #[sea_orm(string_value = "WARRIOR")]
    Warrior,
    #[sea_orm(string_value = "ROGUE")]
    Rogue,
    #[sea_orm(string_value = "SORCERER")]
    Sorcerer,
    #[sea_orm(string_value = "CLERIC")]
    Cleric,
    #[sea_orm(string_value = "PALADIN")]
    Paladin,
    #[sea_orm(string_value = "NAZGUL")]
    Nazgul,
    #[sea_orm(string_value = "WARLOCK")]
    Warlock,
    #[sea_orm(string_value = "DRUID")]
    Druid,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "player")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub title: String,
    pub race: Race,
    pub profession: Profession,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub birthday: DateTimeUtc,
    pub experience: i32,
    pub level: i32,
    pub until_next_level: i32,
    pub banned: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// A player row as it is about to be written. `id` is `None` until the
/// store has assigned one.
#[derive(Clone, Debug, PartialEq)]
pub struct Draft {
    pub id: Option<i64>,
    pub name: String,
    pub title: String,
    pub race: Race,
    pub profession: Profession,
    pub birthday: DateTimeUtc,
    pub experience: i32,
    pub level: i32,
    pub until_next_level: i32,
    pub banned: bool,
}

impl Draft {
    /// Attach an id, turning the draft into a stored row.
    pub fn into_model(self, id: i64) -> Model {
        Model {
            id,
            name: self.name,
            title: self.title,
            race: self.race,
            profession: self.profession,
            birthday: self.birthday,
            experience: self.experience,
            level: self.level,
            until_next_level: self.until_next_level,
            banned: self.banned,
        }
    }

    /// Set experience and recompute the two derived fields from it.
    pub fn set_experience(&mut self, experience: i32) {
        self.experience = experience;
        self.level = level_for(experience);
        self.until_next_level = until_next_level(self.level, experience);
    }
}

impl From<Model> for Draft {
    fn from(m: Model) -> Self {
        Self {
            id: Some(m.id),
            name: m.name,
            title: m.title,
            race: m.race,
            profession: m.profession,
            birthday: m.birthday,
            experience: m.experience,
            level: m.level,
            until_next_level: m.until_next_level,
            banned: m.banned,
        }
    }
}

/// `floor((sqrt(2500 + 200 * experience) - 50) / 100)`
pub fn level_for(experience: i32) -> i32 {
    let exp = f64::from(experience.max(0));
    (((2500.0 + 200.0 * exp).sqrt() - 50.0) / 100.0) as i32
}

/// Experience still missing before `level + 1` is reached.
pub fn until_next_level(level: i32, experience: i32) -> i32 {
    50 * (level + 1) * (level + 2) - experience
}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.is_empty() {
        return Err(errors::ModelError::Validation("name must not be empty".into()));
    }
    if name.chars().count() > NAME_MAX_CHARS {
        return Err(errors::ModelError::Validation(format!("name longer than {NAME_MAX_CHARS} characters")));
    }
    Ok(())
}

pub fn validate_title(title: &str) -> Result<(), errors::ModelError> {
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(errors::ModelError::Validation(format!("title longer than {TITLE_MAX_CHARS} characters")));
    }
    Ok(())
}

pub fn validate_experience(experience: i32) -> Result<(), errors::ModelError> {
    if !(0..=EXPERIENCE_MAX).contains(&experience) {
        return Err(errors::ModelError::Validation(format!("experience must be within 0..={EXPERIENCE_MAX}")));
    }
    Ok(())
}

/// Accepts epoch milliseconds inside `[2000-01-01, 3000-01-01)`.
pub fn validate_birthday(millis: i64) -> Result<DateTimeUtc, errors::ModelError> {
    if !(BIRTHDAY_MIN_MS..BIRTHDAY_END_MS).contains(&millis) {
        return Err(errors::ModelError::Validation("birthday outside the allowed years 2000..3000".into()));
    }
    chrono::DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| errors::ModelError::Validation("birthday is not a valid timestamp".into()))
}

pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find().all(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn find_by_id(db: &DatabaseConnection, id: i64) -> Result<Option<Model>, errors::ModelError> {
    Entity::find_by_id(id).one(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Insert when the draft has no id, otherwise overwrite the stored row.
pub async fn save(db: &DatabaseConnection, draft: Draft) -> Result<Model, errors::ModelError> {
    let id = match draft.id {
        Some(id) => Unchanged(id),
        None => NotSet,
    };
    let am = ActiveModel {
        id,
        name: Set(draft.name),
        title: Set(draft.title),
        race: Set(draft.race),
        profession: Set(draft.profession),
        birthday: Set(draft.birthday),
        experience: Set(draft.experience),
        level: Set(draft.level),
        until_next_level: Set(draft.until_next_level),
        banned: Set(draft.banned),
    };
    let res = if draft.id.is_some() { am.update(db).await } else { am.insert(db).await };
    res.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Returns true if a row was removed.
pub async fn delete(db: &DatabaseConnection, id: i64) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}
