use serde::{Deserialize, Serialize};

pub use models::player::{Draft, Profession, Race};

/// Stored player as it leaves the service.
pub type Player = models::player::Model;

/// Body of create and update requests. Every field is optional on the
/// wire; create demands all of them except `banned`, update applies
/// whichever are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerInput {
    pub name: Option<String>,
    pub title: Option<String>,
    pub race: Option<Race>,
    pub profession: Option<Profession>,
    /// epoch milliseconds
    pub birthday: Option<i64>,
    pub experience: Option<i32>,
    pub banned: Option<bool>,
}

/// Sort key for list results; always ascending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerOrder {
    #[default]
    Id,
    Name,
    Experience,
    Birthday,
}

impl PlayerOrder {
    pub fn sort(self, players: &mut [Player]) {
        match self {
            PlayerOrder::Id => players.sort_by_key(|p| p.id),
            PlayerOrder::Name => players.sort_by(|a, b| a.name.cmp(&b.name)),
            PlayerOrder::Experience => players.sort_by_key(|p| p.experience),
            PlayerOrder::Birthday => players.sort_by_key(|p| p.birthday),
        }
    }
}

/// Optional predicates for list and count. A player must satisfy every
/// predicate that is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerFilter {
    /// case-insensitive substring
    pub name: Option<String>,
    /// case-insensitive substring
    pub title: Option<String>,
    pub race: Option<Race>,
    pub profession: Option<Profession>,
    /// inclusive lower bound on birthday, epoch ms
    pub after: Option<i64>,
    /// inclusive upper bound on birthday, epoch ms
    pub before: Option<i64>,
    pub banned: Option<bool>,
    /// exclusive
    pub min_experience: Option<i32>,
    /// exclusive
    pub max_experience: Option<i32>,
    /// exclusive
    pub min_level: Option<i32>,
    /// exclusive
    pub max_level: Option<i32>,
}

impl PlayerFilter {
    /// Keep only the players matching every set predicate, preserving order.
    pub fn apply(&self, mut players: Vec<Player>) -> Vec<Player> {
        let name = self.name.as_deref().map(str::to_lowercase);
        let title = self.title.as_deref().map(str::to_lowercase);
        players.retain(|p| self.matches_folded(p, name.as_deref(), title.as_deref()));
        players
    }

    fn matches_folded(&self, p: &Player, name: Option<&str>, title: Option<&str>) -> bool {
        contains_folded(&p.name, name) && contains_folded(&p.title, title) && self.matches_scalars(p)
    }

    fn matches_scalars(&self, p: &Player) -> bool {
        let born = p.birthday.timestamp_millis();
        self.race.map_or(true, |r| p.race == r)
            && self.profession.map_or(true, |r| p.profession == r)
            && self.after.map_or(true, |t| born >= t)
            && self.before.map_or(true, |t| born <= t)
            && self.banned.map_or(true, |b| p.banned == b)
            && self.min_experience.map_or(true, |v| p.experience > v)
            && self.max_experience.map_or(true, |v| p.experience < v)
            && self.min_level.map_or(true, |v| p.level > v)
            && self.max_level.map_or(true, |v| p.level < v)
    }
}

fn contains_folded(haystack: &str, needle_lower: Option<&str>) -> bool {
    match needle_lower {
        Some(n) => haystack.to_lowercase().contains(n),
        None => true,
    }
}
