use std::sync::Arc;

use models::player::{self as rules, Draft};
use tracing::{debug, info, instrument};

use super::domain::{Player, PlayerFilter, PlayerInput, PlayerOrder};
use super::repository::PlayerRepository;
use crate::errors::ServiceError;
use crate::pagination::Pagination;

/// Player business service independent of web framework.
pub struct PlayerService<R: PlayerRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: PlayerRepository + ?Sized> PlayerService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Ids come from the store and are always positive.
    pub fn is_valid_id(id: i64) -> bool { id > 0 }

    /// Filtered, sorted page of players.
    #[instrument(skip(self))]
    pub async fn list(&self, filter: &PlayerFilter, order: PlayerOrder, page: Pagination) -> Result<Vec<Player>, ServiceError> {
        let mut players = filter.apply(self.repo.find_all().await?);
        order.sort(&mut players);
        let total = players.len();
        let players = page.slice(players);
        debug!(total, returned = players.len(), "list players");
        Ok(players)
    }

    /// Number of players matching `filter`, ignoring paging.
    pub async fn count(&self, filter: &PlayerFilter) -> Result<usize, ServiceError> {
        Ok(filter.apply(self.repo.find_all().await?).len())
    }

    pub async fn get(&self, id: i64) -> Result<Option<Player>, ServiceError> {
        self.repo.find_by_id(id).await
    }

    /// Check a create request and turn it into an unsaved row with the
    /// derived fields filled in.
    pub fn validate_for_create(input: &PlayerInput) -> Result<Draft, ServiceError> {
        let name = input.name.as_deref().ok_or_else(|| missing("name"))?;
        rules::validate_name(name)?;
        let title = input.title.as_deref().ok_or_else(|| missing("title"))?;
        rules::validate_title(title)?;
        let race = input.race.ok_or_else(|| missing("race"))?;
        let profession = input.profession.ok_or_else(|| missing("profession"))?;
        let birthday = rules::validate_birthday(input.birthday.ok_or_else(|| missing("birthday"))?)?;
        let experience = input.experience.ok_or_else(|| missing("experience"))?;
        rules::validate_experience(experience)?;

        let mut draft = Draft {
            id: None,
            name: name.to_string(),
            title: title.to_string(),
            race,
            profession,
            birthday,
            experience,
            level: 0,
            until_next_level: 0,
            banned: input.banned.unwrap_or(false),
        };
        draft.set_experience(experience);
        Ok(draft)
    }

    /// Validate and persist a new player.
    ///
    /// # Examples
    /// ```
    /// use service::player::{PlayerService, PlayerInput, repository::mock::InMemoryPlayerRepository};
    /// use service::player::domain::{Race, Profession};
    /// use std::sync::Arc;
    /// let svc = PlayerService::new(Arc::new(InMemoryPlayerRepository::default()));
    /// let input = PlayerInput {
    ///     name: Some("Ragnar".into()),
    ///     title: Some("Jarl".into()),
    ///     race: Some(Race::Human),
    ///     profession: Some(Profession::Warrior),
    ///     birthday: Some(1_262_304_000_000),
    ///     experience: Some(1000),
    ///     banned: None,
    /// };
    /// let player = tokio_test::block_on(svc.create(input)).unwrap();
    /// assert_eq!(player.id, 1);
    /// assert_eq!(player.level, 4);
    /// assert_eq!(player.until_next_level, 500);
    /// ```
    #[instrument(skip(self, input), fields(name = ?input.name))]
    pub async fn create(&self, input: PlayerInput) -> Result<Player, ServiceError> {
        let draft = Self::validate_for_create(&input)?;
        let player = self.repo.save(draft).await?;
        info!(player_id = player.id, level = player.level, "player_created");
        Ok(player)
    }

    /// Partial update. Every supplied field is checked before any is
    /// applied, so a rejected update leaves the record untouched.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: i64, patch: PlayerInput) -> Result<Player, ServiceError> {
        let current = self.repo.find_by_id(id).await?.ok_or_else(|| ServiceError::not_found("player"))?;

        if let Some(name) = patch.name.as_deref() { rules::validate_name(name)?; }
        if let Some(title) = patch.title.as_deref() { rules::validate_title(title)?; }
        let birthday = patch.birthday.map(rules::validate_birthday).transpose()?;
        if let Some(exp) = patch.experience { rules::validate_experience(exp)?; }

        let mut draft: Draft = current.into();
        if let Some(name) = patch.name { draft.name = name; }
        if let Some(title) = patch.title { draft.title = title; }
        if let Some(race) = patch.race { draft.race = race; }
        if let Some(profession) = patch.profession { draft.profession = profession; }
        if let Some(b) = birthday { draft.birthday = b; }
        if let Some(b) = patch.banned { draft.banned = b; }
        if let Some(exp) = patch.experience { draft.set_experience(exp); }

        let player = self.repo.save(draft).await?;
        info!(player_id = player.id, "player_updated");
        Ok(player)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        if !self.repo.delete_by_id(id).await? {
            return Err(ServiceError::not_found("player"));
        }
        info!(player_id = id, "player_deleted");
        Ok(())
    }
}

fn missing(field: &str) -> ServiceError {
    ServiceError::Validation(format!("{field} is required"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::domain::{Profession, Race};
    use crate::player::repository::mock::InMemoryPlayerRepository;

    const Y2010: i64 = 1_262_304_000_000;
    /// 0050-01-01
    const Y0050: i64 = -60_589_296_000_000;

    fn svc() -> PlayerService<InMemoryPlayerRepository> {
        PlayerService::new(Arc::new(InMemoryPlayerRepository::default()))
    }

    fn valid(name: &str) -> PlayerInput {
        PlayerInput {
            name: Some(name.into()),
            title: Some("Wanderer".into()),
            race: Some(Race::Orc),
            profession: Some(Profession::Rogue),
            birthday: Some(Y2010),
            experience: Some(1000),
            banned: None,
        }
    }

    #[tokio::test]
    async fn create_computes_derived_fields_and_defaults_banned() {
        let s = svc();
        let p = s.create(PlayerInput { experience: Some(0), ..valid("Azog") }).await.unwrap();
        assert_eq!(p.id, 1);
        assert_eq!(p.level, 0);
        assert_eq!(p.until_next_level, 100);
        assert!(!p.banned);
    }

    #[test]
    fn create_requires_every_field_but_banned() {
        let base = valid("Bolg");
        let cases = [
            PlayerInput { name: None, ..base.clone() },
            PlayerInput { title: None, ..base.clone() },
            PlayerInput { race: None, ..base.clone() },
            PlayerInput { profession: None, ..base.clone() },
            PlayerInput { birthday: None, ..base.clone() },
            PlayerInput { experience: None, ..base.clone() },
        ];
        for case in cases {
            let err = PlayerService::<InMemoryPlayerRepository>::validate_for_create(&case).unwrap_err();
            assert!(err.is_validation(), "{case:?}");
        }
        assert!(PlayerService::<InMemoryPlayerRepository>::validate_for_create(&base).is_ok());
    }

    #[test]
    fn create_rejects_out_of_range_values() {
        type S = PlayerService<InMemoryPlayerRepository>;
        assert!(S::validate_for_create(&PlayerInput { name: Some(String::new()), ..valid("x") }).is_err());
        assert!(S::validate_for_create(&valid("Thirteen_char")).is_err());
        assert!(S::validate_for_create(&PlayerInput { title: Some("t".repeat(31)), ..valid("x") }).is_err());
        assert!(S::validate_for_create(&PlayerInput { experience: Some(-1), ..valid("x") }).is_err());
        assert!(S::validate_for_create(&PlayerInput { experience: Some(10_000_001), ..valid("x") }).is_err());
        assert!(S::validate_for_create(&PlayerInput { birthday: Some(Y0050), ..valid("x") }).is_err());
    }

    #[tokio::test]
    async fn rejected_create_stores_nothing() {
        let repo = Arc::new(InMemoryPlayerRepository::default());
        let s = PlayerService::new(repo.clone());
        assert!(s.create(PlayerInput { birthday: Some(Y0050), ..valid("x") }).await.is_err());
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn update_with_subset_leaves_other_fields() {
        let s = svc();
        let p = s.create(valid("Gothmog")).await.unwrap();
        let u = s.update(p.id, PlayerInput { title: Some("Lieutenant".into()), ..Default::default() }).await.unwrap();
        assert_eq!(u.title, "Lieutenant");
        assert_eq!(u.name, p.name);
        assert_eq!(u.race, p.race);
        assert_eq!(u.profession, p.profession);
        assert_eq!(u.birthday, p.birthday);
        assert_eq!(u.experience, p.experience);
        assert_eq!(u.level, p.level);
        assert_eq!(u.banned, p.banned);
    }

    #[tokio::test]
    async fn update_experience_recomputes_level() {
        let s = svc();
        let p = s.create(valid("Shagrat")).await.unwrap();
        let u = s.update(p.id, PlayerInput { experience: Some(300), ..Default::default() }).await.unwrap();
        assert_eq!((u.level, u.until_next_level), (2, 300));
    }

    #[tokio::test]
    async fn failed_update_applies_nothing() {
        let s = svc();
        let p = s.create(valid("Gorbag")).await.unwrap();
        let err = s
            .update(p.id, PlayerInput { title: Some("Captain".into()), birthday: Some(Y0050), ..Default::default() })
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(s.get(p.id).await.unwrap().unwrap(), p);

        let err = s
            .update(p.id, PlayerInput { name: Some(String::new()), ..Default::default() })
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(s.get(p.id).await.unwrap().unwrap(), p);
    }

    #[tokio::test]
    async fn update_missing_player_is_not_found() {
        let s = svc();
        let err = s.update(42, PlayerInput::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn list_filters_sorts_and_pages() {
        let s = svc();
        for (name, exp) in [("Eve", 50), ("Dan", 40), ("Cat", 30), ("Bob", 20), ("Ann", 10)] {
            s.create(PlayerInput { experience: Some(exp), ..valid(name) }).await.unwrap();
        }
        let all = PlayerFilter::default();
        let first = s.list(&all, PlayerOrder::Name, Pagination { page: 0, per_page: 2 }).await.unwrap();
        assert_eq!(first.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(), vec!["Ann", "Bob"]);
        let last = s.list(&all, PlayerOrder::Name, Pagination { page: 2, per_page: 2 }).await.unwrap();
        assert_eq!(last.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(), vec!["Eve"]);
        let beyond = s.list(&all, PlayerOrder::Name, Pagination { page: 3, per_page: 2 }).await.unwrap();
        assert!(beyond.is_empty());

        let f = PlayerFilter { min_experience: Some(20), ..Default::default() };
        let by_exp = s.list(&f, PlayerOrder::Experience, Pagination { page: 0, per_page: 10 }).await.unwrap();
        assert_eq!(by_exp.iter().map(|p| p.experience).collect::<Vec<_>>(), vec![30, 40, 50]);
        assert_eq!(s.count(&f).await.unwrap(), 3);
        assert_eq!(s.count(&all).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn delete_removes_permanently() {
        let s = svc();
        let p = s.create(valid("Lurtz")).await.unwrap();
        s.delete(p.id).await.unwrap();
        assert!(s.get(p.id).await.unwrap().is_none());
        assert!(matches!(s.delete(p.id).await, Err(ServiceError::NotFound(_))));
    }

    #[test]
    fn id_must_be_positive() {
        assert!(!PlayerService::<InMemoryPlayerRepository>::is_valid_id(0));
        assert!(!PlayerService::<InMemoryPlayerRepository>::is_valid_id(-3));
        assert!(PlayerService::<InMemoryPlayerRepository>::is_valid_id(1));
    }
}
