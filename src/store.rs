use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set, TransactionTrait,
    sea_query::{Expr, LikeExpr},
};

use crate::{
    entities::movie,
    error::{StoreError, StoreResult},
    models::{Counter, MovieChanges, NewMovie, TitleFilter},
};

const LIKE_ESCAPE: char = '\\';

#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn ping(&self) -> StoreResult<()> {
        self.db.ping().await?;
        Ok(())
    }

    pub async fn close(self) -> StoreResult<()> {
        self.db.close().await?;
        Ok(())
    }

    pub async fn find_many(&self, filter: &TitleFilter) -> StoreResult<Vec<movie::Model>> {
        let mut query = movie::Entity::find();

        if let Some(needle) = &filter.contains {
            let pattern = format!("%{}%", escape_like(needle));
            query = query.filter(title_like(pattern));
        }
        if let Some(prefix) = &filter.starts_with {
            let pattern = format!("{}%", escape_like(prefix));
            query = query.filter(title_like(pattern));
        }

        let movies = query.order_by_asc(movie::Column::Id).all(&self.db).await?;
        Ok(movies)
    }

    pub async fn find_by_id(&self, id: i32) -> StoreResult<Option<movie::Model>> {
        let movie = movie::Entity::find_by_id(id).one(&self.db).await?;
        Ok(movie)
    }

    pub async fn create(&self, new: NewMovie) -> StoreResult<movie::Model> {
        let model = movie::ActiveModel {
            id: new.id.map_or(NotSet, Set),
            title: Set(new.title),
            description: Set(new.description),
            release_year: Set(new.release_year),
            duration: Set(new.duration),
            rating: Set(new.rating),
            like_count: NotSet,
            dislike_count: NotSet,
        };

        let movie = model.insert(&self.db).await?;
        tracing::debug!(id = movie.id, "movie created");
        Ok(movie)
    }

    pub async fn update(&self, id: i32, changes: MovieChanges) -> StoreResult<movie::Model> {
        let mut model: movie::ActiveModel = Default::default();
        if let Some(title) = changes.title {
            model.title = Set(title);
        }
        if let Some(description) = changes.description {
            model.description = Set(description);
        }
        if let Some(release_year) = changes.release_year {
            model.release_year = Set(release_year);
        }
        if let Some(duration) = changes.duration {
            model.duration = Set(duration);
        }
        if let Some(rating) = changes.rating {
            model.rating = Set(rating);
        }
        if let Some(like_count) = changes.like_count {
            model.like_count = Set(like_count);
        }
        if let Some(dislike_count) = changes.dislike_count {
            model.dislike_count = Set(dislike_count);
        }

        if !model.is_changed() {
            return self.find_by_id(id).await?.ok_or(StoreError::NotFound);
        }

        let movie = movie::Entity::update_many()
            .set(model)
            .filter(movie::Column::Id.eq(id))
            .exec_with_returning(&self.db)
            .await?
            .into_iter()
            .next()
            .ok_or(StoreError::NotFound)?;

        tracing::debug!(id, "movie updated");
        Ok(movie)
    }

    pub async fn delete(&self, id: i32) -> StoreResult<movie::Model> {
        let txn = self.db.begin().await?;

        let movie = movie::Entity::find_by_id(id).one(&txn).await?.ok_or(StoreError::NotFound)?;
        movie::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        tracing::debug!(id, "movie deleted");
        Ok(movie)
    }

    /// Adds one to the counter with a single `SET c = c + 1 ... RETURNING` statement.
    /// A counter already at `i32::MAX` is left alone and reported as saturated.
    pub async fn increment(&self, id: i32, counter: Counter) -> StoreResult<movie::Model> {
        let column = match counter {
            Counter::Like => movie::Column::LikeCount,
            Counter::Dislike => movie::Column::DislikeCount,
        };

        let updated = movie::Entity::update_many()
            .col_expr(column, Expr::col(column).add(1))
            .filter(movie::Column::Id.eq(id))
            .filter(column.lt(i32::MAX))
            .exec_with_returning(&self.db)
            .await?
            .into_iter()
            .next();

        match updated {
            Some(movie) => {
                tracing::debug!(id, counter = counter.as_str(), "movie counter incremented");
                Ok(movie)
            }
            // Nothing matched: either the row is gone or the guard held.
            None => match self.find_by_id(id).await? {
                Some(_) => Err(StoreError::CounterSaturated { counter: counter.as_str() }),
                None => Err(StoreError::NotFound),
            },
        }
    }
}

fn title_like(pattern: String) -> sea_orm::sea_query::SimpleExpr {
    Expr::col(movie::Column::Title).like(LikeExpr::new(pattern).escape(LIKE_ESCAPE))
}

/// Makes `%`, `_` and the escape character match literally inside a LIKE pattern.
fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c == '%' || c == '_' || c == LIKE_ESCAPE {
            out.push(LIKE_ESCAPE);
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::db;

    async fn store() -> MovieStore {
        MovieStore::new(db::connect_and_migrate("sqlite::memory:").await.unwrap())
    }

    fn new_movie(title: &str) -> NewMovie {
        NewMovie {
            id: None,
            title: title.to_string(),
            description: None,
            release_year: None,
            duration: None,
            rating: None,
        }
    }

    fn titles(movies: &[movie::Model]) -> Vec<&str> {
        movies.iter().map(|m| m.title.as_str()).collect()
    }

    #[test]
    fn escapes_like_metacharacters() {
        assert_eq!(escape_like("100% real_deal"), "100\\% real\\_deal");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[tokio::test]
    async fn filters_combine_with_and() {
        let store = store().await;
        for title in ["War Games", "Star Wars", "Warrior", "Alien"] {
            store.create(new_movie(title)).await.unwrap();
        }

        let all = store.find_many(&TitleFilter::default()).await.unwrap();
        assert_eq!(titles(&all), vec!["War Games", "Star Wars", "Warrior", "Alien"]);

        let contains = TitleFilter { contains: Some("war".into()), starts_with: None };
        let found = store.find_many(&contains).await.unwrap();
        assert_eq!(titles(&found), vec!["War Games", "Star Wars", "Warrior"]);

        let both = TitleFilter { contains: Some("game".into()), starts_with: Some("War".into()) };
        let found = store.find_many(&both).await.unwrap();
        assert_eq!(titles(&found), vec!["War Games"]);
    }

    #[tokio::test]
    async fn wildcards_in_filter_match_literally() {
        let store = store().await;
        store.create(new_movie("100% Wolf")).await.unwrap();
        store.create(new_movie("1000 Wolves")).await.unwrap();

        let filter = TitleFilter { contains: Some("0%".into()), starts_with: None };
        let found = store.find_many(&filter).await.unwrap();
        assert_eq!(titles(&found), vec!["100% Wolf"]);
    }

    #[tokio::test]
    async fn create_with_taken_id_is_unique_violation() {
        let store = store().await;
        let first = store.create(NewMovie { id: Some(7), ..new_movie("Heat") }).await.unwrap();
        assert_eq!(first.id, 7);
        assert_eq!(first.like_count, 0);

        let err = store.create(NewMovie { id: Some(7), ..new_movie("Ronin") }).await.unwrap_err();
        assert!(err.is_unique_violation_on("id"), "unexpected error: {err}");

        let kept = store.find_by_id(7).await.unwrap().unwrap();
        assert_eq!(kept.title, "Heat");
    }

    #[tokio::test]
    async fn update_leaves_absent_columns_alone() {
        let store = store().await;
        let created = store
            .create(NewMovie {
                description: Some("heist".into()),
                rating: Some(8.3),
                ..new_movie("Heat")
            })
            .await
            .unwrap();

        let changes = MovieChanges {
            release_year: Some(Some(1995)),
            rating: Some(None),
            ..Default::default()
        };
        let updated = store.update(created.id, changes).await.unwrap();

        assert_eq!(updated.title, "Heat");
        assert_eq!(updated.description.as_deref(), Some("heist"));
        assert_eq!(updated.release_year, Some(1995));
        assert_eq!(updated.rating, None);
    }

    #[tokio::test]
    async fn empty_update_returns_current_row() {
        let store = store().await;
        let created = store.create(new_movie("Heat")).await.unwrap();

        let same = store.update(created.id, MovieChanges::default()).await.unwrap();
        assert_eq!(same, created);

        let missing = store.update(999, MovieChanges::default()).await.unwrap_err();
        assert!(matches!(missing, StoreError::NotFound));
    }

    #[tokio::test]
    async fn missing_rows_are_not_found() {
        let store = store().await;

        let changes = MovieChanges { title: Some("x".into()), ..Default::default() };
        assert!(matches!(store.update(1, changes).await, Err(StoreError::NotFound)));
        assert!(matches!(store.delete(1).await, Err(StoreError::NotFound)));
        assert!(matches!(store.increment(1, Counter::Like).await, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn increments_touch_only_their_counter() {
        let store = store().await;
        let created = store.create(new_movie("Heat")).await.unwrap();

        store.increment(created.id, Counter::Like).await.unwrap();
        store.increment(created.id, Counter::Like).await.unwrap();
        let movie = store.increment(created.id, Counter::Dislike).await.unwrap();

        assert_eq!(movie.like_count, 2);
        assert_eq!(movie.dislike_count, 1);
    }

    #[tokio::test]
    async fn saturated_counter_is_left_unchanged() {
        let store = store().await;
        let created = store.create(new_movie("Heat")).await.unwrap();
        let changes = MovieChanges { like_count: Some(i32::MAX), ..Default::default() };
        store.update(created.id, changes).await.unwrap();

        let err = store.increment(created.id, Counter::Like).await.unwrap_err();
        assert!(matches!(err, StoreError::CounterSaturated { counter: "like" }), "{err}");

        let kept = store.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(kept.like_count, i32::MAX);

        let movie = store.increment(created.id, Counter::Dislike).await.unwrap();
        assert_eq!(movie.dislike_count, 1);
    }

    #[tokio::test]
    async fn delete_returns_removed_row() {
        let store = store().await;
        let created = store.create(new_movie("Heat")).await.unwrap();

        let deleted = store.delete(created.id).await.unwrap();
        assert_eq!(deleted, created);
        assert_eq!(store.find_by_id(created.id).await.unwrap(), None);
    }
}
