use async_graphql::{Context, ID, Object, Result};

use super::{
    errors::{parse_id, unexpected},
    types::{Movie, MovieFilter, MovieList},
};
use crate::{models::TitleFilter, store::MovieStore};

#[derive(Default)]
pub struct Query;

#[Object]
impl Query {
    /// Movies whose title satisfies every predicate in `filter`, or all movies without one.
    async fn find_movies(
        &self,
        ctx: &Context<'_>,
        filter: Option<MovieFilter>,
    ) -> Result<MovieList> {
        let store = ctx.data_unchecked::<MovieStore>();
        let filter = filter.map(TitleFilter::from).unwrap_or_default();

        let items = store.find_many(&filter).await.map_err(|e| unexpected("findMovies", e))?;

        Ok(MovieList { items: items.into_iter().map(Movie::from).collect() })
    }

    async fn get_movie(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Movie>> {
        let store = ctx.data_unchecked::<MovieStore>();
        let id = parse_id(&id)?;

        let movie = store.find_by_id(id).await.map_err(|e| unexpected("getMovie", e))?;
        Ok(movie.map(Movie::from))
    }
}
