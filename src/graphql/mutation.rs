use async_graphql::{Context, Object, Result};

use super::{
    errors::{counter_failure, found_or_none, non_nullable, nullable, parse_id, unexpected},
    types::*,
};
use crate::{
    models::{Counter, MovieChanges, NewMovie},
    store::MovieStore,
};

#[derive(Default)]
pub struct Mutation;

#[Object]
impl Mutation {
    /// Insert a movie. A taken `id` is reported in `errors` rather than as a GraphQL error.
    async fn create_movie(
        &self,
        ctx: &Context<'_>,
        input: CreateMovieInput,
    ) -> Result<CreateMoviePayload> {
        let store = ctx.data_unchecked::<MovieStore>();
        let id = input.id.as_ref().map(parse_id).transpose()?;

        let new = NewMovie {
            id,
            title: input.title,
            description: input.description,
            release_year: input.release_year,
            duration: input.duration,
            rating: input.rating,
        };

        match store.create(new).await {
            Ok(movie) => Ok(CreateMoviePayload::success(movie.into())),
            Err(err) if err.is_unique_violation_on("id") => {
                tracing::debug!(id = ?id, "rejected create with taken id");
                Ok(CreateMoviePayload::fail(vec![CreateMovieProblems::IdentifierAlreadyExists(
                    IdentifierAlreadyExistsProblem::default(),
                )]))
            }
            Err(err) => Err(unexpected("createMovie", err)),
        }
    }

    async fn delete_movie(
        &self,
        ctx: &Context<'_>,
        input: DeleteMovieInput,
    ) -> Result<DeleteMoviePayload> {
        let store = ctx.data_unchecked::<MovieStore>();
        let id = parse_id(&input.id)?;

        let movie = found_or_none(store.delete(id).await).map_err(|e| unexpected("deleteMovie", e))?;
        Ok(DeleteMoviePayload { movie: movie.map(Movie::from) })
    }

    /// Write every field present in `input`; absent fields keep their stored value.
    async fn update_movie(
        &self,
        ctx: &Context<'_>,
        input: UpdateMovieInput,
    ) -> Result<UpdateMoviePayload> {
        let store = ctx.data_unchecked::<MovieStore>();
        let id = parse_id(&input.id)?;

        let changes = MovieChanges {
            title: non_nullable("title", input.title)?,
            description: nullable(input.description),
            release_year: nullable(input.release_year),
            duration: nullable(input.duration),
            rating: nullable(input.rating),
            like_count: non_nullable("likeCount", input.like_count)?,
            dislike_count: non_nullable("dislikeCount", input.dislike_count)?,
        };

        let movie = found_or_none(store.update(id, changes).await)
            .map_err(|e| unexpected("updateMovie", e))?;
        Ok(UpdateMoviePayload { movie: movie.map(Movie::from) })
    }

    async fn like_movie(&self, ctx: &Context<'_>, input: LikeMovieInput) -> Result<LikeMoviePayload> {
        let store = ctx.data_unchecked::<MovieStore>();
        let id = parse_id(&input.id)?;

        let movie = found_or_none(store.increment(id, Counter::Like).await)
            .map_err(|e| counter_failure("likeMovie", e))?;
        Ok(LikeMoviePayload { movie: movie.map(Movie::from) })
    }

    async fn dislike_movie(
        &self,
        ctx: &Context<'_>,
        input: DislikeMovieInput,
    ) -> Result<DislikeMoviePayload> {
        let store = ctx.data_unchecked::<MovieStore>();
        let id = parse_id(&input.id)?;

        let movie = found_or_none(store.increment(id, Counter::Dislike).await)
            .map_err(|e| counter_failure("dislikeMovie", e))?;
        Ok(DislikeMoviePayload { movie: movie.map(Movie::from) })
    }
}
