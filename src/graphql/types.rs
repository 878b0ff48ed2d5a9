use async_graphql::{Enum, ID, InputObject, MaybeUndefined, SimpleObject, Union};

use crate::{entities::movie, models::TitleFilter};

#[derive(Clone, Debug, SimpleObject)]
pub struct Movie {
    pub id: ID,
    pub title: String,
    pub description: Option<String>,
    pub release_year: Option<i32>,
    /// Running time in minutes.
    pub duration: Option<i32>,
    pub rating: Option<f64>,
    pub like_count: i32,
    pub dislike_count: i32,
}

impl From<movie::Model> for Movie {
    fn from(m: movie::Model) -> Self {
        Self {
            id: ID::from(m.id.to_string()),
            title: m.title,
            description: m.description,
            release_year: m.release_year,
            duration: m.duration,
            rating: m.rating,
            like_count: m.like_count,
            dislike_count: m.dislike_count,
        }
    }
}

#[derive(Debug, SimpleObject)]
pub struct MovieList {
    pub items: Vec<Movie>,
}

#[derive(Debug, Default, InputObject)]
pub struct StringFilter {
    pub contains: Option<String>,
    pub starts_with: Option<String>,
}

#[derive(Debug, Default, InputObject)]
pub struct MovieFilter {
    pub title: Option<StringFilter>,
}

impl From<MovieFilter> for TitleFilter {
    fn from(filter: MovieFilter) -> Self {
        let title = filter.title.unwrap_or_default();
        Self { contains: title.contains, starts_with: title.starts_with }
    }
}

// ============================================================================
// Mutation inputs
// ============================================================================

#[derive(Debug, InputObject)]
pub struct CreateMovieInput {
    /// Assigned by the store when omitted.
    pub id: Option<ID>,
    pub title: String,
    pub description: Option<String>,
    pub release_year: Option<i32>,
    pub duration: Option<i32>,
    pub rating: Option<f64>,
}

/// Fields left out are not touched; `null` clears a nullable field.
#[derive(Debug, InputObject)]
pub struct UpdateMovieInput {
    pub id: ID,
    pub title: MaybeUndefined<String>,
    pub description: MaybeUndefined<String>,
    pub release_year: MaybeUndefined<i32>,
    pub duration: MaybeUndefined<i32>,
    pub rating: MaybeUndefined<f64>,
    pub like_count: MaybeUndefined<i32>,
    pub dislike_count: MaybeUndefined<i32>,
}

#[derive(Debug, InputObject)]
pub struct DeleteMovieInput {
    pub id: ID,
}

#[derive(Debug, InputObject)]
pub struct LikeMovieInput {
    pub id: ID,
}

#[derive(Debug, InputObject)]
pub struct DislikeMovieInput {
    pub id: ID,
}

// ============================================================================
// Payloads
// ============================================================================

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
#[graphql(rename_items = "PascalCase")]
pub enum Status {
    Success,
    Fail,
}

#[derive(Clone, Debug, SimpleObject)]
pub struct IdentifierAlreadyExistsProblem {
    pub message: String,
}

impl Default for IdentifierAlreadyExistsProblem {
    fn default() -> Self {
        Self { message: "Identifier already exists.".to_string() }
    }
}

/// Client-actionable reasons a `createMovie` call did not insert anything.
#[derive(Clone, Debug, Union)]
pub enum CreateMovieProblems {
    IdentifierAlreadyExists(IdentifierAlreadyExistsProblem),
}

#[derive(Debug, SimpleObject)]
pub struct CreateMoviePayload {
    pub status: Status,
    pub movie: Option<Movie>,
    pub errors: Option<Vec<CreateMovieProblems>>,
}

impl CreateMoviePayload {
    pub fn success(movie: Movie) -> Self {
        Self { status: Status::Success, movie: Some(movie), errors: None }
    }

    pub fn fail(errors: Vec<CreateMovieProblems>) -> Self {
        Self { status: Status::Fail, movie: None, errors: Some(errors) }
    }
}

#[derive(Debug, SimpleObject)]
pub struct DeleteMoviePayload {
    pub movie: Option<Movie>,
}

#[derive(Debug, SimpleObject)]
pub struct UpdateMoviePayload {
    pub movie: Option<Movie>,
}

#[derive(Debug, SimpleObject)]
pub struct LikeMoviePayload {
    pub movie: Option<Movie>,
}

#[derive(Debug, SimpleObject)]
pub struct DislikeMoviePayload {
    pub movie: Option<Movie>,
}
