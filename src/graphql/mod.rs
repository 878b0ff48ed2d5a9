//! GraphQL surface over the movie store.
//!
//! Queries and mutations each make exactly one store call. Expected failures
//! (missing rows, taken ids) come back as data; everything else is logged and
//! returned as a GraphQL error.
//!
//! Root fields and their payload objects are non-null: every resolver returns
//! an object, and a missing movie shows up as a null `movie` inside it.

mod errors;
mod mutation;
mod query;
pub mod types;

use async_graphql::{EmptySubscription, Schema, extensions::Tracing};

pub use mutation::Mutation;
pub use query::Query;

use crate::store::MovieStore;

pub type MovieSchema = Schema<Query, Mutation, EmptySubscription>;

pub fn build_schema(store: MovieStore, depth: usize, complexity: usize) -> MovieSchema {
    Schema::build(Query::default(), Mutation::default(), EmptySubscription)
        .extension(Tracing)
        .limit_depth(depth)
        .limit_complexity(complexity)
        .data(store)
        .finish()
}
