use async_graphql::{Error, ErrorExtensions, ID, MaybeUndefined, Result};

use crate::{
    entities::movie,
    error::{StoreError, StoreResult},
};

pub fn bad_user_input(message: impl Into<String>) -> Error {
    let message: String = message.into();
    Error::new(message).extend_with(|_, e| e.set("code", "BAD_USER_INPUT"))
}

/// Logs a store failure the resolver cannot recover from and turns it into a GraphQL error.
pub fn unexpected(operation: &'static str, err: StoreError) -> Error {
    tracing::error!(operation, error = %err, "store call failed");
    Error::new(err.to_string()).extend_with(|_, e| e.set("code", "INTERNAL_SERVER_ERROR"))
}

/// Like [`unexpected`], except a saturated counter is the caller's problem and is not logged.
pub fn counter_failure(operation: &'static str, err: StoreError) -> Error {
    match err {
        StoreError::CounterSaturated { .. } => {
            Error::new(err.to_string()).extend_with(|_, e| e.set("code", "COUNTER_SATURATED"))
        }
        err => unexpected(operation, err),
    }
}

pub fn parse_id(id: &ID) -> Result<i32> {
    id.parse::<i32>().map_err(|_| bad_user_input(format!("invalid movie id {:?}", id.as_str())))
}

/// Missing rows are an expected outcome for mutations that target an id.
pub fn found_or_none(res: StoreResult<movie::Model>) -> StoreResult<Option<movie::Model>> {
    match res {
        Ok(movie) => Ok(Some(movie)),
        Err(StoreError::NotFound) => Ok(None),
        Err(err) => Err(err),
    }
}

pub fn nullable<T>(value: MaybeUndefined<T>) -> Option<Option<T>> {
    match value {
        MaybeUndefined::Undefined => None,
        MaybeUndefined::Null => Some(None),
        MaybeUndefined::Value(v) => Some(Some(v)),
    }
}

pub fn non_nullable<T>(field: &str, value: MaybeUndefined<T>) -> Result<Option<T>> {
    match value {
        MaybeUndefined::Undefined => Ok(None),
        MaybeUndefined::Null => Err(bad_user_input(format!("{field} cannot be null"))),
        MaybeUndefined::Value(v) => Ok(Some(v)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numeric_ids() {
        assert_eq!(parse_id(&ID::from("42")).unwrap(), 42);
    }

    #[test]
    fn rejects_malformed_ids() {
        for raw in ["", "abc", "4.2", "99999999999"] {
            let err = parse_id(&ID::from(raw)).unwrap_err();
            assert!(err.message.starts_with("invalid movie id"), "{raw}: {}", err.message);
        }
    }

    #[test]
    fn null_on_required_field_is_rejected() {
        assert!(non_nullable::<String>("title", MaybeUndefined::Null).is_err());
        assert_eq!(non_nullable::<i32>("likeCount", MaybeUndefined::Undefined).unwrap(), None);
        assert_eq!(non_nullable("likeCount", MaybeUndefined::Value(3)).unwrap(), Some(3));
    }

    #[test]
    fn nullable_keeps_null_and_absent_apart() {
        assert_eq!(nullable::<i32>(MaybeUndefined::Undefined), None);
        assert_eq!(nullable::<i32>(MaybeUndefined::Null), Some(None));
        assert_eq!(nullable(MaybeUndefined::Value(1)), Some(Some(1)));
    }

    #[test]
    fn saturated_counter_has_its_own_code() {
        let code = |err: Error| serde_json::to_value(&err.extensions).unwrap()["code"].clone();

        let err = counter_failure("likeMovie", StoreError::CounterSaturated { counter: "like" });
        assert_eq!(code(err), "COUNTER_SATURATED");

        let err = counter_failure("likeMovie", StoreError::UniqueViolation { columns: vec![] });
        assert_eq!(code(err), "INTERNAL_SERVER_ERROR");
    }

    #[test]
    fn not_found_becomes_none() {
        assert!(matches!(found_or_none(Err(StoreError::NotFound)), Ok(None)));
        assert!(found_or_none(Err(StoreError::UniqueViolation { columns: vec![] })).is_err());
    }
}
