/// Title predicates applied by `findMovies`; both may be present at once.
#[derive(Clone, Debug, Default)]
pub struct TitleFilter {
    pub contains: Option<String>,
    pub starts_with: Option<String>,
}

#[derive(Clone, Debug)]
pub struct NewMovie {
    pub id: Option<i32>,
    pub title: String,
    pub description: Option<String>,
    pub release_year: Option<i32>,
    pub duration: Option<i32>,
    pub rating: Option<f64>,
}

/// Partial update. Outer `None` leaves the column untouched; for nullable
/// columns `Some(None)` writes NULL.
#[derive(Clone, Debug, Default)]
pub struct MovieChanges {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub release_year: Option<Option<i32>>,
    pub duration: Option<Option<i32>>,
    pub rating: Option<Option<f64>>,
    pub like_count: Option<i32>,
    pub dislike_count: Option<i32>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Counter {
    Like,
    Dislike,
}

impl Counter {
    pub fn as_str(self) -> &'static str {
        match self {
            Counter::Like => "like",
            Counter::Dislike => "dislike",
        }
    }
}
