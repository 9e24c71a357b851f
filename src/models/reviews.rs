use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;
pub const DEFAULT_RATING: i32 = 5;

/// SeaORM entity for the `reviews` table. Reviews are public submissions
/// and only count once a guide or admin approves them.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub guide_id: Uuid,
    pub author_name: String,
    pub email: String,
    pub rating: i32,
    #[sea_orm(column_type = "Text")]
    pub comment: String,
    pub is_approved: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::guides::Entity",
        from = "Column::GuideId",
        to = "super::guides::Column::Id",
        on_delete = "Cascade"
    )]
    Guide,
}

impl Related<super::guides::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Guide.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Rating as posted by a form (`"4"`) or a JSON client (`4`).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RatingInput {
    Int(i64),
    Float(f64),
    Text(String),
}

/// Public review form. Everything is optional at the wire level so a bad
/// submission still gets the redirect with a message instead of a 400.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitReview {
    #[serde(alias = "author_name")]
    pub name: Option<String>,
    pub email: Option<String>,
    pub rating: Option<RatingInput>,
    pub comment: Option<String>,
}

/// A review that passed the form checks, ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub author_name: String,
    pub email: String,
    pub rating: i32,
    pub comment: String,
}

/// Missing or unreadable ratings become 5; anything else is forced into 1..=5.
pub fn clamp_rating(raw: Option<&RatingInput>) -> i32 {
    let value = match raw {
        None => return DEFAULT_RATING,
        Some(RatingInput::Int(n)) => *n,
        Some(RatingInput::Float(f)) if f.is_finite() => f.trunc() as i64,
        Some(RatingInput::Float(_)) => return DEFAULT_RATING,
        Some(RatingInput::Text(s)) => match s.trim().parse::<i64>() {
            Ok(n) => n,
            Err(_) => return DEFAULT_RATING,
        },
    };
    value.clamp(MIN_RATING as i64, MAX_RATING as i64) as i32
}

impl SubmitReview {
    /// Name and comment are required; the error is the message shown to the
    /// visitor after the redirect.
    pub fn clean(self) -> Result<NewReview, &'static str> {
        let author_name = self.name.unwrap_or_default().trim().to_string();
        let comment = self.comment.unwrap_or_default().trim().to_string();
        if author_name.is_empty() || comment.is_empty() {
            return Err("Please provide your name and a comment.");
        }
        if author_name.chars().count() > 100 {
            return Err("Name must be at most 100 characters.");
        }
        Ok(NewReview {
            rating: clamp_rating(self.rating.as_ref()),
            email: self.email.unwrap_or_default().trim().to_string(),
            author_name,
            comment,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewApproval {
    pub is_approved: bool,
}

/// Review as shown publicly (no email).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicReview {
    pub id: Uuid,
    pub author_name: String,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTimeUtc,
}

impl From<Model> for PublicReview {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            author_name: m.author_name,
            rating: m.rating,
            comment: m.comment,
            created_at: m.created_at,
        }
    }
}
