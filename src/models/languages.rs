use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// SeaORM entity for the `languages` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "languages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub code: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::guide_languages::Entity")]
    GuideLanguages,
}

impl Related<super::guide_languages::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GuideLanguages.def()
    }
}

impl Related<super::guides::Entity> for Entity {
    fn to() -> RelationDef {
        super::guide_languages::Relation::Guide.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::guide_languages::Relation::Language.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
