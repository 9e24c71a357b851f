use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// SeaORM entity for the `specialties` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "specialties")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::guide_specialties::Entity")]
    GuideSpecialties,
}

impl Related<super::guide_specialties::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GuideSpecialties.def()
    }
}

impl Related<super::guides::Entity> for Entity {
    fn to() -> RelationDef {
        super::guide_specialties::Relation::Guide.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::guide_specialties::Relation::Specialty.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
