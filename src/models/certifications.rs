use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// SeaORM entity for the `certifications` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "certifications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub issuing_organization: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::guide_certifications::Entity")]
    GuideCertifications,
}

impl Related<super::guide_certifications::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GuideCertifications.def()
    }
}

impl Related<super::guides::Entity> for Entity {
    fn to() -> RelationDef {
        super::guide_certifications::Relation::Guide.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::guide_certifications::Relation::Certification.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
