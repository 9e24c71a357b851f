use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "guide_certifications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub guide_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub certification_id: Uuid,
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
    #[sea_orm(
        belongs_to = "super::certifications::Entity",
        from = "Column::CertificationId",
        to = "super::certifications::Column::Id",
        on_delete = "Cascade"
    )]
    Certification,
}

impl Related<super::guides::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Guide.def()
    }
}

impl Related<super::certifications::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Certification.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
