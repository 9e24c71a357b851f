//! Languages, specialties and certifications: the shared vocabularies guides
//! pick from. New names are added through get-or-create.

use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use serde::Serialize;
use uuid::Uuid;

use crate::models::{certifications, languages, specialties};

/// Result of a get-or-create: `created` is false when the name already existed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VocabEntry {
    pub id: Uuid,
    pub name: String,
    pub created: bool,
}

pub async fn get_or_create_specialty(db: &DatabaseConnection, name: &str) -> Result<VocabEntry, DbErr> {
    let inserted = specialties::Entity::insert(specialties::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        description: Set(String::new()),
    })
    .on_conflict(OnConflict::column(specialties::Column::Name).do_nothing().to_owned())
    .exec_without_returning(db)
    .await?;

    let row = specialties::Entity::find()
        .filter(specialties::Column::Name.eq(name))
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Specialty not found".to_string()))?;
    Ok(VocabEntry {
        id: row.id,
        name: row.name,
        created: inserted > 0,
    })
}

/// `code` is only stored when the language is new.
pub async fn get_or_create_language(
    db: &DatabaseConnection,
    name: &str,
    code: &str,
) -> Result<VocabEntry, DbErr> {
    let inserted = languages::Entity::insert(languages::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        code: Set(code.to_string()),
    })
    .on_conflict(OnConflict::column(languages::Column::Name).do_nothing().to_owned())
    .exec_without_returning(db)
    .await?;

    let row = languages::Entity::find()
        .filter(languages::Column::Name.eq(name))
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Language not found".to_string()))?;
    Ok(VocabEntry {
        id: row.id,
        name: row.name,
        created: inserted > 0,
    })
}

pub async fn get_or_create_certification(
    db: &DatabaseConnection,
    name: &str,
) -> Result<VocabEntry, DbErr> {
    let inserted = certifications::Entity::insert(certifications::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        issuing_organization: Set(String::new()),
        description: Set(String::new()),
    })
    .on_conflict(OnConflict::column(certifications::Column::Name).do_nothing().to_owned())
    .exec_without_returning(db)
    .await?;

    let row = certifications::Entity::find()
        .filter(certifications::Column::Name.eq(name))
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Certification not found".to_string()))?;
    Ok(VocabEntry {
        id: row.id,
        name: row.name,
        created: inserted > 0,
    })
}

pub async fn get_all_specialties(db: &DatabaseConnection) -> Result<Vec<specialties::Model>, DbErr> {
    specialties::Entity::find()
        .order_by_asc(specialties::Column::Name)
        .all(db)
        .await
}

pub async fn get_all_languages(db: &DatabaseConnection) -> Result<Vec<languages::Model>, DbErr> {
    languages::Entity::find()
        .order_by_asc(languages::Column::Name)
        .all(db)
        .await
}

pub async fn get_all_certifications(
    db: &DatabaseConnection,
) -> Result<Vec<certifications::Model>, DbErr> {
    certifications::Entity::find()
        .order_by_asc(certifications::Column::Name)
        .all(db)
        .await
}
