use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A recurring part of the academic year, seeded by migration
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "periods")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub period_sequence: i32,
    #[sea_orm(unique)]
    pub period_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::semester::Entity")]
    Semesters,
}

impl Related<super::semester::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Semesters.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
