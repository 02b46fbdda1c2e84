use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub nickname: String, // empty when the student has none
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::registration::Entity")]
    Registrations,
}

impl Related<super::registration::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Registrations.def()
    }
}

impl Model {
    pub fn label(&self) -> String {
        if self.nickname.is_empty() {
            format!("{}, {}", self.last_name, self.first_name)
        } else {
            format!("{}, {} ({})", self.last_name, self.first_name, self.nickname)
        }
    }

    /// Key of the default ordering
    pub fn sort_key(&self) -> (&str, &str, &str) {
        (&self.last_name, &self.first_name, &self.nickname)
    }
}

impl ActiveModelBehavior for ActiveModel {}
