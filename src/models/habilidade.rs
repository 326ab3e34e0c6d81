use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::Record;
use crate::domain::{KeyKind, Keyed};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "habilidade")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    /// Category, e.g. "Backend"
    pub kind: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::possui::Entity")]
    Possui,
}

impl Related<super::possui::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Possui.def()
    }
}

impl Related<super::startup::Entity> for Entity {
    fn to() -> RelationDef {
        super::possui::Relation::Startup.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::possui::Relation::Habilidade.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateHabilidadeRequest {
    pub name: String,
    pub kind: String,
}

impl Model {
    pub fn create(request: CreateHabilidadeRequest) -> Self {
        Self {
            id: 0,
            name: request.name,
            kind: request.kind,
        }
    }

    pub fn apply(&mut self, request: CreateHabilidadeRequest) {
        self.name = request.name;
        self.kind = request.kind;
    }
}

impl Keyed for Model {
    type Key = i64;

    const NAME: &'static str = "habilidade";
    const KIND: KeyKind = KeyKind::Surrogate;

    fn key(&self) -> i64 {
        self.id
    }

    fn has_key(&self) -> bool {
        self.id > 0
    }
}

impl Record for Model {
    type Entity = Entity;
    type ActiveModel = ActiveModel;

    fn primary_key(key: i64) -> i64 {
        key
    }

    fn into_insert(self) -> ActiveModel {
        ActiveModel {
            id: NotSet,
            name: Set(self.name),
            kind: Set(self.kind),
        }
    }

    fn into_update(self) -> ActiveModel {
        ActiveModel {
            id: Unchanged(self.id),
            ..self.into_insert()
        }
    }
}
