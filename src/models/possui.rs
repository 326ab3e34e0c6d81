use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::Record;
use crate::domain::{KeyKind, Keyed};

/// Join row linking a startup to one of its skills
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "possui")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub startup_cnpj: String,
    pub habilidade_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::startup::Entity",
        from = "Column::StartupCnpj",
        to = "super::startup::Column::Cnpj",
        on_delete = "Restrict"
    )]
    Startup,
    #[sea_orm(
        belongs_to = "super::habilidade::Entity",
        from = "Column::HabilidadeId",
        to = "super::habilidade::Column::Id",
        on_delete = "Restrict"
    )]
    Habilidade,
}

impl Related<super::startup::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Startup.def()
    }
}

impl Related<super::habilidade::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Habilidade.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePossuiRequest {
    pub startup_cnpj: String,
    pub habilidade_id: i64,
}

impl Model {
    pub fn create(request: CreatePossuiRequest) -> Self {
        Self {
            id: 0,
            startup_cnpj: request.startup_cnpj,
            habilidade_id: request.habilidade_id,
        }
    }

    pub fn apply(&mut self, request: CreatePossuiRequest) {
        self.startup_cnpj = request.startup_cnpj;
        self.habilidade_id = request.habilidade_id;
    }
}

impl Keyed for Model {
    type Key = i64;

    const NAME: &'static str = "possui";
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
            startup_cnpj: Set(self.startup_cnpj),
            habilidade_id: Set(self.habilidade_id),
        }
    }

    fn into_update(self) -> ActiveModel {
        ActiveModel {
            id: Unchanged(self.id),
            ..self.into_insert()
        }
    }
}
