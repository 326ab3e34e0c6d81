use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::Record;
use crate::domain::{KeyKind, Keyed};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "avaliacao")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub score: i64,
    pub comment: Option<String>,
    /// Author of the evaluation
    pub usuario_cpf: String,
    /// Evaluated startup
    pub startup_cnpj: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::usuario::Entity",
        from = "Column::UsuarioCpf",
        to = "super::usuario::Column::Cpf",
        on_delete = "Restrict"
    )]
    Usuario,
    #[sea_orm(
        belongs_to = "super::startup::Entity",
        from = "Column::StartupCnpj",
        to = "super::startup::Column::Cnpj",
        on_delete = "Restrict"
    )]
    Startup,
}

impl Related<super::usuario::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Usuario.def()
    }
}

impl Related<super::startup::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Startup.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAvaliacaoRequest {
    pub score: i64,
    pub comment: Option<String>,
    pub usuario_cpf: String,
    pub startup_cnpj: String,
}

impl Model {
    /// New, not yet persisted evaluation; the store assigns the id.
    pub fn create(request: CreateAvaliacaoRequest) -> Self {
        Self {
            id: 0,
            score: request.score,
            comment: request.comment,
            usuario_cpf: request.usuario_cpf,
            startup_cnpj: request.startup_cnpj,
        }
    }

    pub fn apply(&mut self, request: CreateAvaliacaoRequest) {
        self.score = request.score;
        self.comment = request.comment;
        self.usuario_cpf = request.usuario_cpf;
        self.startup_cnpj = request.startup_cnpj;
    }
}

impl Keyed for Model {
    type Key = i64;

    const NAME: &'static str = "avaliacao";
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
            score: Set(self.score),
            comment: Set(self.comment),
            usuario_cpf: Set(self.usuario_cpf),
            startup_cnpj: Set(self.startup_cnpj),
        }
    }

    fn into_update(self) -> ActiveModel {
        ActiveModel {
            id: Unchanged(self.id),
            ..self.into_insert()
        }
    }
}
