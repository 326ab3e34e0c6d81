use sea_orm::ActiveValue::{Set, Unchanged};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::Record;
use crate::domain::{KeyKind, Keyed};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "startup")]
pub struct Model {
    /// Tax ID (CNPJ), supplied by the caller
    #[sea_orm(primary_key, auto_increment = false)]
    pub cnpj: String,
    pub video: Option<String>,
    pub name: String,
    pub site: Option<String>,
    pub description: String,
    pub responsible_name: Option<String>,
    pub email: String,
    /// Owning user. Deleting that user is restricted while this row exists.
    pub usuario_cpf: String,
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
    #[sea_orm(has_many = "super::avaliacao::Entity")]
    Avaliacao,
    #[sea_orm(has_many = "super::possui::Entity")]
    Possui,
}

impl Related<super::usuario::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Usuario.def()
    }
}

impl Related<super::avaliacao::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Avaliacao.def()
    }
}

impl Related<super::possui::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Possui.def()
    }
}

// Skills are reached through the possui join table
impl Related<super::habilidade::Entity> for Entity {
    fn to() -> RelationDef {
        super::possui::Relation::Habilidade.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::possui::Relation::Startup.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateStartupRequest {
    pub cnpj: String,
    pub video: Option<String>,
    pub name: String,
    pub site: Option<String>,
    pub description: String,
    pub responsible_name: Option<String>,
    pub email: String,
    pub usuario_cpf: String,
}

impl Model {
    pub fn create(request: CreateStartupRequest) -> Self {
        Self {
            cnpj: request.cnpj,
            video: request.video,
            name: request.name,
            site: request.site,
            description: request.description,
            responsible_name: request.responsible_name,
            email: request.email,
            usuario_cpf: request.usuario_cpf,
        }
    }

    /// Overwrites every mutable attribute, owner included. The CNPJ is kept.
    pub fn apply(&mut self, request: CreateStartupRequest) {
        self.video = request.video;
        self.name = request.name;
        self.site = request.site;
        self.description = request.description;
        self.responsible_name = request.responsible_name;
        self.email = request.email;
        self.usuario_cpf = request.usuario_cpf;
    }
}

impl Keyed for Model {
    type Key = String;

    const NAME: &'static str = "startup";
    const KIND: KeyKind = KeyKind::Natural;

    fn key(&self) -> String {
        self.cnpj.clone()
    }

    fn has_key(&self) -> bool {
        !self.cnpj.trim().is_empty()
    }
}

impl Record for Model {
    type Entity = Entity;
    type ActiveModel = ActiveModel;

    fn primary_key(key: String) -> String {
        key
    }

    fn into_insert(self) -> ActiveModel {
        ActiveModel {
            cnpj: Set(self.cnpj),
            video: Set(self.video),
            name: Set(self.name),
            site: Set(self.site),
            description: Set(self.description),
            responsible_name: Set(self.responsible_name),
            email: Set(self.email),
            usuario_cpf: Set(self.usuario_cpf),
        }
    }

    fn into_update(self) -> ActiveModel {
        let cnpj = self.cnpj.clone();
        ActiveModel {
            cnpj: Unchanged(cnpj),
            ..self.into_insert()
        }
    }
}
