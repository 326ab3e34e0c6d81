use sea_orm::ActiveValue::{Set, Unchanged};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::Record;
use crate::domain::{KeyKind, Keyed};

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    #[sea_orm(string_value = "USER")]
    User,
    #[sea_orm(string_value = "ADMIN")]
    Admin,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "usuario")]
pub struct Model {
    /// National ID (CPF), supplied by the caller
    #[sea_orm(primary_key, auto_increment = false)]
    pub cpf: String,
    pub name: String,
    pub email: String,
    /// Argon2 PHC string, never the plain password
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub phone: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::startup::Entity")]
    Startup,
    #[sea_orm(has_many = "super::avaliacao::Entity")]
    Avaliacao,
}

impl Related<super::startup::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Startup.def()
    }
}

impl Related<super::avaliacao::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Avaliacao.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Validated input for creating or updating a user
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUsuarioRequest {
    pub cpf: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub phone: Option<String>,
}

impl Model {
    /// Builds a user from validated input; `password_hash` is already hashed.
    pub fn create(request: CreateUsuarioRequest, password_hash: String) -> Self {
        Self {
            cpf: request.cpf,
            name: request.name,
            email: request.email,
            password_hash,
            role: request.role,
            phone: request.phone,
        }
    }

    /// Overwrites every mutable attribute. The CPF is identity and is kept.
    pub fn apply(&mut self, request: CreateUsuarioRequest, password_hash: String) {
        self.name = request.name;
        self.email = request.email;
        self.password_hash = password_hash;
        self.role = request.role;
        self.phone = request.phone;
    }
}

impl Keyed for Model {
    type Key = String;

    const NAME: &'static str = "usuario";
    const KIND: KeyKind = KeyKind::Natural;

    fn key(&self) -> String {
        self.cpf.clone()
    }

    fn has_key(&self) -> bool {
        !self.cpf.trim().is_empty()
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
            cpf: Set(self.cpf),
            name: Set(self.name),
            email: Set(self.email),
            password_hash: Set(self.password_hash),
            role: Set(self.role),
            phone: Set(self.phone),
        }
    }

    fn into_update(self) -> ActiveModel {
        let cpf = self.cpf.clone();
        ActiveModel {
            cpf: Unchanged(cpf),
            ..self.into_insert()
        }
    }
}
