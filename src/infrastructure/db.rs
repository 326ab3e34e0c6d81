use sea_orm::{
    ConnectionTrait, Database, DatabaseConnection, DbBackend, DbErr, EntityTrait,
    QuerySelect, Statement,
};

use crate::domain::DomainError;
use crate::models::{avaliacao, habilidade, possui, startup, usuario};

pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DomainError> {
    let db = Database::connect(database_url).await?;

    run_migrations(&db).await?;
    verify_schema(&db).await?;

    Ok(db)
}

async fn execute(db: &DatabaseConnection, sql: &str) -> Result<(), DbErr> {
    db.execute(Statement::from_string(db.get_database_backend(), sql.to_owned()))
        .await?;
    Ok(())
}

async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    if db.get_database_backend() == DbBackend::Sqlite {
        execute(db, "PRAGMA foreign_keys = ON").await?;
    }

    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS usuario (
            cpf TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            password_hash TEXT NOT NULL,
            role TEXT NOT NULL DEFAULT 'USER',
            phone TEXT
        )
        "#,
    )
    .await?;

    // Every foreign key is RESTRICT: a parent cannot go while children exist
    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS startup (
            cnpj TEXT PRIMARY KEY NOT NULL,
            video TEXT,
            name TEXT NOT NULL,
            site TEXT,
            description TEXT NOT NULL,
            responsible_name TEXT,
            email TEXT NOT NULL,
            usuario_cpf TEXT NOT NULL,
            FOREIGN KEY (usuario_cpf) REFERENCES usuario(cpf) ON DELETE RESTRICT
        )
        "#,
    )
    .await?;

    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS avaliacao (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            score INTEGER NOT NULL,
            comment TEXT,
            usuario_cpf TEXT NOT NULL,
            startup_cnpj TEXT NOT NULL,
            FOREIGN KEY (usuario_cpf) REFERENCES usuario(cpf) ON DELETE RESTRICT,
            FOREIGN KEY (startup_cnpj) REFERENCES startup(cnpj) ON DELETE RESTRICT
        )
        "#,
    )
    .await?;

    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS habilidade (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            kind TEXT NOT NULL
        )
        "#,
    )
    .await?;

    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS possui (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            startup_cnpj TEXT NOT NULL,
            habilidade_id INTEGER NOT NULL,
            FOREIGN KEY (startup_cnpj) REFERENCES startup(cnpj) ON DELETE RESTRICT,
            FOREIGN KEY (habilidade_id) REFERENCES habilidade(id) ON DELETE RESTRICT
        )
        "#,
    )
    .await?;

    // Foreign key columns are not indexed by SQLite on their own
    execute(db, "CREATE INDEX IF NOT EXISTS idx_startup_usuario ON startup(usuario_cpf)").await?;
    execute(db, "CREATE INDEX IF NOT EXISTS idx_avaliacao_usuario ON avaliacao(usuario_cpf)").await?;
    execute(db, "CREATE INDEX IF NOT EXISTS idx_avaliacao_startup ON avaliacao(startup_cnpj)").await?;
    execute(db, "CREATE INDEX IF NOT EXISTS idx_possui_startup ON possui(startup_cnpj)").await?;
    execute(db, "CREATE INDEX IF NOT EXISTS idx_possui_habilidade ON possui(habilidade_id)").await?;

    Ok(())
}

/// Checks that every mapped entity can be selected from its table.
///
/// A column missing from the store fails here, at start-up, instead of on
/// the first request that touches the entity.
pub async fn verify_schema(db: &DatabaseConnection) -> Result<(), DomainError> {
    check_table(db, usuario::Entity).await?;
    check_table(db, startup::Entity).await?;
    check_table(db, avaliacao::Entity).await?;
    check_table(db, habilidade::Entity).await?;
    check_table(db, possui::Entity).await?;
    Ok(())
}

async fn check_table<E: EntityTrait>(db: &DatabaseConnection, entity: E) -> Result<(), DomainError> {
    E::find()
        .limit(0)
        .all(db)
        .await
        .map(|_| ())
        .map_err(|e| DomainError::SchemaMismatch(format!("{}: {}", entity.table_name(), e)))
}
