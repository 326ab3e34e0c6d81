//! Generic repository: keys, staging, atomic commits and restrict-on-delete

use nebulohub::db;
use nebulohub::domain::{DomainError, Repository};
use nebulohub::infrastructure::SeaOrmRepository;
use nebulohub::models::habilidade::CreateHabilidadeRequest;
use nebulohub::models::{avaliacao, habilidade, possui, startup, usuario, Role};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

// Helper to create a test database
async fn setup_test_db() -> DatabaseConnection {
    db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB")
}

fn test_usuario(cpf: &str) -> usuario::Model {
    usuario::Model {
        cpf: cpf.to_string(),
        name: "Test User".to_string(),
        email: format!("{}@test.dev", cpf),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$dummy$dummy".to_string(),
        role: Role::User,
        phone: None,
    }
}

fn test_startup(cnpj: &str, owner: &str) -> startup::Model {
    startup::Model {
        cnpj: cnpj.to_string(),
        video: None,
        name: format!("Startup {}", cnpj),
        site: None,
        description: "Test startup".to_string(),
        responsible_name: None,
        email: format!("{}@startup.dev", cnpj),
        usuario_cpf: owner.to_string(),
    }
}

fn test_habilidade(name: &str) -> habilidade::Model {
    habilidade::Model::create(CreateHabilidadeRequest {
        name: name.to_string(),
        kind: "Backend".to_string(),
    })
}

// Helper to persist a user and a startup it owns
async fn create_owner_and_startup(db: &DatabaseConnection, cpf: &str, cnpj: &str) {
    let usuarios = SeaOrmRepository::<usuario::Model>::new(db.clone());
    usuarios.add(test_usuario(cpf)).unwrap();
    usuarios.save_changes().await.expect("Failed to create usuario");

    let startups = SeaOrmRepository::<startup::Model>::new(db.clone());
    startups.add(test_startup(cnpj, cpf)).unwrap();
    startups.save_changes().await.expect("Failed to create startup");
}

#[tokio::test]
async fn test_surrogate_keys_are_assigned_on_commit() {
    let db = setup_test_db().await;
    create_owner_and_startup(&db, "111", "222").await;

    let skills = SeaOrmRepository::<habilidade::Model>::new(db.clone());
    skills.add(test_habilidade("Rust")).unwrap();
    skills.add(test_habilidade("Go")).unwrap();
    let committed = skills.save_changes().await.expect("Commit failed");

    assert_eq!(committed.inserted.len(), 2);
    let first = &committed.inserted[0];
    let second = &committed.inserted[1];
    assert!(first.id > 0);
    assert_ne!(first.id, second.id);

    let found = skills.find_by_id(first.id).await.unwrap().expect("Skill not found");
    assert_eq!(found.id, first.id);
    assert_eq!(found.name, "Rust");

    let links = SeaOrmRepository::<possui::Model>::new(db.clone());
    links
        .add(possui::Model {
            id: 0,
            startup_cnpj: "222".to_string(),
            habilidade_id: first.id,
        })
        .unwrap();
    let link = links.save_changes().await.unwrap().inserted.remove(0);
    assert_eq!(links.find_by_id(link.id).await.unwrap(), Some(link.clone()));

    let reviews = SeaOrmRepository::<avaliacao::Model>::new(db.clone());
    reviews
        .add(avaliacao::Model {
            id: 0,
            score: 7,
            comment: None,
            usuario_cpf: "111".to_string(),
            startup_cnpj: "222".to_string(),
        })
        .unwrap();
    let review = reviews.save_changes().await.unwrap().inserted.remove(0);
    let found = reviews.find_by_id(review.id).await.unwrap().expect("Review not found");
    assert_eq!(found.id, review.id);
    assert_eq!(found.score, 7);
}

#[tokio::test]
async fn test_find_by_id_missing_is_none() {
    let db = setup_test_db().await;

    let skills = SeaOrmRepository::<habilidade::Model>::new(db.clone());
    assert!(skills.find_by_id(404).await.unwrap().is_none());

    let usuarios = SeaOrmRepository::<usuario::Model>::new(db.clone());
    assert!(usuarios.find_by_id("000".to_string()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_natural_key_is_a_constraint_violation() {
    let db = setup_test_db().await;

    let usuarios = SeaOrmRepository::<usuario::Model>::new(db.clone());
    usuarios.add(test_usuario("111")).unwrap();
    usuarios.save_changes().await.expect("First commit failed");

    let mut duplicate = test_usuario("111");
    duplicate.name = "Someone Else".to_string();
    usuarios.add(duplicate).unwrap();
    let err = usuarios.save_changes().await.unwrap_err();
    assert!(err.is_constraint_violation(), "unexpected error: {}", err);

    // The first row is untouched
    let stored = usuarios.find_by_id("111".to_string()).await.unwrap().unwrap();
    assert_eq!(stored.name, "Test User");

    let startups = SeaOrmRepository::<startup::Model>::new(db.clone());
    startups.add(test_startup("222", "111")).unwrap();
    startups.save_changes().await.expect("First startup failed");
    startups.add(test_startup("222", "111")).unwrap();
    let err = startups.save_changes().await.unwrap_err();
    assert!(err.is_constraint_violation(), "unexpected error: {}", err);
}

#[tokio::test]
async fn test_staging_rejects_records_with_unusable_keys() {
    let db = setup_test_db().await;

    let skills = SeaOrmRepository::<habilidade::Model>::new(db.clone());
    let mut preset = test_habilidade("Rust");
    preset.id = 42;
    assert!(matches!(
        skills.add(preset),
        Err(DomainError::InvalidArgument(_))
    ));
    assert!(matches!(
        skills.update(test_habilidade("Unsaved")),
        Err(DomainError::InvalidArgument(_))
    ));
    assert!(matches!(
        skills.delete(test_habilidade("Unsaved")),
        Err(DomainError::InvalidArgument(_))
    ));

    let usuarios = SeaOrmRepository::<usuario::Model>::new(db.clone());
    assert!(matches!(
        usuarios.add(test_usuario("  ")),
        Err(DomainError::InvalidArgument(_))
    ));

    assert_eq!(skills.pending_changes(), 0);
    assert_eq!(usuarios.pending_changes(), 0);
}

#[tokio::test]
async fn test_nothing_reaches_the_store_before_save_changes() {
    let db = setup_test_db().await;

    let skills = SeaOrmRepository::<habilidade::Model>::new(db.clone());
    skills.add(test_habilidade("Rust")).unwrap();
    skills.add(test_habilidade("Go")).unwrap();
    assert_eq!(skills.pending_changes(), 2);
    assert!(skills.find_all().await.unwrap().is_empty());

    skills.discard_changes();
    assert_eq!(skills.pending_changes(), 0);

    let committed = skills.save_changes().await.unwrap();
    assert!(committed.is_empty());
    assert!(skills.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_commit_rolls_back_the_whole_batch() {
    let db = setup_test_db().await;
    create_owner_and_startup(&db, "111", "222").await;

    let skills = SeaOrmRepository::<habilidade::Model>::new(db.clone());
    skills.add(test_habilidade("Rust")).unwrap();
    let rust = skills.save_changes().await.unwrap().inserted.remove(0);

    let links = SeaOrmRepository::<possui::Model>::new(db.clone());
    links
        .add(possui::Model {
            id: 0,
            startup_cnpj: "222".to_string(),
            habilidade_id: rust.id,
        })
        .unwrap();
    // Unknown startup: violates the foreign key
    links
        .add(possui::Model {
            id: 0,
            startup_cnpj: "999".to_string(),
            habilidade_id: rust.id,
        })
        .unwrap();

    let err = links.save_changes().await.unwrap_err();
    assert!(err.is_constraint_violation(), "unexpected error: {}", err);
    assert_eq!(links.pending_changes(), 0);
    assert!(links.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_habilidade_is_restricted_by_possui() {
    let db = setup_test_db().await;
    create_owner_and_startup(&db, "111", "222").await;

    let skills = SeaOrmRepository::<habilidade::Model>::new(db.clone());
    skills.add(test_habilidade("Rust")).unwrap();
    let rust = skills.save_changes().await.unwrap().inserted.remove(0);

    let links = SeaOrmRepository::<possui::Model>::new(db.clone());
    links
        .add(possui::Model {
            id: 0,
            startup_cnpj: "222".to_string(),
            habilidade_id: rust.id,
        })
        .unwrap();
    let link = links.save_changes().await.unwrap().inserted.remove(0);

    skills.delete(rust.clone()).unwrap();
    let err = skills.save_changes().await.unwrap_err();
    assert!(err.is_constraint_violation(), "unexpected error: {}", err);
    assert!(skills.find_by_id(rust.id).await.unwrap().is_some());

    links.delete(link).unwrap();
    links.save_changes().await.expect("Failed to remove link");

    skills.delete(rust.clone()).unwrap();
    let committed = skills.save_changes().await.expect("Delete should now succeed");
    assert_eq!(committed.deleted, 1);
    assert!(skills.find_by_id(rust.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_overwrites_only_the_target_record() {
    let db = setup_test_db().await;

    let skills = SeaOrmRepository::<habilidade::Model>::new(db.clone());
    skills.add(test_habilidade("Rust")).unwrap();
    skills.add(test_habilidade("Go")).unwrap();
    let mut inserted = skills.save_changes().await.unwrap().inserted;
    let go = inserted.pop().unwrap();
    let mut rust = inserted.pop().unwrap();

    rust.name = "Rust 2024".to_string();
    rust.kind = "Systems".to_string();
    skills.update(rust.clone()).unwrap();
    let committed = skills.save_changes().await.unwrap();
    assert_eq!(committed.updated, vec![rust.clone()]);

    assert_eq!(skills.find_by_id(rust.id).await.unwrap(), Some(rust));
    assert_eq!(skills.find_by_id(go.id).await.unwrap(), Some(go));
}

#[tokio::test]
async fn test_commit_of_vanished_row_is_not_found() {
    let db = setup_test_db().await;

    let skills = SeaOrmRepository::<habilidade::Model>::new(db.clone());
    skills.add(test_habilidade("Rust")).unwrap();
    let rust = skills.save_changes().await.unwrap().inserted.remove(0);

    skills.delete(rust.clone()).unwrap();
    skills.save_changes().await.unwrap();

    skills.delete(rust).unwrap();
    assert!(matches!(
        skills.save_changes().await,
        Err(DomainError::NotFound)
    ));
}

#[tokio::test]
async fn test_verify_schema_reports_mismatched_table() {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect");

    // Only a habilidade table, and without its `kind` column
    db.execute(Statement::from_string(
        db.get_database_backend(),
        "CREATE TABLE habilidade (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL)"
            .to_owned(),
    ))
    .await
    .unwrap();

    assert!(matches!(
        db::verify_schema(&db).await,
        Err(DomainError::SchemaMismatch(_))
    ));
}

#[tokio::test]
async fn test_init_db_is_idempotent() {
    let db = setup_test_db().await;
    // Running the migrations a second time must not fail
    db::verify_schema(&db).await.expect("Schema check failed");
}

#[tokio::test]
async fn test_startup_delete_and_reparenting_respect_foreign_keys() {
    let db = setup_test_db().await;
    create_owner_and_startup(&db, "111", "222").await;

    let skills = SeaOrmRepository::<habilidade::Model>::new(db.clone());
    skills.add(test_habilidade("Rust")).unwrap();
    let rust = skills.save_changes().await.unwrap().inserted.remove(0);

    let links = SeaOrmRepository::<possui::Model>::new(db.clone());
    links
        .add(possui::Model {
            id: 0,
            startup_cnpj: "222".to_string(),
            habilidade_id: rust.id,
        })
        .unwrap();
    let mut link = links.save_changes().await.unwrap().inserted.remove(0);

    // A startup that still lists a skill cannot go
    let startups = SeaOrmRepository::<startup::Model>::new(db.clone());
    let stored = startups.find_by_id("222".to_string()).await.unwrap().unwrap();
    startups.delete(stored.clone()).unwrap();
    let err = startups.save_changes().await.unwrap_err();
    assert!(err.is_constraint_violation(), "unexpected error: {}", err);

    // Nor can a link or a startup point at a parent that does not exist
    link.startup_cnpj = "999".to_string();
    links.update(link).unwrap();
    let err = links.save_changes().await.unwrap_err();
    assert!(err.is_constraint_violation(), "unexpected error: {}", err);

    let mut orphan = stored;
    orphan.usuario_cpf = "404".to_string();
    startups.update(orphan).unwrap();
    let err = startups.save_changes().await.unwrap_err();
    assert!(err.is_constraint_violation(), "unexpected error: {}", err);

    let unchanged = startups.find_by_id("222".to_string()).await.unwrap().unwrap();
    assert_eq!(unchanged.usuario_cpf, "111");
}

#[tokio::test]
async fn test_missing_delete_target_rolls_back_staged_inserts() {
    let db = setup_test_db().await;

    let skills = SeaOrmRepository::<habilidade::Model>::new(db.clone());
    skills.add(test_habilidade("Rust")).unwrap();
    let rust = skills.save_changes().await.unwrap().inserted.remove(0);

    let mut ghost = test_habilidade("Ghost");
    ghost.id = rust.id + 100;
    skills.add(test_habilidade("Go")).unwrap();
    skills.delete(ghost).unwrap();

    assert!(matches!(
        skills.save_changes().await,
        Err(DomainError::NotFound)
    ));
    assert_eq!(skills.find_all().await.unwrap(), vec![rust]);
}
