use sea_orm::*;

use crate::auth::hash_password;
use crate::domain::DomainError;
use crate::models::{avaliacao, habilidade, possui, startup, usuario, Role};

/// Inserts a small demo data set. Does nothing when users already exist.
pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), DomainError> {
    if usuario::Entity::find().count(db).await? > 0 {
        tracing::info!("Demo data skipped: store is not empty");
        return Ok(());
    }

    let admin_password = hash_password("admin").map_err(DomainError::Internal)?;
    let txn = db.begin().await?;

    // 1. Owner
    usuario::ActiveModel {
        cpf: Set("00000000000".to_owned()),
        name: Set("Admin".to_owned()),
        email: Set("admin@nebulohub.dev".to_owned()),
        password_hash: Set(admin_password),
        role: Set(Role::Admin),
        phone: Set(None),
    }
    .insert(&txn)
    .await?;

    // 2. Startup owned by the admin
    startup::ActiveModel {
        cnpj: Set("00000000000100".to_owned()),
        video: Set(None),
        name: Set("Nebulo Labs".to_owned()),
        site: Set(Some("https://nebulohub.dev".to_owned())),
        description: Set("Demo startup".to_owned()),
        responsible_name: Set(Some("Admin".to_owned())),
        email: Set("contato@nebulohub.dev".to_owned()),
        usuario_cpf: Set("00000000000".to_owned()),
    }
    .insert(&txn)
    .await?;

    // 3. Skills, linked to the startup
    for (name, kind) in [("Rust", "Backend"), ("Flutter", "Mobile"), ("Pitch", "Negocios")] {
        let skill = habilidade::ActiveModel {
            name: Set(name.to_owned()),
            kind: Set(kind.to_owned()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        possui::ActiveModel {
            startup_cnpj: Set("00000000000100".to_owned()),
            habilidade_id: Set(skill.id),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    // 4. One evaluation
    avaliacao::ActiveModel {
        score: Set(9),
        comment: Set(Some("Promising team".to_owned())),
        usuario_cpf: Set("00000000000".to_owned()),
        startup_cnpj: Set("00000000000100".to_owned()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;
    tracing::info!("Demo data seeded");
    Ok(())
}
