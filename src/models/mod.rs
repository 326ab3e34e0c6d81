pub mod avaliacao;
pub mod habilidade;
pub mod possui;
pub mod startup;
pub mod usuario;

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, EntityTrait, FromQueryResult, PrimaryKeyTrait,
};

use crate::domain::Keyed;

pub use usuario::Role;

type PrimaryKeyValue<E> = <<E as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType;

/// A SeaORM model the generic repository can persist.
///
/// Ties the model's `Keyed` identity to the entity's primary key and says
/// which columns an insert or an update writes.
pub trait Record: Keyed + FromQueryResult + Clone + Send + Sync + Sized + 'static {
    type Entity: EntityTrait<Model = Self>;
    type ActiveModel: ActiveModelTrait<Entity = Self::Entity>
        + ActiveModelBehavior
        + Send
        + Sync
        + 'static;

    fn primary_key(key: Self::Key) -> PrimaryKeyValue<Self::Entity>;

    /// Active model for an insert. Surrogate keys stay `NotSet`.
    fn into_insert(self) -> Self::ActiveModel;

    /// Active model with the key unchanged and every mutable column set.
    fn into_update(self) -> Self::ActiveModel;
}
