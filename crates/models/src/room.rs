use sea_orm::{entity::prelude::*, ConnectionTrait, QuerySelect, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::hotel;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "room")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub hotel_id: i32,
    pub name: String,
    pub capacity: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Hotel }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Hotel => Entity::belongs_to(hotel::Entity).from(Column::HotelId).to(hotel::Column::Id).into() }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create<C: ConnectionTrait>(db: &C, hotel_id: i32, name: &str, capacity: i32) -> Result<Model, ModelError> {
    if name.trim().is_empty() { return Err(ModelError::Validation("name required".into())); }
    if capacity < 0 { return Err(ModelError::Validation("capacity must be >= 0".into())); }
    let now = Utc::now().into();
    let am = ActiveModel {
        hotel_id: Set(hotel_id),
        name: Set(name.to_string()),
        capacity: Set(capacity),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

/// `SELECT ... FOR UPDATE` on the room row; only meaningful inside a transaction.
pub async fn lock_by_id<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(id).lock_exclusive().one(db).await?)
}

/// Lower the stored capacity of a room. Raising it goes through room management, not here.
pub async fn decrement_capacity<C: ConnectionTrait>(db: &C, id: i32, new_capacity: i32) -> Result<Model, ModelError> {
    if new_capacity < 0 { return Err(ModelError::Validation("capacity must be >= 0".into())); }
    let found = Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ModelError::NotFound(format!("room {id}")))?;
    if new_capacity > found.capacity {
        return Err(ModelError::Validation(format!(
            "capacity can only decrease (current {}, requested {})",
            found.capacity, new_capacity
        )));
    }
    let mut am: ActiveModel = found.into();
    am.capacity = Set(new_capacity);
    am.updated_at = Set(Utc::now().into());
    Ok(am.update(db).await?)
}
