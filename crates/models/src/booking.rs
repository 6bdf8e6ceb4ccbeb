use sea_orm::{entity::prelude::*, ConnectionTrait, PaginatorTrait, QueryFilter, QueryOrder, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::{room, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "booking")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub room_id: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { User, Room }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity).from(Column::UserId).to(user::Column::Id).into(),
            Relation::Room => Entity::belongs_to(room::Entity).from(Column::RoomId).to(room::Column::Id).into(),
        }
    }
}

impl Related<room::Entity> for Entity {
    fn to() -> RelationDef { Relation::Room.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// First booking of the user (lowest id) joined with its room.
pub async fn find_first_by_user<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
) -> Result<Option<(Model, room::Model)>, ModelError> {
    let found = Entity::find()
        .filter(Column::UserId.eq(user_id))
        .find_also_related(room::Entity)
        .order_by_asc(Column::Id)
        .one(db)
        .await?;
    match found {
        None => Ok(None),
        Some((booking, Some(room))) => Ok(Some((booking, room))),
        Some((booking, None)) => Err(ModelError::Db(format!(
            "booking {} references missing room {}",
            booking.id, booking.room_id
        ))),
    }
}

pub async fn find_by_room<C: ConnectionTrait>(db: &C, room_id: i32) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find()
        .filter(Column::RoomId.eq(room_id))
        .order_by_asc(Column::Id)
        .all(db)
        .await?)
}

pub async fn count_by_room<C: ConnectionTrait>(db: &C, room_id: i32) -> Result<u64, ModelError> {
    Ok(Entity::find().filter(Column::RoomId.eq(room_id)).count(db).await?)
}

pub async fn create<C: ConnectionTrait>(db: &C, user_id: i32, room_id: i32) -> Result<Model, ModelError> {
    let now = Utc::now().into();
    let am = ActiveModel {
        user_id: Set(user_id),
        room_id: Set(room_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn update_room<C: ConnectionTrait>(db: &C, id: i32, room_id: i32) -> Result<Model, ModelError> {
    let found = Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ModelError::NotFound(format!("booking {id}")))?;
    let mut am: ActiveModel = found.into();
    am.room_id = Set(room_id);
    am.updated_at = Set(Utc::now().into());
    Ok(am.update(db).await?)
}
