use sea_orm::{entity::prelude::*, ConnectionTrait, QueryFilter, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::{enrollment, ticket_type};

/// Lifecycle of a ticket; only `Paid` tickets can ever unlock a hotel room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum TicketStatus {
    #[sea_orm(string_value = "RESERVED")]
    #[serde(rename = "RESERVED")]
    Reserved,
    #[sea_orm(string_value = "PAID")]
    #[serde(rename = "PAID")]
    Paid,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ticket")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub enrollment_id: i32,
    pub ticket_type_id: i32,
    pub status: TicketStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Enrollment, TicketType }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Enrollment => Entity::belongs_to(enrollment::Entity)
                .from(Column::EnrollmentId)
                .to(enrollment::Column::Id)
                .into(),
            Relation::TicketType => Entity::belongs_to(ticket_type::Entity)
                .from(Column::TicketTypeId)
                .to(ticket_type::Column::Id)
                .into(),
        }
    }
}

impl Related<ticket_type::Entity> for Entity {
    fn to() -> RelationDef { Relation::TicketType.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    enrollment_id: i32,
    ticket_type_id: i32,
    status: TicketStatus,
) -> Result<Model, ModelError> {
    let now = Utc::now().into();
    let am = ActiveModel {
        enrollment_id: Set(enrollment_id),
        ticket_type_id: Set(ticket_type_id),
        status: Set(status),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

/// Ticket of an enrollment joined with its type.
pub async fn find_by_enrollment<C: ConnectionTrait>(
    db: &C,
    enrollment_id: i32,
) -> Result<Option<(Model, ticket_type::Model)>, ModelError> {
    let found = Entity::find()
        .filter(Column::EnrollmentId.eq(enrollment_id))
        .find_also_related(ticket_type::Entity)
        .one(db)
        .await?;
    match found {
        None => Ok(None),
        Some((ticket, Some(kind))) => Ok(Some((ticket, kind))),
        Some((ticket, None)) => Err(ModelError::Db(format!(
            "ticket {} references missing ticket type {}",
            ticket.id, ticket.ticket_type_id
        ))),
    }
}
