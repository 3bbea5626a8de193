//! State entity - A point-in-time sample of the elevator car.
//!
//! Each row records the floor the car was at, whether it was vacant and
//! whether it was moving. Rows are append-only.

use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use serde::{Deserialize, Serialize};

/// State database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "states")]
pub struct Model {
    /// Unique, monotonically assigned identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Floor index the car was at when sampled
    pub current_floor: i32,
    /// When the sample was taken; the database fills in the insertion time if omitted
    #[sea_orm(default_expr = "Expr::current_timestamp()")]
    pub state_time: DateTimeUtc,
    /// Whether the car was unoccupied
    pub vacant: bool,
    /// Whether the car was in motion (stored in the `mooving` column)
    #[sea_orm(column_name = "mooving")]
    #[serde(rename = "mooving", alias = "moving")]
    pub moving: bool,
}

impl Model {
    /// A resting car is vacant and standing still.
    #[must_use]
    pub const fn is_resting(&self) -> bool {
        self.vacant && !self.moving
    }
}

/// States are not related to any other table
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
