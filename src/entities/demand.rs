//! Demand entity - A floor call made to the elevator.

use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use serde::{Deserialize, Serialize};

/// Demand database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "demands")]
pub struct Model {
    /// Unique, monotonically assigned identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Floor the call was made from
    pub demand_floor: i32,
    /// When the call was made; defaults to the insertion time
    #[sea_orm(default_expr = "Expr::current_timestamp()")]
    pub demand_time: DateTimeUtc,
}

/// Demands are not linked to the state that served them
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
