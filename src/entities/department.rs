//! Department profiles with spending and workforce figures.
//!
//! `org_code` is the four-digit code from the state organizational chart and
//! `org_level` its depth there (`A` for agencies, then `1`, `2`, `3`).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "departments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub slug: String,
    pub name: String,
    pub org_code: String,
    pub org_level: String,
    pub parent_code: Option<String>,
    pub total_spend: f64,
    pub headcount: i64,
    pub average_salary: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
