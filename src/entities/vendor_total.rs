//! Per-vendor spending totals, read from the `vendor_totals` materialized view.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vendor_totals")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub vendor_name: String,
    pub department_name: String,
    pub program_name: Option<String>,
    pub fund_name: Option<String>,
    pub fiscal_year: i32,
    pub total_amount: f64,
    pub transaction_count: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
