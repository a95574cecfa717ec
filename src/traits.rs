use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult, Order, PaginatorTrait,
    QueryOrder, QuerySelect,
};
use serde::Serialize;

use crate::entities::{department, program, vendor_total};

/// A table that can be listed through the generic listing handler.
///
/// Implemented on the entity's `Model`. The database does ordering, offset and
/// limit; the handler applies the search-box filter to the page that comes
/// back using [`ListingResource::candidate`], and sums
/// [`ListingResource::amount`] for the page summary.
#[async_trait]
pub trait ListingResource: Serialize + FromQueryResult + Sized + Send + Sync + 'static {
    type EntityType: EntityTrait<Model = Self> + Sync;
    type ColumnType: ColumnTrait + Copy + Send + Sync;

    /// Tie-breaker so that pages stay stable under equal sort values.
    const ID_COLUMN: Self::ColumnType;
    /// Plural name used in log lines, headers and error messages.
    const RESOURCE_NAME: &'static str;
    const DEFAULT_SORT: &'static str;
    const DEFAULT_ORDER: Order;

    /// Public sort keys and the columns they map to.
    fn sortable_columns() -> Vec<(&'static str, Self::ColumnType)>;

    /// Text the search-box filter is matched against.
    fn candidate(&self) -> &str;

    /// Figure summed into the page summary.
    fn amount(&self) -> f64;

    async fn fetch_page(
        db: &DatabaseConnection,
        order_column: Self::ColumnType,
        order_direction: Order,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Self>, DbErr> {
        Self::EntityType::find()
            .order_by(order_column, order_direction)
            .order_by(Self::ID_COLUMN, Order::Asc)
            .offset(offset)
            .limit(limit)
            .all(db)
            .await
    }

    async fn total_count(db: &DatabaseConnection) -> Result<u64, DbErr> {
        Self::EntityType::find().count(db).await
    }
}

impl ListingResource for vendor_total::Model {
    type EntityType = vendor_total::Entity;
    type ColumnType = vendor_total::Column;

    const ID_COLUMN: Self::ColumnType = vendor_total::Column::Id;
    const RESOURCE_NAME: &'static str = "vendors";
    const DEFAULT_SORT: &'static str = "amount";
    const DEFAULT_ORDER: Order = Order::Desc;

    fn sortable_columns() -> Vec<(&'static str, Self::ColumnType)> {
        vec![
            ("amount", vendor_total::Column::TotalAmount),
            ("name", vendor_total::Column::VendorName),
            ("department", vendor_total::Column::DepartmentName),
            ("transactions", vendor_total::Column::TransactionCount),
            ("year", vendor_total::Column::FiscalYear),
        ]
    }

    fn candidate(&self) -> &str {
        &self.vendor_name
    }

    fn amount(&self) -> f64 {
        self.total_amount
    }
}

impl ListingResource for department::Model {
    type EntityType = department::Entity;
    type ColumnType = department::Column;

    const ID_COLUMN: Self::ColumnType = department::Column::Id;
    const RESOURCE_NAME: &'static str = "departments";
    const DEFAULT_SORT: &'static str = "name";
    const DEFAULT_ORDER: Order = Order::Asc;

    fn sortable_columns() -> Vec<(&'static str, Self::ColumnType)> {
        vec![
            ("name", department::Column::Name),
            ("spend", department::Column::TotalSpend),
            ("headcount", department::Column::Headcount),
            ("salary", department::Column::AverageSalary),
            ("code", department::Column::OrgCode),
        ]
    }

    fn candidate(&self) -> &str {
        &self.name
    }

    fn amount(&self) -> f64 {
        self.total_spend
    }
}

impl ListingResource for program::Model {
    type EntityType = program::Entity;
    type ColumnType = program::Column;

    const ID_COLUMN: Self::ColumnType = program::Column::Id;
    const RESOURCE_NAME: &'static str = "programs";
    const DEFAULT_SORT: &'static str = "spend";
    const DEFAULT_ORDER: Order = Order::Desc;

    fn sortable_columns() -> Vec<(&'static str, Self::ColumnType)> {
        vec![
            ("spend", program::Column::TotalSpend),
            ("name", program::Column::ProgramName),
            ("department", program::Column::DepartmentName),
            ("code", program::Column::ProgramCode),
            ("year", program::Column::FiscalYear),
        ]
    }

    fn candidate(&self) -> &str {
        &self.program_name
    }

    fn amount(&self) -> f64 {
        self.total_spend
    }
}
