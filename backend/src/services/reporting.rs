//! Reporting service for dashboard metrics and sell reports
//!
//! Fetches the order, product and store collections and folds them with
//! the reducers in `shared::reporting`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use shared::models::SellOrder;
use shared::reporting::{
    income, low_stock_alerts, product_index, purchase_total, revenue, sales_by_date,
    top_selling_products, DailySales, LowStockAlert, TopProduct, LOW_STOCK_THRESHOLD,
};

use crate::error::{AppError, AppResult};
use crate::services::{ProductService, PurchaseOrderService, SellOrderService, StoreService};

/// Reporting service
#[derive(Clone)]
pub struct ReportingService {
    db: PgPool,
}

/// Dashboard metrics
#[derive(Debug, Serialize)]
pub struct DashboardMetrics {
    pub revenue: Decimal,
    pub income: Decimal,
    pub purchase_total: Decimal,
    pub sales_by_date: Vec<DailySales>,
    pub low_stock_alerts: Vec<LowStockAlert>,
    pub top_selling_products: Vec<TopProduct>,
}

/// Per-store, per-date sell report
#[derive(Debug, Serialize)]
pub struct SellReport {
    pub store_id: Uuid,
    pub sell_date: NaiveDate,
    pub quantity_sold: i64,
    pub total_revenue: Decimal,
    pub sell_orders: Vec<SellOrder>,
}

/// Filter parameters for sell reports
#[derive(Debug, Deserialize)]
pub struct SellReportFilter {
    pub store_id: Uuid,
    pub sell_date: NaiveDate,
}

impl ReportingService {
    /// Create a new ReportingService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Compute the dashboard metrics, optionally scoped to one store
    pub async fn dashboard_metrics(
        &self,
        store_scope: Option<Uuid>,
    ) -> AppResult<DashboardMetrics> {
        let sell_orders = SellOrderService::new(self.db.clone())
            .list_orders(store_scope)
            .await?;
        let purchase_orders = PurchaseOrderService::new(self.db.clone())
            .list_orders(store_scope)
            .await?;
        let products = ProductService::new(self.db.clone()).list_products().await?;

        let stores = match store_scope {
            Some(store_id) => vec![StoreService::new(self.db.clone()).get_store(store_id).await?],
            None => StoreService::new(self.db.clone()).list_stores().await?,
        };

        let index = product_index(&products);

        Ok(DashboardMetrics {
            revenue: revenue(&sell_orders),
            income: income(&sell_orders, &index),
            purchase_total: purchase_total(&purchase_orders),
            sales_by_date: sales_by_date(&sell_orders),
            low_stock_alerts: low_stock_alerts(&stores, &index, LOW_STOCK_THRESHOLD),
            top_selling_products: top_selling_products(&sell_orders, &index),
        })
    }

    /// Compute a store's sell report for one calendar date
    pub async fn sell_report(&self, filter: &SellReportFilter) -> AppResult<SellReport> {
        let orders = SellOrderService::new(self.db.clone())
            .list_orders_for_date(filter.store_id, filter.sell_date)
            .await?;

        let quantity_sold = orders.iter().map(|o| i64::from(o.quantity)).sum();
        let total_revenue = revenue(&orders);

        Ok(SellReport {
            store_id: filter.store_id,
            sell_date: filter.sell_date,
            quantity_sold,
            total_revenue,
            sell_orders: orders,
        })
    }

    /// Render a store's sell report for one calendar date as CSV
    pub async fn sell_report_csv(&self, filter: &SellReportFilter) -> AppResult<String> {
        let store = StoreService::new(self.db.clone())
            .get_store(filter.store_id)
            .await?;
        let products = ProductService::new(self.db.clone()).list_products().await?;
        let index = product_index(&products);

        let report = self.sell_report(filter).await?;

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record([
                "sell_date",
                "store",
                "product",
                "quantity",
                "unit_price",
                "total_amount",
                "customer_name",
            ])
            .map_err(|e| AppError::Internal(format!("CSV export failed: {}", e)))?;

        for order in &report.sell_orders {
            let product_name = index
                .get(&order.product_id)
                .map(|p| p.name.as_str())
                .unwrap_or("unknown");

            writer
                .write_record([
                    order.sell_date.to_string().as_str(),
                    store.name.as_str(),
                    product_name,
                    order.quantity.to_string().as_str(),
                    order.unit_price.to_string().as_str(),
                    order.total_amount.to_string().as_str(),
                    order.customer_name.as_str(),
                ])
                .map_err(|e| AppError::Internal(format!("CSV export failed: {}", e)))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| AppError::Internal(format!("CSV export failed: {}", e)))?;

        String::from_utf8(bytes).map_err(|e| AppError::Internal(format!("CSV export failed: {}", e)))
    }
}
