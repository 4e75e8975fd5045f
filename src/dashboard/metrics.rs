//! Pure derivation of the dashboard metrics from the three record sets.
//!
//! Nothing here touches the store or the clock: [`compute`] takes the records and the
//! "now" to measure day and month boundaries against, so every figure can be checked
//! in isolation.

use crate::model::{Category, ExpenseRecord, InventoryItem, SaleWithItem};
use chrono::{DateTime, Datelike, TimeZone};
use serde::Serialize;
use std::collections::BTreeMap;

/// Fraction of a positive net profit owed to the manager.
pub const MANAGER_SHARE_RATE: f64 = 0.25;

/// Every figure shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialMetrics {
    /// Units on hand per category. Always holds all five categories.
    pub stock_by_category: BTreeMap<Category, u64>,
    /// Purchase cost of the stock still on hand.
    pub total_purchase_cost: f64,
    pub total_expenses: f64,
    /// Purchase cost of everything sold, at the items' current purchase price.
    pub cost_of_sold_stock: f64,
    pub total_revenue: f64,
    /// Revenue from sales since the start of the current local day.
    pub daily_revenue: f64,
    /// Revenue from sales since the start of the current local month.
    pub monthly_revenue: f64,
    pub total_invested: f64,
    /// Everything ever spent: stock on hand, stock sold and expenses.
    pub total_invested_cumulative: f64,
    pub net_profit: f64,
    pub manager_share: f64,
    /// Revenue the stock on hand would bring at its selling price.
    pub potential_revenue_from_stock: f64,
    pub forecast_total_revenue: f64,
}

impl Default for FinancialMetrics {
    fn default() -> Self {
        Self {
            stock_by_category: empty_stock(),
            total_purchase_cost: 0.0,
            total_expenses: 0.0,
            cost_of_sold_stock: 0.0,
            total_revenue: 0.0,
            daily_revenue: 0.0,
            monthly_revenue: 0.0,
            total_invested: 0.0,
            total_invested_cumulative: 0.0,
            net_profit: 0.0,
            manager_share: 0.0,
            potential_revenue_from_stock: 0.0,
            forecast_total_revenue: 0.0,
        }
    }
}

fn empty_stock() -> BTreeMap<Category, u64> {
    Category::ALL.into_iter().map(|c| (c, 0)).collect()
}

/// Manager share of a net profit; nothing when there is no profit.
pub fn manager_share(net_profit: f64) -> f64 {
    if net_profit > 0.0 {
        net_profit * MANAGER_SHARE_RATE
    } else {
        0.0
    }
}

/// Derives all metrics from full reads of the three collections.
///
/// Day and month boundaries are taken in `now`'s time zone: a sale counts as "today"
/// when its local date is on or after `now`'s local date.
pub fn compute<Tz: TimeZone>(
    items: &[InventoryItem],
    sales: &[SaleWithItem],
    expenses: &[ExpenseRecord],
    now: &DateTime<Tz>,
) -> FinancialMetrics {
    let tz = now.timezone();
    let today = now.date_naive();
    let month_start = today.with_day(1).unwrap_or(today);

    let mut stock_by_category = empty_stock();
    let mut total_purchase_cost = 0.0;
    let mut potential_revenue_from_stock = 0.0;
    for item in items {
        *stock_by_category.entry(item.category).or_default() += u64::from(item.quantity);
        total_purchase_cost += item.stock_cost();
        potential_revenue_from_stock += item.stock_value();
    }

    let mut total_revenue = 0.0;
    let mut daily_revenue = 0.0;
    let mut monthly_revenue = 0.0;
    let mut cost_of_sold_stock = 0.0;
    for sale in sales {
        let revenue = sale.revenue();
        total_revenue += revenue;
        cost_of_sold_stock += sale.cost_of_goods();

        let sold_on = sale.sale.sold_at.with_timezone(&tz).date_naive();
        if sold_on >= today {
            daily_revenue += revenue;
        }
        if sold_on >= month_start {
            monthly_revenue += revenue;
        }
    }

    let total_expenses: f64 = expenses.iter().map(|e| e.amount).sum();
    let net_profit = total_revenue - cost_of_sold_stock - total_expenses;

    FinancialMetrics {
        stock_by_category,
        total_purchase_cost,
        total_expenses,
        cost_of_sold_stock,
        total_revenue,
        daily_revenue,
        monthly_revenue,
        total_invested: total_purchase_cost + total_expenses,
        total_invested_cumulative: total_purchase_cost + cost_of_sold_stock + total_expenses,
        net_profit,
        manager_share: manager_share(net_profit),
        potential_revenue_from_stock,
        forecast_total_revenue: total_revenue + potential_revenue_from_stock,
    }
}
