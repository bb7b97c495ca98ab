//! Dashboard figures.
//!
//! Headline cards and the weekly series are fixed demo figures; the catalog
//! summary is computed from the live catalog.

use rust_decimal::Decimal;

use nexus_portal_core::{Price, ProductStatus};

use super::product::Product;

/// A headline stat card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub title: &'static str,
    pub value: &'static str,
    pub trend: &'static str,
    pub is_positive: bool,
}

/// One day of the weekly traffic series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyPoint {
    pub day: &'static str,
    pub revenue: u32,
    pub users: u32,
}

/// Headline cards shown at the top of the dashboard.
pub const STAT_CARDS: [StatCard; 4] = [
    StatCard {
        title: "Total Revenue",
        value: "$45,231.89",
        trend: "+20.1%",
        is_positive: true,
    },
    StatCard {
        title: "Active Users",
        value: "2,350",
        trend: "+180.1%",
        is_positive: true,
    },
    StatCard {
        title: "New Orders",
        value: "+12,234",
        trend: "+19%",
        is_positive: true,
    },
    StatCard {
        title: "Active Sessions",
        value: "573",
        trend: "-4%",
        is_positive: false,
    },
];

/// Revenue and user counts for the past week.
pub const WEEKLY_SERIES: [DailyPoint; 7] = [
    DailyPoint { day: "Mon", revenue: 4000, users: 2400 },
    DailyPoint { day: "Tue", revenue: 3000, users: 1398 },
    DailyPoint { day: "Wed", revenue: 2000, users: 9800 },
    DailyPoint { day: "Thu", revenue: 2780, users: 3908 },
    DailyPoint { day: "Fri", revenue: 1890, users: 4800 },
    DailyPoint { day: "Sat", revenue: 2390, users: 3800 },
    DailyPoint { day: "Sun", revenue: 3490, users: 4300 },
];

/// Aggregate figures over the current catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSummary {
    pub total_products: usize,
    pub active_products: usize,
    pub low_stock_products: usize,
    pub inventory_value: Price,
}

impl CatalogSummary {
    /// Summarize a catalog snapshot.
    #[must_use]
    pub fn from_products(products: &[Product]) -> Self {
        // Saturates at Decimal::MAX rather than overflowing.
        let value = products.iter().fold(Decimal::ZERO, |total, p| {
            p.price
                .amount()
                .checked_mul(Decimal::from(p.stock))
                .and_then(|line| total.checked_add(line))
                .unwrap_or(Decimal::MAX)
        });

        Self {
            total_products: products.len(),
            active_products: products
                .iter()
                .filter(|p| p.status == ProductStatus::Active)
                .count(),
            low_stock_products: products.iter().filter(|p| p.is_low_stock()).count(),
            // Sum of non-negative prices times non-negative stock.
            inventory_value: Price::new(value).unwrap_or(Price::ZERO),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use nexus_portal_core::ProductId;

    use super::*;

    #[test]
    fn test_summary_of_empty_catalog() {
        let summary = CatalogSummary::from_products(&[]);
        assert_eq!(summary.total_products, 0);
        assert_eq!(summary.inventory_value, Price::ZERO);
    }

    #[test]
    fn test_summary_counts_and_value() {
        let make = |id: &str, cents: i64, stock: u32, status: ProductStatus| Product {
            id: ProductId::new(id),
            name: id.to_string(),
            category: "Electronics".to_string(),
            price: Price::from_cents(cents).unwrap(),
            stock,
            description: String::new(),
            status,
            updated_at: Utc::now(),
        };
        let products = vec![
            make("a", 1000, 2, ProductStatus::Active),
            make("b", 250, 40, ProductStatus::Draft),
        ];

        let summary = CatalogSummary::from_products(&products);
        assert_eq!(summary.total_products, 2);
        assert_eq!(summary.active_products, 1);
        assert_eq!(summary.low_stock_products, 1);
        assert_eq!(summary.inventory_value.to_string(), "$120.00");
    }

    #[test]
    fn test_summary_value_saturates_on_overflow() {
        let huge = Product {
            id: ProductId::new("big"),
            name: "Big".to_string(),
            category: "Electronics".to_string(),
            price: Price::new(Decimal::MAX).unwrap(),
            stock: 2,
            description: String::new(),
            status: ProductStatus::Active,
            updated_at: Utc::now(),
        };
        let mut small = huge.clone();
        small.id = ProductId::new("small");
        small.price = Price::from_cents(100).unwrap();

        let summary = CatalogSummary::from_products(&[huge, small]);
        assert_eq!(summary.total_products, 2);
        assert_eq!(summary.inventory_value.amount(), Decimal::MAX);
    }

    #[test]
    fn test_weekly_series_covers_a_week() {
        assert_eq!(WEEKLY_SERIES.len(), 7);
        assert_eq!(WEEKLY_SERIES[0].day, "Mon");
    }
}
