//! Catalog store: the product list behind the products screen.
//!
//! The store is process-wide and in-memory. Every read returns a snapshot;
//! every write happens under one write lock so concurrent adds never hand out
//! the same ID.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;

use nexus_portal_core::{IdGenerator, Price, ProductId, ProductStatus};

use crate::models::{Product, ProductDraft, ProductPatch};

/// Fresh draws from the generator before falling back to suffixed IDs.
const MAX_ID_DRAWS: u32 = 8;

/// Product persistence.
pub trait ProductRepository: Send + Sync {
    /// All products, newest first.
    fn list(&self) -> Vec<Product>;

    /// Look up a product by ID.
    fn get(&self, id: &ProductId) -> Option<Product>;

    /// Insert a new product at the front and return it.
    fn add(&self, draft: ProductDraft) -> Product;

    /// Merge `patch` into the product with `id`. Unknown IDs are ignored.
    ///
    /// Returns the updated product when one matched.
    fn update(&self, id: &ProductId, patch: ProductPatch) -> Option<Product>;

    /// Remove the product with `id`. Unknown IDs are ignored.
    ///
    /// Returns the removed product when one matched.
    fn delete(&self, id: &ProductId) -> Option<Product>;
}

/// [`ProductRepository`] backed by a vector.
pub struct InMemoryProductRepository {
    products: RwLock<Vec<Product>>,
    ids: Arc<dyn IdGenerator>,
}

impl InMemoryProductRepository {
    /// An empty catalog.
    #[must_use]
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self::with_products(Vec::new(), ids)
    }

    /// A catalog holding the four launch products.
    #[must_use]
    pub fn seeded(ids: Arc<dyn IdGenerator>) -> Self {
        Self::with_products(seed_products(Utc::now()), ids)
    }

    /// A catalog holding `products` in the given order.
    #[must_use]
    pub fn with_products(products: Vec<Product>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            products: RwLock::new(products),
            ids,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Product>> {
        self.products.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Product>> {
        self.products.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Draw an ID not used by any product in `existing`.
    fn fresh_id(&self, existing: &[Product]) -> ProductId {
        let taken = |id: &str| id.is_empty() || existing.iter().any(|p| p.id.as_str() == id);

        let mut candidate = self.ids.next_id();
        let mut attempt = 0u32;
        while taken(&candidate) {
            attempt += 1;
            candidate = if attempt < MAX_ID_DRAWS {
                self.ids.next_id()
            } else {
                format!("{}{attempt}", self.ids.next_id())
            };
        }
        if attempt > 0 {
            tracing::debug!(attempt, "product id collision resolved");
        }
        ProductId::new(candidate)
    }
}

impl ProductRepository for InMemoryProductRepository {
    fn list(&self) -> Vec<Product> {
        self.read().clone()
    }

    fn get(&self, id: &ProductId) -> Option<Product> {
        self.read().iter().find(|p| &p.id == id).cloned()
    }

    fn add(&self, draft: ProductDraft) -> Product {
        let mut products = self.write();
        let id = self.fresh_id(&products);
        let product = Product::from_draft(id, draft, Utc::now());
        products.insert(0, product.clone());
        tracing::info!(product_id = %product.id, name = %product.name, "product added");
        product
    }

    fn update(&self, id: &ProductId, patch: ProductPatch) -> Option<Product> {
        let mut products = self.write();
        let Some(product) = products.iter_mut().find(|p| &p.id == id) else {
            tracing::debug!(product_id = %id, "update for unknown product ignored");
            return None;
        };

        product.apply(patch);
        product.updated_at = advance(product.updated_at, Utc::now());
        tracing::info!(product_id = %id, "product updated");
        Some(product.clone())
    }

    fn delete(&self, id: &ProductId) -> Option<Product> {
        let mut products = self.write();
        let Some(index) = products.iter().position(|p| &p.id == id) else {
            tracing::debug!(product_id = %id, "delete for unknown product ignored");
            return None;
        };

        let removed = products.remove(index);
        tracing::info!(product_id = %id, "product deleted");
        Some(removed)
    }
}

/// `now`, or one microsecond past `previous` if the clock has not moved on.
fn advance(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    if now > previous {
        now
    } else {
        previous + TimeDelta::microseconds(1)
    }
}

/// The launch catalog, stamped with `now`.
#[must_use]
pub fn seed_products(now: DateTime<Utc>) -> Vec<Product> {
    let product = |id: &str,
                   name: &str,
                   category: &str,
                   cents: i64,
                   stock: u32,
                   description: &str,
                   status: ProductStatus| Product {
        id: ProductId::new(id),
        name: name.to_string(),
        category: category.to_string(),
        price: Price::new(Decimal::new(cents, 2)).unwrap_or(Price::ZERO),
        stock,
        description: description.to_string(),
        status,
        updated_at: now,
    };

    vec![
        product(
            "1",
            "Nexus X1 Laptop",
            "Electronics",
            129_999,
            45,
            "High-performance workstation.",
            ProductStatus::Active,
        ),
        product(
            "2",
            "Quantum Mouse",
            "Peripherals",
            8_900,
            120,
            "Ultra-fast gaming mouse.",
            ProductStatus::Active,
        ),
        product(
            "3",
            "Nebula Keyboard",
            "Peripherals",
            15_950,
            85,
            "Mechanical RGB keyboard.",
            ProductStatus::Active,
        ),
        product(
            "4",
            "Titan Monitor 4K",
            "Electronics",
            49_900,
            12,
            "Crystal clear display.",
            ProductStatus::Draft,
        ),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use nexus_portal_core::RandomIdGenerator;

    use super::*;

    /// Always hands out the same ID.
    struct FixedIds(&'static str);

    impl IdGenerator for FixedIds {
        fn next_id(&self) -> String {
            self.0.to_string()
        }
    }

    /// Hands out "n1", "n2", ...
    struct CountingIds(AtomicU32);

    impl IdGenerator for CountingIds {
        fn next_id(&self) -> String {
            format!("n{}", self.0.fetch_add(1, Ordering::Relaxed) + 1)
        }
    }

    fn seeded() -> InMemoryProductRepository {
        InMemoryProductRepository::seeded(Arc::new(RandomIdGenerator))
    }

    fn draft(name: &str) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            category: "Accessories".to_string(),
            price: Price::from_cents(2500).unwrap(),
            stock: 10,
            description: String::new(),
            status: ProductStatus::Active,
        }
    }

    fn ids(repo: &InMemoryProductRepository) -> Vec<String> {
        repo.list().into_iter().map(|p| p.id.into_inner()).collect()
    }

    #[test]
    fn test_seed_catalog() {
        let products = seeded().list();
        assert_eq!(products.len(), 4);

        let laptop = &products[0];
        assert_eq!(laptop.id.as_str(), "1");
        assert_eq!(laptop.name, "Nexus X1 Laptop");
        assert_eq!(laptop.price.to_string(), "$1299.99");
        assert_eq!(laptop.stock, 45);

        let monitor = &products[3];
        assert_eq!(monitor.name, "Titan Monitor 4K");
        assert_eq!(monitor.status, ProductStatus::Draft);
        assert!(monitor.is_low_stock());
        assert_eq!(monitor.price.to_string(), "$499.00");
    }

    #[test]
    fn test_add_prepends_with_fresh_id() {
        let repo = seeded();
        let added = repo.add(draft("Flux Cable"));

        let products = repo.list();
        assert_eq!(products.len(), 5);
        assert_eq!(products[0], added);
        assert!(!added.id.as_str().is_empty());
        assert!(!["1", "2", "3", "4"].contains(&added.id.as_str()));
        assert_eq!(products[1].id.as_str(), "1");
    }

    #[test]
    fn test_add_redraws_on_collision() {
        let repo = InMemoryProductRepository::seeded(Arc::new(FixedIds("1")));
        let first = repo.add(draft("A"));
        let second = repo.add(draft("B"));

        let all = ids(&repo);
        assert_ne!(first.id, second.id);
        let mut deduped = all.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), all.len());
    }

    #[test]
    fn test_add_on_empty_catalog() {
        let repo = InMemoryProductRepository::new(Arc::new(CountingIds(AtomicU32::new(0))));
        repo.add(draft("A"));
        repo.add(draft("B"));
        assert_eq!(ids(&repo), vec!["n2", "n1"]);
    }

    #[test]
    fn test_update_merges_and_advances_timestamp() {
        let repo = seeded();
        let id = ProductId::new("2");
        let before = repo.get(&id).unwrap();

        let updated = repo
            .update(
                &id,
                ProductPatch {
                    price: Some(Price::from_cents(7900).unwrap()),
                    ..ProductPatch::default()
                },
            )
            .unwrap();

        assert_eq!(updated.price.to_string(), "$79.00");
        assert_eq!(updated.name, before.name);
        assert_eq!(updated.stock, before.stock);
        assert!(updated.updated_at > before.updated_at);
        assert_eq!(repo.list()[1], updated);
    }

    #[test]
    fn test_repeated_updates_strictly_advance() {
        let repo = seeded();
        let id = ProductId::new("3");
        let mut last = repo.get(&id).unwrap().updated_at;
        for _ in 0..50 {
            let stamp = repo.update(&id, ProductPatch::default()).unwrap().updated_at;
            assert!(stamp > last);
            last = stamp;
        }
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let repo = seeded();
        let before = repo.list();
        assert!(repo.update(&ProductId::new("999"), ProductPatch::default()).is_none());
        assert_eq!(repo.list(), before);
    }

    #[test]
    fn test_delete_removes_and_is_idempotent() {
        let repo = seeded();
        let id = ProductId::new("1");

        assert!(repo.delete(&id).is_some());
        assert_eq!(ids(&repo), vec!["2", "3", "4"]);
        assert!(repo.delete(&id).is_none());
        assert_eq!(ids(&repo), vec!["2", "3", "4"]);
    }

    #[test]
    fn test_list_is_a_snapshot() {
        let repo = seeded();
        let snapshot = repo.list();
        repo.delete(&ProductId::new("1"));
        assert_eq!(snapshot.len(), 4);
    }

    #[test]
    fn test_advance_never_goes_backwards() {
        let t = Utc::now();
        assert_eq!(advance(t, t), t + TimeDelta::microseconds(1));
        assert_eq!(advance(t, t - TimeDelta::seconds(5)), t + TimeDelta::microseconds(1));
        let later = t + TimeDelta::seconds(1);
        assert_eq!(advance(t, later), later);
    }

    #[test]
    fn test_concurrent_adds_get_distinct_ids() {
        let repo = Arc::new(InMemoryProductRepository::new(Arc::new(FixedIds("x"))));
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let repo = Arc::clone(&repo);
                std::thread::spawn(move || repo.add(draft(&format!("p{i}"))).id)
            })
            .collect();
        let mut seen: Vec<String> = handles
            .into_iter()
            .map(|h| h.join().unwrap().into_inner())
            .collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 8);
    }
}
