use crate::domain::a003_product::Product;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Строка корзины, рассчитанная по каталогу
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(rename = "productId")]
    pub product_id: String,
    pub quantity: i64,
    #[serde(rename = "pricePerCase")]
    pub price_per_case: f64,
    #[serde(rename = "lineTotal")]
    pub line_total: f64,
}

/// Корзина заказа: количество кейсов по ID товара
///
/// BTreeMap даёт детерминированный порядок строк при оформлении заказа.
/// В корзине никогда не хранится нулевое или отрицательное количество.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(flatten)]
    items: BTreeMap<String, i64>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Изменить количество товара на delta (любого знака)
    ///
    /// Результат ограничен снизу нулём; при нуле позиция удаляется целиком.
    pub fn update_quantity(&mut self, product_id: &str, delta: i64) {
        let current = self.items.get(product_id).copied().unwrap_or(0);
        let new_quantity = (current + delta).max(0);
        if new_quantity == 0 {
            self.items.remove(product_id);
        } else {
            self.items.insert(product_id.to_string(), new_quantity);
        }
    }

    pub fn quantity_of(&self, product_id: &str) -> i64 {
        self.items.get(product_id).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Суммарное количество кейсов
    pub fn item_count(&self) -> i64 {
        self.items.values().sum()
    }

    /// Сумма корзины по каталогу; неизвестные товары дают 0
    pub fn total(&self, catalog: &[Product]) -> f64 {
        self.items
            .iter()
            .map(|(product_id, qty)| {
                catalog
                    .iter()
                    .find(|p| p.to_string_id() == *product_id)
                    .map(|p| p.price_per_case * *qty as f64)
                    .unwrap_or(0.0)
            })
            .sum()
    }

    /// Строки заказа в порядке ID товара; товары вне каталога пропускаются
    pub fn line_items(&self, catalog: &[Product]) -> Vec<CartLine> {
        self.items
            .iter()
            .filter_map(|(product_id, qty)| {
                catalog
                    .iter()
                    .find(|p| p.to_string_id() == *product_id)
                    .map(|p| CartLine {
                        product_id: product_id.clone(),
                        quantity: *qty,
                        price_per_case: p.price_per_case,
                        line_total: p.price_per_case * *qty as f64,
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, price: f64) -> Product {
        Product::new_for_insert(
            format!("PRD-{}", name),
            name.to_string(),
            "2020".to_string(),
            price,
            String::new(),
            "Red Wine".to_string(),
            true,
            None,
        )
    }

    #[test]
    fn update_quantity_accumulates_deltas() {
        let mut cart = Cart::new();
        cart.update_quantity("p1", 2);
        cart.update_quantity("p1", 3);
        assert_eq!(cart.quantity_of("p1"), 5);
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn decrement_to_zero_removes_item() {
        let mut cart = Cart::new();
        cart.update_quantity("p1", 2);
        cart.update_quantity("p2", 1);
        cart.update_quantity("p1", -2);
        assert_eq!(cart.quantity_of("p1"), 0);
        assert_eq!(cart.item_count(), 1);
        assert!(!cart.is_empty());
    }

    #[test]
    fn quantity_never_goes_negative() {
        let mut cart = Cart::new();
        cart.update_quantity("p1", 1);
        cart.update_quantity("p1", -5);
        assert!(cart.is_empty());
        // дальнейшее уменьшение не создаёт позицию
        cart.update_quantity("p1", -1);
        assert_eq!(cart.quantity_of("p1"), 0);
    }

    #[test]
    fn total_uses_catalog_prices() {
        let margaux = product("Margaux", 2400.0);
        let chablis = product("Chablis", 480.0);
        let catalog = vec![margaux.clone(), chablis.clone()];

        let mut cart = Cart::new();
        cart.update_quantity(&margaux.to_string_id(), 2);
        cart.update_quantity(&chablis.to_string_id(), 3);

        assert_eq!(cart.total(&catalog), 6240.0);
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn unknown_product_contributes_zero_and_is_skipped_in_lines() {
        let chablis = product("Chablis", 480.0);
        let catalog = vec![chablis.clone()];

        let mut cart = Cart::new();
        cart.update_quantity("missing", 10);
        cart.update_quantity(&chablis.to_string_id(), 1);

        assert_eq!(cart.total(&catalog), 480.0);
        let lines = cart.line_items(&catalog);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].product_id, chablis.to_string_id());
        assert_eq!(lines[0].line_total, 480.0);
    }

    #[test]
    fn line_items_are_ordered_by_product_id() {
        let a = product("a", 10.0);
        let b = product("b", 20.0);
        let c = product("c", 30.0);
        let catalog = vec![b.clone(), c.clone(), a.clone()];

        let mut cart = Cart::new();
        cart.update_quantity(&b.to_string_id(), 1);
        cart.update_quantity(&a.to_string_id(), 2);
        cart.update_quantity(&c.to_string_id(), 3);

        let mut expected: Vec<String> =
            vec![a.to_string_id(), b.to_string_id(), c.to_string_id()];
        expected.sort();
        let ids: Vec<String> = cart
            .line_items(&catalog)
            .into_iter()
            .map(|l| l.product_id)
            .collect();
        assert_eq!(ids, expected);
    }
}
