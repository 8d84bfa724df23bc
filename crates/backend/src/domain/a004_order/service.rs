use super::repository;
use crate::domain::a003_product;
use contracts::domain::a004_order::aggregate::{Order, OrderDto, OrderItem, OrderStatus};
use contracts::domain::a004_order::cart::Cart;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Cart is empty")]
    EmptyCart,
}

/// Оформить заказ из корзины представителя
///
/// Заголовок и строки пишутся одной транзакцией: заказ либо
/// сохраняется целиком, либо не сохраняется вовсе.
pub async fn submit(rep_id: &str, dto: OrderDto) -> anyhow::Result<Uuid> {
    let mut cart = Cart::new();
    for item in &dto.items {
        cart.update_quantity(&item.product_id, item.quantity);
    }
    if cart.item_count() == 0 {
        return Err(OrderError::EmptyCart.into());
    }

    let catalog = a003_product::repository::list_all().await?;
    let items: Vec<OrderItem> = cart
        .line_items(&catalog)
        .into_iter()
        .map(|line| OrderItem {
            product_id: line.product_id,
            quantity: line.quantity,
            price_per_case: line.price_per_case,
            line_total: line.line_total,
        })
        .collect();
    if items.is_empty() {
        // все позиции корзины отсутствуют в каталоге
        return Err(OrderError::EmptyCart.into());
    }

    let code = format!("ORD-{}", Uuid::new_v4());
    let mut aggregate = Order::new_for_insert(
        code,
        rep_id.to_string(),
        dto.client_id.clone(),
        items,
    );

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    aggregate.before_write();

    let id = repository::insert_with_items(&aggregate).await?;
    tracing::info!(
        "Order {} submitted: {} line(s), subtotal {:.2}",
        aggregate.base.code,
        aggregate.items.len(),
        aggregate.subtotal
    );
    Ok(id)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Order>> {
    repository::get_by_id(id).await
}

/// Заказы текущего представителя, новые сверху
pub async fn list_my(rep_id: &str) -> anyhow::Result<Vec<Order>> {
    repository::list_by_rep(rep_id).await
}

pub async fn count_pending() -> anyhow::Result<i64> {
    repository::count_by_status(OrderStatus::Pending).await
}
