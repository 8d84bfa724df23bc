pub mod aggregate;
pub mod cart;

pub use aggregate::{Order, OrderDto, OrderId, OrderItem, OrderItemDto, OrderStatus};
pub use cart::{Cart, CartLine};
