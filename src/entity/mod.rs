pub mod addresses;
pub mod balance_bikes;
pub mod cart_items;
pub mod orders;
pub mod users;

pub use addresses::Entity as Addresses;
pub use balance_bikes::Entity as BalanceBikes;
pub use cart_items::Entity as CartItems;
pub use orders::Entity as Orders;
pub use users::Entity as Users;
