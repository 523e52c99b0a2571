//! Display types handed to templates. Prices are preformatted strings so
//! templates never do arithmetic.

use uuid::Uuid;

use crate::entity::{addresses, balance_bikes};
use crate::services::cart_service::{CartLine, CartTotals};
use crate::services::order_service::OrderLine;

/// Render a price in minor units as a decimal string.
pub fn format_price(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.abs();
    format!("{sign}{}.{:02}", cents / 100, cents % 100)
}

#[derive(Debug, Clone)]
pub struct BikeView {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub price: String,
    pub quantity_available: i32,
}

impl From<balance_bikes::Model> for BikeView {
    fn from(bike: balance_bikes::Model) -> Self {
        Self {
            id: bike.id,
            name: bike.name,
            color: bike.color,
            price: format_price(bike.price),
            quantity_available: bike.quantity_available,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AddressView {
    pub id: Uuid,
    pub city: String,
    pub street: String,
    pub first_name: String,
    pub last_name: String,
    pub name_for_engraving: String,
    pub phone: String,
}

impl From<addresses::Model> for AddressView {
    fn from(address: addresses::Model) -> Self {
        Self {
            id: address.id,
            city: address.city,
            street: address.street,
            first_name: address.first_name,
            last_name: address.last_name,
            name_for_engraving: address.name_for_engraving,
            phone: address.phone,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CartLineView {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub quantity: i32,
    pub price: String,
    pub line_price: String,
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.item.id,
            name: line.bike.name.clone(),
            color: line.bike.color.clone(),
            quantity: line.item.quantity,
            price: format_price(line.bike.price),
            line_price: format_price(i64::from(line.item.quantity) * line.bike.price),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TotalsView {
    pub amount: String,
    pub shipping_amount: String,
    pub total_amount: String,
}

impl From<CartTotals> for TotalsView {
    fn from(totals: CartTotals) -> Self {
        Self {
            amount: format_price(totals.amount),
            shipping_amount: format_price(totals.shipping_amount),
            total_amount: format_price(totals.total_amount),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OrderView {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub quantity: i32,
    pub ordered_date: String,
}

impl From<&OrderLine> for OrderView {
    fn from(line: &OrderLine) -> Self {
        Self {
            id: line.order.id,
            name: line.bike.name.clone(),
            color: line.bike.color.clone(),
            quantity: line.order.quantity,
            ordered_date: line.order.ordered_date.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

pub fn order_views(lines: &[OrderLine]) -> Vec<OrderView> {
    lines.iter().map(OrderView::from).collect()
}

pub fn address_views(addresses: Vec<addresses::Model>) -> Vec<AddressView> {
    addresses.into_iter().map(AddressView::from).collect()
}

pub fn cart_line_views(lines: &[CartLine]) -> Vec<CartLineView> {
    lines.iter().map(CartLineView::from).collect()
}

#[cfg(test)]
mod tests {
    use super::format_price;

    #[test]
    fn formats_minor_units() {
        assert_eq!(format_price(0), "0.00");
        assert_eq!(format_price(5), "0.05");
        assert_eq!(format_price(25000), "250.00");
        assert_eq!(format_price(-150), "-1.50");
    }
}
