//! Demo records loaded at startup

use shared::models::{
    CartLine, Client, DeviceModel, Order, OrderStatus, Product, Ticket, TicketSettings,
    TicketStatus,
};
use shared::types::Timestamp;

pub fn clients(now: Timestamp) -> Vec<Client> {
    let client = |id, name: &str, email: &str, phone: &str, address: &str| Client {
        id,
        name: name.into(),
        email: email.into(),
        phone: phone.into(),
        address: address.into(),
        created_at: now,
    };
    vec![
        client(1, "John Doe", "john.doe@example.com", "123-456-7890", "123 Main St"),
        client(2, "Jane Smith", "jane.smith@example.com", "987-654-3210", "456 Elm St"),
        client(3, "Robert Jones", "robert.jones@example.com", "555-123-4567", "789 Oak St"),
    ]
}

pub fn tickets(now: Timestamp) -> Vec<Ticket> {
    vec![
        Ticket {
            id: 1,
            ticket_number: "oct1234".into(),
            client_id: 1,
            device_type: "Mobile".into(),
            brand: "Apple".into(),
            model: "iPhone 14".into(),
            tasks: vec!["Screen Replacement".into()],
            issue: Some("Cracked screen".into()),
            status: TicketStatus::InProgress,
            cost: 150.0,
            technician_id: 1,
            passcode: None,
            created_at: now,
            updated_at: now,
        },
        Ticket {
            id: 2,
            ticket_number: "oct5678".into(),
            client_id: 2,
            device_type: "Tablet".into(),
            brand: "Samsung".into(),
            model: "Galaxy Tab S8".into(),
            tasks: vec!["Battery Replacement".into()],
            issue: Some("Battery draining quickly".into()),
            status: TicketStatus::Pending,
            cost: 100.0,
            technician_id: 2,
            passcode: None,
            created_at: now,
            updated_at: now,
        },
        Ticket {
            id: 3,
            ticket_number: "oct9012".into(),
            client_id: 3,
            device_type: "PC".into(),
            brand: "Dell".into(),
            model: "XPS 13".into(),
            tasks: vec!["Software Installation".into()],
            issue: Some("Operating system not booting".into()),
            status: TicketStatus::Completed,
            cost: 50.0,
            technician_id: 1,
            passcode: None,
            created_at: now,
            updated_at: now,
        },
    ]
}

pub fn ticket_settings() -> TicketSettings {
    let strings = |values: &[&str]| -> Vec<String> { values.iter().map(|v| v.to_string()).collect() };
    TicketSettings {
        device_types: strings(&["Mobile", "Tablet", "PC", "Console"]),
        brands: strings(&["Apple", "Samsung", "Huawei"]),
        models: vec![
            DeviceModel {
                id: 1,
                name: "iPhone 14".into(),
                brand_id: "Apple".into(),
            },
            DeviceModel {
                id: 2,
                name: "Galaxy S23".into(),
                brand_id: "Samsung".into(),
            },
        ],
        tasks: strings(&["Battery", "Screen", "Motherboard", "Software", "Camera", "Speaker"]),
    }
}

pub fn products() -> Vec<Product> {
    vec![
        Product {
            id: 1,
            name: "iPhone 14".into(),
            category: "Phones".into(),
            price: 999.0,
            stock: 10,
            sku: "IP14-128".into(),
            description: "The latest iPhone with a stunning display and powerful camera.".into(),
            image_url: "https://example.com/iphone14.jpg".into(),
        },
        Product {
            id: 2,
            name: "Samsung Galaxy Tab S8".into(),
            category: "Tablets".into(),
            price: 799.0,
            stock: 5,
            sku: "SGT-S8".into(),
            description: "A powerful tablet for work and play.".into(),
            image_url: "https://example.com/galaxytabs8.jpg".into(),
        },
        Product {
            id: 3,
            name: "Dell XPS 13".into(),
            category: "Laptops".into(),
            price: 1299.0,
            stock: 8,
            sku: "DXPS13".into(),
            description: "A lightweight and powerful laptop for professionals.".into(),
            image_url: "https://example.com/dellxps13.jpg".into(),
        },
    ]
}

pub fn categories() -> Vec<String> {
    ["Phones", "Tablets", "Laptops", "Accessories"]
        .into_iter()
        .map(String::from)
        .collect()
}

pub fn orders(now: Timestamp) -> Vec<Order> {
    let order = |id, product_id, total, status, client_id| Order {
        id,
        items: vec![CartLine {
            product_id,
            quantity: 1,
        }],
        total,
        status,
        client_id,
        created_at: now,
    };
    vec![
        order(1, 1, 999.0, OrderStatus::Completed, 1),
        order(2, 2, 799.0, OrderStatus::Pending, 2),
        order(3, 3, 1299.0, OrderStatus::Completed, 3),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money;

    #[test]
    fn test_order_totals_match_product_prices() {
        let products = products();
        for order in orders(0) {
            let total = money::sum_lines(&order.items, |id| money::price_in(&products, id));
            assert_eq!(total, order.total);
        }
    }

    #[test]
    fn test_models_reference_known_brands() {
        let settings = ticket_settings();
        for model in &settings.models {
            assert!(settings.brands.contains(&model.brand_id));
        }
    }
}
