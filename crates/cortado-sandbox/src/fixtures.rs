//! Ready-made seed data for demos and tests.

use serde_json::json;

use crate::store::Seed;

/// A small café snapshot: three pending orders on the rail and a short
/// menu. Enough for a kitchen-display or inventory mini-app to render
/// something real on first launch.
pub fn demo_cafe() -> Seed {
    Seed::new()
        .table(
            "orders",
            vec![
                json!({
                    "id": "order-101",
                    "order_number": "A-101",
                    "status": "pending",
                    "customer_name": "Walk-in",
                    "table_number": 4,
                    "items": [
                        {"name": "Espresso", "quantity": 2},
                        {"name": "Chocolate Soufflé", "quantity": 1}
                    ]
                }),
                json!({
                    "id": "order-102",
                    "order_number": "A-102",
                    "status": "pending",
                    "customer_name": "Noor",
                    "table_number": 2,
                    "items": [
                        {"name": "Flat White", "quantity": 1}
                    ]
                }),
                json!({
                    "id": "order-103",
                    "order_number": "A-103",
                    "status": "preparing",
                    "customer_name": "Sam",
                    "table_number": 7,
                    "items": [
                        {"name": "Cold Brew", "quantity": 1},
                        {"name": "Croissant", "quantity": 2}
                    ]
                }),
            ],
        )
        .table(
            "menu_items",
            vec![
                json!({"id": 1, "name": "Espresso", "category": "drinks", "price": 3.0}),
                json!({"id": 2, "name": "Flat White", "category": "drinks", "price": 4.5}),
                json!({"id": 3, "name": "Cold Brew", "category": "drinks", "price": 4.0}),
                json!({"id": 4, "name": "Croissant", "category": "bakery", "price": 3.5}),
                json!({"id": 5, "name": "Chocolate Soufflé", "category": "dessert", "price": 7.0}),
            ],
        )
}
