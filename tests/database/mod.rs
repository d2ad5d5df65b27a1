//! Search execution tests against seeded booking tables.


use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

/// One-connection pool so every query sees the same in-memory database
pub async fn seeded_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");

    for statement in [
        "CREATE TABLE transport_types (id INTEGER PRIMARY KEY, name TEXT NOT NULL)",
        "CREATE TABLE locations (id INTEGER PRIMARY KEY, name TEXT NOT NULL, description TEXT, \
         country TEXT, capacity INTEGER, location_type_id INTEGER)",
        "CREATE TABLE location_types (id INTEGER PRIMARY KEY, name TEXT NOT NULL)",
        "CREATE TABLE transports (id INTEGER PRIMARY KEY, name TEXT NOT NULL, price REAL NOT NULL, \
         departure_time TEXT, arrival_time TEXT, available_seats INTEGER, transport_type_id INTEGER, \
         origin_location_id INTEGER, destination_location_id INTEGER, active INTEGER, \
         service_date TEXT, discount REAL, amenities TEXT)",
        "CREATE TABLE order_items (id INTEGER PRIMARY KEY, order_id INTEGER NOT NULL, transport_id INTEGER NOT NULL)",
        "INSERT INTO transport_types (id, name) VALUES (1, 'Bus'), (2, 'Ferry'), (3, 'Train')",
        "INSERT INTO location_types (id, name) VALUES (1, 'City'), (2, 'Port')",
        "INSERT INTO locations (id, name, description, country, capacity, location_type_id) VALUES \
         (1, 'Paris', 'Capital city', 'France', 1000, 1), \
         (2, 'Marseille', 'Harbour near Paris? No, far south', 'France', 500, 2), \
         (3, 'Rome', 'Eternal city', 'Italy', 800, 1)",
        "INSERT INTO transports (id, name, price, transport_type_id, origin_location_id, destination_location_id, \
         departure_time, active, service_date, discount, amenities) VALUES \
         (1, 'Night Bus 42', 80.0, 1, 1, 3, '2026-03-01 22:00:00', 1, '2026-03-01', 0.5, '{\"wifi\":true}'), \
         (2, 'Coastal Ferry', 150.0, 2, 2, 3, '2026-03-02 07:30:00', 1, '2026-03-02', 0.25, '{\"wifi\":false}'), \
         (3, 'Express Train', 320.0, 3, 1, 2, '2026-03-01 06:15:00', 0, '2026-03-01', 0.5, '{\"wifi\":true}'), \
         (4, 'City Bus', 20.0, 1, 3, 3, '2026-03-03 12:00:00', 1, '2026-03-03', NULL, NULL)",
        "INSERT INTO order_items (id, order_id, transport_id) VALUES (1, 7, 2), (2, 7, 3), (3, 8, 1)",
    ] {
        sqlx::query(statement)
            .execute(&pool)
            .await
            .expect("seed statement");
    }

    pool
}
