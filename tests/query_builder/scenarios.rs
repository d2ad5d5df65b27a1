use booking_query::query_builder::{
    EntitySearchConfig, JoinSpec, LocationScopes, QueryAssembler, SearchParameters, SqlValue,
};

#[test]
fn test_string_filter_is_wildcarded() {
    let config = EntitySearchConfig::new("transports", "t").column("name", "t.name");
    let params = SearchParameters::new().with("name", "Bus");

    let plan = QueryAssembler::build(&config, &params).unwrap();

    assert!(plan.sql.contains("AND t.name LIKE ?"));
    assert_eq!(plan.bind_values(), vec![SqlValue::Text("%Bus%".to_string())]);
}

#[test]
fn test_list_filter_becomes_in_clause() {
    let config = EntitySearchConfig::new("users", "u").column("ids", "u.id");
    let params = SearchParameters::new().with("ids", vec![1, 2, 3]);

    let plan = QueryAssembler::build(&config, &params).unwrap();

    assert!(plan.sql.contains("AND u.id IN (?,?,?)"));
    assert_eq!(
        plan.bind_values(),
        vec![SqlValue::Int(1), SqlValue::Int(2), SqlValue::Int(3)]
    );
}

#[test]
fn test_location_keyword_search() {
    let params = SearchParameters::new().with("keyword", "paris");

    let plan = QueryAssembler::build(&LocationScopes::search_config(), &params).unwrap();

    assert!(plan
        .sql
        .contains("AND (l.name LIKE ? OR l.description LIKE ? OR l.country LIKE ?)"));
    assert_eq!(
        plan.bind_values(),
        vec![SqlValue::Text("%paris%".to_string()); 3]
    );
}

#[test]
fn test_range_filters_keep_parameter_order() {
    let config = EntitySearchConfig::new("transports", "t").column("price", "t.price");
    let params = SearchParameters::new()
        .with("minPrice", 100)
        .with("maxPrice", 500);

    let plan = QueryAssembler::build(&config, &params).unwrap();

    let lower = plan.sql.find("AND t.price >= ?").unwrap();
    let upper = plan.sql.find("AND t.price <= ?").unwrap();
    assert!(lower < upper);
    assert_eq!(plan.bind_values(), vec![SqlValue::Int(100), SqlValue::Int(500)]);
}

#[test]
fn test_gated_join_follows_its_parameter() {
    let config = EntitySearchConfig::new("transports", "t")
        .column("name", "t.name")
        .column("orderId", "oi.order_id")
        .join(
            JoinSpec::inner("order_items", "oi", "oi.transport_id = t.id")
                .required_for(&["orderId"]),
        );

    let without = SearchParameters::new().with("name", "Bus");
    let plan = QueryAssembler::build(&config, &without).unwrap();
    assert!(!plan.sql.contains("order_items"));

    let with = SearchParameters::new().with("orderId", 42);
    let plan = QueryAssembler::build(&config, &with).unwrap();
    assert!(plan
        .sql
        .contains("INNER JOIN order_items oi ON oi.transport_id = t.id"));
    assert!(plan.sql.contains("AND oi.order_id = ?"));
    assert_eq!(plan.bind_values(), vec![SqlValue::Int(42)]);
}

#[test]
fn test_template_shape() {
    let config = EntitySearchConfig::new("transports", "t").column("name", "t.name");
    let params = SearchParameters::new().with("name", "Ferry");

    let plan = QueryAssembler::build(&config, &params).unwrap();

    assert!(plan.sql.starts_with("SELECT DISTINCT t.*"));
    assert!(plan.sql.contains("FROM transports t"));
    assert!(plan.sql.contains("WHERE 1=1"));
    assert!(plan.sql.ends_with("ORDER BY t.name"));
}

#[test]
fn test_empty_list_emits_no_predicate() {
    let config = EntitySearchConfig::new("users", "u").column("ids", "u.id");
    let params = SearchParameters::new().with("ids", Vec::<i64>::new());

    let plan = QueryAssembler::build(&config, &params).unwrap();

    assert!(!plan.sql.contains(" IN "));
    assert!(plan.bind_values().is_empty());
}

#[test]
fn test_unknown_filters_are_ignored() {
    let config = EntitySearchConfig::new("users", "u").column("name", "u.name");
    let params = SearchParameters::new()
        .with("favouriteColour", "teal")
        .with("name", "Ada");

    let plan = QueryAssembler::build(&config, &params).unwrap();

    assert_eq!(
        plan.sql,
        "SELECT DISTINCT u.* FROM users u WHERE 1=1 AND u.name LIKE ? ORDER BY u.name"
    );
}
