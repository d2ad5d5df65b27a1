use booking_query::query_builder::{
    LocationScopes, QueryAssembler, SearchParameters, SqlValue, TransportScopes,
};

#[test]
fn test_transport_type_is_always_projected() {
    let plan =
        QueryAssembler::build(&TransportScopes::search_config(), &SearchParameters::new()).unwrap();

    assert_eq!(
        plan.sql,
        "SELECT DISTINCT t.*, tt.id AS transport_type_id, tt.name AS transport_type_name \
         FROM transports t \
         LEFT JOIN transport_types tt ON t.transport_type_id = tt.id \
         WHERE 1=1 ORDER BY t.name"
    );
}

#[test]
fn test_transport_keyword_searches_type_name() {
    let params = SearchParameters::new().with("keyword", "ferry");

    let plan = QueryAssembler::build(&TransportScopes::search_config(), &params).unwrap();

    assert!(plan.sql.contains("AND (t.name LIKE ? OR tt.name LIKE ?)"));
    assert_eq!(plan.bind_values(), vec![SqlValue::Text("%ferry%".into()); 2]);
}

#[test]
fn test_origin_type_pulls_in_origin_join() {
    let params = SearchParameters::new().with("originType", "Airport");

    let plan = QueryAssembler::build(&TransportScopes::search_config(), &params).unwrap();

    // declared before `ol` but scheduled after it
    assert_eq!(plan.join_aliases(), vec!["tt", "ol", "olt"]);
    assert!(plan.sql.contains("AND olt.name LIKE ?"));
}

#[test]
fn test_mixed_filters_bind_in_parameter_order() {
    let departure = chrono::NaiveDate::from_ymd_opt(2026, 5, 1)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap();
    let params = SearchParameters::new()
        .with("destination", "Rome")
        .with("startDepartureTime", departure)
        .with("ids", vec![3_i64, 4])
        .with("maxPrice", 250.0);

    let plan = QueryAssembler::build(&TransportScopes::search_config(), &params).unwrap();

    assert!(plan.sql.contains(
        "WHERE 1=1 AND dl.name LIKE ? AND t.departure_time >= ? AND t.id IN (?,?) AND t.price <= ?"
    ));
    assert_eq!(
        plan.bind_values(),
        vec![
            SqlValue::Text("%Rome%".into()),
            SqlValue::Timestamp(departure),
            SqlValue::Long(3),
            SqlValue::Long(4),
            SqlValue::Double(250.0),
        ]
    );
}

#[test]
fn test_location_type_projection() {
    let params = SearchParameters::new().with("locationType", "Hotel");

    let plan = QueryAssembler::build(&LocationScopes::search_config(), &params).unwrap();

    assert!(plan.sql.starts_with(
        "SELECT DISTINCT l.*, lt.id AS location_type_id, lt.name AS location_type_name FROM locations l"
    ));
    assert!(plan.sql.contains("AND lt.name LIKE ?"));
}
