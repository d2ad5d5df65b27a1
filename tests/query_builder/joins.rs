use booking_query::query_builder::{EntitySearchConfig, JoinSpec, QueryAssembler, SearchParameters};
use booking_query::QueryError;

fn bookings() -> EntitySearchConfig {
    EntitySearchConfig::new("bookings", "b")
        .column("customer", "c.name")
        .column("city", "ci.name")
        .column("country", "co.name")
        // declared out of dependency order on purpose
        .join(JoinSpec::inner("countries", "co", "ci.country_id = co.id").required_for(&["country"]))
        .join(JoinSpec::inner("cities", "ci", "c.city_id = ci.id").required_for(&["city"]))
        .join(JoinSpec::inner("customers", "c", "b.customer_id = c.id").required_for(&["customer"]))
}

#[test]
fn test_transitive_joins_are_included_and_ordered() {
    let params = SearchParameters::new().with("country", "Italy");

    let plan = QueryAssembler::build(&bookings(), &params).unwrap();

    assert_eq!(plan.join_aliases(), vec!["c", "ci", "co"]);
    let customers = plan.sql.find("JOIN customers c").unwrap();
    let cities = plan.sql.find("JOIN cities ci").unwrap();
    let countries = plan.sql.find("JOIN countries co").unwrap();
    assert!(customers < cities && cities < countries);
}

#[test]
fn test_only_needed_joins_are_present() {
    let params = SearchParameters::new().with("customer", "Ada");

    let plan = QueryAssembler::build(&bookings(), &params).unwrap();

    assert_eq!(plan.join_aliases(), vec!["c"]);
    assert!(!plan.sql.contains("cities"));
}

#[test]
fn test_declared_dependencies_replace_condition_parsing() {
    let config = EntitySearchConfig::new("bookings", "b")
        .column("seat", "s.number")
        .join(JoinSpec::inner("trips", "tr", "b.trip_id = tr.id").required_for(&["trip"]))
        .join(
            JoinSpec::inner("seats", "s", "s.trip_id = tr.id AND s.booking_id = b.id")
                .required_for(&["seat"])
                .depends_on(&["tr"]),
        );

    let plan = QueryAssembler::build(&config, &SearchParameters::new().with("seat", 12)).unwrap();

    assert_eq!(plan.join_aliases(), vec!["tr", "s"]);
}

#[test]
fn test_cycle_fails_instead_of_emitting_invalid_sql() {
    let config = EntitySearchConfig::new("bookings", "b")
        .column("a", "x.a")
        .join(JoinSpec::inner("xs", "x", "x.y_id = y.id"))
        .join(JoinSpec::inner("ys", "y", "y.x_id = x.id"));

    let err = QueryAssembler::build(&config, &SearchParameters::new().with("a", 1)).unwrap_err();

    match err {
        QueryError::JoinCycle { aliases } => assert_eq!(aliases, vec!["x", "y"]),
        other => panic!("expected JoinCycle, got {other:?}"),
    }
}

#[test]
fn test_condition_on_undeclared_alias_fails() {
    let config = EntitySearchConfig::new("bookings", "b")
        .join(JoinSpec::inner("seats", "s", "s.trip_id = tr.id"));

    let err = QueryAssembler::build(&config, &SearchParameters::new()).unwrap_err();

    assert!(matches!(err, QueryError::UndeclaredAlias { ref alias, .. } if alias == "tr"));
    assert!(err.is_planning_error());
}
