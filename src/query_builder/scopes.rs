use super::entity::EntitySearchConfig;
use super::joins::JoinSpec;

/// Search configuration for the `locations` table
pub struct LocationScopes;

impl LocationScopes {
    /// Locations with their location type projected alongside.
    /// Keyword search covers name, description and country.
    pub fn search_config() -> EntitySearchConfig {
        EntitySearchConfig::new("locations", "l")
            .column("id", "l.id")
            .column("ids", "l.id")
            .column("name", "l.name")
            .column("country", "l.country")
            .column("description", "l.description")
            .column("capacity", "l.capacity")
            .column("locationTypeId", "l.location_type_id")
            .column("locationType", "lt.name")
            .join(
                JoinSpec::left("location_types", "lt", "l.location_type_id = lt.id")
                    .project("id", "location_type_id")
                    .project("name", "location_type_name"),
            )
            .keyword_columns(&["l.name", "l.description", "l.country"])
    }
}

/// Search configuration for the `transports` table
pub struct TransportScopes;

impl TransportScopes {
    /// Transports with their transport type projected alongside.
    ///
    /// Origin/destination joins are only added when a location filter needs
    /// them; the origin type join additionally pulls in the origin join.
    /// `orderId` restricts to transports booked on a given order.
    pub fn search_config() -> EntitySearchConfig {
        EntitySearchConfig::new("transports", "t")
            .column("id", "t.id")
            .column("ids", "t.id")
            .column("name", "t.name")
            .column("price", "t.price")
            .column("departureTime", "t.departure_time")
            .column("arrivalTime", "t.arrival_time")
            .column("seats", "t.available_seats")
            .column("transportTypeId", "t.transport_type_id")
            .column("transportType", "tt.name")
            .column("origin", "ol.name")
            .column("destination", "dl.name")
            .column("originType", "olt.name")
            .column("orderId", "oi.order_id")
            .join(
                JoinSpec::left("transport_types", "tt", "t.transport_type_id = tt.id")
                    .project("id", "transport_type_id")
                    .project("name", "transport_type_name"),
            )
            .join(
                JoinSpec::inner("location_types", "olt", "ol.location_type_id = olt.id")
                    .required_for(&["originType"]),
            )
            .join(
                JoinSpec::inner("locations", "ol", "t.origin_location_id = ol.id")
                    .required_for(&["origin"]),
            )
            .join(
                JoinSpec::inner("locations", "dl", "t.destination_location_id = dl.id")
                    .required_for(&["destination"]),
            )
            .join(
                JoinSpec::inner("order_items", "oi", "oi.transport_id = t.id")
                    .required_for(&["orderId"]),
            )
            .keyword_columns(&["t.name", "tt.name"])
    }
}
