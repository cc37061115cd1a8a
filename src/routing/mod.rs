use anyhow::Result;
use async_trait::async_trait;

use crate::domain::cargo::{Itinerary, RouteSpecification};

// ============================================================================
// Routing Collaborator
// ============================================================================
//
// Computing feasible routes is an external concern. This core only consumes
// candidate itineraries through the RoutingService contract; no ordering is
// assumed. StaticRoutingService serves preconfigured itineraries for the
// demo binary and tests.
//
// ============================================================================

#[async_trait]
pub trait RoutingService: Send + Sync {
    async fn fetch_routes_for_specification(
        &self,
        route_specification: &RouteSpecification,
    ) -> Result<Vec<Itinerary>>;
}

/// Serves a fixed catalog of itineraries, filtered down to those that
/// satisfy the requested specification.
pub struct StaticRoutingService {
    itineraries: Vec<Itinerary>,
}

impl StaticRoutingService {
    pub fn new(itineraries: Vec<Itinerary>) -> Self {
        Self { itineraries }
    }
}

#[async_trait]
impl RoutingService for StaticRoutingService {
    async fn fetch_routes_for_specification(
        &self,
        route_specification: &RouteSpecification,
    ) -> Result<Vec<Itinerary>> {
        Ok(self
            .itineraries
            .iter()
            .filter(|itinerary| itinerary.satisfies(route_specification))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cargo::Leg;
    use chrono::{DateTime, TimeZone, Utc};

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap()
    }

    fn direct(from: &str, to: &str) -> Itinerary {
        Itinerary::new(vec![Leg::new(
            "V1".into(),
            from.into(),
            to.into(),
            day(1),
            day(5),
        )
        .unwrap()])
        .unwrap()
    }

    #[tokio::test]
    async fn test_static_routing_filters_by_specification() {
        let service = StaticRoutingService::new(vec![
            direct("SESTO", "FIHEL"),
            direct("SESTO", "DEHAM"),
        ]);
        let spec =
            RouteSpecification::new("SESTO".into(), "FIHEL".into(), day(30)).unwrap();

        let routes = service.fetch_routes_for_specification(&spec).await.unwrap();

        assert_eq!(routes.len(), 1);
        assert!(routes[0].satisfies(&spec));
    }
}
