use std::sync::Arc;

use chrono::{TimeZone, Utc};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cargo_tracker::booking::BookingService;
use cargo_tracker::domain::cargo::{
    HandlingEventType, Itinerary, Leg, UuidTrackingIdGenerator,
};
use cargo_tracker::domain::location::Location;
use cargo_tracker::handling::HandlingEventService;
use cargo_tracker::routing::StaticRoutingService;
use cargo_tracker::store::{
    InMemoryCargoRepository, InMemoryHandlingEventRepository, InMemoryLocationRepository,
};
use cargo_tracker::utils::KeyedLock;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging with environment-based filtering
    // Default to INFO level, can be overridden with RUST_LOG env var
    // Example: RUST_LOG=debug cargo run
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,cargo_tracker=debug")),
        )
        .init();

    tracing::info!("🚀 Starting cargo tracker demo");

    // === 1. Collaborators: in-memory stores and a static route catalog ===
    let cargos = Arc::new(InMemoryCargoRepository::new());
    let locations = Arc::new(InMemoryLocationRepository::new(vec![
        Location::new("SESTO", "Stockholm"),
        Location::new("DEHAM", "Hamburg"),
        Location::new("FIHEL", "Helsinki"),
        Location::new("NLRTM", "Rotterdam"),
    ]));
    let handling_events = Arc::new(InMemoryHandlingEventRepository::new());

    let load_v1 = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
    let unload_v1 = Utc.with_ymd_and_hms(2024, 1, 5, 18, 0, 0).unwrap();
    let load_v2 = Utc.with_ymd_and_hms(2024, 1, 6, 8, 0, 0).unwrap();
    let unload_v2 = Utc.with_ymd_and_hms(2024, 1, 10, 18, 0, 0).unwrap();

    let itinerary = Itinerary::new(vec![
        Leg::new("V1".into(), "SESTO".into(), "DEHAM".into(), load_v1, unload_v1)?,
        Leg::new("V2".into(), "DEHAM".into(), "FIHEL".into(), load_v2, unload_v2)?,
    ])?;
    let routing = Arc::new(StaticRoutingService::new(vec![itinerary]));

    // === 2. Services sharing one per-cargo mutation lock ===
    let mutation_locks = Arc::new(KeyedLock::new());
    let booking = BookingService::new(
        cargos.clone(),
        locations.clone(),
        handling_events.clone(),
        routing,
        Arc::new(UuidTrackingIdGenerator),
        mutation_locks.clone(),
    );
    let handling = HandlingEventService::new(
        cargos.clone(),
        locations.clone(),
        handling_events.clone(),
        mutation_locks,
    );

    // === 3. Book a cargo from Stockholm to Helsinki ===
    let deadline = Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap();
    let tracking_id = booking
        .book_new_cargo("SESTO".into(), "FIHEL".into(), deadline)
        .await?;
    tracing::info!("✅ Cargo booked: {}", tracking_id);

    // === 4. Request candidate routes and assign the first one ===
    let routes = booking
        .request_possible_routes_for_cargo(&tracking_id)
        .await?;
    tracing::info!("Found {} candidate route(s)", routes.len());

    let Some(route) = routes.into_iter().next() else {
        anyhow::bail!("routing service returned no candidate routes");
    };
    booking.assign_cargo_to_route(&tracking_id, route).await?;
    tracing::info!("✅ Cargo assigned to route");

    // === 5. The cargo moves: receive, load, unload, customs ===
    handling
        .register_handling_event(
            Utc.with_ymd_and_hms(2024, 1, 1, 6, 0, 0).unwrap(),
            tracking_id.clone(),
            None,
            "SESTO".into(),
            HandlingEventType::Receive,
        )
        .await?;
    handling
        .register_handling_event(
            load_v1,
            tracking_id.clone(),
            Some("V1".into()),
            "SESTO".into(),
            HandlingEventType::Load,
        )
        .await?;
    handling
        .register_handling_event(
            unload_v1,
            tracking_id.clone(),
            Some("V1".into()),
            "DEHAM".into(),
            HandlingEventType::Unload,
        )
        .await?;
    handling
        .register_handling_event(
            Utc.with_ymd_and_hms(2024, 1, 5, 20, 0, 0).unwrap(),
            tracking_id.clone(),
            None,
            "DEHAM".into(),
            HandlingEventType::Customs,
        )
        .await?;
    tracing::info!("✅ Handling events registered");

    // === 6. Render the tracking view ===
    for view in booking.cargos().await? {
        tracing::info!(
            tracking_id = %view.tracking_id,
            status = %view.status_text,
            "{}",
            view.next_expected_activity
        );
        println!("{}", serde_json::to_string_pretty(&view)?);
    }

    tracing::info!("🎉 Demo complete");
    Ok(())
}
