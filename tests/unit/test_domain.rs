use locator::domain::{
    geo::{GeoPoint, haversine_km},
    location::{
        entity::Location,
        proximity::filter_candidates,
        value_objects::{Address, SuggestText},
    },
    route::{
        entity::{RouteResult, RouteSource},
        ranking::rank,
    },
    shared::errors::DomainError,
};

#[test]
fn address_is_trimmed_and_required() {
    assert_eq!(Address::new("  1 Main St ").unwrap().as_str(), "1 Main St");
    assert!(matches!(Address::new(""), Err(DomainError::InvalidInput(_))));
    assert!(matches!(Address::new(" \t "), Err(DomainError::InvalidInput(_))));
}

#[test]
fn address_accepts_any_script() {
    for text in ["Москва, Тверская улица", "東京都港区芝公園", "Zürich", "10 Downing St"] {
        assert_eq!(Address::new(text).unwrap().as_str(), text);
    }
}

#[test]
fn address_rejection_messages_name_the_problem() {
    let Err(DomainError::InvalidInput(msg)) = Address::new(&"a".repeat(599)) else {
        panic!("over-long address should be rejected");
    };
    assert!(msg.contains("512"), "got {}", msg);

    let Err(DomainError::InvalidInput(msg)) = Address::new("-- , --") else {
        panic!("punctuation-only address should be rejected");
    };
    assert!(msg.contains("letters or digits"), "got {}", msg);

    assert!(Address::new(&"a".repeat(512)).is_ok());
}

#[test]
fn suggest_text_respects_minimum_length() {
    assert!(SuggestText::new("a", 2).is_none());
    assert!(SuggestText::new("  a  ", 2).is_none());
    let text = SuggestText::new("  Main   St ", 2).expect("long enough");
    assert_eq!(text.as_str(), "Main St");
    assert_eq!(text.cache_key(), "main st");
}

#[test]
fn geo_point_rejects_out_of_range_coordinates() {
    assert!(GeoPoint::new(40.0, -75.0).is_ok());
    assert!(GeoPoint::new(90.5, 0.0).is_err());
    assert!(GeoPoint::new(0.0, -180.5).is_err());
    assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
}

#[test]
fn haversine_matches_known_distance() {
    // one degree of latitude on a 6371 km sphere
    let a = GeoPoint::new(40.0, -75.0).unwrap();
    let b = GeoPoint::new(41.0, -75.0).unwrap();
    let d = haversine_km(&a, &b);
    assert!((d - 111.195).abs() < 0.01, "got {}", d);
    assert_eq!(haversine_km(&a, &a), 0.0);
    assert!((haversine_km(&b, &a) - d).abs() < 1e-9);
}

#[test]
fn candidates_are_bounded_sorted_and_within_radius() {
    let origin = GeoPoint::new(40.0, -75.0).unwrap();
    let table: Vec<Location> = (0..30)
        .map(|i| Location::new(format!("L{}", i), "", 40.0 + (i as f64) * 0.5, -75.0))
        .collect();

    let candidates = filter_candidates(&origin, &table, 10, 1000.0);

    assert_eq!(candidates.len(), 10);
    assert!(
        candidates
            .windows(2)
            .all(|w| w[0].approx_distance_km <= w[1].approx_distance_km)
    );
    assert!(candidates.iter().all(|c| c.approx_distance_km <= 1000.0));
    assert_eq!(candidates[0].location.name, "L0");

    let narrow = filter_candidates(&origin, &table, 10, 100.0);
    assert!(narrow.len() < 10);
    assert!(narrow.iter().all(|c| c.approx_distance_km <= 100.0));
}

#[test]
fn ranking_orders_by_duration_then_distance() {
    let result = |name: &str, distance_km: f64, duration_minutes: f64| RouteResult {
        name: name.into(),
        phone: String::new(),
        distance_km,
        duration_minutes,
        source: RouteSource::Routed,
    };

    let ranked = rank(
        vec![
            result("slow", 5.0, 30.0),
            result("tie-far", 20.0, 10.0),
            result("tie-near", 10.0, 10.0),
            result("fast", 50.0, 5.0),
        ],
        3,
    );

    let names: Vec<&str> = ranked.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["fast", "tie-near", "tie-far"]);
}
