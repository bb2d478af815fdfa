use ambulance_finder::core::distance::{haversine_km, round_to_tenth};
use ambulance_finder::core::CatalogProvider;
use ambulance_finder::domain::model::UnitStatus;
use ambulance_finder::{Coordinate, ProximityRanker, ResourceUnit, ServiceLocation, StaticCatalog};

const JUJA: Coordinate = Coordinate::new(-1.1022, 37.0127);
const THIKA: Coordinate = Coordinate::new(-1.0964, 37.0372);
const HERE: Coordinate = Coordinate::new(-1.1000, 37.0100);

fn unit(id: &str) -> ResourceUnit {
    ResourceUnit {
        id: id.to_string(),
        registration: format!("KB {}", id.to_uppercase()),
        unit_type: "Basic Life Support".to_string(),
        phone: "+254722000000".to_string(),
        status: UnitStatus::Available,
    }
}

/// 兩個據點：Thika 排在目錄前面，但 Juja 比較近
fn two_hospitals() -> StaticCatalog {
    StaticCatalog::new(vec![
        ServiceLocation {
            id: "thika".to_string(),
            name: "Thika Level 5 Hospital".to_string(),
            coordinate: THIKA,
            units: vec![unit("thika-1")],
        },
        ServiceLocation {
            id: "juja".to_string(),
            name: "Juja Modern Hospital".to_string(),
            coordinate: JUJA,
            units: vec![unit("juja-1"), unit("juja-2")],
        },
    ])
}

#[test]
fn test_juja_units_come_before_thika() {
    let ranker = ProximityRanker::with_radius(two_hospitals(), 10.0);

    let results = ranker.rank(HERE).unwrap();

    let ids: Vec<&str> = results.iter().map(|r| r.unit_id.as_str()).collect();
    assert_eq!(ids, vec!["juja-1", "juja-2", "thika-1"]);

    let juja_km = round_to_tenth(haversine_km(HERE, JUJA));
    let thika_km = round_to_tenth(haversine_km(HERE, THIKA));
    assert_eq!(results[0].distance_km, juja_km);
    assert_eq!(results[1].distance_km, juja_km);
    assert_eq!(results[2].distance_km, thika_km);
    assert_eq!(juja_km, 0.4);

    assert_eq!(results[0].location_name, "Juja Modern Hospital");
    assert_eq!(results[0].coordinate, JUJA);
    assert_eq!(results[2].location_id, "thika");
}

#[test]
fn test_far_away_position_yields_nothing() {
    let ranker = ProximityRanker::with_radius(two_hospitals(), 10.0);
    assert!(ranker.rank(Coordinate::new(0.0, 0.0)).unwrap().is_empty());
}

#[test]
fn test_zero_radius_at_location_yields_only_that_location() {
    let ranker = ProximityRanker::with_radius(two_hospitals(), 0.0);

    let results = ranker.rank(JUJA).unwrap();

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.location_id == "juja"));
    assert!(results.iter().all(|r| r.distance_km == 0.0));
}

#[test]
fn test_radius_excludes_far_location() {
    // Juja 約 0.39 km，Thika 約 3 km
    let ranker = ProximityRanker::with_radius(two_hospitals(), 1.0);
    let results = ranker.rank(HERE).unwrap();
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.location_id == "juja"));
}

#[test]
fn test_ranking_is_idempotent() {
    let ranker = ProximityRanker::new(StaticCatalog::builtin());
    assert_eq!(ranker.rank(HERE).unwrap(), ranker.rank(HERE).unwrap());
}

#[test]
fn test_results_sorted_and_within_radius_across_positions() {
    let catalog = StaticCatalog::builtin();
    let positions = [
        HERE,
        Coordinate::new(-1.2921, 36.8219),
        Coordinate::new(-1.05, 37.08),
        Coordinate::new(-1.2, 36.95),
    ];

    for radius in [0.5, 5.0, 10.0, 50.0] {
        let ranker = ProximityRanker::with_radius(&catalog, radius);
        for position in positions {
            let results = ranker.rank(position).unwrap();

            assert!(results
                .windows(2)
                .all(|pair| pair[0].distance_km <= pair[1].distance_km));
            assert!(results
                .iter()
                .all(|r| haversine_km(position, r.coordinate) <= radius));

            // 超出半徑的據點，其單位一律不在結果中
            for location in ranker.catalog().locations() {
                if haversine_km(position, location.coordinate) > radius {
                    assert!(results.iter().all(|r| r.location_id != location.id));
                }
            }
        }
    }
}

#[test]
fn test_builtin_catalog_near_juja() {
    let ranker = ProximityRanker::new(StaticCatalog::builtin());
    let results = ranker.rank(HERE).unwrap();

    // Kenyatta National Hospital 在 30 km 外
    assert!(results.iter().all(|r| r.location_id != "kenyatta-national"));
    assert_eq!(results.first().map(|r| r.unit_id.as_str()), Some("jmh-01"));
}
