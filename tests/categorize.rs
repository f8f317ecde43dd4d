mod common;

use automatch::categorize::{categorize, CategoryCache, CategoryIndex, KeywordTable};
use automatch::facet::BodyStyle;
use automatch::persist::{PersistenceMode, Persistor};

#[test]
fn matching_is_case_insensitive_substring() {
    let table = KeywordTable::default();
    assert_eq!(categorize("2-door coupe", &table), Some(BodyStyle::Coupe));
    assert_eq!(categorize("SPEEDSTER", &table), Some(BodyStyle::Roadster));
    assert_eq!(categorize("Estate", &table), None);
}

#[test]
fn earlier_category_wins() {
    let table = KeywordTable::default();
    // both Coupe and SUV keywords appear, Coupe comes first in the table
    assert_eq!(categorize("Crossover Coupe", &table), Some(BodyStyle::Coupe));
    // "Minivan" contains "Van", either way it is a van
    assert_eq!(categorize("Minivan", &table), Some(BodyStyle::Van));
    // "Spider" is listed under Spyder, after Roadster
    assert_eq!(categorize("Roadster Spider", &table), Some(BodyStyle::Roadster));
}

#[test]
fn custom_table_order_is_respected() {
    let table = KeywordTable::new(vec![
        (BodyStyle::Suv, vec!["crossover".into()]),
        (BodyStyle::Coupe, vec!["coupe".into()]),
    ]);
    assert_eq!(categorize("Crossover Coupe", &table), Some(BodyStyle::Suv));
}

#[test]
fn index_is_deterministic_and_excludes_unmatched() {
    let values = ["Sedan", "Hatchback 5-door", "Estate", "Sedan Long", "Liftback"];
    let table = KeywordTable::default();
    let first = CategoryIndex::build(&values, &table);
    let second = CategoryIndex::build(&values, &table);
    assert_eq!(first, second);
    assert_eq!(first.get(BodyStyle::Sedan), ["Sedan", "Sedan Long"]);
    assert_eq!(first.get(BodyStyle::Hatchback), ["Hatchback 5-door", "Liftback"]);
    assert!(first.get(BodyStyle::Pickup).is_empty());
    let members: usize = first.iter().map(|(_, m)| m.len()).sum();
    assert_eq!(members, 4, "'Estate' matches no keyword and must be left out");
}

#[test]
fn cache_builds_once_and_rebuilds_after_invalidation() {
    let persistor = common::seeded_persistor();
    let cache = CategoryCache::default();
    assert!(!cache.is_cached());
    let index = cache.get_or_build(&persistor);
    assert!(cache.is_cached());
    assert_eq!(index.get(BodyStyle::Coupe), ["Coupe", "Crossover Coupe"]);
    assert_eq!(index.get(BodyStyle::Suv), ["SUV 5-door"]);

    persistor
        .execute_batch("insert into car_db_metric (id, make, model, series) values (7, 'Ford', 'F-150', 'Pickup');")
        .unwrap();
    // still the cached index
    assert!(cache.get_or_build(&persistor).get(BodyStyle::Pickup).is_empty());
    cache.invalidate();
    assert!(!cache.is_cached());
    assert_eq!(cache.get_or_build(&persistor).get(BodyStyle::Pickup), ["Pickup"]);
}

#[test]
fn failed_build_is_empty_and_not_cached() {
    let persistor = Persistor::new(PersistenceMode::InMemory, "missing_table").unwrap();
    let cache = CategoryCache::default();
    let index = cache.get_or_build(&persistor);
    assert!(index.is_empty());
    assert!(!cache.is_cached());
}
