mod common;

use automatch::format::Complexity;
use automatch::settings::Settings;

#[test]
fn defaults_need_no_file() {
    let settings = Settings::load(Some(&common::temp_path("no_such_config"))).unwrap();
    assert_eq!(settings.database.table, "car_db_metric");
    assert_eq!(settings.database.path, "car_database.db");
    assert_eq!(settings.compiler.bore_stroke_tolerance, 0.01);
    assert_eq!(settings.compiler.power_to_weight_tolerance, 0.005);
    assert_eq!(settings.compiler.speed_unit, "km/h");
    assert_eq!(settings.display.complexity, Complexity::Simple);
}

#[test]
fn file_overrides_only_what_it_names() {
    let base = common::temp_path("config");
    let file = format!("{base}.toml");
    std::fs::write(
        &file,
        "[compiler]\nbore_stroke_tolerance = 0.02\n\n[display]\ncomplexity = \"advanced\"\n",
    )
    .unwrap();
    let settings = Settings::load(Some(&base)).unwrap();
    assert_eq!(settings.compiler.bore_stroke_tolerance, 0.02);
    assert_eq!(settings.compiler.power_to_weight_tolerance, 0.005);
    assert_eq!(settings.display.complexity, Complexity::Advanced);
    assert_eq!(settings.server.address, "127.0.0.1:8080");
    let _ = std::fs::remove_file(&file);
}

#[test]
fn speed_unit_with_a_placeholder_is_rejected() {
    let base = common::temp_path("bad_unit");
    let file = format!("{base}.toml");
    std::fs::write(&file, "[compiler]\nspeed_unit = \"km?h\"\n").unwrap();
    assert!(Settings::load(Some(&base)).is_err());
    let _ = std::fs::remove_file(&file);

    let mut settings = Settings::default();
    assert!(settings.validate().is_ok());
    settings.compiler.speed_unit = "  ".into();
    assert!(settings.validate().is_err());
}
