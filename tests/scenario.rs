use std::fs;

use districts::scenario::ScenarioLoader;

fn scenario_loader() -> ScenarioLoader {
    ScenarioLoader::new(env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn scenario_loader_reads_fixture() {
    let scenario = scenario_loader()
        .load("scenarios/puget_sound.yaml")
        .expect("scenario parses");
    assert_eq!(scenario.name, "puget_sound");
    assert_eq!(scenario.seed, 7);
    assert_eq!(scenario.extra_resources, 3);
    assert_eq!(scenario.player.population, 10);
    let bounds = scenario.map_bounds.expect("bounds set");
    assert_eq!((bounds.west, bounds.north), (-122.7, 48.0));

    let boundaries = scenario.load_boundaries().unwrap();
    let names: Vec<_> = boundaries.iter().map(|b| b.name()).collect();
    assert_eq!(
        names,
        ["Seattle", "Bellevue", "Issaquah", "Vashon Island", "Snoqualmie Valley"]
    );
}

#[test]
fn session_from_scenario_is_deterministic() {
    let scenario = scenario_loader().load("scenarios/puget_sound.yaml").unwrap();
    let a = scenario.build_session(None).unwrap();
    let b = scenario.build_session(None).unwrap();
    assert_eq!(a.resources(), b.resources());
    assert_eq!(a.players(), b.players());
    assert_eq!(a.resources().len(), 5 * 7);

    let reseeded = scenario.build_session(Some(8)).unwrap();
    assert_eq!(reseeded.settings().seed, 8);
    assert_ne!(a.resources(), reseeded.resources());
}

#[test]
fn resources_geojson_matches_map_layer_shape() {
    let scenario = scenario_loader().load("scenarios/puget_sound.yaml").unwrap();
    let session = scenario.build_session(None).unwrap();
    let value = serde_json::to_value(session.resources_geojson()).unwrap();

    assert_eq!(value["type"], "FeatureCollection");
    assert_eq!(value["name"], "Resources");
    let first = &value["features"][0];
    assert_eq!(first["geometry"]["type"], "Point");
    assert_eq!(first["properties"]["type"], "Office");
    assert_eq!(first["properties"]["owner"], 0);
}

#[test]
fn defaults_apply_when_fields_are_omitted() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("districts.geojson"),
        r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{"NAME":"Solo"},
             "geometry":{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,1],[0,0]]]}}]}"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("minimal.yaml"),
        "name: minimal\nseed: 1\nboundaries: districts.geojson\n",
    )
    .unwrap();

    let scenario = ScenarioLoader::new(dir.path()).load("minimal.yaml").unwrap();
    assert_eq!(scenario.extra_resources, 3);
    assert_eq!(scenario.max_sample_attempts, 10_000);
    assert_eq!(scenario.name_property, "NAME");
    assert!(scenario.map_bounds.is_none());

    let session = scenario.build_session(None).unwrap();
    assert_eq!(session.resources().len(), 7);
    assert_eq!(session.players()[0].name, "Solo");
}

#[test]
fn zero_attempt_budget_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("bad.yaml"),
        "name: bad\nseed: 1\nboundaries: none.geojson\nmax_sample_attempts: 0\n",
    )
    .unwrap();
    let err = ScenarioLoader::new(dir.path()).load("bad.yaml").unwrap_err();
    assert!(format!("{err:#}").contains("max_sample_attempts"));
}

#[test]
fn inverted_map_bounds_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("bad.yaml"),
        "name: bad\nseed: 1\nboundaries: none.geojson\nmap_bounds: {west: 1, south: 0, east: 0, north: 1}\n",
    )
    .unwrap();
    assert!(ScenarioLoader::new(dir.path()).load("bad.yaml").is_err());
}

#[test]
fn missing_boundary_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("lost.yaml"),
        "name: lost\nseed: 1\nboundaries: nowhere.geojson\n",
    )
    .unwrap();
    let scenario = ScenarioLoader::new(dir.path()).load("lost.yaml").unwrap();
    let err = scenario.build_session(None).unwrap_err();
    assert!(format!("{err:#}").contains("nowhere.geojson"));
}
