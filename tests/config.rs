use std::path::Path;

use passcast::config::Config;

#[test]
fn example_config_loads() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config.example.yaml");
    let config = Config::from_file(&path).unwrap();

    let observer = config.observer().unwrap().expect("station configured");
    assert_eq!(observer.latitude_deg, 52.0116);
    assert_eq!(observer.longitude_deg, 4.3571);
    assert_eq!(config.station_name(), Some("Delft"));

    let search = config.pass_search().unwrap();
    assert_eq!(search.step, chrono::Duration::seconds(30));
    assert!(search.refine);

    assert_eq!(config.frequency_plan().unwrap().downlink_hz, Some(437.5e6));
    let link = config.link_params().unwrap().unwrap();
    assert!((link.wavelength_km() - 299_792.458 / 437.5e6).abs() < 1e-15);
}
