//! Config Validation Tests
//!
//! Exercise file loading, typo detection and range validation of the
//! service configuration independently from the rest of the service.

use competitor_scout::config::validation::{known_config_keys, suggest_correction, validate_unknown_keys};
use competitor_scout::config::{ConfigError, ServiceConfig};
use std::io::Write;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn full_config_file_loads() {
    let file = write_config(
        r#"
[server]
bind_address = "127.0.0.1:9100"

[store]
url = "https://search.internal:9200"
index = "family_g2"
timeout_secs = 5
fixtures = "fixtures/families.json"

[search]
num_candidates = 500
k = 20
family_page_size = 50
"#,
    );

    let config = ServiceConfig::load_from_file(file.path()).unwrap();
    assert_eq!(config.server.bind_address, "127.0.0.1:9100");
    assert_eq!(config.store.url, "https://search.internal:9200");
    assert_eq!(config.store.index, "family_g2");
    assert_eq!(config.store.timeout_secs, 5);
    assert_eq!(
        config.store.fixtures.as_deref(),
        Some(std::path::Path::new("fixtures/families.json"))
    );
    assert_eq!(config.search.num_candidates, 500);
    assert_eq!(config.search.k, 20);
    assert_eq!(config.search.family_page_size, 50);
}

#[test]
fn empty_file_yields_defaults() {
    let file = write_config("");
    let config = ServiceConfig::load_from_file(file.path()).unwrap();
    assert_eq!(config, ServiceConfig::default());
}

#[test]
fn missing_file_is_io_error() {
    let err = ServiceConfig::load_from_file(std::path::Path::new("/nonexistent/competitor_scout.toml"))
        .unwrap_err();
    assert!(matches!(err, ConfigError::Io(..)));
}

#[test]
fn oversized_candidate_pool_rejected() {
    let file = write_config("[search]\nnum_candidates = 20000\n");
    let err = ServiceConfig::load_from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("exceeds the maximum"), "{err}");
}

#[test]
fn wrong_type_is_parse_error() {
    let file = write_config("[search]\nk = \"ten\"\n");
    let err = ServiceConfig::load_from_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(..)));
}

#[test]
fn typo_in_section_name_suggests_correction() {
    let warnings = validate_unknown_keys("[serach]\nk = 5\n");
    let section = warnings.iter().find(|w| w.field == "serach").unwrap();
    assert_eq!(section.suggestion.as_deref(), Some("search"));
}

#[test]
fn typo_in_store_key_warns_but_loads() {
    let file = write_config("[store]\nindx = \"family_g2\"\n");
    let config = ServiceConfig::load_from_file(file.path()).unwrap();
    assert_eq!(config.store.index, "family_g1_v2");

    let known = known_config_keys();
    assert_eq!(
        suggest_correction("store.indx", &known).as_deref(),
        Some("store.index")
    );
}
