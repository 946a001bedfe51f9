use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use toolbelt_config::{
    CompositeValuesProvider, ConfigError, ConfigValue, EnvValuesProvider, JsonFileValuesProvider, MapValuesProvider,
    ParameterBag, ValuesProvider,
};

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}

#[test]
fn file_values_shadow_the_environment() {
    let file = write_config(r#"{"TOOLBELT_IT_HOST":"db.internal","TOOLBELT_IT_PORT":5432,"TOOLBELT_IT_DEBUG":false}"#);

    temp_env::with_vars(
        [
            ("TOOLBELT_IT_HOST", Some("localhost")),
            ("TOOLBELT_IT_TIMEOUT", Some("15")),
        ],
        || {
            let composite = CompositeValuesProvider::default()
                .with_provider(JsonFileValuesProvider::from_path(file.path()).expect("config loads"))
                .with_provider(EnvValuesProvider);
            let bag = ParameterBag::new(composite);

            assert_eq!(bag.read_string("TOOLBELT_IT_HOST", ""), "db.internal");
            assert_eq!(bag.read_uint("TOOLBELT_IT_PORT", 0), 5432);
            assert!(!bag.read_bool("TOOLBELT_IT_DEBUG", true));
            assert_eq!(
                bag.read_duration("TOOLBELT_IT_TIMEOUT", Duration::from_secs(1), 5),
                Duration::from_secs(15)
            );
            assert_eq!(
                bag.read_duration("TOOLBELT_IT_MISSING", Duration::from_secs(1), 5),
                Duration::from_secs(5)
            );
        },
    );
}

#[test]
fn composite_key_values_merge_json_and_environment() {
    let json = JsonFileValuesProvider::from_reader(r#"{"make":"four","take":"three"}"#.as_bytes()).expect("valid json");

    temp_env::with_var("TOOLBELT_IT_ONEKEY", Some("oneValue"), || {
        let composite = CompositeValuesProvider::default().with_provider(json).with_provider(EnvValuesProvider);
        let key_values = composite.to_key_values();

        assert_eq!(key_values["make"], ConfigValue::from("four"));
        assert_eq!(key_values["take"], ConfigValue::from("three"));
        assert_eq!(key_values["TOOLBELT_IT_ONEKEY"], ConfigValue::from("oneValue"));
    });
}

#[test]
fn check_required_values_reports_every_missing_key() {
    let file = write_config(r#"{"user":"app","password":""}"#);
    let bag = ParameterBag::new(JsonFileValuesProvider::from_path(file.path()).expect("config loads"));

    let error = bag
        .check_required_values(["user", "host", "password", "port"])
        .expect_err("host and port are missing");

    assert!(matches!(error, ConfigError::Aggregate(_)));
    assert_eq!(error.to_string(), "required option host is empty required option port is empty");
    assert_eq!(error.missing_options(), vec!["host", "port"]);
}

#[test]
fn merged_bags_resolve_in_registration_order() {
    let defaults = ParameterBag::new(MapValuesProvider::new([
        ("attempts", ConfigValue::from(10)),
        ("delay", ConfigValue::from(Duration::from_millis(500))),
    ]));
    let overrides = Arc::new(MapValuesProvider::new([("attempts", ConfigValue::from("3"))]));

    let mut bag = ParameterBag::from_shared(overrides.clone());
    bag.merge(&defaults);

    assert_eq!(bag.read_int("attempts", 0), 3);
    assert_eq!(bag.read_duration("delay", Duration::from_secs(1), 9), Duration::from_millis(500));

    overrides.set("delay", 2);
    assert_eq!(bag.read_duration("delay", Duration::from_secs(1), 9), Duration::from_secs(2));
}

#[test]
fn dump_of_merged_bag_is_one_json_object() {
    let mut bag = ParameterBag::new(MapValuesProvider::new([("name", "John"), ("surname", "Deer")]));
    bag.merge(&ParameterBag::new(MapValuesProvider::new([("age", 33)])));

    let mut out = Vec::new();
    bag.dump(&mut out).expect("dump succeeds");

    assert_eq!(
        String::from_utf8(out).expect("utf8 dump"),
        "{\"age\":33,\"name\":\"John\",\"surname\":\"Deer\"}\n"
    );
}

#[test]
fn malformed_config_files_fail_to_load() {
    let file = write_config("{not json");
    let error = JsonFileValuesProvider::from_path(file.path()).unwrap_err();
    assert!(matches!(error, ConfigError::Json(_)), "error: {}", error);
}
