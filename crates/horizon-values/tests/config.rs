//! Loading and applying converter configuration.

use std::io::Write;

use horizon_values::{
    Brush, ConverterConfig, ConverterRegistry, Culture, Error, TypeConverter, Value, ValueType,
};

const CONFIG: &str = r##"
culture = "de-DE"
handle_refresh = false

[named_colors]
Brand = "#336699"
Shade = "128, 10, 20, 30"
"##;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_load_and_apply() {
    init_tracing();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CONFIG.as_bytes()).unwrap();
    let config = ConverterConfig::load(file.path()).unwrap();
    assert_eq!(config.named_colors.len(), 2);

    let registry = ConverterRegistry::new();
    config.apply(&registry).unwrap();
    assert_eq!(Culture::current().name(), "de-DE");
    assert!(!registry.handle_refresh());

    let color = registry.convert_from_string(&ValueType::Color, "brand").unwrap();
    let Value::Color(color) = color else {
        panic!("expected a color");
    };
    assert_eq!(color.argb(), 0xFF336699);

    assert_eq!(registry.convert_to_string(&Value::Color(color)).unwrap(), "'Brand'");
    let unnamed = registry.convert_from_string(&ValueType::Color, "1; 2; 3").unwrap();
    assert_eq!(registry.convert_to_string(&unnamed).unwrap(), "1; 2; 3");

    let brush = registry
        .resolve(&ValueType::Brush)
        .convert_from_string("Shade")
        .unwrap();
    assert!(matches!(brush, Value::Brush(Brush::Solid(ref c)) if c.a() == 128));

    // A fresh registry keeps the built-in tables.
    assert!(ConverterRegistry::new().convert_from_string(&ValueType::Color, "Brand").is_err());

    Culture::reset_current();
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ConverterConfig::load(dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}

#[test]
fn test_invalid_color_leaves_registry_untouched() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[named_colors]\nBroken = \"not a color\"").unwrap();
    let config = ConverterConfig::load(file.path()).unwrap();

    let registry = ConverterRegistry::new();
    assert!(matches!(config.apply(&registry), Err(Error::Config { .. })));
    assert!(registry.handle_refresh());
}
