// Empty-geometry warnings as seen through the log facade
//
// Kept to a single test: the logger is process-global.
use std::sync::Mutex;

use atlas_mesh::{BuildOptions, Feature, FeatureArgs, MeshBuilder};
use log::{Level, LevelFilter, Log, Metadata, Record};

struct CaptureLogger {
    warnings: Mutex<Vec<String>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Warn
    }

    fn log(&self, record: &Record) {
        if record.level() == Level::Warn {
            if let Ok(mut warnings) = self.warnings.lock() {
                warnings.push(record.args().to_string());
            }
        }
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger {
    warnings: Mutex::new(Vec::new()),
};

fn take_warnings() -> Vec<String> {
    std::mem::take(&mut *LOGGER.warnings.lock().unwrap())
}

fn empty_geometry_warnings() -> usize {
    take_warnings()
        .iter()
        .filter(|w| w.contains("empty geometry"))
        .count()
}

#[test]
fn test_empty_geometry_warning_follows_options() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Warn);

    let descriptor = MeshBuilder::new(BuildOptions::default()).build(&[], &[]).unwrap();
    assert!(descriptor.is_empty());
    assert_eq!(empty_geometry_warnings(), 1);

    let quiet = BuildOptions::default().with_warn_on_empty(false);
    let descriptor = MeshBuilder::new(quiet).build(&[], &[]).unwrap();
    assert!(descriptor.is_empty());
    assert_eq!(empty_geometry_warnings(), 0);

    let quiet = BuildOptions::from_json_str(r#"{ "warnOnEmpty": false }"#).unwrap();
    MeshBuilder::new(quiet).build(&[], &[]).unwrap();
    assert_eq!(empty_geometry_warnings(), 0);

    // A feature with an empty outline builds its footprint exactly once
    let args = FeatureArgs {
        vertices: Some(Vec::new()),
        holes: vec![Vec::new()],
        elevation: 5.0,
        ..Default::default()
    };
    let feature = Feature::new("blank", args, BuildOptions::default()).unwrap();
    assert!(feature.footprint().unwrap().descriptor().is_empty());
    assert_eq!(empty_geometry_warnings(), 1);
}
