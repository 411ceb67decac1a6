use std::time::Duration;

use brrtcors::hot_reload::{reload_origins, watch_origins};
use brrtcors::{Cors, CorsOptions};

mod common;
use common::temp_files;

const CONFIG_V1: &str = r#"
allowed_origins: ["https://one.example.com"]
allowed_methods: [GET, PUT]
"#;

const CONFIG_V2: &str = r#"
allowed_origins: ["https://two.example.com", "https://*.two.dev"]
allowed_methods: [DELETE]
"#;

#[test]
fn test_reload_origins_replaces_origins_only() {
    let file = temp_files::create(CONFIG_V1, ".yaml");
    let cors = Cors::new(&CorsOptions::load(file.path()).unwrap());
    assert!(cors.store().origin_allowed("https://one.example.com"));

    std::fs::write(file.path(), CONFIG_V2).unwrap();
    let count = reload_origins(file.path(), &cors).unwrap();

    assert_eq!(count, 2);
    assert!(!cors.store().origin_allowed("https://one.example.com"));
    assert!(cors.store().origin_allowed("https://two.example.com"));
    assert!(cors.store().origin_allowed("https://api.two.dev"));
    // methods are fixed at construction
    assert_eq!(cors.store().allowed_methods(), &["GET", "PUT"]);
}

#[test]
fn test_reload_failure_keeps_previous_origins() {
    let file = temp_files::create(CONFIG_V1, ".yaml");
    let cors = Cors::new(&CorsOptions::load(file.path()).unwrap());

    std::fs::write(file.path(), "allowed_origins: {not: a list}\n").unwrap();
    assert!(reload_origins(file.path(), &cors).is_err());
    assert!(cors.store().origin_allowed("https://one.example.com"));
}

#[test]
fn test_reload_is_seen_by_clones() {
    let file = temp_files::create(CONFIG_V1, ".yaml");
    let cors = Cors::new(&CorsOptions::load(file.path()).unwrap());
    let clone = cors.clone();

    std::fs::write(file.path(), CONFIG_V2).unwrap();
    reload_origins(file.path(), &cors).unwrap();
    assert!(clone.store().origin_allowed("https://two.example.com"));
}

#[test]
fn test_watch_origins_reload() {
    let file = temp_files::create(CONFIG_V1, ".yaml");
    let cors = Cors::new(&CorsOptions::load(file.path()).unwrap());

    let watcher = watch_origins(file.path(), cors.clone()).expect("watch_origins");

    // allow watcher thread to start
    std::thread::sleep(Duration::from_millis(100));

    std::fs::write(file.path(), CONFIG_V2).unwrap();

    let mut refreshed = false;
    for _ in 0..50 {
        let store = cors.store();
        if store.origin_allowed("https://two.example.com")
            && !store.origin_allowed("https://one.example.com")
        {
            refreshed = true;
            break;
        }
        std::thread::sleep(Duration::from_millis(100));
    }
    drop(watcher);

    assert!(refreshed, "origins were not refreshed after file change");
}
