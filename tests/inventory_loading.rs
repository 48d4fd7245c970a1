//! Inventory loading integration tests

use std::fs;

use tempfile::TempDir;

use vipd::inventory::{self, InventoryError};

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("cluster_conf.yaml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn loads_a_valid_inventory_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
gcp_project: prod-project
vip: 10.20.0.9
cluster:
  - instance: gw-1
    location: europe-west1-b
  - instance: gw-2
    location: europe-west1-c
"#,
    );

    let inv = inventory::load(&path).unwrap();

    assert_eq!(inv.project(), "prod-project");
    assert_eq!(inv.vip_cidr(), "10.20.0.9/32");
    assert_eq!(inv.nodes().len(), 2);
    assert_eq!(inv.find_node("gw-2").unwrap().zone, "europe-west1-c");
}

#[test]
fn missing_file_is_unreadable() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("does-not-exist.yaml");

    let result = inventory::load(&path);
    assert!(matches!(result, Err(InventoryError::Unreadable { .. })));
}

#[test]
fn non_yaml_content_is_malformed() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "{not valid yaml: [");

    let result = inventory::load(&path);
    assert!(matches!(result, Err(InventoryError::MalformedYaml(_))));
}

#[test]
fn vip_with_prefix_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
gcp_project: p
vip: 10.0.0.5/32
cluster:
  - instance: a
    location: z
"#,
    );

    let result = inventory::load(&path);
    assert!(matches!(result, Err(InventoryError::InvalidVip(v)) if v == "10.0.0.5/32"));
}

#[test]
fn ipv6_vip_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
gcp_project: p
vip: "::1"
cluster:
  - instance: a
    location: z
"#,
    );

    let result = inventory::load(&path);
    assert!(matches!(result, Err(InventoryError::InvalidVip(_))));
}

#[test]
fn duplicate_instance_names_are_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
gcp_project: p
vip: 10.0.0.5
cluster:
  - instance: a
    location: z1
  - instance: a
    location: z2
"#,
    );

    let result = inventory::load(&path);
    assert!(matches!(result, Err(InventoryError::DuplicateNode(n)) if n == "a"));
}
