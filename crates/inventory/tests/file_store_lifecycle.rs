use std::fs;
use std::path::PathBuf;

use stockroom_inventory::{
    EMPTY_INVENTORY_MESSAGE, FileBlobStore, InventorySession, InventoryStore, ProductForm,
    StockStatus, StoreConfig, StoreError,
};

struct ScratchDir(PathBuf);

impl ScratchDir {
    fn new(name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!("stockroom-it-{name}-{}", uuid::Uuid::now_v7()));
        Self(dir)
    }

    fn config(&self) -> StoreConfig {
        StoreConfig {
            data_dir: Some(self.0.clone()),
            ..StoreConfig::default()
        }
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

fn open(config: &StoreConfig) -> InventorySession<FileBlobStore> {
    let blobs = FileBlobStore::open(config).expect("failed to open file store");
    InventorySession::open(InventoryStore::from_config(blobs, config))
}

fn product_form(name: &str, category: &str, quantity: &str, cost: &str, price: &str) -> ProductForm {
    ProductForm {
        id: String::new(),
        name: name.to_string(),
        category: category.to_string(),
        quantity: quantity.to_string(),
        cost_price: cost.to_string(),
        selling_price: price.to_string(),
    }
}

#[test]
fn inventory_survives_restart() {
    stockroom_observability::init();
    let scratch = ScratchDir::new("restart");
    let config = scratch.config();

    {
        let mut session = open(&config);
        assert!(session.load_error().is_none());
        assert!(session.products().is_empty());

        session
            .save_product(product_form("Widget", "Hardware", "5", "2.00", "3.50").parse().unwrap())
            .unwrap();
        session
            .save_product(product_form("Cable", "Electrical", "15", "1.00", "1.75").parse().unwrap())
            .unwrap();
    }

    let session = open(&config);
    assert!(session.load_error().is_none());
    assert_eq!(session.products().len(), 2);
    assert_eq!(session.products()[0].name(), "Widget");
    assert_eq!(session.products()[1].name(), "Cable");

    let summary = session.summary().display();
    assert_eq!(summary.total_value, "$25.00");
    assert_eq!(summary.low_stock_count, "1");
    assert_eq!(summary.total_count, "2");

    let rows = session.rows("wid");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].status, StockStatus::LowStock);
    assert_eq!(rows[0].selling_price, "$3.50");
}

#[test]
fn blob_written_by_older_client_is_readable() {
    let scratch = ScratchDir::new("legacy");
    let config = scratch.config();
    fs::create_dir_all(&scratch.0).unwrap();
    fs::write(
        scratch.0.join("inventory.json"),
        r#"[{"id":"1700000000000","name":"Bolt","category":"Fasteners","quantity":40,"costPrice":0.1,"sellingPrice":0.25,"dateAdded":"2023-11-14T22:13:20.000Z"}]"#,
    )
    .unwrap();

    let mut session = open(&config);
    assert!(session.load_error().is_none());
    let id = session.products()[0].id_typed().clone();
    assert_eq!(id.as_str(), "1700000000000");

    let mut edit = session.edit_form(&id).unwrap();
    edit.name = "Hex Bolt".to_string();
    session.save_product(edit.parse().unwrap()).unwrap();

    let reopened = open(&config);
    assert_eq!(reopened.products()[0].name(), "Hex Bolt");
    assert_eq!(
        reopened.products()[0].date_added(),
        session.products()[0].date_added()
    );
}

#[test]
fn corrupt_file_is_reported_not_fatal() {
    let scratch = ScratchDir::new("corrupt");
    let config = scratch.config();
    fs::create_dir_all(&scratch.0).unwrap();
    fs::write(scratch.0.join("inventory.json"), "not json at all").unwrap();

    let session = open(&config);
    assert!(matches!(session.load_error(), Some(StoreError::CorruptState(_))));
    assert!(session.rows("").is_empty());
    assert!(!EMPTY_INVENTORY_MESSAGE.is_empty());
}

#[test]
fn deleting_last_product_persists_empty_list() {
    let scratch = ScratchDir::new("delete");
    let config = scratch.config();

    let mut session = open(&config);
    session
        .save_product(product_form("Tape", "Office", "2", "0.99", "1.99").parse().unwrap())
        .unwrap();
    let id = session.products()[0].id_typed().clone();
    session.delete_product(&id).unwrap();

    let raw = fs::read_to_string(scratch.0.join("inventory.json")).unwrap();
    assert_eq!(raw, "[]");
    assert!(open(&config).products().is_empty());
}

#[test]
fn sub_cent_costs_from_older_clients_keep_their_value() {
    let scratch = ScratchDir::new("sub-cent");
    let config = scratch.config();
    fs::create_dir_all(&scratch.0).unwrap();
    fs::write(
        scratch.0.join("inventory.json"),
        r#"[{"id":"1","name":"Washer","category":"Fasteners","quantity":1000,"costPrice":0.125,"sellingPrice":0.2,"dateAdded":"2023-11-14T22:13:20.000Z"}]"#,
    )
    .unwrap();

    let mut session = open(&config);
    assert_eq!(session.summary().display().total_value, "$125.00");

    session
        .save_product(product_form("Spacer", "Fasteners", "10", "0.005", "0.01").parse().unwrap())
        .unwrap();

    let reopened = open(&config);
    assert_eq!(reopened.summary().display().total_value, "$125.05");
    let raw = fs::read_to_string(scratch.0.join("inventory.json")).unwrap();
    assert!(raw.contains("\"costPrice\":0.125"));
}

#[test]
fn unreadable_file_is_backed_up_before_first_write() {
    let scratch = ScratchDir::new("backup");
    let config = scratch.config();
    fs::create_dir_all(&scratch.0).unwrap();
    fs::write(scratch.0.join("inventory.json"), "[{\"id\":").unwrap();

    let mut session = open(&config);
    assert!(matches!(session.load_error(), Some(StoreError::CorruptState(_))));
    session
        .save_product(product_form("Glue", "Office", "4", "1.10", "2.00").parse().unwrap())
        .unwrap();

    let backup_key = session.backup_key().unwrap();
    let backup = fs::read_to_string(scratch.0.join(format!("{backup_key}.json"))).unwrap();
    assert_eq!(backup, "[{\"id\":");
    assert_eq!(open(&config).products().len(), 1);
}
