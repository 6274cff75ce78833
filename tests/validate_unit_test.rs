//! Tests for project model validation.

use vault_modeler::model::{Attribute, ParentKind};
use vault_modeler::store::ProjectStore;
use vault_modeler::validate::{validate_project, Severity};

fn sales_store() -> ProjectStore {
    let mut store = ProjectStore::create("Sales", None);
    store.add_hub("Customer", "customer_id", None).unwrap();
    store.add_hub("Product", "product_id", None).unwrap();
    store
        .add_link(
            "Purchase",
            &["Customer".to_string(), "Product".to_string()],
            None,
        )
        .unwrap();
    store
        .add_satellite(
            "CustomerDetails",
            ParentKind::Hub,
            "Customer",
            vec![Attribute::new("name", "string")],
        )
        .unwrap();
    store
}

fn codes(summary: &vault_modeler::validate::ValidationSummary) -> Vec<&'static str> {
    summary.issues.iter().map(|i| i.code).collect()
}

#[test]
fn test_clean_project() {
    let summary = validate_project(sales_store().project());
    assert!(summary.is_clean(), "unexpected issues: {:?}", summary.issues);
    assert!(!summary.has_errors());
    assert_eq!(summary.project, "Sales");
}

#[test]
fn test_sanitized_identifier_collision_is_an_error() {
    let mut store = sales_store();
    // Distinct names, identical after sanitization
    store.add_hub("My Table", "id", None).unwrap();
    store.add_hub("My-Table", "id", None).unwrap();

    let summary = validate_project(store.project());
    assert!(summary.has_errors());
    assert!(codes(&summary).contains(&"identifier-collision"));
    let issue = summary
        .issues
        .iter()
        .find(|i| i.code == "identifier-collision")
        .unwrap();
    assert_eq!(issue.severity, Severity::Error);
    assert!(issue.message.contains("My_Table"));
}

#[test]
fn test_cross_kind_collision_detected() {
    let mut store = sales_store();
    // Link names only need to be unique among links, so this is stored
    store.add_link("Customer", &[], None).unwrap();

    let summary = validate_project(store.project());
    let issue = summary
        .issues
        .iter()
        .find(|i| i.code == "identifier-collision")
        .unwrap();
    assert!(issue.message.contains("hub"));
    assert!(issue.message.contains("link"));
}

#[test]
fn test_same_name_satellites_on_different_parents_collide() {
    let mut store = sales_store();
    store
        .add_satellite("Details", ParentKind::Hub, "Customer", vec![])
        .unwrap();
    store
        .add_satellite("Details", ParentKind::Hub, "Product", vec![])
        .unwrap();

    let summary = validate_project(store.project());
    assert!(codes(&summary).contains(&"identifier-collision"));
}

#[test]
fn test_dangling_parent_is_a_warning() {
    let mut store = sales_store();
    store.remove_hub("Customer", true).unwrap();

    let summary = validate_project(store.project());
    assert!(!summary.has_errors());
    assert!(codes(&summary).contains(&"dangling-parent"));
    assert!(codes(&summary).contains(&"dangling-hub-ref"));
}

#[test]
fn test_underlinked_link_is_a_warning() {
    let mut store = sales_store();
    store.add_link("Solo", &["Customer".to_string()], None).unwrap();

    let summary = validate_project(store.project());
    assert!(!summary.has_errors());
    assert_eq!(summary.warning_count, 1);
    assert!(codes(&summary).contains(&"underlinked-link"));
}

#[test]
fn test_unknown_attribute_type_is_a_warning() {
    let mut store = sales_store();
    store
        .add_satellite(
            "Extras",
            ParentKind::Hub,
            "Product",
            vec![Attribute::new("payload", "jsonb")],
        )
        .unwrap();

    let summary = validate_project(store.project());
    assert!(!summary.has_errors());
    let issue = summary
        .issues
        .iter()
        .find(|i| i.code == "unknown-attribute-type")
        .unwrap();
    assert!(issue.message.contains("jsonb"));
    assert!(issue.message.contains("VARCHAR(255)"));
}

#[test]
fn test_summary_serializes_to_json() {
    let mut store = sales_store();
    store.remove_hub("Customer", true).unwrap();

    let summary = validate_project(store.project());
    let json = serde_json::to_string(&summary).unwrap();
    assert!(json.contains("\"dangling-parent\""));
    assert!(json.contains("\"warning\""));
}
