use rust_decimal::Decimal;
use serde_json::json;
use storefront_api::{
    crud::{CategoryDraft, EditableTable, FieldKind, ProductDraft, Record, SaveMode, TableName},
    error::ValidationError,
    models::ProductStatus,
};

#[test]
fn read_only_tables_are_not_editable() {
    assert_eq!(TableName::Orders.editable(), None);
    assert_eq!(TableName::OrderItems.editable(), None);
    for table in EditableTable::ALL {
        assert_eq!(table.table().editable(), Some(table));
    }
}

#[test]
fn table_names_round_trip_through_serde() {
    for table in TableName::ALL {
        let encoded = serde_json::to_value(table).expect("serialize");
        assert_eq!(encoded, json!(table.as_str()));
        let decoded: TableName = serde_json::from_value(encoded).expect("deserialize");
        assert_eq!(decoded, table);
    }
}

#[test]
fn blank_records_match_their_table() {
    for table in EditableTable::ALL {
        let blank = table.blank();
        assert_eq!(blank.table(), table);
        assert!(!table.config().fields.is_empty());
    }

    let Record::Product(product) = EditableTable::Products.blank() else {
        panic!("products blank must be a product draft");
    };
    assert_eq!(product.status, ProductStatus::Free);
    assert_eq!(product.price, Decimal::ZERO);
    assert_eq!(product.seller_id, None);
}

#[test]
fn blank_records_fail_validation() {
    for table in EditableTable::ALL {
        assert!(
            table.blank().validate().is_err(),
            "blank {:?} must not pass validation",
            table
        );
    }
}

#[test]
fn product_fields_reference_sellers() {
    let fields = EditableTable::Products.config().fields;
    let seller = fields
        .iter()
        .find(|f| f.name == "seller_id")
        .expect("seller field");
    assert_eq!(seller.kind, FieldKind::OptionalReference(TableName::Sellers));
    assert!(!seller.required);
}

#[test]
fn payload_identity_is_dropped() {
    let record = Record::from_json(
        EditableTable::Categories,
        json!({ "id": 42, "name": "Hoodies", "parent_id": 1 }),
    )
    .expect("category payload");
    assert_eq!(
        record,
        Record::Category(CategoryDraft {
            name: "Hoodies".into(),
            parent_id: Some(1),
        })
    );
}

#[test]
fn product_validation_rejects_bad_values() {
    let product = |patch: serde_json::Value| {
        let mut base = json!({ "name": "Mug", "price": 12.5, "quantity": 3, "status": "free" });
        if let (Some(base), Some(patch)) = (base.as_object_mut(), patch.as_object()) {
            for (k, v) in patch {
                base.insert(k.clone(), v.clone());
            }
        }
        Record::from_json(EditableTable::Products, base).expect("product payload")
    };

    assert_eq!(product(json!({})).validate(), Ok(()));
    assert_eq!(
        product(json!({ "name": "   " })).validate(),
        Err(ValidationError::Required("name"))
    );
    assert_eq!(
        product(json!({ "price": -1 })).validate(),
        Err(ValidationError::Negative("price"))
    );
    assert_eq!(
        product(json!({ "quantity": -2 })).validate(),
        Err(ValidationError::Negative("quantity"))
    );
    assert_eq!(
        product(json!({ "seller_id": 0 })).validate(),
        Err(ValidationError::NonPositiveId("seller_id"))
    );
}

#[test]
fn unknown_status_is_a_payload_error() {
    let result = Record::from_json(
        EditableTable::Products,
        json!({ "name": "Mug", "status": "lost" }),
    );
    assert!(result.is_err());
}

#[test]
fn link_rows_need_both_references() {
    let record = Record::from_json(
        EditableTable::ProductAttributes,
        json!({ "product_id": 3, "value": "Red" }),
    )
    .expect("link payload");
    assert_eq!(
        record.validate(),
        Err(ValidationError::NonPositiveId("attribute_id"))
    );

    let record = Record::from_json(
        EditableTable::ProductAttributes,
        json!({ "product_id": 3, "attribute_id": 1, "value": "" }),
    )
    .expect("link payload");
    assert_eq!(record.validate(), Err(ValidationError::Required("value")));
}

#[test]
fn seller_requires_every_field() {
    let record = Record::from_json(
        EditableTable::Sellers,
        json!({ "full_name": "Ferris Goods", "address": "12 Harbor Street" }),
    )
    .expect("seller payload");
    assert_eq!(record.validate(), Err(ValidationError::Required("phone")));
}

#[test]
fn category_cannot_parent_itself_on_edit() {
    let record = Record::Category(CategoryDraft {
        name: "Hoodies".into(),
        parent_id: Some(7),
    });
    assert_eq!(record.validate_for(SaveMode::Add), Ok(()));
    assert_eq!(record.validate_for(SaveMode::Edit { id: 8 }), Ok(()));
    assert_eq!(
        record.validate_for(SaveMode::Edit { id: 7 }),
        Err(ValidationError::SelfParent)
    );
}

#[test]
fn product_draft_serializes_flat() {
    let record = Record::Product(ProductDraft {
        name: "Mug".into(),
        ..ProductDraft::default()
    });
    let value = serde_json::to_value(&record).expect("serialize");
    assert_eq!(value["name"], "Mug");
    assert_eq!(value["status"], "free");
}
