use form106_core::checkbox::{CheckboxSet, Checkboxes};
use form106_core::records::{
    AbTotals, AbValue, CHECKBOX_UNREADABLE, Categorical, FAILED_TO_EXTRACT, OtherProperty,
    OtherPropertyEntry, RealEstate, SecuredCreditor, UnsecuredCreditor, Vehicle, clean_ab_data,
};
use serde_json::json;

fn data(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn readable(debtor: &[&str]) -> Checkboxes {
    Checkboxes::Readable(CheckboxSet {
        debtor: debtor.iter().map(|d| d.to_string()).collect(),
        ..CheckboxSet::default()
    })
}

#[test]
fn unsecured_assembly_needs_seven_fields() {
    let boxes = readable(&[]);
    assert!(UnsecuredCreditor::assemble(&data(&["1.1", "a", "b", "c", "d", "e"]), &boxes, "1.1").is_none());
    assert!(
        UnsecuredCreditor::assemble(&data(&["1.1", "a", "b", "c", "d", "e", "f"]), &boxes, "1.1")
            .is_some()
    );
}

#[test]
fn unsecured_fields_follow_the_read_order() {
    let boxes = readable(&["Debtor 1 only"]);
    let fields = data(&[
        "1.1",
        "Internal Revenue Service",
        "1234",
        "5,000.00",
        "",
        "11/2019",
        "PO Box 7346",
        "fines and",
        " penalties",
    ]);
    let creditor = UnsecuredCreditor::assemble(&fields, &boxes, "1.1").unwrap();
    assert_eq!(creditor.key, "1.1");
    assert_eq!(creditor.name, "Internal Revenue Service");
    assert_eq!(creditor.acct, "1234");
    assert_eq!(creditor.total, "5,000.00");
    assert_eq!(creditor.date, "11/2019");
    assert_eq!(creditor.address, "PO Box 7346");
    assert_eq!(creditor.claim_type_other, "fines and penalties");
    assert_eq!(creditor.debtor, Categorical::Checked(vec!["Debtor 1 only".to_string()]));
    assert!(creditor.priority.is_none());
    assert!(creditor.other_creditors.is_empty());
}

#[test]
fn priority_entries_carry_their_amount_pair() {
    let boxes = readable(&[]);
    let fields = data(&[
        "2.1", "IRS", "1234", "9,000.00", "6,000.00", "3,000.00", "11/2019", "PO Box", "", "",
    ]);
    let creditor = UnsecuredCreditor::assemble(&fields, &boxes, "2.1").unwrap();
    let priority = creditor.priority.unwrap();
    assert_eq!(priority.priority_amount, "6,000.00");
    assert_eq!(priority.non_priority_amount, "3,000.00");
    assert_eq!(creditor.date, "11/2019");

    // nonpriority keys never get the pair, whatever the length
    let creditor = UnsecuredCreditor::assemble(&fields, &boxes, "4.1").unwrap();
    assert!(creditor.priority.is_none());
}

#[test]
fn unsecured_keys_lose_embedded_newlines() {
    let boxes = readable(&[]);
    let fields = data(&["4.\n1", "a", "b", "c", "d", "e", "f"]);
    let creditor = UnsecuredCreditor::assemble(&fields, &boxes, "4.1").unwrap();
    assert_eq!(creditor.key, "4.1");
}

#[test]
fn unreadable_boxes_serialize_as_the_sentinel() {
    let fields = data(&["1.1", "a", "b", "c", "d", "e", "f"]);
    let creditor =
        UnsecuredCreditor::assemble(&fields, &Checkboxes::Unreadable, "1.1").unwrap();
    assert_eq!(creditor.debtor, Categorical::Unreadable(FAILED_TO_EXTRACT));

    let value = serde_json::to_value(&creditor).unwrap();
    assert_eq!(value["debtor"], json!("Failed to extract"));
    assert_eq!(value["claim_type"], json!("Failed to extract"));
    // priority amounts are flattened in, so a missing pair leaves no key
    assert!(value.get("priority_amount").is_none());
}

#[test]
fn readable_boxes_serialize_as_label_arrays() {
    let fields = data(&["1.1", "a", "b", "c", "d", "e", "f"]);
    let creditor = UnsecuredCreditor::assemble(&fields, &readable(&["Debtor 1 only"]), "1.1").unwrap();

    let value = serde_json::to_value(&creditor).unwrap();
    assert_eq!(value["debtor"], json!(["Debtor 1 only"]));
    assert_eq!(value["offset"], json!([]));
}

#[test]
fn flattened_priority_amounts_sit_at_the_top_level() {
    let boxes = readable(&[]);
    let fields = data(&[
        "2.1", "IRS", "1234", "9,000.00", "6,000.00", "3,000.00", "11/2019", "PO Box", "", "",
    ]);
    let creditor = UnsecuredCreditor::assemble(&fields, &boxes, "2.1").unwrap();
    let value = serde_json::to_value(&creditor).unwrap();
    assert_eq!(value["priority_amount"], json!("6,000.00"));
    assert_eq!(value["non_priority_amount"], json!("3,000.00"));
}

#[test]
fn secured_assembly_skips_the_blank_slots() {
    let boxes = readable(&[]);
    assert!(SecuredCreditor::assemble(&data(&["2.1"; 11]), &boxes).is_none());

    let fields = data(&[
        "2.1",
        "10,000.00",
        "8,000.00",
        "2,000.00",
        "Ally Financial",
        "",
        "2014 GMC Sierra",
        "123 Main St",
        "",
        "06/2018",
        "",
        "4581",
    ]);
    let creditor = SecuredCreditor::assemble(&fields, &boxes).unwrap();
    assert_eq!(creditor.key, "2.1");
    assert_eq!(creditor.claim, "10,000.00");
    assert_eq!(creditor.collateral, "8,000.00");
    assert_eq!(creditor.unsecured, "2,000.00");
    assert_eq!(creditor.name, "Ally Financial");
    assert_eq!(creditor.property, "2014 GMC Sierra");
    assert_eq!(creditor.address, "123 Main St");
    assert_eq!(creditor.date, "06/2018");
    assert_eq!(creditor.acct, "4581");
}

#[test]
fn real_estate_reads_the_optional_parcel_id() {
    let boxes = Checkboxes::Unreadable;
    let nine = data(&[
        "12 Elm St",
        "Springfield",
        "IL",
        "62704",
        "90,000.00",
        "90,000.00",
        "",
        "Fee simple",
        "Sangamon",
    ]);
    let entry = RealEstate::assemble("1.1", &nine, &boxes).unwrap();
    assert_eq!(entry.county, "Sangamon");
    assert_eq!(entry.property_id, "");
    assert_eq!(entry.debtor, Categorical::Unreadable(CHECKBOX_UNREADABLE));

    let mut ten = nine.clone();
    ten.push("PARCEL-7".to_string());
    let entry = RealEstate::assemble("1.1", &ten, &boxes).unwrap();
    assert_eq!(entry.property_id, "PARCEL-7");

    assert!(RealEstate::assemble("1.1", &nine[..8].to_vec(), &boxes).is_none());
}

#[test]
fn vehicle_assembly_follows_the_grid() {
    let boxes = readable(&["Debtor 1 only"]);
    let fields = data(&[
        "Skido", "SM", "1998", "700", "", "Winter toy", "1,500.00", "1,500.00",
    ]);
    let vehicle = Vehicle::assemble("3.1", &fields, &boxes).unwrap();
    assert_eq!(vehicle.make, "Skido");
    assert_eq!(vehicle.model, "SM");
    assert_eq!(vehicle.year, "1998");
    assert_eq!(vehicle.mileage, "700");
    assert_eq!(vehicle.other_information, "Winter toy");
    assert_eq!(vehicle.property_value, "1,500.00");
    assert_eq!(vehicle.your_property_value, "1,500.00");

    assert!(Vehicle::assemble("3.1", &fields[..7].to_vec(), &boxes).is_none());
}

#[test]
fn other_property_assembly_follows_the_grid() {
    let boxes = readable(&[]);
    let fields = data(&["Canoe", "Coleman", "2004", "", "Red", "300.00", "300.00"]);
    let entry = OtherProperty::assemble("4.1", &fields, &boxes).unwrap();
    assert_eq!(entry.make, "Canoe");
    assert_eq!(entry.other, "Red");
    assert_eq!(entry.property_value, "300.00");

    assert!(OtherProperty::assemble("4.1", &fields[..6].to_vec(), &boxes).is_none());
}

#[test]
fn clean_ab_data_prefers_dollar_amounts() {
    assert_eq!(
        clean_ab_data(&data(&["Microwave $50.00", "Toaster $20.00"])),
        AbValue::Amounts(vec![
            "Microwave $50.00 ".to_string(),
            "Toaster $20.00".to_string()
        ])
    );
    assert_eq!(
        clean_ab_data(&data(&["no figures", "at all"])),
        AbValue::Text("no figures at all".to_string())
    );
}

#[test]
fn ab_totals_need_ten_figures_and_skip_the_ninth() {
    assert!(AbTotals::assemble(&data(&["$1.00 $2.00 $3.00"])).is_none());

    let rows = data(&[
        "55. $1.00 $2.00 $3.00 $4.00 $5.00",
        "62. $6.00 $7.00 $8.00",
        "63. $9.00 $10.00",
    ]);
    let totals = AbTotals::assemble(&rows).unwrap();
    assert_eq!(totals.total_real_estate, "1.00");
    assert_eq!(totals.total_farm, "6.00");
    assert_eq!(totals.total_personal, "8.00");
    assert_eq!(totals.total_all, "10.00");
}

#[test]
fn other_property_entries_serialize_as_single_key_maps() {
    let entry = OtherPropertyEntry {
        key: "6.".to_string(),
        value: AbValue::Amounts(vec!["Microwave $50.00".to_string()]),
    };
    assert_eq!(
        serde_json::to_value(&entry).unwrap(),
        json!({"6.": ["Microwave $50.00"]})
    );

    let entry = OtherPropertyEntry {
        key: "54.".to_string(),
        value: AbValue::Text("1,200.00".to_string()),
    };
    assert_eq!(
        serde_json::to_value(&entry).unwrap(),
        json!({"54.": "1,200.00"})
    );
}
