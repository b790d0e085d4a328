//! Typed records assembled from ordered field lists.
//!
//! Each assembler owns a fixed positional contract between the order fields
//! were read off the page and the record's named fields. The segmentation
//! scan is responsible for handing over complete lists; assemblers still
//! bounds-check and return `None` on short input instead of indexing past
//! the end.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::checkbox::{CheckboxSet, Checkboxes};

/// Sentinel for categorical fields whose checkbox region was unreadable.
pub const FAILED_TO_EXTRACT: &str = "Failed to extract";

/// Sentinel used by the property form for unreadable checkbox fields.
pub const CHECKBOX_UNREADABLE: &str = "Checkbox unreadable";

/// The 17 scalar inputs of Form 106Sum, in read order.
pub const SUMMARY_TEXT_INPUTS: [&str; 17] = [
    "1a", "1b", "1c", "2", "3a", "3b", "3_total", "4", "5", "8", "9a", "9b", "9c", "9d", "9e",
    "9f", "9g",
];

/// Statistic keys of Form 106 E/F part 4 (`6a`..`6k`; only the first ten
/// rows exist on the page).
pub const STATS_EF: [&str; 11] = [
    "6a", "6b", "6c", "6d", "6e", "6f", "6g", "6h", "6i", "6j", "6k",
];

static DOLLAR_VALUES: Lazy<Regex> = Lazy::new(|| Regex::new(r".*?\$[\d., $]+").unwrap());
static DOLLAR_CAPTURE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$(.*?) ").unwrap());

/// A checkbox-backed field: the checked labels, or an explicit sentinel
/// when the region could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Categorical {
    Checked(Vec<String>),
    Unreadable(&'static str),
}

impl Serialize for Categorical {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Categorical::Checked(values) => values.serialize(serializer),
            Categorical::Unreadable(sentinel) => serializer.serialize_str(sentinel),
        }
    }
}

impl Categorical {
    fn from_boxes<F>(boxes: &Checkboxes, sentinel: &'static str, field: F) -> Self
    where
        F: Fn(&CheckboxSet) -> &Vec<String>,
    {
        match boxes.as_readable() {
            Some(set) => Categorical::Checked(field(set).clone()),
            None => Categorical::Unreadable(sentinel),
        }
    }
}

/// A secondary notice party sharing a primary creditor's printed key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoticeParty {
    pub key: String,
    pub address: String,
    pub acct: String,
}

/// Priority/non-priority claim amounts, present only on part-2 entries of
/// Form 106 E/F.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriorityAmounts {
    pub non_priority_amount: String,
    pub priority_amount: String,
}

/// One unsecured creditor from Form 106 E/F.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnsecuredCreditor {
    pub key: String,
    pub name: String,
    pub acct: String,
    pub total: String,
    pub date: String,
    pub address: String,
    pub claim_type_other: String,
    pub debtor: Categorical,
    pub offset: Categorical,
    pub info: Categorical,
    pub claim_type: Categorical,
    pub community: Categorical,
    #[serde(flatten)]
    pub priority: Option<PriorityAmounts>,
    pub other_creditors: Vec<NoticeParty>,
}

impl UnsecuredCreditor {
    /// Positional contract: `[key, name, acct, total, .., date, address,
    /// other1, other2]` with the priority amounts at `len-6`/`len-5` on
    /// part-2 entries.
    pub fn assemble(data: &[String], boxes: &Checkboxes, key: &str) -> Option<Self> {
        if data.len() < 7 {
            return None;
        }
        let n = data.len();
        let priority = if key.contains("2.") && n >= 10 {
            Some(PriorityAmounts {
                non_priority_amount: data[n - 5].clone(),
                priority_amount: data[n - 6].clone(),
            })
        } else {
            None
        };
        Some(Self {
            key: data[0].replace('\n', ""),
            name: data[1].clone(),
            acct: data[2].clone(),
            total: data[3].clone(),
            date: data[n - 4].clone(),
            address: data[n - 3].clone(),
            claim_type_other: format!("{}{}", data[n - 2], data[n - 1]),
            debtor: Categorical::from_boxes(boxes, FAILED_TO_EXTRACT, |s| &s.debtor),
            offset: Categorical::from_boxes(boxes, FAILED_TO_EXTRACT, |s| &s.offset),
            info: Categorical::from_boxes(boxes, FAILED_TO_EXTRACT, |s| &s.info),
            claim_type: Categorical::from_boxes(boxes, FAILED_TO_EXTRACT, |s| &s.claim_type),
            community: Categorical::from_boxes(boxes, FAILED_TO_EXTRACT, |s| &s.community),
            priority,
            other_creditors: Vec::new(),
        })
    }
}

/// One secured creditor from Form 106D.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecuredCreditor {
    pub key: String,
    pub claim: String,
    pub collateral: String,
    pub unsecured: String,
    pub name: String,
    pub property: String,
    pub address: String,
    pub claim_type_other: String,
    pub date: String,
    pub acct: String,
    pub debtor: Categorical,
    pub info: Categorical,
    pub claim_type: Categorical,
    pub community: Categorical,
    pub other_creditors: Vec<NoticeParty>,
}

impl SecuredCreditor {
    /// Positional contract over the twelve fields read down the entry:
    /// indices 5 and 10 are blank separator reads and are dropped.
    pub fn assemble(data: &[String], boxes: &Checkboxes) -> Option<Self> {
        if data.len() < 12 {
            return None;
        }
        Some(Self {
            key: data[0].clone(),
            claim: data[1].clone(),
            collateral: data[2].clone(),
            unsecured: data[3].clone(),
            name: data[4].clone(),
            property: data[6].clone(),
            address: data[7].clone(),
            claim_type_other: data[8].clone(),
            date: data[9].clone(),
            acct: data[11].clone(),
            debtor: Categorical::from_boxes(boxes, FAILED_TO_EXTRACT, |s| &s.debtor),
            info: Categorical::from_boxes(boxes, FAILED_TO_EXTRACT, |s| &s.info),
            claim_type: Categorical::from_boxes(boxes, FAILED_TO_EXTRACT, |s| &s.claim_type),
            community: Categorical::from_boxes(boxes, FAILED_TO_EXTRACT, |s| &s.community),
            other_creditors: Vec::new(),
        })
    }
}

/// One real-estate entry from Form 106A/B part 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RealEstate {
    pub key: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub property_value: String,
    pub your_property_value: String,
    pub other: String,
    pub ownership_interest: String,
    pub county: String,
    pub property_id: String,
    pub property_interest: Categorical,
    pub debtor: Categorical,
}

impl RealEstate {
    pub fn assemble(key: &str, data: &[String], boxes: &Checkboxes) -> Option<Self> {
        if data.len() < 9 {
            return None;
        }
        let property_id = if data.len() == 10 {
            data[9].clone()
        } else {
            String::new()
        };
        Some(Self {
            key: key.to_string(),
            address: data[0].clone(),
            city: data[1].clone(),
            state: data[2].clone(),
            zip: data[3].clone(),
            property_value: data[4].clone(),
            your_property_value: data[5].clone(),
            other: data[6].clone(),
            ownership_interest: data[7].clone(),
            county: data[8].clone(),
            property_id,
            property_interest: Categorical::from_boxes(boxes, CHECKBOX_UNREADABLE, |s| {
                &s.property
            }),
            debtor: Categorical::from_boxes(boxes, CHECKBOX_UNREADABLE, |s| &s.debtor),
        })
    }
}

/// One vehicle/vessel entry from Form 106A/B part 2 (item 3).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vehicle {
    pub key: String,
    pub make: String,
    pub model: String,
    pub year: String,
    pub mileage: String,
    pub other_information: String,
    pub property_value: String,
    pub your_property_value: String,
    pub debtor: Categorical,
}

impl Vehicle {
    pub fn assemble(key: &str, data: &[String], boxes: &Checkboxes) -> Option<Self> {
        if data.len() < 8 {
            return None;
        }
        Some(Self {
            key: key.to_string(),
            make: data[0].clone(),
            model: data[1].clone(),
            year: data[2].clone(),
            mileage: data[3].clone(),
            other_information: data[5].clone(),
            property_value: data[6].clone(),
            your_property_value: data[7].clone(),
            debtor: Categorical::from_boxes(boxes, CHECKBOX_UNREADABLE, |s| &s.debtor),
        })
    }
}

/// One non-vehicle property entry from Form 106A/B part 2 (item 4).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OtherProperty {
    pub key: String,
    pub make: String,
    pub model: String,
    pub year: String,
    pub other: String,
    pub property_value: String,
    pub your_property_value: String,
    pub debtor: Categorical,
}

impl OtherProperty {
    pub fn assemble(key: &str, data: &[String], boxes: &Checkboxes) -> Option<Self> {
        if data.len() < 7 {
            return None;
        }
        Some(Self {
            key: key.to_string(),
            make: data[0].clone(),
            model: data[1].clone(),
            year: data[2].clone(),
            other: data[4].clone(),
            property_value: data[5].clone(),
            your_property_value: data[6].clone(),
            debtor: Categorical::from_boxes(boxes, CHECKBOX_UNREADABLE, |s| &s.debtor),
        })
    }
}

/// Any entry of the A/B "cars, land and crafts" list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyEntry {
    RealEstate(RealEstate),
    Vehicle(Vehicle),
    Other(OtherProperty),
}

/// A cleaned A/B field value: either the dollar amounts found in the raw
/// rows, or the rows joined as free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AbValue {
    Amounts(Vec<String>),
    Text(String),
}

/// Collapse accumulated A/B data rows into a field value: dollar-amount
/// captures when present, the joined text otherwise.
pub fn clean_ab_data(data: &[String]) -> AbValue {
    let joined = data.join(" ");
    let amounts: Vec<String> = DOLLAR_VALUES
        .find_iter(&joined)
        .map(|m| m.as_str().to_string())
        .collect();
    if amounts.is_empty() {
        AbValue::Text(joined)
    } else {
        AbValue::Amounts(amounts)
    }
}

/// An A/B parts 3–7 entry, serialized as a single `{key: value}` mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtherPropertyEntry {
    pub key: String,
    pub value: AbValue,
}

impl Serialize for OtherPropertyEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.key, &self.value)?;
        map.end()
    }
}

/// The grand totals of Form 106A/B part 8.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AbTotals {
    pub total_real_estate: String,
    pub total_vehicles: String,
    pub total_household: String,
    pub total_financial_assets: String,
    pub total_business: String,
    pub total_farm: String,
    pub total_other: String,
    pub total_personal: String,
    pub total_all: String,
}

impl AbTotals {
    /// Build the totals from the accumulated part-8 rows. The page prints
    /// ten dollar figures; the ninth is the copied-over personal-property
    /// subtotal and is skipped.
    pub fn assemble(part_eight: &[String]) -> Option<Self> {
        let joined = format!("{} ", part_eight.join(" "));
        let amounts: Vec<String> = DOLLAR_CAPTURE
            .captures_iter(&joined)
            .map(|c| c[1].to_string())
            .collect();
        if amounts.len() < 10 {
            return None;
        }
        Some(Self {
            total_real_estate: amounts[0].clone(),
            total_vehicles: amounts[1].clone(),
            total_household: amounts[2].clone(),
            total_financial_assets: amounts[3].clone(),
            total_business: amounts[4].clone(),
            total_farm: amounts[5].clone(),
            total_other: amounts[6].clone(),
            total_personal: amounts[7].clone(),
            total_all: amounts[9].clone(),
        })
    }
}
