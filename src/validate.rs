//! Submit-time business rules for a purchase order and its sections.
//!
//! Validation is a pure pass over the form state: it never fails, it only
//! reports which rules are broken. Every rule runs on every call.
use super::error::{ErrorKey, ValidationErrors};
use super::order::{OrderField, PoType, PurchaseOrder};
use super::section::{RequisitionSection, TalentField};
use regex::Regex;
use std::sync::LazyLock;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern compiles"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validator {
    pub budget_max_digits: usize,
}

impl Default for Validator {
    fn default() -> Self {
        Self {
            budget_max_digits: 5,
        }
    }
}

/// Runs every rule with the stock limits.
pub fn validate(order: &PurchaseOrder, sections: &[RequisitionSection]) -> ValidationErrors {
    Validator::default().validate(order, sections)
}

impl Validator {
    pub fn new(budget_max_digits: usize) -> Self {
        Self { budget_max_digits }
    }

    pub fn validate(
        &self,
        order: &PurchaseOrder,
        sections: &[RequisitionSection],
    ) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        self.check_order(order, &mut errors);
        let selected = check_sections(sections, &mut errors);
        check_talent_count(order.po_type, selected, &mut errors);

        errors
    }

    fn check_order(&self, order: &PurchaseOrder, e: &mut ValidationErrors) {
        let key = ErrorKey::Order;

        if order.client_id.as_deref().is_none_or(str::is_empty) {
            e.insert(key(OrderField::ClientId), "Client Name is required");
        }
        if order.po_type.is_none() {
            e.insert(key(OrderField::PoType), "Purchase Order Type is required");
        }
        if order.po_number.trim().is_empty() {
            e.insert(key(OrderField::PoNumber), "PO Number is required");
        }
        if order.received_on.is_none() {
            e.insert(key(OrderField::ReceivedOn), "Received On date is required");
        }
        if order.received_from_name.is_empty() {
            e.insert(
                key(OrderField::ReceivedFromName),
                "Received From Name is required",
            );
        }
        if order.received_from_email.is_empty() {
            e.insert(
                key(OrderField::ReceivedFromEmail),
                "Received From Email is required",
            );
        } else if !EMAIL.is_match(&order.received_from_email) {
            e.insert(key(OrderField::ReceivedFromEmail), "Enter a valid email");
        }
        if order.po_start_date.is_none() {
            e.insert(key(OrderField::PoStartDate), "PO Start Date is required");
        }
        if order.po_end_date.is_none() {
            e.insert(key(OrderField::PoEndDate), "PO End Date is required");
        }
        if let (Some(start), Some(end)) = (order.po_start_date, order.po_end_date) {
            if end < start {
                e.insert(
                    key(OrderField::PoEndDate),
                    "PO End Date cannot be before PO Start Date",
                );
            }
        }
        if order.budget.is_empty() {
            e.insert(key(OrderField::Budget), "Budget is required");
        } else if !order.budget.chars().all(|c| c.is_ascii_digit()) {
            e.insert(key(OrderField::Budget), "Budget must be numeric");
        } else if order.budget.len() > self.budget_max_digits {
            e.insert(
                key(OrderField::Budget),
                format!(
                    "Budget maximum {} digits allowed",
                    self.budget_max_digits
                ),
            );
        }
        // currency is an enum with a default, so there is nothing to report
    }
}

// Returns how many talents are selected across all bound sections.
fn check_sections(sections: &[RequisitionSection], e: &mut ValidationErrors) -> usize {
    let mut selected = 0;

    for (idx, section) in sections.iter().enumerate() {
        if section.job_id.as_deref().is_none_or(str::is_empty) {
            e.insert(
                ErrorKey::Section { index: idx },
                "Please select Job/REQ for this section",
            );
            continue;
        }

        for talent in section.selected_talents() {
            selected += 1;

            for field in TalentField::BILLING {
                let blank = talent
                    .billing_value(field)
                    .is_none_or(|v| v.trim().is_empty());
                if blank {
                    e.insert(
                        ErrorKey::Talent {
                            section: idx,
                            talent_id: talent.id.clone(),
                            field,
                        },
                        format!("{} required for {}", field.label(), talent.name),
                    );
                }
            }
        }
    }

    selected
}

fn check_talent_count(po_type: Option<PoType>, selected: usize, e: &mut ValidationErrors) {
    match po_type {
        Some(PoType::Individual) if selected == 0 => {
            e.insert(ErrorKey::TalentCount, "Select one talent for Individual PO")
        }
        Some(PoType::Individual) if selected > 1 => e.insert(
            ErrorKey::TalentCount,
            "Only one talent allowed for Individual PO",
        ),
        Some(PoType::Group) if selected < 2 => e.insert(
            ErrorKey::TalentCount,
            "Select at least two talents for Group PO",
        ),
        _ => {}
    }
}
