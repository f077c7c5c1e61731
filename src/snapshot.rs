//! Immutable record of a purchase order that passed validation
use super::catalog::ReferenceData;
use super::order::{Currency, PurchaseOrder};
use super::section::RequisitionSection;
use std::fmt;

#[derive(minicbor::Encode, minicbor::Decode, Debug, Clone, PartialEq, Eq)]
pub struct SubmittedTalent {
    #[n(0)]
    pub id: String,
    #[n(1)]
    pub name: String,
    #[n(2)]
    pub bill_rate: String,
    #[n(3)]
    pub standard_time_br: String,
    #[n(4)]
    pub over_time_br: String,
    #[n(5)]
    pub contract_duration: String,
    #[n(6)]
    pub currency: Currency, // resolved, inherited or not
}

// job id is dropped; title and REQ code are what reviewers read
#[derive(minicbor::Encode, minicbor::Decode, Debug, Clone, PartialEq, Eq)]
pub struct SubmittedSection {
    #[n(0)]
    pub job_title: String,
    #[n(1)]
    pub req_id: String,
    #[n(2)]
    pub talents: Vec<SubmittedTalent>,
}

#[derive(minicbor::Encode, minicbor::Decode, Debug, Clone, PartialEq, Eq)]
pub struct SubmittedPayload {
    #[n(0)]
    pub order: PurchaseOrder,
    #[n(1)]
    pub client_name: String,
    #[n(2)]
    pub sections: Vec<SubmittedSection>,
}

impl SubmittedPayload {
    /// Copies the order and, per section, only the selected talents.
    pub fn capture<R: ReferenceData + ?Sized>(
        order: &PurchaseOrder,
        sections: &[RequisitionSection],
        catalog: &R,
    ) -> Self {
        let client_name = order
            .client_id
            .as_deref()
            .and_then(|id| catalog.client_name(id))
            .unwrap_or_default()
            .to_string();

        let sections = sections
            .iter()
            .map(|s| SubmittedSection {
                job_title: s.job_title.clone(),
                req_id: s.req_id.clone(),
                talents: s
                    .selected_talents()
                    .map(|t| SubmittedTalent {
                        id: t.id.clone(),
                        name: t.name.clone(),
                        bill_rate: t.bill_rate.clone(),
                        standard_time_br: t.standard_time_br.clone(),
                        over_time_br: t.over_time_br.clone(),
                        contract_duration: t.contract_duration.clone(),
                        currency: t.currency.currency(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            order: order.clone(),
            client_name,
            sections,
        }
    }

    pub fn talent_count(&self) -> usize {
        self.sections.iter().map(|s| s.talents.len()).sum()
    }

    // returns a hash of the payload and its contents serialised into cbor
    pub fn finalise(&self) -> anyhow::Result<(String, Vec<u8>)> {
        let contents = minicbor::to_vec(self)?;
        let hash = sha256::digest(&contents);

        Ok((hash, contents))
    }

    pub fn decode(bytes: &[u8]) -> anyhow::Result<Self> {
        Ok(minicbor::decode(bytes)?)
    }
}

fn date_or_blank(date: Option<crate::order::CalendarDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_default()
}

// Read-only summary shown once the order is submitted.
impl fmt::Display for SubmittedPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.order;
        let po_type = p.po_type.map(|t| t.label()).unwrap_or_default();

        writeln!(f, "Purchase Order Details (Read-only)")?;
        writeln!(f, "Client Name: {}", self.client_name)?;
        writeln!(f, "PO Type: {po_type}")?;
        writeln!(f, "PO Number: {}", p.po_number)?;
        writeln!(f, "Received On: {}", date_or_blank(p.received_on))?;
        writeln!(f, "Received From: {}", p.received_from_name)?;
        writeln!(f, "Received Email: {}", p.received_from_email)?;
        writeln!(f, "Budget: {} {}", p.budget, p.currency)?;
        writeln!(
            f,
            "PO Period: {} - {}",
            date_or_blank(p.po_start_date),
            date_or_blank(p.po_end_date)
        )?;
        writeln!(f)?;
        writeln!(f, "Talent Details")?;
        for s in &self.sections {
            writeln!(f, "Job: {} ({})", s.job_title, s.req_id)?;
            if s.talents.is_empty() {
                writeln!(f, "  No talents selected")?;
            }
            for t in &s.talents {
                writeln!(
                    f,
                    "  {} | Bill Rate: {} | Std: {} | OT: {} | Contract: {} | {}",
                    t.name,
                    t.bill_rate,
                    t.standard_time_br,
                    t.over_time_br,
                    t.contract_duration,
                    t.currency
                )?;
            }
        }
        Ok(())
    }
}
