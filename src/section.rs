//! Requisition sections and the talent roster each one carries
use super::catalog::{Job, Talent};
use super::order::Currency;

/// Billing currency of a talent row.
///
/// `Inherited` follows the order currency; `Explicit` was picked on the row
/// and is never overwritten by an order currency change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TalentCurrency {
    Inherited(Currency),
    Explicit(Currency),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TalentSelection {
    pub id: String,
    pub name: String,
    pub selected: bool,
    pub bill_rate: String,
    pub standard_time_br: String,
    pub over_time_br: String,
    pub contract_duration: String, // months
    pub currency: TalentCurrency,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequisitionSection {
    pub id: String, // only used to key the row, carries no meaning
    pub job_id: Option<String>,
    pub job_title: String,
    pub req_id: String,
    pub talents: Vec<TalentSelection>,
}

/// Names a talent row field, used to key validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TalentField {
    BillRate,
    StandardTimeBr,
    OverTimeBr,
    ContractDuration,
    Currency,
}

/// One assignment to a talent row field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TalentUpdate {
    BillRate(String),
    StandardTimeBr(String),
    OverTimeBr(String),
    ContractDuration(String),
    Currency(Currency),
}

impl TalentCurrency {
    pub fn currency(&self) -> Currency {
        match self {
            TalentCurrency::Inherited(c) | TalentCurrency::Explicit(c) => *c,
        }
    }
    pub fn is_explicit(&self) -> bool {
        matches!(self, TalentCurrency::Explicit(_))
    }
}

impl TalentField {
    pub const BILLING: [TalentField; 4] = [
        TalentField::BillRate,
        TalentField::StandardTimeBr,
        TalentField::OverTimeBr,
        TalentField::ContractDuration,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            TalentField::BillRate => "billRate",
            TalentField::StandardTimeBr => "standardTimeBR",
            TalentField::OverTimeBr => "overTimeBR",
            TalentField::ContractDuration => "contractDuration",
            TalentField::Currency => "currency",
        }
    }
    pub fn label(&self) -> &'static str {
        match self {
            TalentField::BillRate => "Bill Rate",
            TalentField::StandardTimeBr => "Standard Time BR",
            TalentField::OverTimeBr => "Over Time BR",
            TalentField::ContractDuration => "Contract Duration",
            TalentField::Currency => "Currency",
        }
    }
}

impl TalentUpdate {
    pub fn field(&self) -> TalentField {
        match self {
            TalentUpdate::BillRate(_) => TalentField::BillRate,
            TalentUpdate::StandardTimeBr(_) => TalentField::StandardTimeBr,
            TalentUpdate::OverTimeBr(_) => TalentField::OverTimeBr,
            TalentUpdate::ContractDuration(_) => TalentField::ContractDuration,
            TalentUpdate::Currency(_) => TalentField::Currency,
        }
    }
}

impl TalentSelection {
    /// Fresh, unselected row for a catalog talent.
    pub fn from_catalog(talent: &Talent, currency: TalentCurrency) -> Self {
        Self {
            id: talent.id.clone(),
            name: talent.name.clone(),
            selected: false,
            bill_rate: String::new(),
            standard_time_br: String::new(),
            over_time_br: String::new(),
            contract_duration: String::new(),
            currency,
        }
    }
    pub fn apply(&mut self, update: TalentUpdate) {
        match update {
            TalentUpdate::BillRate(v) => self.bill_rate = v,
            TalentUpdate::StandardTimeBr(v) => self.standard_time_br = v,
            TalentUpdate::OverTimeBr(v) => self.over_time_br = v,
            TalentUpdate::ContractDuration(v) => self.contract_duration = v,
            TalentUpdate::Currency(c) => self.currency = TalentCurrency::Explicit(c),
        }
    }
    pub fn billing_value(&self, field: TalentField) -> Option<&str> {
        match field {
            TalentField::BillRate => Some(self.bill_rate.as_str()),
            TalentField::StandardTimeBr => Some(self.standard_time_br.as_str()),
            TalentField::OverTimeBr => Some(self.over_time_br.as_str()),
            TalentField::ContractDuration => Some(self.contract_duration.as_str()),
            TalentField::Currency => None,
        }
    }
    // rate and duration inputs are only live for selected rows
    pub fn is_editable(&self) -> bool {
        self.selected
    }
}

impl RequisitionSection {
    pub fn new(id: String) -> Self {
        Self {
            id,
            job_id: None,
            job_title: String::new(),
            req_id: String::new(),
            talents: vec![],
        }
    }
    /// Drops the job and its roster, keeping the row id.
    pub fn clear_job(&mut self) {
        self.job_id = None;
        self.job_title.clear();
        self.req_id.clear();
        self.talents.clear();
    }
    /// Binds the section to `job` and rebuilds the roster from its talents.
    ///
    /// A currency explicitly chosen on the previous roster carries over to the
    /// new rows; otherwise they inherit `order_currency`.
    pub fn assign_job(&mut self, job: &Job, order_currency: Currency) {
        let currency = self
            .talents
            .iter()
            .find(|t| t.currency.is_explicit())
            .map(|t| t.currency)
            .unwrap_or(TalentCurrency::Inherited(order_currency));

        self.job_id = Some(job.id.clone());
        self.job_title = job.title.clone();
        self.req_id = job.req_id.clone();
        self.talents = job
            .talents()
            .iter()
            .map(|t| TalentSelection::from_catalog(t, currency))
            .collect();
    }
    /// Re-points every inherited currency at the new order currency.
    pub fn backfill_currency(&mut self, order_currency: Currency) {
        for talent in self.talents.iter_mut() {
            if !talent.currency.is_explicit() {
                talent.currency = TalentCurrency::Inherited(order_currency);
            }
        }
    }
    pub fn talent(&self, talent_id: &str) -> Option<&TalentSelection> {
        self.talents.iter().find(|t| t.id == talent_id)
    }
    pub fn talent_mut(&mut self, talent_id: &str) -> Option<&mut TalentSelection> {
        self.talents.iter_mut().find(|t| t.id == talent_id)
    }
    pub fn selected_talents(&self) -> impl Iterator<Item = &TalentSelection> {
        self.talents.iter().filter(|t| t.selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{MockDirectory, ReferenceData};

    fn job1() -> Job {
        MockDirectory::default().job("c1", "job1").cloned().unwrap()
    }

    #[test]
    fn assign_job_builds_unselected_roster() {
        let mut section = RequisitionSection::new("req1x".into());
        section.assign_job(&job1(), Currency::INR);

        assert_eq!(section.job_id.as_deref(), Some("job1"));
        assert_eq!(section.job_title, "Application Development");
        assert_eq!(section.req_id, "OWNAI_234");
        assert_eq!(section.talents.len(), 3);
        for t in &section.talents {
            assert!(!t.selected);
            assert!(t.bill_rate.is_empty() && t.contract_duration.is_empty());
            assert_eq!(t.currency, TalentCurrency::Inherited(Currency::INR));
        }
    }

    #[test]
    fn explicit_currency_carries_into_new_roster() {
        let mut section = RequisitionSection::new("req1x".into());
        section.assign_job(&job1(), Currency::USD);
        section
            .talent_mut("t2")
            .unwrap()
            .apply(TalentUpdate::Currency(Currency::EUR));

        let job2 = MockDirectory::default().job("c1", "job2").cloned().unwrap();
        section.assign_job(&job2, Currency::USD);

        assert!(
            section
                .talents
                .iter()
                .all(|t| t.currency == TalentCurrency::Explicit(Currency::EUR))
        );
    }

    #[test]
    fn backfill_skips_explicit_rows() {
        let mut section = RequisitionSection::new("req1x".into());
        section.assign_job(&job1(), Currency::USD);
        section
            .talent_mut("t1")
            .unwrap()
            .apply(TalentUpdate::Currency(Currency::USD));

        section.backfill_currency(Currency::EUR);

        assert_eq!(section.talent("t1").unwrap().currency.currency(), Currency::USD);
        assert_eq!(section.talent("t2").unwrap().currency.currency(), Currency::EUR);
        assert_eq!(section.talent("t3").unwrap().currency.currency(), Currency::EUR);
    }

    #[test]
    fn clear_job_keeps_id() {
        let mut section = RequisitionSection::new("req1x".into());
        section.assign_job(&job1(), Currency::USD);
        section.clear_job();

        assert_eq!(section, RequisitionSection::new("req1x".into()));
    }
}
