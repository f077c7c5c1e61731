//! Top-level purchase order fields and their tagged updates
use super::error::FormError;
use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::str::FromStr;

#[derive(minicbor::Encode, minicbor::Decode, Debug, Default, Clone, Copy, Eq, Hash, PartialEq)]
pub enum Currency {
    #[default]
    #[n(0)]
    USD,
    #[n(1)]
    INR,
    #[n(2)]
    EUR,
}

#[derive(minicbor::Encode, minicbor::Decode, Debug, Clone, Copy, Eq, PartialEq)]
pub enum PoType {
    #[n(0)]
    Individual,
    #[n(1)]
    Group,
}

/// A day on the calendar; PO dates carry no time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CalendarDate(NaiveDate);

// Order record owned by the form session. Every field may be empty until
// submit; the validator decides what is missing.
#[derive(minicbor::Encode, minicbor::Decode, Debug, Clone, Default, PartialEq, Eq)]
pub struct PurchaseOrder {
    #[n(0)]
    pub client_id: Option<String>,
    #[n(1)]
    pub po_type: Option<PoType>,
    #[n(2)]
    pub po_number: String,
    #[n(3)]
    pub received_on: Option<CalendarDate>,
    #[n(4)]
    pub received_from_name: String,
    #[n(5)]
    pub received_from_email: String,
    #[n(6)]
    pub po_start_date: Option<CalendarDate>,
    #[n(7)]
    pub po_end_date: Option<CalendarDate>,
    #[n(8)]
    pub budget: String, // digits only, length checked on submit
    #[n(9)]
    pub currency: Currency,
}

/// Names a top-level order field, used to key validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderField {
    ClientId,
    PoType,
    PoNumber,
    ReceivedOn,
    ReceivedFromName,
    ReceivedFromEmail,
    PoStartDate,
    PoEndDate,
    Budget,
    Currency,
}

/// One assignment to a top-level order field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderUpdate {
    ClientId(Option<String>),
    PoType(Option<PoType>),
    PoNumber(String),
    ReceivedOn(Option<CalendarDate>),
    ReceivedFromName(String),
    ReceivedFromEmail(String),
    PoStartDate(Option<CalendarDate>),
    PoEndDate(Option<CalendarDate>),
    Budget(String),
    Currency(Currency),
}

impl Currency {
    pub const ALL: [Currency; 3] = [Currency::USD, Currency::INR, Currency::EUR];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::INR => "INR",
            Currency::EUR => "EUR",
        }
    }
    pub fn label(&self) -> &'static str {
        match self {
            Currency::USD => "USD - Dollars ($)",
            Currency::INR => "INR - Rupees (₹)",
            Currency::EUR => "EUR - Euros (€)",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Currency {
    type Err = FormError;

    // accepts either the select label or the bare ISO code
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Currency::ALL
            .into_iter()
            .find(|c| c.label() == s || c.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| FormError::UnknownCurrency(s.into()))
    }
}

impl PoType {
    pub fn label(&self) -> &'static str {
        match self {
            PoType::Individual => "Individual PO",
            PoType::Group => "Group PO",
        }
    }
}

impl fmt::Display for PoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PoType {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Individual PO" => Ok(PoType::Individual),
            "Group PO" => Ok(PoType::Group),
            other => Err(FormError::UnknownPoType(other.into())),
        }
    }
}

impl CalendarDate {
    /// `None` when the day does not exist.
    pub fn new_with(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(CalendarDate)
    }
    pub fn to_naive_date(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(value: NaiveDate) -> Self {
        CalendarDate(value)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%d/%m/%Y"))
    }
}

impl FromStr for CalendarDate {
    type Err = FormError;

    // dd/mm/yyyy as typed into the picker, or ISO yyyy-mm-dd
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        NaiveDate::parse_from_str(s, "%d/%m/%Y")
            .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
            .map(CalendarDate)
            .map_err(|_| FormError::InvalidDate(s.into()))
    }
}

impl<C> minicbor::Encode<C> for CalendarDate {
    fn encode<W: minicbor::encode::Write>(
        &self,
        e: &mut minicbor::Encoder<W>,
        _: &mut C,
    ) -> Result<(), minicbor::encode::Error<W::Error>> {
        e.i32(self.0.num_days_from_ce())?.ok()
    }
}

impl<'b, C> minicbor::Decode<'b, C> for CalendarDate {
    fn decode(d: &mut minicbor::Decoder<'b>, _: &mut C) -> Result<Self, minicbor::decode::Error> {
        let days = d.i32()?;

        NaiveDate::from_num_days_from_ce_opt(days)
            .map(CalendarDate)
            .ok_or(minicbor::decode::Error::message(
                "failed to convert day count to a calendar date",
            ))
    }
}

impl OrderUpdate {
    pub fn field(&self) -> OrderField {
        match self {
            OrderUpdate::ClientId(_) => OrderField::ClientId,
            OrderUpdate::PoType(_) => OrderField::PoType,
            OrderUpdate::PoNumber(_) => OrderField::PoNumber,
            OrderUpdate::ReceivedOn(_) => OrderField::ReceivedOn,
            OrderUpdate::ReceivedFromName(_) => OrderField::ReceivedFromName,
            OrderUpdate::ReceivedFromEmail(_) => OrderField::ReceivedFromEmail,
            OrderUpdate::PoStartDate(_) => OrderField::PoStartDate,
            OrderUpdate::PoEndDate(_) => OrderField::PoEndDate,
            OrderUpdate::Budget(_) => OrderField::Budget,
            OrderUpdate::Currency(_) => OrderField::Currency,
        }
    }
}

impl OrderField {
    /// Flat camelCase key for this field, as used in legacy error maps.
    pub fn key(&self) -> &'static str {
        match self {
            OrderField::ClientId => "clientId",
            OrderField::PoType => "poType",
            OrderField::PoNumber => "poNumber",
            OrderField::ReceivedOn => "receivedOn",
            OrderField::ReceivedFromName => "receivedFromName",
            OrderField::ReceivedFromEmail => "receivedFromEmail",
            OrderField::PoStartDate => "poStartDate",
            OrderField::PoEndDate => "poEndDate",
            OrderField::Budget => "budget",
            OrderField::Currency => "currency",
        }
    }
}

impl PurchaseOrder {
    /// An empty order priced in `currency`.
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            ..Self::default()
        }
    }
    /// Chained form of [`PurchaseOrder::apply`].
    pub fn with(mut self, update: OrderUpdate) -> Self {
        self.apply(update);
        self
    }
    /// Assigns one field. No validation happens here.
    pub fn apply(&mut self, update: OrderUpdate) {
        match update {
            // an empty selection means "no client"
            OrderUpdate::ClientId(id) => self.client_id = id.filter(|id| !id.is_empty()),
            OrderUpdate::PoType(po_type) => self.po_type = po_type,
            OrderUpdate::PoNumber(number) => self.po_number = number,
            OrderUpdate::ReceivedOn(date) => self.received_on = date,
            OrderUpdate::ReceivedFromName(name) => self.received_from_name = name,
            OrderUpdate::ReceivedFromEmail(email) => self.received_from_email = email,
            OrderUpdate::PoStartDate(date) => self.po_start_date = date,
            OrderUpdate::PoEndDate(date) => self.po_end_date = date,
            OrderUpdate::Budget(budget) => self.budget = budget,
            OrderUpdate::Currency(currency) => self.currency = currency,
        }
    }
    pub fn is_individual(&self) -> bool {
        self.po_type == Some(PoType::Individual)
    }
    pub fn is_group(&self) -> bool {
        self.po_type == Some(PoType::Group)
    }
}
