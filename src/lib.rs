//! Form state and validation for talent purchase orders.
//!
//! A [`PurchaseOrderForm`] owns one draft order plus its requisition
//! sections, applies the cascading rules as fields change, and on submit
//! either reports structured [`ValidationErrors`] or produces an immutable
//! [`SubmittedPayload`].

pub mod catalog;
pub mod config;
pub mod error;
pub mod form;
pub mod order;
pub mod section;
pub mod snapshot;
pub mod utils;
pub mod validate;

pub use catalog::{MockDirectory, ReferenceData};
pub use config::FormConfig;
pub use error::{ErrorKey, FieldError, FormError, ValidationErrors};
pub use form::{FormView, PurchaseOrderForm};
pub use order::{CalendarDate, Currency, OrderField, OrderUpdate, PoType, PurchaseOrder};
pub use section::{RequisitionSection, TalentCurrency, TalentField, TalentSelection, TalentUpdate};
pub use snapshot::SubmittedPayload;
