//! Form session: the one place purchase order state is mutated
use super::catalog::{Job, ReferenceData};
use super::config::FormConfig;
use super::error::{FormError, ValidationErrors};
use super::order::{OrderField, OrderUpdate, PurchaseOrder};
use super::section::{RequisitionSection, TalentSelection, TalentUpdate};
use super::snapshot::SubmittedPayload;
use super::utils::new_uuid_to_bech32;
use super::validate::Validator;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormView {
    Editing,
    ReadOnly(SubmittedPayload),
}

/// Owns one purchase order draft and its requisition sections.
///
/// Every operation runs to completion synchronously; the session is the
/// only writer of its state.
pub struct PurchaseOrderForm<R: ReferenceData> {
    catalog: Arc<R>,
    config: FormConfig,
    order: PurchaseOrder,
    sections: Vec<RequisitionSection>,
    errors: ValidationErrors,
    view: FormView,
}

impl<R: ReferenceData> PurchaseOrderForm<R> {
    pub fn new(catalog: Arc<R>) -> Result<Self, FormError> {
        Self::with_config(catalog, FormConfig::default())
    }

    pub fn with_config(catalog: Arc<R>, config: FormConfig) -> Result<Self, FormError> {
        let mut form = Self {
            catalog,
            order: PurchaseOrder::new(config.default_currency),
            config,
            sections: vec![],
            errors: ValidationErrors::new(),
            view: FormView::Editing,
        };
        let section = form.new_section()?;
        form.sections.push(section);

        Ok(form)
    }

    pub fn order(&self) -> &PurchaseOrder {
        &self.order
    }
    pub fn sections(&self) -> &[RequisitionSection] {
        &self.sections
    }
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }
    pub fn view(&self) -> &FormView {
        &self.view
    }
    pub fn config(&self) -> &FormConfig {
        &self.config
    }
    pub fn submitted(&self) -> Option<&SubmittedPayload> {
        match &self.view {
            FormView::ReadOnly(payload) => Some(payload),
            FormView::Editing => None,
        }
    }

    /// Jobs of the currently selected client, empty when none is chosen.
    pub fn client_jobs(&self) -> &[Job] {
        match self.order.client_id.as_deref() {
            Some(id) => self.catalog.jobs_for(id),
            None => &[],
        }
    }

    // "Add Another" is only offered on group orders
    pub fn can_add_section(&self) -> bool {
        self.order.is_group()
    }
    pub fn can_remove_section(&self) -> bool {
        self.sections.len() > 1
    }
    pub fn is_talent_editable(&self, section: usize, talent_id: &str) -> bool {
        self.sections
            .get(section)
            .and_then(|s| s.talent(talent_id))
            .is_some_and(TalentSelection::is_editable)
    }

    /// Assigns one order field and applies its cascade.
    ///
    /// A client change unbinds every section. A currency change re-points
    /// every talent currency that was not picked explicitly.
    pub fn set_field(&mut self, update: OrderUpdate) -> Result<(), FormError> {
        self.ensure_editable()?;

        let field = update.field();
        tracing::debug!(field = field.key(), "set order field");
        self.order.apply(update);

        match field {
            OrderField::ClientId => {
                for section in self.sections.iter_mut() {
                    section.clear_job();
                }
            }
            OrderField::Currency => {
                let currency = self.order.currency;
                for section in self.sections.iter_mut() {
                    section.backfill_currency(currency);
                }
            }
            _ => {}
        }

        Ok(())
    }

    /// Back to a blank order with a single empty section.
    pub fn reset(&mut self) -> Result<(), FormError> {
        let section = self.new_section()?;

        self.order = PurchaseOrder::new(self.config.default_currency);
        self.sections = vec![section];
        self.errors = ValidationErrors::new();
        self.view = FormView::Editing;

        tracing::info!("purchase order form reset");
        Ok(())
    }

    pub fn add_section(&mut self) -> Result<&RequisitionSection, FormError> {
        self.ensure_editable()?;

        let section = self.new_section()?;
        tracing::debug!(id = %section.id, "add requisition section");
        self.sections.push(section);

        Ok(&self.sections[self.sections.len() - 1])
    }

    // the last section may be removed here; hiding the control is the caller's job
    pub fn remove_section(&mut self, index: usize) -> Result<RequisitionSection, FormError> {
        self.ensure_editable()?;
        self.check_index(index)?;

        let removed = self.sections.remove(index);
        tracing::debug!(index, id = %removed.id, "remove requisition section");

        Ok(removed)
    }

    /// Binds a section to one of the current client's jobs. An id that does
    /// not resolve, including the empty "unselect" id, unbinds it.
    pub fn set_job(&mut self, index: usize, job_id: &str) -> Result<(), FormError> {
        self.ensure_editable()?;
        self.check_index(index)?;

        let currency = self.order.currency;
        let job = self
            .order
            .client_id
            .as_deref()
            .and_then(|client| self.catalog.job(client, job_id));

        let section = &mut self.sections[index];
        match job {
            Some(job) => section.assign_job(job, currency),
            None => section.clear_job(),
        }
        tracing::debug!(index, job_id, talents = section.talents.len(), "set section job");

        Ok(())
    }

    /// Flips one talent's selection and returns its new state. On an
    /// Individual PO every other talent in every section is deselected.
    pub fn toggle_selection(&mut self, index: usize, talent_id: &str) -> Result<bool, FormError> {
        self.ensure_editable()?;
        self.check_index(index)?;

        let talent = self.sections[index]
            .talent_mut(talent_id)
            .ok_or_else(|| FormError::UnknownTalent {
                section: index,
                talent_id: talent_id.into(),
            })?;
        talent.selected = !talent.selected;
        let selected = talent.selected;

        if self.order.is_individual() {
            for (idx, section) in self.sections.iter_mut().enumerate() {
                for t in section.talents.iter_mut() {
                    if idx != index || t.id != talent_id {
                        t.selected = false;
                    }
                }
            }
        }
        tracing::debug!(index, talent_id, selected, "toggle talent");

        Ok(selected)
    }

    pub fn set_talent_field(
        &mut self,
        index: usize,
        talent_id: &str,
        update: TalentUpdate,
    ) -> Result<(), FormError> {
        self.ensure_editable()?;
        self.check_index(index)?;

        let field = update.field();
        let talent = self.sections[index]
            .talent_mut(talent_id)
            .ok_or_else(|| FormError::UnknownTalent {
                section: index,
                talent_id: talent_id.into(),
            })?;
        talent.apply(update);
        tracing::debug!(index, talent_id, field = field.key(), "set talent field");

        Ok(())
    }

    /// Runs every rule against the current state without touching it.
    pub fn validate(&self) -> ValidationErrors {
        Validator::new(self.config.budget_max_digits).validate(&self.order, &self.sections)
    }

    /// Validates and, when clean, switches to the read-only snapshot.
    /// On failure the errors are kept for display and nothing else changes.
    pub fn submit(&mut self) -> Result<&SubmittedPayload, FormError> {
        self.ensure_editable()?;

        self.errors = self.validate();
        if !self.errors.is_empty() {
            tracing::warn!(count = self.errors.len(), "purchase order rejected");
            return Err(FormError::Invalid {
                count: self.errors.len(),
            });
        }

        let payload = SubmittedPayload::capture(&self.order, &self.sections, self.catalog.as_ref());
        tracing::info!(
            po_number = %payload.order.po_number,
            talents = payload.talent_count(),
            ?payload,
            "submitted purchase order"
        );
        self.view = FormView::ReadOnly(payload);

        self.submitted().ok_or(FormError::NotSubmitted)
    }

    /// Leaves the read-only view; the draft is exactly as it was submitted.
    pub fn back_to_edit(&mut self) -> Result<SubmittedPayload, FormError> {
        match std::mem::replace(&mut self.view, FormView::Editing) {
            FormView::ReadOnly(payload) => {
                tracing::info!("back to edit");
                Ok(payload)
            }
            FormView::Editing => Err(FormError::NotSubmitted),
        }
    }

    /// Acknowledges the submitted order and returns its content hash.
    /// Nothing is stored.
    pub fn accept(&self) -> Result<String, FormError> {
        let payload = self.submitted().ok_or(FormError::NotSubmitted)?;
        let (hash, contents) = payload.finalise()?;

        tracing::info!(%hash, bytes = contents.len(), "purchase order accepted");
        Ok(hash)
    }

    fn new_section(&self) -> Result<RequisitionSection, FormError> {
        let id = new_uuid_to_bech32(&self.config.section_id_prefix)?;
        Ok(RequisitionSection::new(id))
    }

    fn ensure_editable(&self) -> Result<(), FormError> {
        match self.view {
            FormView::Editing => Ok(()),
            FormView::ReadOnly(_) => Err(FormError::ReadOnly),
        }
    }

    fn check_index(&self, index: usize) -> Result<(), FormError> {
        if index < self.sections.len() {
            Ok(())
        } else {
            Err(FormError::SectionOutOfRange {
                index,
                len: self.sections.len(),
            })
        }
    }
}
