//! Property-based tests for the form's cascading rules and validator
//!
//! Each property drives a session through a random sequence of user
//! actions and then checks an invariant that must hold whatever the
//! sequence was.

use std::sync::Arc;

use proptest::prelude::*;
use purchase_order_form::{
    CalendarDate, Currency, MockDirectory, OrderField, OrderUpdate, PoType, PurchaseOrderForm,
    TalentCurrency, TalentUpdate,
};

// PROPERTY TEST STRATEGIES

/// (section index, talent position) pairs; positions wrap onto the roster
fn toggle_strategy() -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((0usize..3, 0usize..3), 1..20)
}

fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop_oneof![Just(Currency::USD), Just(Currency::INR), Just(Currency::EUR)]
}

fn job_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("job1"), Just("job2"), Just("")]
}

/// Short non-blank billing values
fn value_strategy() -> impl Strategy<Value = String> {
    "[0-9]{1,3}(\\.[0-9]{1,2})?"
}

/// A form for client c1 with sections bound to job1, job2, job1.
fn three_sections(po_type: Option<PoType>) -> PurchaseOrderForm<MockDirectory> {
    let mut form = PurchaseOrderForm::new(Arc::new(MockDirectory::default())).unwrap();
    form.set_field(OrderUpdate::ClientId(Some("c1".into()))).unwrap();
    form.set_field(OrderUpdate::PoType(po_type)).unwrap();
    form.add_section().unwrap();
    form.add_section().unwrap();
    form.set_job(0, "job1").unwrap();
    form.set_job(1, "job2").unwrap();
    form.set_job(2, "job1").unwrap();
    form
}

fn talent_at(form: &PurchaseOrderForm<MockDirectory>, section: usize, pos: usize) -> String {
    let talents = &form.sections()[section].talents;
    talents[pos % talents.len()].id.clone()
}

fn selected_count(form: &PurchaseOrderForm<MockDirectory>) -> usize {
    form.sections()
        .iter()
        .map(|s| s.selected_talents().count())
        .sum()
}

fn valid_header(form: &mut PurchaseOrderForm<MockDirectory>, po_type: PoType, budget: String) {
    for update in [
        OrderUpdate::PoType(Some(po_type)),
        OrderUpdate::PoNumber("PO-1".into()),
        OrderUpdate::ReceivedOn(CalendarDate::new_with(2024, 1, 2)),
        OrderUpdate::ReceivedFromName("Sam".into()),
        OrderUpdate::ReceivedFromEmail("sam@example.org".into()),
        OrderUpdate::PoStartDate(CalendarDate::new_with(2024, 2, 1)),
        OrderUpdate::PoEndDate(CalendarDate::new_with(2024, 3, 1)),
        OrderUpdate::Budget(budget),
    ] {
        form.set_field(update).unwrap();
    }
}

// PROPERTY TESTS
proptest! {
    /// Property: on an Individual PO, at most one talent is ever selected and
    /// the talent just toggled on is the one left standing
    #[test]
    fn prop_individual_selection_is_exclusive(toggles in toggle_strategy()) {
        let mut form = three_sections(Some(PoType::Individual));

        for (section, pos) in toggles {
            let id = talent_at(&form, section, pos);
            let now_selected = form.toggle_selection(section, &id).unwrap();

            let count = selected_count(&form);
            if now_selected {
                prop_assert_eq!(count, 1);
                prop_assert!(form.sections()[section].talent(&id).unwrap().selected);
            } else {
                prop_assert_eq!(count, 0);
            }
        }
    }

    /// Property: a client change leaves no section with a stale job or roster
    #[test]
    fn prop_client_change_clears_sections(
        toggles in toggle_strategy(),
        next_client in prop_oneof![Just("c1"), Just("c2"), Just("zz"), Just("")],
    ) {
        let mut form = three_sections(Some(PoType::Group));
        for (section, pos) in toggles {
            let id = talent_at(&form, section, pos);
            form.toggle_selection(section, &id).unwrap();
        }

        form.set_field(OrderUpdate::ClientId(Some(next_client.into()))).unwrap();

        prop_assert_eq!(form.sections().len(), 3);
        for s in form.sections() {
            prop_assert!(s.job_id.is_none());
            prop_assert!(s.job_title.is_empty() && s.req_id.is_empty());
            prop_assert!(s.talents.is_empty());
        }
    }

    /// Property: order currency changes never overwrite an explicit row
    /// currency, and every inherited row tracks the latest order currency
    #[test]
    fn prop_currency_backfill_keeps_explicit(
        explicit in prop::collection::vec((0usize..3, 0usize..3, currency_strategy()), 0..6),
        changes in prop::collection::vec(currency_strategy(), 1..5),
    ) {
        let mut form = three_sections(None);
        let mut pinned: Vec<(usize, String, Currency)> = vec![];
        for (section, pos, currency) in explicit {
            let id = talent_at(&form, section, pos);
            form.set_talent_field(section, &id, TalentUpdate::Currency(currency)).unwrap();
            pinned.retain(|(s, t, _)| !(*s == section && *t == id));
            pinned.push((section, id, currency));
        }

        for currency in changes.iter().copied() {
            form.set_field(OrderUpdate::Currency(currency)).unwrap();
        }
        let last = *changes.last().unwrap();

        for (idx, s) in form.sections().iter().enumerate() {
            for t in &s.talents {
                match pinned.iter().find(|(ps, pt, _)| *ps == idx && *pt == t.id) {
                    Some((_, _, c)) => {
                        prop_assert_eq!(t.currency, TalentCurrency::Explicit(*c));
                    }
                    None => {
                        prop_assert_eq!(t.currency, TalentCurrency::Inherited(last));
                    }
                }
            }
        }
    }

    /// Property: the snapshot holds exactly the selected talents with their
    /// billing values unchanged
    #[test]
    fn prop_snapshot_matches_selection(
        picks in prop::collection::btree_set((0usize..3, 0usize..3), 2..6),
        values in prop::collection::vec(value_strategy(), 4),
    ) {
        let mut form = three_sections(Some(PoType::Group));
        valid_header(&mut form, PoType::Group, "900".into());

        let mut chosen = std::collections::BTreeSet::new();
        for (section, pos) in picks {
            let id = talent_at(&form, section, pos);
            if chosen.insert((section, id.clone())) {
                form.toggle_selection(section, &id).unwrap();
                for update in [
                    TalentUpdate::BillRate(values[0].clone()),
                    TalentUpdate::StandardTimeBr(values[1].clone()),
                    TalentUpdate::OverTimeBr(values[2].clone()),
                    TalentUpdate::ContractDuration(values[3].clone()),
                ] {
                    form.set_talent_field(section, &id, update).unwrap();
                }
            }
        }
        prop_assume!(chosen.len() >= 2);

        let payload = form.submit().unwrap().clone();

        prop_assert_eq!(payload.talent_count(), chosen.len());
        for (idx, s) in payload.sections.iter().enumerate() {
            for t in &s.talents {
                prop_assert!(chosen.contains(&(idx, t.id.clone())));
                prop_assert_eq!(&t.bill_rate, &values[0]);
                prop_assert_eq!(&t.standard_time_br, &values[1]);
                prop_assert_eq!(&t.over_time_br, &values[2]);
                prop_assert_eq!(&t.contract_duration, &values[3]);
            }
        }
    }

    /// Property: budgets of 1 to 5 digits pass, longer digit strings fail
    #[test]
    fn prop_budget_length_limit(budget in "[0-9]{1,9}") {
        let mut form = three_sections(Some(PoType::Individual));
        valid_header(&mut form, PoType::Individual, budget.clone());

        let error = form.validate().order(OrderField::Budget).map(str::to_owned);
        if budget.len() <= 5 {
            prop_assert_eq!(error, None);
        } else {
            prop_assert_eq!(error.as_deref(), Some("Budget maximum 5 digits allowed"));
        }
    }

    /// Property: the end date is rejected exactly when it precedes the start
    #[test]
    fn prop_end_date_ordering(start in 0i64..3650, end in 0i64..3650) {
        let base = chrono::NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let mut form = three_sections(Some(PoType::Individual));
        valid_header(&mut form, PoType::Individual, "1".into());
        let start_date = base + chrono::Days::new(start as u64);
        let end_date = base + chrono::Days::new(end as u64);
        form.set_field(OrderUpdate::PoStartDate(Some(start_date.into()))).unwrap();
        form.set_field(OrderUpdate::PoEndDate(Some(end_date.into()))).unwrap();

        let rejected = form.validate().order(OrderField::PoEndDate).is_some();
        prop_assert_eq!(rejected, end < start);
    }

    /// Property: job changes always leave the roster equal to the catalog's
    #[test]
    fn prop_roster_tracks_job(jobs in prop::collection::vec(job_strategy(), 1..8)) {
        let mut form = three_sections(Some(PoType::Group));
        for job in jobs.iter().copied() {
            form.set_job(1, job).unwrap();
        }
        let last = *jobs.last().unwrap();

        let section = &form.sections()[1];
        let expected: Vec<&str> = form
            .client_jobs()
            .iter()
            .find(|j| j.id == last)
            .map(|j| j.talents.iter().map(|t| t.id.as_str()).collect())
            .unwrap_or_default();
        let actual: Vec<&str> = section.talents.iter().map(|t| t.id.as_str()).collect();
        prop_assert_eq!(actual, expected);
        prop_assert!(section.talents.iter().all(|t| !t.selected));
    }
}
