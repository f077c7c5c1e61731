//! Walks one purchase order from a blank form to the read-only view.
//!
//! Log output is controlled through `RUST_LOG`, e.g.
//! `RUST_LOG=purchase_order_form=info cargo run --example intake`.

use std::sync::Arc;

use purchase_order_form::{
    CalendarDate, Currency, FormConfig, MockDirectory, OrderUpdate, PoType, PurchaseOrderForm,
    TalentUpdate,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "purchase_order_form=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let directory = Arc::new(MockDirectory::default());
    let mut form = PurchaseOrderForm::with_config(directory, FormConfig::default())?;

    form.set_field(OrderUpdate::ClientId(Some("c1".into())))?;
    form.set_field(OrderUpdate::PoType(Some(PoType::Group)))?;
    form.set_field(OrderUpdate::PoNumber("PO-2024-0042".into()))?;
    form.set_field(OrderUpdate::ReceivedOn(CalendarDate::new_with(2024, 5, 28)))?;
    form.set_field(OrderUpdate::ReceivedFromName("Priya Menon".into()))?;
    form.set_field(OrderUpdate::ReceivedFromEmail("priya.menon@collabera.com".into()))?;
    form.set_field(OrderUpdate::PoStartDate(Some("01/06/2024".parse()?)))?;
    form.set_field(OrderUpdate::PoEndDate(Some("30/11/2024".parse()?)))?;
    form.set_field(OrderUpdate::Budget("48000".into()))?;

    form.set_job(0, "job1")?;
    if form.can_add_section() {
        form.add_section()?;
        form.set_job(1, "job2")?;
    }

    // first attempt: talents picked but not priced
    form.toggle_selection(0, "t1")?;
    form.toggle_selection(1, "t4")?;
    if let Err(err) = form.submit() {
        println!("{err}");
        for e in form.errors() {
            println!("  {}: {}", e.key.path(), e.message);
        }
    }

    for (section, talent) in [(0, "t1"), (1, "t4")] {
        form.set_talent_field(section, talent, TalentUpdate::BillRate("55".into()))?;
        form.set_talent_field(section, talent, TalentUpdate::StandardTimeBr("55".into()))?;
        form.set_talent_field(section, talent, TalentUpdate::OverTimeBr("80".into()))?;
        form.set_talent_field(section, talent, TalentUpdate::ContractDuration("6".into()))?;
    }
    form.set_talent_field(1, "t4", TalentUpdate::Currency(Currency::INR))?;

    let payload = form.submit()?;
    println!("\n{payload}");

    let hash = form.accept()?;
    println!("accepted {hash}");

    Ok(())
}
