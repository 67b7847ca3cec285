/// dashboard - aggregate payment history by window and by client
use chrono::{Duration, TimeZone, Utc};
use lending_tracker_rs::{
    LendingTracker, MemoryStore, Money, Period, PeriodWindow, Rate, SafeTimeProvider, TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
    ));
    let controller = time.test_control().unwrap();

    let mut store = MemoryStore::new();
    let ana = store.insert_client("Ana Torres", "Norte 4", "555-0101", Period::Monthly);
    let bruno = store.insert_client("Bruno Paz", "Sur 9", "555-0102", Period::Biweekly);

    let ana_loan = store.insert_loan(
        &ana.id,
        Money::from_major(2000),
        Rate::from_percentage(8),
        time.now(),
    )?;
    let bruno_loan = store.insert_loan(
        &bruno.id,
        Money::from_major(600),
        Rate::from_percentage(12),
        time.now(),
    )?;
    let mut tracker = LendingTracker::new(store);

    // a month of activity
    controller.advance(Duration::days(15));
    tracker.submit_payment(&bruno_loan.id, Money::from_major(150), false, &time)?;

    controller.advance(Duration::days(15));
    tracker.submit_payment(&ana_loan.id, Money::from_major(500), false, &time)?;
    tracker.submit_payment(&bruno_loan.id, Money::from_major(100), false, &time)?;

    let summary = tracker.dashboard_summary(PeriodWindow::TrailingThirtyDays, &time)?;

    println!("last 30 days");
    println!("  capital collected:  ${}", summary.totals.capital);
    println!("  interest collected: ${}", summary.totals.interest);

    println!("\nper client (by total paid)");
    for entry in &summary.per_client {
        println!(
            "  {:<12} capital ${:<8} interest ${:<6} last payment {}",
            entry.name.as_deref().unwrap_or("(unknown)"),
            entry.capital_paid,
            entry.interest_paid,
            entry.last_payment_date.format("%Y-%m-%d"),
        );
    }

    Ok(())
}
