/// time control - a full loan lifecycle on a deterministic clock
use chrono::{Duration, TimeZone, Utc};
use lending_tracker_rs::{
    LendingStore, LendingTracker, MemoryStore, Money, Period, Rate, SafeTimeProvider, TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== time control example ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    ));
    let controller = time.test_control().unwrap();

    let mut store = MemoryStore::new();
    let client = store.insert_client("Ana Torres", "Norte 4", "555-0101", Period::FourteenDay);
    let loan = store.insert_loan(
        &client.id,
        Money::from_major(1000),
        Rate::from_percentage(10),
        time.now(),
    )?;
    let mut tracker = LendingTracker::new(store);

    println!("loan of $1000 at 10% per 14 days, starting {}", time.now().format("%Y-%m-%d"));

    // one full period elapses
    controller.advance(Duration::days(14));
    let obligation = tracker.current_obligation(&loan.id, client.period, &time)?;
    println!("\nafter 14 days, interest owed: ${}", obligation.interest_owed);

    // partial payment: $100 clears the interest, $150 reduces capital
    let payment = tracker.submit_payment(&loan.id, Money::from_major(250), false, &time)?;
    println!(
        "paid $250: ${} interest, ${} capital",
        payment.interest_amount, payment.capital_amount
    );

    // another period on the reduced capital
    controller.advance(Duration::days(14));
    let obligation = tracker.current_obligation(&loan.id, client.period, &time)?;
    println!(
        "\nafter 14 more days on ${} capital, interest owed: ${}",
        obligation.remaining_capital, obligation.interest_owed
    );

    // settle in full
    let total = obligation.total_outstanding();
    let payment = tracker.submit_payment(&loan.id, total, true, &time)?;
    println!("settled with ${}", payment.total());

    let loan = tracker.store().loan(&loan.id)?;
    println!(
        "loan completed on {}",
        loan.end_date.unwrap().format("%Y-%m-%d")
    );

    for event in tracker.take_events() {
        println!("event: {:?}", event);
    }

    Ok(())
}
