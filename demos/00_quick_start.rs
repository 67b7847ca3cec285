/// quick start - lend, accrue, receive a payment
use lending_tracker_rs::{
    LendingTracker, MemoryStore, Money, Period, Rate, SafeTimeProvider, TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::System);

    // seed a client and a loan
    let mut store = MemoryStore::new();
    let client = store.insert_client("Roman Riquelme", "Centro 12", "7789 5151", Period::FourteenDay);
    let loan = store.insert_loan(
        &client.id,
        Money::from_major(1000),
        Rate::from_percentage(10),
        time.now(),
    )?;

    let mut tracker = LendingTracker::new(store);

    // what does the borrower owe right now?
    let obligation = tracker.current_obligation(&loan.id, client.period, &time)?;
    println!("interest owed:     ${}", obligation.interest_owed);
    println!("remaining capital: ${}", obligation.remaining_capital);

    // record a payment: interest is serviced first, the rest reduces capital
    let payment = tracker.submit_payment(&loan.id, Money::from_major(200), false, &time)?;
    println!(
        "payment recorded: ${} interest, ${} capital",
        payment.interest_amount, payment.capital_amount
    );

    Ok(())
}
