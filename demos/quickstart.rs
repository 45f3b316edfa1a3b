use civildiff::{default_time_zone, time_between, CivilMoment, IntervalUnit, Zone};

fn main() -> civildiff::Result<()> {
    let zone = Zone::named("America/New_York")?;
    let start = civildiff::parse_civil_moment("1995/01/01", "%Y/%m/%d", &zone)?;
    let end = civildiff::parse_civil_moment("2000/10/05", "%Y/%m/%d", &zone)?;

    println!("from {start}");
    println!("to   {end}");
    for unit in IntervalUnit::ALL {
        println!("{unit:>12}: {}", time_between(&start, &end, unit));
    }

    let now = CivilMoment::new(civildiff::Instant::now(), default_time_zone());
    let days = time_between(&start, &now, IntervalUnit::Days);
    println!("now  {now} ({days} days since start)");
    Ok(())
}
