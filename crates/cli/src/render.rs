//! Console rendering helpers

use console::style;

use domain::model::animal::Animal;
use domain::model::customer::Customer;
use domain::model::employee::Employee;
use domain::model::health_record::HealthRecord;
use domain::model::visit::Visit;
use domain::summary::AnimalHealthSummary;

pub fn heading(text: &str) {
    println!();
    println!("{}", style(text).bold().underlined());
}

pub fn error(err: &dyn std::fmt::Display) {
    eprintln!("{} {}", style("error:").red().bold(), err);
}

pub fn animal_line(animal: &Animal) {
    let breed = animal.breed.as_deref().unwrap_or("-");
    println!(
        "  #{:<4} {:<12} {:<8} {:<12} {:<12} intake {}",
        animal.id,
        animal.name,
        animal.species,
        breed,
        animal.status.to_string(),
        animal.intake_date,
    );
}

pub fn animals(list: &[Animal]) {
    if list.is_empty() {
        println!("  (no animals)");
        return;
    }
    for animal in list {
        animal_line(animal);
    }
}

pub fn record_line(record: &HealthRecord) {
    let vet = record.veterinarian.as_deref().unwrap_or("-");
    println!(
        "  #{:<4} {}  {:<10} {:<30} vet: {}",
        record.id,
        record.recorded_at,
        record.severity.to_string(),
        record.diagnosis.to_string(),
        vet,
    );
}

pub fn records(list: &[HealthRecord]) {
    if list.is_empty() {
        println!("  (no records)");
        return;
    }
    for record in list {
        record_line(record);
    }
}

pub fn visit_line(visit: &Visit) {
    println!(
        "  #{:<4} {:<12} {:<11} planned {}  ({} min)",
        visit.id,
        visit.kind.to_string(),
        visit.status.to_string(),
        visit.planned_at.format("%Y-%m-%d %H:%M"),
        visit.duration_minutes,
    );
}

pub fn visits(list: &[Visit]) {
    if list.is_empty() {
        println!("  (no visits)");
        return;
    }
    for visit in list {
        visit_line(visit);
    }
}

pub fn customer_line(customer: &Customer) {
    println!(
        "  #{:<4} {:<20} {:<26} {}",
        customer.id, customer.name, customer.email, customer.phone,
    );
}

pub fn employee_line(employee: &Employee) {
    println!(
        "  #{:<4} {:<20} {:<14} since {}",
        employee.id,
        employee.name,
        employee.role.to_string(),
        employee.hired_at,
    );
}

pub fn summary(summary: &AnimalHealthSummary) {
    heading(&format!(
        "Health summary - {} (#{})",
        summary.animal.name, summary.animal.id
    ));
    println!("  Status: {}", style(&summary.health_status).cyan().bold());

    println!("  Alerts:");
    for alert in &summary.health_alerts {
        println!("    - {}", alert);
    }

    if let Some(record) = &summary.latest_record {
        println!("  Latest record:");
        record_line(record);
    }

    if !summary.upcoming_visits.is_empty() {
        println!("  Upcoming visits:");
        for visit in &summary.upcoming_visits {
            visit_line(visit);
        }
    }
    if !summary.past_visits.is_empty() {
        println!("  Past visits:");
        for visit in &summary.past_visits {
            visit_line(visit);
        }
    }
}
