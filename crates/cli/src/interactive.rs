//! Interactive menu mode

use chrono::{Duration, NaiveDate, Utc};
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use domain::entity::EntityId;
use domain::model::animal::{Animal, AnimalStatus};
use domain::model::customer::Customer;
use domain::model::employee::{Employee, StaffRole};
use domain::model::health_record::{Diagnosis, DiagnosisCategory, HealthRecord, Severity};
use domain::model::visit::{Visit, VisitKind};
use services::ServiceError;

use crate::app::App;
use crate::render;

/// Interactive console menu over the services
pub struct InteractiveCli {
    app: App,
    theme: ColorfulTheme,
}

impl InteractiveCli {
    pub fn new(app: App) -> Self {
        Self {
            app,
            theme: ColorfulTheme::default(),
        }
    }

    /// Run the menu loop
    pub fn run(&mut self) -> anyhow::Result<()> {
        println!("{}", style(&self.app.config.shelter_name).bold());
        println!("State lives in memory for the duration of this session.");

        loop {
            let choice = Select::with_theme(&self.theme)
                .with_prompt("Main menu")
                .items(&[
                    "Animals",
                    "Health records",
                    "Visits",
                    "Customers",
                    "Employees",
                    "Health summary",
                    "Load demo data",
                    "Quit",
                ])
                .default(0)
                .interact()?;

            let result = match choice {
                0 => self.animals_menu(),
                1 => self.health_menu(),
                2 => self.visits_menu(),
                3 => self.customers_menu(),
                4 => self.employees_menu(),
                5 => self.show_summary(),
                6 => {
                    self.app.seed_demo()?;
                    println!("Demo data loaded.");
                    Ok(())
                }
                _ => break,
            };

            if let Err(err) = result {
                render::error(&err);
            }
        }

        Ok(())
    }

    fn ask_id(&self, prompt: &str) -> anyhow::Result<EntityId> {
        Ok(Input::with_theme(&self.theme)
            .with_prompt(prompt)
            .interact_text()?)
    }

    fn ask_date(&self, prompt: &str, default: NaiveDate) -> anyhow::Result<NaiveDate> {
        let raw: String = Input::with_theme(&self.theme)
            .with_prompt(format!("{} (YYYY-MM-DD)", prompt))
            .default(default.to_string())
            .interact_text()?;
        Ok(raw.parse()?)
    }

    // ========== Animals ==========

    fn animals_menu(&mut self) -> anyhow::Result<()> {
        let choice = Select::with_theme(&self.theme)
            .with_prompt("Animals")
            .items(&[
                "List active",
                "Available for adoption",
                "Search by name",
                "Register",
                "Change status",
                "Archive",
                "Back",
            ])
            .default(0)
            .interact()?;

        match choice {
            0 => render::animals(&self.app.animals.list_active()?),
            1 => render::animals(&self.app.animals.available_for_adoption()?),
            2 => {
                let query: String = Input::with_theme(&self.theme)
                    .with_prompt("Name contains")
                    .interact_text()?;
                render::animals(&self.app.animals.search_name(&query)?);
            }
            3 => {
                let name: String = Input::with_theme(&self.theme)
                    .with_prompt("Name")
                    .interact_text()?;
                let species: String = Input::with_theme(&self.theme)
                    .with_prompt("Species")
                    .interact_text()?;
                let intake = self.ask_date("Intake date", Utc::now().date_naive())?;

                let mut animal = Animal::new(name, species, intake);
                let breed: String = Input::with_theme(&self.theme)
                    .with_prompt("Breed (empty to skip)")
                    .allow_empty(true)
                    .interact_text()?;
                if !breed.is_empty() {
                    animal = animal.with_breed(breed);
                }

                let stored = self.app.animals.register(animal)?;
                println!("Registered #{} {}", stored.id, stored.name);
            }
            4 => {
                let id = self.ask_id("Animal id")?;
                let statuses = [
                    AnimalStatus::Available,
                    AnimalStatus::Adopted,
                    AnimalStatus::Reserved,
                    AnimalStatus::InTreatment,
                    AnimalStatus::Deceased,
                ];
                let labels: Vec<String> = statuses.iter().map(|s| s.to_string()).collect();
                let pick = Select::with_theme(&self.theme)
                    .with_prompt("New status")
                    .items(&labels)
                    .default(0)
                    .interact()?;
                let updated = self.app.animals.set_status(id, statuses[pick])?;
                println!("#{} is now {}", updated.id, updated.status);
            }
            5 => {
                let id = self.ask_id("Animal id")?;
                if Confirm::with_theme(&self.theme)
                    .with_prompt("Archive this animal?")
                    .interact()?
                {
                    self.app.animals.remove(id)?;
                    println!("Archived.");
                }
            }
            _ => {}
        }
        Ok(())
    }

    // ========== Health Records ==========

    fn health_menu(&mut self) -> anyhow::Result<()> {
        let choice = Select::with_theme(&self.theme)
            .with_prompt("Health records")
            .items(&["History for animal", "Record examination", "Vaccinations due", "Back"])
            .default(0)
            .interact()?;

        match choice {
            0 => {
                let id = self.ask_id("Animal id")?;
                render::records(&self.app.health.for_animal(id)?);
            }
            1 => {
                let animal_id = self.ask_id("Animal id")?;
                let recorded = self.ask_date("Examination date", Utc::now().date_naive())?;

                let categories = [
                    DiagnosisCategory::RoutineCheckup,
                    DiagnosisCategory::Vaccination,
                    DiagnosisCategory::Illness,
                    DiagnosisCategory::Injury,
                    DiagnosisCategory::Other,
                ];
                let labels: Vec<String> = categories.iter().map(|c| c.to_string()).collect();
                let pick = Select::with_theme(&self.theme)
                    .with_prompt("Diagnosis")
                    .items(&labels)
                    .default(0)
                    .interact()?;
                let note: String = Input::with_theme(&self.theme)
                    .with_prompt("Note (empty to skip)")
                    .allow_empty(true)
                    .interact_text()?;

                let severities = [
                    Severity::Normal,
                    Severity::Mild,
                    Severity::Moderate,
                    Severity::Severe,
                    Severity::Critical,
                ];
                let labels: Vec<String> = severities.iter().map(|s| s.to_string()).collect();
                let severity = Select::with_theme(&self.theme)
                    .with_prompt("Severity")
                    .items(&labels)
                    .default(0)
                    .interact()?;

                let mut record =
                    HealthRecord::new(animal_id, recorded, Diagnosis::new(categories[pick], note))
                        .with_severity(severities[severity]);

                if Confirm::with_theme(&self.theme)
                    .with_prompt("Vaccinated?")
                    .interact()?
                {
                    let due =
                        self.ask_date("Next vaccination", recorded + Duration::days(365))?;
                    record = record.with_vaccination(Some(due));
                }

                let stored = self.app.health.record(record)?;
                println!("Recorded #{}", stored.id);
            }
            2 => {
                let horizon = i64::from(self.app.config.vaccination_horizon_days);
                let cutoff = Utc::now().date_naive() + Duration::days(horizon);
                println!("Due on or before {}:", cutoff);
                render::records(&self.app.health.vaccinations_due(cutoff)?);
            }
            _ => {}
        }
        Ok(())
    }

    // ========== Visits ==========

    fn visits_menu(&mut self) -> anyhow::Result<()> {
        let choice = Select::with_theme(&self.theme)
            .with_prompt("Visits")
            .items(&[
                "For animal",
                "Schedule",
                "Confirm",
                "Complete",
                "Cancel",
                "Back",
            ])
            .default(0)
            .interact()?;

        match choice {
            0 => {
                let id = self.ask_id("Animal id")?;
                render::visits(&self.app.visits.for_animal(id)?);
            }
            1 => {
                let animal_id = self.ask_id("Animal id")?;
                let kinds = [
                    VisitKind::Veterinary,
                    VisitKind::Adoption,
                    VisitKind::Grooming,
                    VisitKind::Behavioural,
                ];
                let labels: Vec<String> = kinds.iter().map(|k| k.to_string()).collect();
                let pick = Select::with_theme(&self.theme)
                    .with_prompt("Kind")
                    .items(&labels)
                    .default(0)
                    .interact()?;
                let days: i64 = Input::with_theme(&self.theme)
                    .with_prompt("In how many days")
                    .default(7)
                    .interact_text()?;
                let duration: u32 = Input::with_theme(&self.theme)
                    .with_prompt("Duration (minutes)")
                    .default(30)
                    .interact_text()?;

                let stored = self.app.visits.schedule(Visit::new(
                    animal_id,
                    kinds[pick],
                    Utc::now() + Duration::days(days),
                    duration,
                ))?;
                println!("Scheduled #{}", stored.id);
            }
            2 => {
                let id = self.ask_id("Visit id")?;
                let updated = self.app.visits.confirm(id)?;
                println!("#{} is now {}", updated.id, updated.status);
            }
            3 => {
                let id = self.ask_id("Visit id")?;
                let updated = self.app.visits.complete(id, None)?;
                println!("#{} is now {}", updated.id, updated.status);
            }
            4 => {
                let id = self.ask_id("Visit id")?;
                let updated = self.app.visits.cancel(id)?;
                println!("#{} is now {}", updated.id, updated.status);
            }
            _ => {}
        }
        Ok(())
    }

    // ========== Customers / Employees ==========

    fn customers_menu(&mut self) -> anyhow::Result<()> {
        let choice = Select::with_theme(&self.theme)
            .with_prompt("Customers")
            .items(&["List active", "Register", "Deactivate", "Back"])
            .default(0)
            .interact()?;

        match choice {
            0 => {
                for customer in self.app.customers.list_active()? {
                    render::customer_line(&customer);
                }
            }
            1 => {
                let name: String = Input::with_theme(&self.theme)
                    .with_prompt("Name")
                    .interact_text()?;
                let email: String = Input::with_theme(&self.theme)
                    .with_prompt("Email")
                    .interact_text()?;
                let phone: String = Input::with_theme(&self.theme)
                    .with_prompt("Phone")
                    .interact_text()?;

                let stored = self
                    .app
                    .customers
                    .register(Customer::new(name, email, phone, Utc::now()))?;
                println!("Registered #{}", stored.id);
            }
            2 => {
                let id = self.ask_id("Customer id")?;
                self.app.customers.deactivate(id)?;
                println!("Deactivated.");
            }
            _ => {}
        }
        Ok(())
    }

    fn employees_menu(&mut self) -> anyhow::Result<()> {
        let choice = Select::with_theme(&self.theme)
            .with_prompt("Employees")
            .items(&["List active", "Register", "Deactivate", "Back"])
            .default(0)
            .interact()?;

        match choice {
            0 => {
                for employee in self.app.employees.list_active()? {
                    render::employee_line(&employee);
                }
            }
            1 => {
                let name: String = Input::with_theme(&self.theme)
                    .with_prompt("Name")
                    .interact_text()?;
                let roles = [
                    StaffRole::Veterinarian,
                    StaffRole::Caretaker,
                    StaffRole::Receptionist,
                    StaffRole::Manager,
                ];
                let labels: Vec<String> = roles.iter().map(|r| r.to_string()).collect();
                let pick = Select::with_theme(&self.theme)
                    .with_prompt("Role")
                    .items(&labels)
                    .default(0)
                    .interact()?;
                let hired = self.ask_date("Hired", Utc::now().date_naive())?;

                let stored = self
                    .app
                    .employees
                    .register(Employee::new(name, roles[pick], hired))?;
                println!("Registered #{}", stored.id);
            }
            2 => {
                let id = self.ask_id("Employee id")?;
                self.app.employees.deactivate(id)?;
                println!("Deactivated.");
            }
            _ => {}
        }
        Ok(())
    }

    // ========== Summary ==========

    fn show_summary(&mut self) -> anyhow::Result<()> {
        let id = self.ask_id("Animal id")?;
        match self.app.animals.health_summary(id, Utc::now()) {
            Ok(summary) => render::summary(&summary),
            Err(err @ ServiceError::NotFound { .. }) => render::error(&err),
            Err(err) => return Err(err.into()),
        }
        Ok(())
    }
}
