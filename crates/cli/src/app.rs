//! Application wiring - one store per entity type, shared by the services

use chrono::{Duration, Utc};

use domain::model::animal::{Animal, AnimalStatus};
use domain::model::customer::Customer;
use domain::model::employee::{Employee, StaffRole};
use domain::model::health_record::{Diagnosis, DiagnosisCategory, HealthRecord, Severity};
use domain::model::visit::{Visit, VisitKind};
use services::{
    AnimalService, CustomerService, EmployeeService, HealthRecordService, VisitService,
};
use shared::HavenConfig;
use store::MemoryStore;

type Animals = MemoryStore<Animal>;
type Records = MemoryStore<HealthRecord>;
type Visits = MemoryStore<Visit>;

/// All services, wired over shared in-memory stores
///
/// Cloning a `MemoryStore` clones a handle, not the data, so the animal
/// store the visit service checks references against is the same one the
/// animal service writes to.
pub struct App {
    pub config: HavenConfig,
    pub animals: AnimalService<Animals, Records, Visits>,
    pub health: HealthRecordService<Records, Animals>,
    pub visits: VisitService<Visits, Animals>,
    pub customers: CustomerService<MemoryStore<Customer>>,
    pub employees: EmployeeService<MemoryStore<Employee>>,
}

impl App {
    pub fn new(config: HavenConfig) -> Self {
        let animals = Animals::new();
        let records = Records::new();
        let visits = Visits::new();

        Self {
            config,
            animals: AnimalService::new(animals.clone(), records.clone(), visits.clone()),
            health: HealthRecordService::new(records, animals.clone()),
            visits: VisitService::new(visits, animals),
            customers: CustomerService::new(MemoryStore::new()),
            employees: EmployeeService::new(MemoryStore::new()),
        }
    }

    /// Populate the stores with a small demo dataset
    pub fn seed_demo(&mut self) -> anyhow::Result<()> {
        let today = Utc::now().date_naive();
        let now = Utc::now();

        let rex = self.animals.register(
            Animal::new("Rex", "Dog", today - Duration::days(120))
                .with_breed("Beagle")
                .with_weight_kg(12.5),
        )?;
        let mia = self.animals.register(
            Animal::new("Mia", "Cat", today - Duration::days(60)).with_weight_kg(4.1),
        )?;
        let buddy = self.animals.register(
            Animal::new("Buddy", "Dog", today - Duration::days(30))
                .with_breed("Labrador")
                .with_weight_kg(28.0),
        )?;
        let luna = self
            .animals
            .register(Animal::new("Luna", "Cat", today - Duration::days(200)))?;
        self.animals.set_status(buddy.id, AnimalStatus::InTreatment)?;
        self.animals.set_status(luna.id, AnimalStatus::Reserved)?;

        // Rex: healthy, vaccinated, next shot far out
        self.health.record(
            HealthRecord::new(
                rex.id,
                today - Duration::days(20),
                Diagnosis::new(DiagnosisCategory::RoutineCheckup, ""),
            )
            .with_vaccination(Some(today + Duration::days(300)))
            .with_veterinarian("Dr. Holm"),
        )?;

        // Mia: vaccination overdue
        self.health.record(
            HealthRecord::new(
                mia.id,
                today - Duration::days(90),
                Diagnosis::new(DiagnosisCategory::Vaccination, "annual boosters"),
            )
            .with_vaccination(Some(today - Duration::days(5)))
            .with_veterinarian("Dr. Holm"),
        )?;

        // Buddy: under treatment for an injury
        self.health.record(
            HealthRecord::new(
                buddy.id,
                today - Duration::days(3),
                Diagnosis::new(DiagnosisCategory::Injury, "fractured paw"),
            )
            .with_severity(Severity::Severe)
            .with_treatment("cast, rest, follow-up in two weeks")
            .with_veterinarian("Dr. Holm"),
        )?;

        let followup = self.visits.schedule(Visit::new(
            buddy.id,
            VisitKind::Veterinary,
            now + Duration::days(14),
            30,
        ))?;
        self.visits.confirm(followup.id)?;
        self.visits.schedule(Visit::new(
            mia.id,
            VisitKind::Veterinary,
            now + Duration::days(2),
            20,
        ))?;

        let jane = self.customers.register(
            Customer::new("Jane Doe", "jane@example.com", "+45 12 34 56 78", now)
                .with_address("1 Shelter Lane"),
        )?;
        self.visits.schedule(
            Visit::new(luna.id, VisitKind::Adoption, now + Duration::days(7), 45)
                .with_customer(jane.id),
        )?;

        self.employees.register(Employee::new(
            "Dr. Holm",
            StaffRole::Veterinarian,
            today - Duration::days(800),
        ))?;
        self.employees.register(Employee::new(
            "Sam Carter",
            StaffRole::Caretaker,
            today - Duration::days(400),
        ))?;

        Ok(())
    }
}
