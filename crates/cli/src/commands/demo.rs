//! haven demo command - a scripted tour over seeded data

use chrono::{Duration, Utc};
use clap::Args;
use console::style;

use crate::app::App;
use crate::render;

#[derive(Debug, Args)]
pub struct DemoCommand {
    /// Page size for the paged listing section
    #[arg(long, default_value_t = 3)]
    pub page_size: usize,
}

impl DemoCommand {
    pub fn run(&self, mut app: App) -> anyhow::Result<()> {
        app.seed_demo()?;
        let now = Utc::now();

        println!(
            "{}",
            style(format!("=== {} ===", app.config.shelter_name)).bold()
        );

        render::heading("Animals by species");
        for (species, animals) in app.animals.group_by_species()? {
            println!("  {} ({})", species, animals.len());
            render::animals(&animals);
        }

        render::heading("Available for adoption");
        render::animals(&app.animals.available_for_adoption()?);

        render::heading("Vaccinations due");
        let cutoff =
            now.date_naive() + Duration::days(i64::from(app.config.vaccination_horizon_days));
        let due = app.health.vaccinations_due(cutoff)?;
        if due.is_empty() {
            println!("  (none due before {})", cutoff);
        }
        render::records(&due);

        render::heading("Paged listing");
        let page = app.animals.list_paged(1, self.page_size)?;
        println!(
            "  page {}/{} ({} animals total)",
            page.page,
            page.total_pages(),
            page.total_count
        );
        render::animals(&page.items);

        for animal in app.animals.list_active()? {
            let summary = app.animals.health_summary(animal.id, now)?;
            render::summary(&summary);
        }

        render::heading("Staff");
        for employee in app.employees.list_active()? {
            render::employee_line(&employee);
        }

        Ok(())
    }
}
