use colored::Colorize;

use totk_cooking::config::CONFIG;
use totk_cooking::{Catalog, CookSim};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}", e.to_string().red());
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Catalog::from_dir(&CONFIG.data_dir)?;
    let mut sim = CookSim::new(catalog);
    if let Some(lang) = CONFIG.lang {
        sim = sim.with_language(lang);
    }

    let report = sim.cook(&CONFIG.materials)?;

    let header = "Cooked Meal";
    println!("{}", header);
    println!("{}", "=".repeat(header.len()));
    for (key, value) in report.entries() {
        println!("{}: {}", key.bold(), value);
    }
    Ok(())
}
