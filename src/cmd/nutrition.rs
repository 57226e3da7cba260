use anyhow::Result;
use serde_json::json;

use coachvital::models::nutrition::{MacroTotals, NutritionInput};
use coachvital::output::human;

use super::{Globals, open, print_json};

pub fn run_log(
    g: &Globals,
    totals: MacroTotals,
    compliance: u8,
    meals: Option<&str>,
) -> Result<()> {
    let (engine, client) = open(g)?;
    let input = NutritionInput {
        date: None,
        totals,
        compliance_score: compliance,
        meals_completed: meals
            .map(|m| {
                m.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default(),
    };
    let log = engine.save_nutrition(&client, &input)?;

    if g.human {
        println!("Logged: {}", human::format_nutrition_log(&log));
    } else {
        print_json("nutrition", json!({ "log": log }))?;
    }
    Ok(())
}

pub fn run_target(
    g: &Globals,
    calories: f64,
    protein: Option<f64>,
    carbs: Option<f64>,
    fat: Option<f64>,
) -> Result<()> {
    let (engine, client) = open(g)?;
    let targets = engine.set_nutrition_targets(&client, calories, protein, carbs, fat)?;

    if g.human {
        println!("Targets set: {:.0} kcal for {}", targets.calories, client);
    } else {
        print_json("nutrition", json!({ "targets": targets }))?;
    }
    Ok(())
}

pub fn run_summary(g: &Globals, days: Option<u32>) -> Result<()> {
    let (engine, client) = open(g)?;
    let days = days.unwrap_or(engine.config().nutrition.default_window_days);
    let summary = engine.get_nutrition_summary(&client, days)?;

    if g.human {
        println!("{}", human::format_nutrition_summary(&summary));
    } else {
        print_json("nutrition", serde_json::to_value(&summary)?)?;
    }
    Ok(())
}
