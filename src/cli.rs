use crate::models::SubmissionForm;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "cropwise",
    version,
    about = "Farm advisory TUI with crop suitability scoring"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override SQLite data directory
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Re-run interactive setup
    Init,
    /// Validate config, reference data, database and weather access
    Check,
    /// Score a farm submission and store it with its crop suggestions
    Submit(SubmitArgs),
    /// Print a stored submission (latest when no id is given)
    Show {
        #[arg(long)]
        id: Option<i64>,
    },
    /// List this farmer's submissions, newest first
    History,
    /// Print a feature page (name or slug, e.g. "soil-health")
    Feature { name: String },
    /// Predict yield from temperature, rainfall and soil pH
    PredictYield {
        #[arg(long)]
        temperature: String,
        #[arg(long)]
        rainfall: String,
        #[arg(long)]
        soil_ph: String,
    },
}

/// Form fields are taken as text and validated together, so a bad number
/// is reported with its field name instead of a clap parse error.
#[derive(Args, Debug, Default)]
pub struct SubmitArgs {
    #[arg(long)]
    pub soil_type: Option<String>,
    #[arg(long)]
    pub soil_ph: Option<String>,
    #[arg(long)]
    pub soil_moisture: Option<String>,
    /// Degrees Fahrenheit
    #[arg(long)]
    pub temperature: Option<String>,
    #[arg(long)]
    pub rainfall_amount: Option<String>,
    /// Comma separated crops grown before
    #[arg(long)]
    pub crop_history: Option<String>,
    #[arg(long)]
    pub fertilizer_usage: Option<String>,
    #[arg(long)]
    pub pest_issues: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    /// Comma separated sowing labels, e.g. "May, June"
    #[arg(long)]
    pub wanted_sow: Option<String>,
    /// Comma separated harvest labels
    #[arg(long)]
    pub wanted_harvest: Option<String>,
    /// Comma separated crops for rotation planning
    #[arg(long)]
    pub previous_plants: Option<String>,
    #[arg(long)]
    pub nitrogen: Option<String>,
    #[arg(long)]
    pub phosphorus: Option<String>,
    #[arg(long)]
    pub potassium: Option<String>,
    /// Available water in mm
    #[arg(long)]
    pub water_level: Option<String>,
    /// "yes" when the farm is rain-fed
    #[arg(long)]
    pub rainfall: Option<String>,
    #[arg(long)]
    pub irrigated: Option<String>,
    #[arg(long)]
    pub groundwater: Option<String>,
    #[arg(long)]
    pub surface_water: Option<String>,

    /// Score and print without storing
    #[arg(long)]
    pub dry_run: bool,
}

impl SubmitArgs {
    pub fn to_form(&self) -> SubmissionForm {
        SubmissionForm {
            soil_type: self.soil_type.clone(),
            soil_ph: self.soil_ph.clone(),
            soil_moisture: self.soil_moisture.clone(),
            temperature: self.temperature.clone(),
            rainfall_amount: self.rainfall_amount.clone(),
            crop_history: self.crop_history.clone(),
            fertilizer_usage: self.fertilizer_usage.clone(),
            pest_issues: self.pest_issues.clone(),
            city: self.city.clone(),
            wanted_sow: self.wanted_sow.clone(),
            wanted_harvest: self.wanted_harvest.clone(),
            previous_plants: self.previous_plants.clone(),
            nitrogen: self.nitrogen.clone(),
            phosphorus: self.phosphorus.clone(),
            potassium: self.potassium.clone(),
            water_level: self.water_level.clone(),
            rainfall: self.rainfall.clone(),
            irrigated: self.irrigated.clone(),
            groundwater: self.groundwater.clone(),
            surface_water: self.surface_water.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn submit_flags_reach_the_form() {
        let cli = Cli::parse_from([
            "cropwise",
            "submit",
            "--soil-ph",
            "6.4",
            "--nitrogen",
            "110",
            "--previous-plants",
            "Tomato, Peppers",
            "--dry-run",
        ]);
        let Some(Commands::Submit(args)) = cli.command else {
            panic!("expected submit");
        };
        assert!(args.dry_run);
        let form = args.to_form();
        assert_eq!(form.soil_ph.as_deref(), Some("6.4"));
        assert_eq!(form.previous_plants.as_deref(), Some("Tomato, Peppers"));
        assert!(form.phosphorus.is_none());
    }

    #[test]
    fn predict_yield_takes_raw_text() {
        let cli = Cli::parse_from([
            "cropwise",
            "predict-yield",
            "--temperature",
            "abc",
            "--rainfall",
            "40",
            "--soil-ph",
            "6.5",
        ]);
        assert!(matches!(
            cli.command,
            Some(Commands::PredictYield { ref temperature, .. }) if temperature == "abc"
        ));
    }
}
