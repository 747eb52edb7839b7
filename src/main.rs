mod app;
mod cli;
mod config;
mod datasources;
mod db;
mod error;
mod logic;
mod models;
mod ui;

use app::{App, Screen};
use clap::Parser;
use cli::{Cli, Commands, SubmitArgs};
use config::Config;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use datasources::OpenWeatherMapClient;
use db::Database;
use error::{CropwiseError, Result};
use logic::{AdvisoryContext, CropScorer, FeaturePage, RulesEngine, ScoreSheet, YieldPredictor};
use models::{CropCatalog, CurrentWeather, FarmRecord, Feature, MAX_SUGGESTIONS};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use ui::screens::{AdviceScreen, CropsScreen, DashboardScreen, FeaturesScreen};

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

#[tokio::main]
async fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // RUST_LOG wins over -v; logs go to stderr so stdout stays clean
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        match e.field() {
            Some(field) => eprintln!("Error in field '{}': {}", field, e),
            None => eprintln!("Error: {}", e),
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_ref();
    let data_dir = cli.data_dir.as_ref();

    match cli.command {
        Some(Commands::Init) => {
            Config::setup_interactive()?;
            Ok(())
        }
        Some(Commands::Check) => check(config_path, data_dir).await,
        Some(Commands::Submit(args)) => submit(config_path, data_dir, &args),
        Some(Commands::Show { id }) => show(config_path, data_dir, id),
        Some(Commands::History) => history(config_path, data_dir),
        Some(Commands::Feature { name }) => feature(config_path, data_dir, &name).await,
        Some(Commands::PredictYield {
            temperature,
            rainfall,
            soil_ph,
        }) => predict_yield(config_path, &temperature, &rainfall, &soil_ph),
        None => run_tui(config_path, data_dir).await,
    }
}

/// Everything a command needs once the config is loaded.
struct Services {
    config: Config,
    db: Database,
    scorer: CropScorer,
    catalog: CropCatalog,
}

impl Services {
    fn open(config_path: Option<&PathBuf>, data_dir: Option<&PathBuf>) -> Result<Self> {
        let config = Config::load(config_path)?;
        Self::with_config(config, data_dir)
    }

    fn with_config(config: Config, data_dir: Option<&PathBuf>) -> Result<Self> {
        let tables = config.reference.load_tables()?;
        let catalog = config.reference.load_catalog()?;
        let db = Database::open(&Config::db_path(data_dir)?)?;
        Ok(Self {
            config,
            db,
            scorer: CropScorer::new(Arc::new(tables)),
            catalog,
        })
    }
}

/// Current weather for `city`, or `None` when not configured or unreachable.
async fn fetch_weather(config: &Config, city: &str) -> Option<CurrentWeather> {
    let owm = config.weather()?;
    let client = OpenWeatherMapClient::new(owm.clone());
    match client.fetch_current(city).await {
        Ok(weather) => Some(weather),
        Err(e) => {
            tracing::warn!(city, error = %e, "Weather unavailable");
            None
        }
    }
}

async fn check(config_path: Option<&PathBuf>, data_dir: Option<&PathBuf>) -> Result<()> {
    let config = Config::load(config_path)?;
    println!("Config:    OK (farm '{}')", config.farm.name);

    let tables = config.reference.load_tables()?;
    println!(
        "Tables:    OK ({} pH, {} nutrient, {} water, {} calendar, {} rotation rows)",
        tables.ph_tolerance.len(),
        tables.nutrients.len(),
        tables.water_needs.len(),
        tables.calendar.len(),
        tables.rotation.len()
    );

    let catalog = config.reference.load_catalog()?;
    println!(
        "Catalog:   OK ({} fertilizer guides, {} prices, {} yield samples)",
        catalog.fertilizer.len(),
        catalog.market_prices.len(),
        catalog.yield_table.len()
    );

    let scorer = CropScorer::new(Arc::new(tables));
    let rules_engine = RulesEngine::new();
    println!(
        "Rules:     {} scoring, {} advisory",
        scorer.list_rules().len(),
        rules_engine.list_rules().len()
    );
    for (id, name) in scorer.list_rules().into_iter().chain(rules_engine.list_rules()) {
        tracing::debug!(id, name, "Registered rule");
    }

    let db = Database::open(&Config::db_path(data_dir)?)?;
    let records = db.farm_records_for(&config.farm.farmer_id)?;
    println!(
        "Database:  OK ({}, {} submissions)",
        db.path().display(),
        records.len()
    );

    match config.weather() {
        None => println!("Weather:   not configured"),
        Some(owm) => {
            let client = OpenWeatherMapClient::new(owm.clone());
            match client.test_connection(config.weather_city()).await {
                Ok(true) => println!("Weather:   OK ({})", config.weather_city()),
                Ok(false) => println!("Weather:   rejected (check the API key)"),
                Err(e) => println!("Weather:   unreachable ({})", e),
            }
        }
    }

    Ok(())
}

fn submit(
    config_path: Option<&PathBuf>,
    data_dir: Option<&PathBuf>,
    args: &SubmitArgs,
) -> Result<()> {
    let services = Services::open(config_path, data_dir)?;
    let validated = args.to_form().validate(&services.config.farm.farmer_id)?;

    let sheet = services.scorer.score(&validated.submission);
    let suggestions = sheet.suggestions();

    println!("{}", validated.record.greeting());
    let sources = validated.submission.water_sources.labels();
    if !sources.is_empty() {
        println!("Water sources: {}", sources.join(", "));
    }
    println!();
    print_ranking(&sheet);

    if args.dry_run {
        println!();
        println!("Dry run: nothing stored.");
        return Ok(());
    }

    let id = services
        .db
        .insert_farm_record(&validated.record, Some(&validated.submission))?;
    services.db.set_suggestions(id, &suggestions)?;
    tracing::info!(id, farmer_id = %validated.record.farmer_id, "Stored submission");
    let record = validated.record.with_suggestions(suggestions);

    let ctx = AdvisoryContext::new(&services.catalog).with_record(Some(&record));
    let advice = RulesEngine::new().evaluate(&ctx);
    if !advice.is_empty() {
        println!();
        println!("Advice:");
        for rec in &advice {
            println!("  {} {}: {}", rec.severity.symbol(), rec.title, rec.description);
        }
    }

    println!();
    println!("Saved submission #{}", id);
    Ok(())
}

fn print_ranking(sheet: &ScoreSheet) {
    println!("Suggested crops:");
    for (i, score) in sheet.ranked().into_iter().take(MAX_SUGGESTIONS).enumerate() {
        let awards: Vec<String> = score
            .awards
            .iter()
            .map(|a| format!("{} +{}", a.rule, a.points))
            .collect();
        println!("  {}. {:<40} {:>3}", i + 1, score.crop, score.points);
        if !awards.is_empty() {
            println!("       {}", awards.join(", "));
        }
    }
}

fn show(config_path: Option<&PathBuf>, data_dir: Option<&PathBuf>, id: Option<i64>) -> Result<()> {
    let services = Services::open(config_path, data_dir)?;
    let record = match id {
        Some(id) => services.db.get_farm_record(id)?,
        None => services
            .db
            .latest_farm_record(&services.config.farm.farmer_id)?,
    };

    let Some(record) = record else {
        return Err(CropwiseError::NotFound(match id {
            Some(id) => format!("farm record {}", id),
            None => "no submissions yet; run `cropwise submit`".to_string(),
        }));
    };

    print_record(&record);
    Ok(())
}

fn print_record(record: &FarmRecord) {
    fn field<T: std::fmt::Display>(value: Option<T>) -> String {
        value.map(|v| v.to_string()).unwrap_or_else(|| "-".into())
    }

    println!("Submission #{}", field(record.id));
    println!("  Submitted:        {}", record.submitted_at.format("%Y-%m-%d %H:%M"));
    println!("  City:             {}", field(record.city.as_deref()));
    println!("  Soil type:        {}", field(record.soil_type.as_deref()));
    println!("  Soil pH:          {}", field(record.soil_ph));
    println!("  Soil moisture:    {}", field(record.soil_moisture));
    println!("  Temperature:      {}", field(record.temperature));
    println!("  Rainfall:         {}", field(record.rainfall));
    println!("  Crop history:     {}", field(record.crop_history.as_deref()));
    println!("  Fertilizer usage: {}", field(record.fertilizer_usage.as_deref()));
    println!("  Pest issues:      {}", field(record.pest_issues.as_deref()));
    if record.suggestions.is_empty() {
        println!("  Suggestions:      -");
    } else {
        println!("  Suggestions:");
        for (i, crop) in record.suggestions.iter().enumerate() {
            println!("    {}. {}", i + 1, crop);
        }
    }
}

fn history(config_path: Option<&PathBuf>, data_dir: Option<&PathBuf>) -> Result<()> {
    let services = Services::open(config_path, data_dir)?;
    let records = services.db.farm_records_for(&services.config.farm.farmer_id)?;

    if records.is_empty() {
        println!("No submissions yet. Run `cropwise submit`.");
        return Ok(());
    }

    for record in &records {
        println!(
            "#{:<5} {}  {:<20} {}",
            record.id.unwrap_or_default(),
            record.submitted_at.format("%Y-%m-%d %H:%M"),
            record.city.as_deref().unwrap_or("-"),
            record.suggestions.first().map(String::as_str).unwrap_or("-")
        );
    }
    Ok(())
}

async fn feature(
    config_path: Option<&PathBuf>,
    data_dir: Option<&PathBuf>,
    name: &str,
) -> Result<()> {
    let feature = Feature::from_str(name).ok_or_else(|| {
        CropwiseError::NotFound(format!("feature '{}' (try soil-health, weather, yield)", name))
    })?;

    let services = Services::open(config_path, data_dir)?;
    let record = services
        .db
        .latest_farm_record(&services.config.farm.farmer_id)?;

    let weather = if feature.uses_weather() {
        let city = record
            .as_ref()
            .and_then(|r| r.city.clone())
            .unwrap_or_else(|| services.config.weather_city().to_string());
        fetch_weather(&services.config, &city).await
    } else {
        None
    };

    let ctx = AdvisoryContext::new(&services.catalog)
        .with_record(record.as_ref())
        .with_weather(weather.as_ref());
    print_page(&FeaturePage::build(feature, &ctx));
    Ok(())
}

fn print_page(page: &FeaturePage) {
    println!("{}", page.title);
    println!("{}", "=".repeat(page.title.chars().count()));
    for line in &page.lines {
        println!("{}", line);
    }
    for link in page.recommendations.iter().filter_map(|r| r.link.as_deref()) {
        println!("More: {}", link);
    }
    println!();
    println!("{}", page.feature.benefit());
}

fn predict_yield(
    config_path: Option<&PathBuf>,
    temperature: &str,
    rainfall: &str,
    soil_ph: &str,
) -> Result<()> {
    // Works without a config file; the embedded catalog is the default
    let catalog = if Config::exists(config_path) {
        Config::load(config_path)?.reference.load_catalog()?
    } else {
        CropCatalog::embedded()?
    };

    match YieldPredictor::new(&catalog.yield_table).predict_input(temperature, rainfall, soil_ph)? {
        Some(estimate) => println!("{}", estimate.summary()),
        None => println!("No yield data available."),
    }
    Ok(())
}

async fn run_tui(config_path: Option<&PathBuf>, data_dir: Option<&PathBuf>) -> Result<()> {
    let config = if Config::exists(config_path) {
        Config::load(config_path)?
    } else {
        let (config, _) = Config::setup_interactive()?;
        config
    };

    let Services {
        config,
        db,
        scorer,
        catalog,
    } = Services::with_config(config, data_dir)?;

    let mut app = App::new(config, db, scorer, catalog)?;
    if app.latest_record.is_none() {
        app.set_status("No submissions yet. Run `cropwise submit` to score your farm.");
    }
    refresh_weather(&mut app).await;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn refresh_weather(app: &mut App) {
    if app.config.weather().is_none() {
        return;
    }
    app.refreshing = true;
    let city = app.weather_city();
    match fetch_weather(&app.config, &city).await {
        Some(weather) => {
            app.set_status(&format!("Weather updated for {}", weather.city));
            app.update_weather(Some(weather));
        }
        None => {
            app.set_status(&format!("Weather refresh failed for {}", city));
            app.update_weather(None);
        }
    }
    app.refreshing = false;
}

async fn run_app(terminal: &mut Tui, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| {
            let area = f.area();

            match app.screen {
                Screen::Dashboard => {
                    let screen = DashboardScreen::new(
                        app.greeting(),
                        app.latest_record.as_ref(),
                        &app.recommendations,
                    )
                    .with_weather(app.weather.as_ref())
                    .with_status(app.status_message.as_deref());
                    f.render_widget(screen, area);
                }
                Screen::Crops => {
                    let screen = CropsScreen::new(app.score_sheet.as_ref())
                        .with_selection(app.crops_state.selected_index);
                    f.render_widget(screen, area);
                }
                Screen::Advice => {
                    let screen = AdviceScreen::new(&app.recommendations)
                        .with_selection(app.advice_state.selected_index);
                    f.render_widget(screen, area);
                }
                Screen::Features => {
                    let page = app.feature_page();
                    let screen = FeaturesScreen::new(&page)
                        .with_selection(app.features_state.selected_index)
                        .with_scroll(app.features_scroll);
                    f.render_widget(screen, area);
                }
            }
        })?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') => app.quit(),
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        app.quit();
                    }
                    KeyCode::Esc => app.switch_screen(Screen::Dashboard),
                    KeyCode::Char('r') => app.request_refresh(),
                    KeyCode::Char(c) => {
                        if let Some(screen) = Screen::from_key(c) {
                            app.switch_screen(screen);
                        }
                    }
                    code => handle_screen_input(app, code),
                }
            }
        }

        if app.needs_refresh {
            app.needs_refresh = false;
            if app.config.weather().is_none() {
                app.set_status("Weather unavailable: no OpenWeatherMap key configured");
            } else {
                refresh_weather(app).await;
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_screen_input(app: &mut App, code: KeyCode) {
    match app.screen {
        Screen::Dashboard => {}
        Screen::Crops => {
            let count = app.score_sheet.as_ref().map_or(0, |_| models::CROP_UNIVERSE.len());
            match code {
                KeyCode::Up => app.crops_state.prev(),
                KeyCode::Down => app.crops_state.next(count),
                _ => {}
            }
        }
        Screen::Advice => {
            let count = app.recommendations.len();
            match code {
                KeyCode::Up => app.advice_state.prev(),
                KeyCode::Down => app.advice_state.next(count),
                _ => {}
            }
        }
        Screen::Features => match code {
            KeyCode::Up => app.select_prev_feature(),
            KeyCode::Down => app.select_next_feature(),
            KeyCode::PageDown => app.features_scroll = app.features_scroll.saturating_add(5),
            KeyCode::PageUp => app.features_scroll = app.features_scroll.saturating_sub(5),
            _ => {}
        },
    }
}
