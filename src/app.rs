use crate::config::Config;
use crate::db::Database;
use crate::error::Result;
use crate::logic::{AdvisoryContext, CropScorer, FeaturePage, RulesEngine, ScoreSheet};
use crate::models::{CropCatalog, CurrentWeather, FarmRecord, Feature, Recommendation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Crops,
    Advice,
    Features,
}

impl Screen {
    pub fn from_key(c: char) -> Option<Self> {
        match c {
            '1' => Some(Screen::Dashboard),
            '2' => Some(Screen::Crops),
            '3' => Some(Screen::Advice),
            '4' => Some(Screen::Features),
            _ => None,
        }
    }
}

/// Cursor over a list of known length.
pub struct ListState {
    pub selected_index: usize,
}

impl ListState {
    pub fn new() -> Self {
        Self { selected_index: 0 }
    }

    pub fn next(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    pub fn prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn clamp(&mut self, max: usize) {
        if self.selected_index >= max {
            self.selected_index = max.saturating_sub(1);
        }
    }
}

pub struct App {
    pub screen: Screen,
    pub should_quit: bool,
    pub config: Config,
    pub db: Database,

    // Data
    pub latest_record: Option<FarmRecord>,
    pub score_sheet: Option<ScoreSheet>,
    pub weather: Option<CurrentWeather>,
    pub recommendations: Vec<Recommendation>,
    pub catalog: CropCatalog,

    // Screen states
    pub crops_state: ListState,
    pub advice_state: ListState,
    pub features_state: ListState,
    pub features_scroll: u16,

    // Services
    pub scorer: CropScorer,
    pub rules_engine: RulesEngine,

    // UI state
    pub status_message: Option<String>,
    pub refreshing: bool,
    pub needs_refresh: bool,
}

impl App {
    pub fn new(config: Config, db: Database, scorer: CropScorer, catalog: CropCatalog) -> Result<Self> {
        let mut app = Self {
            screen: Screen::Dashboard,
            should_quit: false,
            config,
            db,
            latest_record: None,
            score_sheet: None,
            weather: None,
            recommendations: Vec::new(),
            catalog,
            crops_state: ListState::new(),
            advice_state: ListState::new(),
            features_state: ListState::new(),
            features_scroll: 0,
            scorer,
            rules_engine: RulesEngine::new(),
            status_message: None,
            refreshing: false,
            needs_refresh: false,
        };
        app.reload()?;
        Ok(app)
    }

    pub fn switch_screen(&mut self, screen: Screen) {
        self.screen = screen;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, message: &str) {
        self.status_message = Some(message.to_string());
    }

    pub fn request_refresh(&mut self) {
        self.needs_refresh = true;
        self.set_status("Refreshing data...");
    }

    /// Reload the latest record and rescore it from its stored inputs.
    pub fn reload(&mut self) -> Result<()> {
        self.latest_record = self.db.latest_farm_record(&self.config.farm.farmer_id)?;
        self.score_sheet = match self.latest_record.as_ref().and_then(|r| r.id) {
            Some(id) => self
                .db
                .scoring_inputs(id)?
                .map(|submission| self.scorer.score(&submission)),
            None => None,
        };
        self.evaluate_rules();
        Ok(())
    }

    pub fn update_weather(&mut self, weather: Option<CurrentWeather>) {
        self.weather = weather;
        self.evaluate_rules();
    }

    pub fn context(&self) -> AdvisoryContext<'_> {
        AdvisoryContext::new(&self.catalog)
            .with_record(self.latest_record.as_ref())
            .with_weather(self.weather.as_ref())
    }

    pub fn evaluate_rules(&mut self) {
        self.recommendations = self.rules_engine.evaluate(&self.context());
        self.advice_state.clamp(self.recommendations.len());
    }

    /// City for weather lookups: the latest record's, else the configured one.
    pub fn weather_city(&self) -> String {
        self.latest_record
            .as_ref()
            .and_then(|r| r.city.clone())
            .unwrap_or_else(|| self.config.weather_city().to_string())
    }

    pub fn selected_feature(&self) -> Feature {
        let features = Feature::all();
        features[self.features_state.selected_index.min(features.len() - 1)]
    }

    pub fn select_next_feature(&mut self) {
        self.features_state.next(Feature::all().len());
        self.features_scroll = 0;
    }

    pub fn select_prev_feature(&mut self) {
        self.features_state.prev();
        self.features_scroll = 0;
    }

    pub fn feature_page(&self) -> FeaturePage {
        FeaturePage::build(self.selected_feature(), &self.context())
    }

    pub fn greeting(&self) -> String {
        self.latest_record
            .as_ref()
            .map(|r| r.greeting())
            .unwrap_or_else(|| "Hello Farmer!".to_string())
    }
}
