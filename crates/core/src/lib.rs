pub mod errors;
pub mod logging;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use chrono::NaiveDate;
use models::{
    advisory::{
        CropRecommendation, CropRecommendationRequest, IrrigationPlan, IrrigationRequest,
        PestDiagnosis, PestDiagnosisRequest, YieldPrediction, YieldPredictionRequest,
    },
    calendar::FarmTask,
    chart::{ChartBucket, Granularity},
    inventory::{InventoryCategory, InventoryItem},
    navigation::{Language, NavEntry},
    settings::Settings,
    summary::FinancialSummary,
    transaction::{Transaction, TransactionSortOrder, TransactionType},
};
use providers::{gemini::GeminiAdvisor, traits::AdvisoryProvider};
use rust_decimal::Decimal;
use services::{
    advisory_service::AdvisoryService, calendar_service::CalendarService,
    chart_service::ChartService, inventory_service::InventoryService,
    ledger_service::LedgerService, navigation_service::NavPreferenceStore,
};
use std::sync::Arc;
use storage::port::PreferenceStorage;
use uuid::Uuid;

use errors::CoreError;

/// Main entry point for the Farm Advisor core library.
///
/// Holds the session's ledger, inventory and calendar (in memory only), the
/// persisted nav preferences, and the advisory provider.
#[must_use]
pub struct FarmAdvisor {
    settings: Settings,
    transactions: Vec<Transaction>,
    inventory: Vec<InventoryItem>,
    tasks: Vec<FarmTask>,
    nav: NavPreferenceStore,
    ledger_service: LedgerService,
    chart_service: ChartService,
    inventory_service: InventoryService,
    calendar_service: CalendarService,
    advisory_service: AdvisoryService,
}

impl std::fmt::Debug for FarmAdvisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FarmAdvisor")
            .field("transactions", &self.transactions.len())
            .field("inventory", &self.inventory.len())
            .field("tasks", &self.tasks.len())
            .field("language", &self.nav.language())
            .field("provider", &self.advisory_service.provider_name())
            .finish()
    }
}

impl FarmAdvisor {
    /// Create a session backed by the hosted model configured in `settings`.
    pub fn new(settings: Settings, storage: Arc<dyn PreferenceStorage>) -> Self {
        let provider = Box::new(GeminiAdvisor::new(&settings.advisor));
        Self::with_provider(settings, storage, provider)
    }

    /// Create a session with an explicit advisory provider (tests, alternative models).
    pub fn with_provider(
        settings: Settings,
        storage: Arc<dyn PreferenceStorage>,
        provider: Box<dyn AdvisoryProvider>,
    ) -> Self {
        let nav = NavPreferenceStore::load_with_default_language(storage, settings.default_language);
        Self {
            settings,
            transactions: Vec::new(),
            inventory: Vec::new(),
            tasks: Vec::new(),
            nav,
            ledger_service: LedgerService::new(),
            chart_service: ChartService::new(),
            inventory_service: InventoryService::new(),
            calendar_service: CalendarService::new(),
            advisory_service: AdvisoryService::new(provider),
        }
    }

    /// Create a session that keeps preferences as JSON files in `dir` (native only, not WASM).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn open_in_dir(settings: Settings, dir: impl Into<std::path::PathBuf>) -> Self {
        let storage = Arc::new(storage::file::FileStorage::new(dir));
        Self::new(settings, storage)
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ── Financial Tracker ───────────────────────────────────────────

    /// Record an income or expense. `amount` is the positive value typed in the form.
    pub fn add_transaction(
        &mut self,
        transaction_type: TransactionType,
        amount: Decimal,
        date: NaiveDate,
        description: &str,
    ) -> Result<Uuid, CoreError> {
        self.ledger_service.add_transaction(
            &mut self.transactions,
            transaction_type,
            amount,
            date,
            description,
        )
    }

    pub fn remove_transaction(&mut self, id: Uuid) -> Result<Transaction, CoreError> {
        self.ledger_service.remove_transaction(&mut self.transactions, id)
    }

    /// All transactions, newest first.
    #[must_use]
    pub fn get_transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    #[must_use]
    pub fn get_transactions_sorted(&self, order: &TransactionSortOrder) -> Vec<&Transaction> {
        self.ledger_service.sorted(&self.transactions, order)
    }

    #[must_use]
    pub fn search_transactions(&self, query: &str) -> Vec<&Transaction> {
        self.ledger_service.search(&self.transactions, query)
    }

    #[must_use]
    pub fn financial_summary(&self) -> FinancialSummary {
        self.ledger_service.summary(&self.transactions)
    }

    /// Income/expense buckets for the finance chart.
    #[must_use]
    pub fn financial_chart(&self, granularity: Granularity) -> Vec<ChartBucket> {
        self.chart_service.aggregate(&self.transactions, granularity)
    }

    /// Income/expense buckets restricted to `from..=to`.
    pub fn financial_chart_in_range(
        &self,
        granularity: Granularity,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ChartBucket>, CoreError> {
        self.chart_service
            .aggregate_range(&self.transactions, granularity, from, to)
    }

    #[must_use]
    pub fn export_transactions_to_csv(&self) -> String {
        self.ledger_service.export_csv(&self.transactions)
    }

    pub fn export_transactions_to_json(&self) -> Result<String, CoreError> {
        self.ledger_service.export_json(&self.transactions)
    }

    /// Import transactions from JSON. All-or-nothing; returns the number imported.
    pub fn import_transactions_from_json(&mut self, json: &str) -> Result<usize, CoreError> {
        let incoming: Vec<Transaction> = serde_json::from_str(json)?;
        let mut staged = self.transactions.clone();
        for tx in &incoming {
            self.ledger_service.insert(&mut staged, tx.clone())?;
        }
        self.transactions = staged;
        Ok(incoming.len())
    }

    // ── Inventory ───────────────────────────────────────────────────

    pub fn add_inventory_item(&mut self, item: InventoryItem) -> Result<Uuid, CoreError> {
        self.inventory_service.add_item(&mut self.inventory, item)
    }

    pub fn adjust_inventory(
        &mut self,
        id: Uuid,
        delta: Decimal,
        on: NaiveDate,
    ) -> Result<Decimal, CoreError> {
        self.inventory_service
            .adjust_quantity(&mut self.inventory, id, delta, on)
    }

    pub fn remove_inventory_item(&mut self, id: Uuid) -> Result<InventoryItem, CoreError> {
        self.inventory_service.remove_item(&mut self.inventory, id)
    }

    #[must_use]
    pub fn get_inventory(&self) -> Vec<&InventoryItem> {
        self.inventory_service.list(&self.inventory)
    }

    #[must_use]
    pub fn get_low_stock(&self) -> Vec<&InventoryItem> {
        self.inventory_service.low_stock(&self.inventory)
    }

    #[must_use]
    pub fn get_inventory_by_category(&self, category: InventoryCategory) -> Vec<&InventoryItem> {
        self.inventory_service.by_category(&self.inventory, category)
    }

    // ── Calendar ────────────────────────────────────────────────────

    pub fn add_task(&mut self, task: FarmTask) -> Result<Uuid, CoreError> {
        self.calendar_service.add_task(&mut self.tasks, task)
    }

    pub fn remove_task(&mut self, id: Uuid) -> Result<FarmTask, CoreError> {
        self.calendar_service.remove_task(&mut self.tasks, id)
    }

    pub fn set_task_completed(&mut self, id: Uuid, completed: bool) -> Result<(), CoreError> {
        self.calendar_service.set_completed(&mut self.tasks, id, completed)
    }

    pub fn get_tasks_in_range(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<&FarmTask>, CoreError> {
        self.calendar_service.tasks_in_range(&self.tasks, from, to)
    }

    #[must_use]
    pub fn get_upcoming_tasks(&self, from: NaiveDate, limit: usize) -> Vec<&FarmTask> {
        self.calendar_service.upcoming(&self.tasks, from, limit)
    }

    // ── Navigation & Language ───────────────────────────────────────

    #[must_use]
    pub fn nav_preferences(&self) -> &NavPreferenceStore {
        &self.nav
    }

    /// Mutable access for the settings dialog (`toggle`, `set`, `apply`, ...).
    pub fn nav_preferences_mut(&mut self) -> &mut NavPreferenceStore {
        &mut self.nav
    }

    #[must_use]
    pub fn visible_nav_items(&self) -> Vec<NavEntry> {
        self.nav.visible_items()
    }

    #[must_use]
    pub fn language(&self) -> Language {
        self.nav.language()
    }

    pub fn set_language(&mut self, language: Language) -> bool {
        self.nav.set_language(language)
    }

    // ── Advisory (answers come back in the current language) ────────

    pub async fn diagnose_pest(&self, request: &PestDiagnosisRequest) -> Result<PestDiagnosis, CoreError> {
        self.advisory_service
            .diagnose_pest(request, self.nav.language())
            .await
    }

    pub async fn predict_yield(&self, request: &YieldPredictionRequest) -> Result<YieldPrediction, CoreError> {
        self.advisory_service
            .predict_yield(request, self.nav.language())
            .await
    }

    pub async fn plan_irrigation(&self, request: &IrrigationRequest) -> Result<IrrigationPlan, CoreError> {
        self.advisory_service
            .plan_irrigation(request, self.nav.language())
            .await
    }

    pub async fn recommend_crops(
        &self,
        request: &CropRecommendationRequest,
    ) -> Result<CropRecommendation, CoreError> {
        self.advisory_service
            .recommend_crops(request, self.nav.language())
            .await
    }
}
