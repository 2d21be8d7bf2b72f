//! Persistence for completed advisory reports
//!
//! Reports are written to PostgreSQL when a database is configured and kept
//! in process memory otherwise.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::{
    AdvisoryRecord, NewReport, Pagination, ReportPage, StressLevel, SymptomAnalysisEntry,
    SymptomTag, WeatherSample,
};
use sqlx::{types::Json, FromRow, PgPool};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Storage for advisory reports
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Persist a report, assigning its id and creation time
    async fn save(&self, report: NewReport) -> AppResult<AdvisoryRecord>;

    /// One page of reports, newest first
    async fn list(&self, pagination: Pagination) -> AppResult<ReportPage>;

    async fn count(&self) -> AppResult<u64>;

    /// Backend name, reported by the health endpoint
    fn backend_name(&self) -> &'static str;
}

fn page_of(reports: Vec<AdvisoryRecord>, total: u64, pagination: Pagination) -> ReportPage {
    ReportPage {
        reports,
        total,
        page: pagination.page,
        per_page: pagination.per_page,
        pages: pagination.total_pages(total),
    }
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// Process-local store used when no database URL is configured
#[derive(Default)]
pub struct InMemoryReportStore {
    records: RwLock<Vec<AdvisoryRecord>>,
}

impl InMemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReportStore for InMemoryReportStore {
    async fn save(&self, report: NewReport) -> AppResult<AdvisoryRecord> {
        let record = AdvisoryRecord {
            id: Uuid::new_v4(),
            report,
            created_at: Utc::now(),
        };
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn list(&self, pagination: Pagination) -> AppResult<ReportPage> {
        let pagination = pagination.normalized();
        let records = self.records.read().await;
        let total = records.len() as u64;

        // Insertion order is creation order
        let reports = records
            .iter()
            .rev()
            .skip(usize::try_from(pagination.offset()).unwrap_or(usize::MAX))
            .take(pagination.per_page as usize)
            .cloned()
            .collect();

        Ok(page_of(reports, total, pagination))
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.records.read().await.len() as u64)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

// ---------------------------------------------------------------------------
// PostgreSQL store
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct PgReportStore {
    db: PgPool,
}

#[derive(Debug, FromRow)]
struct ReportRow {
    id: Uuid,
    crop_type: String,
    growth_stage: String,
    stress_level: i16,
    stress_label: String,
    confidence: f64,
    color: String,
    observed_symptoms: Json<Vec<SymptomTag>>,
    symptom_analysis: Json<Vec<SymptomAnalysisEntry>>,
    combined_assessment: String,
    action_priority: Json<Vec<SymptomTag>>,
    ml_based_recommendation: String,
    yield_optimization: String,
    ai_analysis: Option<String>,
    ai_provider: Option<String>,
    weather: Json<WeatherSample>,
    soil_moisture_estimate: f64,
    location: Option<String>,
    latitude: f64,
    longitude: f64,
    created_at: DateTime<Utc>,
}

impl TryFrom<ReportRow> for AdvisoryRecord {
    type Error = AppError;

    fn try_from(row: ReportRow) -> Result<Self, Self::Error> {
        let stress_level = StressLevel::from_code(i64::from(row.stress_level)).ok_or_else(|| {
            AppError::Internal(format!(
                "report {} has invalid stress level {}",
                row.id, row.stress_level
            ))
        })?;

        Ok(AdvisoryRecord {
            id: row.id,
            report: NewReport {
                crop_type: row.crop_type,
                growth_stage: row.growth_stage,
                stress_level,
                stress_label: row.stress_label,
                confidence: row.confidence,
                color: row.color,
                observed_symptoms: row.observed_symptoms.0,
                symptom_analysis: row.symptom_analysis.0,
                combined_assessment: row.combined_assessment,
                action_priority: row.action_priority.0,
                ml_based_recommendation: row.ml_based_recommendation,
                yield_optimization: row.yield_optimization,
                ai_analysis: row.ai_analysis,
                ai_provider: row.ai_provider,
                weather: row.weather.0,
                soil_moisture_estimate: row.soil_moisture_estimate,
                location: row.location,
                latitude: row.latitude,
                longitude: row.longitude,
            },
            created_at: row.created_at,
        })
    }
}

const REPORT_COLUMNS: &str = r#"
    id, crop_type, growth_stage, stress_level, stress_label, confidence, color,
    observed_symptoms, symptom_analysis, combined_assessment, action_priority,
    ml_based_recommendation, yield_optimization, ai_analysis, ai_provider,
    weather, soil_moisture_estimate, location, latitude, longitude, created_at
"#;

impl PgReportStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReportStore for PgReportStore {
    async fn save(&self, report: NewReport) -> AppResult<AdvisoryRecord> {
        let query = format!(
            r#"
            INSERT INTO advisory_reports (
                id, crop_type, growth_stage, stress_level, stress_label, confidence, color,
                observed_symptoms, symptom_analysis, combined_assessment, action_priority,
                ml_based_recommendation, yield_optimization, ai_analysis, ai_provider,
                weather, soil_moisture_estimate, location, latitude, longitude
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20)
            RETURNING {}
            "#,
            REPORT_COLUMNS
        );

        let row = sqlx::query_as::<_, ReportRow>(&query)
            .bind(Uuid::new_v4())
            .bind(&report.crop_type)
            .bind(&report.growth_stage)
            .bind(i16::from(report.stress_level.code()))
            .bind(&report.stress_label)
            .bind(report.confidence)
            .bind(&report.color)
            .bind(Json(&report.observed_symptoms))
            .bind(Json(&report.symptom_analysis))
            .bind(&report.combined_assessment)
            .bind(Json(&report.action_priority))
            .bind(&report.ml_based_recommendation)
            .bind(&report.yield_optimization)
            .bind(&report.ai_analysis)
            .bind(&report.ai_provider)
            .bind(Json(&report.weather))
            .bind(report.soil_moisture_estimate)
            .bind(&report.location)
            .bind(report.latitude)
            .bind(report.longitude)
            .fetch_one(&self.db)
            .await?;

        row.try_into()
    }

    async fn list(&self, pagination: Pagination) -> AppResult<ReportPage> {
        let pagination = pagination.normalized();
        let total = self.count().await?;

        let query = format!(
            "SELECT {} FROM advisory_reports ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2",
            REPORT_COLUMNS
        );
        let rows = sqlx::query_as::<_, ReportRow>(&query)
            .bind(i64::from(pagination.per_page))
            .bind(i64::try_from(pagination.offset()).unwrap_or(i64::MAX))
            .fetch_all(&self.db)
            .await?;

        let reports = rows
            .into_iter()
            .map(AdvisoryRecord::try_from)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(page_of(reports, total, pagination))
    }

    async fn count(&self) -> AppResult<u64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM advisory_reports")
            .fetch_one(&self.db)
            .await?;
        Ok(u64::try_from(total).unwrap_or(0))
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
