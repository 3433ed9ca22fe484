use async_trait::async_trait;

use crate::domain::{
    event::Event,
    hotel::Hotel,
    import_report::ImportReport,
    sheet_row::SheetRow,
};

/// Where imported records land. Each insert stands alone; there is no batch transaction.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn insert_event(&self, event: &Event) -> Result<(), sqlx::Error>;
    async fn insert_hotel(&self, hotel: &Hotel) -> Result<(), sqlx::Error>;
}

pub enum ImportKind {
    Events,
    Hotels,
}

impl ImportKind {
    pub fn plural(&self) -> &'static str {
        match self {
            ImportKind::Events => "events",
            ImportKind::Hotels => "hotels",
        }
    }
}

pub async fn import_rows<S>(
    store: &S,
    kind: &ImportKind,
    rows: &[SheetRow],
    created_by: &str,
) -> ImportReport
where
    S: RecordStore + ?Sized,
{
    let mut report = ImportReport::default();

    for (index, row) in rows.iter().enumerate() {
        let created_at = chrono::Utc::now().timestamp_millis();
        let inserted = match kind {
            ImportKind::Events => match Event::from_row(row, created_by, created_at) {
                Ok(event) => store.insert_event(&event).await,
                Err(e) => {
                    report.record_failure(index, e);
                    continue;
                }
            },
            ImportKind::Hotels => match Hotel::from_row(row, created_by, created_at) {
                Ok(hotel) => store.insert_hotel(&hotel).await,
                Err(e) => {
                    report.record_failure(index, e);
                    continue;
                }
            },
        };

        match inserted {
            Ok(()) => report.record_success(),
            Err(e) => {
                log::error!("Failed to insert {} row {}: {:?}", kind.plural(), index + 2, e);
                report.record_failure(index, e);
            }
        }
    }

    log::info!(
        "Imported {}: {} successful, {} failed",
        kind.plural(),
        report.success,
        report.failed
    );

    report
}
