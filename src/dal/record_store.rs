use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    domain::{event::Event, hotel::Hotel},
    services::RecordStore,
};

use super::{event_db, hotel_db};

#[async_trait]
impl RecordStore for PgPool {
    async fn insert_event(&self, event: &Event) -> Result<(), sqlx::Error> {
        let id = event_db::insert_event(self, event).await?;
        log::debug!("Inserted event {} ({})", id, event.title);
        Ok(())
    }

    async fn insert_hotel(&self, hotel: &Hotel) -> Result<(), sqlx::Error> {
        let id = hotel_db::insert_hotel(self, hotel).await?;
        log::debug!("Inserted partner hotel {} ({})", id, hotel.name);
        Ok(())
    }
}
