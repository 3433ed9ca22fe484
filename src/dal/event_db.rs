use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::event::Event;

pub async fn insert_event(pool: &PgPool, event: &Event) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();

    sqlx::query(
        r#"
        insert into event
            (id, title, description, location, city, state, event_date, start_time, end_time,
             category, price, max_capacity, image_url, organizer, contact_email, contact_phone,
             maps_url, website, tags, is_active, created_at, created_by)
        values
            ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11,
             $12, $13, $14, $15, $16, $17, $18, $19, $20, $21, $22)
        "#,
    )
    .bind(id)
    .bind(&event.title)
    .bind(&event.description)
    .bind(&event.location)
    .bind(&event.city)
    .bind(&event.state)
    .bind(event.event_date)
    .bind(&event.start_time)
    .bind(&event.end_time)
    .bind(&event.category)
    .bind(event.price)
    .bind(event.max_capacity)
    .bind(&event.image_url)
    .bind(&event.organizer)
    .bind(&event.contact_email)
    .bind(&event.contact_phone)
    .bind(&event.maps_url)
    .bind(&event.website)
    .bind(&event.tags)
    .bind(event.is_active)
    .bind(event.created_at)
    .bind(&event.created_by)
    .execute(pool)
    .await?;

    Ok(id)
}
