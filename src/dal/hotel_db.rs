use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::hotel::Hotel;

pub async fn insert_hotel(pool: &PgPool, hotel: &Hotel) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();

    sqlx::query(
        r#"
        insert into partner_hotel
            (id, name, city, city_lower, state, address, latitude, longitude,
             price_per_night_inr, rating, amenities, maps_url, website, contact,
             created_at, created_by)
        values
            ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
        "#,
    )
    .bind(id)
    .bind(&hotel.name)
    .bind(&hotel.city)
    .bind(&hotel.city_lower)
    .bind(&hotel.state)
    .bind(&hotel.address)
    .bind(hotel.location.latitude)
    .bind(hotel.location.longitude)
    .bind(hotel.price_per_night_inr)
    .bind(hotel.rating)
    .bind(&hotel.amenities)
    .bind(&hotel.maps_url)
    .bind(&hotel.website)
    .bind(&hotel.contact)
    .bind(hotel.created_at)
    .bind(&hotel.created_by)
    .execute(pool)
    .await?;

    Ok(id)
}
