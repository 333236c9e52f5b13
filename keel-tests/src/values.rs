use keel::{Engine, Record};
use rust_decimal::Decimal;
use std::str::FromStr;
use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time};
use uuid::Uuid;

#[derive(Record, Default, Debug, Clone, PartialEq)]
#[keel(table = "samples")]
pub struct Sample {
    #[keel(column = "id", primary_key)]
    pub id: i32,
    #[keel(column = "flag")]
    pub flag: bool,
    #[keel(column = "small")]
    pub small: i16,
    #[keel(column = "big")]
    pub big: Option<i64>,
    #[keel(column = "ratio")]
    pub ratio: f64,
    #[keel(column = "real")]
    pub real: Option<f32>,
    #[keel(column = "amount")]
    pub amount: Option<Decimal>,
    #[keel(column = "label")]
    pub label: Option<String>,
    #[keel(column = "data")]
    pub data: Option<Vec<u8>>,
    #[keel(column = "day")]
    pub day: Option<Date>,
    #[keel(column = "clock")]
    pub clock: Option<Time>,
    #[keel(column = "moment")]
    pub moment: Option<PrimitiveDateTime>,
    #[keel(column = "instant")]
    pub instant: Option<OffsetDateTime>,
    #[keel(column = "tag")]
    pub tag: Option<Uuid>,
}

pub async fn values(engine: &Engine) {
    let day = Date::from_calendar_date(2024, Month::February, 29).expect("Valid date");
    let clock = Time::from_hms_micro(23, 59, 58, 250_000).expect("Valid time");
    let mut full = Sample {
        id: 0,
        flag: true,
        small: -32768,
        big: Some(9_007_199_254_740_993),
        ratio: 0.1,
        real: Some(-1.5),
        amount: Some(Decimal::from_str("12345.678").expect("Valid decimal")),
        label: Some("Hello \"world\" 'quoted'".into()),
        data: Some(vec![0, 1, 2, 254, 255]),
        day: Some(day),
        clock: Some(clock),
        moment: Some(PrimitiveDateTime::new(day, clock)),
        instant: Some(PrimitiveDateTime::new(day, clock).assume_utc()),
        tag: Some(Uuid::parse_str("5e915574-bb30-4430-98cf-c5854f61fbbd").expect("Valid uuid")),
    };
    engine.save(&mut full).await.expect("Failed to save the full sample");
    assert_ne!(full.id, 0);
    let mut loaded = Sample::default();
    engine
        .get(&mut loaded, full.id)
        .await
        .expect("Failed to get the full sample");
    assert_eq!(loaded, full);

    let mut empty = Sample {
        ratio: -0.25,
        ..Default::default()
    };
    engine.save(&mut empty).await.expect("Failed to save the empty sample");
    assert_ne!(empty.id, full.id);
    let mut loaded = Sample::default();
    engine
        .get(&mut loaded, empty.id)
        .await
        .expect("Failed to get the empty sample");
    assert_eq!(loaded, empty);

    // Nulls overwrite values on update
    let mut cleared = Sample {
        id: full.id,
        ..Default::default()
    };
    engine.save(&mut cleared).await.expect("Failed to clear the full sample");
    let mut loaded = full.clone();
    engine
        .get(&mut loaded, full.id)
        .await
        .expect("Failed to get the cleared sample");
    assert_eq!(loaded, cleared);

    engine.remove(&full).await.expect("Failed to remove the full sample");
    engine.remove(&empty).await.expect("Failed to remove the empty sample");
}
