use keel::{Engine, Failure, QueryContext, Record, Value};

/// Where clause selecting the people younger than the first argument.
pub const AGE_BELOW: &str = "age < $1";
/// Where clause selecting the people at least as old as the first argument.
pub const AGE_AT_LEAST: &str = "age >= $1";

#[derive(Record, Default, Debug, Clone, PartialEq)]
#[keel(table = "people")]
pub struct Person {
    #[keel(column = "id", primary_key)]
    pub id: i64,
    #[keel(column = "name")]
    pub name: String,
    #[keel(column = "age")]
    pub age: i32,
    #[keel(column = "nickname")]
    pub nickname: Option<String>,
    pub visits: u32,
}

fn person(name: &str, age: i32) -> Person {
    Person {
        name: name.into(),
        age,
        ..Default::default()
    }
}

fn names(people: &[Person]) -> Vec<&str> {
    people.iter().map(|p| p.name.as_str()).collect()
}

pub async fn people(engine: &Engine) {
    let by_id = engine.with_context(QueryContext::new().with_order("id"));

    // Setup
    let existing = engine
        .all::<Person>()
        .await
        .expect("Failed to list the existing people");
    for p in existing {
        engine
            .remove(&p)
            .await
            .expect("Failed to clear the people table");
    }

    // Create
    let mut people = [
        person("John", 9),
        person("Sarah", 27),
        person("James", 11),
        person("Monika", 12),
    ];
    for p in &mut people {
        engine.save(p).await.expect("Failed to save a person");
        assert_ne!(p.id, 0, "The generated key must be written back");
    }
    let [john, sarah, james, monika] = people.clone();
    assert!(john.id < sarah.id && sarah.id < james.id && james.id < monika.id);

    // Round trip
    let mut loaded = Person::default();
    engine
        .get(&mut loaded, sarah.id)
        .await
        .expect("Failed to get Sarah");
    assert_eq!(loaded, sarah);
    let mut loaded = Person::default();
    engine
        .get(&mut loaded, james.id as i32)
        .await
        .expect("Failed to get James with a narrower key");
    assert_eq!(loaded, james);

    // Update
    let mut changed = monika.clone();
    changed.nickname = Some("Moni".into());
    engine.save(&mut changed).await.expect("Failed to update Monika");
    assert_eq!(changed.id, monika.id, "Updating must not change the key");
    engine.save(&mut changed).await.expect("Failed to update Monika again");
    let all = by_id
        .all::<Person>()
        .await
        .expect("Failed to list the people")
        .into_result()
        .expect("Every person should decode");
    assert_eq!(all.len(), 4);
    assert_eq!(all[3], changed);
    changed.nickname = None;
    engine.save(&mut changed).await.expect("Failed to reset Monika");

    // Where
    let young = by_id
        .filter::<Person>(AGE_BELOW, &[12.into()])
        .await
        .expect("Failed to filter the young people")
        .into_result()
        .expect("Every person should decode");
    assert_eq!(names(&young), ["John", "James"]);
    let adults = by_id
        .filter::<Person>(AGE_AT_LEAST, &[12.into()])
        .await
        .expect("Failed to filter the older people")
        .into_result()
        .expect("Every person should decode");
    assert_eq!(names(&adults), ["Sarah", "Monika"]);

    // First
    let first: Person = by_id
        .first(AGE_BELOW, &[12.into()])
        .await
        .expect("Failed to find the first young person");
    assert_eq!(first, john);
    let first: Person = by_id
        .with_context(by_id.context().with_limit(100))
        .first(AGE_AT_LEAST, &[12.into()])
        .await
        .expect("Failed to find the first older person");
    assert_eq!(first, sarah);
    let error = by_id
        .first::<Person>(AGE_AT_LEAST, &[Value::Int32(Some(100))])
        .await
        .expect_err("Nobody is that old");
    assert!(Failure::is_not_found(&error));

    // Context
    let oldest = engine
        .with_context(QueryContext::new().with_order("age DESC").with_limit(2))
        .all::<Person>()
        .await
        .expect("Failed to list the oldest people");
    assert_eq!(names(&oldest.rows), ["Sarah", "Monika"]);
    let page = by_id
        .with_context(by_id.context().with_skip(1).with_limit(2))
        .all::<Person>()
        .await
        .expect("Failed to list a page of people");
    assert_eq!(names(&page.rows), ["Sarah", "James"]);

    // Remove
    engine.remove(&sarah).await.expect("Failed to remove Sarah");
    let all = by_id
        .all::<Person>()
        .await
        .expect("Failed to list the people");
    assert_eq!(names(&all.rows), ["John", "James", "Monika"]);
    let mut loaded = Person::default();
    let error = engine
        .get(&mut loaded, sarah.id)
        .await
        .expect_err("Sarah was removed");
    assert!(matches!(
        Failure::of(&error),
        Some(Failure::NotFound { table }) if table == "people"
    ));
    assert_eq!(loaded, Person::default(), "A failed get leaves the record as is");

    // Update of a missing row
    let mut ghost = sarah.clone();
    ghost.age = 28;
    engine
        .save(&mut ghost)
        .await
        .expect("Updating a missing row is not an error");
    let all = by_id
        .all::<Person>()
        .await
        .expect("Failed to list the people");
    assert_eq!(all.len(), 3);
}
