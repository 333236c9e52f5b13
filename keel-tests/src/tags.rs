use keel::{Engine, Failure, Record};
use uuid::Uuid;

/// Record with a key generated by the backend that is not an integer.
#[derive(Record, Default, Debug, Clone, PartialEq)]
#[keel(table = "tags")]
pub struct Tag {
    #[keel(column = "id", primary_key)]
    pub id: Uuid,
    #[keel(column = "label")]
    pub label: String,
}

pub async fn tags(engine: &Engine) {
    let mut tag = Tag {
        id: Uuid::nil(),
        label: "rust".into(),
    };
    engine.save(&mut tag).await.expect("Failed to save the tag");
    assert!(!tag.id.is_nil(), "The generated key must be written back");

    tag.label = "ferris".into();
    engine.save(&mut tag).await.expect("Failed to update the tag");
    let mut loaded = Tag::default();
    engine
        .get(&mut loaded, tag.id)
        .await
        .expect("Failed to get the tag");
    assert_eq!(loaded, tag);

    engine.remove(&tag).await.expect("Failed to remove the tag");
    let error = engine
        .get(&mut loaded, tag.id)
        .await
        .expect_err("The tag was removed");
    assert!(Failure::is_not_found(&error));
}
