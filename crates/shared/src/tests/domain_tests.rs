use super::*;

#[test]
fn draft_has_empty_id_and_no_owner() {
    let draft = Article::draft();
    assert!(draft.id.is_draft());
    assert!(!draft.is_persisted());
    assert!(draft.tags.is_empty());
    assert!(draft.user_id.is_none());
}

#[test]
fn deserializes_server_article_with_camel_case_owner() {
    let article: Article = serde_json::from_str(
        r#"{"id":"5","title":"Old","description":"Old desc","tags":["a"],"userId":"u-1"}"#,
    )
    .expect("article json");
    assert_eq!(article.id, ArticleId::from("5"));
    assert_eq!(article.user_id, Some(UserId::from("u-1")));
    assert!(article.is_persisted());
}

#[test]
fn missing_id_and_tags_default_to_draft_values() {
    let article: Article =
        serde_json::from_str(r#"{"title":"T","description":"D"}"#).expect("article json");
    assert!(article.id.is_draft());
    assert!(article.tags.is_empty());
}

#[test]
fn fields_never_carry_the_identifier() {
    let article = Article {
        id: ArticleId::from("5"),
        title: "Old".into(),
        description: "Old desc".into(),
        tags: vec!["a".into()],
        user_id: None,
    };
    let body = serde_json::to_value(article.fields()).expect("fields json");
    assert!(body.get("id").is_none());
    assert!(body.get("userId").is_none());
    assert_eq!(body["title"], "Old");
}

#[test]
fn project_reads_camel_case_links() {
    let project: Project = serde_json::from_str(
        r#"{"name":"Atlas","imageUrl":"/atlas.png","description":"Maps","tags":["rust","wasm"],"githubUrl":"https://github.com/o/atlas","liveLink":"https://atlas.dev"}"#,
    )
    .expect("project json");
    assert_eq!(project.image_url, "/atlas.png");
    assert_eq!(project.github_url, "https://github.com/o/atlas");
    assert_eq!(project.live_link, "https://atlas.dev");
    assert_eq!(project.tags, vec!["rust", "wasm"]);
}
