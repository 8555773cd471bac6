use super::*;

fn project(description: &str, tags: &[&str]) -> Project {
    Project {
        name: "Atlas".into(),
        image_url: "/atlas.png".into(),
        description: description.into(),
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
        github_url: "https://github.com/o/atlas".into(),
        live_link: "https://atlas.dev".into(),
    }
}

#[test]
fn description_of_exactly_200_chars_is_untouched() {
    let exact = "p".repeat(200);
    assert_eq!(card_description(&exact), exact);
}

#[test]
fn description_over_200_chars_is_cut_with_ellipsis() {
    let long = "p".repeat(201);
    let preview = card_description(&long);
    assert_eq!(preview, format!("{}...", "p".repeat(200)));
}

#[test]
fn card_keeps_descriptions_that_article_rows_would_cut() {
    let medium = "m".repeat(150);
    let card = ProjectCard::from(&project(&medium, &["rust"]));
    assert_eq!(card.description, medium);

    let short = "s".repeat(80);
    assert_eq!(card_description(&short), short);
}

#[test]
fn truncation_counts_characters_not_bytes() {
    let accented = "é".repeat(201);
    let preview = card_description(&accented);
    assert_eq!(preview.chars().count(), 203);
    assert!(preview.ends_with("é..."));
}

#[test]
fn card_shows_every_tag_and_both_links() {
    let card = ProjectCard::from(&project("Maps", &["rust", "wasm", "axum", "tokio"]));
    assert_eq!(card.tags.len(), 4);

    let labels: Vec<_> = card.links().iter().map(|link| link.label).collect();
    assert_eq!(labels, vec!["View Code", "Live Preview"]);
    assert_eq!(card.code.href, "https://github.com/o/atlas");
    assert_eq!(card.preview.href, "https://atlas.dev");

    let rendered = card.render();
    assert!(rendered.starts_with("Atlas\n"));
    assert!(rendered.contains("[rust] [wasm] [axum] [tokio]"));
    assert!(rendered.contains("View Code: https://github.com/o/atlas"));
    assert!(rendered.contains("Live Preview: https://atlas.dev"));
}

#[test]
fn render_cards_separates_projects() {
    let projects = vec![project("One", &[]), project("Two", &["x"])];
    let rendered = render_cards(&projects);
    assert_eq!(rendered.matches("Live Preview:").count(), 2);
    assert!(!rendered.contains("[]"));
}
