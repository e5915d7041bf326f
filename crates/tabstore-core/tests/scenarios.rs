//! End-to-end popup scenarios against an in-memory browser

use std::sync::Arc;

use tabstore_core::{
    is_restricted, Config, Entry, InMemoryBrowser, Mutation, Popup, PopupEvent, RenderOutcome,
    RestrictionPolicy, StorageKind, StorageReader, StorageWriter, TableStatus, TableView,
};

const PAGE: &str = "https://app.example.com/dashboard";

fn storage(browser: &InMemoryBrowser) -> (StorageReader, StorageWriter) {
    let policy = Arc::new(RestrictionPolicy::default());
    (
        StorageReader::new(Arc::new(browser.clone()), Arc::clone(&policy)),
        StorageWriter::new(Arc::new(browser.clone()), policy),
    )
}

async fn open(browser: &InMemoryBrowser) -> Popup<TableView> {
    Popup::open(Arc::new(browser.clone()), TableView::new(), &Config::default()).await
}

#[test]
fn test_guard_classification() {
    assert!(is_restricted(None));
    assert!(is_restricted(Some("")));
    assert!(is_restricted(Some("chrome://extensions")));
    assert!(is_restricted(Some("about:newtab")));
    assert!(is_restricted(Some("edge://settings")));
    assert!(!is_restricted(Some("https://example.com")));
    assert!(!is_restricted(Some("http://example.com/path?q=1")));
}

#[tokio::test]
async fn test_edit_value_scenario() {
    let browser = InMemoryBrowser::new();
    browser.open_tab(Some(PAGE));
    browser.seed_local(PAGE, "theme", "dark").unwrap();

    let popup = open(&browser).await;
    let rows = popup.with_view(|view| view.rows().to_vec());
    assert_eq!(rows.len(), 1);
    assert_eq!((rows[0].key.as_str(), rows[0].value.as_str()), ("theme", "dark"));

    popup
        .dispatch(PopupEvent::ValueEdited {
            row: rows[0].clone(),
            new_value: "light".to_string(),
        })
        .await;

    let (reader, _) = storage(&browser);
    let snapshot = reader.read_snapshot().await.unwrap();
    assert_eq!(snapshot.entries(StorageKind::Local), [Entry::new("theme", "light")]);
}

#[tokio::test]
async fn test_restricted_tab_renders_nothing() {
    let browser = InMemoryBrowser::new();
    browser.open_tab(Some("chrome://extensions"));

    let popup = open(&browser).await;
    let outcome = popup.show_kind(StorageKind::Cookies).await;

    assert_eq!(outcome, RenderOutcome::Restricted);
    popup.with_view(|view| {
        assert!(view.rows().is_empty());
        assert_eq!(view.status(), Some(&TableStatus::Restricted));
    });
    assert!(browser.calls().iter().all(|call| !call.touches_storage()));
}

#[tokio::test]
async fn test_restricted_snapshot_ignores_real_contents() {
    let browser = InMemoryBrowser::new();
    let tab = browser.open_tab(Some(PAGE));
    browser.seed_local(PAGE, "theme", "dark").unwrap();
    browser.seed_cookie(PAGE, "sid", "1").unwrap();
    browser.navigate(tab, "about:blank");

    let (reader, _) = storage(&browser);
    let snapshot = reader.read_snapshot().await.unwrap();

    assert!(snapshot.local().is_empty());
    assert!(snapshot.session().is_empty());
    assert!(snapshot.cookies().is_empty());
}

#[tokio::test]
async fn test_cookie_round_trip() {
    let browser = InMemoryBrowser::new();
    browser.open_tab(Some(PAGE));
    let (reader, writer) = storage(&browser);

    writer
        .set_entry(StorageKind::Cookies, None, "session_id", "abc123")
        .await
        .unwrap();

    let snapshot = reader.read_snapshot().await.unwrap();
    assert!(snapshot.cookies().contains(&Entry::new("session_id", "abc123")));
}

#[tokio::test]
async fn test_rename_does_not_shadow() {
    let browser = InMemoryBrowser::new();
    let tab = browser.open_tab(Some(PAGE));
    browser.seed_session(tab, "k1", "v");
    let (reader, writer) = storage(&browser);

    writer
        .set_entry(StorageKind::Session, Some("k1"), "k2", "v")
        .await
        .unwrap();

    let snapshot = reader.read_snapshot().await.unwrap();
    assert_eq!(snapshot.get(StorageKind::Session, "k1"), None);
    assert_eq!(snapshot.get(StorageKind::Session, "k2"), Some("v"));
    assert_eq!(browser.session_storage(tab).len(), 1);
}

#[tokio::test]
async fn test_delete_missing_is_noop() {
    let browser = InMemoryBrowser::new();
    browser.open_tab(Some(PAGE));
    browser.seed_cookie(PAGE, "keep", "1").unwrap();
    let popup = open(&browser).await;
    popup.show_kind(StorageKind::Cookies).await;

    let outcome = popup
        .commit(StorageKind::Cookies, Mutation::delete("missing"))
        .await;

    assert_eq!(
        outcome,
        RenderOutcome::Rendered {
            kind: StorageKind::Cookies,
            rows: 1
        }
    );
}

#[tokio::test]
async fn test_blank_adds_change_nothing() {
    let browser = InMemoryBrowser::new();
    browser.open_tab(Some(PAGE));
    browser.seed_local(PAGE, "theme", "dark").unwrap();
    let popup = open(&browser).await;
    let (reader, _) = storage(&browser);
    let before = reader.read_snapshot().await.unwrap();

    assert_eq!(popup.add_entry("", "v").await, RenderOutcome::Rejected);
    assert_eq!(popup.add_entry("   ", "v").await, RenderOutcome::Rejected);

    let after = reader.read_snapshot().await.unwrap();
    assert_eq!(before.local(), after.local());
    assert_eq!(before.session(), after.session());
    assert_eq!(before.cookies(), after.cookies());
}

#[tokio::test]
async fn test_add_targets_selected_kind() {
    let browser = InMemoryBrowser::new();
    let tab = browser.open_tab(Some(PAGE));
    let popup = open(&browser).await;

    popup.show_kind(StorageKind::Session).await;
    popup.add_entry("draft", "hello").await;

    assert_eq!(browser.session_storage(tab).get("draft").map(String::as_str), Some("hello"));
    assert!(browser.local_storage(PAGE).is_empty());
    assert!(browser.cookie_jar(PAGE).is_empty());
}

#[tokio::test]
async fn test_tab_switch_is_followed() {
    let browser = InMemoryBrowser::new();
    browser.open_tab(Some("https://a.example.com"));
    browser.seed_local("https://a.example.com", "site", "a").unwrap();
    let popup = open(&browser).await;
    assert_eq!(popup.with_view(|v| v.pairs().len()), 1);

    let second = browser.open_tab(Some("https://b.example.com"));
    popup.add_entry("site", "b").await;

    assert_eq!(
        browser.local_storage("https://a.example.com").get("site").map(String::as_str),
        Some("a")
    );
    assert_eq!(
        browser.local_storage("https://b.example.com").get("site").map(String::as_str),
        Some("b")
    );

    browser.close_tab(second);
    popup.refresh().await;
    assert_eq!(popup.with_view(|v| v.row("site").map(|r| r.value.clone())), Some("a".to_string()));
}

#[tokio::test]
async fn test_reopened_popup_starts_on_local() {
    let browser = InMemoryBrowser::new();
    browser.open_tab(Some(PAGE));

    let popup = open(&browser).await;
    popup.show_kind(StorageKind::Cookies).await;
    assert_eq!(popup.current_kind(), StorageKind::Cookies);
    drop(popup);

    let popup = open(&browser).await;
    assert_eq!(popup.current_kind(), StorageKind::Local);
    popup.with_view(|view| assert_eq!(view.active_kind(), Some(StorageKind::Local)));
}

#[tokio::test]
async fn test_exactly_one_button_active() {
    let browser = InMemoryBrowser::new();
    browser.open_tab(Some(PAGE));
    let popup = open(&browser).await;

    for kind in [StorageKind::Cookies, StorageKind::Session, StorageKind::Local] {
        popup.show_kind(kind).await;
        let active: Vec<&str> = popup.with_view(|view| {
            view.active_buttons()
                .into_iter()
                .filter(|(_, active)| *active)
                .map(|(id, _)| id)
                .collect()
        });
        assert_eq!(active, [kind.button_id()]);
    }
}
