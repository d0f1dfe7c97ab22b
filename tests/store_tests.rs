//! Persistence tests: high scores and preferences across store reopen

use std::fs;
use std::path::PathBuf;

use falling_blocks::core::{GameSession, HighScoreList, Piece, SessionConfig, Shape, ShapeSet};
use falling_blocks::store::{
    load_bool_preference, parse_shape_set, save_bool_preference, JsonFileStore, KeyValueStore,
    MemoryStore, Persistence, StoreDocument,
};
use falling_blocks::types::{PieceKind, HIGH_SCORES_KEY, SFX_MUTED_KEY, THEME_KEY};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "falling-blocks-it-{}-{}.json",
        name,
        std::process::id()
    ))
}

#[test]
fn test_high_scores_persist_across_reopen() {
    let path = temp_path("scores");
    let _ = fs::remove_file(&path);

    let mut store = JsonFileStore::open(&path);
    assert!(store.load_high_scores().is_empty());
    store.save_high_scores(&HighScoreList::from_scores([300, 1200, 700]));
    store.save_preference(THEME_KEY, "kafkaHSR");
    save_bool_preference(&mut store, SFX_MUTED_KEY, true);

    let mut reopened = JsonFileStore::open(&path);
    assert_eq!(reopened.load_high_scores().as_slice(), &[1200, 700, 300]);
    assert_eq!(reopened.load_preference(THEME_KEY).as_deref(), Some("kafkaHSR"));
    assert!(load_bool_preference(&mut reopened, SFX_MUTED_KEY, false));

    // The document is plain JSON with string values.
    let text = fs::read_to_string(&path).unwrap();
    let doc: StoreDocument = serde_json::from_str(&text).unwrap();
    assert_eq!(doc.entries.get(HIGH_SCORES_KEY).map(String::as_str), Some("[1200,700,300]"));

    let _ = fs::remove_file(&path);
}

#[test]
fn test_session_scores_flow_to_store() {
    let mut store = MemoryStore::new();
    store
        .set(HIGH_SCORES_KEY, "[900, 100]".to_string())
        .unwrap();

    let session = GameSession::new(
        SessionConfig::default(),
        5,
        ShapeSet::canonical(),
        store.load_high_scores(),
    );
    assert_eq!(session.high_scores().best(), Some(900));

    store.save_high_scores(session.high_scores());
    assert_eq!(store.get(HIGH_SCORES_KEY).as_deref(), Some("[900,100]"));
}

#[test]
fn test_shape_overrides_replace_the_table() {
    let set = parse_shape_set(r#"{ "T": [[1, 1, 1], [0, 1, 0]], "X": [[1]] }"#).unwrap();
    let t = Piece::spawn(PieceKind::T, &set);
    assert_eq!(t.shape.to_rows(), vec![vec![1, 1, 1], vec![0, 1, 0]]);

    let i = Piece::spawn(PieceKind::I, &set);
    assert_eq!(i.shape, Shape::SINGLE);
}
