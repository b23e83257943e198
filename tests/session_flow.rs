use notecase::app::{Event, Session};
use notecase::domain::{ContentStore, EditorMode, EntityId, Snapshot};
use notecase::markup::RenderOptions;
use notecase::storage::{FileStore, KeyValueStore, MemoryStore, SnapshotGateway};
use tempfile::TempDir;

const KEY: &str = "notesApp";

fn open(store: MemoryStore) -> Session<MemoryStore> {
    Session::open(store, KEY, RenderOptions::default())
}

#[test]
fn create_then_delete_folder_with_note() {
    let mut session = open(MemoryStore::new());
    session
        .dispatch(&Event::CreateFolder { name: "X".into() })
        .unwrap();

    let store = &session.state().store;
    let x = store
        .folder(store.root_id())
        .and_then(|root| root.folders.last())
        .cloned()
        .unwrap();
    assert_eq!(store.folder(&x).unwrap().name, "X");
    session.dispatch(&Event::OpenFolder(x.clone())).unwrap();
    session
        .dispatch(&Event::CreateNote { name: "Y".into() })
        .unwrap();
    let y = session.state().selected_note.clone().unwrap();

    let deleted = session.dispatch(&Event::DeleteEntity(x.clone())).unwrap();
    assert!(deleted.closed_editor());

    let store = &session.state().store;
    assert!(store.resolve(&x).is_err());
    assert!(store.resolve(&y).is_err());
    assert!(!store.folder(store.root_id()).unwrap().folders.contains(&x));
    assert_eq!(session.state().selected_note, None);
    assert!(session.state().cursor.is_at_root());
}

#[test]
fn corrupt_blob_loads_the_default_tree() {
    let mut store = MemoryStore::new();
    store.set(KEY, b"{ not json").unwrap();

    let session = open(store);
    assert_eq!(session.state().store, ContentStore::seeded());
    assert_eq!(session.state().sidebar().header.title, "All Notes");
}

#[test]
fn structurally_invalid_blob_loads_the_default_tree() {
    let mut store = MemoryStore::new();
    let blob = r#"{
        "currentPath": [],
        "selectedNote": null,
        "editorMode": "edit",
        "sidebarVisible": true,
        "folders": {
            "root": { "id": "root", "name": "All Notes", "parent": null, "folders": ["ghost"], "notes": [] }
        },
        "notes": {}
    }"#;
    store.set(KEY, blob.as_bytes()).unwrap();

    let session = open(store);
    assert_eq!(session.state().store, ContentStore::seeded());
}

#[test]
fn saved_snapshot_loads_back_equal() {
    let mut session = open(MemoryStore::new());
    session
        .dispatch(&Event::OpenFolder(EntityId::from("personal")))
        .unwrap();
    session
        .dispatch(&Event::CreateNote {
            name: "Reading list".into(),
        })
        .unwrap();
    session
        .dispatch(&Event::EditNote {
            content: "- [ ] Dune\n- [x] Neuromancer".into(),
        })
        .unwrap();
    session
        .dispatch(&Event::SetEditorMode(EditorMode::Preview))
        .unwrap();
    session.dispatch(&Event::ToggleSidebar).unwrap();

    let expected = session.state().to_snapshot();
    let gateway = SnapshotGateway::new(session.into_store(), KEY);
    let loaded: Snapshot = gateway.try_load().unwrap().unwrap();

    assert_eq!(loaded, expected);
    assert_eq!(loaded.editor_mode, EditorMode::Preview);
    assert!(!loaded.sidebar_visible);
}

#[test]
fn file_store_writes_through_and_reopens() {
    let dir = TempDir::new().unwrap();

    let note = {
        let store = FileStore::new(dir.path().to_path_buf()).unwrap();
        let mut session = Session::open(store, KEY, RenderOptions::default());
        session
            .dispatch(&Event::OpenFolder(EntityId::from("work")))
            .unwrap();
        session
            .dispatch(&Event::CreateNote {
                name: "Standup".into(),
            })
            .unwrap();
        session
            .dispatch(&Event::EditNote {
                content: "# Standup\n\n**blocked** on review".into(),
            })
            .unwrap();
        session.state().selected_note.clone().unwrap()
    };

    assert!(dir.path().join("notesApp.json").exists());

    let store = FileStore::new(dir.path().to_path_buf()).unwrap();
    let session = Session::open(store, KEY, RenderOptions::default());
    let state = session.state();

    assert_eq!(state.current_folder().as_str(), "work");
    assert_eq!(state.selected_note.as_ref(), Some(&note));
    assert_eq!(
        state.preview().as_deref(),
        Some("<h1>Standup</h1><p><strong>blocked</strong> on review</p>")
    );
    assert!(state.store.validate().is_ok());
}

#[test]
fn separate_keys_are_independent() {
    let mut first = Session::open(MemoryStore::new(), "a", RenderOptions::default());
    first
        .dispatch(&Event::CreateFolder {
            name: "Only in a".into(),
        })
        .unwrap();

    let second = Session::open(first.into_store(), "b", RenderOptions::default());
    assert_eq!(second.state().store, ContentStore::seeded());
}
