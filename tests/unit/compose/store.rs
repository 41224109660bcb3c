use super::*;
use crate::compose::part::{PartCategory, PartRect};
use crate::foundation::core::Canvas;

fn part(id: &str) -> BodyPart {
    BodyPart::new(id, id, PartCategory::Hair, "/p.png", PartRect::default())
}

fn comp(id: &str) -> BodyComposition {
    BodyComposition {
        id: id.to_string(),
        name: id.to_string(),
        parts: Vec::new(),
        base_image: None,
        canvas_size: Canvas::COMPOSITION,
    }
}

#[test]
fn listing_keeps_first_insertion_order() {
    let store = InMemoryStore::new();
    for id in ["c", "a", "b"] {
        store.upsert_part(part(id));
    }
    let mut renamed = part("c");
    renamed.name = "C2".to_string();
    store.upsert_part(renamed);

    let ids: Vec<String> = store.parts().into_iter().map(|p| p.id).collect();
    assert_eq!(ids, ["c", "a", "b"]);
    assert_eq!(store.part("c").unwrap().name, "C2");
    assert!(store.part("zzz").is_none());
}

#[test]
fn composition_lifecycle() {
    let store = InMemoryStore::new();
    store.insert_composition(comp("x"));
    store.insert_composition(comp("y"));
    assert_eq!(store.compositions().len(), 2);

    assert!(store.modify_composition("x", &mut |c| c.name = "renamed".to_string()));
    assert_eq!(store.composition("x").unwrap().name, "renamed");
    assert!(!store.modify_composition("missing", &mut |_| {}));

    assert!(store.remove_composition("x"));
    assert!(!store.remove_composition("x"));
    assert!(store.composition("x").is_none());
    assert_eq!(store.compositions().len(), 1);
}

#[test]
fn poisoned_lock_is_recovered() {
    let store = std::sync::Arc::new(InMemoryStore::new());
    store.upsert_part(part("a"));

    let s = store.clone();
    let _ = std::thread::spawn(move || {
        let _guard = s.inner.lock().unwrap();
        panic!("poison the store");
    })
    .join();

    assert!(store.inner.is_poisoned());
    store.upsert_part(part("b"));
    assert_eq!(store.parts().len(), 2);
}
