use scc::support::StrMap;

#[test]
fn put_get_update() {
    let mut m = StrMap::new();
    m.put("x", 1);
    m.put("y", 2);
    assert_eq!(m.get("x"), Some(&1));
    assert_eq!(m.get("y"), Some(&2));
    m.put("x", 3);
    assert_eq!(m.get("x"), Some(&3));
    assert_eq!(m.len(), 2);
}

#[test]
fn missing_keys_miss() {
    let m: StrMap<i32> = StrMap::new();
    assert_eq!(m.get("anything"), None);
}

#[test]
fn remove_then_miss() {
    let mut m = StrMap::new();
    m.put("k", 9);
    assert_eq!(m.remove("k"), Some(9));
    assert_eq!(m.get("k"), None);
    assert_eq!(m.remove("k"), None);
    assert_eq!(m.len(), 0);
}

#[test]
fn reinsert_after_remove() {
    let mut m = StrMap::new();
    m.put("k", 1);
    m.remove("k");
    m.put("k", 2);
    assert_eq!(m.get("k"), Some(&2));
    assert_eq!(m.len(), 1);
}

#[test]
fn parent_fallthrough_and_shadowing() {
    let mut outer = StrMap::new();
    outer.put("a", 1);
    outer.put("b", 2);

    let mut inner = StrMap::nested(outer);
    assert_eq!(inner.get("a"), Some(&1));
    inner.put("a", 10);
    assert_eq!(inner.get("a"), Some(&10));
    assert_eq!(inner.get("b"), Some(&2));
    assert_eq!(inner.get_local("b"), None);

    // Removing the shadow uncovers the outer binding again; the parent
    // itself is never written through.
    inner.remove("a");
    assert_eq!(inner.get("a"), Some(&1));

    let outer = inner.into_parent().unwrap();
    assert_eq!(outer.get("a"), Some(&1));
    assert_eq!(outer.len(), 2);
}

#[test]
fn deep_scope_chains_resolve_innermost_first() {
    let mut m = StrMap::new();
    m.put("v", 0);
    for depth in 1..5 {
        m = StrMap::nested(m);
        m.put("v", depth);
        m.put(format!("only{depth}"), depth);
    }
    assert_eq!(m.get("v"), Some(&4));
    assert_eq!(m.get("only1"), Some(&1));
    m = m.into_parent().unwrap();
    assert_eq!(m.get("v"), Some(&3));
    assert_eq!(m.get("only4"), None);
}

#[test]
fn rehash_keeps_all_bindings() {
    let mut m = StrMap::new();
    for i in 0..100 {
        m.put(format!("key{i}"), i);
    }
    assert!(m.capacity() >= 128);
    for i in 0..100 {
        assert_eq!(m.get(&format!("key{i}")), Some(&i), "key{i}");
    }
    assert_eq!(m.len(), 100);
}

#[test]
fn mixed_churn_stays_consistent() {
    let mut m = StrMap::new();
    for i in 0..200 {
        m.put(format!("k{i}"), i);
        if i % 3 == 0 {
            m.remove(&format!("k{i}"));
        }
    }
    for i in 0..200 {
        let expect = if i % 3 == 0 { None } else { Some(i) };
        assert_eq!(m.get(&format!("k{i}")).copied(), expect, "k{i}");
    }
}

#[test]
fn iter_sees_live_entries_only() {
    let mut m = StrMap::new();
    m.put("a", 1);
    m.put("b", 2);
    m.remove("a");
    let keys: Vec<&str> = m.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["b"]);
}
