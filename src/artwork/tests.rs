use super::*;

#[test]
fn install_replaces_the_prior_buffer() {
    let mut store = ArtworkStore::new();

    let token = store.begin();
    assert!(store.install(token, Some(vec![1, 2, 3])));
    let first = store.current().expect("buffer installed");
    let watcher = Arc::downgrade(&first);
    drop(first);

    let token = store.begin();
    assert!(store.install(token, Some(vec![4, 5])));

    // The old bytes are gone; only the replacement is alive.
    assert!(watcher.upgrade().is_none());
    assert_eq!(store.current().as_deref(), Some(&[4u8, 5][..]));
}

#[test]
fn clearing_releases_the_buffer() {
    let mut store = ArtworkStore::new();

    let token = store.begin();
    assert!(store.install(token, Some(vec![9; 16])));
    let watcher = Arc::downgrade(&store.current().unwrap());

    let token = store.begin();
    assert!(store.install(token, None));

    assert!(store.current().is_none());
    assert!(watcher.upgrade().is_none());
}

#[test]
fn stale_token_is_discarded() {
    let mut store = ArtworkStore::new();

    let stale = store.begin();
    let fresh = store.begin();

    assert!(!store.install(stale, Some(vec![1])));
    assert!(store.current().is_none());

    assert!(store.install(fresh, Some(vec![2])));
    assert_eq!(store.current().as_deref(), Some(&[2u8][..]));

    // And the token that already installed cannot clobber a newer update.
    let newer = store.begin();
    assert!(store.install(newer, Some(vec![3])));
    assert!(!store.install(fresh, Some(vec![4])));
    assert_eq!(store.current().as_deref(), Some(&[3u8][..]));
}
