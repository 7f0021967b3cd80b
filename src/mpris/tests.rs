use super::*;

fn player_iface() -> (
    PlayerIface,
    Arc<Mutex<SharedState>>,
    mpsc::Receiver<OverlayRequest>,
) {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, rx) = mpsc::channel();
    (
        PlayerIface {
            requests: tx,
            state: state.clone(),
        },
        state,
        rx,
    )
}

#[test]
fn playback_status_maps_state_to_spec_strings() {
    let (iface, state, _rx) = player_iface();

    state.lock().unwrap().status = OverlayStatus::Stopped;
    assert_eq!(iface.playback_status(), "Stopped");

    state.lock().unwrap().status = OverlayStatus::Playing;
    assert_eq!(iface.playback_status(), "Playing");

    state.lock().unwrap().status = OverlayStatus::Paused;
    assert_eq!(iface.playback_status(), "Paused");
}

#[test]
fn transport_methods_raise_button_requests() {
    let (iface, _state, rx) = player_iface();

    iface.play();
    iface.pause();
    iface.stop();
    iface.next();
    iface.previous();

    let buttons: Vec<OverlayRequest> = rx.try_iter().collect();
    assert_eq!(
        buttons,
        vec![
            OverlayRequest::Button(OverlayButton::Play),
            OverlayRequest::Button(OverlayButton::Pause),
            OverlayRequest::Button(OverlayButton::Stop),
            OverlayRequest::Button(OverlayButton::Next),
            OverlayRequest::Button(OverlayButton::Previous),
        ]
    );
}

#[test]
fn play_pause_resolves_against_the_mirrored_status() {
    let (iface, state, rx) = player_iface();

    state.lock().unwrap().status = OverlayStatus::Playing;
    iface.play_pause();
    assert_eq!(
        rx.try_recv().unwrap(),
        OverlayRequest::Button(OverlayButton::Pause)
    );

    state.lock().unwrap().status = OverlayStatus::Paused;
    iface.play_pause();
    assert_eq!(
        rx.try_recv().unwrap(),
        OverlayRequest::Button(OverlayButton::Play)
    );

    state.lock().unwrap().status = OverlayStatus::Stopped;
    iface.play_pause();
    assert_eq!(
        rx.try_recv().unwrap(),
        OverlayRequest::Button(OverlayButton::Play)
    );
}

#[test]
fn set_position_converts_micros_to_millis() {
    let (iface, _state, rx) = player_iface();
    let track_id = ObjectPath::try_from("/org/mpris/MediaPlayer2/track/1").unwrap();

    iface.set_position(track_id.clone(), 93_500_000);
    assert_eq!(
        rx.try_recv().unwrap(),
        OverlayRequest::Seek { position_ms: 93_500 }
    );

    // Negative positions are not forwarded.
    iface.set_position(track_id, -1);
    assert!(rx.try_recv().is_err());
}

#[test]
fn loop_status_set_maps_spec_values() {
    let (mut iface, _state, rx) = player_iface();

    iface.set_loop_status("Track".to_string());
    iface.set_loop_status("Playlist".to_string());
    iface.set_loop_status("None".to_string());
    iface.set_loop_status("Bogus".to_string());

    let requests: Vec<OverlayRequest> = rx.try_iter().collect();
    assert_eq!(
        requests,
        vec![
            OverlayRequest::Repeat(OverlayRepeat::Track),
            OverlayRequest::Repeat(OverlayRepeat::List),
            OverlayRequest::Repeat(OverlayRepeat::None),
        ]
    );
}

#[test]
fn shuffle_set_raises_request_and_mirrors() {
    let (mut iface, state, rx) = player_iface();

    iface.set_shuffle(true);

    assert!(state.lock().unwrap().shuffle);
    assert!(iface.shuffle());
    assert_eq!(
        rx.try_recv().unwrap(),
        OverlayRequest::Shuffle { enabled: true }
    );
}

#[test]
fn metadata_includes_expected_keys_when_present() {
    let (iface, state, _rx) = player_iface();

    state.lock().unwrap().display = TrackDisplay {
        title: "Title".to_string(),
        artist: "Artist".to_string(),
        album: "Album".to_string(),
        album_artist: "Various".to_string(),
        track_number: Some(3),
        track_count: Some(10),
    };

    let map = iface.metadata();
    for key in [
        "xesam:title",
        "xesam:artist",
        "xesam:album",
        "xesam:albumArtist",
        "xesam:trackNumber",
    ] {
        assert!(map.contains_key(key), "missing key: {key}");
    }
}

#[test]
fn metadata_omits_empty_fields() {
    let (iface, _state, _rx) = player_iface();
    assert!(iface.metadata().is_empty());
}

#[test]
fn capabilities_gate_on_the_enabled_flag() {
    let (iface, state, _rx) = player_iface();

    state.lock().unwrap().caps = ButtonCapabilities::transport();
    assert!(!iface.can_play());
    assert!(!iface.can_control());

    state.lock().unwrap().enabled = true;
    assert!(iface.can_play());
    assert!(iface.can_pause());
    assert!(iface.can_go_next());
    assert!(iface.can_go_previous());
    assert!(iface.can_control());
    // Rewind/fast-forward stay off even while enabled.
    assert!(!state.lock().unwrap().caps.rewind);
}

#[test]
fn handle_updates_mirror_and_nudges_the_service() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (notify_tx, notify_rx) = mpsc::channel();
    let mut overlay = MprisOverlay {
        state: state.clone(),
        notify: notify_tx,
    };

    overlay.set_status(OverlayStatus::Playing);
    overlay.set_enabled(true);
    overlay.publish(&TrackDisplay {
        title: "Song".to_string(),
        ..TrackDisplay::default()
    });
    overlay.set_thumbnail(Some(Arc::from(vec![1u8, 2])));

    {
        let mirror = state.lock().unwrap();
        assert_eq!(mirror.status, OverlayStatus::Playing);
        assert!(mirror.enabled);
        assert_eq!(mirror.display.title, "Song");
    }
    assert_eq!(overlay.thumbnail().as_deref(), Some(&[1u8, 2][..]));
    assert_eq!(notify_rx.try_iter().count(), 4);

    overlay.set_thumbnail(None);
    assert!(overlay.thumbnail().is_none());
}
